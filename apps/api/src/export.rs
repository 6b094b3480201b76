//! Download and print renderings of the current document.
//!
//! Both wrap the content verbatim in a minimal standalone page. Printing is left
//! to the browser; the print page only adds CSS page-size hints.

use serde::Serialize;

pub const DOWNLOAD_FILE_NAME: &str = "letterflow_doc.html";
pub const DOWNLOAD_MIME_TYPE: &str = "text/html; charset=utf-8";

const BODY_STYLE: &str = "font-family: sans-serif; width: 210mm; margin: 0 auto;";

#[derive(Debug, Clone, Serialize)]
pub struct Export {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub html: String,
}

impl Export {
    pub fn download(content: &str) -> Self {
        Self {
            file_name: DOWNLOAD_FILE_NAME,
            mime_type: DOWNLOAD_MIME_TYPE,
            html: render_download(content),
        }
    }

    /// Value for the `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

pub fn render_download(content: &str) -> String {
    wrap(content, "")
}

pub fn render_print(content: &str) -> String {
    wrap(
        content,
        "<style>@page { size: A4; margin: 0; }</style>\
         <script>window.addEventListener('load', () => window.print());</script>",
    )
}

fn wrap(content: &str, head_extra: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Document</title>{head_extra}</head>\n\
         <body style=\"{BODY_STYLE}\">{content}</body>\n</html>\n"
    )
}
