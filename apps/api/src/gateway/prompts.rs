// All LLM prompt templates for the gateway.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Classify prompt. Replace `{document}` before sending.
pub const CLASSIFY_PROMPT_TEMPLATE: &str = r#"Analyze the following document. Identify the document type (e.g. Warning Letter, Resignation, Offer Letter), the sentiment, and provide 3 short suggestions to improve it.

Document Content: "{document}...""#;

/// Placeholder-fill prompt.
/// Replace: {notes_instruction}, {html_only}, {profile_json}, {template_html}
pub const FILL_PROMPT_TEMPLATE: &str = r#"You are an expert document editor.
I will provide a "User Profile" (JSON) and a "Document" (HTML).
Your task is to fill in the placeholders in the document using the profile data.

Rules:
1. Maintain the existing HTML structure, styles, classes and formatting EXACTLY. Do not strip, add or reorder tags. Change only placeholder text.
2. Scan for placeholders such as "[Name]", "__________" or "{DATE}", and for generic fields inside the HTML.
3. Replace them with the corresponding data from the User Profile.
4. {notes_instruction} Use the notes text verbatim.
5. {html_only}

User Profile:
{profile_json}

Document HTML:
{template_html}"#;

/// Draft prompt.
/// Replace: {instruction}, {profile_json}, {html_only}
pub const DRAFT_PROMPT_TEMPLATE: &str = r#"Write a professional letter based on the following instruction: "{instruction}".
Use the following user details to sign off or populate relevant fields:
{profile_json}

Format the output as clean, semantic HTML.
Use <p> for paragraphs, <b> for emphasis, and <br> for line breaks where appropriate. Use no other tags.
Do not include <html>, <head> or <body> tags, just the content for a WYSIWYG editor.
{html_only}"#;

/// Reconstruction prompt, sent after the inline document.
/// Replace: {notes_instruction}, {profile_json}
pub const RECONSTRUCT_PROMPT_TEMPLATE: &str = r#"You are a pixel-perfect document reconstruction expert.
Convert the attached document into editable HTML/CSS that replicates the original look exactly.

VISUAL RECONSTRUCTION RULES:
1. Layout with tables: use HTML tables (<table width="100%">) for all structure, including multi-column areas such as an address on the left and a logo on the right. Do not use floats.
2. Typography: detect the font family. Use 'font-family: serif' for traditional faces and 'font-family: sans-serif' for modern ones. Match font weights.
3. Spacing: use CSS padding and line-height to match the vertical rhythm of the document.
4. Signatures and borders: draw underline fields (e.g. "Signature: ______") with border-bottom styles, not underscores.
5. No images: never reference external images. Recreate lines and boxes with CSS borders.

DATA AUTO-FILL RULES:
1. At the same time, find placeholder fields (e.g. "[Candidate Name]", "Date: ....") and fill them with the User Profile data.
2. {notes_instruction} Match the surrounding font style.

OUTPUT:
- Return ONLY valid HTML. No markdown, no ```html blocks.
- Inline CSS for all styling.
- Wrap the content in a single root <div>.

User Profile Data:
{profile_json}"#;

/// Fills `{key}` slots in `template` in one left-to-right pass.
/// Substituted values are never rescanned, so a value that itself contains
/// `{key}` text is inserted as-is. Braces that name no key are kept.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let slot = values.iter().find(|(key, _)| {
            tail[1..]
                .strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match slot {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_every_slot() {
        let out = render("{a} and {b}, then {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and y, then x");
    }

    #[test]
    fn test_render_keeps_unknown_braces() {
        let out = render("Fill {DATE} and {name} {", &[("name", "Sarah")]);
        assert_eq!(out, "Fill {DATE} and Sarah {");
    }

    #[test]
    fn test_render_does_not_expand_slot_text_inside_values() {
        let out = render(
            "Profile: {profile_json}\nHTML: {template_html}",
            &[
                ("profile_json", r#"{"custom_notes":"see {template_html}"}"#),
                ("template_html", "<p>[Name]</p>"),
            ],
        );
        assert_eq!(
            out,
            "Profile: {\"custom_notes\":\"see {template_html}\"}\nHTML: <p>[Name]</p>"
        );
    }
}
