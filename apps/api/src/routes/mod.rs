pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::editor::handlers;
use crate::gateway::MAX_UPLOAD_BYTES;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template gallery
        .route("/api/v1/templates", get(handlers::handle_list_templates))
        .route(
            "/api/v1/templates/:id/select",
            post(handlers::handle_select_template),
        )
        // Session + sidebar
        .route("/api/v1/session", get(handlers::handle_get_session))
        .route(
            "/api/v1/profile",
            get(handlers::handle_get_profile)
                .patch(handlers::handle_update_profile)
                .delete(handlers::handle_reset_profile),
        )
        // Document actions
        .route("/api/v1/document/autofill", post(handlers::handle_auto_fill))
        .route("/api/v1/document/generate", post(handlers::handle_generate))
        .route(
            "/api/v1/document/reconstruct",
            post(handlers::handle_reconstruct).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/document/input", post(handlers::handle_user_input))
        // Canvas toolbar
        .route("/api/v1/canvas/select", post(handlers::handle_select))
        .route("/api/v1/canvas/format", post(handlers::handle_format))
        .route("/api/v1/canvas/zoom", post(handlers::handle_zoom))
        // Export
        .route("/api/v1/export/download", get(handlers::handle_download))
        .route("/api/v1/export/print", get(handlers::handle_print))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::editor::controller::{Controller, EMPTY_NOTES_MESSAGE};
    use crate::gateway::testing::ScriptedBackend;
    use crate::gateway::Gateway;

    fn setup_test_app(backend: Arc<ScriptedBackend>) -> Router {
        let controller = Arc::new(Controller::new(Gateway::new(backend)));
        build_router(AppState { controller })
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(req).await.expect("request failed");
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        (status, body.to_vec())
    }

    async fn json_response(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = send(app, req).await;
        (status, serde_json::from_slice(&body).expect("invalid json"))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = setup_test_app(Arc::new(ScriptedBackend::failing()));
        let (status, body) = json_response(&app, empty_request("GET", "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_list_templates() {
        let app = setup_test_app(Arc::new(ScriptedBackend::failing()));
        let (status, body) = json_response(&app, empty_request("GET", "/api/v1/templates")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);
        assert_eq!(body[1]["id"], "WARNING_LETTER");
        assert_eq!(body[1]["icon"], "alert");
    }

    #[tokio::test]
    async fn test_select_unknown_template_is_404_and_noop() {
        let backend = Arc::new(ScriptedBackend::failing());
        let app = setup_test_app(backend.clone());

        let (status, body) =
            json_response(&app, empty_request("POST", "/api/v1/templates/NOPE/select")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (_, session) = json_response(&app, empty_request("GET", "/api/v1/session")).await;
        assert_eq!(session["phase"], "empty");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_select_template_returns_filled_snapshot() {
        let backend = Arc::new(ScriptedBackend::new(|request| {
            if request.response_schema.is_some() {
                return Ok(r#"{"type": "Resignation", "sentiment": "positive", "suggestions": []}"#.to_string());
            }
            let html = request.text().split("Document HTML:\n").nth(1).unwrap_or_default().to_string();
            Ok(html.replace("[Recipient Name]", "Sarah Connor"))
        }));
        let app = setup_test_app(backend);

        let (status, body) = json_response(
            &app,
            empty_request("POST", "/api/v1/templates/RESIGNATION/select"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "filled");
        assert_eq!(body["busy"], false);
        assert!(body["content"].as_str().unwrap().contains("Dear Sarah Connor"));
    }

    #[tokio::test]
    async fn test_generate_with_empty_notes_is_rejected() {
        let backend = Arc::new(ScriptedBackend::replying("<p>draft</p>"));
        let app = setup_test_app(backend.clone());

        let (status, _) = json_response(
            &app,
            json_request(
                "PATCH",
                "/api/v1/profile",
                json!({"field": "custom_notes", "value": ""}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            json_response(&app, empty_request("POST", "/api/v1/document/generate")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], EMPTY_NOTES_MESSAGE);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_profile_patch_and_reset() {
        let app = setup_test_app(Arc::new(ScriptedBackend::failing()));

        let (_, body) = json_response(
            &app,
            json_request(
                "PATCH",
                "/api/v1/profile",
                json!({"field": "recipient_name", "value": "Kyle Reese"}),
            ),
        )
        .await;
        assert_eq!(body["recipient_name"], "Kyle Reese");

        let (status, body) = json_response(
            &app,
            json_request(
                "PATCH",
                "/api/v1/profile",
                json!({"field": "not_a_field", "value": "x"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, body) = json_response(&app, empty_request("DELETE", "/api/v1/profile")).await;
        assert_eq!(body["recipient_name"], "Sarah Connor");
    }

    #[tokio::test]
    async fn test_input_then_download() {
        let app = setup_test_app(Arc::new(ScriptedBackend::failing()));

        let (status, body) = json_response(
            &app,
            json_request("POST", "/api/v1/document/input", json!({"html": "<p>Hi</p>"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "user_edited");

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/v1/export/download"))
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"letterflow_doc.html\""
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("\"><p>Hi</p></body>"));
    }

    #[tokio::test]
    async fn test_format_and_zoom_through_toolbar() {
        let app = setup_test_app(Arc::new(ScriptedBackend::failing()));
        send(
            &app,
            json_request("POST", "/api/v1/document/input", json!({"html": "<p>Hello world</p>"})),
        )
        .await;

        let (_, selection) = json_response(
            &app,
            json_request("POST", "/api/v1/canvas/select", json!({"start": 9, "end": 14})),
        )
        .await;
        assert_eq!(selection, json!({"start": 9, "end": 14}));

        let (_, body) = json_response(
            &app,
            json_request("POST", "/api/v1/canvas/format", json!({"command": "italic"})),
        )
        .await;
        assert_eq!(body["live"], "<p>Hello <i>world</i></p>");
        assert_eq!(body["content"], "<p>Hello world</p>");

        let (_, body) = json_response(
            &app,
            json_request("POST", "/api/v1/canvas/zoom", json!({"direction": "out"})),
        )
        .await;
        assert_eq!(body["zoom_percent"], 90);
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_envelope() {
        let app = setup_test_app(Arc::new(ScriptedBackend::failing()));
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/document/input")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = json_response(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/canvas/zoom")
            .body(Body::from(r#"{"direction": "in"}"#))
            .unwrap();
        let (status, body) = json_response(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    fn pdf_upload(boundary: &str, size: usize) -> Request<Body> {
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"scan.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4\n"
        )
        .into_bytes();
        body.resize(body.len() + size, b'0');
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/document/reconstruct")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_reconstruct_accepts_multi_megabyte_scan() {
        let backend = Arc::new(ScriptedBackend::replying("<div><p>Scanned</p></div>"));
        let app = setup_test_app(backend.clone());

        let (status, body) = json_response(&app, pdf_upload("XBOUNDARY", 5 * 1024 * 1024)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "reconstructed");
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_reconstruct_rejects_oversized_upload() {
        let backend = Arc::new(ScriptedBackend::replying("<div></div>"));
        let app = setup_test_app(backend.clone());

        let (status, body) =
            json_response(&app, pdf_upload("XBOUNDARY", MAX_UPLOAD_BYTES + 1024)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_reconstruct_requires_file_field() {
        let app = setup_test_app(Arc::new(ScriptedBackend::failing()));
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{boundary}--\r\n"
        );
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/document/reconstruct")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = json_response(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_reconstruct_uploaded_pdf() {
        let backend = Arc::new(ScriptedBackend::replying(
            "<div><table width=\"100%\"><tr><td>Hi</td></tr></table></div>",
        ));
        let app = setup_test_app(backend.clone());
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"scan.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4\r\n--{boundary}--\r\n"
        );
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/document/reconstruct")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = json_response(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "reconstructed");
        assert_eq!(backend.calls(), 1);
    }
}
