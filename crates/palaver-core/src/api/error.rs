use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server rejected the stored API key. The 401 body is discarded:
    /// by the time a caller sees this the key is already cleared and the
    /// unauthorized signal published, so a uniform message is all that is
    /// left to show.
    #[error("Unauthorized - API key missing or rejected by the server")]
    Unauthorized,

    /// Any other non-success status. The message is best-effort from the
    /// response body; `Display` is the message alone.
    #[error("{message}")]
    RequestFailed { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Build the non-401 failure from a response body: prefer a `detail`
    /// or `message` string inside a JSON object body, fall back to the
    /// raw text.
    pub fn request_failed(status: StatusCode, body: &str) -> Self {
        ApiError::RequestFailed {
            status,
            message: extract_message(body),
        }
    }
}

fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["detail", "message"] {
            if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_detail_field() {
        let err = ApiError::request_failed(
            StatusCode::NOT_FOUND,
            r#"{"detail": "Post not found"}"#,
        );
        assert_eq!(err.to_string(), "Post not found");
    }

    #[test]
    fn falls_back_to_message_field() {
        let err = ApiError::request_failed(
            StatusCode::BAD_REQUEST,
            r#"{"message": "title is required"}"#,
        );
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn detail_wins_over_message() {
        let err = ApiError::request_failed(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "from detail", "message": "from message"}"#,
        );
        assert_eq!(err.to_string(), "from detail");
    }

    #[test]
    fn non_json_body_passes_through() {
        let err = ApiError::request_failed(StatusCode::BAD_GATEWAY, "upstream timed out");
        assert_eq!(err.to_string(), "upstream timed out");
    }

    #[test]
    fn json_without_known_fields_passes_through_raw() {
        let body = r#"{"error": "nope"}"#;
        let err = ApiError::request_failed(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(err.to_string(), body);
    }

    #[test]
    fn non_string_detail_passes_through_raw() {
        // FastAPI validation errors put a list under `detail`
        let body = r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}]}"#;
        let err = ApiError::request_failed(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(err.to_string(), body);
    }

    #[test]
    fn request_failed_keeps_the_status() {
        let err = ApiError::request_failed(StatusCode::FORBIDDEN, "Not a party of this session");
        match err {
            ApiError::RequestFailed { status, .. } => assert_eq!(status, StatusCode::FORBIDDEN),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
