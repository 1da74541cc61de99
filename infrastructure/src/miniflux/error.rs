//! Error types and HTTP status mapping for the Miniflux client

use miniflux_mcp_application::ClientError;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while constructing the client
#[derive(Error, Debug)]
pub enum MinifluxClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Error body returned by the Miniflux API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_message: String,
}

/// Extract a human-readable message from an error response body
fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error_message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Map a non-success response to a [`ClientError`]
pub(crate) fn error_for_status(status: reqwest::StatusCode, body: &str) -> ClientError {
    let fallback = status.canonical_reason().unwrap_or("unknown status");
    match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        400..=499 => ClientError::BadRequest(error_message(body, fallback)),
        code => ClientError::Server {
            status: code,
            message: error_message(body, fallback),
        },
    }
}

pub(crate) fn transport(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Transport(format!("request timed out: {}", err))
    } else {
        ClientError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_auth_statuses() {
        assert_eq!(
            error_for_status(StatusCode::UNAUTHORIZED, ""),
            ClientError::Unauthorized
        );
        assert_eq!(error_for_status(StatusCode::FORBIDDEN, ""), ClientError::Forbidden);
        assert_eq!(
            error_for_status(StatusCode::NOT_FOUND, r#"{"error_message":"feed not found"}"#),
            ClientError::NotFound
        );
    }

    #[test]
    fn test_bad_request_uses_remote_message() {
        assert_eq!(
            error_for_status(
                StatusCode::BAD_REQUEST,
                r#"{"error_message":"This feed already exists."}"#
            ),
            ClientError::BadRequest("This feed already exists.".to_string())
        );
    }

    #[test]
    fn test_server_error_falls_back_to_body_then_reason() {
        assert_eq!(
            error_for_status(StatusCode::BAD_GATEWAY, "upstream down\n"),
            ClientError::Server {
                status: 502,
                message: "upstream down".to_string()
            }
        );
        assert_eq!(
            error_for_status(StatusCode::INTERNAL_SERVER_ERROR, ""),
            ClientError::Server {
                status: 500,
                message: "Internal Server Error".to_string()
            }
        );
    }
}
