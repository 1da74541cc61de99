//! Tool domain value objects: invocation outcomes
//!
//! A handler produces either a [`ToolOutput`] or a [`ToolFailure`]; the
//! dispatcher folds both into exactly one [`InvocationResult`], which is the
//! only thing the transport ever sees.

use super::arguments::MissingArgument;
use serde::Serialize;

/// Outcome of one invocation, as returned to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    /// Textual payload for the caller
    Success(String),
    /// Short human-readable sentence describing what went wrong
    Failure(String),
}

impl InvocationResult {
    pub fn success(text: impl Into<String>) -> Self {
        InvocationResult::Success(text.into())
    }

    pub fn failure(message: impl Into<String>) -> Self {
        InvocationResult::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The payload or failure message
    pub fn text(&self) -> &str {
        match self {
            InvocationResult::Success(text) | InvocationResult::Failure(text) => text,
        }
    }
}

/// What a handler returned on success
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Already-textual payload, passed through verbatim
    Text(String),
    /// Structured payload, rendered by the dispatcher as indented JSON
    Structured {
        /// Noun used in marshal failures ("feed", "entries", ...)
        noun: &'static str,
        value: serde_json::Value,
    },
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        ToolOutput::Text(text.into())
    }

    /// Capture a domain object for later rendering.
    ///
    /// Remote payloads arrive as [`Remote`](crate::feed::Remote), which
    /// serializes to the JSON the service sent, so nothing is reordered or
    /// dropped on the way to the caller.
    pub fn structured<T: Serialize>(noun: &'static str, payload: &T) -> Result<Self, ToolFailure> {
        serde_json::to_value(payload)
            .map(|value| ToolOutput::Structured { noun, value })
            .map_err(|e| ToolFailure::marshal(noun, e))
    }

    /// Render to the final textual payload
    pub fn render(self) -> Result<String, ToolFailure> {
        match self {
            ToolOutput::Text(text) => Ok(text),
            ToolOutput::Structured { noun, value } => {
                serde_json::to_string_pretty(&value).map_err(|e| ToolFailure::marshal(noun, e))
            }
        }
    }
}

/// Why a handler could not produce a result
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolFailure {
    /// The remote call failed; `action` names the attempted operation
    #[error("Failed to {action}: {cause}")]
    Remote { action: &'static str, cause: String },

    #[error("Failed to marshal {noun}: {detail}")]
    Marshal { noun: &'static str, detail: String },

    /// A health or export check of the remote service reported a problem
    #[error("{subject} failed: {cause}")]
    Check { subject: &'static str, cause: String },

    /// A handler could not interpret an argument the schema let through
    #[error("{0}")]
    Argument(String),
}

impl From<MissingArgument> for ToolFailure {
    fn from(err: MissingArgument) -> Self {
        ToolFailure::Argument(err.to_string())
    }
}

impl ToolFailure {
    pub fn remote(action: &'static str, cause: impl std::fmt::Display) -> Self {
        ToolFailure::Remote {
            action,
            cause: cause.to_string(),
        }
    }

    pub fn check(subject: &'static str, cause: impl std::fmt::Display) -> Self {
        ToolFailure::Check {
            subject,
            cause: cause.to_string(),
        }
    }

    pub fn marshal(noun: &'static str, detail: impl std::fmt::Display) -> Self {
        ToolFailure::Marshal {
            noun,
            detail: detail.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    #[derive(Serialize)]
    struct Sample {
        zeta: i64,
        alpha: &'static str,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot encode"))
        }
    }

    #[test]
    fn test_invocation_result() {
        let ok = InvocationResult::success("payload");
        let err = InvocationResult::failure("feed_id is required");

        assert!(ok.is_success());
        assert!(err.is_failure());
        assert_eq!(ok.text(), "payload");
        assert_eq!(err.text(), "feed_id is required");
    }

    #[test]
    fn test_text_output_passes_through() {
        let raw = "<opml version=\"2.0\">\n  <body/>\n</opml>";
        assert_eq!(ToolOutput::text(raw).render().unwrap(), raw);
    }

    #[test]
    fn test_structured_output_keeps_field_order_and_indents() {
        let rendered = ToolOutput::structured("sample", &Sample { zeta: 1, alpha: "a" })
            .unwrap()
            .render()
            .unwrap();

        assert_eq!(rendered, "{\n  \"zeta\": 1,\n  \"alpha\": \"a\"\n}");
    }

    #[test]
    fn test_remote_feed_renders_unmodelled_fields_in_place() {
        let feed: crate::feed::Remote<crate::feed::Feed> = serde_json::from_str(
            r#"{"id":3,"title":"Example","description":"d","checked_at":"c","next_check_at":"n"}"#,
        )
        .unwrap();

        let rendered = ToolOutput::structured("feed", &feed).unwrap().render().unwrap();

        assert_eq!(
            rendered,
            "{\n  \"id\": 3,\n  \"title\": \"Example\",\n  \"description\": \"d\",\n  \"checked_at\": \"c\",\n  \"next_check_at\": \"n\"\n}"
        );
    }

    #[test]
    fn test_structured_failure_is_marshal_error() {
        let err = ToolOutput::structured("feed", &Unserializable).unwrap_err();
        assert_eq!(err.to_string(), "Failed to marshal feed: cannot encode");
    }

    #[test]
    fn test_remote_failure_message() {
        let err = ToolFailure::remote("fetch feed", "resource not found");
        assert_eq!(err.to_string(), "Failed to fetch feed: resource not found");
    }

    #[test]
    fn test_check_failure_message() {
        let err = ToolFailure::check("Healthcheck", "server error (503): maintenance");
        assert_eq!(err.to_string(), "Healthcheck failed: server error (503): maintenance");
    }
}
