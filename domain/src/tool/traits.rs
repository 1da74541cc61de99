//! Tool domain traits
//!
//! Contains the pure validation seam. The async handler plumbing lives in
//! the application layer.

use super::arguments::TypedArguments;
use super::entities::ToolDescriptor;
use super::validation::{ValidationError, validate_arguments};

/// Validator for raw argument bags
///
/// This is a pure domain trait that checks an argument bag against a
/// descriptor without any I/O.
pub trait ToolValidator: Send + Sync {
    /// Validate and coerce `arguments` for the tool described by `descriptor`
    fn validate(
        &self,
        arguments: &serde_json::Value,
        descriptor: &ToolDescriptor,
    ) -> Result<TypedArguments, ValidationError>;
}

/// Default implementation of ToolValidator, driven entirely by the schema
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(
        &self,
        arguments: &serde_json::Value,
        descriptor: &ToolDescriptor,
    ) -> Result<TypedArguments, ValidationError> {
        validate_arguments(&descriptor.schema, arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::schema::ArgumentSpec;

    #[test]
    fn test_validator_missing_required() {
        let validator = DefaultToolValidator;
        let descriptor = ToolDescriptor::new("get_user_by_username", "Get a user")
            .with_argument(ArgumentSpec::string("username", "The username", true));

        let result = validator.validate(&serde_json::json!({}), &descriptor);
        assert_eq!(result.unwrap_err().to_string(), "username is required");
    }

    #[test]
    fn test_validator_valid_call() {
        let validator = DefaultToolValidator;
        let descriptor = ToolDescriptor::new("create_user", "Create a user")
            .with_argument(ArgumentSpec::string("username", "Username", true))
            .with_argument(ArgumentSpec::string("password", "Password", true))
            .with_argument(ArgumentSpec::boolean("is_admin", "Admin", false));

        let typed = validator
            .validate(
                &serde_json::json!({"username": "alice", "password": "secret"}),
                &descriptor,
            )
            .unwrap();

        assert_eq!(typed.get_str("username"), Some("alice"));
        assert_eq!(typed.get_bool("is_admin"), None);
    }
}
