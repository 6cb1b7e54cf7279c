//! Errors raised by property casting and entity access

use thiserror::Error;

/// Errors that can occur while casting or assigning properties
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Invalid property type: {0}")]
    InvalidPropertyType(String),

    #[error("Integer value out of range: {0}")]
    OutOfRange(String),

    #[error("List property items must be of similar types: expected {expected}, found {found}")]
    MixedListType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Lists cannot contain nested collections")]
    NestedListNotAllowed,

    #[error("'{0}' object is not iterable")]
    NotIterable(&'static str),
}

pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GraphError::InvalidPropertyType("bytes".to_string()).to_string(),
            "Invalid property type: bytes"
        );
        assert_eq!(
            GraphError::OutOfRange("9223372036854775808".to_string()).to_string(),
            "Integer value out of range: 9223372036854775808"
        );
        assert_eq!(
            GraphError::MixedListType { expected: "Integer", found: "String" }.to_string(),
            "List property items must be of similar types: expected Integer, found String"
        );
        assert_eq!(
            GraphError::NotIterable("PropertyContainer").to_string(),
            "'PropertyContainer' object is not iterable"
        );
    }
}
