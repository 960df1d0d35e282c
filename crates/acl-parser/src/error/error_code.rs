//! Error codes for the ACL diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexical errors
//! - `E1xx` - Syntax errors
//! - `E2xx` - Resolution errors (strict mode)

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexical Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A character that starts no token was found where a construct is required.
    E002,

    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// The parser encountered a token it did not expect at this position.
    E100,

    /// Unexpected end of input.
    ///
    /// The input ended before a complete construct was parsed.
    E101,

    /// Integer out of range.
    ///
    /// An integer literal does not fit in a signed 64-bit integer.
    E102,

    /// Invalid reference.
    ///
    /// A reference path is malformed, e.g. `[eth0]` instead of `["eth0"]`.
    E103,

    /// Nesting too deep.
    ///
    /// Blocks or arrays are nested beyond the parser's depth limit.
    E104,

    // =========================================================================
    // Resolution Errors (E2xx)
    // =========================================================================
    /// Unresolved reference.
    ///
    /// A reference path does not lead to a field.
    E200,

    /// Unresolved reference chain.
    ///
    /// A reference points at a field whose value never became resolvable,
    /// either through a cycle or a chain ending in an unresolved reference.
    E201,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "unexpected end of input",
            ErrorCode::E102 => "integer out of range",
            ErrorCode::E103 => "invalid reference",
            ErrorCode::E104 => "nesting too deep",
            ErrorCode::E200 => "unresolved reference",
            ErrorCode::E201 => "unresolved reference chain",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E002.to_string(), "E002");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E101.description(), "unexpected end of input");
        assert_eq!(ErrorCode::E103.description(), "invalid reference");
        assert_eq!(ErrorCode::E201.description(), "unresolved reference chain");
    }
}
