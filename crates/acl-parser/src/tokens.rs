//! Token types produced by the lexer.

use std::fmt;

use acl_core::{Span, TypeTag};

/// A source location: byte offset plus 1-based line and column.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The location of the first character of a source text.
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Token types for the ACL language
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    /// End of input. Returned again on every request once reached.
    Eof,

    // Names and literals
    Identifier(&'src str),
    /// Decimal digits with an optional leading `-`; range-checked by the parser.
    IntLiteral(&'src str),
    BoolLiteral(bool),
    /// String contents with escapes already decoded.
    StringLiteral(String),
    CharLiteral(char),

    // Type keywords
    IntType,
    FloatType,
    BoolType,
    StringType,

    // Punctuation
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Equals,       // =
    Semicolon,    // ;
    Comma,        // ,
    Dot,          // .
    Dollar,       // $
    Caret,        // ^

    /// Any character that starts no valid token.
    Unknown(char),
}

/// Payload-free token classification, used for lookahead decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Identifier,
    IntLiteral,
    BoolLiteral,
    StringLiteral,
    CharLiteral,
    IntType,
    FloatType,
    BoolType,
    StringType,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Equals,
    Semicolon,
    Comma,
    Dot,
    Dollar,
    Caret,
    Unknown,
}

impl Token<'_> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Eof => TokenKind::Eof,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::IntLiteral(_) => TokenKind::IntLiteral,
            Token::BoolLiteral(_) => TokenKind::BoolLiteral,
            Token::StringLiteral(_) => TokenKind::StringLiteral,
            Token::CharLiteral(_) => TokenKind::CharLiteral,
            Token::IntType => TokenKind::IntType,
            Token::FloatType => TokenKind::FloatType,
            Token::BoolType => TokenKind::BoolType,
            Token::StringType => TokenKind::StringType,
            Token::LeftBrace => TokenKind::LeftBrace,
            Token::RightBrace => TokenKind::RightBrace,
            Token::LeftBracket => TokenKind::LeftBracket,
            Token::RightBracket => TokenKind::RightBracket,
            Token::Equals => TokenKind::Equals,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Comma => TokenKind::Comma,
            Token::Dot => TokenKind::Dot,
            Token::Dollar => TokenKind::Dollar,
            Token::Caret => TokenKind::Caret,
            Token::Unknown(_) => TokenKind::Unknown,
        }
    }

    /// The declared type a type keyword stands for.
    pub fn type_tag(&self) -> Option<TypeTag> {
        match self {
            Token::IntType => Some(TypeTag::Int),
            Token::FloatType => Some(TypeTag::Float),
            Token::BoolType => Some(TypeTag::Bool),
            Token::StringType => Some(TypeTag::String),
            _ => None,
        }
    }
}

impl TokenKind {
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::IntType | TokenKind::FloatType | TokenKind::BoolType | TokenKind::StringType
        )
    }
}

/// A token with its span and start position
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
    pub position: Position,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span, position: Position) -> Self {
        Self {
            token,
            span,
            position,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl fmt::Display for PositionedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

/// Renders the token the way diagnostics quote it.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),

            Token::Identifier(name) => write!(f, "`{name}`"),
            Token::IntLiteral(digits) => write!(f, "`{digits}`"),
            Token::BoolLiteral(b) => write!(f, "`{b}`"),
            Token::StringLiteral(s) => write!(f, "`\"{}\"`", s.escape_debug()),
            Token::CharLiteral(c) => write!(f, "`'{}'`", c.escape_debug()),

            Token::IntType => write!(f, "`int`"),
            Token::FloatType => write!(f, "`float`"),
            Token::BoolType => write!(f, "`bool`"),
            Token::StringType => write!(f, "`string`"),

            Token::LeftBrace => write!(f, "`{{`"),
            Token::RightBrace => write!(f, "`}}`"),
            Token::LeftBracket => write!(f, "`[`"),
            Token::RightBracket => write!(f, "`]`"),
            Token::Equals => write!(f, "`=`"),
            Token::Semicolon => write!(f, "`;`"),
            Token::Comma => write!(f, "`,`"),
            Token::Dot => write!(f, "`.`"),
            Token::Dollar => write!(f, "`$`"),
            Token::Caret => write!(f, "`^`"),

            Token::Unknown(c) => write!(f, "unexpected character `{}`", c.escape_debug()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_type_tag() {
        assert_eq!(Token::Identifier("x").kind(), TokenKind::Identifier);
        assert_eq!(Token::FloatType.type_tag(), Some(TypeTag::Float));
        assert_eq!(Token::Identifier("float").type_tag(), None);
        assert!(TokenKind::StringType.is_type_keyword());
        assert!(!TokenKind::StringLiteral.is_type_keyword());
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::Eof.to_string(), "end of input");
        assert_eq!(Token::Identifier("eth0").to_string(), "`eth0`");
        assert_eq!(Token::RightBrace.to_string(), "`}`");
        assert_eq!(
            Token::StringLiteral("a\"b".to_string()).to_string(),
            "`\"a\\\"b\"`"
        );
        assert_eq!(Token::Unknown('@').to_string(), "unexpected character `@`");
    }

    #[test]
    fn test_position_display() {
        let position = Position {
            offset: 10,
            line: 3,
            column: 7,
        };
        assert_eq!(position.to_string(), "line 3, column 7");
        assert_eq!(Position::default(), Position::start());
    }
}
