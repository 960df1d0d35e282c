//! Recursive-descent parser for ACL documents.
//!
//! This module turns the token stream of a [`TokenCursor`] into an
//! [`acl_core::Document`]. Parsing stops at the first unexpected token: the
//! returned [`Diagnostic`] names what was expected and what was found, and
//! no partial tree is produced.

use acl_core::{BlockId, Document, Field, Id, Span, TypeTag, Value};

use crate::{
    cursor::TokenCursor,
    error::{Diagnostic, ErrorCode, Result},
    reference,
    tokens::{PositionedToken, Token, TokenKind},
};

/// Builds the diagnostic for a token that does not fit the grammar.
///
/// End of input maps to E101 and an unknown character to E002; any other
/// token is E100.
pub(crate) fn syntax_error(token: &PositionedToken<'_>, expected: &str) -> Diagnostic {
    let (code, label) = match token.kind() {
        TokenKind::Eof => (ErrorCode::E101, "input ends here"),
        TokenKind::Unknown => (ErrorCode::E002, "unexpected character"),
        _ => (ErrorCode::E100, "unexpected token"),
    };

    let diag = Diagnostic::error(format!("expected {expected}, found {}", token.token))
        .with_code(code)
        .with_label(token.span, label)
        .with_position(token.position);

    match code {
        ErrorCode::E101 => diag.with_help("the input ended before this construct was complete"),
        ErrorCode::E002 => diag.with_help("remove this character"),
        _ => diag,
    }
}

/// Deepest nesting of blocks and arrays, counted together.
pub(crate) const MAX_NESTING_DEPTH: usize = 256;

/// Help text for a missing punctuation token.
fn expect_help(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Semicolon => Some("every field ends with `;`"),
        TokenKind::RightBrace => Some("close the block with `}`"),
        TokenKind::LeftBrace => Some("a block body starts with `{`"),
        TokenKind::Equals => Some("fields are written `name = value;`"),
        TokenKind::RightBracket => Some("close the label index with `]`"),
        _ => None,
    }
}

/// Parser state: the token cursor and the document under construction.
pub struct Parser<'src> {
    cursor: TokenCursor<'src>,
    document: Document,
    depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: TokenCursor::new(source),
            document: Document::new(),
            depth: 0,
        }
    }

    /// `Document := Block*`
    pub fn parse_document(mut self) -> Result<Document> {
        while self.cursor.kind() != TokenKind::Eof {
            if self.cursor.kind() != TokenKind::Identifier {
                return Err(syntax_error(self.cursor.current(), "a block name"));
            }
            self.block(None)?;
        }
        Ok(self.document)
    }

    /// `Block := Ident StringLiteral? '{' (TypedField | Field | Block)* '}'`
    fn block(&mut self, parent: Option<BlockId>) -> Result<BlockId> {
        let (name, name_span) = self.expect_identifier("a block name")?;

        let label = if self.cursor.kind() == TokenKind::StringLiteral {
            match self.cursor.take().token {
                Token::StringLiteral(label) => Some(label),
                _ => None,
            }
        } else {
            None
        };

        self.enter()?;
        self.expect(TokenKind::LeftBrace, "`{`")?;
        let id = self.document.add_block(name, label, parent, name_span);

        loop {
            match self.cursor.kind() {
                TokenKind::RightBrace => break,
                kind if kind.is_type_keyword() => self.typed_field(id)?,
                TokenKind::Identifier => self.member(id)?,
                _ => {
                    return Err(syntax_error(
                        self.cursor.current(),
                        "a field, a nested block or `}`",
                    ));
                }
            }
        }

        let close = self.expect(TokenKind::RightBrace, "`}`")?;
        self.depth -= 1;
        self.document.set_block_span(id, name_span.union(close));
        Ok(id)
    }

    /// An identifier inside a block body: a field or a child block.
    fn member(&mut self, block: BlockId) -> Result<()> {
        match self.cursor.peek_kind(1) {
            TokenKind::Equals => self.field(block, None, None),
            TokenKind::LeftBrace => self.block(Some(block)).map(|_| ()),
            TokenKind::StringLiteral => {
                if self.cursor.peek_kind(2) == TokenKind::LeftBrace {
                    self.block(Some(block)).map(|_| ())
                } else {
                    let diag = syntax_error(self.cursor.peek(2), "`{` after the block label");
                    Err(diag.with_help("a labeled block is written `name \"label\" { … }`"))
                }
            }
            _ => Err(syntax_error(
                self.cursor.peek(1),
                "`=` for a field or `{` for a block",
            )),
        }
    }

    /// `TypedField := TypeKeyword Ident '=' Literal ';'`
    fn typed_field(&mut self, block: BlockId) -> Result<()> {
        let keyword = self.cursor.take();
        self.field(block, keyword.type_tag(), Some(keyword.span))
    }

    /// `Ident '=' Literal ';'`, after an optional type keyword spanning `start`.
    fn field(&mut self, block: BlockId, ty: Option<TypeTag>, start: Option<Span>) -> Result<()> {
        let (name, name_span) = self.expect_identifier("a field name")?;
        self.expect(TokenKind::Equals, "`=`")?;
        let value = self.literal()?;
        let end = self.expect(TokenKind::Semicolon, "`;`")?;

        let span = start.unwrap_or(name_span).union(end);
        self.document.push_field(block, Field::new(ty, name, value, span));
        Ok(())
    }

    /// `Literal := Int | Bool | String | Char | Array | Reference`
    fn literal(&mut self) -> Result<Value> {
        match self.cursor.kind() {
            TokenKind::LeftBrace => return self.array(),
            TokenKind::Dollar | TokenKind::Caret => {
                return reference::parse_reference(&mut self.cursor).map(Value::Reference);
            }
            _ => {}
        }

        let token = self.cursor.take();
        match &token.token {
            Token::IntLiteral(digits) => parse_int(digits, &token),
            Token::BoolLiteral(b) => Ok(Value::Bool(*b)),
            Token::StringLiteral(s) => Ok(Value::String(s.clone())),
            Token::CharLiteral(c) => Ok(Value::Char(*c)),
            _ => Err(syntax_error(&token, "a value")),
        }
    }

    /// `Array := '{' (Literal (',' Literal)*)? '}'`
    fn array(&mut self) -> Result<Value> {
        self.enter()?;
        self.cursor.consume();
        let mut elements = Vec::new();

        if self.cursor.kind() == TokenKind::RightBrace {
            self.cursor.consume();
            self.depth -= 1;
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.literal()?);
            match self.cursor.kind() {
                TokenKind::Comma => self.cursor.consume(),
                TokenKind::RightBrace => {
                    self.cursor.consume();
                    self.depth -= 1;
                    return Ok(Value::Array(elements));
                }
                _ => {
                    return Err(syntax_error(
                        self.cursor.current(),
                        "`,` or `}` in array",
                    ));
                }
            }
        }
    }

    /// Open one nesting level at the current `{`.
    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            let token = self.cursor.current();
            return Err(Diagnostic::error(format!(
                "nesting exceeds {MAX_NESTING_DEPTH} levels"
            ))
            .with_code(ErrorCode::E104)
            .with_label(token.span, "too deeply nested")
            .with_position(token.position)
            .with_help("flatten the nested blocks or arrays"));
        }
        self.depth += 1;
        Ok(())
    }

    /// Consume a token of `kind`, returning its span.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Span> {
        let token = self.cursor.take();
        if token.kind() == kind {
            return Ok(token.span);
        }

        let diag = syntax_error(&token, expected);
        Err(match expect_help(kind) {
            Some(help) if token.kind() != TokenKind::Unknown => diag.with_help(help),
            _ => diag,
        })
    }

    fn expect_identifier(&mut self, expected: &str) -> Result<(Id, Span)> {
        let token = self.cursor.take();
        match token.token {
            Token::Identifier(name) => Ok((Id::new(name), token.span)),
            _ => Err(syntax_error(&token, expected)),
        }
    }
}

fn parse_int(digits: &str, token: &PositionedToken<'_>) -> Result<Value> {
    digits.parse::<i64>().map(Value::Int).map_err(|_| {
        Diagnostic::error(format!("integer literal `{digits}` is out of range"))
            .with_code(ErrorCode::E102)
            .with_label(token.span, "does not fit in a 64-bit signed integer")
            .with_position(token.position)
            .with_help(format!(
                "integers must lie between {} and {}",
                i64::MIN,
                i64::MAX
            ))
    })
}
