//! Parsing of reference values.
//!
//! ```text
//! Reference := '$' '.' Ident Tail
//!            | '$' Ident Segment*
//!            | '^'+ Ident Tail
//! Tail      := ('[' String ']')? Segment*
//! Segment   := '.' Ident ('[' String ']')? | '[' String ']'
//! ```
//!
//! A name directly followed by an index becomes one [`Segment::Labeled`].

use std::num::NonZeroUsize;

use acl_core::{Id, Reference, Scope, Segment, Span};

use crate::{
    cursor::TokenCursor,
    error::{Diagnostic, ErrorCode, Result},
    parser::syntax_error,
    tokens::{PositionedToken, Token, TokenKind},
};

/// Like [`syntax_error`], but malformed paths are E103 unless the input ended.
fn reference_error(token: &PositionedToken<'_>, expected: &str) -> Diagnostic {
    let diag = syntax_error(token, expected);
    if token.kind() == TokenKind::Eof {
        diag
    } else {
        diag.with_code(ErrorCode::E103)
    }
}

/// Parse a reference starting at the `$` or `^` under the cursor.
pub(crate) fn parse_reference(cursor: &mut TokenCursor<'_>) -> Result<Reference> {
    let sigil = cursor.take();
    let mut span = sigil.span;
    let mut segments = Vec::new();

    let scope = match sigil.kind() {
        TokenKind::Dollar => match cursor.kind() {
            TokenKind::Dot => Scope::Local,
            TokenKind::Identifier => Scope::Global(identifier(cursor, &mut span, "a block name")?),
            _ => {
                let diag = reference_error(cursor.current(), "`.` or a block name after `$`");
                return Err(diag.with_help("write `$.field` for the current block or `$Block.field`"));
            }
        },
        TokenKind::Caret => {
            let mut levels = NonZeroUsize::MIN;
            while cursor.kind() == TokenKind::Caret {
                span = span.union(cursor.take().span);
                levels = levels.saturating_add(1);
            }
            segments.push(name_segment(cursor, &mut span)?);
            Scope::Parent(levels)
        }
        _ => return Err(syntax_error(&sigil, "`$` or `^`")),
    };

    loop {
        match cursor.kind() {
            TokenKind::Dot => {
                span = span.union(cursor.take().span);
                segments.push(name_segment(cursor, &mut span)?);
            }
            TokenKind::LeftBracket => segments.push(Segment::Index(index(cursor, &mut span)?)),
            _ => break,
        }
    }

    Ok(Reference::new(scope, segments, span))
}

fn identifier(cursor: &mut TokenCursor<'_>, span: &mut Span, expected: &str) -> Result<Id> {
    let token = cursor.take();
    match token.token {
        Token::Identifier(name) => {
            *span = span.union(token.span);
            Ok(Id::new(name))
        }
        _ => Err(reference_error(&token, expected)),
    }
}

/// `Ident`, or `Ident '[' String ']'` as a single labeled segment.
fn name_segment(cursor: &mut TokenCursor<'_>, span: &mut Span) -> Result<Segment> {
    let name = identifier(cursor, span, "a field or block name")?;
    if cursor.kind() == TokenKind::LeftBracket {
        let label = index(cursor, span)?;
        Ok(Segment::Labeled { name, label })
    } else {
        Ok(Segment::Name(name))
    }
}

/// `'[' String ']'`, returning the label.
fn index(cursor: &mut TokenCursor<'_>, span: &mut Span) -> Result<String> {
    cursor.consume();

    let token = cursor.take();
    let label = match token.token {
        Token::StringLiteral(label) => label,
        ref other => {
            let diag = reference_error(&token, "a quoted label inside `[ ]`");
            let help = match other {
                Token::Identifier(name) => format!("write the label in quotes: `[\"{name}\"]`"),
                _ => "labels are string literals, e.g. `[\"eth0\"]`".to_string(),
            };
            return Err(diag.with_help(help));
        }
    };

    let close = cursor.take();
    if close.kind() != TokenKind::RightBracket {
        return Err(syntax_error(&close, "`]`").with_help("close the label index with `]`"));
    }
    *span = span.union(close.span);
    Ok(label)
}
