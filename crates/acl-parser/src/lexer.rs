//! Lexical analyzer for ACL source text.
//!
//! The [`Lexer`] produces one [`PositionedToken`] per call to
//! [`Lexer::next_token`], skipping whitespace and comments first. It never
//! fails: characters that start no token become [`Token::Unknown`] and are
//! rejected later by the parser, wherever a construct is required.
//!
//! Positions advance over everything consumed, including newlines inside
//! comments and string or char literals.

use log::trace;
use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, delimited, opt, preceded, repeat, terminated},
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, none_of, one_of, rest, take_until, take_while},
};

use acl_core::Span;

use crate::tokens::{Position, PositionedToken, Token};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Whitespace as understood by C's `isspace`: ASCII whitespace plus vertical tab.
fn whitespace(input: &mut Input<'_>) -> IResult<()> {
    take_while(1.., |c: char| c.is_ascii_whitespace() || c == '\u{0B}')
        .void()
        .parse_next(input)
}

/// `// …` up to, not including, the end of the line.
fn line_comment(input: &mut Input<'_>) -> IResult<()> {
    ("//", take_while(0.., |c: char| c != '\n'))
        .void()
        .parse_next(input)
}

/// `/* … */`, non-nesting. An unterminated comment runs to end of input.
fn block_comment(input: &mut Input<'_>) -> IResult<()> {
    preceded(
        "/*",
        alt((terminated(take_until(0.., "*/"), "*/").void(), rest.void())),
    )
    .parse_next(input)
}

/// Zero or more whitespace runs and comments.
fn trivia(input: &mut Input<'_>) -> IResult<()> {
    repeat(0.., alt((whitespace, line_comment, block_comment))).parse_next(input)
}

/// An escape sequence after a backslash.
///
/// Unknown escapes pass the escaped character through; a backslash at end
/// of input stands for itself.
fn escape(input: &mut Input<'_>) -> IResult<char> {
    preceded('\\', opt(any))
        .map(|escaped: Option<char>| match escaped {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some(other) => other,
            None => '\\',
        })
        .parse_next(input)
}

/// `"…"`. A missing closing quote is tolerated: the literal runs to end of input.
fn string_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let content =
        repeat(0.., alt((escape, none_of(['"', '\\'])))).fold(String::new, |mut acc, ch| {
            acc.push(ch);
            acc
        });

    delimited('"', content, opt('"'))
        .map(Token::StringLiteral)
        .parse_next(input)
}

/// `'c'` or `'\n'`. Exactly one character is consumed; the closing quote is optional.
fn char_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    delimited('\'', opt(alt((escape, any))), opt('\''))
        .map(|ch: Option<char>| Token::CharLiteral(ch.unwrap_or('\0')))
        .parse_next(input)
}

/// Identifiers, type keywords and boolean literals.
fn word<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .map(|word: &'a str| match word {
            "int" => Token::IntType,
            "float" => Token::FloatType,
            "bool" => Token::BoolType,
            "string" => Token::StringType,
            "true" => Token::BoolLiteral(true),
            "false" => Token::BoolLiteral(false),
            name => Token::Identifier(name),
        })
        .parse_next(input)
}

/// `-?[0-9]+`. A `-` not followed by a digit is left for [`any_token`] to reject.
fn int_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (opt('-'), digit1)
        .take()
        .map(Token::IntLiteral)
        .parse_next(input)
}

fn punctuation<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
        '['.value(Token::LeftBracket),
        ']'.value(Token::RightBracket),
        '='.value(Token::Equals),
        ';'.value(Token::Semicolon),
        ','.value(Token::Comma),
        '.'.value(Token::Dot),
        '$'.value(Token::Dollar),
        '^'.value(Token::Caret),
    ))
    .parse_next(input)
}

/// One token. The final alternative turns any remaining character into
/// [`Token::Unknown`], so this only fails on empty input.
fn any_token<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        string_literal,
        char_literal,
        word,
        int_literal,
        punctuation,
        any.map(Token::Unknown),
    ))
    .parse_next(input)
}

/// On-demand tokenizer over a complete source buffer.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    input: Input<'src>,
    position: Position,
}

impl<'src> Lexer<'src> {
    /// Create a lexer at the start of `source`, skipping a leading byte-order mark.
    pub fn new(source: &'src str) -> Self {
        let mut input = LocatingSlice::new(source);
        let mut position = Position::start();
        if source.starts_with(BYTE_ORDER_MARK) {
            input.next_slice(BYTE_ORDER_MARK.len_utf8());
            position.offset = BYTE_ORDER_MARK.len_utf8();
        }

        Self {
            source,
            input,
            position,
        }
    }

    /// The location the next call to [`next_token`](Self::next_token) starts scanning from.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Skip whitespace and comments, then consume and return one token.
    ///
    /// At end of input this returns [`Token::Eof`], on every call.
    pub fn next_token(&mut self) -> PositionedToken<'src> {
        let trivia_start = self.input.current_token_start();
        // Cannot fail: every alternative is optional.
        let _ = trivia.parse_next(&mut self.input);
        self.advance_from(trivia_start);

        let start = self.input.current_token_start();
        let position = self.position;
        let token = if self.input.eof_offset() == 0 {
            Token::Eof
        } else {
            any_token.parse_next(&mut self.input).unwrap_or(Token::Eof)
        };
        self.advance_from(start);

        let span = Span::new(start..self.input.current_token_start());
        trace!(
            kind:? = token.kind(),
            line = position.line,
            column = position.column;
            "Lexed token"
        );
        PositionedToken::new(token, span, position)
    }

    /// Move the line/column tracker over the text consumed since `from`.
    fn advance_from(&mut self, from: usize) {
        let to = self.input.current_token_start();
        for ch in self.source[from..to].chars() {
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        self.position.offset = to;
    }
}

/// Tokenize a whole source text, without the trailing [`Token::Eof`].
pub fn tokenize(source: &str) -> Vec<PositionedToken<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.kind() == crate::tokens::TokenKind::Eof {
            return tokens;
        }
        tokens.push(token);
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Strategy for generating identifier strings that are not keywords.
    fn valid_identifier_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z_][A-Za-z0-9_]{0,20}".prop_filter("avoid keywords", |s| {
            !matches!(
                s.as_str(),
                "int" | "float" | "bool" | "string" | "true" | "false"
            )
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Identifiers lex to a single identifier token with the same text.
    fn check_identifier_roundtrip(id: &str) -> Result<(), TestCaseError> {
        let tokens = tokenize(id);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(&tokens[0].token, &Token::Identifier(id));
        Ok(())
    }

    /// Integer literals keep their digits and parse back to the same value.
    fn check_int_literal_digits(n: i64) -> Result<(), TestCaseError> {
        let source = n.to_string();
        let tokens = tokenize(&source);
        prop_assert_eq!(tokens.len(), 1);
        match &tokens[0].token {
            Token::IntLiteral(digits) => prop_assert_eq!(digits.parse::<i64>().ok(), Some(n)),
            other => prop_assert!(false, "expected int literal, got {other:?}"),
        }
        Ok(())
    }

    /// The lexer terminates on arbitrary input and every span lies inside it.
    fn check_spans_in_bounds(source: &str) -> Result<(), TestCaseError> {
        for token in tokenize(source) {
            prop_assert!(token.span.end() <= source.len());
            prop_assert!(token.span.start() < token.span.end());
            prop_assert!(source.is_char_boundary(token.span.start()));
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn identifiers_roundtrip(id in valid_identifier_strategy()) {
            check_identifier_roundtrip(&id)?;
        }

        #[test]
        fn int_literals_keep_digits(n in any::<i64>()) {
            check_int_literal_digits(n)?;
        }

        #[test]
        fn spans_stay_in_bounds(source in "\\PC{0,64}") {
            check_spans_in_bounds(&source)?;
        }
    }
}
