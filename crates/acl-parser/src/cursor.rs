//! Token cursor with bounded lookahead over an on-demand [`Lexer`].

use std::collections::VecDeque;

use crate::{
    lexer::Lexer,
    tokens::{PositionedToken, TokenKind},
};

/// A forward-only view of the token stream.
///
/// Tokens are pulled from the lexer only when first needed and kept in a
/// small buffer until consumed. Looking ahead never changes what later
/// calls return.
#[derive(Debug)]
pub struct TokenCursor<'src> {
    lexer: Lexer<'src>,
    buffer: VecDeque<PositionedToken<'src>>,
}

impl<'src> TokenCursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::from_lexer(Lexer::new(source))
    }

    pub fn from_lexer(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            buffer: VecDeque::with_capacity(3),
        }
    }

    /// Ensure at least `count` tokens are buffered.
    ///
    /// The lexer keeps returning end-of-input once exhausted, so this always
    /// succeeds.
    fn fill(&mut self, count: usize) {
        while self.buffer.len() < count {
            let token = self.lexer.next_token();
            self.buffer.push_back(token);
        }
    }

    /// The token at the cursor.
    pub fn current(&mut self) -> &PositionedToken<'src> {
        self.peek(0)
    }

    /// The token `n` places after the current one; `peek(0)` is the current token.
    pub fn peek(&mut self, n: usize) -> &PositionedToken<'src> {
        self.fill(n + 1);
        &self.buffer[n]
    }

    /// Kind of the token `n` places after the current one.
    pub fn peek_kind(&mut self, n: usize) -> TokenKind {
        self.peek(n).kind()
    }

    /// Kind of the current token.
    pub fn kind(&mut self) -> TokenKind {
        self.peek_kind(0)
    }

    /// Drop the current token.
    pub fn consume(&mut self) {
        self.fill(1);
        self.buffer.pop_front();
    }

    /// Remove and return the current token.
    pub fn take(&mut self) -> PositionedToken<'src> {
        match self.buffer.pop_front() {
            Some(token) => token,
            None => self.lexer.next_token(),
        }
    }
}
