//! Grammar text recursive descent parser.
//!
//! # Grammar
//!
//! ```ebnf
//!     grammar ::= NEWLINE* (rule (NEWLINE+ rule)*)? NEWLINE*;
//!     rule ::= NONTERMINAL ARROW alternatives;
//!     alternatives ::= body (VERTICAL body)*;
//!     body ::= (NONTERMINAL | TERMINAL)*;
//! ```

use std::iter::Peekable;

use super::{
    tokenizer::{Token, TokenKind, Tokenizer},
    SyntaxError, SyntaxErrorKind, SyntaxResult,
};
use crate::{Body, GrammarBuilder, Symbol, TextGrammar};

/// Recursive descent grammar text parser.
pub(super) struct Parser<'a> {
    /// Stream of tokens being parsed.
    tokens: Peekable<Tokenizer<'a>>,
    /// Position one beyond the last token handed out, used for errors at the
    /// end of the input.
    end: usize,
    builder: GrammarBuilder<String, char>,
}

impl<'a> Parser<'a> {
    /// Creates a new grammar parser from the `input`.
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(input).peekable(),
            end: 0,
            builder: TextGrammar::builder(),
        }
    }

    /// Parses the `input` into a [`TextGrammar`].
    ///
    /// Rule: `grammar ::= NEWLINE* (rule (NEWLINE+ rule)*)? NEWLINE*`
    pub(super) fn parse(mut self) -> SyntaxResult<TextGrammar> {
        self.skip_newlines();

        while self.tokens.peek().is_some() {
            self.rule()?;
            // a rule always ends at a NEWLINE or at the end of the input
            self.skip_newlines();
        }

        Ok(self.builder.build())
    }

    /// Rule: `rule ::= NONTERMINAL ARROW alternatives`
    fn rule(&mut self) -> SyntaxResult<()> {
        // NONTERMINAL
        let head = match self.next_token() {
            Some(Token {
                kind: TokenKind::Nonterminal(name),
                ..
            }) => name,
            Some(Token { pos, .. }) => {
                return Err(SyntaxError::new(SyntaxErrorKind::Nonterminal, pos));
            }
            None => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::Nonterminal,
                    (self.end, self.end),
                ));
            }
        };

        // ARROW
        match self.next_token() {
            Some(Token {
                kind: TokenKind::Arrow,
                ..
            }) => {}
            Some(Token { pos, .. }) => {
                return Err(SyntaxError::new(SyntaxErrorKind::Arrow, pos));
            }
            None => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::Arrow,
                    (self.end, self.end),
                ));
            }
        }

        // alternatives
        for body in self.alternatives()? {
            self.builder.add_rule(head.clone(), body);
        }

        Ok(())
    }

    /// Rule: `alternatives ::= body (VERTICAL body)*`
    fn alternatives(&mut self) -> SyntaxResult<Vec<Body<String, char>>> {
        let mut bodies = Vec::from([self.body()?]);

        while matches!(
            self.tokens.peek(),
            Some(Token {
                kind: TokenKind::Vertical,
                ..
            })
        ) {
            self.next_token();
            bodies.push(self.body()?);
        }

        Ok(bodies)
    }

    /// Rule: `body ::= (NONTERMINAL | TERMINAL)*`
    fn body(&mut self) -> SyntaxResult<Body<String, char>> {
        let mut body = Body::new();

        loop {
            let symbol = match self.tokens.peek() {
                Some(Token {
                    kind: TokenKind::Nonterminal(name),
                    ..
                }) => Symbol::Nonterminal(name.clone()),
                Some(Token {
                    kind: TokenKind::Terminal(t),
                    ..
                }) => Symbol::Terminal(*t),
                Some(Token {
                    kind: TokenKind::Arrow,
                    pos,
                }) => return Err(SyntaxError::new(SyntaxErrorKind::Symbol, *pos)),
                Some(Token {
                    kind: TokenKind::Invalid,
                    pos,
                }) => return Err(SyntaxError::new(SyntaxErrorKind::Invalid, *pos)),
                Some(Token {
                    kind: TokenKind::Vertical | TokenKind::Newline,
                    ..
                })
                | None => return Ok(body),
            };

            self.next_token();
            body.push(symbol);
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(
            self.tokens.peek(),
            Some(Token {
                kind: TokenKind::Newline,
                ..
            })
        ) {
            self.next_token();
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.next()?;
        self.end = token.pos.1;
        Some(token)
    }
}
