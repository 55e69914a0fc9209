use std::{
    iter::{Enumerate, Peekable},
    str::Chars,
};

/// Grammar text tokenizer.
pub(super) struct Tokenizer<'a> {
    /// Iterator over the characters in the input (as defined in the rust `char`
    /// type), along with their position in the input.
    iter: Peekable<Enumerate<Chars<'a>>>,
    /// Amount of characters in the input.
    len: usize,
}

/// Grammar text token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    /// Start and end position of the token in the input text. The end position
    /// is one further than the end of the current token.
    pub(super) pos: (usize, usize),
}

impl Token {
    /// Creates a new [`Token`].
    pub(super) fn new(kind: TokenKind, pos: (usize, usize)) -> Self {
        Self { kind, pos }
    }
}

/// Grammar text token kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TokenKind {
    /// An uppercase ASCII letter, or a name between angle brackets
    /// (e.g., `<expr>`).
    Nonterminal(String),
    /// Any other character. A backslash makes the next character a terminal.
    Terminal(char),
    /// `->`
    Arrow,
    /// `|`
    Vertical,
    /// End of a line. Consecutive line ends are folded.
    Newline,
    Invalid,
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_blanks();

        let (start, ch) = self.iter.next()?;
        let kind = match ch {
            '\n' => {
                while matches!(self.iter.peek(), Some((_, c)) if c.is_whitespace()) {
                    self.iter.next();
                }
                TokenKind::Newline
            }
            '-' if matches!(self.iter.peek(), Some((_, '>'))) => {
                self.iter.next();
                TokenKind::Arrow
            }
            '|' => TokenKind::Vertical,
            '<' => self.handle_bracketed_name(),
            '\\' => self.handle_escape(),
            'A'..='Z' => TokenKind::Nonterminal(ch.to_string()),

            a => TokenKind::Terminal(a),
        };

        Some(Token::new(kind, (start, self.get_token_end_cursor_pos())))
    }
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer.
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            iter: input.chars().enumerate().peekable(),
            len: input.chars().count(),
        }
    }

    /// Skips whitespace other than line ends, and `#` comments up to the end
    /// of the line.
    fn skip_blanks(&mut self) {
        while let Some(&(_, ch)) = self.iter.peek() {
            match ch {
                '\n' => return,
                '#' => {
                    while matches!(self.iter.peek(), Some((_, c)) if *c != '\n') {
                        self.iter.next();
                    }
                }
                c if c.is_whitespace() => {
                    self.iter.next();
                }
                _ => return,
            }
        }
    }

    fn handle_bracketed_name(&mut self) -> TokenKind {
        let mut name = String::new();

        for (_, ch) in self.iter.by_ref() {
            match ch {
                '>' if !name.is_empty() => return TokenKind::Nonterminal(name),
                '>' | '<' | '\n' => return TokenKind::Invalid,
                c => name.push(c),
            }
        }

        // the input ended inside the brackets
        TokenKind::Invalid
    }

    fn handle_escape(&mut self) -> TokenKind {
        match self.iter.next() {
            Some((_, 'n')) => TokenKind::Terminal('\n'),
            Some((_, 't')) => TokenKind::Terminal('\t'),
            Some((_, 's')) => TokenKind::Terminal(' '),
            Some((_, ch)) if ch != '\n' => TokenKind::Terminal(ch),
            // The last character of the input (or line) was a '\'.
            _ => TokenKind::Invalid,
        }
    }

    /// Returns the end position of the current token.
    ///
    /// Note: The end position points one beyond the last character of the
    /// token.
    fn get_token_end_cursor_pos(&mut self) -> usize {
        match self.iter.peek() {
            Some((cursor_pos, _)) => *cursor_pos,
            None => self.len,
        }
    }
}
