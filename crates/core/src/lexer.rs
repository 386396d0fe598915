use std::iter::{FusedIterator, Peekable};
use std::str::Chars;

use crate::error::LexError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    ListOpen,
    ListClose,
    /// Bare word: property names, ids, `-*-` placeholders, `:symlink` tags
    Symbol(String),
    /// Quoted string literal (content without quotes)
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
}

/// Single forward pass over descriptor text, yielding one token per call.
///
/// After the first error the iterator is exhausted.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: u32,
    failed: bool,
}

pub fn tokenize(src: &str) -> Lexer<'_> {
    Lexer {
        chars: src.chars().peekable(),
        line: 1,
        failed: false,
    }
}

impl<'a> Lexer<'a> {
    /// Line the lexer is currently positioned on (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == ';' {
                // Line comment
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn string(&mut self, start_line: u32) -> Result<String, LexError> {
        let mut s = String::new();
        loop {
            match self.bump() {
                None => return Err(LexError::new(start_line, "unterminated string literal")),
                Some('"') => return Ok(s),
                Some('\\') => match self.bump() {
                    Some(c @ ('"' | '\\')) => s.push(c),
                    Some(other) => {
                        s.push('\\');
                        s.push(other);
                    }
                    None => {
                        return Err(LexError::new(start_line, "unterminated string literal"))
                    }
                },
                Some(c) => s.push(c),
            }
        }
    }

    fn symbol(&mut self) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '(' | ')' | '"') {
                break;
            }
            s.push(c);
            self.bump();
        }
        s
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Spanned, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_trivia();
        let line = self.line;
        let token = match *self.chars.peek()? {
            '(' => {
                self.bump();
                Token::ListOpen
            }
            ')' => {
                self.bump();
                Token::ListClose
            }
            '"' => {
                self.bump();
                match self.string(line) {
                    Ok(s) => Token::Str(s),
                    Err(e) => {
                        self.failed = true;
                        return Some(Err(e));
                    }
                }
            }
            _ => Token::Symbol(self.symbol()),
        };
        Some(Ok(Spanned { token, line }))
    }
}

impl FusedIterator for Lexer<'_> {}
