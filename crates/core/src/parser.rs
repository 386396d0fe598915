//! Nested-list parser: turns the lexer's token stream into [`Node`] trees.
//! Only list balance is checked here -- what a list means is the
//! descriptor layer's job.

use crate::ast::Node;
use crate::error::{Error, LexError, ParseError};
use crate::lexer::{self, Spanned, Token};

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

/// Lists still waiting for their `)`: opening line plus children so far.
/// Kept on the heap so nesting depth is limited by memory, not the call stack.
struct Parser<I> {
    tokens: I,
    line: u32,
    open: Vec<(u32, Vec<Node>)>,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Spanned, LexError>>,
{
    fn new(tokens: I) -> Self {
        Parser {
            tokens,
            line: 1,
            open: Vec::new(),
        }
    }

    fn advance(&mut self) -> Result<Option<Token>, Error> {
        match self.tokens.next() {
            None => Ok(None),
            Some(Err(e)) => Err(e.into()),
            Some(Ok(spanned)) => {
                self.line = spanned.line;
                Ok(Some(spanned.token))
            }
        }
    }

    /// Parse the next complete top-level form, or `None` at end of input.
    fn next_form(&mut self) -> Result<Option<Node>, Error> {
        loop {
            let node = match self.advance()? {
                None => {
                    return match self.open.last() {
                        Some((line, _)) => {
                            Err(ParseError::UnexpectedEndOfInput { line: *line }.into())
                        }
                        None => Ok(None),
                    };
                }
                Some(Token::ListOpen) => {
                    self.open.push((self.line, Vec::new()));
                    continue;
                }
                Some(Token::ListClose) => match self.open.pop() {
                    Some((_, children)) => Node::List(children),
                    None => {
                        return Err(ParseError::UnexpectedCloseList { line: self.line }.into())
                    }
                },
                Some(Token::Symbol(s)) => Node::Symbol(s),
                Some(Token::Str(s)) => Node::Str(s),
            };
            match self.open.last_mut() {
                Some((_, children)) => children.push(node),
                None => return Ok(Some(node)),
            }
        }
    }
}

/// Parse every top-level form in the token stream.
pub fn parse<I>(tokens: I) -> Result<Vec<Node>, Error>
where
    I: IntoIterator<Item = Result<Spanned, LexError>>,
{
    let mut parser = Parser::new(tokens.into_iter());
    let mut forms = Vec::new();
    while let Some(form) = parser.next_form()? {
        forms.push(form);
    }
    Ok(forms)
}

/// Parse the first top-level form. Tokens after it are not read.
pub fn parse_one<I>(tokens: I) -> Result<Node, Error>
where
    I: IntoIterator<Item = Result<Spanned, LexError>>,
{
    let mut parser = Parser::new(tokens.into_iter());
    match parser.next_form()? {
        Some(form) => Ok(form),
        None => Err(ParseError::UnexpectedEndOfInput { line: parser.line }.into()),
    }
}

/// Tokenize and parse `src` in one step.
pub fn parse_str(src: &str) -> Result<Vec<Node>, Error> {
    parse(lexer::tokenize(src))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
