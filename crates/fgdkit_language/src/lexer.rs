//! Lexer for FGD source.
//!
//! The lexer converts source text into a stream of tokens. Whitespace other
//! than line breaks and `//` comments are skipped.

use fgdkit_foundation::{Error, ErrorContext, Result};

use crate::span::Span;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Lexer for FGD source text.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Name reported in errors.
    source_name: Option<String>,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
    /// Span of the most recently returned token.
    last: Span,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            source_name: None,
            position: 0,
            line: 1,
            column: 1,
            last: Span::at_start(),
        }
    }

    /// Sets the file name reported in errors.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Tokenizes all source, ending with the `Eof` token.
    ///
    /// # Errors
    ///
    /// Returns the first tokenization error.
    pub fn tokenize_all(source: &str) -> Result<Vec<Token>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn scan(&mut self) -> Result<Token> {
        self.skip_trivia();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;
        self.last = Span::new(start, start, start_line, start_column);

        let Some(c) = self.peek_char() else {
            return Ok(Token::new(TokenKind::Eof, "", self.last));
        };

        let (kind, text) = match c {
            '\n' => (TokenKind::Newline, self.single()),
            ':' => (TokenKind::Colon, self.single()),
            '+' => (TokenKind::Plus, self.single()),
            '=' => (TokenKind::Equals, self.single()),
            '[' => (TokenKind::BracketOpen, self.single()),
            ']' => (TokenKind::BracketClose, self.single()),
            '(' => (TokenKind::ParenArgs, self.scan_paren_args()?),
            '"' => (TokenKind::String, self.scan_string()?),
            ')' | '{' | '}' => {
                return Err(self.error_here(format!("unexpected character '{c}'")));
            }
            _ => (TokenKind::String, self.scan_bare()),
        };

        self.last = Span::new(start, self.position, start_line, start_column);
        Ok(Token::new(kind, text, self.last))
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Advances past the next character.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        let len = c.len_utf8();
        self.rest = &self.rest[len..];
        self.position += len;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn single(&mut self) -> String {
        self.advance().map(String::from).unwrap_or_default()
    }

    /// Skips blanks and `//` comments, stopping at line breaks.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c != '\n' && c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.rest.starts_with("//") => {
                    while self.peek_char().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Scans `(...)`, returning the raw inner text.
    fn scan_paren_args(&mut self) -> Result<String> {
        self.advance(); // consume '('
        let start = self.position;
        loop {
            match self.peek_char() {
                Some(')') => {
                    let text = self.source[start..self.position].to_string();
                    self.advance();
                    return Ok(text);
                }
                Some('(') => {
                    return Err(self.error_here("nested '(' in parenthesised arguments"));
                }
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.error_at_last("unterminated parenthesised arguments")),
            }
        }
    }

    /// Scans a quoted string, processing escapes.
    fn scan_string(&mut self) -> Result<String> {
        self.advance(); // consume opening '"'
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(text),
                Some('\\') => match self.peek_char() {
                    Some('n') => {
                        self.advance();
                        text.push('\n');
                    }
                    Some('t') => {
                        self.advance();
                        text.push('\t');
                    }
                    Some('\\') => {
                        self.advance();
                        text.push('\\');
                    }
                    Some('"') => {
                        self.advance();
                        text.push('"');
                    }
                    // Paths like "models\props" keep their backslash.
                    _ => text.push('\\'),
                },
                Some(c) => text.push(c),
                None => return Err(self.error_at_last("unterminated string literal")),
            }
        }
    }

    /// Scans a bare word up to whitespace or a delimiter.
    fn scan_bare(&mut self) -> String {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || is_delimiter(c) {
                break;
            }
            self.advance();
        }
        self.source[start..self.position].to_string()
    }

    fn context_at(&self, line: u32, column: u32) -> ErrorContext {
        let ctx = ErrorContext::new().with_position(line, column);
        match &self.source_name {
            Some(name) => ctx.with_source(name.clone()),
            None => ctx,
        }
    }

    fn error_here(&self, message: impl Into<String>) -> Error {
        Error::syntax(message).with_context(self.context_at(self.line, self.column))
    }

    fn error_at_last(&self, message: impl Into<String>) -> Error {
        Error::syntax(message).with_context(self.context_at(self.last.line, self.last.column))
    }
}

impl TokenStream for Lexer<'_> {
    fn next_token(&mut self) -> Result<Token> {
        self.scan()
    }

    fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    fn locate(&self, error: Error) -> Error {
        if error.context.is_some() {
            return error;
        }
        let ctx = self.context_at(self.last.line, self.last.column);
        error.with_context(ctx)
    }
}

/// Characters that end a bare word.
fn is_delimiter(c: char) -> bool {
    matches!(c, '"' | '(' | ')' | '[' | ']' | '{' | '}' | ':' | '=' | '+')
}
