//! The token stream contract the grammar parser consumes.

use fgdkit_foundation::{Error, ErrorKind, Result, SemanticError};

use crate::token::{Token, TokenKind};

/// A pull-based source of tokens with positioned error reporting.
///
/// Implementors only need [`next_token`](Self::next_token) and
/// [`locate`](Self::locate); the remaining methods build on those.
pub trait TokenStream {
    /// Returns the next token, or [`TokenKind::Eof`] once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for text that cannot be tokenized.
    fn next_token(&mut self) -> Result<Token>;

    /// Returns the name of the file being read, if known.
    fn source_name(&self) -> Option<&str>;

    /// Attaches the current source position to an error that has none.
    #[must_use]
    fn locate(&self, error: Error) -> Error;

    /// Creates an error of the given kind at the current position.
    #[must_use]
    fn error(&self, kind: ErrorKind) -> Error {
        self.locate(Error::new(kind))
    }

    /// Creates a syntax error at the current position.
    #[must_use]
    fn syntax_error(&self, message: impl Into<String>) -> Error
    where
        Self: Sized,
    {
        self.error(ErrorKind::Syntax(message.into()))
    }

    /// Creates a semantic error at the current position.
    #[must_use]
    fn semantic_error(&self, error: SemanticError) -> Error
    where
        Self: Sized,
    {
        self.error(ErrorKind::Semantic(error))
    }

    /// Creates the error for a token the grammar does not allow here.
    #[must_use]
    fn unexpected(&self, token: &Token) -> Error
    where
        Self: Sized,
    {
        self.syntax_error(format!("unexpected {}", token.describe()))
    }

    /// Reads the next token, which must be of `kind`, and returns its text.
    ///
    /// Line breaks before the token are skipped unless `kind` is
    /// [`TokenKind::Newline`].
    ///
    /// # Errors
    ///
    /// Returns a syntax error naming both kinds on a mismatch.
    fn expect(&mut self, kind: TokenKind) -> Result<String>
    where
        Self: Sized,
    {
        loop {
            let token = self.next_token()?;
            if token.kind == kind {
                return Ok(token.text);
            }
            if token.kind == TokenKind::Newline {
                continue;
            }
            return Err(self.syntax_error(format!("expected {kind}, found {}", token.describe())));
        }
    }
}
