//! Token types for FGD source.
//!
//! Tokens are the output of the lexer and input to the parser.

use std::fmt;

use crate::span::Span;

/// The kinds of token the grammar is written against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Quoted string or bare word. The text is unquoted and unescaped.
    String,
    /// Line break.
    Newline,
    /// `:`
    Colon,
    /// `+`
    Plus,
    /// `=`
    Equals,
    /// `(...)`. The text is the raw content between the parentheses.
    ParenArgs,
    /// `[`
    BracketOpen,
    /// `]`
    BracketClose,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Newline => "newline",
            Self::Colon => "':'",
            Self::Plus => "'+'",
            Self::Equals => "'='",
            Self::ParenArgs => "parenthesised arguments",
            Self::BracketOpen => "'['",
            Self::BracketClose => "']'",
            Self::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// String content for `String` and `ParenArgs`, the symbol otherwise.
    pub text: String,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Describes the token for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::String => format!("string \"{}\"", self.text),
            TokenKind::ParenArgs => format!("\"({})\"", self.text),
            kind => kind.name().to_string(),
        }
    }
}
