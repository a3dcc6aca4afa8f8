//! Tokenizer, grammar parser and file driver for FGD source.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of FGD text into a [`TokenStream`]
//! - [`parse_entity`] - The grammar for one `@Class ... [ ... ]` block
//! - [`Loader`] - Reads files through a [`FileSystem`], following `@include`
//! - [`parse_str`], [`load`] - Convenience entry points

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod fs;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod span;
pub mod stream;
pub mod token;


pub use fs::{DirectoryFs, FileSystem, MemoryFs, normalize_path};
pub use lexer::Lexer;
pub use loader::{Loader, ParseOptions, load, parse_str};
pub use parser::{parse_entity, parse_entity_body, parse_entity_head};
pub use span::Span;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
