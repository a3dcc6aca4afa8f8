//! The file driver: top-level directives and `@include` handling.

use fgdkit_foundation::{EntityCategory, Result, SemanticError};
use fgdkit_schema::Fgd;
use tracing::debug;

use crate::fs::{FileSystem, MemoryFs};
use crate::lexer::Lexer;
use crate::parser::{parse_entity_body, parse_entity_head};
use crate::stream::TokenStream;
use crate::token::TokenKind;

/// Options controlling how files are loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Extension appended to include paths that lack it.
    pub extension: String,
    /// Whether to link base classes once the root file is done.
    pub resolve_bases: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extension: ".fgd".to_string(),
            resolve_bases: true,
        }
    }
}

impl ParseOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the include extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builder method to set whether bases are resolved after loading.
    #[must_use]
    pub fn with_resolve_bases(mut self, resolve_bases: bool) -> Self {
        self.resolve_bases = resolve_bases;
        self
    }

    /// Appends the extension to `path` unless already present.
    #[must_use]
    pub fn file_name(&self, path: &str) -> String {
        if path.to_lowercase().ends_with(&self.extension.to_lowercase()) {
            path.to_string()
        } else {
            format!("{path}{}", self.extension)
        }
    }
}

/// Reads FGD files from a [`FileSystem`], following `@include`.
#[derive(Debug)]
pub struct Loader<'fs, F: FileSystem + ?Sized> {
    fs: &'fs F,
    options: ParseOptions,
}

impl<'fs, F: FileSystem + ?Sized> Loader<'fs, F> {
    /// Creates a loader with default options.
    #[must_use]
    pub fn new(fs: &'fs F) -> Self {
        Self {
            fs,
            options: ParseOptions::default(),
        }
    }

    /// Builder method to replace the options.
    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the options in use.
    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Loads a root file and everything it includes into a new database.
    ///
    /// # Errors
    ///
    /// Returns the first error from reading, parsing or resolving.
    pub fn load(&self, path: &str) -> Result<Fgd> {
        let mut fgd = Fgd::new();
        self.load_into(&mut fgd, path)?;
        Ok(fgd)
    }

    /// Loads a root file into an existing database.
    ///
    /// Classes parsed before an error stay in `fgd`.
    ///
    /// # Errors
    ///
    /// Returns the first error from reading, parsing or resolving.
    pub fn load_into(&self, fgd: &mut Fgd, path: &str) -> Result<()> {
        let path = self.options.file_name(path);
        self.include(fgd, &path)?;
        if self.options.resolve_bases {
            fgd.resolve_bases()?;
        }
        Ok(())
    }

    /// Parses one file unless it was already consumed.
    fn include(&self, fgd: &mut Fgd, path: &str) -> Result<()> {
        let identity = self.fs.identity(path);
        if fgd.has_file(&identity) {
            debug!(file = path, "skipping file already included");
            return Ok(());
        }
        let bytes = self.fs.read(path)?;
        fgd.begin_file(identity);
        let source = String::from_utf8_lossy(&bytes);
        debug!(file = path, bytes = bytes.len(), "parsing file");
        self.parse_source(fgd, path, &source)
    }

    /// Parses source text as though it were the file `name`.
    ///
    /// Base classes are not resolved.
    ///
    /// # Errors
    ///
    /// Returns the first syntax or semantic error, or an error from an
    /// included file.
    pub fn parse_source(&self, fgd: &mut Fgd, name: &str, source: &str) -> Result<()> {
        let mut lexer = Lexer::new(source).with_source_name(name);
        loop {
            let token = lexer.next_token()?;
            match token.kind {
                TokenKind::Newline => continue,
                TokenKind::Eof => return Ok(()),
                TokenKind::String => {}
                _ => return Err(lexer.unexpected(&token)),
            }

            let keyword = token.text.to_lowercase();
            match keyword.as_str() {
                "@include" => {
                    let target = lexer.expect(TokenKind::String)?;
                    let target = self.options.file_name(&target);
                    debug!(from = name, file = %target, "include");
                    self.include(fgd, &target).map_err(|err| lexer.locate(err))?;
                }
                "@mapsize" => {
                    let args = lexer.expect(TokenKind::ParenArgs)?;
                    let (min, max) = parse_map_size(&args).ok_or_else(|| {
                        lexer.semantic_error(SemanticError::InvalidMapSize(args.clone()))
                    })?;
                    fgd.set_map_size(min, max);
                }
                _ => match keyword.strip_prefix('@') {
                    Some(category) => {
                        let category = EntityCategory::from_keyword(category).ok_or_else(|| {
                            lexer.semantic_error(SemanticError::UnknownCategory(category.to_string()))
                        })?;
                        let head = parse_entity_head(&mut lexer, category)?;
                        let entity = fgd.insert_mut(head);
                        parse_entity_body(&mut lexer, entity)?;
                    }
                    None => {
                        return Err(lexer.semantic_error(SemanticError::BadKeyword(token.text)));
                    }
                },
            }
        }
    }
}

/// Parses `min, max` from `@mapsize`.
fn parse_map_size(args: &str) -> Option<(i64, i64)> {
    let (min, max) = args.split_once(',')?;
    let min = min.trim().parse().ok()?;
    let max = max.trim().parse().ok()?;
    Some((min, max))
}

/// Loads `path` and its includes from `fs` with default options.
///
/// # Errors
///
/// Returns the first error from reading, parsing or resolving.
pub fn load<F: FileSystem + ?Sized>(fs: &F, path: &str) -> Result<Fgd> {
    Loader::new(fs).load(path)
}

/// Parses FGD text with no include support and resolves its bases.
///
/// # Errors
///
/// Returns the first syntax or semantic error. An `@include` fails with
/// [`ErrorKind::FileNotFound`](fgdkit_foundation::ErrorKind::FileNotFound).
pub fn parse_str(source: &str) -> Result<Fgd> {
    let fs = MemoryFs::new();
    let mut fgd = Fgd::new();
    Loader::new(&fs).parse_source(&mut fgd, "<string>", source)?;
    fgd.resolve_bases()?;
    Ok(fgd)
}
