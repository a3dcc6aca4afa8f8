//! Command-line configuration and database opening for the `fgdkit` binary.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use fgdkit_binary::{MAGIC, decode};
use fgdkit_foundation::{CATEGORY_ORDER, Error, Result};
use fgdkit_language::{DirectoryFs, Loader};
use fgdkit_schema::Fgd;
use thiserror::Error as ThisError;
use tracing::debug;

/// A subcommand and its operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Parse and resolve a file, printing a summary.
    Check {
        /// Source file.
        input: PathBuf,
    },
    /// Write the compact binary form of a source file.
    Encode {
        /// Source file.
        input: PathBuf,
        /// Destination of the encoded bytes.
        output: PathBuf,
    },
    /// Read an encoded file and print a summary.
    Decode {
        /// Encoded file.
        input: PathBuf,
    },
    /// Write a lossless MessagePack snapshot of a source file.
    Snapshot {
        /// Source file.
        input: PathBuf,
        /// Destination of the snapshot.
        output: PathBuf,
    },
    /// Browse a source or encoded file interactively.
    Inspect {
        /// Source or encoded file.
        input: PathBuf,
    },
}

/// CLI configuration parsed from arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// The subcommand, if one was given.
    pub command: Option<Command>,
    /// Raise the default log level.
    pub verbose: bool,
    /// Directory that `@include` paths resolve against.
    pub root: Option<PathBuf>,
    /// Print usage and exit.
    pub show_help: bool,
    /// Print the version and exit.
    pub show_version: bool,
}

/// Problems with the command line itself.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CliError {
    /// An option that is not recognised.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// A subcommand that is not recognised.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// An option or command is missing a value.
    #[error("{0} requires {1}")]
    MissingArgument(String, &'static str),
    /// More operands than the command takes.
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Parses `args`, where `args[0]` is the program name.
///
/// # Errors
///
/// Returns a [`CliError`] for unknown options or commands and for missing
/// or surplus operands.
pub fn parse_args(args: &[String]) -> std::result::Result<CliConfig, CliError> {
    let mut config = CliConfig::default();
    let mut operands = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-v" | "--verbose" => config.verbose = true,
            "--root" => {
                i += 1;
                let dir = args
                    .get(i)
                    .ok_or_else(|| CliError::MissingArgument("--root".into(), "a directory"))?;
                config.root = Some(PathBuf::from(dir));
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(CliError::UnknownOption(arg.to_string()));
            }
            operand => operands.push(operand.to_string()),
        }
        i += 1;
    }

    if config.show_help || config.show_version {
        return Ok(config);
    }

    let mut operands = operands.into_iter();
    if let Some(name) = operands.next() {
        let mut operand = |what: &'static str| {
            operands
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| CliError::MissingArgument(name.clone(), what))
        };
        let command = match name.as_str() {
            "check" => Command::Check {
                input: operand("an input file")?,
            },
            "encode" => Command::Encode {
                input: operand("an input file")?,
                output: operand("an output file")?,
            },
            "decode" => Command::Decode {
                input: operand("an input file")?,
            },
            "snapshot" => Command::Snapshot {
                input: operand("an input file")?,
                output: operand("an output file")?,
            },
            "inspect" => Command::Inspect {
                input: operand("an input file")?,
            },
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };
        if let Some(extra) = operands.next() {
            return Err(CliError::UnexpectedArgument(extra));
        }
        config.command = Some(command);
    }

    Ok(config)
}

/// Opens `input` as an encoded database if it starts with [`MAGIC`],
/// otherwise parses it as source.
///
/// Includes resolve against `root`, or the directory holding `input`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, decoded or parsed.
pub fn open_database(input: &Path, root: Option<&Path>) -> Result<Fgd> {
    let bytes = fs::read(input).map_err(|e| Error::io(format!("{}: {e}", input.display())))?;
    if bytes.starts_with(MAGIC) {
        debug!(path = %input.display(), "opening encoded database");
        return decode(&bytes);
    }

    let root = match root {
        Some(root) => root.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let name = match input.strip_prefix(&root) {
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => input.file_name().map_or_else(
            || input.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        ),
    };
    debug!(root = %root.display(), name, "opening source database");

    let fs = DirectoryFs::new(root);
    Loader::new(&fs).load(&name)
}

/// One-paragraph summary of a database, as printed by `check` and `decode`.
#[must_use]
pub fn summary(fgd: &Fgd) -> String {
    let mut counts = Vec::new();
    for category in CATEGORY_ORDER {
        let count = fgd.iter().filter(|ent| ent.category() == category).count();
        if count > 0 {
            counts.push(format!("{count} {category}"));
        }
    }
    let mut out = format!("{} classes", fgd.len());
    if !counts.is_empty() {
        out.push_str(" (");
        out.push_str(&counts.join(", "));
        out.push(')');
    }
    let _ = write!(out, "\nmap size: {} to {}", fgd.map_size_min, fgd.map_size_max);
    out
}
