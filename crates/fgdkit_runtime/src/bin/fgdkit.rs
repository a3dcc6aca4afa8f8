//! fgdkit CLI entry point.

use std::env;
use std::fs;
use std::process::ExitCode;

use fgdkit_binary::{decode, encode};
use fgdkit_runtime::cli::{CliConfig, Command, open_database, parse_args, summary};
use fgdkit_runtime::{Inspector, RustylineEditor, setup_tracing, snapshot};
use tracing::info;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("fgdkit {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    setup_tracing(config.verbose);

    let Some(command) = &config.command else {
        print_help();
        return Err("no command given".into());
    };
    execute(&config, command)
}

fn execute(config: &CliConfig, command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    let root = config.root.as_deref();
    match command {
        Command::Check { input } => {
            let fgd = open_database(input, root)?;
            println!("{}", summary(&fgd));
        }
        Command::Encode { input, output } => {
            let fgd = open_database(input, root)?;
            let bytes = encode(&fgd)?;
            fs::write(output, &bytes)
                .map_err(|e| format!("failed to write '{}': {e}", output.display()))?;
            info!(path = %output.display(), bytes = bytes.len(), "wrote encoded database");
            println!("{} classes, {} bytes", fgd.len(), bytes.len());
        }
        Command::Decode { input } => {
            let bytes = fs::read(input)
                .map_err(|e| format!("failed to read '{}': {e}", input.display()))?;
            let fgd = decode(&bytes)?;
            println!("{}", summary(&fgd));
        }
        Command::Snapshot { input, output } => {
            let fgd = open_database(input, root)?;
            snapshot::save_to_file(&fgd, output)?;
            println!("{} classes saved to {}", fgd.len(), output.display());
        }
        Command::Inspect { input } => {
            let fgd = open_database(input, root)?;
            let mut editor = RustylineEditor::new()?;
            Inspector::new(fgd).run(&mut editor)?;
        }
    }
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mfgdkit\x1b[0m - FGD entity definition toolkit

\x1b[1mUSAGE:\x1b[0m
    fgdkit [OPTIONS] <COMMAND> [ARGS...]

\x1b[1mCOMMANDS:\x1b[0m
    check <file.fgd>                  Parse, resolve bases and print a summary
    encode <file.fgd> <out.bin>       Write the compact binary form
    decode <in.bin>                   Read a binary file and print a summary
    snapshot <file.fgd> <out.msgpack> Write a lossless MessagePack snapshot
    inspect <file.fgd|file.bin>       Browse classes interactively

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -v, --verbose      Log debug events (RUST_LOG overrides)
    --root <dir>       Directory that @include paths resolve against

\x1b[1mEXAMPLES:\x1b[0m
    fgdkit check halflife2.fgd
    fgdkit --root fgds encode fgds/portal2.fgd portal2.bin
    fgdkit inspect portal2.bin

\x1b[1mINSPECTOR COMMANDS:\x1b[0m
    list [category]      List classes
    show <class>         Summary of a class
    kv <class> [key]     Keyvalues, or one keyvalue in detail
    io <class>           Inputs and outputs
    bases <class>        Inheritance tree
    Ctrl+D               Exit"
    );
}
