use std::path::PathBuf;

use clap::Parser;

use ezstate_cli::cli::{self, Request, Source};
use ezstate_cli::logger;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "ezdis", about = "EzState expression bytecode decompiler")]
struct Args {
    /// Turn on verbose logging. Repeat to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Sets the logging to write to a file.
    #[arg(short, long)]
    log_file: Option<PathBuf>,

    /// Selects the subcommand.
    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Bytecode as hex digits, for example "41 42 8D A1".
    #[arg(required_unless_present = "file")]
    hex: Option<String>,

    /// Reads raw bytecode from a file instead of hex digits.
    #[arg(long, conflicts_with = "hex")]
    file: Option<PathBuf>,

    /// JSON file with the argument count and name of each command.
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Rejects bytecode that does not end with an end-marker.
    #[arg(long)]
    require_terminator: bool,
}

impl From<InputArgs> for Request {
    fn from(args: InputArgs) -> Self {
        let source = match (args.file, args.hex) {
            (Some(path), _) => Source::File(path),
            (None, hex) => Source::Hex(hex.unwrap_or_default()),
        };
        Request {
            source,
            commands: args.commands,
            require_terminator: args.require_terminator,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Action {
    /// Decompiles bytecode and prints the expression as infix text.
    Decode {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Prints a JSON listing of the instructions in the bytecode.
    Disasm {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Decompiles and recompiles bytecode and checks the bytes are unchanged.
    Roundtrip {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Prints the version number of the decompiler.
    Version,
}

pub fn main() -> Result<(), String> {
    let args = Args::parse();

    logger::configure(args.verbose, args.log_file)?;

    match args.action {
        Action::Decode { input } => cli::decode(&input.into()),
        Action::Disasm { input } => cli::disasm(&input.into()),
        Action::Roundtrip { input } => cli::roundtrip(&input.into()),
        Action::Version => {
            println!("ezdis version {VERSION}");
            Ok(())
        }
    }
}
