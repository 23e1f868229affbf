mod commands;

use clap::Parser;
use modtran_core::ModtranError;
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();
    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error.diagnostic_line());
            error.exit_code()
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "modtran-rs", about = "MODTRAN4 control-file encoder and report decoder")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Render a control file (tape5) from a JSON run configuration
    Encode(commands::EncodeArgs),
    /// Decode a scanned report (tape7.scn) into JSON columns
    Decode(commands::DecodeArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Encode(args) => commands::run_encode_command(args),
        CliCommand::Decode(args) => commands::run_decode_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Codec(#[from] ModtranError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn diagnostic_line(&self) -> String {
        match self {
            Self::Usage(message) => format!("ERROR: [Usage] {message}"),
            Self::Codec(error) => error.diagnostic_line(),
            Self::Internal(error) => format!("ERROR: [Io] {error:#}"),
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Codec(error) => error.exit_code(),
            Self::Internal(_) => 3,
        }
    }
}
