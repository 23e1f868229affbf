use super::CliError;
use anyhow::Context;
use modtran_core::{ReportColumn, Tape5Config, encode, parse_report};
use std::fs;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct EncodeArgs {
    /// JSON run configuration; omitted fields take the wrapper defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write the control file here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct DecodeArgs {
    /// Scanned report file (tape7.scn)
    #[arg(value_name = "REPORT")]
    report: PathBuf,
    /// Write the JSON columns here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

pub(super) fn run_encode_command(args: EncodeArgs) -> Result<i32, CliError> {
    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            serde_json::from_str::<Tape5Config>(&text)
                .with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => Tape5Config::default(),
    };

    // precision truncations are logged by the encoder itself
    let document = encode(&config)?;
    write_output(args.output.as_deref(), document.text())?;
    Ok(0)
}

pub(super) fn run_decode_command(args: DecodeArgs) -> Result<i32, CliError> {
    let text = fs::read_to_string(&args.report)
        .with_context(|| format!("failed to read report '{}'", args.report.display()))?;
    let report = parse_report(&text)?;
    tracing::debug!(rows = report.rows(), "decoded scan report");

    // NaN sentinels serialize as JSON null.
    let mut columns = serde_json::Map::new();
    for column in ReportColumn::ALL {
        let values: Vec<serde_json::Value> = report
            .column(column)
            .iter()
            .map(|&value| serde_json::Number::from_f64(value).map_or(
                serde_json::Value::Null,
                serde_json::Value::Number,
            ))
            .collect();
        columns.insert(column.label().to_string(), serde_json::Value::Array(values));
    }
    let rendered = serde_json::to_string_pretty(&serde_json::Value::Object(columns))
        .context("failed to serialize decoded report")?;

    write_output(args.output.as_deref(), &format!("{rendered}\n"))?;
    Ok(0)
}

fn write_output(path: Option<&std::path::Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("failed to write '{}'", path.display()))
            .map_err(CliError::from),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
