use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("EDIDGATE_BUILD_COMMIT"),
    ", built ",
    env!("EDIDGATE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "edidgate")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Validate EDID dumps and hand them to the block checker.",
    long_about = None,
    after_help = "Examples:\n  edidgate decode monitor.bin -o report.json\n  edidgate parse edid.txt --stdout --pretty\n\nSet EDIDGATE_LOG=debug for dispatcher logs."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a binary or hex-dump EDID file and write a JSON report.
    #[command(alias = "parse")]
    Decode {
        /// Path (or single-match glob) to an EDID dump
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code unless the status is 0
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            input,
            report,
            stdout,
            pretty,
            compact,
            quiet,
            strict,
        } => cmd_decode(DecodeArgs {
            input,
            report,
            stdout,
            pretty,
            compact,
            quiet,
            strict,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("EDIDGATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

struct DecodeArgs {
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let input = resolve_input_path(&args.input)?;
    validate_input_file(&input)?;

    let rep = edidgate_core::decode_edid_file(&input).context("EDID decoding failed")?;
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    if args.stdout {
        print!("{}", json);
        if !args.quiet {
            print_summary(&rep);
        }
        return check_strict(&rep, args.strict);
    }

    let report = args.report.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--report or --stdout".to_string()),
        )
    })?;
    if same_file(&input, &report) {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !args.quiet {
        print_summary(&rep);
        eprintln!("OK: report written -> {}", report.display());
    }
    check_strict(&rep, args.strict)
}

fn check_strict(rep: &edidgate_core::Report, strict: bool) -> Result<(), CliError> {
    if strict && rep.status != 0 {
        let hint = match &rep.rejection {
            Some(rejection) => rejection.message.clone(),
            None => format!("{} failure(s) reported", rep.failures),
        };
        return Err(CliError::new(
            format!("descriptor not accepted (status {})", rep.status),
            Some(hint),
        ));
    }
    Ok(())
}

fn serialize_report(
    rep: &edidgate_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_summary(rep: &edidgate_core::Report) {
    if let Some(rejection) = &rep.rejection {
        eprintln!("Rejected: {}", rejection.message);
        return;
    }
    eprintln!(
        "Parsed {} byte(s), {} block(s): {} warning(s), {} failure(s)",
        rep.edid_size, rep.num_blocks, rep.warnings, rep.failures
    );
    for block in &rep.blocks {
        for failure in &block.failures {
            eprintln!("  block {} failure: {}", block.block, failure);
        }
        for warning in &block.warnings {
            eprintln!("  block {} warning: {}", block.block, warning);
        }
    }
}

fn same_file(input: &PathBuf, report: &PathBuf) -> bool {
    let Ok(input_abs) = fs::canonicalize(input) else {
        return false;
    };
    let parent = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let (Ok(dir), Some(name)) = (fs::canonicalize(parent), report.file_name()) else {
        return false;
    };
    dir.join(name) == input_abs
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a binary EDID dump or a hex dump".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a binary EDID dump or a hex dump".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single EDID dump, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
