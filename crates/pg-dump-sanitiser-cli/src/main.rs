//! pg-dump-sanitiser CLI - canonical PostgreSQL schema dumps.

use clap::Parser;
use pg_dump_sanitiser::{Config, DumpReader, SanitiseError, Sanitiser};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "pg-dump-sanitiser")]
#[command(about = "Rewrite a pg_dump schema dump into a canonical, diff-friendly form")]
#[command(version)]
struct Cli {
    /// Schema dump produced by `pg_dump --schema-only`
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), SanitiseError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(SanitiseError::Config)?;

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => Config::default(),
    };

    let mut reader = DumpReader::open(&cli.file)?;
    let result = Sanitiser::new(config).run(&mut reader)?;
    drop(reader);

    // Rendered in full before anything reaches stdout.
    let canonical = result.render();
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(canonical.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => return Err(format!("unknown verbosity '{}'", other)),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("unknown log format '{}'", other)),
    }

    Ok(())
}
