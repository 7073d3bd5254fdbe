//! pretty-callback - render execution events as a pretty console log.
//!
//! Reads JSON-lines events from a file or stdin and feeds them to the
//! pretty callback, writing the rendered output to stdout.

mod cli;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::{Context, Result};
use cli::Cli;
use is_terminal::IsTerminal;
use pretty_callback::callback::{ConsoleDisplay, ExecutionEvent, PrettyCallback};
use pretty_callback::config::ReporterConfig;
use pretty_callback::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application version information
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);
    debug!("pretty-callback v{}", VERSION);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        let code = err.downcast_ref::<Error>().map_or(1, Error::exit_code);
        std::process::exit(code);
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(verbosity >= 3),
        )
        .with(env_filter)
        .init();
}

/// Resolve configuration: files and environment, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<ReporterConfig> {
    let mut config = match ReporterConfig::load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(err) if cli.config.is_some() => return Err(err.into()),
        Err(err) => {
            warn!(error = %err, "failed to load config, using defaults");
            let mut config = ReporterConfig::default();
            config.apply_env_overrides();
            config
        }
    };

    config.no_color |= cli.no_color;
    config.no_emoji |= cli.no_emoji;

    if cli.force_color {
        colored::control::set_override(true);
    } else if !io::stdout().is_terminal() {
        debug!("stdout is not a terminal, disabling color");
        config.no_color = true;
    }

    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let mut callback = PrettyCallback::with_config(&config, ConsoleDisplay::new());

    let mut reader: Box<dyn BufRead> = match &cli.input {
        Some(path) if !cli.reads_stdin() => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open event file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        _ => Box::new(io::stdin().lock()),
    };

    let mut handled = 0usize;
    let mut skipped = 0usize;
    let mut line_no = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("Failed to read line {}", line_no + 1))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        match decode_line(&buf) {
            Ok(Some(event)) => {
                callback.handle(&event)?;
                handled += 1;
            }
            Ok(None) => {}
            Err(err) if cli.strict => return Err(Error::event_decode(line_no, err).into()),
            Err(err) => {
                warn!(line = line_no, error = %err, "skipping undecodable event");
                skipped += 1;
            }
        }
    }

    info!(handled, skipped, "event stream finished");
    Ok(())
}

/// Decode one raw line; blank lines yield `None`.
fn decode_line(
    bytes: &[u8],
) -> std::result::Result<Option<ExecutionEvent>, Box<dyn std::error::Error + Send + Sync>> {
    let text = std::str::from_utf8(bytes)?.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(text)?))
}
