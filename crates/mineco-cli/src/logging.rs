use crate::error::Result;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
    registry::LookupSpan,
};

/// Terminal verbosity from the `-v` count; `-q` silences the terminal only.
pub fn stderr_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// The log file always keeps debug detail, or more when the terminal asks for it.
fn file_level(stderr: LevelFilter) -> LevelFilter {
    stderr.max(LevelFilter::DEBUG)
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

/// Plain-text file layer. Closing a workflow span (`pair_workflow`,
/// `trajectory_workflow`, ...) records how long it took.
fn file_layer<S>(file: File, level: LevelFilter) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(level)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let level = stderr_level(verbosity, quiet);

    let file = match &log_file {
        Some(path) => Some(open_log_file(path)?),
        None => None,
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(level);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file.map(|f| file_layer(f, file_level(level))))
        .init();

    Ok(())
}
