use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Initializes the logging system.
///
/// Console output goes to stderr so stdout stays reserved for the run summary.
/// When `log_dir` is given, a JSON layer also writes to a daily rolling file
/// there; the returned guard must be held until exit to flush it.
pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(
        "camp_map=info"
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into()),
    );

    let (file_layer, guard) = match log_dir.and_then(open_log_file) {
        Some((writer, guard)) => (Some(fmt::layer().json().with_writer(writer)), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    guard
}

/// Open the rolling log file in `dir`. A directory that cannot be created
/// disables file logging instead of aborting the run.
fn open_log_file(dir: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if let Err(err) = fs::create_dir_all(dir) {
        eprintln!(
            "Cannot create log directory '{}': {}; file logging disabled",
            dir.display(),
            err
        );
        return None;
    }
    let file_appender = tracing_appender::rolling::daily(dir, "camp_map.log");
    Some(tracing_appender::non_blocking(file_appender))
}
