use std::path::Path;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};


/// Where (and how verbosely) to write the log file.
pub struct LogFileOutput<'p> {
    pub level_filter: EnvFilter,

    pub directory: &'p Path,

    pub file_name: &'p str,
}


/// Initializes the global tracing subscriber: console output filtered by
/// `console_level_filter` and, if `log_file_output` is set, a non-blocking file writer.
///
/// The returned guard flushes the file writer when dropped, so keep it alive
/// until the program exits.
pub fn initialize_tracing(
    console_level_filter: EnvFilter,
    log_file_output: Option<LogFileOutput<'_>>,
) -> Result<Option<WorkerGuard>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(console_level_filter);


    let (file_layer, guard) = match log_file_output {
        Some(log_file_output) => {
            std::fs::create_dir_all(log_file_output.directory)
                .into_diagnostic()
                .wrap_err_with(|| {
                    miette!(
                        "Failed to create missing log directory at {}.",
                        log_file_output.directory.display()
                    )
                })?;

            let file_appender = tracing_appender::rolling::never(
                log_file_output.directory,
                log_file_output.file_name,
            );
            let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_appender)
                .with_filter(log_file_output.level_filter);

            (Some(file_layer), Some(guard))
        }
        None => (None, None),
    };


    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install global tracing subscriber.")?;

    Ok(guard)
}
