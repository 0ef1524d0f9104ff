use crate::config::LoggingConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_NAME: &str = "kickfeed.log";

/// Install the global subscriber: stderr console output plus an optional daily rolling file.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let file_layer = config.dir.as_deref().and_then(file_layer);

    let console_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

pub fn init_logging_simple() {
    // Minimal logging for one-shot CLI commands; stdout is reserved for command output
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

fn default_directives(level: &str) -> String {
    format!("{level},kickfeed={level},reqwest=warn,hyper=warn")
}

fn file_layer<S>(log_dir: &str) -> Option<Box<dyn Layer<S> + Send + Sync>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    // `rolling::daily` panics if it cannot create the initial file, so check writability first.
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Warning: Could not create log directory {log_dir} ({e}), file logging disabled");
        return None;
    }

    let marker = std::path::Path::new(log_dir).join(".kickfeed_write_test");
    if let Err(e) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&marker)
    {
        eprintln!("Warning: Could not write to log directory {log_dir} ({e}), file logging disabled");
        return None;
    }
    let _ = std::fs::remove_file(&marker);

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    // The guard flushes on drop; the process keeps it for its whole lifetime.
    Box::leak(Box::new(guard));

    Some(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("debug,kickfeed=debug"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }

    #[test]
    fn test_unwritable_dir_disables_file_layer() {
        // A path under a regular file can never be created as a directory.
        let file = std::env::temp_dir().join(format!("kickfeed-log-{}", uuid::Uuid::new_v4()));
        std::fs::write(&file, b"x").unwrap();
        let dir = file.join("logs");

        let layer = file_layer::<tracing_subscriber::Registry>(dir.to_str().unwrap());
        std::fs::remove_file(&file).ok();

        assert!(layer.is_none());
    }
}
