use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{CarouselError, Result};

const LOG_FILE: &str = "testimonials.log";

/// Where log output goes. Terminal views cannot share stderr with the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// `file` if configured, otherwise `testimonials.log` inside `dir`.
    pub fn file_in(file: Option<&Path>, dir: &Path) -> Self {
        LogTarget::File(file.map(Path::to_path_buf).unwrap_or_else(|| dir.join(LOG_FILE)))
    }
}

/// `RUST_LOG` wins over the configured level.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered file output is flushed.
pub fn init(level: &str, target: &LogTarget) -> Result<Option<WorkerGuard>> {
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter(level))
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .try_init()
                .map_err(|e| CarouselError::Config(format!("Failed to initialize logging: {}", e)))?;
            Ok(None)
        }
        LogTarget::File(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            std::fs::create_dir_all(dir)?;
            let file_name = path
                .file_name()
                .map(|n| n.to_owned())
                .unwrap_or_else(|| LOG_FILE.into());

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter(level))
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()
                .map_err(|e| CarouselError::Config(format!("Failed to initialize logging: {}", e)))?;
            Ok(Some(guard))
        }
    }
}
