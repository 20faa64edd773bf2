use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

use crate::environment::Environment;
use crate::log::error::LogError;

/// Logger settings, built once at startup and passed to [`init_logging`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub environment: Environment,
    /// Write to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the environment's default level. When logging to a
/// file, keep the returned guard alive until exit so buffered lines are
/// flushed.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, LogError> {
    let env = config.environment;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env.log_directive()));
    let format = ShortLevelFormat::new(env.log_timestamps());

    match &config.file {
        Some(path) => {
            let appender = file_appender(path)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .event_format(format)
                .with_writer(writer)
                .try_init()
                .map_err(LogError::Install)?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .event_format(format)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(LogError::Install)?;
            Ok(None)
        }
    }
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, LogError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "webutil.log".to_owned());

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .map_err(|source| LogError::File {
            path: path.to_path_buf(),
            source,
        })
}

/// Single-letter level tag written before each message.
pub fn level_prefix(level: &Level) -> char {
    match *level {
        Level::ERROR => 'E',
        Level::WARN => 'W',
        Level::INFO => 'I',
        Level::DEBUG => 'D',
        _ => 'T',
    }
}

/// `[timestamp ]<L>: message fields...`
#[derive(Clone, Copy, Debug)]
pub struct ShortLevelFormat {
    timestamps: bool,
}

impl ShortLevelFormat {
    pub fn new(timestamps: bool) -> Self {
        Self { timestamps }
    }
}

impl<S, N> FormatEvent<S, N> for ShortLevelFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        if self.timestamps {
            write!(writer, "{} ", chrono::Local::now().format("%Y/%m/%d %H:%M:%S"))?;
        }
        write!(writer, "{}: ", level_prefix(event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(env: Environment, emit: impl FnOnce()) -> String {
        let out = Captured::default();
        let sink = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(env.log_directive()))
            .with_ansi(false)
            .event_format(ShortLevelFormat::new(env.log_timestamps()))
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        out.text()
    }

    #[test]
    fn prefixes() {
        assert_eq!(level_prefix(&Level::ERROR), 'E');
        assert_eq!(level_prefix(&Level::WARN), 'W');
        assert_eq!(level_prefix(&Level::INFO), 'I');
        assert_eq!(level_prefix(&Level::DEBUG), 'D');
        assert_eq!(level_prefix(&Level::TRACE), 'T');
    }

    #[test]
    fn prod_has_no_timestamp_and_no_debug() {
        let out = capture(Environment::Prod, || {
            tracing::info!("Hello");
            tracing::debug!("hidden");
            tracing::error!("Showing other message prefixes");
        });
        assert_eq!(out, "I: Hello\nE: Showing other message prefixes\n");
    }

    #[test]
    fn test_env_only_logs_errors() {
        let out = capture(Environment::Test, || {
            tracing::info!("quiet");
            tracing::error!("loud");
        });
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("E: loud"), "{out}");
    }

    #[test]
    fn dev_logs_debug_with_timestamp() {
        let out = capture(Environment::Dev, || tracing::debug!(answer = 42, "thinking"));
        // "YYYY/MM/DD HH:MM:SS D: thinking answer=42"
        let (stamp, rest) = out.trim_end().split_at(19);
        assert_eq!(stamp.as_bytes()[4], b'/');
        assert!(rest.starts_with(" D: "), "{out}");
        assert!(rest.contains("thinking") && rest.contains("answer=42"), "{out}");
    }

    #[test]
    fn captured_output_has_no_escape_codes() {
        let out = capture(Environment::Dev, || tracing::info!(user = "alice", "signed in"));
        assert!(!out.contains('\x1b'), "{out:?}");
        assert!(out.contains("user=\"alice\""), "{out}");
    }

    #[test]
    fn file_appender_builds() {
        // only exercises appender construction; installing the global
        // subscriber would leak into other tests
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("app.log");
        assert!(file_appender(&path).is_ok());
    }
}
