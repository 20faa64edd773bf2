use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum LogError {
    #[error("cannot open log file {}", .path.display())]
    #[diagnostic(code(webutil::log::file))]
    File {
        path: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    #[error("cannot install the global logger")]
    #[diagnostic(
        code(webutil::log::install),
        help("Logging can only be initialized once per process")
    )]
    Install(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
