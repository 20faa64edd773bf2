use std::io;
use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::utils::loc::Position;

/// What can go wrong while loading or saving a JSON file.
#[derive(Error, Debug, Diagnostic)]
pub enum JsonError {
    #[error("cannot read {}", .path.display())]
    #[diagnostic(code(webutil::json::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "Cannot parse JSON schema due to a syntax error at line {}, character {}: {message}",
        .position.line,
        .position.character
    )]
    #[diagnostic(
        code(webutil::json::syntax),
        help("Check the JSON syntax at the highlighted location")
    )]
    Syntax {
        #[source_code]
        source_code: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
        position: Position,
        message: String,
    },

    #[error("{} does not match the expected shape: {source}", .path.display())]
    #[diagnostic(code(webutil::json::data))]
    Data {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize JSON for {}", .path.display())]
    #[diagnostic(code(webutil::json::serialize))]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write {}", .path.display())]
    #[diagnostic(code(webutil::json::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl JsonError {
    /// Where a syntax error was found, if this is one.
    pub fn position(&self) -> Option<Position> {
        match self {
            JsonError::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}
