//! Whole-file JSON load and save.
//!
//! Everything happens in memory, so very large documents should be streamed
//! with `serde_json::Deserializer` instead.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use miette::NamedSource;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value, error::Category};

use crate::file::error::JsonError;
use crate::utils::loc::{byte_offset_from_linecol, position_at_byte, span_from_linecol};

/// Reads a JSON file whose top level is an object.
pub fn load_json(path: impl AsRef<Path>) -> Result<Map<String, Value>, JsonError> {
    load_json_as(path)
}

/// Reads a JSON file and deserializes it into `T`.
pub fn load_json_as<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, JsonError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| JsonError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json_as(path, &text)
}

/// Deserializes `text`, naming it `path` in diagnostics.
pub fn parse_json_as<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    text: &str,
) -> Result<T, JsonError> {
    let path = path.as_ref();
    serde_json::from_str(text).map_err(|err| match err.classify() {
        Category::Syntax | Category::Eof => syntax_error(path, text, &err),
        Category::Data | Category::Io => JsonError::Data {
            path: path.to_path_buf(),
            source: err,
        },
    })
}

/// Pretty prints `data` with a one-space indent and writes it to `path`.
pub fn save_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    data: &T,
) -> Result<(), JsonError> {
    let path = path.as_ref();
    let buf = to_pretty_json(path, data)?;
    std::fs::write(path, buf).map_err(|source| JsonError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`save_json`], but on unix the file ends up readable and writable by
/// its owner only (mode `0600`), even if it already existed.
pub fn save_json_private<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    data: &T,
) -> Result<(), JsonError> {
    let path = path.as_ref();
    let buf = to_pretty_json(path, data)?;
    let write_err = |source| JsonError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(write_err)?;
    #[cfg(unix)]
    {
        // `mode` only applies when the file is created
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(write_err)?;
    }
    file.write_all(&buf).map_err(write_err)
}

fn to_pretty_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<Vec<u8>, JsonError> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    data.serialize(&mut ser).map_err(|source| JsonError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(buf)
}

fn syntax_error(path: &Path, text: &str, err: &serde_json::Error) -> JsonError {
    let byte_offset = byte_offset_from_linecol(text, err.line(), err.column());
    let position = position_at_byte(text, byte_offset);

    // serde_json appends its own byte-based location; ours replaces it
    let full = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    let message = full.strip_suffix(&suffix).unwrap_or(&full).to_owned();

    tracing::debug!(
        path = %path.display(),
        line = position.line,
        character = position.character,
        "JSON syntax error"
    );

    JsonError::Syntax {
        source_code: NamedSource::new(path.display().to_string(), text.to_owned()),
        span: span_from_linecol(text, err.line(), err.column(), 1),
        position,
        message,
    }
}
