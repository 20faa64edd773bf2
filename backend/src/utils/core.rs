use std::fmt;
use std::path::Path;

use crate::utils::loc::Position;

/// A location inside a named input, printed as `path:line` or
/// `path:line:character`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loc {
    pub input_path: String,
    pub line_number: usize,
    pub line_offset: Option<usize>,
}

impl Loc {
    pub fn line(input_path: impl AsRef<Path>, line_number: usize) -> Self {
        Self {
            input_path: input_path.as_ref().display().to_string(),
            line_number,
            line_offset: None,
        }
    }

    pub fn at(input_path: impl AsRef<Path>, position: Position) -> Self {
        Self {
            input_path: input_path.as_ref().display().to_string(),
            line_number: position.line,
            line_offset: Some(position.character),
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_offset {
            Some(offset) => write!(f, "{}:{}:{}", self.input_path, self.line_number, offset),
            None => write!(f, "{}:{}", self.input_path, self.line_number),
        }
    }
}
