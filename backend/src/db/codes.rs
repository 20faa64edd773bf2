//! A small set of MySQL server error codes.
//! See <https://dev.mysql.com/doc/refman/8.0/en/server-error-reference.html>.

/// A `unique` constraint violation on insert.
/// Message: Duplicate entry '%s' for key %d
pub const ERR_DUPLICATE_ENTRY: u16 = 1062;

/// The query returned no rows.
/// Message: Query was empty
pub const ERR_NO_RESULTS: u16 = 1065;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerError {
    DuplicateEntry,
    NoResults,
}

impl ServerError {
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            ERR_DUPLICATE_ENTRY => Some(ServerError::DuplicateEntry),
            ERR_NO_RESULTS => Some(ServerError::NoResults),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        match self {
            ServerError::DuplicateEntry => ERR_DUPLICATE_ENTRY,
            ServerError::NoResults => ERR_NO_RESULTS,
        }
    }
}
