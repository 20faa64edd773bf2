use std::path::Path;

use crate::nix::error::UsersError;
use crate::utils::core::Loc;

/// UIDs below this belong to system and service accounts.
pub const FIRST_REGULAR_UID: u32 = 1000;

/// Regular (non-system) user names from an `/etc/passwd` style file.
pub fn users_from(path: impl AsRef<Path>) -> Result<Vec<String>, UsersError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| UsersError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_users(path, &text)
}

/// Parses passwd-format `text`, naming it `source_name` in errors.
///
/// Comment lines (`#...`) and blank lines are skipped. Every other line must
/// have all seven colon-separated fields, even though only the name and UID
/// are used.
pub fn parse_users(source_name: impl AsRef<Path>, text: &str) -> Result<Vec<String>, UsersError> {
    let source_name = source_name.as_ref();
    let mut users = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() != 7 {
            return Err(UsersError::FieldCount {
                loc: Loc::line(source_name, i + 1),
                line: line.to_owned(),
            });
        }

        let uid: u32 = parts[2].parse().map_err(|_| UsersError::InvalidUid {
            loc: Loc::line(source_name, i + 1),
            uid: parts[2].to_owned(),
        })?;
        if uid >= FIRST_REGULAR_UID {
            users.push(parts[0].to_owned());
        }
    }

    tracing::debug!(source = %source_name.display(), count = users.len(), "parsed users");
    Ok(users)
}
