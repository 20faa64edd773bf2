use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::utils::core::Loc;

/// What can go wrong while reading a passwd-style file.
#[derive(Error, Debug, Diagnostic)]
pub enum UsersError {
    #[error("cannot read users from {}", .path.display())]
    #[diagnostic(code(webutil::nix::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("users in /etc/passwd like files must have 7 parts ({loc}): {line}")]
    #[diagnostic(
        code(webutil::nix::field_count),
        help("Each entry is name:password:uid:gid:gecos:home:shell")
    )]
    FieldCount { loc: Loc, line: String },

    #[error("cannot convert UID '{uid}' to an integer from {loc}")]
    #[diagnostic(code(webutil::nix::uid))]
    InvalidUid { loc: Loc, uid: String },
}
