use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DbError {
    #[error("error reading MySQL script {}", .path.display())]
    #[diagnostic(code(webutil::db::script))]
    Script {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot run the `mysql` client")]
    #[diagnostic(
        code(webutil::db::client),
        help("Install the MySQL command line client and make sure it is in $PATH")
    )]
    Spawn(#[source] io::Error),

    #[error(
        "error creating database {database} from schema (exit code {code}):\n{stdout}\n{stderr}"
    )]
    #[diagnostic(code(webutil::db::schema))]
    Schema {
        database: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("invalid database address {address:?}")]
    #[diagnostic(
        code(webutil::db::address),
        help("Use `host`, `host:port` or `[ipv6]:port`")
    )]
    Address { address: String },

    #[error("cannot connect to {dsn}")]
    #[diagnostic(
        code(webutil::db::connect),
        help("Check that the server is running and the credentials are right")
    )]
    Connect {
        dsn: String,
        #[source]
        source: sqlx::Error,
    },
}
