use std::fs::File;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::db::core::DbConfig;
use crate::db::error::DbError;

const MYSQL_CLIENT: &str = "mysql";

/// Runs `script` against `config.db_name` with the `mysql` command line
/// client, feeding the script on standard input.
pub fn apply_schema(config: &DbConfig, script: &Path) -> Result<(), DbError> {
    apply_schema_with(MYSQL_CLIENT, config, script)
}

/// Creates an empty `<db_name>_test` database from `script` and returns the
/// settings to connect to it.
pub fn setup_testing_database(config: &DbConfig, script: &Path) -> Result<DbConfig, DbError> {
    let test_config = config.for_testing();
    apply_schema(&test_config, script)?;
    Ok(test_config)
}

fn apply_schema_with(client: &str, config: &DbConfig, script: &Path) -> Result<(), DbError> {
    let input = File::open(script).map_err(|source| DbError::Script {
        path: script.to_path_buf(),
        source,
    })?;

    tracing::info!(database = %config.db_name, script = %script.display(), "applying schema");
    let Output { status, stdout, stderr } = Command::new(client)
        .arg(&config.db_name)
        .stdin(Stdio::from(input))
        .output()
        .map_err(DbError::Spawn)?;

    if status.success() {
        Ok(())
    } else {
        Err(DbError::Schema {
            database: config.db_name.clone(),
            code: status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&stdout).into(),
            stderr: String::from_utf8_lossy(&stderr).into(),
        })
    }
}
