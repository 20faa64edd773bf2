use std::time::Duration;

use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::db::core::DbConfig;
use crate::db::error::DbError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3306;
const COLLATION: &str = "utf8mb4_general_ci";

/// How long [`connect`] waits for the first connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens a connection pool to the configured database and pings it once.
pub async fn connect(config: &DbConfig) -> Result<MySqlPool, DbError> {
    connect_with_timeout(config, CONNECT_TIMEOUT).await
}

pub async fn connect_with_timeout(
    config: &DbConfig,
    timeout: Duration,
) -> Result<MySqlPool, DbError> {
    let options = connect_options(config)?;
    let dsn = config.masked_dsn();
    tracing::info!(%dsn, "connecting to database");

    let connect_err = |source| DbError::Connect {
        dsn: dsn.clone(),
        source,
    };
    let pool = MySqlPoolOptions::new()
        .acquire_timeout(timeout)
        .connect_with(options)
        .await
        .map_err(connect_err)?;
    let mut conn = pool.acquire().await.map_err(connect_err)?;
    conn.ping().await.map_err(connect_err)?;

    tracing::debug!(%dsn, "database answered ping");
    Ok(pool)
}

/// Driver options equivalent to [`DbConfig::dsn`].
pub fn connect_options(config: &DbConfig) -> Result<MySqlConnectOptions, DbError> {
    let (host, port) = split_address(&config.address)?;
    Ok(MySqlConnectOptions::new()
        .host(host)
        .port(port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.db_name)
        .collation(COLLATION))
}

/// `host`, `host:port`, `[v6]:port` or a bare IPv6 address. Empty means the
/// local default.
fn split_address(address: &str) -> Result<(&str, u16), DbError> {
    let invalid = || DbError::Address {
        address: address.to_owned(),
    };

    if address.is_empty() {
        return Ok((DEFAULT_HOST, DEFAULT_PORT));
    }
    if let Some(rest) = address.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(invalid)?;
        return match tail {
            "" => Ok((host, DEFAULT_PORT)),
            _ => {
                let port = tail.strip_prefix(':').ok_or_else(invalid)?;
                Ok((host, port.parse().map_err(|_| invalid())?))
            }
        };
    }
    match address.split_once(':') {
        None => Ok((address, DEFAULT_PORT)),
        // more than one colon: an unbracketed IPv6 address
        Some((_, rest)) if rest.contains(':') => Ok((address, DEFAULT_PORT)),
        Some(("", _)) => Err(invalid()),
        Some((host, port)) => Ok((host, port.parse().map_err(|_| invalid())?)),
    }
}
