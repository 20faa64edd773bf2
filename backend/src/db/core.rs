use std::fmt;

use serde::Deserialize;

const MASKED_PASSWORD: &str = "*****";

/// Connection settings for the MySQL database.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbConfig {
    /// MySQL user to log in as.
    pub username: String,
    pub password: String,
    /// Either `localhost` or an IP such as `192.168.1.100`, optionally with a port.
    pub address: String,
    pub db_name: String,
}

impl DbConfig {
    /// The full DSN, password included.
    ///
    /// Connection parameters:
    /// - `collation` sets the charset without the extra queries `charset` costs
    /// - `parseTime` returns DATE and DATETIME columns as time values
    /// - `interpolateParams` saves round trips for `?` placeholders
    pub fn dsn(&self) -> String {
        build_dsn(&self.username, &self.password, &self.address, &self.db_name)
    }

    /// The DSN with the password masked, safe to log.
    pub fn masked_dsn(&self) -> String {
        build_dsn(&self.username, MASKED_PASSWORD, &self.address, &self.db_name)
    }

    /// A copy pointing at `<db_name>_test`, so tests never touch real data.
    pub fn for_testing(&self) -> Self {
        Self {
            db_name: format!("{}_test", self.db_name),
            ..self.clone()
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("username", &self.username)
            .field("password", &MASKED_PASSWORD)
            .field("address", &self.address)
            .field("db_name", &self.db_name)
            .finish()
    }
}

fn build_dsn(username: &str, password: &str, address: &str, db_name: &str) -> String {
    format!(
        "{username}:{password}@tcp({address})/{db_name}?{}{}{}",
        "collation=utf8mb4_general_ci&", "parseTime=true&", "interpolateParams=true"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DbConfig {
        DbConfig {
            username: "web".into(),
            password: "hunter2".into(),
            address: "localhost:3306".into(),
            db_name: "shop".into(),
        }
    }

    #[test]
    fn full_dsn() {
        assert_eq!(
            config().dsn(),
            "web:hunter2@tcp(localhost:3306)/shop?collation=utf8mb4_general_ci&parseTime=true&interpolateParams=true"
        );
    }

    #[test]
    fn masked_dsn_hides_password() {
        let dsn = config().masked_dsn();
        assert!(dsn.starts_with("web:*****@tcp(localhost:3306)/shop?"));
        assert!(!dsn.contains("hunter2"));
        assert!(!format!("{:?}", config()).contains("hunter2"));
    }

    #[test]
    fn testing_database_name() {
        let test = config().for_testing();
        assert_eq!(test.db_name, "shop_test");
        assert_eq!(test.username, "web");
    }

    #[test]
    fn from_json() {
        let cfg: DbConfig = serde_json::from_str(
            r#"{ "username": "web", "password": "hunter2", "address": "localhost:3306", "db_name": "shop" }"#,
        )
        .unwrap();
        assert_eq!(cfg, config());
    }
}
