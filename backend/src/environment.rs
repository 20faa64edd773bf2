//! Deployment environments shared by the logger and configuration.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    #[default]
    Test,
    Prod,
}

impl Environment {
    /// Default `tracing` filter directive: everything from debug up in
    /// development, errors only under test, info and up in production.
    pub fn log_directive(self) -> &'static str {
        match self {
            Environment::Dev => "debug",
            Environment::Test => "error",
            Environment::Prod => "info",
        }
    }

    /// Production relies on syslog/journald to timestamp each line.
    pub fn log_timestamps(self) -> bool {
        self != Environment::Prod
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Dev => "dev",
            Environment::Test => "test",
            Environment::Prod => "prod",
        };
        f.write_str(name)
    }
}
