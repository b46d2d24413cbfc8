use serde::{Deserialize, Serialize};

use crate::error::{BuilderxError, Result};
use crate::mapping::ScanMode;

/// Environment variable naming the driver; defaults to `postgres`.
pub const DRIVER_ENV: &str = "BUILDERX_DRIVER";
/// Environment variable holding the connection string.
pub const DSN_ENV: &str = "DATABASE_URL";

fn default_driver() -> String {
    "postgres".to_string()
}

/// Everything needed to open a [`Database`](crate::Database).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// Driver identifier, e.g. `postgres`.
    #[serde(default = "default_driver")]
    pub driver: String,
    /// Driver-specific connection string.
    pub dsn: String,
    #[serde(default)]
    pub scan_mode: ScanMode,
}

impl ConnectConfig {
    pub fn new(driver: impl Into<String>, dsn: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            dsn: dsn.into(),
            scan_mode: ScanMode::default(),
        }
    }

    pub fn with_scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }

    /// Reads `BUILDERX_DRIVER` and `DATABASE_URL`.
    pub fn from_env() -> Result<Self> {
        let dsn = std::env::var(DSN_ENV)
            .map_err(|_| BuilderxError::Connect(format!("{} is not set", DSN_ENV)))?;
        let driver = std::env::var(DRIVER_ENV).unwrap_or_else(|_| default_driver());
        Ok(Self::new(driver, dsn))
    }
}
