//! Server configuration
//!
//! Read from the environment (a `.env` file is loaded first by the binaries).

use proofmint_core::Address;
use proofmint_registry::{DEFAULT_NAME, DEFAULT_SYMBOL};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// ProofMint server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind (`PROOFMINT_BIND`)
    pub bind: String,

    /// Collection name (`PROOFMINT_NAME`)
    pub name: String,

    /// Collection symbol (`PROOFMINT_SYMBOL`)
    pub symbol: String,

    /// Deployer address that receives the admin and pauser roles on a fresh
    /// registry (`PROOFMINT_ADMIN`). Ignored when a snapshot is restored.
    pub admin: Option<Address>,

    /// Snapshot file; in-memory only when unset (`PROOFMINT_SNAPSHOT_PATH`)
    pub snapshot_path: Option<PathBuf>,

    /// Comma-separated allowed origins, or `*` (`PROOFMINT_CORS_ORIGINS`)
    pub cors_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            admin: None,
            snapshot_path: None,
            cors_origins: "*".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();

        let admin = match std::env::var("PROOFMINT_ADMIN") {
            Ok(value) if !value.trim().is_empty() => {
                Some(value.parse().map_err(|e: proofmint_core::ProofMintError| {
                    ConfigError::Invalid {
                        var: "PROOFMINT_ADMIN",
                        reason: e.to_string(),
                    }
                })?)
            }
            _ => None,
        };

        Ok(Self {
            bind: std::env::var("PROOFMINT_BIND").unwrap_or(default.bind),
            name: std::env::var("PROOFMINT_NAME").unwrap_or(default.name),
            symbol: std::env::var("PROOFMINT_SYMBOL").unwrap_or(default.symbol),
            admin,
            snapshot_path: std::env::var("PROOFMINT_SNAPSHOT_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            cors_origins: std::env::var("PROOFMINT_CORS_ORIGINS").unwrap_or(default.cors_origins),
        })
    }

    /// Configuration with a fixed admin and no persistence
    pub fn with_admin(admin: Address) -> Self {
        Self {
            admin: Some(admin),
            ..Default::default()
        }
    }
}
