//! Issuer types for ProofMint
//!
//! Issuers are organizations that define certificate types and mint
//! credentials to recipients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization profile attached to an issuer address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerProfile {
    /// Organization name (never empty)
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Number of credentials minted since the last registration
    pub credentials_issued: u64,

    /// When the issuer (re-)registered
    pub registered_at: DateTime<Utc>,
}

impl IssuerProfile {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            credentials_issued: 0,
            registered_at: Utc::now(),
        }
    }
}
