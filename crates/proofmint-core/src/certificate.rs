//! Certificate types and credential records
//!
//! A certificate type is a named template owned by the issuer that created
//! it. A certificate is one minted, non-transferable credential token that
//! references a certificate type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::address::Address;

/// Sequential identifier of a certificate type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateTypeId(pub u64);

impl std::fmt::Display for CertificateTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential identifier of a minted credential token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content hash of a credential's off-chain metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MetadataHash(pub [u8; 32]);

impl MetadataHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Display for MetadataHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for MetadataHash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix("0x").unwrap_or(s.trim());
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for MetadataHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for MetadataHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A credential template defined by an issuer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateType {
    /// Sequential id assigned at creation
    pub id: CertificateTypeId,

    /// Human-readable name (never empty)
    pub name: String,

    pub description: String,

    /// Address that created the type; the only one allowed to deactivate it
    pub issuer: Address,

    /// Credentials can only be minted against active types
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

/// A minted credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub token_id: TokenId,

    /// Address the credential was minted to
    pub recipient: Address,

    /// Issuer of record; the only address allowed to revoke
    pub issuer: Address,

    pub certificate_type_id: CertificateTypeId,

    /// Pointer to off-chain metadata (e.g. `ipfs://...`)
    pub token_uri: String,

    /// Hash of the off-chain metadata
    pub metadata_hash: MetadataHash,

    pub description: String,

    /// Mint time
    pub timestamp: DateTime<Utc>,

    pub is_revoked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_hash_hex() {
        let hash = MetadataHash::from_bytes([0x11; 32]);
        let rendered = hash.to_string();
        assert!(rendered.starts_with("0x"));
        assert_eq!(rendered.len(), 66);
        assert_eq!(rendered.parse::<MetadataHash>().unwrap(), hash);
        assert_eq!(rendered[2..].parse::<MetadataHash>().unwrap(), hash);
    }

    #[test]
    fn test_metadata_hash_rejects_wrong_length() {
        assert!("0x1234".parse::<MetadataHash>().is_err());
    }

    #[test]
    fn test_ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&TokenId(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&CertificateTypeId(3)).unwrap(), "3");
    }
}
