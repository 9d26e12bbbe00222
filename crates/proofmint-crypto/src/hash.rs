//! Hash functions for ProofMint
//!
//! Keccak-256 is the content hash for off-chain credential metadata and the
//! basis of role identifiers and addresses.

use proofmint_core::{Address, MetadataHash, Role};
use sha3::{Digest, Keccak256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid public key length: expected 64 or 65 bytes, got {0}")]
    InvalidPublicKeyLength(usize),

    #[error("Uncompressed public key must start with 0x04")]
    InvalidPublicKeyPrefix,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        CryptoError::Serialization(err.to_string())
    }
}

/// Compute Keccak-256 hash (pre-standard SHA3 padding)
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash raw metadata bytes into a [`MetadataHash`]
pub fn metadata_hash(data: &[u8]) -> MetadataHash {
    MetadataHash::from_bytes(keccak256(data))
}

/// Hash a JSON metadata document in its compact serialized form
pub fn metadata_hash_json(value: &serde_json::Value) -> Result<MetadataHash, CryptoError> {
    let bytes = serde_json::to_vec(value)?;
    Ok(metadata_hash(&bytes))
}

/// 32-byte identifier of a role.
///
/// The admin role is all zeroes; every other role is the Keccak-256 of its name.
pub fn role_id(role: Role) -> [u8; 32] {
    match role {
        Role::DefaultAdmin => [0u8; 32],
        other => keccak256(other.as_str().as_bytes()),
    }
}

/// Derive an account address from an uncompressed secp256k1 public key.
///
/// Accepts the 65-byte SEC1 form (`0x04 || x || y`) or the bare 64-byte `x || y`.
/// The address is the last 20 bytes of the Keccak-256 of `x || y`.
pub fn address_from_public_key(public_key: &[u8]) -> Result<Address, CryptoError> {
    let xy = match public_key.len() {
        64 => public_key,
        65 => {
            if public_key[0] != 0x04 {
                return Err(CryptoError::InvalidPublicKeyPrefix);
            }
            &public_key[1..]
        }
        other => return Err(CryptoError::InvalidPublicKeyLength(other)),
    };

    let digest = keccak256(xy);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    Ok(Address::from_bytes(bytes))
}
