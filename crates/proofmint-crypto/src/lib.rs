//! ProofMint Crypto
//!
//! Hash helpers used around the credential registry: Keccak-256 metadata
//! hashes, role identifiers and address derivation from public keys.

pub mod hash;

pub use hash::{
    address_from_public_key, keccak256, metadata_hash, metadata_hash_json, role_id, CryptoError,
};
