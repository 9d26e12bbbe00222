//! ProofMint Core
//!
//! Core domain types for the ProofMint soulbound credential registry.
//! This crate defines the records, identifiers, events and error taxonomy
//! shared by the registry, the store, the HTTP server and the CLI.

pub mod address;
pub mod certificate;
pub mod error;
pub mod event;
pub mod issuer;
pub mod role;

pub use address::Address;
pub use certificate::{Certificate, CertificateType, CertificateTypeId, MetadataHash, TokenId};
pub use error::{ErrorKind, ProofMintError};
pub use event::{EventRecord, RegistryEvent};
pub use issuer::IssuerProfile;
pub use role::Role;
