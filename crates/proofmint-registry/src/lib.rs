//! ProofMint Registry
//!
//! The soulbound credential registry: issuers register, define certificate
//! types and mint non-transferable credential tokens; anyone can verify them.
//!
//! Every mutating operation takes the caller's address explicitly and either
//! applies all of its effects or none of them.

pub mod access;
pub mod certificate_types;
pub mod guard;
pub mod issuers;
pub mod journal;
pub mod ledger;
pub mod registry;

pub use access::AccessControl;
pub use guard::TokenOwnership;
pub use journal::EventJournal;
pub use registry::{CredentialRegistry, MintRequest, DEFAULT_NAME, DEFAULT_SYMBOL};

/// Result alias for registry operations
pub type Result<T> = std::result::Result<T, proofmint_core::ProofMintError>;
