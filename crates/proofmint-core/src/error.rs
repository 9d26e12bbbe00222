//! Error types for ProofMint

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::Address;
use crate::certificate::{CertificateTypeId, TokenId};
use crate::role::Role;

/// Broad class of a rejected operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller lacks a capability or is not the owner/creator of the record
    Authorization,
    /// Malformed input or a reference to an unknown/inactive record
    Validation,
    /// Operation not allowed in the current state (paused, soulbound, revoked)
    State,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Authorization => "authorization_error",
            ErrorKind::Validation => "validation_error",
            ErrorKind::State => "state_error",
        }
    }
}

/// Main error type for registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofMintError {
    #[error("Account {account} is missing role {role}")]
    MissingRole { role: Role, account: Address },

    #[error("Only the creator can deactivate certificate type {0}")]
    NotTypeCreator(CertificateTypeId),

    #[error("Only the issuer can revoke credential {0}")]
    NotCredentialIssuer(TokenId),

    #[error("Caller is not the owner of token {0}")]
    NotTokenOwner(TokenId),

    #[error("Name cannot be empty")]
    EmptyIssuerName,

    #[error("Certificate type name cannot be empty")]
    EmptyCertificateTypeName,

    #[error("Certificate type does not exist: {0}")]
    UnknownCertificateType(CertificateTypeId),

    #[error("Certificate type is not active: {0}")]
    InactiveCertificateType(CertificateTypeId),

    #[error("Token does not exist: {0}")]
    UnknownToken(TokenId),

    #[error("Zero address is not a valid account")]
    ZeroAddress,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Registry is paused")]
    Paused,

    #[error("Registry is not paused")]
    NotPaused,

    #[error("TransferNotAllowed: credentials are soulbound")]
    TransferNotAllowed,

    #[error("Credential already revoked: {0}")]
    AlreadyRevoked(TokenId),
}

impl ProofMintError {
    /// The taxonomy class this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProofMintError::MissingRole { .. }
            | ProofMintError::NotTypeCreator(_)
            | ProofMintError::NotCredentialIssuer(_)
            | ProofMintError::NotTokenOwner(_) => ErrorKind::Authorization,

            ProofMintError::EmptyIssuerName
            | ProofMintError::EmptyCertificateTypeName
            | ProofMintError::UnknownCertificateType(_)
            | ProofMintError::InactiveCertificateType(_)
            | ProofMintError::UnknownToken(_)
            | ProofMintError::ZeroAddress
            | ProofMintError::InvalidAddress(_) => ErrorKind::Validation,

            ProofMintError::Paused
            | ProofMintError::NotPaused
            | ProofMintError::TransferNotAllowed
            | ProofMintError::AlreadyRevoked(_) => ErrorKind::State,
        }
    }

    /// Whether the error refers to a record that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProofMintError::UnknownCertificateType(_) | ProofMintError::UnknownToken(_)
        )
    }
}
