//! Registry events
//!
//! Every successful state change appends one or more events to the
//! registry's journal, in the order they happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::certificate::{CertificateTypeId, TokenId};
use crate::role::Role;

/// An event emitted by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum RegistryEvent {
    IssuerRegistered {
        issuer: Address,
        name: String,
    },

    CertificateTypeCreated {
        certificate_type_id: CertificateTypeId,
        issuer: Address,
        name: String,
    },

    CertificateTypeDeactivated {
        certificate_type_id: CertificateTypeId,
        issuer: Address,
    },

    CertificateMinted {
        token_id: TokenId,
        recipient: Address,
        issuer: Address,
        certificate_type_id: CertificateTypeId,
    },

    CertificateRevoked {
        token_id: TokenId,
        issuer: Address,
        reason: String,
    },

    /// Ownership change; only ever from or to the zero address
    Transfer {
        from: Address,
        to: Address,
        token_id: TokenId,
    },

    RoleGranted {
        role: Role,
        account: Address,
        sender: Address,
    },

    RoleRevoked {
        role: Role,
        account: Address,
        sender: Address,
    },

    Paused {
        account: Address,
    },

    Unpaused {
        account: Address,
    },
}

impl RegistryEvent {
    /// Event name as exposed to clients
    pub fn name(&self) -> &'static str {
        match self {
            RegistryEvent::IssuerRegistered { .. } => "IssuerRegistered",
            RegistryEvent::CertificateTypeCreated { .. } => "CertificateTypeCreated",
            RegistryEvent::CertificateTypeDeactivated { .. } => "CertificateTypeDeactivated",
            RegistryEvent::CertificateMinted { .. } => "CertificateMinted",
            RegistryEvent::CertificateRevoked { .. } => "CertificateRevoked",
            RegistryEvent::Transfer { .. } => "Transfer",
            RegistryEvent::RoleGranted { .. } => "RoleGranted",
            RegistryEvent::RoleRevoked { .. } => "RoleRevoked",
            RegistryEvent::Paused { .. } => "Paused",
            RegistryEvent::Unpaused { .. } => "Unpaused",
        }
    }
}

/// A journaled event with its sequence number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotonic sequence number, starting at 0
    pub seq: u64,

    pub emitted_at: DateTime<Utc>,

    #[serde(flatten)]
    pub event: RegistryEvent,
}
