//! Certificate type registry
//!
//! Types are append-only: ids are dense and sequential, and a type can only
//! move from active to inactive.

use chrono::Utc;
use proofmint_core::{Address, CertificateType, CertificateTypeId, ProofMintError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateTypeRegistry {
    types: Vec<CertificateType>,
    by_issuer: BTreeMap<Address, Vec<CertificateTypeId>>,
}

impl CertificateTypeRegistry {
    pub fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ProofMintError::EmptyCertificateTypeName);
        }
        Ok(())
    }

    /// Id the next created type will receive
    pub fn next_id(&self) -> CertificateTypeId {
        CertificateTypeId(self.types.len() as u64)
    }

    pub fn create(
        &mut self,
        issuer: Address,
        name: String,
        description: String,
    ) -> CertificateTypeId {
        let id = self.next_id();
        self.types.push(CertificateType {
            id,
            name,
            description,
            issuer,
            is_active: true,
            created_at: Utc::now(),
        });
        self.by_issuer.entry(issuer).or_default().push(id);
        id
    }

    pub fn get(&self, id: CertificateTypeId) -> Result<&CertificateType> {
        usize::try_from(id.0)
            .ok()
            .and_then(|idx| self.types.get(idx))
            .ok_or(ProofMintError::UnknownCertificateType(id))
    }

    /// Fail unless the type exists and is active
    pub fn ensure_active(&self, id: CertificateTypeId) -> Result<&CertificateType> {
        let cert_type = self.get(id)?;
        if !cert_type.is_active {
            return Err(ProofMintError::InactiveCertificateType(id));
        }
        Ok(cert_type)
    }

    /// Check that `caller` may deactivate `id`; returns whether it is still active
    pub fn check_deactivate(&self, caller: &Address, id: CertificateTypeId) -> Result<bool> {
        let cert_type = self.get(id)?;
        if cert_type.issuer != *caller {
            return Err(ProofMintError::NotTypeCreator(id));
        }
        Ok(cert_type.is_active)
    }

    pub fn deactivate(&mut self, id: CertificateTypeId) {
        let slot = usize::try_from(id.0).ok().and_then(|idx| self.types.get_mut(idx));
        if let Some(cert_type) = slot {
            cert_type.is_active = false;
        }
    }

    pub fn of_issuer(&self, issuer: &Address) -> Vec<CertificateTypeId> {
        self.by_issuer.get(issuer).cloned().unwrap_or_default()
    }

    pub fn total(&self) -> u64 {
        self.types.len() as u64
    }
}
