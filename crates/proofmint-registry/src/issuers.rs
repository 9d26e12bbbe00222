//! Issuer profiles, keyed by address. Profiles are never deleted.

use proofmint_core::{Address, IssuerProfile, ProofMintError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssuerRegistry {
    profiles: BTreeMap<Address, IssuerProfile>,
}

impl IssuerRegistry {
    pub fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ProofMintError::EmptyIssuerName);
        }
        Ok(())
    }

    /// Create or overwrite the profile; the issued counter restarts at zero
    pub fn upsert(&mut self, issuer: Address, profile: IssuerProfile) {
        self.profiles.insert(issuer, profile);
    }

    pub fn get(&self, issuer: &Address) -> Option<&IssuerProfile> {
        self.profiles.get(issuer)
    }

    pub fn record_issued(&mut self, issuer: &Address) {
        if let Some(profile) = self.profiles.get_mut(issuer) {
            profile.credentials_issued += 1;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &IssuerProfile)> {
        self.profiles.iter()
    }
}
