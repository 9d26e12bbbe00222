//! Credential ledger
//!
//! One record per minted token. Records are immutable except for the
//! revocation flag and are never removed, even after a burn.

use proofmint_core::{Address, Certificate, ProofMintError, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialLedger {
    certificates: Vec<Certificate>,
    by_recipient: BTreeMap<Address, Vec<TokenId>>,
    by_issuer: BTreeMap<Address, Vec<TokenId>>,
}

impl CredentialLedger {
    /// Token id the next mint will receive
    pub fn next_token_id(&self) -> TokenId {
        TokenId(self.certificates.len() as u64)
    }

    /// Append a certificate. The caller assigns `token_id` from [`Self::next_token_id`].
    pub fn record(&mut self, certificate: Certificate) {
        debug_assert_eq!(certificate.token_id, self.next_token_id());
        self.by_recipient
            .entry(certificate.recipient)
            .or_default()
            .push(certificate.token_id);
        self.by_issuer
            .entry(certificate.issuer)
            .or_default()
            .push(certificate.token_id);
        self.certificates.push(certificate);
    }

    pub fn get(&self, token_id: TokenId) -> Option<&Certificate> {
        usize::try_from(token_id.0)
            .ok()
            .and_then(|idx| self.certificates.get(idx))
    }

    /// Check that `caller` may revoke `token_id`
    pub fn check_revoke(&self, caller: &Address, token_id: TokenId) -> Result<()> {
        let certificate = self.get(token_id).ok_or(ProofMintError::UnknownToken(token_id))?;
        if certificate.issuer != *caller {
            return Err(ProofMintError::NotCredentialIssuer(token_id));
        }
        if certificate.is_revoked {
            return Err(ProofMintError::AlreadyRevoked(token_id));
        }
        Ok(())
    }

    pub fn revoke(&mut self, token_id: TokenId) {
        if let Some(certificate) = usize::try_from(token_id.0)
            .ok()
            .and_then(|idx| self.certificates.get_mut(idx))
        {
            certificate.is_revoked = true;
        }
    }

    pub fn of_recipient(&self, recipient: &Address) -> Vec<TokenId> {
        self.by_recipient.get(recipient).cloned().unwrap_or_default()
    }

    pub fn of_issuer(&self, issuer: &Address) -> Vec<TokenId> {
        self.by_issuer.get(issuer).cloned().unwrap_or_default()
    }

    /// Number of tokens ever minted
    pub fn total(&self) -> u64 {
        self.certificates.len() as u64
    }
}
