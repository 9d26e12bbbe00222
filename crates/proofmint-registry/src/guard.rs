//! Token ownership and the soulbound transfer guard
//!
//! Every ownership change goes through [`TokenOwnership::before_update`].
//! Only mint (from the zero address) and burn (to the zero address) pass;
//! any other movement is rejected with `TransferNotAllowed`.

use proofmint_core::{Address, ProofMintError, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenOwnership {
    owners: BTreeMap<TokenId, Address>,
    balances: BTreeMap<Address, u64>,
}

impl TokenOwnership {
    /// Guard hook run before any ownership change
    pub fn before_update(from: &Address, to: &Address, _token_id: TokenId) -> Result<()> {
        if from.is_zero() || to.is_zero() {
            return Ok(());
        }
        Err(ProofMintError::TransferNotAllowed)
    }

    /// Approvals would only authorize a future transfer, so they are refused outright
    pub fn before_approval() -> Result<()> {
        Err(ProofMintError::TransferNotAllowed)
    }

    /// Assign a freshly minted token
    pub fn mint(&mut self, to: Address, token_id: TokenId) -> Result<()> {
        if to.is_zero() {
            return Err(ProofMintError::ZeroAddress);
        }
        Self::before_update(&Address::ZERO, &to, token_id)?;
        self.owners.insert(token_id, to);
        *self.balances.entry(to).or_insert(0) += 1;
        Ok(())
    }

    /// Move a token to the zero address; returns its former owner
    pub fn burn(&mut self, token_id: TokenId) -> Result<Address> {
        let owner = self.owner_of(token_id)?;
        Self::before_update(&owner, &Address::ZERO, token_id)?;
        self.owners.remove(&token_id);
        if let Some(balance) = self.balances.get_mut(&owner) {
            *balance -= 1;
            if *balance == 0 {
                self.balances.remove(&owner);
            }
        }
        Ok(owner)
    }

    /// Caller-initiated transfer. Mint and burn have their own paths, so this
    /// never changes ownership, even with a zero endpoint.
    pub fn transfer(&self, _from: &Address, _to: &Address, _token_id: TokenId) -> Result<()> {
        Err(ProofMintError::TransferNotAllowed)
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<Address> {
        self.owners
            .get(&token_id)
            .copied()
            .ok_or(ProofMintError::UnknownToken(token_id))
    }

    pub fn exists(&self, token_id: TokenId) -> bool {
        self.owners.contains_key(&token_id)
    }

    pub fn balance_of(&self, owner: &Address) -> Result<u64> {
        if owner.is_zero() {
            return Err(ProofMintError::ZeroAddress);
        }
        Ok(self.balances.get(owner).copied().unwrap_or(0))
    }
}
