//! Role-based access control
//!
//! Each address holds an explicit set of roles.

use proofmint_core::{Address, ProofMintError, Role};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessControl {
    members: BTreeMap<Address, BTreeSet<Role>>,
}

impl AccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(account)
            .map(|roles| roles.contains(&role))
            .unwrap_or(false)
    }

    /// Fail with an authorization error unless `account` holds `role`
    pub fn check_role(&self, role: Role, account: &Address) -> Result<()> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(ProofMintError::MissingRole {
                role,
                account: *account,
            })
        }
    }

    /// Returns true if the role was newly granted
    pub fn grant(&mut self, role: Role, account: Address) -> bool {
        self.members.entry(account).or_default().insert(role)
    }

    /// Returns true if the role was held and is now removed
    pub fn revoke(&mut self, role: Role, account: &Address) -> bool {
        let Some(roles) = self.members.get_mut(account) else {
            return false;
        };
        let removed = roles.remove(&role);
        if roles.is_empty() {
            self.members.remove(account);
        }
        removed
    }

    pub fn roles_of(&self, account: &Address) -> Vec<Role> {
        self.members
            .get(account)
            .map(|roles| roles.iter().copied().collect())
            .unwrap_or_default()
    }

    /// All accounts currently holding `role`
    pub fn members_of(&self, role: Role) -> Vec<Address> {
        self.members
            .iter()
            .filter(|(_, roles)| roles.contains(&role))
            .map(|(account, _)| *account)
            .collect()
    }
}
