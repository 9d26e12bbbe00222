//! Access-control roles

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A capability an address can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Can grant and revoke every role
    DefaultAdmin,
    /// Can create certificate types and mint credentials
    Issuer,
    /// Can pause and unpause minting
    Pauser,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::DefaultAdmin, Role::Issuer, Role::Pauser];

    /// Canonical role name, as used to derive the role identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::DefaultAdmin => "DEFAULT_ADMIN_ROLE",
            Role::Issuer => "ISSUER_ROLE",
            Role::Pauser => "PAUSER_ROLE",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default_admin" | "default_admin_role" | "admin" => Ok(Role::DefaultAdmin),
            "issuer" | "issuer_role" => Ok(Role::Issuer),
            "pauser" | "pauser_role" => Ok(Role::Pauser),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_names() {
        assert_eq!("issuer".parse::<Role>().unwrap(), Role::Issuer);
        assert_eq!("PAUSER_ROLE".parse::<Role>().unwrap(), Role::Pauser);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::DefaultAdmin);
        assert!("minter".parse::<Role>().is_err());
    }
}
