//! The credential registry
//!
//! [`CredentialRegistry`] combines access control, issuer profiles,
//! certificate types, the credential ledger and the soulbound transfer guard
//! behind one API. Each mutating method runs all of its checks before it
//! touches any state.

use chrono::Utc;
use proofmint_core::{
    Address, Certificate, CertificateType, CertificateTypeId, EventRecord, IssuerProfile,
    MetadataHash, ProofMintError, RegistryEvent, Role, TokenId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::access::AccessControl;
use crate::certificate_types::CertificateTypeRegistry;
use crate::guard::TokenOwnership;
use crate::issuers::IssuerRegistry;
use crate::journal::EventJournal;
use crate::ledger::CredentialLedger;
use crate::Result;

pub const DEFAULT_NAME: &str = "ProofMint Credentials";
pub const DEFAULT_SYMBOL: &str = "PROOF";

/// Parameters of a mint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintRequest {
    pub recipient: Address,
    pub certificate_type_id: CertificateTypeId,
    pub token_uri: String,
    pub metadata_hash: MetadataHash,
    #[serde(default)]
    pub description: String,
}

/// Access-controlled, non-transferable credential registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRegistry {
    name: String,
    symbol: String,
    paused: bool,
    access: AccessControl,
    issuers: IssuerRegistry,
    certificate_types: CertificateTypeRegistry,
    ledger: CredentialLedger,
    tokens: TokenOwnership,
    journal: EventJournal,
}

impl CredentialRegistry {
    /// Create a registry; `admin` receives the admin and pauser roles
    pub fn new(admin: Address) -> Self {
        Self::with_metadata(admin, DEFAULT_NAME, DEFAULT_SYMBOL)
    }

    pub fn with_metadata(
        admin: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        let mut registry = Self {
            name: name.into(),
            symbol: symbol.into(),
            paused: false,
            access: AccessControl::new(),
            issuers: IssuerRegistry::default(),
            certificate_types: CertificateTypeRegistry::default(),
            ledger: CredentialLedger::default(),
            tokens: TokenOwnership::default(),
            journal: EventJournal::default(),
        };

        for role in [Role::DefaultAdmin, Role::Pauser] {
            registry.access.grant(role, admin);
            registry.journal.emit(RegistryEvent::RoleGranted {
                role,
                account: admin,
                sender: admin,
            });
        }

        registry
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    // ── Access control ──────────────────────────────────────────

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.access.has_role(role, account)
    }

    pub fn roles_of(&self, account: &Address) -> Vec<Role> {
        self.access.roles_of(account)
    }

    /// Every account currently holding `role`, in address order
    pub fn role_members(&self, role: Role) -> Vec<Address> {
        self.access.members_of(role)
    }

    /// Grant `role` to `account`. Requires the caller to be an admin.
    pub fn grant_role(&mut self, caller: Address, role: Role, account: Address) -> Result<()> {
        self.access.check_role(Role::DefaultAdmin, &caller)?;

        if self.access.grant(role, account) {
            info!(%role, %account, sender = %caller, "Role granted");
            self.journal.emit(RegistryEvent::RoleGranted {
                role,
                account,
                sender: caller,
            });
        }
        Ok(())
    }

    /// Revoke `role` from `account`. Requires the caller to be an admin.
    pub fn revoke_role(&mut self, caller: Address, role: Role, account: Address) -> Result<()> {
        self.access.check_role(Role::DefaultAdmin, &caller)?;
        self.remove_role(caller, role, account);
        Ok(())
    }

    /// Drop one of the caller's own roles
    pub fn renounce_role(&mut self, caller: Address, role: Role) {
        self.remove_role(caller, role, caller);
    }

    fn remove_role(&mut self, sender: Address, role: Role, account: Address) {
        if self.access.revoke(role, &account) {
            info!(%role, %account, %sender, "Role revoked");
            self.journal.emit(RegistryEvent::RoleRevoked {
                role,
                account,
                sender,
            });
        }
    }

    // ── Issuer registry ─────────────────────────────────────────

    /// Register (or re-register) the caller as an issuer
    pub fn register_issuer(
        &mut self,
        caller: Address,
        name: &str,
        description: &str,
    ) -> Result<()> {
        IssuerRegistry::validate_name(name)?;

        if self.access.grant(Role::Issuer, caller) {
            self.journal.emit(RegistryEvent::RoleGranted {
                role: Role::Issuer,
                account: caller,
                sender: caller,
            });
        }
        self.issuers.upsert(caller, IssuerProfile::new(name, description));
        self.journal.emit(RegistryEvent::IssuerRegistered {
            issuer: caller,
            name: name.to_string(),
        });

        info!(issuer = %caller, name, "Issuer registered");
        Ok(())
    }

    pub fn is_issuer(&self, account: &Address) -> bool {
        self.access.has_role(Role::Issuer, account)
    }

    pub fn issuer_profile(&self, account: &Address) -> Option<&IssuerProfile> {
        self.issuers.get(account)
    }

    pub fn issuer_profiles(&self) -> impl Iterator<Item = (&Address, &IssuerProfile)> {
        self.issuers.iter()
    }

    // ── Certificate types ───────────────────────────────────────

    pub fn create_certificate_type(
        &mut self,
        caller: Address,
        name: &str,
        description: &str,
    ) -> Result<CertificateTypeId> {
        self.access.check_role(Role::Issuer, &caller)?;
        CertificateTypeRegistry::validate_name(name)?;

        let id = self
            .certificate_types
            .create(caller, name.to_string(), description.to_string());
        self.journal.emit(RegistryEvent::CertificateTypeCreated {
            certificate_type_id: id,
            issuer: caller,
            name: name.to_string(),
        });

        info!(%id, issuer = %caller, name, "Certificate type created");
        Ok(id)
    }

    /// Retire a certificate type. Only its creator may do this; there is no way back.
    pub fn deactivate_certificate_type(
        &mut self,
        caller: Address,
        id: CertificateTypeId,
    ) -> Result<()> {
        let was_active = self.certificate_types.check_deactivate(&caller, id)?;
        if !was_active {
            debug!(%id, "Certificate type already inactive");
            return Ok(());
        }

        self.certificate_types.deactivate(id);
        self.journal.emit(RegistryEvent::CertificateTypeDeactivated {
            certificate_type_id: id,
            issuer: caller,
        });

        info!(%id, issuer = %caller, "Certificate type deactivated");
        Ok(())
    }

    pub fn get_certificate_type(&self, id: CertificateTypeId) -> Result<&CertificateType> {
        self.certificate_types.get(id)
    }

    pub fn get_issuer_certificate_types(&self, issuer: &Address) -> Vec<CertificateTypeId> {
        self.certificate_types.of_issuer(issuer)
    }

    pub fn total_certificate_types(&self) -> u64 {
        self.certificate_types.total()
    }

    // ── Credential ledger ───────────────────────────────────────

    pub fn mint_credential(&mut self, caller: Address, request: MintRequest) -> Result<TokenId> {
        self.access.check_role(Role::Issuer, &caller)?;
        if self.paused {
            return Err(ProofMintError::Paused);
        }
        if request.recipient.is_zero() {
            return Err(ProofMintError::ZeroAddress);
        }
        self.certificate_types
            .ensure_active(request.certificate_type_id)?;

        let token_id = self.ledger.next_token_id();
        self.tokens.mint(request.recipient, token_id)?;

        self.ledger.record(Certificate {
            token_id,
            recipient: request.recipient,
            issuer: caller,
            certificate_type_id: request.certificate_type_id,
            token_uri: request.token_uri,
            metadata_hash: request.metadata_hash,
            description: request.description,
            timestamp: Utc::now(),
            is_revoked: false,
        });
        self.issuers.record_issued(&caller);

        self.journal.emit(RegistryEvent::Transfer {
            from: Address::ZERO,
            to: request.recipient,
            token_id,
        });
        self.journal.emit(RegistryEvent::CertificateMinted {
            token_id,
            recipient: request.recipient,
            issuer: caller,
            certificate_type_id: request.certificate_type_id,
        });

        info!(
            %token_id,
            recipient = %request.recipient,
            issuer = %caller,
            certificate_type_id = %request.certificate_type_id,
            "Credential minted"
        );
        Ok(token_id)
    }

    /// Revoke a credential. Only its issuer of record may do this; revocation is terminal.
    pub fn revoke_credential(
        &mut self,
        caller: Address,
        token_id: TokenId,
        reason: &str,
    ) -> Result<()> {
        self.ledger.check_revoke(&caller, token_id)?;

        self.ledger.revoke(token_id);
        self.journal.emit(RegistryEvent::CertificateRevoked {
            token_id,
            issuer: caller,
            reason: reason.to_string(),
        });

        info!(%token_id, issuer = %caller, reason, "Credential revoked");
        Ok(())
    }

    /// Burn a credential. Only its current owner may do this; the record is kept.
    pub fn burn(&mut self, caller: Address, token_id: TokenId) -> Result<()> {
        let owner = self.tokens.owner_of(token_id)?;
        if owner != caller {
            return Err(ProofMintError::NotTokenOwner(token_id));
        }

        self.tokens.burn(token_id)?;
        self.journal.emit(RegistryEvent::Transfer {
            from: owner,
            to: Address::ZERO,
            token_id,
        });

        info!(%token_id, %owner, "Credential burned");
        Ok(())
    }

    /// True iff the token is live (minted, not burned) and not revoked
    pub fn is_valid_credential(&self, token_id: TokenId) -> bool {
        self.tokens.exists(token_id)
            && self
                .ledger
                .get(token_id)
                .map(|certificate| !certificate.is_revoked)
                .unwrap_or(false)
    }

    pub fn get_certificate(&self, token_id: TokenId) -> Option<&Certificate> {
        self.ledger.get(token_id)
    }

    pub fn get_recipient_credentials(&self, recipient: &Address) -> Vec<TokenId> {
        self.ledger.of_recipient(recipient)
    }

    pub fn get_issuer_credentials(&self, issuer: &Address) -> Vec<TokenId> {
        self.ledger.of_issuer(issuer)
    }

    pub fn token_uri(&self, token_id: TokenId) -> Result<&str> {
        self.tokens.owner_of(token_id)?;
        self.ledger
            .get(token_id)
            .map(|certificate| certificate.token_uri.as_str())
            .ok_or(ProofMintError::UnknownToken(token_id))
    }

    /// Number of tokens ever minted; burns do not decrease it
    pub fn total_supply(&self) -> u64 {
        self.ledger.total()
    }

    // ── Token ownership / transfer guard ────────────────────────

    pub fn owner_of(&self, token_id: TokenId) -> Result<Address> {
        self.tokens.owner_of(token_id)
    }

    pub fn balance_of(&self, owner: &Address) -> Result<u64> {
        self.tokens.balance_of(owner)
    }

    /// Always rejected: credentials never move between holders
    pub fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<()> {
        debug!(%caller, %from, %to, %token_id, "Transfer attempt rejected");
        self.tokens.transfer(&from, &to, token_id)
    }

    pub fn safe_transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<()> {
        self.transfer_from(caller, from, to, token_id)
    }

    pub fn approve(&self, caller: Address, to: Address, token_id: TokenId) -> Result<()> {
        debug!(%caller, %to, %token_id, "Approval attempt rejected");
        TokenOwnership::before_approval()
    }

    pub fn set_approval_for_all(
        &self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<()> {
        debug!(%caller, %operator, approved, "Operator approval attempt rejected");
        TokenOwnership::before_approval()
    }

    /// Approvals can never be set, so a live token never has one
    pub fn get_approved(&self, token_id: TokenId) -> Result<Option<Address>> {
        self.tokens.owner_of(token_id)?;
        Ok(None)
    }

    pub fn is_approved_for_all(&self, _owner: &Address, _operator: &Address) -> bool {
        false
    }

    // ── Pause ───────────────────────────────────────────────────

    pub fn pause(&mut self, caller: Address) -> Result<()> {
        self.access.check_role(Role::Pauser, &caller)?;
        if self.paused {
            return Err(ProofMintError::Paused);
        }
        self.paused = true;
        self.journal.emit(RegistryEvent::Paused { account: caller });
        info!(account = %caller, "Registry paused");
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address) -> Result<()> {
        self.access.check_role(Role::Pauser, &caller)?;
        if !self.paused {
            return Err(ProofMintError::NotPaused);
        }
        self.paused = false;
        self.journal.emit(RegistryEvent::Unpaused { account: caller });
        info!(account = %caller, "Registry unpaused");
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // ── Events ──────────────────────────────────────────────────

    pub fn events_since(&self, seq: u64) -> &[EventRecord] {
        self.journal.since(seq)
    }

    pub fn event_count(&self) -> u64 {
        self.journal.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proofmint_core::ErrorKind;
    use proofmint_crypto::metadata_hash;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    struct Fixture {
        registry: CredentialRegistry,
        owner: Address,
        issuer: Address,
        recipient: Address,
        other: Address,
    }

    fn setup() -> Fixture {
        let owner = addr(1);
        Fixture {
            registry: CredentialRegistry::new(owner),
            owner,
            issuer: addr(2),
            recipient: addr(3),
            other: addr(4),
        }
    }

    fn mint_request(recipient: Address, type_id: u64, description: &str) -> MintRequest {
        MintRequest {
            recipient,
            certificate_type_id: CertificateTypeId(type_id),
            token_uri: "ipfs://QmTest123".to_string(),
            metadata_hash: metadata_hash(b"test metadata"),
            description: description.to_string(),
        }
    }

    /// Registry with a registered issuer and one active type (id 0)
    fn with_issuer_and_type() -> Fixture {
        let mut f = setup();
        f.registry
            .register_issuer(f.issuer, "Test University", "A test university")
            .unwrap();
        f.registry
            .create_certificate_type(
                f.issuer,
                "Blockchain Developer Certificate",
                "Certificate for blockchain developers",
            )
            .unwrap();
        f
    }

    #[test]
    fn test_deployment_metadata_and_roles() {
        let f = setup();
        assert_eq!(f.registry.name(), "ProofMint Credentials");
        assert_eq!(f.registry.symbol(), "PROOF");
        assert!(f.registry.has_role(Role::DefaultAdmin, &f.owner));
        assert!(f.registry.has_role(Role::Pauser, &f.owner));
        assert!(!f.registry.is_issuer(&f.owner));
        assert!(!f.registry.is_paused());
    }

    #[test]
    fn test_register_issuer() {
        let mut f = setup();
        f.registry
            .register_issuer(f.issuer, "Test University", "A test university")
            .unwrap();

        assert!(f.registry.is_issuer(&f.issuer));
        let profile = f.registry.issuer_profile(&f.issuer).unwrap();
        assert_eq!(profile.name, "Test University");
        assert_eq!(profile.description, "A test university");
        assert_eq!(profile.credentials_issued, 0);

        let last = f.registry.events_since(0).last().unwrap();
        assert_eq!(
            last.event,
            RegistryEvent::IssuerRegistered {
                issuer: f.issuer,
                name: "Test University".into()
            }
        );
    }

    #[test]
    fn test_register_issuer_empty_name() {
        let mut f = setup();
        let err = f.registry.register_issuer(f.other, "", "No name").unwrap_err();
        assert_eq!(err, ProofMintError::EmptyIssuerName);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!f.registry.is_issuer(&f.other));
        assert!(f.registry.issuer_profile(&f.other).is_none());
    }

    #[test]
    fn test_reregistration_keeps_role_and_resets_counter() {
        let mut f = with_issuer_and_type();
        f.registry
            .mint_credential(f.issuer, mint_request(f.recipient, 0, "D"))
            .unwrap();
        assert_eq!(f.registry.issuer_profile(&f.issuer).unwrap().credentials_issued, 1);

        let events_before = f.registry.event_count();
        f.registry
            .register_issuer(f.issuer, "Test University", "Updated description")
            .unwrap();

        assert!(f.registry.is_issuer(&f.issuer));
        let profile = f.registry.issuer_profile(&f.issuer).unwrap();
        assert_eq!(profile.description, "Updated description");
        assert_eq!(profile.credentials_issued, 0);
        // Only IssuerRegistered; the role grant is a no-op.
        assert_eq!(f.registry.event_count(), events_before + 1);
    }

    #[test]
    fn test_create_certificate_type() {
        let mut f = with_issuer_and_type();
        let cert_type = f.registry.get_certificate_type(CertificateTypeId(0)).unwrap();
        assert_eq!(cert_type.name, "Blockchain Developer Certificate");
        assert_eq!(cert_type.issuer, f.issuer);
        assert!(cert_type.is_active);

        let before = f.registry.total_certificate_types();
        let id = f
            .registry
            .create_certificate_type(f.issuer, "Web3 Certificate", "")
            .unwrap();
        assert_eq!(id, CertificateTypeId(1));
        assert_eq!(f.registry.total_certificate_types(), before + 1);
        assert_eq!(
            f.registry.get_issuer_certificate_types(&f.issuer),
            vec![CertificateTypeId(0), CertificateTypeId(1)]
        );
    }

    #[test]
    fn test_create_certificate_type_empty_name() {
        let mut f = with_issuer_and_type();
        let before = f.registry.total_certificate_types();
        let err = f
            .registry
            .create_certificate_type(f.issuer, "", "No name")
            .unwrap_err();
        assert_eq!(err, ProofMintError::EmptyCertificateTypeName);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(f.registry.total_certificate_types(), before);
    }

    #[test]
    fn test_non_issuer_cannot_create_certificate_type() {
        let mut f = setup();
        let events_before = f.registry.event_count();
        let err = f
            .registry
            .create_certificate_type(f.recipient, "Invalid Certificate", "Should fail")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(f.registry.total_certificate_types(), 0);
        assert_eq!(f.registry.event_count(), events_before);
    }

    #[test]
    fn test_deactivate_certificate_type() {
        let mut f = with_issuer_and_type();
        let id = f
            .registry
            .create_certificate_type(f.issuer, "Web3 Certificate", "")
            .unwrap();

        let err = f
            .registry
            .deactivate_certificate_type(f.recipient, id)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        // Another registered issuer is not the creator either.
        f.registry.register_issuer(f.other, "Other Org", "").unwrap();
        let err = f.registry.deactivate_certificate_type(f.other, id).unwrap_err();
        assert_eq!(err, ProofMintError::NotTypeCreator(id));

        f.registry.deactivate_certificate_type(f.issuer, id).unwrap();
        assert!(!f.registry.get_certificate_type(id).unwrap().is_active);

        let err = f
            .registry
            .deactivate_certificate_type(f.issuer, CertificateTypeId(42))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_mint_credential() {
        let mut f = with_issuer_and_type();
        let token_id = f
            .registry
            .mint_credential(
                f.issuer,
                mint_request(f.recipient, 0, "Completion of Blockchain Developer Course"),
            )
            .unwrap();
        assert_eq!(token_id, TokenId(0));

        let certificate = f.registry.get_certificate(token_id).unwrap();
        assert_eq!(certificate.recipient, f.recipient);
        assert_eq!(certificate.issuer, f.issuer);
        assert_eq!(certificate.certificate_type_id, CertificateTypeId(0));
        assert_eq!(certificate.description, "Completion of Blockchain Developer Course");
        assert_eq!(certificate.metadata_hash, metadata_hash(b"test metadata"));
        assert!(!certificate.is_revoked);

        assert_eq!(f.registry.token_uri(token_id).unwrap(), "ipfs://QmTest123");
        assert_eq!(f.registry.owner_of(token_id).unwrap(), f.recipient);
        assert_eq!(f.registry.balance_of(&f.recipient).unwrap(), 1);
        assert_eq!(f.registry.get_recipient_credentials(&f.recipient), vec![TokenId(0)]);
        assert_eq!(f.registry.get_issuer_credentials(&f.issuer), vec![TokenId(0)]);
        assert_eq!(f.registry.issuer_profile(&f.issuer).unwrap().credentials_issued, 1);
        assert_eq!(f.registry.total_supply(), 1);

        let events = f.registry.events_since(0);
        let minted = &events[events.len() - 1].event;
        assert_eq!(
            *minted,
            RegistryEvent::CertificateMinted {
                token_id,
                recipient: f.recipient,
                issuer: f.issuer,
                certificate_type_id: CertificateTypeId(0),
            }
        );
        assert_eq!(
            events[events.len() - 2].event,
            RegistryEvent::Transfer {
                from: Address::ZERO,
                to: f.recipient,
                token_id,
            }
        );
    }

    #[test]
    fn test_mint_failures_leave_state_untouched() {
        let mut f = with_issuer_and_type();
        let web3 = f
            .registry
            .create_certificate_type(f.issuer, "Web3 Certificate", "")
            .unwrap();
        f.registry.deactivate_certificate_type(f.issuer, web3).unwrap();
        let events_before = f.registry.event_count();

        let err = f
            .registry
            .mint_credential(f.recipient, mint_request(f.recipient, 0, "Should fail"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let err = f
            .registry
            .mint_credential(f.issuer, mint_request(f.recipient, 999, "Should fail"))
            .unwrap_err();
        assert_eq!(err, ProofMintError::UnknownCertificateType(CertificateTypeId(999)));

        let err = f
            .registry
            .mint_credential(f.issuer, mint_request(f.recipient, web3.0, "Should fail"))
            .unwrap_err();
        assert_eq!(err, ProofMintError::InactiveCertificateType(web3));

        let err = f
            .registry
            .mint_credential(f.issuer, mint_request(Address::ZERO, 0, "Should fail"))
            .unwrap_err();
        assert_eq!(err, ProofMintError::ZeroAddress);

        assert_eq!(f.registry.total_supply(), 0);
        assert_eq!(f.registry.event_count(), events_before);
        assert!(f.registry.get_recipient_credentials(&f.recipient).is_empty());
        assert_eq!(f.registry.issuer_profile(&f.issuer).unwrap().credentials_issued, 0);
    }

    #[test]
    fn test_any_issuer_may_mint_against_active_type() {
        let mut f = with_issuer_and_type();
        f.registry.register_issuer(f.other, "Other Org", "").unwrap();
        let token_id = f
            .registry
            .mint_credential(f.other, mint_request(f.recipient, 0, "D"))
            .unwrap();
        assert_eq!(f.registry.get_certificate(token_id).unwrap().issuer, f.other);
    }

    #[test]
    fn test_soulbound_transfers_rejected() {
        let mut f = with_issuer_and_type();
        let token_id = f
            .registry
            .mint_credential(f.issuer, mint_request(f.recipient, 0, "D"))
            .unwrap();
        let events_before = f.registry.event_count();

        for caller in [f.recipient, f.issuer, f.owner, f.other] {
            let err = f
                .registry
                .transfer_from(caller, f.recipient, f.other, token_id)
                .unwrap_err();
            assert_eq!(err, ProofMintError::TransferNotAllowed);
            assert_eq!(err.kind(), ErrorKind::State);

            assert_eq!(
                f.registry
                    .safe_transfer_from(caller, f.recipient, f.other, token_id)
                    .unwrap_err(),
                ProofMintError::TransferNotAllowed
            );
            assert_eq!(
                f.registry.approve(caller, f.other, token_id).unwrap_err(),
                ProofMintError::TransferNotAllowed
            );
            assert_eq!(
                f.registry
                    .set_approval_for_all(caller, f.other, true)
                    .unwrap_err(),
                ProofMintError::TransferNotAllowed
            );
        }

        assert_eq!(f.registry.owner_of(token_id).unwrap(), f.recipient);
        assert_eq!(f.registry.get_approved(token_id).unwrap(), None);
        assert!(!f.registry.is_approved_for_all(&f.recipient, &f.other));
        assert_eq!(f.registry.event_count(), events_before);
    }

    #[test]
    fn test_revoke_credential() {
        let mut f = with_issuer_and_type();
        let token_id = f
            .registry
            .mint_credential(f.issuer, mint_request(f.recipient, 0, "D"))
            .unwrap();
        assert!(f.registry.is_valid_credential(token_id));

        let err = f
            .registry
            .revoke_credential(f.recipient, token_id, "Unauthorized revocation")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(f.registry.is_valid_credential(token_id));

        f.registry
            .revoke_credential(f.issuer, token_id, "Reason for revocation")
            .unwrap();
        assert!(!f.registry.is_valid_credential(token_id));
        assert!(f.registry.get_certificate(token_id).unwrap().is_revoked);
        assert_eq!(
            f.registry.events_since(0).last().unwrap().event,
            RegistryEvent::CertificateRevoked {
                token_id,
                issuer: f.issuer,
                reason: "Reason for revocation".into(),
            }
        );

        let err = f
            .registry
            .revoke_credential(f.issuer, token_id, "again")
            .unwrap_err();
        assert_eq!(err, ProofMintError::AlreadyRevoked(token_id));
        assert!(!f.registry.is_valid_credential(token_id));
    }

    #[test]
    fn test_revoke_unknown_token() {
        let mut f = with_issuer_and_type();
        let err = f
            .registry
            .revoke_credential(f.issuer, TokenId(7), "none")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_read_projections_for_unknown_keys() {
        let f = setup();
        assert!(f.registry.get_certificate(TokenId(0)).is_none());
        assert!(!f.registry.is_valid_credential(TokenId(0)));
        assert!(f.registry.get_recipient_credentials(&f.other).is_empty());
        assert!(f.registry.get_issuer_credentials(&f.other).is_empty());
        assert!(f.registry.get_issuer_certificate_types(&f.other).is_empty());
        assert!(f.registry.get_certificate_type(CertificateTypeId(0)).is_err());
        assert!(f.registry.token_uri(TokenId(0)).is_err());
    }

    #[test]
    fn test_pause_blocks_mint_only() {
        let mut f = with_issuer_and_type();
        let token_id = f
            .registry
            .mint_credential(f.issuer, mint_request(f.recipient, 0, "D"))
            .unwrap();

        let err = f.registry.pause(f.issuer).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        f.registry.pause(f.owner).unwrap();
        assert!(f.registry.is_paused());
        assert_eq!(
            f.registry.events_since(0).last().unwrap().event,
            RegistryEvent::Paused { account: f.owner }
        );
        assert_eq!(f.registry.pause(f.owner).unwrap_err(), ProofMintError::Paused);

        let err = f
            .registry
            .mint_credential(f.issuer, mint_request(f.recipient, 0, "Should fail - paused"))
            .unwrap_err();
        assert_eq!(err, ProofMintError::Paused);
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(f.registry.total_supply(), 1);

        // Issuer housekeeping still works while paused.
        f.registry
            .revoke_credential(f.issuer, token_id, "paused revoke")
            .unwrap();

        f.registry.unpause(f.owner).unwrap();
        assert_eq!(
            f.registry.events_since(0).last().unwrap().event,
            RegistryEvent::Unpaused { account: f.owner }
        );
        assert_eq!(f.registry.unpause(f.owner).unwrap_err(), ProofMintError::NotPaused);

        f.registry
            .mint_credential(f.issuer, mint_request(f.recipient, 0, "D"))
            .unwrap();
        assert_eq!(f.registry.total_supply(), 2);
    }

    #[test]
    fn test_burn() {
        let mut f = with_issuer_and_type();
        let token_id = f
            .registry
            .mint_credential(f.issuer, mint_request(f.recipient, 0, "D"))
            .unwrap();

        let err = f.registry.burn(f.issuer, token_id).unwrap_err();
        assert_eq!(err, ProofMintError::NotTokenOwner(token_id));

        f.registry.burn(f.recipient, token_id).unwrap();
        assert!(!f.registry.is_valid_credential(token_id));
        assert!(f.registry.owner_of(token_id).is_err());
        assert_eq!(f.registry.balance_of(&f.recipient).unwrap(), 0);
        // History and counters are kept.
        assert!(f.registry.get_certificate(token_id).is_some());
        assert_eq!(f.registry.total_supply(), 1);
        assert_eq!(
            f.registry.events_since(0).last().unwrap().event,
            RegistryEvent::Transfer {
                from: f.recipient,
                to: Address::ZERO,
                token_id,
            }
        );

        let err = f.registry.burn(f.recipient, token_id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_role_management() {
        let mut f = setup();

        let err = f
            .registry
            .grant_role(f.other, Role::Issuer, f.issuer)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        f.registry.grant_role(f.owner, Role::Issuer, f.issuer).unwrap();
        assert!(f.registry.is_issuer(&f.issuer));
        assert_eq!(f.registry.roles_of(&f.owner), vec![Role::DefaultAdmin, Role::Pauser]);
        assert_eq!(f.registry.role_members(Role::Issuer), vec![f.issuer]);
        // Role-only issuers can act without a profile.
        f.registry
            .create_certificate_type(f.issuer, "Badge", "")
            .unwrap();
        f.registry
            .mint_credential(f.issuer, mint_request(f.recipient, 0, "D"))
            .unwrap();
        assert!(f.registry.issuer_profile(&f.issuer).is_none());

        f.registry.revoke_role(f.owner, Role::Issuer, f.issuer).unwrap();
        assert!(!f.registry.is_issuer(&f.issuer));
        assert!(f.registry.role_members(Role::Issuer).is_empty());
        assert!(f.registry.roles_of(&f.issuer).is_empty());

        f.registry.grant_role(f.owner, Role::Pauser, f.other).unwrap();
        f.registry.renounce_role(f.other, Role::Pauser);
        assert!(!f.registry.has_role(Role::Pauser, &f.other));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut f = setup();
        f.registry
            .register_issuer(f.issuer, "Test University", "A test university")
            .unwrap();
        let type_id = f
            .registry
            .create_certificate_type(f.issuer, "Blockchain Developer Certificate", "")
            .unwrap();
        assert_eq!(type_id, CertificateTypeId(0));

        let token_id = f
            .registry
            .mint_credential(f.issuer, mint_request(f.recipient, 0, "D"))
            .unwrap();
        assert_eq!(token_id, TokenId(0));
        assert!(f.registry.is_valid_credential(TokenId(0)));

        f.registry.revoke_credential(f.issuer, TokenId(0), "R").unwrap();
        assert!(!f.registry.is_valid_credential(TokenId(0)));
        assert!(f.registry.get_certificate(TokenId(0)).unwrap().is_revoked);
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_state() {
        let mut f = with_issuer_and_type();
        f.registry
            .mint_credential(f.issuer, mint_request(f.recipient, 0, "D"))
            .unwrap();

        let json = serde_json::to_string(&f.registry).unwrap();
        let restored: CredentialRegistry = serde_json::from_str(&json).unwrap();

        assert!(restored.is_issuer(&f.issuer));
        assert_eq!(restored.total_supply(), 1);
        assert_eq!(restored.owner_of(TokenId(0)).unwrap(), f.recipient);
        assert_eq!(restored.event_count(), f.registry.event_count());
        assert_eq!(
            restored.get_certificate(TokenId(0)),
            f.registry.get_certificate(TokenId(0))
        );
    }
}
