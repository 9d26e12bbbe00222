//! Admin API routes
//!
//! Pausing and role management. Authorization is the registry's own role
//! check against the `X-Caller-Address` of the request; there is no separate
//! admin key.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use proofmint_core::{Address, IssuerProfile, Role};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{extract_json, extract_path};
use crate::middleware::Caller;
use crate::state::AppState;

// ── Pause ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PauseStatus {
    pub paused: bool,
}

/// `POST /admin/pause`
pub async fn pause(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<PauseStatus>, ApiError> {
    state.mutate(|registry| registry.pause(caller)).await?;
    Ok(Json(PauseStatus { paused: true }))
}

/// `POST /admin/unpause`
pub async fn unpause(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<PauseStatus>, ApiError> {
    state.mutate(|registry| registry.unpause(caller)).await?;
    Ok(Json(PauseStatus { paused: false }))
}

// ── Roles ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: Role,
    pub account: Address,
}

#[derive(Debug, Serialize)]
pub struct RoleStatus {
    pub role: Role,
    /// On-chain style identifier: zero for the admin role, otherwise
    /// keccak256 of the role name
    pub role_id: String,
    pub account: Address,
    pub has_role: bool,
}

fn role_id_hex(role: Role) -> String {
    format!("0x{}", hex::encode(proofmint_crypto::role_id(role)))
}

impl RoleStatus {
    fn new(role: Role, account: Address, has_role: bool) -> Self {
        Self {
            role,
            role_id: role_id_hex(role),
            account,
            has_role,
        }
    }
}

/// `POST /admin/roles/grant`
pub async fn grant_role(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<RoleRequest>, JsonRejection>,
) -> Result<Json<RoleStatus>, ApiError> {
    let body = extract_json(body)?;
    state
        .mutate(|registry| registry.grant_role(caller, body.role, body.account))
        .await?;
    Ok(Json(RoleStatus::new(body.role, body.account, true)))
}

/// `POST /admin/roles/revoke`
pub async fn revoke_role(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<RoleRequest>, JsonRejection>,
) -> Result<Json<RoleStatus>, ApiError> {
    let body = extract_json(body)?;
    state
        .mutate(|registry| registry.revoke_role(caller, body.role, body.account))
        .await?;
    Ok(Json(RoleStatus::new(body.role, body.account, false)))
}

#[derive(Debug, Deserialize)]
pub struct RenounceRequest {
    pub role: Role,
}

/// `POST /admin/roles/renounce`
pub async fn renounce_role(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<RenounceRequest>, JsonRejection>,
) -> Result<Json<RoleStatus>, ApiError> {
    let body = extract_json(body)?;
    state
        .mutate(|registry| {
            registry.renounce_role(caller, body.role);
            Ok(())
        })
        .await?;
    Ok(Json(RoleStatus::new(body.role, caller, false)))
}

/// `GET /admin/roles/:role/:address`
pub async fn has_role(
    State(state): State<AppState>,
    params: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<RoleStatus>, ApiError> {
    let (role, address) = extract_path(params)?;
    let role: Role = role.parse().map_err(ApiError::BadRequest)?;
    let account: Address = address.parse()?;
    let has_role = state.read().await.has_role(role, &account);
    Ok(Json(RoleStatus::new(role, account, has_role)))
}

#[derive(Debug, Serialize)]
pub struct RoleMembers {
    pub role: Role,
    pub role_id: String,
    pub members: Vec<Address>,
}

/// `GET /admin/roles/:role`
pub async fn role_members(
    State(state): State<AppState>,
    role: Result<Path<String>, PathRejection>,
) -> Result<Json<RoleMembers>, ApiError> {
    let role: Role = extract_path(role)?.parse().map_err(ApiError::BadRequest)?;
    let members = state.read().await.role_members(role);
    Ok(Json(RoleMembers {
        role,
        role_id: role_id_hex(role),
        members,
    }))
}

#[derive(Debug, Serialize)]
pub struct AccountRoles {
    pub account: Address,
    /// Roles currently held
    pub roles: Vec<Role>,
    /// Every role with its membership flag
    pub statuses: Vec<RoleStatus>,
}

/// `GET /admin/accounts/:address/roles`
pub async fn account_roles(
    State(state): State<AppState>,
    address: Result<Path<String>, PathRejection>,
) -> Result<Json<AccountRoles>, ApiError> {
    let account: Address = extract_path(address)?.parse()?;
    let registry = state.read().await;

    let roles = registry.roles_of(&account);
    let statuses = Role::ALL
        .into_iter()
        .map(|role| RoleStatus::new(role, account, roles.contains(&role)))
        .collect();

    Ok(Json(AccountRoles {
        account,
        roles,
        statuses,
    }))
}

// ── Issuers ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct IssuerEntry {
    pub address: Address,
    pub active: bool,
    #[serde(flatten)]
    pub profile: IssuerProfile,
}

#[derive(Debug, Serialize)]
pub struct IssuerList {
    pub data: Vec<IssuerEntry>,
    pub total: usize,
}

/// `GET /admin/issuers`
///
/// Every registered profile; `active` reflects whether the address still
/// holds the issuer role.
pub async fn list_issuers(State(state): State<AppState>) -> Json<IssuerList> {
    let registry = state.read().await;
    let data: Vec<IssuerEntry> = registry
        .issuer_profiles()
        .map(|(address, profile)| IssuerEntry {
            address: *address,
            active: registry.is_issuer(address),
            profile: profile.clone(),
        })
        .collect();

    Json(IssuerList {
        total: data.len(),
        data,
    })
}

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub issuers: usize,
    pub certificate_types: u64,
    pub credentials: u64,
    pub events: u64,
    pub paused: bool,
    pub persistent: bool,
    pub uptime_secs: u64,
}

/// `GET /admin/stats`
pub async fn stats(State(state): State<AppState>) -> Json<AdminStats> {
    let registry = state.read().await;
    Json(AdminStats {
        issuers: registry.issuer_profiles().count(),
        certificate_types: registry.total_certificate_types(),
        credentials: registry.total_supply(),
        events: registry.event_count(),
        paused: registry.is_paused(),
        persistent: state.is_persistent(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
