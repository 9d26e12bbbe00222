//! HTTP route handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use proofmint_core::{
    Address, Certificate, CertificateType, CertificateTypeId, EventRecord, IssuerProfile, TokenId,
};
use proofmint_registry::{CredentialRegistry, MintRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::extract::{address_field, extract_json, extract_path, extract_query};
use crate::middleware::Caller;
use crate::state::AppState;

fn parse_address(raw: &str) -> Result<Address, ApiError> {
    Ok(raw.parse::<Address>()?)
}

// ── Info ────────────────────────────────────────────────────────

/// Health check
pub async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
pub struct RegistryInfo {
    pub name: String,
    pub symbol: String,
    pub paused: bool,
    pub total_supply: u64,
    pub total_certificate_types: u64,
    pub event_count: u64,
    pub persistent: bool,
}

/// `GET /info`
pub async fn info(State(state): State<AppState>) -> Json<RegistryInfo> {
    let registry = state.read().await;
    Json(RegistryInfo {
        name: registry.name().to_string(),
        symbol: registry.symbol().to_string(),
        paused: registry.is_paused(),
        total_supply: registry.total_supply(),
        total_certificate_types: registry.total_certificate_types(),
        event_count: registry.event_count(),
        persistent: state.is_persistent(),
    })
}

// ── Issuers ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterIssuerRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct IssuerResponse {
    pub address: Address,
    pub is_issuer: bool,
    pub profile: Option<IssuerProfile>,
}

/// `POST /issuers`
pub async fn register_issuer(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<RegisterIssuerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = extract_json(body)?;
    let profile = state
        .mutate(|registry| {
            registry.register_issuer(caller, &body.name, &body.description)?;
            Ok(registry.issuer_profile(&caller).cloned())
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(IssuerResponse {
            address: caller,
            is_issuer: true,
            profile,
        }),
    ))
}

/// `GET /issuers/:address`
pub async fn get_issuer(
    State(state): State<AppState>,
    address: Result<Path<String>, PathRejection>,
) -> Result<Json<IssuerResponse>, ApiError> {
    let address = parse_address(&extract_path(address)?)?;
    let registry = state.read().await;

    Ok(Json(IssuerResponse {
        address,
        is_issuer: registry.is_issuer(&address),
        profile: registry.issuer_profile(&address).cloned(),
    }))
}

#[derive(Debug, Serialize)]
pub struct TokenListResponse {
    pub address: Address,
    pub token_ids: Vec<TokenId>,
}

/// `GET /issuers/:address/credentials`
pub async fn issuer_credentials(
    State(state): State<AppState>,
    address: Result<Path<String>, PathRejection>,
) -> Result<Json<TokenListResponse>, ApiError> {
    let address = parse_address(&extract_path(address)?)?;
    let token_ids = state.read().await.get_issuer_credentials(&address);
    Ok(Json(TokenListResponse { address, token_ids }))
}

#[derive(Debug, Serialize)]
pub struct CertificateTypeListResponse {
    pub address: Address,
    pub certificate_type_ids: Vec<CertificateTypeId>,
}

/// `GET /issuers/:address/certificate-types`
pub async fn issuer_certificate_types(
    State(state): State<AppState>,
    address: Result<Path<String>, PathRejection>,
) -> Result<Json<CertificateTypeListResponse>, ApiError> {
    let address = parse_address(&extract_path(address)?)?;
    let certificate_type_ids = state.read().await.get_issuer_certificate_types(&address);
    Ok(Json(CertificateTypeListResponse {
        address,
        certificate_type_ids,
    }))
}

// ── Certificate types ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateCertificateTypeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// `POST /certificate-types`
pub async fn create_certificate_type(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<CreateCertificateTypeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = extract_json(body)?;
    let cert_type = state
        .mutate(|registry| {
            let id = registry.create_certificate_type(caller, &body.name, &body.description)?;
            registry.get_certificate_type(id).cloned()
        })
        .await?;

    Ok((StatusCode::CREATED, Json(cert_type)))
}

/// `GET /certificate-types/:id`
pub async fn get_certificate_type(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<CertificateType>, ApiError> {
    let id = CertificateTypeId(extract_path(id)?);
    let registry = state.read().await;
    let cert_type = registry.get_certificate_type(id)?;
    Ok(Json(cert_type.clone()))
}

/// `POST /certificate-types/:id/deactivate`
pub async fn deactivate_certificate_type(
    State(state): State<AppState>,
    Caller(caller): Caller,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<CertificateType>, ApiError> {
    let id = CertificateTypeId(extract_path(id)?);
    let cert_type = state
        .mutate(|registry| {
            registry.deactivate_certificate_type(caller, id)?;
            registry.get_certificate_type(id).cloned()
        })
        .await?;

    Ok(Json(cert_type))
}

// ── Credentials ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MintResponse {
    pub token_id: TokenId,
    pub certificate: Certificate,
}

/// `POST /credentials`
pub async fn mint_credential(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<MintRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = extract_json(body)?;
    let (token_id, certificate) = state
        .mutate(|registry| {
            let token_id = registry.mint_credential(caller, body)?;
            let certificate = registry
                .get_certificate(token_id)
                .cloned()
                .ok_or(proofmint_core::ProofMintError::UnknownToken(token_id))?;
            Ok((token_id, certificate))
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MintResponse {
            token_id,
            certificate,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct CredentialResponse {
    pub certificate: Certificate,
    /// Current owner; `None` once burned
    pub owner: Option<Address>,
    pub token_uri: Option<String>,
    pub valid: bool,
}

/// `GET /credentials/:id`
pub async fn get_credential(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<CredentialResponse>, ApiError> {
    let token_id = TokenId(extract_path(id)?);
    let registry = state.read().await;

    let certificate = registry
        .get_certificate(token_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Token does not exist: {}", token_id)))?;

    Ok(Json(CredentialResponse {
        certificate,
        owner: registry.owner_of(token_id).ok(),
        token_uri: registry.token_uri(token_id).ok().map(str::to_string),
        valid: registry.is_valid_credential(token_id),
    }))
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub token_id: TokenId,
    pub valid: bool,
    pub exists: bool,
    pub revoked: bool,
    pub issuer: Option<Address>,
    pub certificate_type: Option<CertificateType>,
}

impl VerifyResponse {
    fn build(registry: &CredentialRegistry, token_id: TokenId) -> Self {
        let certificate = registry.get_certificate(token_id);

        Self {
            token_id,
            valid: registry.is_valid_credential(token_id),
            exists: certificate.is_some(),
            revoked: certificate.map(|c| c.is_revoked).unwrap_or(false),
            issuer: certificate.map(|c| c.issuer),
            certificate_type: certificate
                .and_then(|c| registry.get_certificate_type(c.certificate_type_id).ok())
                .cloned(),
        }
    }
}

/// `GET /credentials/:id/verify`
///
/// Never fails for unknown ids; an unknown token is simply not valid.
pub async fn verify_credential(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let token_id = TokenId(extract_path(id)?);
    let registry = state.read().await;
    Ok(Json(VerifyResponse::build(&registry, token_id)))
}

#[derive(Debug, Deserialize)]
pub struct RevokeRequest {
    #[serde(default)]
    pub reason: String,
}

/// `POST /credentials/:id/revoke`
pub async fn revoke_credential(
    State(state): State<AppState>,
    Caller(caller): Caller,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<RevokeRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let token_id = TokenId(extract_path(id)?);
    let body = extract_json(body)?;

    let verified = state
        .mutate(|registry| {
            registry.revoke_credential(caller, token_id, &body.reason)?;
            Ok(VerifyResponse::build(registry, token_id))
        })
        .await?;

    Ok(Json(verified))
}

/// `POST /credentials/:id/burn`
pub async fn burn_credential(
    State(state): State<AppState>,
    Caller(caller): Caller,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let token_id = TokenId(extract_path(id)?);
    state
        .mutate(|registry| registry.burn(caller, token_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// The guard rejects these whatever the body holds, so bodies are read
// leniently and never reach `mutate`.

/// `POST /credentials/:id/transfer`
///
/// Body: `{ "from"?: address, "to": address }`
pub async fn transfer_credential(
    State(state): State<AppState>,
    Caller(caller): Caller,
    id: Result<Path<u64>, PathRejection>,
    body: Option<Json<Value>>,
) -> Result<StatusCode, ApiError> {
    let token_id = TokenId(extract_path(id)?);
    let from = address_field(&body, "from").unwrap_or(caller);
    let to = address_field(&body, "to").unwrap_or(Address::ZERO);

    state.read().await.transfer_from(caller, from, to, token_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /credentials/:id/approve`
///
/// Body: `{ "to": address }`
pub async fn approve_credential(
    State(state): State<AppState>,
    Caller(caller): Caller,
    id: Result<Path<u64>, PathRejection>,
    body: Option<Json<Value>>,
) -> Result<StatusCode, ApiError> {
    let token_id = TokenId(extract_path(id)?);
    let to = address_field(&body, "to").unwrap_or(Address::ZERO);

    state.read().await.approve(caller, to, token_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /operators`
///
/// Body: `{ "operator": address, "approved": bool }`
pub async fn set_operator(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Option<Json<Value>>,
) -> Result<StatusCode, ApiError> {
    let operator = address_field(&body, "operator").unwrap_or(Address::ZERO);
    let approved = body
        .as_ref()
        .and_then(|Json(body)| body.get("approved"))
        .and_then(Value::as_bool)
        .unwrap_or(true);

    state
        .read()
        .await
        .set_approval_for_all(caller, operator, approved)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /recipients/:address/credentials`
pub async fn recipient_credentials(
    State(state): State<AppState>,
    address: Result<Path<String>, PathRejection>,
) -> Result<Json<TokenListResponse>, ApiError> {
    let address = parse_address(&extract_path(address)?)?;
    let token_ids = state.read().await.get_recipient_credentials(&address);
    Ok(Json(TokenListResponse { address, token_ids }))
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub address: Address,
    pub balance: u64,
}

/// `GET /accounts/:address/balance`
pub async fn balance(
    State(state): State<AppState>,
    address: Result<Path<String>, PathRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let address = parse_address(&extract_path(address)?)?;
    let balance = state.read().await.balance_of(&address)?;
    Ok(Json(BalanceResponse { address, balance }))
}

// ── Events ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EventParams {
    pub since: Option<u64>,
    pub limit: Option<usize>,
    /// Only return events with this name, e.g. `CertificateMinted`
    pub event: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventRecord>,
    /// Pass as `since` to continue
    pub next: u64,
}

/// `GET /events`
pub async fn events(
    State(state): State<AppState>,
    params: Result<Query<EventParams>, QueryRejection>,
) -> Result<Json<EventsResponse>, ApiError> {
    let params = extract_query(params)?;
    let since = params.since.unwrap_or(0);
    let limit = params.limit.unwrap_or(100).min(1000);

    let registry = state.read().await;
    let events: Vec<EventRecord> = registry
        .events_since(since)
        .iter()
        .filter(|record| match params.event.as_deref() {
            Some(name) => record.event.name() == name,
            None => true,
        })
        .take(limit)
        .cloned()
        .collect();

    // A short page means the rest of the journal was scanned
    let next = if events.len() < limit {
        registry.event_count().max(since)
    } else {
        events.last().map(|e| e.seq + 1).unwrap_or(since)
    };

    Ok(Json(EventsResponse { events, next }))
}

// ── Metadata ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MetadataHashResponse {
    pub metadata_hash: String,
}

/// `POST /metadata/hash`
///
/// Keccak-256 of the compact JSON document, for callers preparing a mint.
pub async fn hash_metadata(
    document: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MetadataHashResponse>, ApiError> {
    let document = extract_json(document)?;
    let hash = proofmint_crypto::metadata_hash_json(&document)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(MetadataHashResponse {
        metadata_hash: hash.to_hex(),
    }))
}
