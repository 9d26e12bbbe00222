//! Integration tests for the admin API
//!
//! Admin routes are gated by the registry roles of the caller, so every test
//! starts from a registry whose deployer is `common::ADMIN`.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{TestApp, ADMIN};

const ISSUER: &str = "0x1111111111111111111111111111111111111111";
const ALICE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const STRANGER: &str = "0x9999999999999999999999999999999999999999";

fn mint_body() -> serde_json::Value {
    json!({
        "recipient": ALICE,
        "certificate_type_id": 0,
        "token_uri": "ipfs://cert",
        "metadata_hash": format!("0x{}", "ab".repeat(32)),
    })
}

#[tokio::test]
async fn test_pause_blocks_minting() {
    let app = TestApp::new().await;
    app.post("/issuers", Some(ISSUER), json!({ "name": "Acme" })).await;
    app.post("/certificate-types", Some(ISSUER), json!({ "name": "Degree" }))
        .await;

    // ── Only pausers may pause ──────────────────────────────
    let (status, body) = app.post("/admin/pause", Some(STRANGER), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");

    let (status, body) = app.post("/admin/pause", Some(ADMIN), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paused"], true);

    // ── Pausing twice is a state error ──────────────────────
    let (status, _) = app.post("/admin/pause", Some(ADMIN), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // ── Mint blocked, nothing recorded ──────────────────────
    let (status, body) = app.post("/credentials", Some(ISSUER), mint_body()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "state_error");

    let (_, info) = app.get("/info").await;
    assert_eq!(info["paused"], true);
    assert_eq!(info["total_supply"], 0);

    // ── Unpause restores minting ────────────────────────────
    let (status, body) = app.post("/admin/unpause", Some(ADMIN), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paused"], false);

    let (status, _) = app.post("/admin/unpause", Some(ADMIN), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.post("/credentials", Some(ISSUER), mint_body()).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_role_management() {
    let app = TestApp::new().await;

    let (status, body) = app.get(&format!("/admin/roles/admin/{ADMIN}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_role"], true);
    assert_eq!(body["role_id"], format!("0x{}", "00".repeat(32)));

    // ── Non-admin cannot grant ──────────────────────────────
    let (status, _) = app
        .post(
            "/admin/roles/grant",
            Some(STRANGER),
            json!({ "role": "issuer", "account": ALICE }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // ── Admin grants issuer without a profile ───────────────
    let (status, body) = app
        .post(
            "/admin/roles/grant",
            Some(ADMIN),
            json!({ "role": "issuer", "account": ALICE }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["has_role"], true);

    let (_, issuer) = app.get(&format!("/issuers/{ALICE}")).await;
    assert_eq!(issuer["is_issuer"], true);
    assert_eq!(issuer["profile"], serde_json::Value::Null);

    let (status, _) = app
        .post("/certificate-types", Some(ALICE), json!({ "name": "Badge" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // ── Revoke, then the account can no longer create types ─
    let (status, _) = app
        .post(
            "/admin/roles/revoke",
            Some(ADMIN),
            json!({ "role": "issuer", "account": ALICE }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post("/certificate-types", Some(ALICE), json!({ "name": "Badge 2" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // ── Renounce own role ───────────────────────────────────
    let (status, _) = app
        .post("/admin/roles/renounce", Some(ADMIN), json!({ "role": "pauser" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&format!("/admin/roles/pauser/{ADMIN}")).await;
    assert_eq!(body["has_role"], false);

    let (status, _) = app.post("/admin/pause", Some(ADMIN), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get(&format!("/admin/roles/wizard/{ADMIN}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_issuer_listing_and_stats() {
    let app = TestApp::new().await;
    app.post("/issuers", Some(ISSUER), json!({ "name": "Acme", "description": "Uni" }))
        .await;

    let (status, body) = app.get("/admin/issuers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["address"], ISSUER);
    assert_eq!(body["data"][0]["name"], "Acme");
    assert_eq!(body["data"][0]["active"], true);

    // A profile outlives the role
    app.post(
        "/admin/roles/revoke",
        Some(ADMIN),
        json!({ "role": "issuer", "account": ISSUER }),
    )
    .await;
    let (_, body) = app.get("/admin/issuers").await;
    assert_eq!(body["data"][0]["active"], false);

    let (status, stats) = app.get("/admin/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["issuers"], 1);
    assert_eq!(stats["credentials"], 0);
    assert_eq!(stats["paused"], false);
}

#[tokio::test]
async fn test_role_listings() {
    let app = TestApp::new().await;
    app.post("/issuers", Some(ISSUER), json!({ "name": "Acme" })).await;

    let (status, body) = app.get("/admin/roles/pauser").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "pauser");
    assert_eq!(body["members"], json!([ADMIN]));

    let (_, body) = app.get("/admin/roles/ISSUER_ROLE").await;
    assert_eq!(body["members"], json!([ISSUER]));

    let (status, body) = app.get(&format!("/admin/accounts/{ADMIN}/roles")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"], json!(["default_admin", "pauser"]));

    let statuses = body["statuses"].as_array().unwrap();
    assert_eq!(statuses.len(), 3);
    let flags: Vec<(&str, bool)> = statuses
        .iter()
        .map(|s| (s["role"].as_str().unwrap(), s["has_role"].as_bool().unwrap()))
        .collect();
    assert_eq!(
        flags,
        vec![("default_admin", true), ("issuer", false), ("pauser", true)]
    );

    let (_, body) = app.get(&format!("/admin/accounts/{STRANGER}/roles")).await;
    assert_eq!(body["roles"], json!([]));

    let (status, _) = app.get("/admin/roles/wizard").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = app.get("/admin/accounts/nobody/roles").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_malformed_role_request() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/admin/roles/grant",
            Some(ADMIN),
            json!({ "role": "wizard", "account": ALICE }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let (status, body) = app
        .post("/admin/roles/revoke", Some(ADMIN), json!({ "role": "issuer" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let (_, body) = app.get(&format!("/admin/roles/admin/{ALICE}")).await;
    assert_eq!(body["has_role"], false);
}
