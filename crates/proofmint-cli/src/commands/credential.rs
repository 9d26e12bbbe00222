//! Credential commands

use std::path::PathBuf;

use anyhow::{bail, Result};
use console::style;
use proofmint_core::MetadataHash;
use serde_json::{json, Value};

use super::client::ApiClient;

pub struct MintArgs {
    pub recipient: String,
    pub type_id: u64,
    pub uri: String,
    pub metadata_hash: Option<String>,
    pub metadata: Option<PathBuf>,
    pub description: String,
}

fn print(certificate: &Value) {
    println!("  Token ID:    {}", style(&certificate["token_id"]).cyan());
    println!("  Recipient:   {}", certificate["recipient"]);
    println!("  Issuer:      {}", certificate["issuer"]);
    println!("  Cert type:   {}", certificate["certificate_type_id"]);
    println!("  URI:         {}", certificate["token_uri"]);
    println!("  Hash:        {}", certificate["metadata_hash"]);
    println!("  Description: {}", certificate["description"]);
    println!("  Issued at:   {}", certificate["timestamp"]);
}

pub async fn mint(client: &ApiClient, args: MintArgs) -> Result<()> {
    let metadata_hash = match (args.metadata_hash, args.metadata) {
        (Some(hash), _) => hash.parse::<MetadataHash>()?,
        (None, Some(path)) => super::hash::metadata_hash_of(&path, false)?,
        (None, None) => bail!("one of --metadata-hash or --metadata is required"),
    };

    let response = client
        .post(
            "/credentials",
            json!({
                "recipient": args.recipient,
                "certificate_type_id": args.type_id,
                "token_uri": args.uri,
                "metadata_hash": metadata_hash,
                "description": args.description,
            }),
        )
        .await?;

    println!("\n{}", style("Credential Minted").bold().green());
    println!();
    print(&response["certificate"]);
    Ok(())
}

pub async fn show(client: &ApiClient, token_id: u64) -> Result<()> {
    let credential = client.get(&format!("/credentials/{}", token_id)).await?;

    println!("\n{}", style("Credential").bold().underlined());
    print(&credential["certificate"]);
    println!(
        "  Owner:       {}",
        if credential["owner"].is_null() {
            style("Burned".to_string()).dim()
        } else {
            style(credential["owner"].to_string()).cyan()
        }
    );
    println!(
        "  Status:      {}",
        if credential["valid"].as_bool().unwrap_or(false) {
            style("Valid").green()
        } else {
            style("Invalid").red()
        }
    );
    Ok(())
}

pub async fn verify(client: &ApiClient, token_id: u64) -> Result<()> {
    let result = client
        .get(&format!("/credentials/{}/verify", token_id))
        .await?;

    if result["valid"].as_bool().unwrap_or(false) {
        println!(
            "{} Credential {} is valid (issued by {}, {})",
            style("✓").green().bold(),
            token_id,
            result["issuer"],
            result["certificate_type"]["name"]
        );
    } else if !result["exists"].as_bool().unwrap_or(false) {
        println!("{} Credential {} does not exist", style("✗").red().bold(), token_id);
    } else if result["revoked"].as_bool().unwrap_or(false) {
        println!("{} Credential {} has been revoked", style("✗").red().bold(), token_id);
    } else {
        println!("{} Credential {} has been burned", style("✗").red().bold(), token_id);
    }

    Ok(())
}

pub async fn revoke(client: &ApiClient, token_id: u64, reason: &str) -> Result<()> {
    client
        .post(
            &format!("/credentials/{}/revoke", token_id),
            json!({ "reason": reason }),
        )
        .await?;

    println!(
        "{} Credential {} revoked",
        style("✓").yellow().bold(),
        token_id
    );
    if !reason.is_empty() {
        println!("  Reason: {}", reason);
    }
    Ok(())
}
