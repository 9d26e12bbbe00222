//! Issuer commands

use anyhow::Result;
use console::style;
use serde_json::json;

use super::client::ApiClient;

pub async fn register(client: &ApiClient, name: &str, description: &str) -> Result<()> {
    let response = client
        .post("/issuers", json!({ "name": name, "description": description }))
        .await?;

    println!("\n{}", style("Issuer Registered").bold().green());
    println!();
    println!("  Address:     {}", style(&response["address"]).cyan());
    println!("  Name:        {}", response["profile"]["name"]);
    println!("  Description: {}", response["profile"]["description"]);

    Ok(())
}

pub async fn show(client: &ApiClient, address: &str) -> Result<()> {
    let issuer = client.get(&format!("/issuers/{}", address)).await?;

    println!("\n{}", style("Issuer").bold().underlined());
    println!("  Address:     {}", style(&issuer["address"]).cyan());
    println!(
        "  Role:        {}",
        if issuer["is_issuer"].as_bool().unwrap_or(false) {
            style("Issuer").green()
        } else {
            style("None").red()
        }
    );

    let profile = &issuer["profile"];
    if profile.is_null() {
        println!("  Profile:     {}", style("Not registered").dim());
        return Ok(());
    }

    println!("  Name:        {}", profile["name"]);
    println!("  Description: {}", profile["description"]);
    println!("  Issued:      {}", profile["credentials_issued"]);
    println!("  Registered:  {}", profile["registered_at"]);

    let types = client
        .get(&format!("/issuers/{}/certificate-types", address))
        .await?;
    println!("  Cert types:  {}", types["certificate_type_ids"]);

    Ok(())
}
