//! Certificate type commands

use anyhow::Result;
use console::style;
use serde_json::{json, Value};

use super::client::ApiClient;

fn print(cert_type: &Value) {
    println!("  ID:          {}", style(&cert_type["id"]).cyan());
    println!("  Name:        {}", cert_type["name"]);
    println!("  Description: {}", cert_type["description"]);
    println!("  Issuer:      {}", cert_type["issuer"]);
    println!(
        "  Status:      {}",
        if cert_type["is_active"].as_bool().unwrap_or(false) {
            style("Active").green()
        } else {
            style("Inactive").red()
        }
    );
}

pub async fn create(client: &ApiClient, name: &str, description: &str) -> Result<()> {
    let cert_type = client
        .post(
            "/certificate-types",
            json!({ "name": name, "description": description }),
        )
        .await?;

    println!("\n{}", style("Certificate Type Created").bold().green());
    println!();
    print(&cert_type);
    Ok(())
}

pub async fn show(client: &ApiClient, id: u64) -> Result<()> {
    let cert_type = client.get(&format!("/certificate-types/{}", id)).await?;

    println!("\n{}", style("Certificate Type").bold().underlined());
    print(&cert_type);
    Ok(())
}

pub async fn deactivate(client: &ApiClient, id: u64) -> Result<()> {
    let cert_type = client
        .post(&format!("/certificate-types/{}/deactivate", id), json!({}))
        .await?;

    println!("\n{}", style("Certificate Type Deactivated").bold().yellow());
    println!();
    print(&cert_type);
    Ok(())
}
