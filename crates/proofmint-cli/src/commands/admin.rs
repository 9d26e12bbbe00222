//! Admin and journal commands

use anyhow::Result;
use console::style;
use serde_json::json;

use super::client::ApiClient;

pub async fn set_paused(client: &ApiClient, paused: bool) -> Result<()> {
    let path = if paused { "/admin/pause" } else { "/admin/unpause" };
    client.post(path, json!({})).await?;

    if paused {
        println!("{} Minting paused", style("■").red().bold());
    } else {
        println!("{} Minting resumed", style("▶").green().bold());
    }
    Ok(())
}

/// `action` is `grant` or `revoke`
pub async fn role(client: &ApiClient, action: &str, role: &str, account: &str) -> Result<()> {
    let role = role.to_ascii_lowercase();
    let role = match role.trim_end_matches("_role") {
        "admin" => "default_admin".to_string(),
        other => other.to_string(),
    };

    let status = client
        .post(
            &format!("/admin/roles/{}", action),
            json!({ "role": role, "account": account }),
        )
        .await?;

    println!(
        "{} {} {} for {}",
        style("✓").green().bold(),
        action,
        style(&status["role"]).cyan(),
        status["account"]
    );
    println!("  Role ID: {}", style(&status["role_id"]).dim());
    Ok(())
}

pub async fn roles(client: &ApiClient, account: &str) -> Result<()> {
    let roles = client
        .get(&format!("/admin/accounts/{}/roles", account))
        .await?;

    println!("\n{} {}", style("Roles of").bold(), roles["account"]);
    for status in roles["statuses"].as_array().into_iter().flatten() {
        let marker = if status["has_role"].as_bool().unwrap_or(false) {
            style("✓").green().bold()
        } else {
            style("✗").dim()
        };
        println!(
            "  {} {:<14} {}",
            marker,
            status["role"].as_str().unwrap_or("?"),
            style(&status["role_id"]).dim()
        );
    }
    Ok(())
}

pub async fn events(client: &ApiClient, since: u64) -> Result<()> {
    let page = client.get(&format!("/events?since={}", since)).await?;
    let events = page["events"].as_array().cloned().unwrap_or_default();

    if events.is_empty() {
        println!("{}", style("No events").dim());
        return Ok(());
    }

    for event in &events {
        let mut fields = event.clone();
        let seq = fields["seq"].clone();
        let name = fields["event"].as_str().unwrap_or("?").to_string();
        if let Some(map) = fields.as_object_mut() {
            map.remove("seq");
            map.remove("event");
            map.remove("emitted_at");
        }
        println!("  {:>5}  {}  {}", seq, style(name).bold(), style(fields).dim());
    }
    println!();
    println!("  Next: --since {}", page["next"]);
    Ok(())
}
