//! Status command - show configuration and server status

use anyhow::Result;
use console::style;

use super::client::ApiClient;

pub async fn show(client: &ApiClient) -> Result<()> {
    println!("\n{}", style("ProofMint Status").bold().cyan());
    println!();

    // Version info
    println!("{}", style("Version").bold().underlined());
    println!("  proofmint-cli:   {}", env!("CARGO_PKG_VERSION"));
    println!();

    // Environment
    println!("{}", style("Environment").bold().underlined());
    println!("  API:             {}", client.base_url());
    println!(
        "  Caller:          {}",
        match client.caller() {
            Some(caller) => style(caller.to_string()).green(),
            None => style("Not set (read-only)".to_string()).yellow(),
        }
    );
    println!(
        "  Snapshot:        {}",
        std::env::var("PROOFMINT_SNAPSHOT_PATH")
            .unwrap_or_else(|_| "Not set (in-memory)".to_string())
    );
    println!();

    // Server
    println!("{}", style("Server").bold().underlined());
    match client.get("/info").await {
        Ok(info) => {
            println!("  Status:          {}", style("Online").green());
            println!("  Collection:      {} ({})", info["name"], info["symbol"]);
            println!(
                "  Minting:         {}",
                if info["paused"].as_bool().unwrap_or(false) {
                    style("Paused").red()
                } else {
                    style("Open").green()
                }
            );
            println!("  Credentials:     {}", info["total_supply"]);
            println!("  Cert types:      {}", info["total_certificate_types"]);
            println!("  Events:          {}", info["event_count"]);
        }
        Err(err) => {
            println!("  Status:          {}", style("Unreachable").red());
            println!("  {}", style(err).dim());
        }
    }
    println!();

    println!("{}", style("Quick Start").bold().underlined());
    println!("  Start server:    proofmint server");
    println!("  Register:        proofmint --caller 0x.. issuer register -n \"Acme\"");
    println!("  Verify:          proofmint credential verify 0");

    Ok(())
}
