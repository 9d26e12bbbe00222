//! Server command - starts the ProofMint HTTP API

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use proofmint_core::Address;
use proofmint_server::config::ServerConfig;

pub async fn run(
    bind: String,
    snapshot_path: Option<PathBuf>,
    admin: Option<String>,
) -> Result<()> {
    let mut config = ServerConfig::from_env()?;
    config.bind = bind;
    config.snapshot_path = snapshot_path;
    if let Some(admin) = admin {
        let admin: Address = admin.parse().context("invalid --admin address")?;
        config.admin = Some(admin);
    }

    println!(
        "\n{}",
        style("╔════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║   ProofMint Credential Registry        ║").cyan()
    );
    println!(
        "{}",
        style("╚════════════════════════════════════════╝").cyan()
    );
    println!();
    println!("  Bind:      {}", style(&config.bind).green());
    println!(
        "  Snapshot:  {}",
        match &config.snapshot_path {
            Some(path) => style(path.display().to_string()).green(),
            None => style("in-memory".to_string()).yellow(),
        }
    );
    println!();

    proofmint_server::run(config).await
}
