//! Offline hashing and address helpers

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use proofmint_core::{Address, MetadataHash};

/// Hash metadata the way the server expects it in a mint request
pub fn metadata_hash_of(path: &Path, raw: bool) -> Result<MetadataHash> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    if !raw {
        if let Ok(document) = serde_json::from_slice::<serde_json::Value>(&bytes) {
            return Ok(proofmint_crypto::metadata_hash_json(&document)?);
        }
    }

    Ok(proofmint_crypto::metadata_hash(&bytes))
}

pub fn file(path: &Path, raw: bool) -> Result<()> {
    let hash = metadata_hash_of(path, raw)?;
    println!("{}", style(hash).green());
    Ok(())
}

pub fn new_address() {
    let address = Address::random();
    println!("{}", style(address).green());
    println!(
        "{}",
        style("Random address with no key behind it; use for local testing only").dim()
    );
}

pub fn address_from_key(public_key: &str) -> Result<()> {
    let key = public_key.trim_start_matches("0x");
    let bytes = hex::decode(key).context("public key is not valid hex")?;
    let address = proofmint_crypto::address_from_public_key(&bytes)?;
    println!("{}", style(address).green());
    Ok(())
}
