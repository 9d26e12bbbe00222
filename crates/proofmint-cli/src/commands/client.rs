//! HTTP client for the ProofMint server

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;

/// Thin JSON client; mutating calls carry the caller header
pub struct ApiClient {
    base_url: String,
    caller: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, caller: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            caller,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn caller(&self) -> Option<&str> {
        self.caller.as_deref()
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .with_context(|| format!("could not reach {}", self.base_url))?;

        Self::decode(response).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let caller = self
            .caller
            .as_deref()
            .ok_or_else(|| anyhow!("--caller (or PROOFMINT_CALLER) is required for this command"))?;

        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header("X-Caller-Address", caller)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("could not reach {}", self.base_url))?;

        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await.context("failed to read response")?;
        let body: Value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if !status.is_success() {
            let description = body
                .get("error_description")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string());
            bail!("{} ({})", description, status);
        }

        Ok(body)
    }
}
