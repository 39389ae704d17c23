use anyhow::{Context, Result};
use docqa_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let transport = super::connect(config)?;
    let health = transport
        .health()
        .await
        .with_context(|| format!("service at {} is not reachable", transport.base_url()))?;
    println!("{}: {}", transport.base_url(), health.status);
    Ok(())
}
