use anyhow::Context;
use clap::Args;
use serde_json::Value;

use crate::cli::{utils, OutputFormat};

#[derive(Args, Debug)]
pub struct HealthArgs {
    #[arg(long, default_value = "http://localhost:3000", help = "Server base URL")]
    pub url: String,
}

pub async fn handle(args: HealthArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = format!("{}/health", args.url.trim_end_matches('/'));

    let response = reqwest::get(&url)
        .await
        .with_context(|| format!("failed to reach {}", url))?;
    let status = response.status();
    let body: Value = response.json().await.context("health response was not JSON")?;

    if status.is_success() {
        utils::output_success(&output_format, &format!("{} is healthy", args.url), Some(body))
    } else {
        utils::output_error(
            &output_format,
            &format!("{} reported {}", args.url, status),
            Some("UNHEALTHY"),
        )?;
        anyhow::bail!("server unhealthy")
    }
}
