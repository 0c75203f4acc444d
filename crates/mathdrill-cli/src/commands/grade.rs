//! The `mathdrill grade` command.

use std::path::PathBuf;

use anyhow::Result;

use mathdrill_api::Api;
use mathdrill_core::config::load_config_from;

pub fn execute(body_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let api = Api::from_config(&config)?;
    let body = super::read_body(body_path.as_deref())?;

    let response = api.grade(&body);
    if let Some(body) = &response.body {
        println!("{}", serde_json::to_string_pretty(body)?);
    }

    if response.status != 200 {
        let reason = response
            .body
            .as_ref()
            .and_then(|b| b["reason"].as_str())
            .unwrap_or("unknown");
        anyhow::bail!("grade request rejected ({reason})");
    }
    Ok(())
}
