//! The `mathdrill next` command.

use std::path::PathBuf;

use anyhow::Result;

use mathdrill_api::{Api, ApiRequest, NEXT_PROBLEM_PATH};
use mathdrill_core::config::load_config_from;

pub fn execute(
    unit: Option<String>,
    difficulty: Option<String>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let api = Api::from_config(&config)?;

    let mut request = ApiRequest::get(NEXT_PROBLEM_PATH);
    if let Some(unit) = unit {
        request.query.push(("unit".into(), unit));
    }
    if let Some(difficulty) = difficulty {
        request.query.push(("difficulty".into(), difficulty));
    }

    let response = api.handle(&request, &mut super::make_rng(seed));
    anyhow::ensure!(
        response.status == 200,
        "problem generation failed (HTTP {}): {}",
        response.status,
        response.body_string()
    );

    if let Some(body) = &response.body {
        println!("{}", serde_json::to_string_pretty(body)?);
    }
    Ok(())
}
