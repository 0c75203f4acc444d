//! The `mathdrill validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;

use mathdrill_core::config::load_config_from;
use mathdrill_core::schema::Validator;

use crate::ValidateKind;

pub fn execute(
    kind: ValidateKind,
    body_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let validator = Validator::new(config.schema);

    let body = super::read_body(body_path.as_deref())?;
    let value: Value = serde_json::from_str(&body).context("document is not valid JSON")?;

    let report = match kind {
        ValidateKind::Instance => validator.validate_instance(&value),
        ValidateKind::Grade => validator.validate_grade_request(&value),
    };

    if report.is_valid() {
        println!("Valid.");
        return Ok(());
    }

    for violation in report.violations() {
        println!("  {}: {}", violation.path, violation.reason);
    }
    anyhow::bail!("{} violation(s) found", report.len())
}
