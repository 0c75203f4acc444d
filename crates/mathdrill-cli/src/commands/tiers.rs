//! The `mathdrill tiers` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use mathdrill_core::config::load_config_from;
use mathdrill_core::Tier;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let tiers = &config.tiers;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let mut header = vec!["Skill".to_string()];
    header.extend(Tier::ALL.iter().map(|t| t.to_string()));
    table.set_header(header);

    let mut numerator = vec!["fraction numerator".to_string()];
    let mut denominator = vec!["fraction denominator".to_string()];
    let mut operand = vec!["gcd operand".to_string()];
    for tier in Tier::ALL {
        numerator.push(tiers.fraction(tier).numerator.to_string());
        denominator.push(tiers.fraction(tier).denominator.to_string());
        operand.push(tiers.gcd(tier).operand.to_string());
    }
    table.add_row(numerator);
    table.add_row(denominator);
    table.add_row(operand);

    println!("{table}");
    println!(
        "Defaults: unit {}, difficulty {}",
        config.default_unit, config.default_difficulty
    );
    Ok(())
}
