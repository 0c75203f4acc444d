//! The `mathdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mathdrill.toml").exists() {
        println!("mathdrill.toml already exists, skipping.");
    } else {
        std::fs::write("mathdrill.toml", SAMPLE_CONFIG)?;
        println!("Created mathdrill.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust the tier ranges in mathdrill.toml");
    println!("  2. Run: mathdrill tiers");
    println!("  3. Run: mathdrill practice --unit gcd --difficulty easy");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mathdrill configuration

default_unit = "fraction"
default_difficulty = "normal"

[schema]
stem_min_length = 1

# Inclusive [lo, hi] ranges. Denominators start at 2, GCD operands at 1.
[tiers.fraction.easy]
numerator = [1, 7]
denominator = [2, 8]

[tiers.fraction.normal]
numerator = [1, 11]
denominator = [2, 12]

[tiers.fraction.hard]
numerator = [1, 20]
denominator = [2, 20]

[tiers.gcd.easy]
operand = [6, 30]

[tiers.gcd.normal]
operand = [10, 60]

[tiers.gcd.hard]
operand = [10, 120]

[cors]
allowed_origins = [
    "https://nlt-proto.vercel.app",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
]
"#;
