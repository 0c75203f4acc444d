//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{SkillTemplate, Tier};
use crate::schema::SchemaConfig;
use crate::tiers::TierTable;

/// Cross-origin policy for the request adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API. `${VAR}` references are
    /// expanded at load time.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "https://nlt-proto.vercel.app".to_string(),
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Top-level mathdrill configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathdrillConfig {
    /// Unit issued when a request names none.
    #[serde(default = "default_unit")]
    pub default_unit: String,
    /// Tier used when a request names none.
    #[serde(default)]
    pub default_difficulty: Tier,
    /// Schema rules.
    #[serde(default)]
    pub schema: SchemaConfig,
    /// Generation ranges per skill and tier.
    #[serde(default)]
    pub tiers: TierTable,
    /// Adapter CORS policy.
    #[serde(default)]
    pub cors: CorsConfig,
}

fn default_unit() -> String {
    "fraction".to_string()
}

impl Default for MathdrillConfig {
    fn default() -> Self {
        Self {
            default_unit: default_unit(),
            default_difficulty: Tier::Normal,
            schema: SchemaConfig::default(),
            tiers: TierTable::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl MathdrillConfig {
    /// The template for [`default_unit`](Self::default_unit).
    pub fn default_template(&self) -> Result<SkillTemplate, ConfigError> {
        SkillTemplate::from_unit(&self.default_unit)
            .ok_or_else(|| ConfigError::UnknownUnit(self.default_unit.clone()))
    }

    /// Check everything the engine would otherwise reject later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_template()?;
        self.tiers.check()
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mathdrill.toml` in the current directory
/// 2. `~/.config/mathdrill/config.toml`
///
/// Environment variable overrides: `MATHDRILL_DEFAULT_DIFFICULTY`,
/// `MATHDRILL_ALLOWED_ORIGINS` (comma separated).
pub fn load_config() -> Result<MathdrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MathdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mathdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_str(
                &std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MathdrillConfig::default(),
    };

    if let Ok(level) = std::env::var("MATHDRILL_DEFAULT_DIFFICULTY") {
        config.default_difficulty = level
            .parse()
            .map_err(|e: String| anyhow::anyhow!("MATHDRILL_DEFAULT_DIFFICULTY: {e}"))?;
    }

    if let Ok(origins) = std::env::var("MATHDRILL_ALLOWED_ORIGINS") {
        config.cors.allowed_origins = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }

    config.cors.allowed_origins = config
        .cors
        .allowed_origins
        .iter()
        .map(|o| resolve_env_vars(o))
        .filter(|o| !o.is_empty())
        .collect();

    config.validate()?;
    Ok(config)
}

/// Parse a TOML string into a config without consulting the environment.
pub fn parse_config_str(content: &str) -> Result<MathdrillConfig> {
    let config: MathdrillConfig = toml::from_str(content)?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mathdrill"))
}
