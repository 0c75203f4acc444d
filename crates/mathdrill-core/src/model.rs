//! Core data model types for mathdrill.
//!
//! These are the types that cross the engine boundary: skill templates,
//! difficulty tiers, payloads, issued problem instances, and grade
//! requests/results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DrillError;

/// Which skill a problem exercises. Determines the payload shape and the
/// grading rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillTemplate {
    #[serde(rename = "math_frac_compare_v1")]
    FractionCompare,
    #[serde(rename = "math_gcd_v1")]
    Gcd,
}

impl SkillTemplate {
    pub const ALL: [SkillTemplate; 2] = [SkillTemplate::FractionCompare, SkillTemplate::Gcd];

    /// Wire identifier (e.g. `math_gcd_v1`).
    pub fn id(&self) -> &'static str {
        match self {
            SkillTemplate::FractionCompare => "math_frac_compare_v1",
            SkillTemplate::Gcd => "math_gcd_v1",
        }
    }

    /// Curriculum unit name used in query parameters and instance metadata.
    pub fn unit(&self) -> &'static str {
        match self {
            SkillTemplate::FractionCompare => "fraction",
            SkillTemplate::Gcd => "gcd",
        }
    }

    /// Skill tag recorded in instance metadata.
    pub fn skill(&self) -> &'static str {
        match self {
            SkillTemplate::FractionCompare => "fraction_compare",
            SkillTemplate::Gcd => "gcd",
        }
    }

    /// Resolve a unit name as accepted by the problem endpoint.
    pub fn from_unit(unit: &str) -> Option<Self> {
        match unit.trim().to_lowercase().as_str() {
            "fraction" | "fractions" | "fraction_compare" => Some(SkillTemplate::FractionCompare),
            "gcd" => Some(SkillTemplate::Gcd),
            _ => None,
        }
    }
}

impl fmt::Display for SkillTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SkillTemplate {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "math_frac_compare_v1" => Ok(SkillTemplate::FractionCompare),
            "math_gcd_v1" => Ok(SkillTemplate::Gcd),
            other => Err(DrillError::UnknownTemplate(other.to_string())),
        }
    }
}

/// Difficulty bucket. Each tier maps to generation ranges through a
/// [`TierTable`](crate::tiers::TierTable).
///
/// Deserializes through [`FromStr`], so config files accept the same names
/// and levels as request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Tier {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Normal, Tier::Hard];

    /// Lenient parse for request parameters: accepts tier names and numeric
    /// levels 1-3, and falls back to [`Tier::Normal`] for anything else.
    pub fn from_param(param: &str) -> Tier {
        param.parse().unwrap_or_else(|_| {
            tracing::debug!("unrecognized difficulty '{param}', using normal");
            Tier::Normal
        })
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Easy => write!(f, "easy"),
            Tier::Normal => write!(f, "normal"),
            Tier::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "1" => Ok(Tier::Easy),
            "normal" | "medium" | "2" => Ok(Tier::Normal),
            "hard" | "3" => Ok(Tier::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl TryFrom<String> for Tier {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Operands for comparing A/B against C/D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FractionPayload {
    #[serde(rename = "A")]
    pub a: i64,
    #[serde(rename = "B")]
    pub b: i64,
    #[serde(rename = "C")]
    pub c: i64,
    #[serde(rename = "D")]
    pub d: i64,
}

/// Operands for a greatest-common-divisor problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GcdPayload {
    #[serde(rename = "X")]
    pub x: i64,
    #[serde(rename = "Y")]
    pub y: i64,
}

/// The numeric data behind one problem draw.
///
/// Serialized without a tag; the shape is always decoded through the
/// template it travels with (see [`Payload::decode`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Fraction(FractionPayload),
    Gcd(GcdPayload),
}

impl Payload {
    /// Decode a payload into the shape `template` requires.
    pub fn decode(template: SkillTemplate, value: &serde_json::Value) -> Result<Self, DrillError> {
        let mismatch = |e: serde_json::Error| DrillError::PayloadMismatch {
            template,
            reason: e.to_string(),
        };
        match template {
            SkillTemplate::FractionCompare => serde_json::from_value(value.clone())
                .map(Payload::Fraction)
                .map_err(mismatch),
            SkillTemplate::Gcd => serde_json::from_value(value.clone())
                .map(Payload::Gcd)
                .map_err(mismatch),
        }
    }

    /// The template this payload shape belongs to.
    pub fn template(&self) -> SkillTemplate {
        match self {
            Payload::Fraction(_) => SkillTemplate::FractionCompare,
            Payload::Gcd(_) => SkillTemplate::Gcd,
        }
    }
}

/// One issued, renderable problem.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemInstance {
    pub instance_id: String,
    pub template_id: SkillTemplate,
    pub render: Render,
    pub meta: Meta,
    pub payload: Payload,
}

/// Presentation of a problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Render {
    /// Human-readable question text.
    pub stem: String,
    /// Answer fields, in display order.
    pub inputs: Vec<InputField>,
}

/// Descriptor for one answer field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputField {
    pub name: String,
    pub kind: InputKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

/// Expected answer shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// One of `>`, `<`, `=`.
    Relation,
    /// A base-10 integer.
    Integer,
}

/// Forward-compatible annotations carried with an instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub subject: String,
    pub unit: String,
    pub skills: Vec<String>,
    pub difficulty: Tier,
    pub issued_at: DateTime<Utc>,
}

/// A submitted answer, either free text or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Number(serde_json::Number),
}

impl Answer {
    /// Canonical string form used for comparison.
    ///
    /// Whole numbers render without a fractional part, so `6` and `6.0`
    /// both become `"6"`.
    pub fn as_text(&self) -> String {
        match self {
            Answer::Text(s) => s.clone(),
            Answer::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.to_string()
                } else if let Some(u) = n.as_u64() {
                    u.to_string()
                } else {
                    match n.as_f64() {
                        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                            format!("{}", f as i64)
                        }
                        Some(f) => f.to_string(),
                        None => n.to_string(),
                    }
                }
            }
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Answer::Text(s.to_string())
    }
}

impl From<i64> for Answer {
    fn from(n: i64) -> Self {
        Answer::Number(n.into())
    }
}

/// A decoded, schema-checked grade request.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRequest {
    pub template_id: SkillTemplate,
    pub answer: Answer,
    pub payload: Payload,
}

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub correct: bool,
    pub ground_truth: String,
    pub feedback: String,
}
