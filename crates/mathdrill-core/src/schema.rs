//! Schema contract for problem instances and grade requests.
//!
//! Both checks walk a `serde_json::Value` and collect every field-level
//! violation instead of stopping at the first one. The payload rule is a
//! oneOf over the fraction and GCD shapes, each closed to extra fields.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const FRACTION_FIELDS: [&str; 4] = ["A", "B", "C", "D"];
const GCD_FIELDS: [&str; 2] = ["X", "Y"];
const GRADE_REQUEST_FIELDS: [&str; 3] = ["answer", "template_id", "payload"];

/// One broken rule, located by a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Dotted path to the offending field (`$` for the document root).
    pub path: String,
    /// What is wrong with it.
    pub reason: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Result of a schema check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether any violation sits at exactly `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

impl From<Vec<Violation>> for ValidationReport {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s)", self.violations.len())?;
        for (i, v) in self.violations.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Tunable schema rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Minimum number of characters in `render.stem`.
    #[serde(default = "default_stem_min_length")]
    pub stem_min_length: usize,
}

fn default_stem_min_length() -> usize {
    1
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            stem_min_length: default_stem_min_length(),
        }
    }
}

/// Compiled validator. Built once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: SchemaConfig,
}

impl Validator {
    pub fn new(config: SchemaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Check an outgoing problem instance. Unknown fields are allowed at the
    /// instance and render level.
    pub fn validate_instance(&self, value: &Value) -> ValidationReport {
        let mut out = Vec::new();
        let Some(obj) = as_object(value, "$", &mut out) else {
            return out.into();
        };

        match obj.get("instance_id") {
            None => out.push(Violation::new("instance_id", "is required")),
            Some(Value::String(s)) if s.is_empty() => {
                out.push(Violation::new("instance_id", "must not be empty"))
            }
            Some(Value::String(_)) => {}
            Some(_) => out.push(Violation::new("instance_id", "must be a string")),
        }

        require_string(obj, "template_id", "template_id", &mut out);

        match obj.get("render") {
            None => out.push(Violation::new("render", "is required")),
            Some(render) => self.check_render(render, &mut out),
        }

        if let Some(meta) = obj.get("meta") {
            if !meta.is_object() {
                out.push(Violation::new("meta", "must be an object"));
            }
        }

        match obj.get("payload") {
            None => out.push(Violation::new("payload", "is required")),
            Some(payload) => check_payload(payload, "payload", &mut out),
        }

        out.into()
    }

    /// Check an incoming grade request. Closed to extra top-level fields.
    pub fn validate_grade_request(&self, value: &Value) -> ValidationReport {
        let mut out = Vec::new();
        let Some(obj) = as_object(value, "$", &mut out) else {
            return out.into();
        };

        for key in obj.keys() {
            if !GRADE_REQUEST_FIELDS.contains(&key.as_str()) {
                out.push(Violation::new(key.as_str(), "is not an allowed field"));
            }
        }

        match obj.get("answer") {
            None => out.push(Violation::new("answer", "is required")),
            Some(Value::String(_) | Value::Number(_)) => {}
            Some(_) => out.push(Violation::new("answer", "must be a string or a number")),
        }

        require_string(obj, "template_id", "template_id", &mut out);

        match obj.get("payload") {
            None => out.push(Violation::new("payload", "is required")),
            Some(payload) => check_payload(payload, "payload", &mut out),
        }

        out.into()
    }

    fn check_render(&self, render: &Value, out: &mut Vec<Violation>) {
        let Some(obj) = as_object(render, "render", out) else {
            return;
        };

        match obj.get("stem") {
            None => out.push(Violation::new("render.stem", "is required")),
            Some(Value::String(stem)) => {
                let min = self.config.stem_min_length;
                if stem.chars().count() < min {
                    out.push(Violation::new(
                        "render.stem",
                        format!("must be at least {min} character(s)"),
                    ));
                }
            }
            Some(_) => out.push(Violation::new("render.stem", "must be a string")),
        }

        if let Some(inputs) = obj.get("inputs") {
            if !inputs.is_array() {
                out.push(Violation::new("render.inputs", "must be an array"));
            }
        }
    }
}

fn as_object<'a>(
    value: &'a Value,
    path: &str,
    out: &mut Vec<Violation>,
) -> Option<&'a Map<String, Value>> {
    let obj = value.as_object();
    if obj.is_none() {
        out.push(Violation::new(path, "must be an object"));
    }
    obj
}

fn require_string(obj: &Map<String, Value>, key: &str, path: &str, out: &mut Vec<Violation>) {
    match obj.get(key) {
        None => out.push(Violation::new(path, "is required")),
        Some(Value::String(_)) => {}
        Some(_) => out.push(Violation::new(path, "must be a string")),
    }
}

/// Violations of one closed payload shape.
fn shape_violations(obj: &Map<String, Value>, fields: &[&str], path: &str) -> Vec<Violation> {
    let mut out = Vec::new();
    for field in fields {
        let field_path = format!("{path}.{field}");
        match obj.get(*field) {
            None => out.push(Violation::new(field_path, "is required")),
            Some(v) if v.as_i64().is_some() => {}
            Some(_) => out.push(Violation::new(field_path, "must be a 64-bit integer")),
        }
    }
    for key in obj.keys() {
        if !fields.contains(&key.as_str()) {
            out.push(Violation::new(
                format!("{path}.{key}"),
                "is not an allowed field",
            ));
        }
    }
    out
}

/// oneOf(fraction, gcd). On failure, reports the closest shape's violations
/// after a summary entry at `path`.
fn check_payload(value: &Value, path: &str, out: &mut Vec<Violation>) {
    let Some(obj) = as_object(value, path, out) else {
        return;
    };

    let fraction = shape_violations(obj, &FRACTION_FIELDS, path);
    let gcd = shape_violations(obj, &GCD_FIELDS, path);

    match (fraction.is_empty(), gcd.is_empty()) {
        (true, false) | (false, true) => {}
        (true, true) => out.push(Violation::new(path, "matches more than one payload shape")),
        (false, false) => {
            out.push(Violation::new(
                path,
                "must match exactly one payload shape: fraction {A, B, C, D} or gcd {X, Y}",
            ));
            match fraction.len().cmp(&gcd.len()) {
                std::cmp::Ordering::Less => out.extend(fraction),
                std::cmp::Ordering::Greater => out.extend(gcd),
                std::cmp::Ordering::Equal => {
                    out.extend(fraction);
                    out.extend(gcd);
                }
            }
        }
    }
}
