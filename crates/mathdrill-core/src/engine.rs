//! Engine facade.
//!
//! Owns the compiled validator and the generator, and wires them into the
//! two request flows: issue a problem, grade an answer.

use rand::Rng;
use serde_json::Value;

use crate::config::MathdrillConfig;
use crate::error::{ConfigError, DrillError};
use crate::generator::Generator;
use crate::grader;
use crate::model::{Answer, GradeRequest, GradeResult, Payload, ProblemInstance, SkillTemplate, Tier};
use crate::schema::{SchemaConfig, ValidationReport, Validator, Violation};
use crate::tiers::TierTable;

/// Stateless problem engine. Build once, share by reference.
#[derive(Debug, Clone)]
pub struct Engine {
    validator: Validator,
    generator: Generator,
}

impl Engine {
    pub fn new(schema: SchemaConfig, tiers: TierTable) -> Result<Self, ConfigError> {
        Ok(Self {
            validator: Validator::new(schema),
            generator: Generator::new(tiers)?,
        })
    }

    pub fn from_config(config: &MathdrillConfig) -> Result<Self, ConfigError> {
        Self::new(config.schema.clone(), config.tiers.clone())
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn tiers(&self) -> &TierTable {
        self.generator.tiers()
    }

    /// Issue a fresh, self-validated problem instance.
    pub fn next_problem<R: Rng + ?Sized>(
        &self,
        template: SkillTemplate,
        tier: Tier,
        rng: &mut R,
    ) -> Result<ProblemInstance, DrillError> {
        self.generator.generate(template, tier, &self.validator, rng)
    }

    /// Validate a raw grade request and decode it into typed form.
    ///
    /// Order matters: schema first, then the template id, then the payload
    /// shape the template requires.
    pub fn parse_grade_request(&self, value: &Value) -> Result<GradeRequest, DrillError> {
        let report = self.validator.validate_grade_request(value);
        if !report.is_valid() {
            return Err(DrillError::InvalidInput(report));
        }

        let template_id: SkillTemplate = value["template_id"]
            .as_str()
            .unwrap_or_default()
            .parse()?;
        let payload = Payload::decode(template_id, &value["payload"])?;
        let answer: Answer = serde_json::from_value(value["answer"].clone()).map_err(|e| {
            DrillError::InvalidInput(ValidationReport::from(vec![Violation::new(
                "answer",
                e.to_string(),
            )]))
        })?;

        Ok(GradeRequest {
            template_id,
            answer,
            payload,
        })
    }

    /// Validate, decode, and grade a raw request body.
    pub fn grade_value(&self, value: &Value) -> Result<GradeResult, DrillError> {
        let request = self.parse_grade_request(value)?;
        grader::grade(&request)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            validator: Validator::default(),
            generator: Generator::default(),
        }
    }
}
