//! Problem generation.
//!
//! Draws a payload from the tier table, renders it into an instance, and
//! runs the instance through the schema validator before handing it out.

use chrono::Utc;
use rand::Rng;

use crate::error::{ConfigError, DrillError};
use crate::model::{
    FractionPayload, GcdPayload, InputField, InputKind, Meta, Payload, ProblemInstance, Render,
    SkillTemplate, Tier,
};
use crate::schema::Validator;
use crate::tiers::{FractionRanges, GcdRanges, TierTable};

/// Draws and renders problem instances.
#[derive(Debug, Clone)]
pub struct Generator {
    tiers: TierTable,
}

impl Generator {
    /// Build a generator over a checked tier table.
    pub fn new(tiers: TierTable) -> Result<Self, ConfigError> {
        tiers.check()?;
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Generate a self-validated instance.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        template: SkillTemplate,
        tier: Tier,
        validator: &Validator,
        rng: &mut R,
    ) -> Result<ProblemInstance, DrillError> {
        let payload = self.draw(template, tier, rng);
        let instance = render_instance(template, tier, payload, rng);

        let value = serde_json::to_value(&instance).map_err(|e| {
            DrillError::InternalContract(
                vec![crate::schema::Violation::new("$", e.to_string())].into(),
            )
        })?;
        let report = validator.validate_instance(&value);
        if !report.is_valid() {
            tracing::error!(
                template = %template,
                %tier,
                "generated instance failed self-validation: {report}"
            );
            return Err(DrillError::InternalContract(report));
        }

        tracing::debug!(
            instance_id = %instance.instance_id,
            template = %template,
            %tier,
            "issued problem instance"
        );
        Ok(instance)
    }

    /// Draw a payload for `template` at `tier`.
    pub fn draw<R: Rng + ?Sized>(&self, template: SkillTemplate, tier: Tier, rng: &mut R) -> Payload {
        match template {
            SkillTemplate::FractionCompare => {
                Payload::Fraction(draw_fraction(self.tiers.fraction(tier), rng))
            }
            SkillTemplate::Gcd => Payload::Gcd(draw_gcd(self.tiers.gcd(tier), rng)),
        }
    }
}

impl Default for Generator {
    /// Generator over the built-in tier table, which always passes `check`.
    fn default() -> Self {
        Self {
            tiers: TierTable::default(),
        }
    }
}

/// Draw A/B and C/D. An exactly equal pair gets A bumped by one.
pub fn draw_fraction<R: Rng + ?Sized>(ranges: &FractionRanges, rng: &mut R) -> FractionPayload {
    let mut p = FractionPayload {
        a: ranges.numerator.sample(rng),
        b: ranges.denominator.sample(rng),
        c: ranges.numerator.sample(rng),
        d: ranges.denominator.sample(rng),
    };
    if p.a * p.d == p.c * p.b {
        p.a += 1;
    }
    p
}

/// Draw X and Y. Equal operands get X bumped by one.
pub fn draw_gcd<R: Rng + ?Sized>(ranges: &GcdRanges, rng: &mut R) -> GcdPayload {
    let mut p = GcdPayload {
        x: ranges.operand.sample(rng),
        y: ranges.operand.sample(rng),
    };
    if p.x == p.y {
        p.x += 1;
    }
    p
}

fn render_instance<R: Rng + ?Sized>(
    template: SkillTemplate,
    tier: Tier,
    payload: Payload,
    rng: &mut R,
) -> ProblemInstance {
    let (stem, input) = match payload {
        Payload::Fraction(p) => (
            format!(
                "Compare the fractions {}/{} and {}/{}. Answer with >, < or =.",
                p.a, p.b, p.c, p.d
            ),
            InputField {
                name: "answer".into(),
                kind: InputKind::Relation,
                choices: vec![">".into(), "<".into(), "=".into()],
            },
        ),
        Payload::Gcd(p) => (
            format!(
                "Find the greatest common divisor of {} and {}. Answer with a whole number.",
                p.x, p.y
            ),
            InputField {
                name: "answer".into(),
                kind: InputKind::Integer,
                choices: vec![],
            },
        ),
    };

    let id = uuid::Builder::from_random_bytes(rng.random()).into_uuid();

    ProblemInstance {
        instance_id: format!("q_{}", id.simple()),
        template_id: template,
        render: Render {
            stem,
            inputs: vec![input],
        },
        meta: Meta {
            subject: "math".into(),
            unit: template.unit().into(),
            skills: vec![template.skill().into()],
            difficulty: tier,
            issued_at: Utc::now(),
        },
        payload,
    }
}
