//! mathdrill-core: problem generation, schema validation, and grading.
//!
//! The engine is a pure function of its inputs: it issues randomly drawn
//! fraction-comparison and GCD problems, and grades answers against a ground
//! truth recomputed from the payload. Nothing is persisted between calls.

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod grader;
pub mod model;
pub mod schema;
pub mod tiers;

pub use config::{load_config, load_config_from, MathdrillConfig};
pub use engine::Engine;
pub use error::{ConfigError, DrillError};
pub use model::{GradeRequest, GradeResult, Payload, ProblemInstance, SkillTemplate, Tier};
