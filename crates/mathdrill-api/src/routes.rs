//! Route table: next problem, grade attempt, CORS preflight, 404.

use std::sync::Arc;

use rand::Rng;
use serde_json::{json, Value};

use mathdrill_core::config::MathdrillConfig;
use mathdrill_core::{ConfigError, DrillError, Engine, SkillTemplate, Tier};

use crate::cors::CorsPolicy;
use crate::request::{ApiRequest, Method};
use crate::response::ApiResponse;

pub const NEXT_PROBLEM_PATH: &str = "/api/v1/problems/next";
pub const GRADE_PATH: &str = "/api/v1/grade";

/// The request adapter. Cheap to clone; the engine is shared.
#[derive(Debug, Clone)]
pub struct Api {
    engine: Arc<Engine>,
    cors: CorsPolicy,
    default_template: SkillTemplate,
    default_tier: Tier,
}

impl Api {
    pub fn new(engine: Arc<Engine>, config: &MathdrillConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            engine,
            cors: CorsPolicy::from_config(&config.cors),
            default_template: config.default_template()?,
            default_tier: config.default_difficulty,
        })
    }

    /// Build the engine and the adapter from one config.
    pub fn from_config(config: &MathdrillConfig) -> Result<Self, ConfigError> {
        Self::new(Arc::new(Engine::from_config(config)?), config)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Route one request.
    pub fn handle<R: Rng + ?Sized>(&self, request: &ApiRequest, rng: &mut R) -> ApiResponse {
        let origin = request.origin.as_deref();
        let route = request.route();

        if request.method == Method::Options && route.starts_with("/api") {
            return self.cors.preflight(origin);
        }

        let mut response = match (request.method, route) {
            (Method::Get, NEXT_PROBLEM_PATH) => self.next_problem(request, rng),
            (Method::Post, GRADE_PATH) => self.grade(&request.body),
            _ => ApiResponse::json(404, json!({"error": "not found"})),
        };
        tracing::debug!(method = %request.method, route, status = response.status, "handled request");

        if route.starts_with("/api") {
            self.cors.apply(origin, &mut response);
        }
        response
    }

    /// `GET /api/v1/problems/next?unit=..&difficulty=..`
    pub fn next_problem<R: Rng + ?Sized>(&self, request: &ApiRequest, rng: &mut R) -> ApiResponse {
        let template = request
            .query_param(&["unit", "type"])
            .map(|unit| {
                SkillTemplate::from_unit(unit).unwrap_or_else(|| {
                    tracing::debug!("unrecognized unit '{unit}', using {}", self.default_template.unit());
                    self.default_template
                })
            })
            .unwrap_or(self.default_template);
        let tier = request
            .query_param(&["difficulty", "level"])
            .map(Tier::from_param)
            .unwrap_or(self.default_tier);

        match self.engine.next_problem(template, tier, rng) {
            Ok(instance) => match serde_json::to_value(&instance) {
                Ok(body) => ApiResponse::json(200, body),
                Err(e) => {
                    tracing::error!("failed to serialize instance: {e}");
                    internal_error()
                }
            },
            Err(err) => error_response(&err),
        }
    }

    /// `POST /api/v1/grade`
    pub fn grade(&self, body: &str) -> ApiResponse {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                return ApiResponse::json(
                    400,
                    json!({"ok": false, "reason": "invalid-json", "message": e.to_string()}),
                )
            }
        };

        match self.engine.grade_value(&value) {
            Ok(result) => ApiResponse::json(
                200,
                json!({
                    "ok": true,
                    "correct": result.correct,
                    "expected": result.ground_truth,
                    "ground_truth": result.ground_truth,
                    "feedback": result.feedback,
                }),
            ),
            Err(err) => error_response(&err),
        }
    }
}

fn internal_error() -> ApiResponse {
    ApiResponse::json(500, json!({"error": "internal-error"}))
}

/// Caller errors carry their diagnostics; internal errors are logged and
/// reported generically.
fn error_response(err: &DrillError) -> ApiResponse {
    if !err.is_caller_error() {
        tracing::error!("internal contract failure: {err}");
        return internal_error();
    }

    let mut body = json!({
        "ok": false,
        "reason": err.reason_code(),
        "message": err.to_string(),
    });
    if let Some(report) = err.report() {
        body["errors"] = json!(report);
    }
    ApiResponse::json(err.status_code(), body)
}
