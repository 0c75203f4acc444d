//! Cross-origin policy.
//!
//! Exact-match allow-list. Allowed origins are echoed back with
//! `Vary: Origin`; anything else gets no CORS headers at all.

use mathdrill_core::config::CorsConfig;

use crate::response::ApiResponse;

const ALLOWED_METHODS: &str = "GET,HEAD,POST,OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    pub fn from_config(config: &CorsConfig) -> Self {
        Self::new(config.allowed_origins.clone())
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }

    /// Add CORS headers to a normal response.
    pub fn apply(&self, origin: Option<&str>, response: &mut ApiResponse) {
        if let Some(origin) = origin.filter(|o| self.allows(o)) {
            response.set_header("Access-Control-Allow-Origin", origin);
            response.set_header("Vary", "Origin");
        }
    }

    /// Answer an `OPTIONS` preflight.
    pub fn preflight(&self, origin: Option<&str>) -> ApiResponse {
        let mut response = ApiResponse::no_content();
        if let Some(origin) = origin.filter(|o| self.allows(o)) {
            response.set_header("Access-Control-Allow-Origin", origin);
            response.set_header("Vary", "Origin");
            response.set_header("Access-Control-Allow-Methods", ALLOWED_METHODS);
            response.set_header("Access-Control-Allow-Headers", ALLOWED_HEADERS);
        } else if let Some(origin) = origin {
            tracing::debug!("rejected preflight from origin {origin}");
        }
        response
    }
}
