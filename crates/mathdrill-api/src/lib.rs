//! mathdrill-api: request adapter for the mathdrill engine.
//!
//! Maps parsed HTTP-shaped requests onto the engine and back into JSON
//! responses with CORS headers. Socket binding is left to whichever server
//! embeds [`Api`].

pub mod cors;
pub mod request;
pub mod response;
pub mod routes;

pub use cors::CorsPolicy;
pub use request::{ApiRequest, Method};
pub use response::ApiResponse;
pub use routes::{Api, GRADE_PATH, NEXT_PROBLEM_PATH};
