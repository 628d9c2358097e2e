pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;
pub mod workflow;

pub use config::ServiceConfig;
pub use error::{GenerationError, RecommendError};
pub use models::*;
pub use service::{AppState, build_router};
pub use workflow::RecommendationService;
