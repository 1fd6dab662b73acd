//! Error types.
//!
//! Layout itself never fails; these cover caller-side validation and scene
//! loading.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("paged count {paged} is not a multiple of arranged count {arranged}")]
    UnevenPaging { paged: usize, arranged: usize },

    #[error("paging requires a count-constrained layout (arranged count is 0)")]
    PagingWithoutCount,

    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidValue { field: &'static str, value: f32 },

    #[error("floating spacing: max spacing {max} is below min spacing {min}")]
    FloatingRange { min: f32, max: f32 },
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}
