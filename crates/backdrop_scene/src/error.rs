//! Scene error types

use thiserror::Error;

/// Scene configuration errors
///
/// Every variant is raised while building a scene. Ticking a built scene
/// cannot fail.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The TOML document could not be read into a config
    #[error("Failed to parse scene config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A count outside what the scene can build
    #[error("Invalid count for {field}: {count} (allowed {min}..={max})")]
    InvalidCount {
        field: String,
        count: usize,
        min: usize,
        max: usize,
    },

    /// A physics coefficient outside its stable range
    #[error("Invalid coefficient {field} = {value}: expected {expected}")]
    InvalidCoefficient {
        field: String,
        value: f32,
        expected: &'static str,
    },

    /// A size, speed, or other numeric parameter that is not finite or out of range
    #[error("Invalid parameter {field} = {value}: expected {expected}")]
    InvalidParameter {
        field: String,
        value: f32,
        expected: &'static str,
    },
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
