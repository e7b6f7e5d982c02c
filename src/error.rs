use thiserror::Error;

/// Engine errors. Configuration problems are raised once at context creation,
/// malformed input at the head of each pipeline stage. An all-rejected video is
/// not an error and produces an empty processed sequence instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter {name}: {value} (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("malformed input: {0}")]
    MalformedInput(String),
}
