use thiserror::Error;

/// Fatal error kinds of the synthesis engine. None of these are retried
/// internally: each aborts the current load, enumeration or rendering.
#[derive(Debug, Error)]
pub enum SynthError {
    /// An operation was declared without a full set of type annotations.
    #[error("annotation missing for `{symbol}` of operation `{operation}`")]
    AnnotationMissing { operation: String, symbol: String },

    /// No candidate action could be produced for the initial configuration.
    #[error("synthesis is impossible: {0}")]
    Synthesis(String),

    /// Illegal mutation of a program graph. Always a programmer bug.
    #[error("illegal program graph mutation: {0}")]
    State(String),

    /// Rendering was attempted on a graph that still has empty blanks.
    #[error("cannot render program: {0}")]
    Render(String),
}

/// Failure of a single program evaluation. Unlike [`SynthError`], it is caught
/// by the evaluator and recorded as a failed example.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("evaluation failed: {0}")]
pub struct EvalError(pub String);

impl EvalError {
    pub fn new(msg: impl Into<String>) -> EvalError {
        EvalError(msg.into())
    }
}
