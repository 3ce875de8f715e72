use thiserror::Error;

/// Fatal, programming-error-only failures of the learner.
///
/// Nothing in normal operation produces these: a correctly implemented
/// closer/builder/minimizer never hits them. They exist so that an
/// internal invariant violation fails loudly instead of silently
/// producing a wrong machine.
#[derive(Debug, Error)]
pub enum LearnerError {
    #[error("observation table invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, LearnerError>;
