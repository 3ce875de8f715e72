use thiserror::Error;

/// Errors at the CLI's process boundary — never part of the learner
/// core's own error surface (see `learner_core::error::LearnerError`).
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid address {0:?}: {1}")]
    Addr(String, std::net::AddrParseError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Learner(#[from] learner_core::LearnerError),
}
