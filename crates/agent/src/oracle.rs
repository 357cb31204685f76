use std::sync::Arc;

use async_trait::async_trait;
use scout_core::Turn;
use thiserror::Error;

/// The external generative-language model, treated as a black-box
/// completion function that may fail.
///
/// `instruction` is out-of-band guidance (a system instruction); `turns`
/// is the conversation context the completion should continue. Callers
/// decide whether that context is the live session transcript or an
/// ad-hoc one assembled for a side-channel request.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn complete(&self, instruction: &str, turns: &[Turn]) -> Result<String, OracleError>;
}

#[async_trait]
impl<T: Oracle + ?Sized> Oracle for Arc<T> {
    async fn complete(&self, instruction: &str, turns: &[Turn]) -> Result<String, OracleError> {
        (**self).complete(instruction, turns).await
    }
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("completion contained no text")]
    EmptyCompletion,
}

impl From<reqwest::Error> for OracleError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
