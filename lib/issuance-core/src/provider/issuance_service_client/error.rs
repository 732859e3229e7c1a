use thiserror::Error;

#[derive(Debug, Error)]
pub enum IssuanceServiceClientError {
    #[error("Transport error: {0:#}")]
    Transport(anyhow::Error),
    #[error("Malformed `{operation}` response: {reason}")]
    MalformedResponse {
        operation: &'static str,
        reason: String,
    },
}
