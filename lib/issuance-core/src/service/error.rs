use std::time::Duration;

use shared_types::{ConnectionId, CredentialId};
use thiserror::Error;

use crate::model::connection::ConnectionStatus;
use crate::model::credential::CredentialState;
use crate::provider::issuance_service_client::error::IssuanceServiceClientError;
use crate::service::issuance::dto::PollTarget;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Issuance service client error: `{0}`")]
    ServiceClient(#[from] IssuanceServiceClientError),

    #[error("Connection `{connection_id}` reported failure status `{status}`")]
    ConnectionFailed {
        connection_id: ConnectionId,
        status: ConnectionStatus,
    },

    #[error("Credential `{credential_id}` reported failure state `{state}`")]
    CredentialFailed {
        credential_id: CredentialId,
        state: CredentialState,
    },

    #[error("Stopped waiting for {target} after {attempts} polls, last value `{last_value}`")]
    PollingExhausted {
        target: PollTarget,
        attempts: u32,
        last_value: String,
    },

    #[error("Deadline of {deadline:?} exceeded while waiting for {target}")]
    DeadlineExceeded {
        target: PollTarget,
        deadline: Duration,
    },

    #[error("Issuance cancelled")]
    Cancelled,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    Transport,
    MalformedResponse,

    Connection001,
    Credential001,

    Polling001,
    Polling002,

    Cancelled,
}

impl ServiceError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ServiceError::ServiceClient(IssuanceServiceClientError::Transport(_)) => {
                ErrorCode::Transport
            }
            ServiceError::ServiceClient(IssuanceServiceClientError::MalformedResponse {
                ..
            }) => ErrorCode::MalformedResponse,
            ServiceError::ConnectionFailed { .. } => ErrorCode::Connection001,
            ServiceError::CredentialFailed { .. } => ErrorCode::Credential001,
            ServiceError::PollingExhausted { .. } => ErrorCode::Polling001,
            ServiceError::DeadlineExceeded { .. } => ErrorCode::Polling002,
            ServiceError::Cancelled => ErrorCode::Cancelled,
        }
    }
}

impl ErrorCode {
    pub const fn msg(&self) -> &'static str {
        match self {
            ErrorCode::Transport => "Issuing service unreachable or returned an error status",
            ErrorCode::MalformedResponse => "Issuing service returned an unexpected response",

            ErrorCode::Connection001 => "Connection failed",
            ErrorCode::Credential001 => "Credential issuance failed",

            ErrorCode::Polling001 => "Maximum poll attempts reached",
            ErrorCode::Polling002 => "Polling deadline exceeded",

            ErrorCode::Cancelled => "Cancelled",
        }
    }
}
