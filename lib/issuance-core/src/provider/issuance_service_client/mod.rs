use shared_types::{ConnectionId, CredentialDefinitionId, CredentialId};

use crate::model::connection::ConnectionStatus;
use crate::model::credential::{CredentialAttribute, CredentialState};
use crate::model::invitation::Invitation;
use crate::provider::issuance_service_client::error::IssuanceServiceClientError;

pub mod error;
pub mod http_client;

/// Remote credential-management service.
///
/// Each call is a single request/response exchange, retry policy belongs to the caller.
/// Status endpoints are prefixes, the id is appended to them.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait IssuanceServiceClient: Send + Sync {
    async fn create_invitation(
        &self,
        endpoint: &str,
    ) -> Result<Invitation, IssuanceServiceClientError>;

    async fn get_connection_status(
        &self,
        connection_id: &ConnectionId,
        endpoint: &str,
    ) -> Result<ConnectionStatus, IssuanceServiceClientError>;

    async fn create_credential_offer(
        &self,
        connection_id: &ConnectionId,
        attributes: &[CredentialAttribute],
        credential_definition_id: &CredentialDefinitionId,
        endpoint: &str,
    ) -> Result<CredentialId, IssuanceServiceClientError>;

    async fn get_credential_state(
        &self,
        credential_id: &CredentialId,
        endpoint: &str,
    ) -> Result<CredentialState, IssuanceServiceClientError>;
}
