use shared_types::{ConnectionId, CredentialId};
use tokio_util::sync::CancellationToken;

use super::IssuanceService;
use super::dto::{
    IssueCredentialRequestDTO, IssuanceFlowState, IssuedCredentialDTO, IssuedCredentialStateDTO,
    PollTarget, TrustedConnectionDTO,
};
use super::polling::poll_until;
use crate::model::invitation::Invitation;
use crate::service::error::ServiceError;

impl IssuanceService {
    /// Runs one complete issuance flow: invitation, trusted connection, offer, delivered credential.
    ///
    /// Steps run strictly in order. Any error ends the flow, nothing is rolled back.
    pub async fn issue_credential(
        &self,
        request: IssueCredentialRequestDTO,
        cancellation_token: &CancellationToken,
    ) -> Result<IssuedCredentialDTO, ServiceError> {
        log_transition(IssuanceFlowState::Start);

        let invitation = self.create_invitation().await?;
        log_transition(IssuanceFlowState::Invited);

        self.presenter.present(&invitation);
        tokio::select! {
            biased;
            _ = cancellation_token.cancelled() => return Err(ServiceError::Cancelled),
            _ = self.sleeper.sleep(self.polling.invitation_grace_period) => {}
        }

        let connection = self
            .wait_for_trusted_connection(&invitation.connection_id, cancellation_token)
            .await?;
        log_transition(IssuanceFlowState::Connected);

        let credential_id = self
            .offer_credential(&invitation.connection_id, &request)
            .await?;
        log_transition(IssuanceFlowState::Offered);

        let credential = self
            .wait_for_issued_credential(&credential_id, cancellation_token)
            .await?;
        log_transition(IssuanceFlowState::Issued);

        Ok(IssuedCredentialDTO {
            invitation,
            credential_id,
            connection_polls: connection.polls,
            credential_polls: credential.polls,
        })
    }

    pub async fn create_invitation(&self) -> Result<Invitation, ServiceError> {
        let invitation = self
            .client
            .create_invitation(&self.endpoints.create_invitation)
            .await?;

        tracing::info!(
            connection_id = %invitation.connection_id,
            "Created invitation"
        );

        Ok(invitation)
    }

    /// Polls the connection until the service reports it as trusted.
    pub async fn wait_for_trusted_connection(
        &self,
        connection_id: &ConnectionId,
        cancellation_token: &CancellationToken,
    ) -> Result<TrustedConnectionDTO, ServiceError> {
        let endpoint = self.endpoints.connection_status.as_str();
        let failure_states = &self.polling.connection_failure_states;

        let outcome = poll_until(
            self.sleeper.as_ref(),
            &self.polling,
            PollTarget::TrustedConnection,
            cancellation_token,
            || self.client.get_connection_status(connection_id, endpoint),
            |status| status.is_trusted(),
            |status| {
                if failure_states.iter().any(|state| state == status.as_str()) {
                    tracing::warn!(%connection_id, "Connection reported failure status `{status}`");
                    return Err(ServiceError::ConnectionFailed {
                        connection_id: connection_id.to_owned(),
                        status,
                    });
                }
                Ok(status)
            },
        )
        .await?;

        Ok(TrustedConnectionDTO {
            status: outcome.value,
            polls: outcome.attempts,
        })
    }

    /// Offers a credential over a connection that must already be trusted.
    pub async fn offer_credential(
        &self,
        connection_id: &ConnectionId,
        request: &IssueCredentialRequestDTO,
    ) -> Result<CredentialId, ServiceError> {
        let credential_id = self
            .client
            .create_credential_offer(
                connection_id,
                &request.attributes,
                &request.credential_definition_id,
                &self.endpoints.create_offer,
            )
            .await?;

        tracing::info!(
            %connection_id,
            %credential_id,
            attributes = request.attributes.len(),
            "Created credential offer"
        );

        Ok(credential_id)
    }

    /// Polls the credential until the service reports it as done.
    pub async fn wait_for_issued_credential(
        &self,
        credential_id: &CredentialId,
        cancellation_token: &CancellationToken,
    ) -> Result<IssuedCredentialStateDTO, ServiceError> {
        let endpoint = self.endpoints.credential_state.as_str();
        let failure_states = &self.polling.credential_failure_states;

        let outcome = poll_until(
            self.sleeper.as_ref(),
            &self.polling,
            PollTarget::IssuedCredential,
            cancellation_token,
            || self.client.get_credential_state(credential_id, endpoint),
            |state| state.is_done(),
            |state| {
                if failure_states.iter().any(|failure| failure == state.as_str()) {
                    tracing::warn!(%credential_id, "Credential reported failure state `{state}`");
                    return Err(ServiceError::CredentialFailed {
                        credential_id: credential_id.to_owned(),
                        state,
                    });
                }
                Ok(state)
            },
        )
        .await?;

        Ok(IssuedCredentialStateDTO {
            state: outcome.value,
            polls: outcome.attempts,
        })
    }
}

fn log_transition(state: IssuanceFlowState) {
    tracing::debug!(%state, "Issuance flow state");
}
