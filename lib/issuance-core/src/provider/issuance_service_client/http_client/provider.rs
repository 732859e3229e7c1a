use anyhow::Context;
use serde::de::DeserializeOwned;
use shared_types::{ConnectionId, CredentialDefinitionId, CredentialId};
use url::Url;

use super::HTTPIssuanceServiceClient;
use super::dto::{
    AutoAcceptCredentialRestEnum, ConnectionRecordsRestDTO, CreateCredentialOfferRequestRestDTO,
    CredentialOfferRestDTO, CredentialRecordRestDTO, InvitationRestDTO, ResponseEnvelopeRestDTO,
};
use crate::model::connection::ConnectionStatus;
use crate::model::credential::{CredentialAttribute, CredentialState};
use crate::model::invitation::Invitation;
use crate::provider::http_client::{Request, Response};
use crate::provider::issuance_service_client::IssuanceServiceClient;
use crate::provider::issuance_service_client::error::IssuanceServiceClientError;

#[async_trait::async_trait]
impl IssuanceServiceClient for HTTPIssuanceServiceClient {
    async fn create_invitation(
        &self,
        endpoint: &str,
    ) -> Result<Invitation, IssuanceServiceClientError> {
        let url = parse_url(endpoint)?;

        self.fetch::<InvitationRestDTO>(Request::post(url), "create invitation")
            .await
            .map(Into::into)
    }

    async fn get_connection_status(
        &self,
        connection_id: &ConnectionId,
        endpoint: &str,
    ) -> Result<ConnectionStatus, IssuanceServiceClientError> {
        let url = parse_url(&format!("{endpoint}{connection_id}"))?;

        self.fetch::<ConnectionRecordsRestDTO>(Request::get(url), "get connection status")
            .await
            .map(|data| data.records.status)
    }

    async fn create_credential_offer(
        &self,
        connection_id: &ConnectionId,
        attributes: &[CredentialAttribute],
        credential_definition_id: &CredentialDefinitionId,
        endpoint: &str,
    ) -> Result<CredentialId, IssuanceServiceClientError> {
        let url = parse_url(endpoint)?;

        let request = Request::post(url)
            .with_json(&CreateCredentialOfferRequestRestDTO {
                connection_id: connection_id.to_owned(),
                credential_definition_id: credential_definition_id.to_owned(),
                comment: String::new(),
                attributes: attributes.iter().cloned().map(Into::into).collect(),
                auto_accept_credential: AutoAcceptCredentialRestEnum::Always,
            })
            .context("encode error")
            .map_err(IssuanceServiceClientError::Transport)?;

        self.fetch::<CredentialOfferRestDTO>(request, "create credential offer")
            .await
            .map(|data| data.id)
    }

    async fn get_credential_state(
        &self,
        credential_id: &CredentialId,
        endpoint: &str,
    ) -> Result<CredentialState, IssuanceServiceClientError> {
        let url = parse_url(&format!("{endpoint}{credential_id}"))?;

        self.fetch::<CredentialRecordRestDTO>(Request::get(url), "get credential state")
            .await
            .map(|data| data.state)
    }
}

impl HTTPIssuanceServiceClient {
    /// Sends the request and unwraps the `data` envelope.
    ///
    /// Network failures, error statuses and non-JSON bodies are transport errors,
    /// a JSON body without the expected fields is a malformed response.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: Request,
        operation: &'static str,
    ) -> Result<T, IssuanceServiceClientError> {
        let body = self
            .http_client
            .send(request)
            .await
            .and_then(Response::into_json)
            .with_context(|| format!("`{operation}` exchange failed"))
            .map_err(IssuanceServiceClientError::Transport)?;

        serde_json::from_value::<ResponseEnvelopeRestDTO<T>>(body)
            .map(|envelope| envelope.data)
            .map_err(|e| {
                tracing::warn!("Unexpected `{operation}` response shape: {e}");
                IssuanceServiceClientError::MalformedResponse {
                    operation,
                    reason: e.to_string(),
                }
            })
    }
}

fn parse_url(url: &str) -> Result<Url, IssuanceServiceClientError> {
    Url::parse(url)
        .context("url error")
        .map_err(IssuanceServiceClientError::Transport)
}
