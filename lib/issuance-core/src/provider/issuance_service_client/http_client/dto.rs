use one_dto_mapper::From;
use serde::{Deserialize, Serialize};
use shared_types::{ConnectionId, CredentialDefinitionId, CredentialId};

use crate::model::connection::ConnectionStatus;
use crate::model::credential::{CredentialAttribute, CredentialState};
use crate::model::invitation::Invitation;

/// Every response of the service wraps its payload in `data`.
#[derive(Clone, Debug, Deserialize)]
pub(super) struct ResponseEnvelopeRestDTO<T> {
    pub data: T,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InvitationRestDTO {
    pub invitation_url: String,
    pub connection: ConnectionReferenceRestDTO,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct ConnectionReferenceRestDTO {
    pub id: ConnectionId,
}

impl From<InvitationRestDTO> for Invitation {
    fn from(value: InvitationRestDTO) -> Self {
        Self {
            invitation_url: value.invitation_url,
            connection_id: value.connection.id,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct ConnectionRecordsRestDTO {
    pub records: ConnectionRecordRestDTO,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct ConnectionRecordRestDTO {
    pub status: ConnectionStatus,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateCredentialOfferRequestRestDTO {
    pub connection_id: ConnectionId,
    pub credential_definition_id: CredentialDefinitionId,
    pub comment: String,
    pub attributes: Vec<CredentialAttributeRestDTO>,
    pub auto_accept_credential: AutoAcceptCredentialRestEnum,
}

#[derive(Clone, Debug, Serialize, From)]
#[from(CredentialAttribute)]
pub(super) struct CredentialAttributeRestDTO {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) enum AutoAcceptCredentialRestEnum {
    Always,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct CredentialOfferRestDTO {
    pub id: CredentialId,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct CredentialRecordRestDTO {
    pub state: CredentialState,
}
