use shared_types::{CredentialDefinitionId, CredentialId};
use strum::Display;

use crate::model::connection::ConnectionStatus;
use crate::model::credential::{CredentialAttribute, CredentialState};
use crate::model::invitation::Invitation;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssueCredentialRequestDTO {
    pub credential_definition_id: CredentialDefinitionId,
    pub attributes: Vec<CredentialAttribute>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssuedCredentialDTO {
    pub invitation: Invitation,
    pub credential_id: CredentialId,
    pub connection_polls: u32,
    pub credential_polls: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrustedConnectionDTO {
    pub status: ConnectionStatus,
    pub polls: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssuedCredentialStateDTO {
    pub state: CredentialState,
    pub polls: u32,
}

/// What a polling loop is waiting for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum PollTarget {
    #[strum(serialize = "trusted connection")]
    TrustedConnection,
    #[strum(serialize = "issued credential")]
    IssuedCredential,
}

/// Progress of a single issuance flow.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IssuanceFlowState {
    Start,
    Invited,
    Connected,
    Offered,
    Issued,
}
