use issuance_core::model::credential::CredentialAttribute;
use issuance_core::model::invitation::Invitation;
use issuance_core::provider::invitation_presenter::InvitationPresenter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    pub trace_level: Option<String>,
    pub trace_json: Option<bool>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttributeArgError {
    #[error("Expected `name=value`, got `{0}`")]
    MissingSeparator(String),
    #[error("Attribute name must not be empty")]
    EmptyName,
}

/// Parses `name=value`. Only the first `=` separates, the value may contain more.
pub fn parse_attribute(arg: &str) -> Result<CredentialAttribute, AttributeArgError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| AttributeArgError::MissingSeparator(arg.to_owned()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(AttributeArgError::EmptyName);
    }

    Ok(CredentialAttribute::new(name, value))
}

/// Prints the invitation URL to stdout so it can be piped into a QR encoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutInvitationPresenter;

impl InvitationPresenter for StdoutInvitationPresenter {
    fn present(&self, invitation: &Invitation) {
        tracing::info!(connection_id = %invitation.connection_id, "Waiting for the wallet to accept the invitation");
        println!("{}", invitation.invitation_url);
    }
}
