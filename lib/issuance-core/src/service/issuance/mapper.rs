use super::dto::IssueCredentialRequestDTO;
use crate::config::core_config::IssuanceConfig;

impl From<IssuanceConfig> for IssueCredentialRequestDTO {
    fn from(value: IssuanceConfig) -> Self {
        Self {
            credential_definition_id: value.credential_definition_id,
            attributes: value.attributes,
        }
    }
}
