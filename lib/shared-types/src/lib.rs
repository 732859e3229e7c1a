mod macros;

mod connection_id;
mod credential_definition_id;
mod credential_id;

pub use connection_id::ConnectionId;
pub use credential_definition_id::CredentialDefinitionId;
pub use credential_id::CredentialId;
