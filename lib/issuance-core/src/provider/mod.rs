pub mod http_client;
pub mod invitation_presenter;
pub mod issuance_service_client;
