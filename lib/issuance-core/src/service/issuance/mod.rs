use std::sync::Arc;

use crate::config::core_config::{PollingConfig, ServiceEndpoints};
use crate::provider::invitation_presenter::InvitationPresenter;
use crate::provider::issuance_service_client::IssuanceServiceClient;
use crate::util::sleeper::Sleeper;

pub mod dto;
pub mod service;

mod mapper;
mod polling;

#[cfg(test)]
mod test;

/// Drives invitation, connection, offer and credential delivery against the issuing service.
///
/// Holds no per-flow state, clones can run independent flows side by side.
#[derive(Clone)]
pub struct IssuanceService {
    client: Arc<dyn IssuanceServiceClient>,
    sleeper: Arc<dyn Sleeper>,
    presenter: Arc<dyn InvitationPresenter>,
    endpoints: Arc<ServiceEndpoints>,
    polling: Arc<PollingConfig>,
}

impl IssuanceService {
    pub fn new(
        client: Arc<dyn IssuanceServiceClient>,
        sleeper: Arc<dyn Sleeper>,
        presenter: Arc<dyn InvitationPresenter>,
        endpoints: ServiceEndpoints,
        polling: PollingConfig,
    ) -> Self {
        Self {
            client,
            sleeper,
            presenter,
            endpoints: Arc::new(endpoints),
            polling: Arc::new(polling),
        }
    }
}
