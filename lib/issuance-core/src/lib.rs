use std::sync::Arc;

use config::ConfigError;
use config::core_config::CoreConfig;
use provider::http_client::reqwest_client::ReqwestClient;
use provider::invitation_presenter::InvitationPresenter;
use provider::issuance_service_client::http_client::HTTPIssuanceServiceClient;
use service::issuance::IssuanceService;
use util::sleeper::TokioSleeper;

pub mod config;
pub mod model;
pub mod provider;
pub mod service;
pub mod util;

#[derive(Clone)]
pub struct IssuanceCore {
    pub issuance_service: IssuanceService,
}

impl IssuanceCore {
    /// Validates `config` and wires the HTTP-backed service client.
    pub fn new(
        config: &CoreConfig,
        presenter: Arc<dyn InvitationPresenter>,
    ) -> Result<IssuanceCore, ConfigError> {
        config.validate()?;
        let endpoints = config.service.endpoints()?;

        let http_client = ReqwestClient::new(config.service.request_timeout)?;
        let client = Arc::new(HTTPIssuanceServiceClient::new(Arc::new(http_client)));

        Ok(IssuanceCore {
            issuance_service: IssuanceService::new(
                client,
                Arc::new(TokioSleeper),
                presenter,
                endpoints,
                config.polling.clone(),
            ),
        })
    }
}
