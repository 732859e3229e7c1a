use std::path::Path;
use std::time::Duration;

use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(feature = "config_json")]
use figment::providers::Json;
#[cfg(feature = "config_yaml")]
use figment::providers::Yaml;
use figment::providers::{Data, Format};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as, skip_serializing_none};
use shared_types::CredentialDefinitionId;
use url::Url;

use super::{ConfigParsingError, ConfigValidationError};
use crate::model::credential::CredentialAttribute;

const DEFAULT_INVITATION_GRACE_PERIOD: Duration = Duration::from_millis(5000);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2500);

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppCustomConfigSerdeDTO<Custom> {
    #[serde(default)]
    pub(super) app: Custom,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig<Custom> {
    pub core: CoreConfig,
    #[serde(default)]
    pub app: Custom,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub issuance: IssuanceConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

impl CoreConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.service.endpoints()?;
        self.issuance.validate()?;
        self.polling.validate()
    }
}

/// Location of the issuing service. Every endpoint defaults to a path below
/// `base_url` and can be overridden on its own.
#[skip_serializing_none]
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub create_invitation_url: Option<String>,
    /// Prefix, the connection id is appended.
    pub connection_status_url: Option<String>,
    pub create_offer_url: Option<String>,
    /// Prefix, the credential id is appended.
    pub credential_state_url: Option<String>,
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub create_invitation: String,
    pub connection_status: String,
    pub create_offer: String,
    pub credential_state: String,
}

impl ServiceConfig {
    pub fn endpoints(&self) -> Result<ServiceEndpoints, ConfigValidationError> {
        Ok(ServiceEndpoints {
            create_invitation: self.resolve(
                "createInvitation",
                &self.create_invitation_url,
                "/v1/invitation-url?alias=trust",
            )?,
            connection_status: self.resolve(
                "connectionStatus",
                &self.connection_status_url,
                "/v1/connections/",
            )?,
            create_offer: self.resolve(
                "createOffer",
                &self.create_offer_url,
                "/v1/create-offer-credential",
            )?,
            credential_state: self.resolve(
                "credentialState",
                &self.credential_state_url,
                "/v1/credential/",
            )?,
        })
    }

    fn resolve(
        &self,
        name: &'static str,
        override_url: &Option<String>,
        default_path: &str,
    ) -> Result<String, ConfigValidationError> {
        let url = match (override_url, &self.base_url) {
            (Some(url), _) => url.to_owned(),
            (None, Some(base_url)) => format!("{}{default_path}", base_url.trim_end_matches('/')),
            (None, None) => return Err(ConfigValidationError::MissingEndpoint(name)),
        };

        Url::parse(&url).map_err(|source| ConfigValidationError::InvalidUrl {
            name,
            url: url.to_owned(),
            source,
        })?;

        Ok(url)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuanceConfig {
    pub credential_definition_id: CredentialDefinitionId,
    pub attributes: Vec<CredentialAttribute>,
}

impl IssuanceConfig {
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.credential_definition_id.as_str().trim().is_empty() {
            return Err(ConfigValidationError::MissingCredentialDefinitionId);
        }
        if self.attributes.is_empty() {
            return Err(ConfigValidationError::MissingAttributes);
        }
        Ok(())
    }
}

/// Timing and termination policy shared by both polling loops.
#[skip_serializing_none]
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollingConfig {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub invitation_grace_period: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub poll_interval: Duration,
    /// Unbounded when unset.
    pub max_attempts: Option<u32>,
    /// Wall-clock limit per loop, unbounded when unset.
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub deadline: Option<Duration>,
    /// Connection states that end the flow with an error instead of polling on.
    pub connection_failure_states: Vec<String>,
    /// Credential states that end the flow with an error instead of polling on.
    pub credential_failure_states: Vec<String>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            invitation_grace_period: DEFAULT_INVITATION_GRACE_PERIOD,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            deadline: None,
            connection_failure_states: vec![],
            credential_failure_states: vec![],
        }
    }
}

impl PollingConfig {
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigValidationError::InvalidPollInterval);
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigValidationError::InvalidMaxAttempts);
        }
        Ok(())
    }
}

/// A configuration source, later sources override earlier ones.
pub enum InputFormat {
    #[cfg(feature = "config_yaml")]
    Yaml(Data<Yaml>),
    #[cfg(feature = "config_json")]
    Json(Data<Json>),
}

impl InputFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigParsingError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "config_yaml")]
            Some("yml" | "yaml") => Ok(InputFormat::Yaml(Yaml::file(path))),
            #[cfg(feature = "config_json")]
            Some("json") => Ok(InputFormat::Json(Json::file(path))),
            _ => Err(ConfigParsingError::GeneralParsingError(format!(
                "Unsupported config file `{}`",
                path.display()
            ))),
        }
    }
}

impl<Custom> AppConfig<Custom>
where
    Custom: Serialize + DeserializeOwned + Default,
{
    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigParsingError> {
        let inputs = files
            .iter()
            .map(|path| InputFormat::from_path(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        AppConfig::parse(inputs)
    }

    #[cfg(feature = "config_yaml")]
    pub fn from_yaml(
        configs: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ConfigParsingError> {
        AppConfig::parse(
            configs
                .into_iter()
                .map(|config| InputFormat::Yaml(Yaml::string(config.as_ref()))),
        )
    }

    pub fn parse(
        inputs: impl IntoIterator<Item = InputFormat>,
    ) -> Result<Self, ConfigParsingError> {
        let mut figment = Figment::new();

        for data in inputs {
            figment = match data {
                #[cfg(feature = "config_yaml")]
                InputFormat::Yaml(content) => figment.merge(content),
                #[cfg(feature = "config_json")]
                InputFormat::Json(content) => figment.merge(content),
            };
        }

        #[cfg(feature = "config_env")]
        {
            figment = figment.merge(Env::prefixed("ISSUANCE_").split("__").lowercase(false));
        }

        let core = figment
            .extract::<CoreConfig>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))?;
        let custom = figment
            .extract::<AppCustomConfigSerdeDTO<Custom>>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))?;
        Ok(Self {
            core,
            app: custom.app,
        })
    }
}
