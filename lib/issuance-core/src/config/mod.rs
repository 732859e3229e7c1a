use thiserror::Error;

pub mod core_config;


#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parsing error: `{0}`")]
    Parsing(#[from] ConfigParsingError),
    #[error("Config validation error: `{0}`")]
    Validation(#[from] ConfigValidationError),
    #[error("HTTP client setup error: `{0}`")]
    HttpClient(#[from] crate::provider::http_client::Error),
}

#[derive(Debug, Error)]
pub enum ConfigParsingError {
    #[error("Parsing error: `{0}`")]
    GeneralParsingError(String),
}

#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Missing endpoint `{0}`: neither baseUrl nor an override is set")]
    MissingEndpoint(&'static str),
    #[error("Invalid URL `{url}` for endpoint `{name}`: {source}")]
    InvalidUrl {
        name: &'static str,
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Missing credential definition id")]
    MissingCredentialDefinitionId,
    #[error("No credential attributes configured")]
    MissingAttributes,
    #[error("Poll interval must be greater than zero")]
    InvalidPollInterval,
    #[error("maxAttempts must be greater than zero")]
    InvalidMaxAttempts,
}
