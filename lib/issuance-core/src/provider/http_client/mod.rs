use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use strum::Display;
use thiserror::Error;
use url::Url;

pub mod reqwest_client;

/// One JSON request/response exchange with a remote service.
///
/// Any status the server answers with is returned as a [`Response`], only failures to
/// complete the exchange are errors.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, Error>;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum Method {
    #[strum(serialize = "GET")]
    Get,
    #[strum(serialize = "POST")]
    Post,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
}

impl Request {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            body: None,
        }
    }

    pub fn post(url: Url) -> Self {
        Self {
            method: Method::Post,
            url,
            body: None,
        }
    }

    pub fn with_json(self, body: &impl Serialize) -> Result<Self, Error> {
        Ok(Self {
            body: Some(serde_json::to_value(body).map_err(Error::Encode)?),
            ..self
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Response {
    /// Body of a 2xx response as JSON.
    pub fn into_json(self) -> Result<Value, Error> {
        if !self.status.is_success() {
            return Err(Error::Status {
                status: self.status,
                body: String::from_utf8_lossy(&self.body).into_owned(),
            });
        }

        serde_json::from_slice(&self.body).map_err(Error::NotJson)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Server answered HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Response body is not JSON: {0}")]
    NotJson(#[source] serde_json::Error),
    #[error("Cannot encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}
