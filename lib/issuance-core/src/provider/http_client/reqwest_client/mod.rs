use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use super::{Error, HttpClient, Method, Request, Response, StatusCode};

const JSON: &str = "application/json";

#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Requests fail with [`Error::Timeout`] once `request_timeout` elapses, unbounded when unset.
    pub fn new(request_timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| Error::Request(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        let Request { method, url, body } = request;

        let mut builder = match method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()).header(CONTENT_TYPE, JSON),
        }
        .header(ACCEPT, JSON);

        if let Some(body) = &body {
            tracing::trace!(%method, %url, %body, "Request body");
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(%method, %url, "HTTP request failed: {e}");
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Request(e.to_string())
            }
        })?;

        // headers are not read, the service only communicates through the body
        let status = StatusCode(response.status().as_u16());
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Request(e.to_string()))?
            .to_vec();

        tracing::debug!(%method, %url, %status, "HTTP exchange completed");
        tracing::trace!(body = %String::from_utf8_lossy(&body), "Response body");

        Ok(Response { status, body })
    }
}
