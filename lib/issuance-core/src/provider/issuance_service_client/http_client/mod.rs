use std::sync::Arc;

use crate::provider::http_client::HttpClient;

mod dto;
mod provider;


pub struct HTTPIssuanceServiceClient {
    http_client: Arc<dyn HttpClient>,
}

impl HTTPIssuanceServiceClient {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }
}
