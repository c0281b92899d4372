//! `reqwest`-backed transport.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{Method, RequestBody, Transport, WireRequest, WireResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Transport speaking HTTP(S) to `base_url`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: WireRequest) -> ClientResult<WireResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self.client.request(to_reqwest(request.method), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Bytes { content_type, data } => {
                builder.header("Content-Type", content_type).body(data)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("{} {url} failed: {e}", request.method)))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(format!("read response body failed: {e}")))?;

        Ok(WireResponse::new(status, body.to_vec()))
    }
}
