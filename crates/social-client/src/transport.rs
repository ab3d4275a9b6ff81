//! Shared HTTP plumbing for the REST transports

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Client, server root and bearer token
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: Client,
    base_url: String,
    access_token: String,
}

impl Transport {
    pub(crate) fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> ClientResult<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url, access_token))
    }

    pub(crate) fn with_client(
        client: Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub(crate) fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.access_token = access_token.into();
    }

    /// Absolute URL for a path relative to `/api/v1`
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(&self.access_token)
    }

    /// Send and decode a JSON success body
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = Self::checked(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Send and discard the success body
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> ClientResult<()> {
        Self::checked(request.send().await?).await?;
        Ok(())
    }

    async fn checked(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        debug!(status = status.as_u16(), "Request rejected");
        Err(match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) => ClientError::api(status.as_u16(), error.code, error.message),
            Err(_) => ClientError::api(
                status.as_u16(),
                "HTTP_ERROR",
                status.canonical_reason().unwrap_or("Unexpected response"),
            ),
        })
    }
}
