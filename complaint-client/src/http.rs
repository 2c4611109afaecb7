//! HTTP client for network-based API calls

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::ErrorBody;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making network requests to the complaint server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Attach the bearer token (if any) and send
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        handle_response(response).await
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.get(self.url(path))).await
    }

    /// Make a GET request with query parameters
    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.post(self.url(path))).await
    }

    /// Make a POST request with a multipart form
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ClientResult<T> {
        self.send(self.client.post(self.url(path)).multipart(form)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.client.patch(self.url(path)).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.delete(self.url(path))).await
    }
}

/// Handle the HTTP response
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> ClientResult<T> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await?;
        let body = ErrorBody::from_text(&text);
        tracing::debug!(%status, code = ?body.code, message = %body.message, "Request failed");
        return Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(body),
            StatusCode::FORBIDDEN => ClientError::Forbidden(body),
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            StatusCode::BAD_REQUEST
            | StatusCode::UNPROCESSABLE_ENTITY
            | StatusCode::PAYLOAD_TOO_LARGE => ClientError::Validation(body),
            _ => ClientError::Internal(body),
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:3000/")).unwrap();
        assert_eq!(
            client.url("/api/complaints"),
            "http://localhost:3000/api/complaints"
        );
        assert_eq!(client.url("health"), "http://localhost:3000/health");
    }

    #[test]
    fn test_token_handling() {
        let mut client = HttpClient::new(&ClientConfig::default()).unwrap();
        assert!(client.token().is_none());
        client.set_token(Some("t".into()));
        assert_eq!(client.token(), Some("t"));
        let client = client.with_token("other");
        assert_eq!(client.token(), Some("other"));
    }
}
