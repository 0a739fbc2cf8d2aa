use super::config::{ConnectionConfig, Credentials};
use super::hal::strip_links;
use super::{SendMethod, Transport, TransportFactory};
use crate::core::{ClientError, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// [`Transport`] over HTTP with Basic authentication
pub struct HttpTransport {
    client: Client,
    config: ConnectionConfig,
    authorization: String,
}

impl HttpTransport {
    pub fn new(config: &ConnectionConfig, credentials: &Credentials) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config: config.clone(),
            authorization: credentials.authorization(),
        })
    }

    fn request(&self, method: Method, resource: &str) -> RequestBuilder {
        self.client
            .request(method, self.config.resource_url(resource))
            .header(AUTHORIZATION, &self.authorization)
    }

    async fn execute(&self, request: RequestBuilder, method: &str, resource: &str) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(method, resource, status = status.as_u16(), "boat store answered");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn read_json(response: Response) -> Result<Value> {
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        let mut value: Value = serde_json::from_slice(&bytes)?;
        strip_links(&mut value);
        Ok(value)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_one(&self, resource: &str) -> Result<Value> {
        let request = self.request(Method::GET, resource);
        let response = self.execute(request, "GET", resource).await?;
        Self::read_json(response).await
    }

    async fn send(&self, resource: &str, method: SendMethod, body: &Value) -> Result<Value> {
        let http_method = match method {
            SendMethod::Post => Method::POST,
            SendMethod::Put => Method::PUT,
            SendMethod::Patch => Method::PATCH,
        };

        let request = self.request(http_method, resource).json(body);
        let response = self.execute(request, method.as_str(), resource).await?;
        Self::read_json(response).await
    }

    async fn remove(&self, resource: &str) -> Result<()> {
        let request = self.request(Method::DELETE, resource);
        self.execute(request, "DELETE", resource).await?;
        Ok(())
    }
}

/// Builds [`HttpTransport`]s against one configured boat store
#[derive(Debug, Clone)]
pub struct HttpTransportFactory {
    config: ConnectionConfig,
}

impl HttpTransportFactory {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }
}

impl TransportFactory for HttpTransportFactory {
    fn build(&self, credentials: &Credentials) -> Result<Arc<dyn Transport>> {
        let transport = HttpTransport::new(&self.config, credentials)?;
        Ok(Arc::new(transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_rejects_invalid_base_url() {
        let config = ConnectionConfig::new("localhost:8080");
        let result = HttpTransport::new(&config, &Credentials::new("admin", "hunter2"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_factory_builds_transport() {
        let factory = HttpTransportFactory::new(ConnectionConfig::default());
        assert!(factory.build(&Credentials::new("admin", "hunter2")).is_ok());
    }
}
