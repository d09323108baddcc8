//! Remote procedure transport for the social service.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::SocialConfig;
use crate::error::{CompassError, Result};

/// Procedure namespace on the remote router
const NAMESPACE: &str = "market.social";

/// Future returned by [`SocialTransport::call`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<Value>> + Send + 'a>>;

/// Read or write procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Read-only procedure
    Query,
    /// State-changing procedure
    Mutation,
}

/// Transport trait for the remote procedure endpoint.
///
/// Implementations send `params` as the procedure input and return the
/// procedure's result as-is.
pub trait SocialTransport: Send + Sync {
    /// Invoke `procedure` (without namespace) with `params`.
    fn call(&self, kind: CallKind, procedure: &str, params: Value) -> TransportFuture<'_>;
}

/// HTTP transport speaking the tRPC convention: queries are
/// `GET <endpoint>/<path>?input=<json>`, mutations `POST <endpoint>/<path>`
/// with a JSON body; results arrive as `{"result": {"data": ...}}`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport from configuration
    pub fn new(config: &SocialConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompassError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for a procedure
    pub fn url(&self, procedure: &str) -> String {
        format!("{}/{NAMESPACE}.{procedure}", self.endpoint)
    }

    async fn send(&self, kind: CallKind, procedure: &str, params: Value) -> Result<Value> {
        let url = self.url(procedure);
        tracing::debug!(%url, ?kind, "social call");

        let request = match kind {
            CallKind::Query => self
                .client
                .get(&url)
                .query(&[("input", serde_json::to_string(&params)?)]),
            CallKind::Mutation => self.client.post(&url).json(&params),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompassError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        Ok(unwrap_envelope(body))
    }
}

impl SocialTransport for HttpTransport {
    fn call(&self, kind: CallKind, procedure: &str, params: Value) -> TransportFuture<'_> {
        let procedure = procedure.to_string();
        Box::pin(async move { self.send(kind, &procedure, params).await })
    }
}

/// Take `result.data` out of a tRPC response, or return the body unchanged.
fn unwrap_envelope(mut body: Value) -> Value {
    match body.pointer_mut("/result/data") {
        Some(data) => data.take(),
        None => body,
    }
}
