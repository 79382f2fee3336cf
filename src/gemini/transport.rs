use crate::{
    config::GatewayConfig,
    error::{GenerationError, Result},
    models::{GenerateContentRequest, GenerateContentResponse},
};
use async_trait::async_trait;
use reqwest::Client;

/// The single outbound call the gateway needs. Implemented over HTTP for
/// production and by scripted fakes in tests.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url().to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl ModelTransport for HttpTransport {
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        log::debug!("POST {} ({} parts)", url, request.parts().len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::error!("Model {} returned {}: {}", model, status, body);
            // Keep the raw status and body in the message; callers look for
            // "403" / "PERMISSION_DENIED" in it.
            return Err(GenerationError::Transport {
                status: Some(status.as_u16()),
                message: format!("{} {}", status, body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            GenerationError::SerializationError(format!("Failed to parse response: {}", e))
        })
    }
}
