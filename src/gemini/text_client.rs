use crate::{
    error::{GenerationError, Result},
    gemini::transport::ModelTransport,
    logger,
    models::{GenerateContentRequest, Part},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TextClient {
    transport: Arc<dyn ModelTransport>,
    model: String,
}

impl TextClient {
    pub fn new(transport: Arc<dyn ModelTransport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a single plain-text prompt and returns the model's text answer.
    pub async fn generate(&self, api_key: &str, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::new(vec![Part::text(prompt)]);

        log::info!("Invoking text model: {}", self.model);
        let _timer = logger::timer("text generation");

        let response = self
            .transport
            .generate_content(api_key, &self.model, &request)
            .await?;

        response.text().ok_or(GenerationError::EmptyResponse)
    }
}
