use crate::{
    error::{GenerationError, Result},
    gemini::transport::ModelTransport,
    logger,
    models::{
        AspectRatio, EncodedImage, GenerateContentRequest, GenerateContentResponse,
        GeneratedImage, Part, DEFAULT_OUTPUT_MIME,
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ImageClient {
    transport: Arc<dyn ModelTransport>,
    model: String,
}

impl ImageClient {
    pub fn new(transport: Arc<dyn ModelTransport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends an ordered multi-part payload to the image model and extracts the
    /// first image. `provenance` is recorded as the result's prompt.
    pub async fn generate(
        &self,
        api_key: &str,
        parts: Vec<Part>,
        aspect_ratio: AspectRatio,
        provenance: &str,
    ) -> Result<GeneratedImage> {
        let request = GenerateContentRequest::new(parts).with_aspect_ratio(aspect_ratio);

        log::info!(
            "Generating image with model: {} ({}, {} parts)",
            self.model,
            aspect_ratio,
            request.parts().len()
        );
        let _timer = logger::timer("image generation");

        let response = self
            .transport
            .generate_content(api_key, &self.model, &request)
            .await?;

        extract_image(&response, provenance)
    }
}

/// Pulls the first inline image out of the first candidate.
pub fn extract_image(response: &GenerateContentResponse, prompt: &str) -> Result<GeneratedImage> {
    let parts = response
        .first_candidate_parts()
        .ok_or(GenerationError::EmptyResponse)?;

    let inline = parts
        .iter()
        .find_map(Part::as_inline_data)
        .ok_or_else(|| {
            log::warn!("Image model answered without an image part");
            GenerationError::NoImageProduced
        })?;

    let mime_type = inline
        .mime_type
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_OUTPUT_MIME);
    let image = EncodedImage::from_base64(mime_type, &inline.data)?;

    Ok(GeneratedImage::new(image, prompt))
}
