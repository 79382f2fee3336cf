pub mod image_client;
pub mod text_client;
pub mod transport;

use crate::{
    config::GatewayConfig,
    credentials::{CredentialProvider, EnvCredentials},
    error::{GenerationError, Result},
    models::{decode_image_input, AspectRatio, GeneratedImage, GenerationRequest, Part},
    prompt,
};
use std::sync::Arc;

pub use image_client::{extract_image, ImageClient};
pub use text_client::TextClient;
pub use transport::{HttpTransport, ModelTransport};

/// Mediates between caller state and the hosted models: builds payloads,
/// runs the calls and normalizes what comes back.
#[derive(Clone)]
pub struct GenerationGateway {
    image_client: ImageClient,
    text_client: TextClient,
    credentials: Arc<dyn CredentialProvider>,
}

impl GenerationGateway {
    /// HTTP transport with keys read from `API_KEY` / `GEMINI_API_KEY`.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Ok(Self::with_transport(
            config,
            transport,
            Arc::new(EnvCredentials::new()),
        ))
    }

    pub fn with_transport(
        config: &GatewayConfig,
        transport: Arc<dyn ModelTransport>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            image_client: ImageClient::new(transport.clone(), config.image_model()),
            text_client: TextClient::new(transport, config.text_model()),
            credentials,
        }
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn has_credential(&self) -> bool {
        self.credentials.has_credential()
    }

    fn api_key(&self) -> Result<String> {
        self.credentials.api_key().ok_or_else(|| {
            log::warn!("No API key configured");
            GenerationError::MissingCredential
        })
    }

    /// Generates a thumbnail and its SEO caption. Both model calls run
    /// concurrently; the first failure is returned and the other call is dropped.
    pub async fn generate_initial(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        let api_key = self.api_key()?;

        let image_prompt = prompt::compose_image_prompt(
            &request.niche,
            &request.video_title,
            request.thumbnail_text(),
            request.details(),
            request.face().is_some(),
            request.environment().is_some(),
        );
        let metadata_prompt = prompt::compose_metadata_prompt(&request.video_title, &request.niche);

        let mut parts = vec![Part::text(image_prompt.as_str())];
        for reference in [request.face(), request.environment(), request.style()]
            .into_iter()
            .flatten()
        {
            parts.push(Part::inline(&decode_image_input(reference)?));
        }

        log::info!(
            "Generating thumbnail for \"{}\" ({} reference images)",
            request.video_title,
            parts.len() - 1
        );

        let image_call =
            self.image_client
                .generate(&api_key, parts, request.aspect_ratio, &image_prompt);
        let metadata_call = self.text_client.generate(&api_key, &metadata_prompt);

        let (image, caption) = futures::try_join!(image_call, metadata_call).map_err(|e| {
            log::error!("Generation failed: {}", e);
            e
        })?;

        Ok(image.with_caption(Some(caption)))
    }

    /// Re-renders `prior` according to `instruction`. No metadata call is made;
    /// `prior_caption` is carried over as is.
    pub async fn edit_image(
        &self,
        prior: &GeneratedImage,
        instruction: &str,
        aspect_ratio: AspectRatio,
        prior_caption: Option<String>,
        face_reference: Option<&str>,
    ) -> Result<GeneratedImage> {
        let api_key = self.api_key()?;

        let mut parts = vec![
            Part::text(prompt::compose_edit_prompt(instruction)),
            Part::inline(&prior.image),
        ];
        if let Some(face) = face_reference.filter(|s| !s.trim().is_empty()) {
            parts.push(Part::inline(&decode_image_input(face)?));
        }

        log::info!("Editing image {}: {}", prior.id, instruction);

        let image = self
            .image_client
            .generate(&api_key, parts, aspect_ratio, instruction)
            .await
            .map_err(|e| {
                log::error!("Edit failed: {}", e);
                e
            })?;

        Ok(image.with_caption(prior_caption))
    }
}
