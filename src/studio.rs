use crate::{
    config::GatewayConfig,
    error::{GenerationError, Result},
    gemini::GenerationGateway,
    history::History,
    models::{GeneratedImage, GenerationRequest},
};

pub const PERMISSION_DENIED_PROMPT: &str =
    "Error 403: access denied. Select a valid API key with access to the image model.";

/// Session state for one user: the working brief, the image on screen and
/// everything generated so far.
pub struct Studio {
    gateway: GenerationGateway,
    config: GenerationRequest,
    current: Option<GeneratedImage>,
    history: History,
    credential_ready: bool,
    last_error: Option<String>,
}

impl Studio {
    pub fn new(gateway: GenerationGateway, settings: &GatewayConfig) -> Self {
        let history = match settings.history_limit {
            Some(limit) => History::bounded(limit),
            None => History::new(),
        };
        let credential_ready = gateway.has_credential();

        Self {
            gateway,
            config: GenerationRequest::default(),
            current: None,
            history,
            credential_ready,
            last_error: None,
        }
    }

    pub fn config(&self) -> &GenerationRequest {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GenerationRequest {
        &mut self.config
    }

    pub fn current(&self) -> Option<&GeneratedImage> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True once a call has failed for credential reasons, until the host
    /// reports a fresh selection via [`Studio::credential_selected`].
    pub fn needs_credential(&self) -> bool {
        !self.credential_ready
    }

    pub fn credential_selected(&mut self) {
        self.credential_ready = true;
        self.last_error = None;
    }

    pub async fn generate(&mut self) -> Result<GeneratedImage> {
        self.last_error = None;
        match self.gateway.generate_initial(&self.config).await {
            Ok(image) => Ok(self.accept(image)),
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Edits the current image. Returns `Ok(None)` when there is nothing to edit.
    pub async fn edit(&mut self, instruction: &str) -> Result<Option<GeneratedImage>> {
        let Some(current) = self.current.as_ref() else {
            return Ok(None);
        };

        self.last_error = None;
        let result = self
            .gateway
            .edit_image(
                current,
                instruction,
                self.config.aspect_ratio,
                current.caption.clone(),
                self.config.face(),
            )
            .await;

        match result {
            Ok(image) => Ok(Some(self.accept(image))),
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Brings a history entry back on screen.
    pub fn select(&mut self, id: &str) -> Option<&GeneratedImage> {
        let image = self.history.get(id)?.clone();
        self.current = Some(image);
        self.current.as_ref()
    }

    fn accept(&mut self, image: GeneratedImage) -> GeneratedImage {
        self.history.push(image.clone());
        self.current = Some(image.clone());
        image
    }

    fn reject(&mut self, err: GenerationError) -> GenerationError {
        if err.is_credential_problem() {
            self.credential_ready = false;
        }
        self.last_error = Some(if err.is_permission_denied() {
            PERMISSION_DENIED_PROMPT.to_string()
        } else {
            err.to_string()
        });
        err
    }
}
