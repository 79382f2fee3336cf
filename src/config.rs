use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Gateway settings. The API key is deliberately not part of this; it comes
/// from a [`crate::credentials::CredentialProvider`] at call time.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    pub api_base_url: Option<String>,
    pub image_model: Option<String>,
    pub text_model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub history_limit: Option<usize>,
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_base_url = env::var("GEMINI_API_BASE_URL").ok();
        let image_model = env::var("THUMBFORGE_IMAGE_MODEL").ok();
        let text_model = env::var("THUMBFORGE_TEXT_MODEL").ok();
        let timeout_secs = env::var("THUMBFORGE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());
        let history_limit = env::var("THUMBFORGE_HISTORY_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok());

        GatewayConfig {
            api_base_url,
            image_model,
            text_model,
            timeout_secs,
            history_limit,
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn with_models(mut self, image_model: impl Into<String>, text_model: impl Into<String>) -> Self {
        self.image_model = Some(image_model.into());
        self.text_model = Some(text_model.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn image_model(&self) -> &str {
        self.image_model.as_deref().unwrap_or(DEFAULT_IMAGE_MODEL)
    }

    pub fn text_model(&self) -> &str {
        self.text_model.as_deref().unwrap_or(DEFAULT_TEXT_MODEL)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
