use std::env;
use std::sync::{Arc, RwLock};

/// Source of the API key. Queried on every call, never at construction, so a
/// key chosen interactively after startup is picked up by the next request.
pub trait CredentialProvider: Send + Sync {
    fn api_key(&self) -> Option<String>;

    fn has_credential(&self) -> bool {
        self.api_key().is_some()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Reads the first non-blank variable from the process environment.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    vars: Vec<String>,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self {
            vars: vec!["API_KEY".to_string(), "GEMINI_API_KEY".to_string()],
        }
    }
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vars<I, S>(vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }
}

impl CredentialProvider for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        self.vars
            .iter()
            .find_map(|name| env::var(name).ok().and_then(non_blank))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self(non_blank(api_key.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A key slot the host can fill, rotate or clear while the gateway is live.
#[derive(Debug, Clone, Default)]
pub struct SharedCredentials {
    slot: Arc<RwLock<Option<String>>>,
}

impl SharedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&self, api_key: impl Into<String>) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = non_blank(api_key.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }
}

impl CredentialProvider for SharedCredentials {
    fn api_key(&self) -> Option<String> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }
}
