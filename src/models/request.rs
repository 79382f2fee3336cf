use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Square => "1:1",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            "1:1" => Ok(AspectRatio::Square),
            other => Err(GenerationError::ConfigError(format!(
                "Unsupported aspect ratio: {}",
                other
            ))),
        }
    }
}

/// A thumbnail brief. Reference images are carried as caller-supplied text
/// (data URI or bare base64) and decoded when the request is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub niche: String,
    pub video_title: String,
    pub thumbnail_text: Option<String>,
    pub details: Option<String>,
    pub aspect_ratio: AspectRatio,
    pub face_reference: Option<String>,
    pub environment_reference: Option<String>,
    pub style_reference: Option<String>,
}

impl GenerationRequest {
    pub fn new(niche: impl Into<String>, video_title: impl Into<String>) -> Self {
        Self {
            niche: niche.into(),
            video_title: video_title.into(),
            ..Default::default()
        }
    }

    pub fn with_thumbnail_text(mut self, text: impl Into<String>) -> Self {
        self.thumbnail_text = Some(text.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_face_reference(mut self, image: impl Into<String>) -> Self {
        self.face_reference = Some(image.into());
        self
    }

    pub fn with_environment_reference(mut self, image: impl Into<String>) -> Self {
        self.environment_reference = Some(image.into());
        self
    }

    pub fn with_style_reference(mut self, image: impl Into<String>) -> Self {
        self.style_reference = Some(image.into());
        self
    }

    pub fn thumbnail_text(&self) -> &str {
        self.thumbnail_text.as_deref().unwrap_or("")
    }

    pub fn details(&self) -> &str {
        self.details.as_deref().unwrap_or("")
    }

    /// Face reference, if one was supplied. Blank text counts as absent.
    pub fn face(&self) -> Option<&str> {
        supplied(&self.face_reference)
    }

    pub fn environment(&self) -> Option<&str> {
        supplied(&self.environment_reference)
    }

    pub fn style(&self) -> Option<&str> {
        supplied(&self.style_reference)
    }
}

/// Treats whitespace-only reference text the same as no reference.
fn supplied(reference: &Option<String>) -> Option<&str> {
    reference.as_deref().filter(|s| !s.trim().is_empty())
}
