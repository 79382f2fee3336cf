//! Request and response bodies for the Gemini `generateContent` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AspectRatio, EncodedImage};

/// One fragment of a multi-part payload.
///
/// Variant order matters for `#[serde(untagged)]` decoding: anything that is
/// neither text nor inline data lands in `Other` instead of failing the whole
/// response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        thought: bool,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(Value),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text {
            text: text.into(),
            thought: false,
        }
    }

    pub fn inline(image: &EncodedImage) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: Some(image.mime_type.clone()),
                data: image.to_base64(),
            },
        }
    }

    pub fn as_inline_data(&self) -> Option<&InlineData> {
        match self {
            Part::InlineData { inline_data } => Some(inline_data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { role: None, parts }],
            generation_config: None,
        }
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.generation_config = Some(GenerationConfig {
            image_config: Some(ImageConfig { aspect_ratio }),
        });
        self
    }

    pub fn parts(&self) -> &[Part] {
        self.contents
            .first()
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<Value>,
}

impl GenerateContentResponse {
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content { role: None, parts }),
                finish_reason: None,
            }],
            prompt_feedback: None,
        }
    }

    /// Parts of the first candidate; `None` when the model returned no candidates.
    pub fn first_candidate_parts(&self) -> Option<&[Part]> {
        let candidate = self.candidates.first()?;
        Some(
            candidate
                .content
                .as_ref()
                .map(|c| c.parts.as_slice())
                .unwrap_or_default(),
        )
    }

    /// Non-thought text of the first candidate, concatenated.
    pub fn text(&self) -> Option<String> {
        let mut out = String::new();
        let mut found = false;
        for part in self.first_candidate_parts()? {
            if let Part::Text {
                text,
                thought: false,
            } = part
            {
                out.push_str(text);
                found = true;
            }
        }
        found.then_some(out)
    }
}
