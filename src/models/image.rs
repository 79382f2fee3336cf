use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GenerationError, Result};

pub const DEFAULT_INPUT_MIME: &str = "image/jpeg";
pub const DEFAULT_OUTPUT_MIME: &str = "image/png";

// Browsers and the API both hand out unpadded or loosely padded payloads.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:(image/[a-zA-Z+]+);base64,(.+)$").expect("valid data URI pattern")
});

/// Binary image content paired with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    pub mime_type: String,
    #[serde(with = "base64_data")]
    pub data: Vec<u8>,
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn from_base64(mime_type: impl Into<String>, payload: &str) -> Result<Self> {
        let data = LENIENT
            .decode(payload.trim())
            .map_err(|e| GenerationError::InvalidImage(e.to_string()))?;
        Ok(Self::new(mime_type, data))
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.data)
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// Normalizes caller-supplied image text into an [`EncodedImage`].
///
/// Accepts, in order of preference:
/// 1. a full `data:image/<type>;base64,<payload>` URI,
/// 2. anything containing a `base64,` marker (payload is the segment after it),
/// 3. a bare base64 payload.
///
/// Tiers 2 and 3 assume `image/jpeg`.
pub fn decode_image_input(encoded: &str) -> Result<EncodedImage> {
    if let Some((mime_type, payload)) = match_data_uri(encoded) {
        return EncodedImage::from_base64(mime_type, payload);
    }

    if encoded.contains("base64,") {
        let payload = encoded.split("base64,").nth(1).unwrap_or_default();
        return EncodedImage::from_base64(DEFAULT_INPUT_MIME, payload);
    }

    EncodedImage::from_base64(DEFAULT_INPUT_MIME, encoded)
}

fn match_data_uri(input: &str) -> Option<(&str, &str)> {
    let captures = DATA_URI_RE.captures(input)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// One finished generation or edit. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: String,
    pub image: EncodedImage,
    pub prompt: String,
    pub timestamp: i64,
    pub caption: Option<String>,
}

impl GeneratedImage {
    pub fn new(image: EncodedImage, prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            image,
            prompt: prompt.into(),
            timestamp: Utc::now().timestamp_millis(),
            caption: None,
        }
    }

    pub fn with_caption(self, caption: Option<String>) -> Self {
        Self { caption, ..self }
    }

    pub fn mime_type(&self) -> &str {
        &self.image.mime_type
    }
}

mod base64_data {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&base64::engine::general_purpose::STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(d)?;
        super::LENIENT
            .decode(text.trim())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &str = "iVBORw0KGgoAAAANSUhEUg==";

    #[test]
    fn data_uri_supplies_mime_and_payload() {
        let image = decode_image_input(&format!("data:image/png;base64,{PNG_HEADER}")).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(&image.data[1..4], b"PNG");
    }

    #[test]
    fn data_uri_and_bare_payload_decode_identically() {
        let uri = format!("data:image/jpeg;base64,{PNG_HEADER}");
        assert_eq!(
            decode_image_input(&uri).unwrap(),
            decode_image_input(PNG_HEADER).unwrap()
        );

        let png_uri = format!("data:image/png;base64,{PNG_HEADER}");
        assert_eq!(
            decode_image_input(&png_uri).unwrap().data,
            decode_image_input(PNG_HEADER).unwrap().data
        );
    }

    #[test]
    fn bare_payload_defaults_to_jpeg() {
        let image = decode_image_input("rawbase64nodata").unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert!(!image.data.is_empty());
    }

    #[test]
    fn unmatched_mime_falls_back_to_marker_split() {
        // `x-icon` has a hyphen, so the strict pattern rejects it.
        let image = decode_image_input(&format!("data:image/x-icon;base64,{PNG_HEADER}")).unwrap();
        assert_eq!(image.mime_type, DEFAULT_INPUT_MIME);
        assert_eq!(image.data, decode_image_input(PNG_HEADER).unwrap().data);

        let image = decode_image_input(&format!("data:text/plain;base64,{PNG_HEADER}")).unwrap();
        assert_eq!(image.mime_type, DEFAULT_INPUT_MIME);
    }

    #[test]
    fn data_uri_without_payload_is_not_a_full_match() {
        let image = decode_image_input("data:image/png;base64,").unwrap();
        assert_eq!(image.mime_type, DEFAULT_INPUT_MIME);
        assert!(image.data.is_empty());
    }

    #[test]
    fn svg_subtype_is_accepted() {
        let image = decode_image_input("data:image/svg+xml;base64,PHN2Zy8+").unwrap();
        assert_eq!(image.mime_type, "image/svg+xml");
        assert_eq!(image.data, b"<svg/>");
    }

    #[test]
    fn garbage_payload_is_rejected() {
        let err = decode_image_input("data:image/png;base64,***").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidImage(_)));
    }

    #[test]
    fn data_uri_reencodes_payload() {
        let image = EncodedImage::new("image/webp", b"webp-bytes".to_vec());
        let uri = image.to_data_uri();
        assert!(uri.starts_with("data:image/webp;base64,"));
        assert_eq!(decode_image_input(&uri).unwrap(), image);
    }

    #[test]
    fn generated_image_serializes_data_as_base64() {
        let image = GeneratedImage::new(EncodedImage::new("image/png", vec![1, 2, 3]), "brief")
            .with_caption(Some("tags".into()));
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["image"]["data"], "AQID");
        assert_eq!(json["image"]["mimeType"], "image/png");
        assert_eq!(json["caption"], "tags");

        let back: GeneratedImage = serde_json::from_value(json).unwrap();
        assert_eq!(back, image);
    }
}
