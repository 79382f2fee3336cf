//! Prompt composition and request orchestration for AI-generated YouTube
//! thumbnails backed by hosted Gemini models.

pub mod config;
pub mod credentials;
pub mod error;
pub mod gemini;
pub mod history;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod studio;

pub use config::GatewayConfig;
pub use credentials::{CredentialProvider, EnvCredentials, SharedCredentials, StaticCredentials};
pub use error::{GenerationError, Result};
pub use gemini::{GenerationGateway, HttpTransport, ImageClient, ModelTransport, TextClient};
pub use history::History;
pub use models::{
    decode_image_input, AspectRatio, EncodedImage, GenerateContentRequest,
    GenerateContentResponse, GeneratedImage, GenerationRequest, Part,
};
pub use studio::Studio;
