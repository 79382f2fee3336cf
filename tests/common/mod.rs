#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thumbforge::{
    models::InlineData, CredentialProvider, GatewayConfig, GenerateContentRequest,
    GenerateContentResponse, GenerationError, GenerationGateway, ModelTransport, Part,
    StaticCredentials,
};

pub const IMAGE_MODEL: &str = "test-image-model";
pub const TEXT_MODEL: &str = "test-text-model";

/// What the fake returns for a given call.
pub enum Reply {
    Respond(GenerateContentResponse),
    Fail { status: Option<u16>, message: String },
    Hang,
}

type Script = Box<dyn Fn(&str, &GenerateContentRequest) -> Reply + Send + Sync>;

pub struct ScriptedTransport {
    script: Script,
    calls: Mutex<Vec<(String, String, GenerateContentRequest)>>,
}

impl ScriptedTransport {
    pub fn new<F>(script: F) -> Arc<Self>
    where
        F: Fn(&str, &GenerateContentRequest) -> Reply + Send + Sync + 'static,
    {
        Arc::new(Self {
            script: Box::new(script),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Image model answers with `image_b64`, text model with `caption`.
    pub fn happy(image_b64: &'static str, caption: &'static str) -> Arc<Self> {
        Self::new(move |model, _| {
            if model == IMAGE_MODEL {
                Reply::Respond(image_response(Some("image/png"), image_b64))
            } else {
                Reply::Respond(GenerateContentResponse::from_parts(vec![Part::text(caption)]))
            }
        })
    }

    pub fn calls(&self) -> Vec<(String, String, GenerateContentRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, model: &str) -> Vec<GenerateContentRequest> {
        self.calls()
            .into_iter()
            .filter(|(_, m, _)| m == model)
            .map(|(_, _, r)| r)
            .collect()
    }
}

#[async_trait]
impl ModelTransport for ScriptedTransport {
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> thumbforge::Result<GenerateContentResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), model.to_string(), request.clone()));

        match (self.script)(model, request) {
            Reply::Respond(response) => Ok(response),
            Reply::Fail { status, message } => Err(GenerationError::Transport { status, message }),
            Reply::Hang => futures::future::pending().await,
        }
    }
}

pub fn image_response(mime_type: Option<&str>, data: &str) -> GenerateContentResponse {
    GenerateContentResponse::from_parts(vec![
        Part::text("Here is the thumbnail."),
        Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.map(String::from),
                data: data.to_string(),
            },
        },
    ])
}

pub fn test_config() -> GatewayConfig {
    GatewayConfig::new().with_models(IMAGE_MODEL, TEXT_MODEL)
}

pub fn gateway_with(
    transport: Arc<ScriptedTransport>,
    credentials: Arc<dyn CredentialProvider>,
) -> GenerationGateway {
    GenerationGateway::with_transport(&test_config(), transport, credentials)
}

pub fn gateway(transport: Arc<ScriptedTransport>) -> GenerationGateway {
    gateway_with(transport, Arc::new(StaticCredentials::new("test-key")))
}

pub fn inline_parts(request: &GenerateContentRequest) -> Vec<InlineData> {
    request
        .parts()
        .iter()
        .filter_map(|p| p.as_inline_data().cloned())
        .collect()
}
