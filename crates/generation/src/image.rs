//! Text-to-image client for the Hugging Face inference API.

use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;

use crate::config::GenerationConfig;
use crate::error::GenerationError;

/// Seam over the text-to-image API. Returns a `data:` URL embedding the
/// image bytes as base64.
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
    ) -> Result<String, GenerationError>;
}

/// Hugging Face inference API client.
///
/// The API key is optional at construction; a missing key fails each
/// generation attempt, which callers treat as "no illustration".
pub struct HuggingFaceClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl HuggingFaceClient {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.huggingface_api_key.clone(),
            endpoint: config.huggingface_api_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    width: u32,
    height: u32,
}

#[async_trait]
impl ImageModel for HuggingFaceClient {
    async fn generate(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
    ) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey("Hugging Face"))?;

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&InferenceRequest {
                inputs: prompt,
                parameters: InferenceParameters { width, height },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();
        let bytes = response.bytes().await?;

        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        Ok(format!("data:{content_type};base64,{encoded}"))
    }
}
