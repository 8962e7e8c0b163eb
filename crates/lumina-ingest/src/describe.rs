//! Vision-model collaborator.
//!
//! The pipeline asks a [`Describer`] for a natural-language
//! description of each image and skips the image when the call fails
//! or comes back empty. [`HttpDescriber`] talks to an OpenAI-compatible
//! chat-completions endpoint serving a vision model.

use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{IngestError, IngestResult};

/// Produces a natural-language description of an image.
#[async_trait::async_trait]
pub trait Describer: Send + Sync {
    async fn describe(&self, image_path: &Path) -> IngestResult<String>;
}

const PROMPT: &str = "Describe this image in detail. Include: objects, people, \
    background, colors, actions, and overall context. Be descriptive and precise.";

/// Describer backed by an OpenAI-compatible vision endpoint.
///
/// Images are sent inline as base64 data URLs, so the endpoint needs
/// no access to the local filesystem.
#[derive(Debug, Clone)]
pub struct HttpDescriber {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl HttpDescriber {
    /// Create a new vision-endpoint describer.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        max_tokens: u32,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent("lumina/0.1.0 (https://github.com/oxur/lumina)")
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            max_tokens,
        })
    }
}

#[async_trait::async_trait]
impl Describer for HttpDescriber {
    async fn describe(&self, image_path: &Path) -> IngestResult<String> {
        let bytes = std::fs::read(image_path)?;
        let data_url = format!(
            "data:{};base64,{}",
            mime_for(image_path),
            BASE64.encode(&bytes)
        );

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": PROMPT },
                    { "type": "image_url", "image_url": { "url": data_url } },
                ],
            }],
        });

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Describe {
                path: image_path.display().to_string(),
                message: format!("endpoint returned {status}"),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let description = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if description.is_empty() {
            return Err(IngestError::Describe {
                path: image_path.display().to_string(),
                message: "empty description".to_string(),
            });
        }

        log::debug!(
            "described {} ({} chars)",
            image_path.display(),
            description.len()
        );
        Ok(description)
    }
}

/// MIME type for the data URL, from the file extension.
fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
