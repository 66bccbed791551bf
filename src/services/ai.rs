//! AI image generation: prompt in, image reference out.
//!
//! DESIGN
//! ======
//! The session only depends on the `ImageGenerator` contract. A request runs
//! as a spawned task and its outcome comes back to the event loop as a
//! `Completion` over an mpsc channel, so the canvas stays interactive while a
//! request is pending and several requests may overlap. Nothing in this module
//! touches the board; the session decides what to do with a completion.
//!
//! Two implementations exist: an HTTP client that POSTs `{"prompt": …}` to a
//! configured endpoint, and a placeholder that returns a fixed image URL when
//! no endpoint is configured.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::AiConfig;

/// Image returned when no generation endpoint is configured.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300x300.png?text=AI+Generated+Image";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The prompt was empty or whitespace; no request was sent.
    #[error("prompt is empty")]
    EmptyPrompt,

    /// The HTTP request could not be completed.
    #[error("generation request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("generation service returned status {status}")]
    Response { status: u16, body: String },

    /// The response body was not a usable image.
    #[error("generation response unusable: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl GenerationError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPrompt => "E_EMPTY_PROMPT",
            Self::Request(_) => "E_GENERATION_REQUEST",
            Self::Response { .. } => "E_GENERATION_RESPONSE",
            Self::Decode(_) => "E_GENERATION_DECODE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// Whether retrying the same prompt might succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// PROMPT
// =============================================================================

/// A prompt that is known to contain non-whitespace text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Validate a raw prompt.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyPrompt`] for empty or blank input.
    pub fn new(raw: &str) -> Result<Self, GenerationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// GENERATORS
// =============================================================================

#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Produce a displayable image reference (URL or data URI) for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] if the service fails or its answer is not
    /// an image.
    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError>;
}

/// Stand-in generator that always returns the placeholder image.
pub struct PlaceholderGenerator;

#[async_trait::async_trait]
impl ImageGenerator for PlaceholderGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        debug!(prompt_len = prompt.as_str().len(), "ai: placeholder generation");
        Ok(PLACEHOLDER_IMAGE_URL.to_string())
    }
}

/// Generator backed by an HTTP endpoint.
pub struct HttpImageGenerator {
    http: reqwest::Client,
    url: String,
}

impl HttpImageGenerator {
    /// # Errors
    ///
    /// Returns [`GenerationError::HttpClientBuild`] if the client cannot be built.
    pub fn new(url: String, config: &AiConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GenerationError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url })
    }
}

#[async_trait::async_trait]
impl ImageGenerator for HttpImageGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        let response = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({ "prompt": prompt.as_str() }))
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Response { status: status.as_u16(), body });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        image_ref_from_response(content_type.as_deref(), &bytes)
    }
}

/// Pick the generator for a configuration: HTTP when an endpoint is set,
/// placeholder otherwise.
///
/// # Errors
///
/// Returns [`GenerationError::HttpClientBuild`] if the HTTP client fails to build.
pub fn generator_from_config(config: &AiConfig) -> Result<Arc<dyn ImageGenerator>, GenerationError> {
    match &config.url {
        Some(url) => Ok(Arc::new(HttpImageGenerator::new(url.clone(), config)?)),
        None => Ok(Arc::new(PlaceholderGenerator)),
    }
}

// =============================================================================
// RESPONSE DECODING
// =============================================================================

#[derive(Deserialize)]
struct JsonImage {
    url: String,
}

/// Turn a successful response body into an image reference.
///
/// JSON bodies must carry a `url` field; any other body is treated as raw
/// image bytes and inlined as a base64 data URI.
///
/// # Errors
///
/// Returns [`GenerationError::Decode`] for empty bodies, JSON without a `url`,
/// or a non-image content type.
pub fn image_ref_from_response(content_type: Option<&str>, body: &[u8]) -> Result<String, GenerationError> {
    if body.is_empty() {
        return Err(GenerationError::Decode("empty body".into()));
    }
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map_or("image/png", str::trim);

    if mime == "application/json" {
        let parsed: JsonImage = serde_json::from_slice(body).map_err(|e| GenerationError::Decode(e.to_string()))?;
        if parsed.url.trim().is_empty() {
            return Err(GenerationError::Decode("empty url".into()));
        }
        return Ok(parsed.url);
    }
    if !mime.starts_with("image/") {
        return Err(GenerationError::Decode(format!("unexpected content type {mime}")));
    }
    Ok(format!("data:{mime};base64,{}", BASE64.encode(body)))
}

// =============================================================================
// TASKS
// =============================================================================

/// Outcome of one generation request, delivered back to the event loop.
#[derive(Debug)]
pub struct Completion {
    pub request_id: Uuid,
    pub result: Result<String, GenerationError>,
}

/// Run a generation in the background and report its outcome on `done`.
pub fn spawn_generation(
    generator: Arc<dyn ImageGenerator>,
    request_id: Uuid,
    prompt: Prompt,
    done: mpsc::UnboundedSender<Completion>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(%request_id, prompt_len = prompt.as_str().len(), "ai: generation started");
        let result = generator.generate(&prompt).await;
        if done.send(Completion { request_id, result }).is_err() {
            debug!(%request_id, "ai: completion dropped; session closed");
        }
    })
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
