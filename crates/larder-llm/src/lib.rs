//! Text-generation relay for the Larder assistant.
//!
//! A thin passthrough to a hosted LLM API: the caller supplies a complete,
//! self-contained prompt and gets generated text back. One request, one
//! response; no conversation state is retained between calls, and a failed
//! call is not retried. Supports Gemini, Anthropic (Claude), and
//! OpenAI-compatible APIs; the highest-priority configured provider is used.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Output token cap for generated text.
const MAX_OUTPUT_TOKENS: u32 = 2000;

/// Sampling temperature for generated text.
const TEMPERATURE: f64 = 0.7;

/// Error types for the relay.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport or upstream failure; the relay makes no retries.
    #[error("Text generation unavailable: {0}")]
    GenerationUnavailable(String),

    /// No provider configured.
    #[error("No generation providers configured")]
    NoProviders,
}

/// Result type for relay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration for a generation provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub name: String,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub priority: u8,
}

/// Configuration for the relay.
#[derive(Debug, Clone, Default)]
pub struct GenerationConfig {
    pub providers: Vec<ProviderConfig>,
}

/// Get default endpoint for a provider
pub fn default_endpoint(name: &str) -> String {
    match name {
        "gemini" => "https://generativelanguage.googleapis.com/v1beta".to_string(),
        "anthropic" => "https://api.anthropic.com/v1".to_string(),
        _ => "https://api.openai.com/v1".to_string(),
    }
}

/// Get default model for a provider
pub fn default_model(name: &str) -> String {
    match name {
        "gemini" => "gemini-2.0-flash-exp".to_string(),
        "anthropic" => "claude-3-5-haiku-20241022".to_string(),
        _ => "gpt-4o-mini".to_string(),
    }
}

/// Relay service turning a prompt into generated text.
#[derive(Clone)]
pub struct GenerationService {
    inner: Arc<GenerationServiceInner>,
}

struct GenerationServiceInner {
    provider: Option<ProviderConfig>,
    client: Client,
}

/// Response from the generation API
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    choices: Option<Vec<Choice>>,
    candidates: Option<Vec<Candidate>>,     // Gemini format
    content: Option<Vec<AnthropicContent>>, // Anthropic format
    error: Option<UpstreamError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<Message>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    message: String,
}

impl GenerationService {
    /// Create the relay from config, keeping the highest-priority provider.
    pub fn new(config: &GenerationConfig) -> Self {
        let provider = config
            .providers
            .iter()
            .min_by_key(|p| p.priority)
            .cloned();

        match &provider {
            Some(p) => info!(provider = %p.name, model = %p.model, "Generation relay initialized"),
            None => info!("Generation relay initialized without providers"),
        }

        Self {
            inner: Arc::new(GenerationServiceInner {
                provider,
                client: Client::new(),
            }),
        }
    }

    /// Whether a provider is configured.
    pub fn is_configured(&self) -> bool {
        self.inner.provider.is_some()
    }

    /// Name of the configured provider, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.inner.provider.as_ref().map(|p| p.name.as_str())
    }

    /// Generate text for a prompt.
    ///
    /// A single request/response exchange. Any transport or upstream error
    /// surfaces as [`Error::GenerationUnavailable`]; the call is never
    /// retried.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let provider = self.inner.provider.as_ref().ok_or(Error::NoProviders)?;

        debug!(
            provider = %provider.name,
            model = %provider.model,
            prompt_chars = prompt.len(),
            "Calling generation provider"
        );

        let (url, body) = match provider.name.as_str() {
            "gemini" => build_gemini_request(provider, prompt),
            "anthropic" => build_anthropic_request(provider, prompt),
            _ => build_openai_request(provider, prompt),
        };

        let mut request = self
            .inner
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        // Authentication header per provider; Gemini carries its key in the URL.
        request = match provider.name.as_str() {
            "gemini" => request,
            "anthropic" => request
                .header("x-api-key", &provider.api_key)
                .header("anthropic-version", "2023-06-01"),
            _ => request.header("Authorization", format!("Bearer {}", provider.api_key)),
        };

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::GenerationUnavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::GenerationUnavailable(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::GenerationUnavailable(format!(
                "Provider returned {}: {}",
                status, text
            )));
        }

        parse_response(&provider.name, &text)
    }
}

/// Build request for the Gemini API
fn build_gemini_request(provider: &ProviderConfig, prompt: &str) -> (String, Value) {
    let url = format!(
        "{}/models/{}:generateContent?key={}",
        provider.base_url, provider.model, provider.api_key
    );

    let body = json!({
        "contents": [{
            "parts": [{"text": prompt}]
        }],
        "generationConfig": {
            "maxOutputTokens": MAX_OUTPUT_TOKENS,
            "temperature": TEMPERATURE
        }
    });

    (url, body)
}

/// Build request for the Anthropic API
fn build_anthropic_request(provider: &ProviderConfig, prompt: &str) -> (String, Value) {
    let url = format!("{}/messages", provider.base_url);

    let body = json!({
        "model": provider.model,
        "messages": [
            {"role": "user", "content": prompt}
        ],
        "max_tokens": MAX_OUTPUT_TOKENS,
        "temperature": TEMPERATURE
    });

    (url, body)
}

/// Build request for OpenAI-compatible APIs
fn build_openai_request(provider: &ProviderConfig, prompt: &str) -> (String, Value) {
    let url = format!("{}/chat/completions", provider.base_url);

    let body = json!({
        "model": provider.model,
        "messages": [
            {"role": "user", "content": prompt}
        ],
        "max_tokens": MAX_OUTPUT_TOKENS,
        "temperature": TEMPERATURE
    });

    (url, body)
}

/// Parse response from the different API formats
fn parse_response(provider: &str, text: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(text)
        .map_err(|e| Error::GenerationUnavailable(format!("Failed to parse response: {}", e)))?;

    if let Some(error) = response.error {
        return Err(Error::GenerationUnavailable(error.message));
    }

    // Anthropic format
    if let Some(content) = response.content {
        if let Some(block) = content.first() {
            return Ok(block.text.clone());
        }
    }

    // Gemini format
    if let Some(candidates) = response.candidates {
        if let Some(candidate) = candidates.first() {
            if let Some(part) = candidate.content.parts.first() {
                return Ok(part.text.clone());
            }
        }
    }

    // OpenAI format
    if let Some(choices) = response.choices {
        if let Some(choice) = choices.first() {
            if let Some(message) = &choice.message {
                return Ok(message.content.clone());
            }
            if let Some(text) = &choice.text {
                return Ok(text.clone());
            }
        }
    }

    Err(Error::GenerationUnavailable(format!(
        "No content in {} response",
        provider
    )))
}
