//! OpenAI-backed collaborators: chat completions for scripts and prompts,
//! DALL-E for generated images, speech synthesis for narration audio.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::reels::application::ports::outgoing::{
    CompletionRequest, ImageGenerationError, ImageGenerator, SpeechError, SpeechSynthesizer,
    TextGenerationError, TextGenerator,
};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const CHAT_MODEL: &str = "gpt-3.5-turbo";
const IMAGE_MODEL: &str = "dall-e-3";
const SPEECH_MODEL: &str = "tts-1";

/// DALL-E rejects prompts past this length.
const MAX_IMAGE_PROMPT_CHARS: usize = 1000;

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    api_base: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_base(api_key, DEFAULT_API_BASE)
    }

    /// Alternate base URL for proxies and tests.
    pub fn with_api_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into(),
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct ChatApiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatApiResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageApiRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    quality: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize)]
struct ImageApiResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: Option<String>,
}

#[derive(Serialize)]
struct SpeechApiRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
}

fn first_choice(response: ChatApiResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

fn first_image_url(response: ImageApiResponse) -> Option<String> {
    response.data.into_iter().next().and_then(|d| d.url)
}

fn truncate_prompt(prompt: &str) -> &str {
    match prompt.char_indices().nth(MAX_IMAGE_PROMPT_CHARS) {
        Some((idx, _)) => &prompt[..idx],
        None => prompt,
    }
}

// ============================================================================
// Port implementations
// ============================================================================

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, TextGenerationError> {
        let body = ChatApiRequest {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response: ChatApiResponse = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TextGenerationError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| TextGenerationError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| TextGenerationError::Request(e.to_string()))?;

        first_choice(response).ok_or(TextGenerationError::EmptyCompletion)
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenerationError> {
        let body = ImageApiRequest {
            model: IMAGE_MODEL,
            prompt: truncate_prompt(prompt),
            n: 1,
            size: "1024x1024",
            quality: "hd",
            response_format: "url",
        };

        let response: ImageApiResponse = self
            .http
            .post(format!("{}/images/generations", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ImageGenerationError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| ImageGenerationError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| ImageGenerationError::Request(e.to_string()))?;

        first_image_url(response).ok_or(ImageGenerationError::NoImageUrl)
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiClient {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechError> {
        let body = SpeechApiRequest {
            model: SPEECH_MODEL,
            input: text,
            voice,
        };

        let bytes = self
            .http
            .post(format!("{}/audio/speech", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?
            .error_for_status()
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?;

        if bytes.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        Ok(bytes.to_vec())
    }
}
