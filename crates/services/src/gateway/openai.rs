//! Chat-completion client backing both gateway traits.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use exam_core::model::{Feedback, Question};

use super::{
    AnswerGrader, FeedbackRequest, QuestionGenerator, QuestionRequest, feedback_prompt,
    feedback_system_prompt, parse_feedback_payload, parse_question_payload, question_prompt,
    question_system_prompt,
};
use crate::error::{ChatError, FeedbackError, GenerationError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const QUESTION_MAX_TOKENS: u32 = 2000;
const FEEDBACK_MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl OpenAiConfig {
    /// Reads the gateway configuration from `EXAM_AI_*` environment
    /// variables. Returns `None` when no API key is configured.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("EXAM_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("EXAM_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = env::var("EXAM_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Some(Self {
            base_url,
            api_key,
            model,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }
}

//
// ─── GATEWAY ───────────────────────────────────────────────────────────────────
//

/// OpenAI-compatible chat-completions gateway. One instance serves both
/// question generation and answer grading.
#[derive(Clone)]
pub struct OpenAiGateway {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiGateway {
    /// Builds the gateway with its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Http` when the client cannot be constructed.
    pub fn new(config: OpenAiConfig) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, config })
    }

    async fn chat(
        &self,
        system: String,
        user: String,
        max_tokens: u32,
    ) -> Result<String, ChatError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: TEMPERATURE,
            max_tokens,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChatError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ChatError::EmptyResponse)?;

        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::EmptyResponse);
        }
        Ok(content.to_string())
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiGateway {
    async fn generate_question(
        &self,
        request: &QuestionRequest,
    ) -> Result<Question, GenerationError> {
        let raw = self
            .chat(
                question_system_prompt(request),
                question_prompt(request),
                QUESTION_MAX_TOKENS,
            )
            .await?;
        parse_question_payload(&raw)
    }
}

#[async_trait]
impl AnswerGrader for OpenAiGateway {
    async fn grade_answer(&self, request: &FeedbackRequest) -> Result<Feedback, FeedbackError> {
        let raw = self
            .chat(
                feedback_system_prompt(request),
                feedback_prompt(request),
                FEEDBACK_MAX_TOKENS,
            )
            .await?;
        parse_feedback_payload(&raw)
    }
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
