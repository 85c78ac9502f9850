//! OpenRouterApiAgent - Direct REST API implementation for OpenRouter.
//!
//! This agent calls the OpenRouter chat-completions API directly.
//! Configuration priority: ~/.config/showdown/secret.json > environment variables

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;

use showdown_core::ShowdownError;
use showdown_core::error::Result;
use showdown_core::game::{Move, MoveSuggestion};
use showdown_core::oracle::{MoveSuggester, clamp_confidence};

use crate::config::{SecretConfig, load_secret_config};

const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";
const BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Suggester implementation that talks to the OpenRouter HTTP API.
#[derive(Clone, Debug)]
pub struct OpenRouterApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenRouterApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Loads configuration from ~/.config/showdown/secret.json or
    /// environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/showdown/secret.json
    /// 2. Environment variables (OPENROUTER_API_KEY, SHOWDOWN_MODEL_NAME)
    ///
    /// Model name defaults to `deepseek/deepseek-chat` if not specified.
    pub fn try_from_env() -> Result<Self> {
        Self::try_from_sources(
            load_secret_config().ok(),
            env::var("OPENROUTER_API_KEY").ok(),
            env::var("SHOWDOWN_MODEL_NAME").ok(),
        )
    }

    /// Builds an agent from explicit sources. The secret file wins over
    /// the environment; with neither, configuration fails.
    pub fn try_from_sources(
        secret: Option<SecretConfig>,
        env_api_key: Option<String>,
        env_model: Option<String>,
    ) -> Result<Self> {
        if let Some(openrouter) = secret.and_then(|config| config.openrouter) {
            let model = openrouter
                .model_name
                .unwrap_or_else(|| DEFAULT_MODEL.to_string());
            return Ok(Self::new(openrouter.api_key, model));
        }

        let api_key = env_api_key.ok_or_else(|| {
            ShowdownError::config(
                "OPENROUTER_API_KEY not found in ~/.config/showdown/secret.json or environment variables",
            )
        })?;

        let model = env_model.unwrap_or_else(|| DEFAULT_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the endpoint, for self-hosted gateways and tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                ShowdownError::remote_unavailable(format!("OpenRouter request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenRouter error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            ShowdownError::remote_unavailable(format!("Failed to parse OpenRouter response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl MoveSuggester for OpenRouterApiAgent {
    async fn suggest_move(&self, last_player_move: Move) -> Result<MoveSuggestion> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: build_prompt(last_player_move),
            }],
        };

        let content = self.send_request(&request).await?;
        log::debug!("OpenRouter suggested: {content}");
        parse_move_reply(&content)
    }
}

/// The instruction sent to the model, demanding a structured JSON reply.
fn build_prompt(last_player_move: Move) -> String {
    format!(
        "You are an AI playing Stone-Paper-Scissor.\n\
         The player just played: {last_player_move}.\n\
         Suggest your next move: Stone, Paper, or Scissor.\n\
         Respond ONLY with JSON: {{ \"move\": \"Stone\", \"confidence\": 0-100 }}."
    )
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// The structured payload the model is asked to embed in its reply.
#[derive(Deserialize)]
struct MoveReply {
    #[serde(rename = "move")]
    mv: String,
    #[serde(default)]
    confidence: Option<i64>,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| {
            ShowdownError::remote_unavailable("OpenRouter returned no choices in the response")
        })
}

fn map_http_error(status: StatusCode, body: String) -> ShowdownError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);
    ShowdownError::remote_unavailable(format!("OpenRouter returned {status}: {message}"))
}

/// Parses the embedded `{"move": ..., "confidence": ...}` payload out of
/// the model's reply. Models wrap JSON in code fences or prose often
/// enough that the parser scans for the outermost object instead of
/// requiring a bare body.
fn parse_move_reply(content: &str) -> Result<MoveSuggestion> {
    let start = content.find('{');
    let end = content.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => {
            return Err(ShowdownError::remote_unavailable(format!(
                "No JSON object in model reply: {content:?}"
            )));
        }
    };

    let reply: MoveReply = serde_json::from_str(json).map_err(|err| {
        ShowdownError::remote_unavailable(format!("Malformed move payload: {err}"))
    })?;

    let mv: Move = reply
        .mv
        .parse()
        .map_err(|_| ShowdownError::remote_unavailable(format!("Invalid move name: {:?}", reply.mv)))?;

    Ok(MoveSuggestion {
        mv,
        confidence: clamp_confidence(reply.confidence),
    })
}
