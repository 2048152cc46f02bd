use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use super::{build_http_client, WishlistGenerator};
use crate::config::GroqConfig;
use crate::constants::{
    CHAT_COMPLETIONS_PATH, COMPLETION_MAX_TOKENS, COMPLETION_TEMPERATURE, COMPLETION_TOP_P,
};
use crate::error::{AppError, AppResult};

pub const WISHLIST_SYSTEM_PROMPT: &str = "You are a recommendation system. Given the name of an event, \
respond with a list of necessary items in JSON format only. \
Do not include any explanations or text outside the JSON.\n\n\
Output format:\n\
{\n  \"event\": \"<event_name_here>\",\n  \"items_needed\": [\n    \"item1\",\n    \"item2\",\n    \"item3\"\n  ]\n}";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
    response_format: ResponseFormat,
}

/// Chat-completion client for Groq's OpenAI-compatible API.
#[derive(Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GroqClient {
    pub fn new(config: &GroqConfig) -> AppResult<Self> {
        if config.api_key.is_empty() {
            return Err(AppError::Authentication(
                "Groq API key is required".to_string(),
            ));
        }

        Ok(Self {
            client: build_http_client(config.timeout_seconds)?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                CHAT_COMPLETIONS_PATH
            ),
        })
    }

    async fn complete(&self, system: &str, user: &str) -> AppResult<String> {
        let payload = ChatCompletionRequest {
            model: &self.model,
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
            temperature: COMPLETION_TEMPERATURE,
            max_tokens: COMPLETION_MAX_TOKENS,
            top_p: COMPLETION_TOP_P,
            stream: false,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!("Sending request to Groq API: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        match status.as_u16() {
            401 => {
                error!("Groq API authentication failed");
                return Err(AppError::Authentication("Invalid Groq API key".to_string()));
            }
            429 => {
                error!("Groq API rate limit exceeded");
                return Err(AppError::RateLimit(
                    "Rate limit exceeded for Groq API".to_string(),
                ));
            }
            code if !status.is_success() => {
                let message = format!("Groq API error: {} - {}", code, text);
                error!("{}", message);
                return Err(AppError::llm(message, Some(code)));
            }
            _ => {}
        }

        let data: Value = serde_json::from_str(&text).map_err(|e| {
            error!("Groq API returned an unreadable body: {}", e);
            AppError::llm(format!("Invalid response body from Groq: {}", e), None)
        })?;

        data.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                error!("Groq response contained no completion: {}", text);
                AppError::llm("Groq response contained no completion", None)
            })
    }
}

#[async_trait]
impl WishlistGenerator for GroqClient {
    async fn generate_wishlist(
        &self,
        event_name: &str,
        max_items: usize,
    ) -> AppResult<Vec<String>> {
        info!("Generating wishlist for event: {}", event_name);

        let content = self.complete(WISHLIST_SYSTEM_PROMPT, event_name).await?;
        debug!("Groq API response: {}", content);

        let items = parse_wishlist_content(&content, max_items)?;
        info!("Successfully generated {} wishlist items", items.len());
        Ok(items)
    }
}

/// Reads `items_needed` out of the model's JSON answer and keeps the first
/// `max_items`. Unparsable output is an error carrying the raw text.
pub fn parse_wishlist_content(content: &str, max_items: usize) -> AppResult<Vec<String>> {
    let parsed: Value = serde_json::from_str(content).map_err(|e| {
        error!("Failed to parse Groq response as JSON: {}", e);
        AppError::llm(format!("Invalid JSON response from Groq: {}", content), None)
    })?;

    let object = parsed.as_object().ok_or_else(|| {
        AppError::llm(
            format!("Expected a JSON object from Groq, got: {}", content),
            None,
        )
    })?;

    let items = match object.get("items_needed") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .take(max_items)
            .collect(),
        Some(_) => {
            return Err(AppError::llm(
                format!("items_needed is not a list in Groq response: {}", content),
                None,
            ))
        }
    };

    Ok(items)
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        error!("Groq API request timed out");
        AppError::llm("Request to Groq API timed out", None)
    } else {
        error!("HTTP error calling Groq API: {}", err);
        AppError::llm(format!("HTTP error: {}", err), None)
    }
}
