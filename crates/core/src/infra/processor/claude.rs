use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::prompts;
use super::{ProcessError, Processor};
use crate::domain::action::ProcessingRequest;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude エンドポイントの接続設定。
/// 資格情報は呼び出し側が読み取って渡す。ここでは環境変数に触れない。
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    /// リクエストタイムアウト。None なら HTTP クライアントのデフォルト。
    pub timeout: Option<Duration>,
}

impl ClaudeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: None,
        }
    }
}

/// Claude Messages API を使用したプロセッサー
pub struct ClaudeProcessor {
    client: reqwest::Client,
    config: ClaudeConfig,
}

#[derive(Serialize)]
struct MessageRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl ClaudeProcessor {
    pub fn new(config: ClaudeConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self { client, config }
    }
}

/// 非 2xx レスポンスをトランスポートエラーに変換する。
/// ボディにサーバーのエラーメッセージがあればそれを、なければステータスコードを使う。
fn transport_error(status: StatusCode, body: &str) -> ProcessError {
    let server_message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error)
        .and_then(|d| d.message);

    match server_message {
        Some(msg) if !msg.is_empty() => ProcessError::Transport(msg),
        _ => ProcessError::Transport(format!("API error: {}", status.as_u16())),
    }
}

/// 2xx ボディから最初のコンテンツブロックのテキストを取り出す。
/// Unknown になるのは JSON として読めないボディだけ。JSON でありさえすれば、
/// content[0].text が欠けていても型が違っても MalformedResponse。
fn text_from_body(body: &str) -> Result<String, ProcessError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ProcessError::Unknown(format!("Response parse error: {e}")))?;

    let text = value
        .get("content")
        .and_then(|content| content.get(0))
        .and_then(|block| block.get("text"))
        .and_then(|text| text.as_str())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ProcessError::MalformedResponse);
    }

    Ok(text.trim().to_string())
}

#[async_trait]
impl Processor for ClaudeProcessor {
    async fn process(&self, request: &ProcessingRequest) -> Result<String, ProcessError> {
        let payload = MessageRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompts::build_prompt(request.action, &request.text),
            }],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProcessError::Unknown(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(transport_error(status, &body));
        }

        text_from_body(&body)
    }

    fn name(&self) -> &str {
        "claude"
    }
}
