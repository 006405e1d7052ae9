pub mod claude;
mod mock;
pub mod prompts;

pub use mock::MockProcessor;

use async_trait::async_trait;

use crate::domain::action::ProcessingRequest;
use crate::domain::error::{AppError, ErrorCode};

/// 処理エラー
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Claude API error: {0}")]
    Transport(String),
    #[error("Invalid response format from Claude API")]
    MalformedResponse,
    #[error("Claude API failed: {0}")]
    Unknown(String),
}

/// プロセッサー trait（本番 Claude とオフラインモックが実装する）。
/// どちらを使うかは呼び出し側が構築時に決める。
#[async_trait]
pub trait Processor: Send + Sync {
    async fn process(&self, request: &ProcessingRequest) -> Result<String, ProcessError>;

    fn name(&self) -> &str;
}

impl From<ProcessError> for AppError {
    fn from(err: ProcessError) -> Self {
        let code = match &err {
            ProcessError::Transport(_) => ErrorCode::Transport,
            ProcessError::MalformedResponse => ErrorCode::MalformedResponse,
            ProcessError::Unknown(_) => ErrorCode::Unknown,
        };
        // 処理エラーは回復可能として扱う（ユーザーが再試行できる）
        AppError {
            code,
            message: err.to_string(),
            recoverable: true,
        }
    }
}
