use serde::{Deserialize, Serialize};

/// サポートする変換アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Rephrase,
    Summarize,
    Tweetify,
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rephrase => "rephrase",
            Self::Summarize => "summarize",
            Self::Tweetify => "tweetify",
        }
    }
}

/// 処理リクエストのスナップショット（選択中のアクション + 対象テキスト）。
/// 入力検証を通過したときにワークベンチが生成し、以後変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingRequest {
    pub action: ActionKind,
    pub text: String,
}

impl ProcessingRequest {
    pub fn new(action: ActionKind, text: impl Into<String>) -> Self {
        Self {
            action,
            text: text.into(),
        }
    }
}
