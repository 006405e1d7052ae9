mod clipboard;

pub use clipboard::ClipboardOutput;

use crate::domain::error::AppError;

/// 出力先 trait
pub trait OutputTarget: Send + Sync {
    fn deliver(&self, text: &str) -> Result<(), AppError>;
    fn name(&self) -> &str;
}

/// 出力ルーター: 配信先は現状クリップボードのみ。
/// 入力の事前取得用にクリップボードの読み取りも提供する。
pub struct OutputRouter {
    clipboard: ClipboardOutput,
}

impl OutputRouter {
    pub fn new() -> Self {
        Self {
            clipboard: ClipboardOutput::new(),
        }
    }

    /// テキストをクリップボードに出力
    pub fn deliver_clipboard(&self, text: &str) -> Result<(), AppError> {
        self.clipboard.deliver(text)
    }

    /// 現在のクリップボードテキストを読み取る
    pub fn read_clipboard(&self) -> Result<String, AppError> {
        self.clipboard.read_text()
    }
}

impl Default for OutputRouter {
    fn default() -> Self {
        Self::new()
    }
}
