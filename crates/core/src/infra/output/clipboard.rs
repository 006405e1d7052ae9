use super::OutputTarget;
use crate::domain::error::AppError;

/// クリップボード出力
pub struct ClipboardOutput {}

impl ClipboardOutput {
    pub fn new() -> Self {
        Self {}
    }

    /// クリップボードのテキストを読み取る（入力の事前充填用）
    pub fn read_text(&self) -> Result<String, AppError> {
        let mut ctx = arboard::Clipboard::new()
            .map_err(|e| AppError::clipboard(format!("クリップボード初期化失敗: {e}")))?;
        ctx.get_text()
            .map_err(|e| AppError::clipboard(format!("クリップボード読み取り失敗: {e}")))
    }
}

impl OutputTarget for ClipboardOutput {
    fn deliver(&self, text: &str) -> Result<(), AppError> {
        let mut ctx = arboard::Clipboard::new()
            .map_err(|e| AppError::clipboard(format!("クリップボード初期化失敗: {e}")))?;
        ctx.set_text(text)
            .map_err(|e| AppError::clipboard(format!("クリップボード書き込み失敗: {e}")))?;
        log::info!("クリップボードに出力: {} 文字", text.len());
        Ok(())
    }

    fn name(&self) -> &str {
        "clipboard"
    }
}
