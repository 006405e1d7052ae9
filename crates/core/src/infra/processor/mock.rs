use std::time::Duration;

use async_trait::async_trait;

use super::{ProcessError, Processor};
use crate::domain::action::{ActionKind, ProcessingRequest};

/// 本番 API に近いローディング挙動にするための擬似遅延
const MOCK_DELAY: Duration = Duration::from_millis(1500);

/// MockProcessor: API キー未設定時のオフライン代替実装。
/// 入力の先頭から決定的なプレースホルダーを生成し、常に成功する。
pub struct MockProcessor {
    delay: Duration,
}

impl MockProcessor {
    pub fn new() -> Self {
        Self { delay: MOCK_DELAY }
    }

    /// 擬似遅延を上書きする（テストではゼロを渡す）
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder(action: ActionKind, text: &str) -> String {
    match action {
        ActionKind::Rephrase => {
            let prefix: String = text.chars().take(100).collect();
            format!(
                "Here's a crisp, professional rewrite of your text: \"{prefix}...\" → Polished and refined for maximum impact."
            )
        }
        ActionKind::Summarize => {
            let prefix = text
                .split_whitespace()
                .take(10)
                .collect::<Vec<_>>()
                .join(" ");
            format!("Key insight: {prefix}... (summarized for clarity)")
        }
        ActionKind::Tweetify => {
            let prefix = text
                .split_whitespace()
                .take(8)
                .collect::<Vec<_>>()
                .join(" ");
            format!("🚀 {prefix}... #productivity #flow")
        }
    }
}

#[async_trait]
impl Processor for MockProcessor {
    async fn process(&self, request: &ProcessingRequest) -> Result<String, ProcessError> {
        tokio::time::sleep(self.delay).await;
        Ok(placeholder(request.action, &request.text))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(action: ActionKind) -> ProcessingRequest {
        ProcessingRequest::new(
            action,
            "The new onboarding flow reduced signup friction by a wide margin this quarter",
        )
    }

    #[tokio::test]
    async fn test_mock_is_deterministic() {
        let processor = MockProcessor::with_delay(Duration::ZERO);
        let first = processor.process(&request(ActionKind::Rephrase)).await.unwrap();
        let second = processor.process(&request(ActionKind::Rephrase)).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_mock_output_varies_by_action() {
        let processor = MockProcessor::with_delay(Duration::ZERO);
        let rephrase = processor.process(&request(ActionKind::Rephrase)).await.unwrap();
        let summarize = processor.process(&request(ActionKind::Summarize)).await.unwrap();
        let tweetify = processor.process(&request(ActionKind::Tweetify)).await.unwrap();
        assert!(rephrase.contains("professional rewrite"));
        assert!(summarize.starts_with("Key insight:"));
        assert!(tweetify.starts_with("🚀"));
        assert_ne!(rephrase, summarize);
        assert_ne!(summarize, tweetify);
    }

    #[tokio::test]
    async fn test_mock_takes_word_prefix() {
        let processor = MockProcessor::with_delay(Duration::ZERO);
        let tweetify = processor.process(&request(ActionKind::Tweetify)).await.unwrap();
        // 先頭 8 語のみ
        assert!(tweetify.contains("The new onboarding flow reduced signup friction by..."));
        assert!(!tweetify.contains("wide margin"));
    }

    #[tokio::test]
    async fn test_mock_truncates_rephrase_to_char_prefix() {
        let processor = MockProcessor::with_delay(Duration::ZERO);
        let long_input = "x".repeat(250);
        let result = processor
            .process(&ProcessingRequest::new(ActionKind::Rephrase, long_input))
            .await
            .unwrap();
        assert!(result.contains(&format!("\"{}...\"", "x".repeat(100))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_resolves_after_fixed_delay() {
        let processor = MockProcessor::new();
        let started = tokio::time::Instant::now();
        processor.process(&request(ActionKind::Summarize)).await.unwrap();
        assert!(started.elapsed() >= MOCK_DELAY);
    }

    #[test]
    fn test_mock_name() {
        assert_eq!(MockProcessor::new().name(), "mock");
    }
}
