/// アクション別プロンプトテンプレート

/// Rephrase: 簡潔でプロフェッショナルな書き直し
pub const PROMPT_REPHRASE: &str = "You are Pasteboard Pro, an expert writing assistant. \
Rewrite the text below in a crisp, professional tone. Be concise and remove fluff. \
Return only the rewritten text.";

/// Summarize: 1-2文の要約
pub const PROMPT_SUMMARIZE: &str = "You are Pasteboard Pro, an expert writing assistant. \
Produce a 1-2 sentence summary of the text below. Focus on key points and strip jargon.";

/// Tweetify: 280文字以内のツイート1本
pub const PROMPT_TWEETIFY: &str = "You are Pasteboard Pro, an expert writing assistant. \
Convert the following into a single high-engagement tweet. Keep it under 280 characters, \
use plain language, and feel free to add appropriate emoji.";

/// アクションに対応する指示文を取得する
pub fn instruction_for_action(action: crate::domain::action::ActionKind) -> &'static str {
    match action {
        crate::domain::action::ActionKind::Rephrase => PROMPT_REPHRASE,
        crate::domain::action::ActionKind::Summarize => PROMPT_SUMMARIZE,
        crate::domain::action::ActionKind::Tweetify => PROMPT_TWEETIFY,
    }
}

/// ユーザープロンプトを構築する（指示文 + 区切り線で囲んだ原文）
pub fn build_prompt(action: crate::domain::action::ActionKind, text: &str) -> String {
    format!("{}\n\n---\n{}\n---", instruction_for_action(action), text)
}
