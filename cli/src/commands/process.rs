//! process コマンド（1アクションを構成済みプロセッサーで実行する）

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use pb_core::domain::action::ActionKind;
use pb_core::infra::processor::claude::{ClaudeConfig, ClaudeProcessor};
use pb_core::infra::processor::{MockProcessor, Processor};
use pb_core::usecase::app_service::AppService;

use crate::ProcessArgs;

/// プロセッサーを構築する（資格情報あり: Claude, なし: Mock）
fn create_processor(args: &ProcessArgs) -> Arc<dyn Processor> {
    if args.mock {
        log::info!("Mock processor selected (--mock)");
        return Arc::new(MockProcessor::new());
    }

    match std::env::var("ANTHROPIC_API_KEY") {
        Ok(key) if !key.is_empty() => {
            let mut config = ClaudeConfig::new(key);
            if let Some(model) = &args.model {
                config.model = model.clone();
            }
            if let Some(max_tokens) = args.max_tokens {
                config.max_tokens = max_tokens;
            }
            if let Some(endpoint) = &args.endpoint {
                config.endpoint = endpoint.clone();
            }
            if let Some(secs) = args.timeout_secs {
                config.timeout = Some(Duration::from_secs(secs));
            }
            log::info!("Claude processor selected (model: {})", config.model);
            Arc::new(ClaudeProcessor::new(config))
        }
        _ => {
            log::warn!("ANTHROPIC_API_KEY not set, falling back to mock processor");
            Arc::new(MockProcessor::new())
        }
    }
}

/// 入力テキストを解決する（位置引数 → --paste → stdin の順）
fn resolve_input(args: &ProcessArgs, service: &AppService) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if args.paste {
        return service
            .read_clipboard()
            .context("failed to read the clipboard");
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

pub async fn run(action: ActionKind, args: &ProcessArgs, verbose: bool) -> Result<()> {
    let processor = create_processor(args);
    let service = AppService::new(processor);

    let input = resolve_input(args, &service)?;
    if input.trim().is_empty() {
        bail!("no input text (pass TEXT, use --paste, or pipe via stdin)");
    }

    service.select_action(action)?;
    service.set_input(input)?;

    // 処理エラーのカウントはサービス側で行う
    let (_, output) = service.process().await?;

    println!("{output}");

    if args.copy {
        if let Err(err) = service.copy_output() {
            service.record_error(err.code.as_str());
            return Err(err.into());
        }
        log::info!("Result copied to clipboard");
    }

    if verbose {
        let summary = serde_json::to_string_pretty(&service.get_metrics())?;
        log::debug!("Metrics:\n{summary}");
    }

    Ok(())
}
