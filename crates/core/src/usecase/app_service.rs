use std::sync::{Arc, Mutex};

use crate::domain::action::ActionKind;
use crate::domain::error::AppError;
use crate::domain::workbench::{StateTransition, Workbench, WorkbenchState};
use crate::infra::metrics::{Metrics, MetricsSummary};
use crate::infra::output::OutputRouter;
use crate::infra::processor::Processor;

/// アプリケーションサービス（CLI から呼び出される）。
/// ワークベンチを1リクエストずつ駆動する。プロセッサーは構築時に注入される。
pub struct AppService {
    workbench: Mutex<Workbench>,
    processor: Arc<dyn Processor>,
    output_router: OutputRouter,
    metrics: Metrics,
}

impl AppService {
    pub fn new(processor: Arc<dyn Processor>) -> Self {
        Self {
            workbench: Mutex::new(Workbench::new()),
            processor,
            output_router: OutputRouter::new(),
            metrics: Metrics::new(),
        }
    }

    // ==================== Workbench events ====================

    pub fn select_action(&self, action: ActionKind) -> Result<StateTransition, AppError> {
        let mut wb = self.workbench.lock().unwrap();
        wb.select_action(action)
    }

    pub fn set_input(&self, text: impl Into<String>) -> Result<StateTransition, AppError> {
        let mut wb = self.workbench.lock().unwrap();
        wb.set_input(text)
    }

    // ==================== Processing ====================

    /// 現在の入力を submit し、リクエストが決着するまで待つ。
    /// 処理中はワークベンチのロックを保持しない。二重 submit は Loading 状態が防ぐ。
    /// 返す Err はコード別のエラーカウンタに集計済み。
    pub async fn process(&self) -> Result<(StateTransition, String), AppError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let start = std::time::Instant::now();

        let request = {
            let mut wb = self.workbench.lock().unwrap();
            match wb.submit() {
                Ok((request, _)) => request,
                Err(err) => {
                    self.metrics.inc_error(err.code.as_str());
                    return Err(err);
                }
            }
        };

        self.metrics.inc_requests_submitted();
        log::debug!(
            "処理開始: {request_id} action={} 入力 {} 文字 processor={}",
            request.action.as_str(),
            request.text.len(),
            self.processor.name()
        );

        let result = self.processor.process(&request).await;

        let mut wb = self.workbench.lock().unwrap();
        match result {
            Ok(text) => {
                let transition = wb.settle_ok(text.clone())?;
                self.metrics.inc_requests_succeeded();
                self.metrics
                    .record_latency("process", start.elapsed().as_millis() as u64);
                log::info!("処理完了: {request_id} 結果 {} 文字", text.len());
                Ok((transition, text))
            }
            Err(err) => {
                let app_err: AppError = err.into();
                wb.settle_err(&app_err)?;
                self.metrics.inc_error(app_err.code.as_str());
                log::warn!("処理失敗: {request_id} {app_err}");
                Err(app_err)
            }
        }
    }

    // ==================== Delivery ====================

    /// 直近の結果をクリップボードに出力する（Ready 状態のみ）
    pub fn copy_output(&self) -> Result<String, AppError> {
        let text = {
            let wb = self.workbench.lock().unwrap();
            match wb.state() {
                WorkbenchState::Ready => wb
                    .output()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::internal("結果がありません"))?,
                other => {
                    return Err(AppError::invalid_state(format!(
                        "copy_output は {} 状態では実行できません",
                        other.as_str()
                    )))
                }
            }
        };

        let start = std::time::Instant::now();
        self.output_router.deliver_clipboard(&text)?;
        self.metrics.inc_results_delivered();
        self.metrics
            .record_latency("deliver", start.elapsed().as_millis() as u64);

        Ok(text)
    }

    /// クリップボードを読み取る（入力の事前充填用）
    pub fn read_clipboard(&self) -> Result<String, AppError> {
        self.output_router.read_clipboard()
    }

    // ==================== State Accessors ====================

    pub fn current_state(&self) -> WorkbenchState {
        let wb = self.workbench.lock().unwrap();
        wb.state().clone()
    }

    pub fn output(&self) -> Option<String> {
        let wb = self.workbench.lock().unwrap();
        wb.output().map(|s| s.to_string())
    }

    // ==================== Metrics ====================

    pub fn get_metrics(&self) -> MetricsSummary {
        self.metrics.summary()
    }

    pub fn record_error(&self, code: &str) {
        self.metrics.inc_error(code);
    }
}
