use serde::Serialize;

use super::action::{ActionKind, ProcessingRequest};
use super::error::AppError;

/// ワークベンチ状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkbenchState {
    Idle,
    Loading,
    Ready,
    Error {
        code: String,
        message: String,
        recoverable: bool,
    },
}

impl WorkbenchState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Error { .. } => "error",
        }
    }
}

/// ワークベンチ（同時リクエストは常に1件）
///
/// イベント駆動の状態機械。select_action / set_input は Idle に戻し、
/// submit で Loading へ、settle_ok / settle_err で Ready / Error へ遷移する。
/// Loading 中は settle 以外のイベントをすべて拒否する。
pub struct Workbench {
    action: ActionKind,
    input: String,
    output: Option<String>,
    state: WorkbenchState,
}

impl Workbench {
    pub fn new() -> Self {
        Self {
            action: ActionKind::Rephrase,
            input: String::new(),
            output: None,
            state: WorkbenchState::Idle,
        }
    }

    pub fn state(&self) -> &WorkbenchState {
        &self.state
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// select_action: Idle/Ready/Error→Idle（既存の結果は破棄）
    pub fn select_action(&mut self, action: ActionKind) -> Result<StateTransition, AppError> {
        let prev = self.state.as_str().to_string();

        match &self.state {
            WorkbenchState::Idle | WorkbenchState::Ready | WorkbenchState::Error { .. } => {
                self.action = action;
                self.output = None;
                self.state = WorkbenchState::Idle;
                Ok(StateTransition {
                    prev_state: prev,
                    new_state: self.state.clone(),
                })
            }
            other => Err(AppError::invalid_state(format!(
                "select_action は {} 状態では実行できません",
                other.as_str()
            ))),
        }
    }

    /// set_input: Idle/Ready/Error→Idle（既存の結果は破棄）
    pub fn set_input(&mut self, text: impl Into<String>) -> Result<StateTransition, AppError> {
        let prev = self.state.as_str().to_string();

        match &self.state {
            WorkbenchState::Idle | WorkbenchState::Ready | WorkbenchState::Error { .. } => {
                self.input = text.into();
                self.output = None;
                self.state = WorkbenchState::Idle;
                Ok(StateTransition {
                    prev_state: prev,
                    new_state: self.state.clone(),
                })
            }
            other => Err(AppError::invalid_state(format!(
                "set_input は {} 状態では実行できません",
                other.as_str()
            ))),
        }
    }

    /// submit: Idle/Ready/Error→Loading
    /// 現在のアクションと入力をスナップショットして返す（空入力は拒否）
    pub fn submit(&mut self) -> Result<(ProcessingRequest, StateTransition), AppError> {
        let prev = self.state.as_str().to_string();

        match &self.state {
            WorkbenchState::Idle | WorkbenchState::Ready | WorkbenchState::Error { .. } => {
                if self.input.trim().is_empty() {
                    return Err(AppError::invalid_state(
                        "submit には空でない入力テキストが必要です",
                    ));
                }
                let request = ProcessingRequest::new(self.action, self.input.clone());
                self.output = None;
                self.state = WorkbenchState::Loading;
                Ok((
                    request,
                    StateTransition {
                        prev_state: prev,
                        new_state: self.state.clone(),
                    },
                ))
            }
            other => Err(AppError::invalid_state(format!(
                "submit は {} 状態では実行できません",
                other.as_str()
            ))),
        }
    }

    /// 処理完了: Loading→Ready
    pub fn settle_ok(&mut self, output: impl Into<String>) -> Result<StateTransition, AppError> {
        let prev = self.state.as_str().to_string();

        match &self.state {
            WorkbenchState::Loading => {
                self.output = Some(output.into());
                self.state = WorkbenchState::Ready;
                Ok(StateTransition {
                    prev_state: prev,
                    new_state: self.state.clone(),
                })
            }
            other => Err(AppError::invalid_state(format!(
                "settle_ok は {} 状態では実行できません",
                other.as_str()
            ))),
        }
    }

    /// 処理失敗: Loading→Error
    pub fn settle_err(&mut self, error: &AppError) -> Result<StateTransition, AppError> {
        let prev = self.state.as_str().to_string();

        match &self.state {
            WorkbenchState::Loading => {
                self.state = WorkbenchState::Error {
                    code: error.code.as_str().to_string(),
                    message: error.message.clone(),
                    recoverable: error.recoverable,
                };
                Ok(StateTransition {
                    prev_state: prev,
                    new_state: self.state.clone(),
                })
            }
            other => Err(AppError::invalid_state(format!(
                "settle_err は {} 状態では実行できません",
                other.as_str()
            ))),
        }
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

/// 状態遷移イベントペイロード
#[derive(Debug, Clone, Serialize)]
pub struct StateTransition {
    pub prev_state: String,
    pub new_state: WorkbenchState,
}
