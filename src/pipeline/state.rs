use crate::pipeline::error::{ErrorKind, PipelineError};
use std::fmt::Display;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum PipelineState {
    Idle,
    CredentialsValidated,
    TokenObtained,
    MaintenanceTokenObtained,
    SettingsApplied,
    Done,
    Failed { kind: ErrorKind, detail: String },
}

impl PipelineState {
    fn successor(&self) -> Option<PipelineState> {
        match self {
            PipelineState::Idle => Some(PipelineState::CredentialsValidated),
            PipelineState::CredentialsValidated => Some(PipelineState::TokenObtained),
            PipelineState::TokenObtained => Some(PipelineState::MaintenanceTokenObtained),
            PipelineState::MaintenanceTokenObtained => Some(PipelineState::SettingsApplied),
            PipelineState::SettingsApplied => Some(PipelineState::Done),
            PipelineState::Done | PipelineState::Failed { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.successor().is_none()
    }
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "Idle"),
            PipelineState::CredentialsValidated => write!(f, "CredentialsValidated"),
            PipelineState::TokenObtained => write!(f, "TokenObtained"),
            PipelineState::MaintenanceTokenObtained => write!(f, "MaintenanceTokenObtained"),
            PipelineState::SettingsApplied => write!(f, "SettingsApplied"),
            PipelineState::Done => write!(f, "Done"),
            PipelineState::Failed { kind, .. } => write!(f, "Failed({})", kind),
        }
    }
}

/// Tracks progress through the pipeline. Only forward moves along the happy path, or into `Failed`.
#[derive(Debug)]
pub struct StateMachine {
    history: Vec<PipelineState>,
}

impl StateMachine {
    pub fn new() -> Self {
        StateMachine {
            history: vec![PipelineState::Idle],
        }
    }

    pub fn current(&self) -> &PipelineState {
        // history always holds at least `Idle`
        &self.history[self.history.len() - 1]
    }

    pub fn advance(&mut self) {
        let from = self.current().clone();
        match from.successor() {
            Some(to) => {
                debug!(from = %from, to = %to, "State transition");
                self.history.push(to);
            }
            None => warn!(state = %from, "Ignoring transition out of terminal state"),
        }
    }

    pub fn fail(&mut self, error: &PipelineError) {
        let from = self.current().clone();
        if from.is_terminal() {
            warn!(state = %from, "Ignoring failure in terminal state");
            return;
        }

        let to = PipelineState::Failed {
            kind: error.kind(),
            detail: error.to_string(),
        };
        debug!(from = %from, to = %to, "State transition");
        self.history.push(to);
    }

    pub fn into_history(self) -> Vec<PipelineState> {
        self.history
    }
}
