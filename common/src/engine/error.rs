use crate::identifiers::ComponentId;

use super::types::GameStatus;

/// Precondition violations of the lifecycle entry points. The engine logs them and
/// leaves its state untouched; hosts may ignore the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    NotInitialized { missing: Vec<ComponentId> },
    GameFinished(GameStatus),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotInitialized { missing } => {
                let names: Vec<&str> = missing.iter().map(|id| id.as_str()).collect();
                write!(
                    f,
                    "game has not been initialized, waiting for: {}",
                    names.join(", ")
                )
            }
            EngineError::GameFinished(status) => {
                write!(f, "game already finished with status {:?}, reset it first", status)
            }
        }
    }
}

impl std::error::Error for EngineError {}
