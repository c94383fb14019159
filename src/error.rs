use crate::engine::action::ActionKind;
use crate::engine::action::Intent;
use thiserror::Error;

/// Failure surface of the evaluation engine.
///
/// Probability and ratio inputs are clamped rather than rejected, so the
/// only errors are structural ones the caller must fix.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("scenario has no legal actions")]
    NoLegalActions,

    #[error("action not found in table: {action} size={size_bb:?} intent={intent:?}")]
    ActionNotFound {
        action: ActionKind,
        size_bb: Option<f64>,
        intent: Option<Intent>,
    },
}
