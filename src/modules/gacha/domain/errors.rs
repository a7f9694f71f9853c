use thiserror::Error;

use crate::shared::errors::AppError;

/// Ways a draw can end without a pull
#[derive(Error, Debug)]
pub enum PullError {
    #[error("No guarantees of the requested tier are available")]
    NoGuarantees,

    #[error("No pulls available")]
    NoPullsAvailable { recharge_timestamp: Option<String> },

    #[error("Character is no longer owned")]
    CharacterNotOwned,

    #[error("No character in the pool passed validation")]
    PoolExhausted,

    #[error("Gacha is under maintenance")]
    Maintenance,

    #[error("Unexpected inventory response: {0}")]
    Unexpected(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl PullError {
    /// Whether the condition should be shown to the user as-is
    pub fn is_user_reportable(&self) -> bool {
        !matches!(self, PullError::Unexpected(_) | PullError::App(_))
    }
}

pub type PullResult<T> = Result<T, PullError>;
