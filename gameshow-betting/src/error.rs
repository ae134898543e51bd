use gameshow_core::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BettingError>;

#[derive(Error, Debug)]
pub enum BettingError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Insufficient funds: need {need} wei, have {available} wei")]
    InsufficientFunds { need: u64, available: u64 },

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Ledger core error: {0}")]
    Core(CoreError),
}

/// Coarse classification callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    InvalidArgument,
    Unauthorized,
    InsufficientFunds,
    Other,
}

impl BettingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BettingError::NotFound(_) => ErrorKind::NotFound,
            BettingError::InvalidState(_) => ErrorKind::InvalidState,
            BettingError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            BettingError::Unauthorized(_) => ErrorKind::Unauthorized,
            BettingError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            BettingError::Overflow(_) | BettingError::Core(_) => ErrorKind::Other,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl From<CoreError> for BettingError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(msg) => BettingError::NotFound(msg),
            CoreError::InvalidArgument(msg) => BettingError::InvalidArgument(msg),
            CoreError::Unauthorized(msg) => BettingError::Unauthorized(msg),
            CoreError::InsufficientFunds { need, available } => {
                BettingError::InsufficientFunds { need, available }
            }
            CoreError::Overflow(msg) => BettingError::Overflow(msg),
            other => BettingError::Core(other),
        }
    }
}
