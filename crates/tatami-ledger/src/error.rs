use thiserror::Error as ThisError;

/// LedgerError type
#[derive(ThisError, Debug)]
pub enum LedgerError {
    /// The submitted input was rejected before touching storage
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }
}
