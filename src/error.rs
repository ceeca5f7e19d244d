use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError
{
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("{0}")]
    Usage(String),
}

impl AppError
{
    pub fn usage(message: impl Into<String>) -> Self
    {
        AppError::Usage(message.into())
    }
}
