use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("terminal size unavailable: {0}")]
    Terminal(#[source] io::Error),
    #[error(transparent)]
    Bitmap(#[from] brl_bmp::DecodeError),
    #[error("failed to write frame: {0}")]
    Output(#[source] io::Error),
    #[error("failed to install signal handler: {0}")]
    Signal(#[source] io::Error),
}

impl DemoError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Bitmap(_) => 2,
            Self::Terminal(_) | Self::Signal(_) => 3,
            Self::Output(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
