use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AptError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

impl AptError {
    /// Exit code of the failing tool, when it exited with one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            AptError::CommandFailed { status, .. } => status.code(),
            _ => None,
        }
    }

    /// Diagnostic text the failing tool wrote to stderr.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            AptError::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AptError>;
