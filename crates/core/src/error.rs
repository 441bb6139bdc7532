use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoveError {
    #[error("source does not exist: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("target already exists: {}", .0.display())]
    TargetExists(PathBuf),
    #[error("backup of {} failed: {source}", .path.display())]
    BackupFailed { path: PathBuf, source: io::Error },
    #[error("moving {} failed: {source}", .path.display())]
    MoveFailed { path: PathBuf, source: io::Error },
}

impl MoveError {
    pub fn kind(&self) -> MoveErrorKind {
        match self {
            MoveError::SourceMissing(_) => MoveErrorKind::SourceMissing,
            MoveError::TargetExists(_) => MoveErrorKind::TargetExists,
            MoveError::BackupFailed { .. } => MoveErrorKind::BackupFailed,
            MoveError::MoveFailed { .. } => MoveErrorKind::MoveFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveErrorKind {
    SourceMissing,
    TargetExists,
    BackupFailed,
    MoveFailed,
}
