use crate::error::MoveErrorKind;
use crate::taxonomy::Folder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A directory the scanner judged to hold a music project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub path: String,
    pub name: String,
    pub project_files: Vec<String>,
    pub audio_files: Vec<String>,
    pub total_files: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SadactProject,
    Remix,
    Collaboration,
    Stems,
    Version,
    ActiveProject,
    AudioOnly,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SadactProject => "sadact_project",
            Category::Remix => "remix",
            Category::Collaboration => "collaboration",
            Category::Stems => "stems",
            Category::Version => "version",
            Category::ActiveProject => "active_project",
            Category::AudioOnly => "audio_only",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub categories: BTreeSet<Category>,
    pub confidence: u32,
    pub suggested_folder: Folder,
    pub needs_review: bool,
}

impl Analysis {
    pub fn has(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedProject {
    pub record: ProjectRecord,
    pub analysis: Analysis,
}

/// An approved instruction to move one project into a taxonomy folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub path: String,
    pub target_folder: String,
}

impl Selection {
    pub fn new(path: impl Into<String>, target_folder: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target_folder: target_folder.into(),
        }
    }

    pub fn suggested(project: &AnalyzedProject) -> Self {
        Self::new(
            project.record.path.clone(),
            project.analysis.suggested_folder.as_str(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveResult {
    Success {
        message: String,
        source: String,
        target: String,
        backup: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        backup_error: Option<String>,
    },
    Error {
        message: String,
        kind: MoveErrorKind,
    },
    DryRun {
        message: String,
        source: String,
        target: String,
    },
}

impl MoveResult {
    pub fn message(&self) -> &str {
        match self {
            MoveResult::Success { message, .. }
            | MoveResult::Error { message, .. }
            | MoveResult::DryRun { message, .. } => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MoveResult::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MoveResult::Error { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub project_name: String,
    pub source_path: String,
    pub target_folder: String,
    pub result: MoveResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationLog {
    pub timestamp: String,
    pub dry_run: bool,
    pub results: Vec<LogEntry>,
}
