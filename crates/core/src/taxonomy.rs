//! The fixed destination folder taxonomy.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Parent of the per-run backup folders, relative to the target root.
pub const BACKUP_ROOT: &str = "Archive/Backup_Projects";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Folder {
    #[serde(rename = "Active_Projects/In_Progress")]
    InProgress,
    #[serde(rename = "Active_Projects/Ready_for_Master")]
    ReadyForMaster,
    #[serde(rename = "Released_Tracks/Remixes")]
    Remixes,
    #[serde(rename = "Released_Tracks/Singles")]
    Singles,
    #[serde(rename = "Collaborations/Active_Collabs")]
    ActiveCollabs,
    #[serde(rename = "Collaborations/Completed_Collabs")]
    CompletedCollabs,
    #[serde(rename = "Stems_and_Parts/My_Stems")]
    MyStems,
    #[serde(rename = "Stems_and_Parts/Received_Stems")]
    ReceivedStems,
    #[serde(rename = "Archive/Experiments")]
    Experiments,
}

impl Folder {
    pub const ALL: [Folder; 9] = [
        Folder::InProgress,
        Folder::ReadyForMaster,
        Folder::Remixes,
        Folder::Singles,
        Folder::ActiveCollabs,
        Folder::CompletedCollabs,
        Folder::MyStems,
        Folder::ReceivedStems,
        Folder::Experiments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Folder::InProgress => "Active_Projects/In_Progress",
            Folder::ReadyForMaster => "Active_Projects/Ready_for_Master",
            Folder::Remixes => "Released_Tracks/Remixes",
            Folder::Singles => "Released_Tracks/Singles",
            Folder::ActiveCollabs => "Collaborations/Active_Collabs",
            Folder::CompletedCollabs => "Collaborations/Completed_Collabs",
            Folder::MyStems => "Stems_and_Parts/My_Stems",
            Folder::ReceivedStems => "Stems_and_Parts/Received_Stems",
            Folder::Experiments => "Archive/Experiments",
        }
    }

    pub fn parse(s: &str) -> Option<Folder> {
        let s = s.trim().trim_matches('/');
        Folder::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// Absolute location of this folder under `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        self.as_str().split('/').fold(root.to_path_buf(), |p, c| p.join(c))
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates every taxonomy folder plus the backup parent under `root`.
/// Existing folders are left alone.
pub fn create_folder_structure(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    let backup = BACKUP_ROOT.split('/').fold(root.to_path_buf(), |p, c| p.join(c));
    for dir in Folder::ALL.iter().map(|f| f.resolve(root)).chain([backup]) {
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create folder {:?}", dir))?;
            created.push(dir);
        }
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_every_known_folder() {
        for folder in Folder::ALL {
            assert_eq!(Folder::parse(folder.as_str()), Some(folder));
        }
        assert_eq!(Folder::parse("/Archive/Experiments/"), Some(Folder::Experiments));
        assert_eq!(Folder::parse("Archive"), None);
    }

    #[test]
    fn serializes_as_relative_path() {
        let json = serde_json::to_string(&Folder::CompletedCollabs).unwrap();
        assert_eq!(json, "\"Collaborations/Completed_Collabs\"");
    }

    #[test]
    fn folder_structure_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let first = create_folder_structure(temp.path()).unwrap();
        assert_eq!(first.len(), Folder::ALL.len() + 1);
        assert!(temp.path().join("Stems_and_Parts").join("My_Stems").is_dir());
        assert!(temp.path().join("Archive").join("Backup_Projects").is_dir());
        let second = create_folder_structure(temp.path()).unwrap();
        assert!(second.is_empty());
    }
}
