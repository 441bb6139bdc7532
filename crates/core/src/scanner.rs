//! Walks scan roots and collects directories that look like music projects.

use crate::models::ProjectRecord;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Path fragments that prune a directory and everything below it.
pub const EXCLUDED_DIRS: [&str; 4] = [".git", "node_modules", "cache", "trash"];

pub const PROJECT_EXTENSIONS: [&str; 11] = [
    ".als",
    ".flp",
    ".logicx",
    ".logic",
    ".ptx",
    ".ptf",
    ".cpr",
    ".rpp",
    ".song",
    ".bwproject",
    ".reason",
];

pub const AUDIO_EXTENSIONS: [&str; 7] = [".wav", ".aiff", ".aif", ".mp3", ".flac", ".m4a", ".ogg"];

/// Audio-only directories need at least this many files to count as a project.
pub const MIN_AUDIO_FILES: usize = 3;

#[derive(Debug, Clone)]
pub struct Scanner {
    excludes: GlobSet,
    skip: Vec<PathBuf>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            excludes: GlobSet::empty(),
            skip: Vec::new(),
        }
    }
}

impl Scanner {
    pub fn new(excludes: &[String]) -> anyhow::Result<Self> {
        Ok(Self {
            excludes: build_globset(excludes)?,
            skip: Vec::new(),
        })
    }

    /// Never descend into `path` (used for the organizer's own target root).
    pub fn skip_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip.push(path.into());
        self
    }

    pub fn find_projects(&self, roots: &[PathBuf]) -> Vec<ProjectRecord> {
        let mut projects = Vec::new();
        for root in roots {
            if !root.is_dir() {
                warn!("Scan root {:?} is not a directory, skipping", root);
                continue;
            }
            debug!("Scanning {:?}", root);
            let walker = WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| !e.file_type().is_dir() || self.should_descend(e.path()));
            for entry in walker {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        warn!("Skipping unreadable entry: {}", e);
                        continue;
                    }
                };
                if !entry.file_type().is_dir() {
                    continue;
                }
                if let Some(record) = self.inspect_dir(entry.path()) {
                    debug!(
                        "Found project {:?} ({} project files, {} audio files)",
                        record.path,
                        record.project_files.len(),
                        record.audio_files.len()
                    );
                    projects.push(record);
                }
            }
        }
        projects
    }

    fn should_descend(&self, path: &Path) -> bool {
        if is_excluded_dir(path) || self.excludes.is_match(path) {
            return false;
        }
        !self.skip.iter().any(|s| path.starts_with(s))
    }

    fn inspect_dir(&self, dir: &Path) -> Option<ProjectRecord> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read directory {:?}: {}", dir, e);
                return None;
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter(|e| !self.excludes.is_match(e.path()))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        let mut project_files = Vec::new();
        let mut audio_files = Vec::new();
        for name in &names {
            if is_project_file(name) {
                project_files.push(name.clone());
            } else if is_audio_file(name) {
                audio_files.push(name.clone());
            }
        }

        if project_files.is_empty() && audio_files.len() < MIN_AUDIO_FILES {
            return None;
        }

        Some(ProjectRecord {
            path: dir.to_string_lossy().into_owned(),
            name: dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            project_files,
            audio_files,
            total_files: names.len(),
        })
    }
}

/// Scans `roots` with only the built-in exclusions.
pub fn find_projects(roots: &[PathBuf]) -> Vec<ProjectRecord> {
    Scanner::default().find_projects(roots)
}

/// True when the directory path contains an excluded fragment, in any case.
pub fn is_excluded_dir(path: &Path) -> bool {
    let lower = path.to_string_lossy().to_lowercase();
    EXCLUDED_DIRS.iter().any(|x| lower.contains(x))
}

// Substring match on the whole name, so "take.wav.asd" counts as audio.
pub fn is_project_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    PROJECT_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

pub fn is_audio_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    AUDIO_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat)?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
