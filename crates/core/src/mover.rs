//! Backup-then-move of selected projects into the taxonomy, plus the run log.

use crate::error::MoveError;
use crate::models::{LogEntry, MoveResult, OrganizationLog, Selection};
use crate::taxonomy::BACKUP_ROOT;
use anyhow::Context;
use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone)]
pub struct Mover {
    target_root: PathBuf,
    dry_run: bool,
    copy_then_delete: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub results: Vec<LogEntry>,
    pub log_path: Option<PathBuf>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|e| e.result.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|e| e.result.is_error()).count()
    }

    pub fn dry_run(&self) -> usize {
        self.results
            .iter()
            .filter(|e| matches!(e.result, MoveResult::DryRun { .. }))
            .count()
    }

    pub fn backup_failures(&self) -> usize {
        self.results
            .iter()
            .filter(|e| {
                matches!(
                    e.result,
                    MoveResult::Success {
                        backup_error: Some(_),
                        ..
                    }
                )
            })
            .count()
    }
}

impl Mover {
    pub fn new(target_root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            target_root: target_root.into(),
            dry_run,
            copy_then_delete: false,
        }
    }

    /// Always copy and delete instead of trying a rename first.
    pub fn with_copy_then_delete(mut self, copy_then_delete: bool) -> Self {
        self.copy_then_delete = copy_then_delete;
        self
    }

    pub fn backup_root(&self) -> PathBuf {
        BACKUP_ROOT
            .split('/')
            .fold(self.target_root.clone(), |p, c| p.join(c))
    }

    /// Where `selection` would land: `<root>/<target_folder>/<source name>`.
    pub fn target_path(&self, selection: &Selection) -> PathBuf {
        let source = Path::new(&selection.path);
        let mut dest = selection
            .target_folder
            .split('/')
            .filter(|c| !c.is_empty())
            .fold(self.target_root.clone(), |p, c| p.join(c));
        if let Some(name) = source.file_name() {
            dest.push(name);
        }
        dest
    }

    pub fn move_project(&self, selection: &Selection) -> MoveResult {
        match self.try_move(selection) {
            Ok(result) => result,
            Err(e) => {
                warn!("Move of {:?} failed: {}", selection.path, e);
                MoveResult::Error {
                    message: e.to_string(),
                    kind: e.kind(),
                }
            }
        }
    }

    fn try_move(&self, selection: &Selection) -> Result<MoveResult, MoveError> {
        let source = PathBuf::from(&selection.path);
        if !source.exists() {
            return Err(MoveError::SourceMissing(source));
        }
        let target = self.target_path(selection);
        if target.exists() {
            return Err(MoveError::TargetExists(target));
        }
        if self.target_root.starts_with(&source) {
            return Err(MoveError::MoveFailed {
                path: source,
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "target root lies inside the project",
                ),
            });
        }

        let source_str = source.to_string_lossy().into_owned();
        let target_str = target.to_string_lossy().into_owned();

        if self.dry_run {
            return Ok(MoveResult::DryRun {
                message: format!("Would move {} -> {}", source_str, target_str),
                source: source_str,
                target: target_str,
            });
        }

        // Backup failure is reported but does not stop the move.
        let (backup, backup_error) = match self.create_backup(&source) {
            Ok(path) => (Some(path.to_string_lossy().into_owned()), None),
            Err(e) => {
                warn!("{}", e);
                (None, Some(e.to_string()))
            }
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| MoveError::MoveFailed {
                path: source.clone(),
                source: e,
            })?;
        }
        self.relocate(&source, &target)
            .map_err(|e| MoveError::MoveFailed {
                path: source.clone(),
                source: e,
            })?;

        info!("Moved {:?} -> {:?}", source, target);
        Ok(MoveResult::Success {
            message: format!("Moved {} -> {}", source_str, target_str),
            source: source_str,
            target: target_str,
            backup,
            backup_error,
        })
    }

    /// Copies `source` to `<backup root>/backup_<timestamp>/<name>`.
    pub fn create_backup(&self, source: &Path) -> Result<PathBuf, MoveError> {
        let run_dir = self
            .backup_root()
            .join(format!("backup_{}", Local::now().format(TIMESTAMP_FORMAT)));
        let name = source
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "backup".into());
        let failed = |e: io::Error| MoveError::BackupFailed {
            path: source.to_path_buf(),
            source: e,
        };

        fs::create_dir_all(&run_dir).map_err(failed)?;
        let dest = unique_path(&run_dir.join(name));
        if source.is_dir() {
            copy_dir(source, &dest).map_err(failed)?;
        } else {
            fs::copy(source, &dest).map_err(failed)?;
        }
        debug!("Backed up {:?} to {:?}", source, dest);
        Ok(dest)
    }

    fn relocate(&self, from: &Path, to: &Path) -> io::Result<()> {
        if !self.copy_then_delete {
            match fs::rename(from, to) {
                Ok(()) => return Ok(()),
                Err(e) => debug!("rename {:?} failed ({}), falling back to copy", from, e),
            }
        }
        let copied = if from.is_dir() {
            copy_dir(from, to)
        } else {
            fs::copy(from, to).map(|_| ())
        };
        if let Err(e) = copied {
            let _ = remove_path(to);
            return Err(e);
        }
        remove_path(from)
    }

    /// Runs every selection in order and, outside dry-run, writes one log.
    pub fn organize_selected_projects(&self, selections: &[Selection]) -> BatchReport {
        info!(
            "Organizing {} project(s){}",
            selections.len(),
            if self.dry_run { " (dry run)" } else { "" }
        );
        let results: Vec<LogEntry> = selections
            .iter()
            .map(|s| LogEntry {
                project_name: Path::new(&s.path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| s.path.clone()),
                source_path: s.path.clone(),
                target_folder: s.target_folder.clone(),
                result: self.move_project(s),
            })
            .collect();

        let mut report = BatchReport {
            results,
            log_path: None,
        };
        if !self.dry_run {
            match self.write_log(&report.results) {
                Ok(path) => {
                    info!("Wrote organization log {:?}", path);
                    report.log_path = Some(path);
                }
                Err(e) => warn!("Failed to write organization log: {:#}", e),
            }
        }
        report
    }

    fn write_log(&self, results: &[LogEntry]) -> anyhow::Result<PathBuf> {
        let now = Local::now();
        let log = OrganizationLog {
            timestamp: now.to_rfc3339(),
            dry_run: self.dry_run,
            results: results.to_vec(),
        };
        fs::create_dir_all(&self.target_root)
            .with_context(|| format!("Failed to create {:?}", self.target_root))?;
        let path = unique_path(&self.target_root.join(format!(
            "organization_log_{}.json",
            now.format(TIMESTAMP_FORMAT)
        )));
        let body = serde_json::to_string_pretty(&log)?;
        fs::write(&path, body).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(path)
    }
}

fn copy_dir(src: &Path, dest: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let out = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&out)?;
        } else {
            fs::copy(entry.path(), &out)?;
        }
    }
    Ok(())
}

fn remove_path(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        Ok(())
    }
}

fn unique_path(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }
    let stem = candidate
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("backup")
        .to_string();
    let ext = candidate
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_string();
    let parent = candidate.parent().unwrap_or_else(|| Path::new("."));
    let mut counter = 1;
    loop {
        let name = if ext.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, ext)
        };
        let next = parent.join(name);
        if !next.exists() {
            return next;
        }
        counter += 1;
    }
}
