use crate::classifier;
use crate::config::AppConfig;
use crate::models::{AnalyzedProject, Selection};
use crate::mover::{BatchReport, Mover};
use crate::scanner::Scanner;
use crate::taxonomy::Folder;
use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub grouped: BTreeMap<Folder, Vec<AnalyzedProject>>,
    pub needs_review: Vec<AnalyzedProject>,
}

impl AnalysisReport {
    pub fn total(&self) -> usize {
        self.grouped.values().map(Vec::len).sum()
    }

    /// All projects in folder order, scan order within each folder.
    pub fn projects(&self) -> impl Iterator<Item = &AnalyzedProject> {
        self.grouped.values().flatten()
    }
}

/// Scan, classify and move, driven by one config.
pub struct Organizer {
    roots: Vec<PathBuf>,
    target_root: PathBuf,
    excludes: Vec<String>,
    dry_run: bool,
    copy_then_delete: bool,
}

impl Organizer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            roots: config.scan.roots(),
            target_root: config.organize.target_root(),
            excludes: config.scan.exclude.clone(),
            dry_run: config.organize.dry_run,
            copy_then_delete: config.organize.copy_then_delete,
        }
    }

    pub fn with_target_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.target_root = root.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn target_root(&self) -> &PathBuf {
        &self.target_root
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn analyze_all_projects(&self) -> anyhow::Result<AnalysisReport> {
        info!("Starting scan of {} root(s)...", self.roots.len());
        let scanner = Scanner::new(&self.excludes)
            .context("invalid scan exclude pattern")?
            .skip_path(self.target_root.clone());
        let records = scanner.find_projects(&self.roots);
        info!("Scan complete. Found {} project(s).", records.len());

        let mut report = AnalysisReport::default();
        for record in records {
            let analysis = classifier::categorize(&record);
            let project = AnalyzedProject { record, analysis };
            if project.analysis.needs_review {
                report.needs_review.push(project.clone());
            }
            report
                .grouped
                .entry(project.analysis.suggested_folder)
                .or_default()
                .push(project);
        }
        info!(
            "Classification complete. {} project(s) need review.",
            report.needs_review.len()
        );
        Ok(report)
    }

    pub fn organize_selected_projects(&self, selections: &[Selection]) -> BatchReport {
        Mover::new(self.target_root.clone(), self.dry_run)
            .with_copy_then_delete(self.copy_then_delete)
            .organize_selected_projects(selections)
    }
}
