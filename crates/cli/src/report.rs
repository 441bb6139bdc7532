use organizer_core::models::MoveResult;
use organizer_core::mover::BatchReport;
use organizer_core::organizer::AnalysisReport;
use std::fmt::Write;

pub fn render_analysis(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found {} project(s)", report.total());
    for (folder, projects) in &report.grouped {
        let _ = writeln!(out, "\n{} ({})", folder, projects.len());
        for p in projects {
            let _ = writeln!(
                out,
                "  {:<40} confidence {:>3}{}",
                p.record.name,
                p.analysis.confidence,
                if p.analysis.needs_review { "  [review]" } else { "" }
            );
        }
    }
    if !report.needs_review.is_empty() {
        let _ = writeln!(out, "\n{} project(s) need manual review:", report.needs_review.len());
        for p in &report.needs_review {
            let _ = writeln!(out, "  {}", p.record.path);
        }
    }
    out
}

pub fn render_batch(report: &BatchReport, verbose: bool) -> String {
    let mut out = String::new();
    if verbose {
        for entry in &report.results {
            let marker = match &entry.result {
                MoveResult::Success { .. } => "ok",
                MoveResult::Error { .. } => "error",
                MoveResult::DryRun { .. } => "dry-run",
            };
            let _ = writeln!(out, "[{}] {}", marker, entry.result.message());
            if let MoveResult::Success {
                backup_error: Some(e),
                ..
            } = &entry.result
            {
                let _ = writeln!(out, "        backup failed: {}", e);
            }
        }
    }
    let _ = writeln!(
        out,
        "summary: moved={}, failed={}, dry_run={}, backup_failures={}",
        report.succeeded(),
        report.failed(),
        report.dry_run(),
        report.backup_failures()
    );
    if let Some(path) = &report.log_path {
        let _ = writeln!(out, "log written to {}", path.display());
    }
    out
}
