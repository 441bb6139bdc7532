//! Turning an analysis into the list of selections handed to the mover.

use anyhow::Result;
use organizer_core::models::{AnalyzedProject, Selection};
use organizer_core::organizer::AnalysisReport;
use organizer_core::taxonomy::Folder;
use std::io::{BufRead, Write};
use std::path::Path;

/// Quick mode: accept every suggestion, optionally including low-confidence ones.
pub fn quick_selections(report: &AnalysisReport, include_review: bool) -> Vec<Selection> {
    let mut selections = Vec::new();
    for project in report.projects() {
        if !include_review && project.analysis.needs_review {
            continue;
        }
        if !inside_selected(&selections, &project.record.path) {
            selections.push(Selection::suggested(project));
        }
    }
    selections
}

/// True when `path` lies under a project already selected; it moves with its parent.
fn inside_selected(selections: &[Selection], path: &str) -> bool {
    let path = Path::new(path);
    selections
        .iter()
        .any(|s| path != Path::new(&s.path) && path.starts_with(&s.path))
}

enum Answer {
    Accept,
    Skip,
    Folder(Folder),
    Quit,
}

/// Interactive mode: one prompt per project on `input`/`output`.
pub fn interactive_selections<R: BufRead, W: Write>(
    report: &AnalysisReport,
    input: &mut R,
    output: &mut W,
) -> Result<Vec<Selection>> {
    let mut selections = Vec::new();
    let total = report.total();
    for (idx, project) in report.projects().enumerate() {
        if inside_selected(&selections, &project.record.path) {
            continue;
        }
        describe(project, idx + 1, total, output)?;
        match ask(input, output)? {
            Answer::Accept => selections.push(Selection::suggested(project)),
            Answer::Folder(folder) => {
                selections.push(Selection::new(project.record.path.clone(), folder.as_str()))
            }
            Answer::Skip => {}
            Answer::Quit => break,
        }
    }
    Ok(selections)
}

fn describe<W: Write>(
    project: &AnalyzedProject,
    n: usize,
    total: usize,
    out: &mut W,
) -> Result<()> {
    let a = &project.analysis;
    let tags: Vec<&str> = a.categories.iter().map(|c| c.as_str()).collect();
    writeln!(out)?;
    writeln!(out, "[{}/{}] {}", n, total, project.record.name)?;
    writeln!(out, "  path:       {}", project.record.path)?;
    writeln!(out, "  categories: {}", tags.join(", "))?;
    writeln!(
        out,
        "  confidence: {}{}",
        a.confidence,
        if a.needs_review { " (needs review)" } else { "" }
    )?;
    writeln!(out, "  suggested:  {}", a.suggested_folder)?;
    Ok(())
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Answer> {
    loop {
        write!(out, "  move? [y]es / [n]o / [f]older / [q]uit: ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(Answer::Quit);
        };
        match line.to_lowercase().as_str() {
            "y" | "yes" => return Ok(Answer::Accept),
            "n" | "no" | "" => return Ok(Answer::Skip),
            "q" | "quit" => return Ok(Answer::Quit),
            "f" | "folder" => {
                if let Some(folder) = pick_folder(input, out)? {
                    return Ok(Answer::Folder(folder));
                }
            }
            other => writeln!(out, "  unrecognised answer {:?}", other)?,
        }
    }
}

fn pick_folder<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Folder>> {
    for (i, folder) in Folder::ALL.iter().enumerate() {
        writeln!(out, "    {}) {}", i + 1, folder)?;
    }
    write!(out, "  folder number: ")?;
    out.flush()?;
    let Some(line) = read_line(input)? else {
        return Ok(None);
    };
    let picked = line
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| Folder::ALL.get(i).copied())
        .or_else(|| Folder::parse(&line));
    if picked.is_none() {
        writeln!(out, "  no such folder {:?}", line)?;
    }
    Ok(picked)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}
