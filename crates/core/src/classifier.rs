//! Keyword heuristics that tag a project and pick its destination folder.

use crate::models::{Analysis, Category, ProjectRecord};
use crate::taxonomy::Folder;
use std::collections::BTreeSet;

pub const BRAND_MARKER: &str = "sadact";
pub const REMIX_KEYWORDS: [&str; 5] = ["remix", "rmx", "rework", "edit", "bootleg"];
pub const COLLAB_KEYWORDS: [&str; 7] = ["feat", "ft", " & ", " and ", " x ", "vs", "with"];
pub const STEMS_KEYWORDS: [&str; 4] = ["stems", "parts", "multitracks", "tracks"];
pub const VERSION_KEYWORDS: [&str; 7] = ["v2", "v3", "alt", "demo", "rough", "draft", "wip"];
pub const COMPLETION_KEYWORDS: [&str; 3] = ["complete", "final", "master"];
pub const MIX_KEYWORDS: [&str; 2] = ["mix", "mixed"];
pub const WORK_IN_PROGRESS_KEYWORDS: [&str; 4] = ["demo", "rough", "wip", "draft"];

/// Projects scoring below this are flagged for manual review.
pub const REVIEW_THRESHOLD: u32 = 50;

const BRAND_SCORE: u32 = 30;
const REMIX_SCORE: u32 = 25;
const COLLAB_SCORE: u32 = 20;
const STEMS_SCORE: u32 = 35;
const VERSION_SCORE: u32 = 15;
const ACTIVE_PROJECT_SCORE: u32 = 20;
const AUDIO_ONLY_SCORE: u32 = 10;

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Tags `record`, sums its confidence and suggests a folder. Pure.
pub fn categorize(record: &ProjectRecord) -> Analysis {
    let name = record.name.to_lowercase();
    let path = record.path.to_lowercase();
    let branded = name.contains(BRAND_MARKER) || path.contains(BRAND_MARKER);

    let mut categories = BTreeSet::new();
    let mut confidence = 0;

    let keyword_rules: [(bool, Category, u32); 5] = [
        (branded, Category::SadactProject, BRAND_SCORE),
        (contains_any(&name, &REMIX_KEYWORDS), Category::Remix, REMIX_SCORE),
        (contains_any(&name, &COLLAB_KEYWORDS), Category::Collaboration, COLLAB_SCORE),
        (contains_any(&name, &STEMS_KEYWORDS), Category::Stems, STEMS_SCORE),
        (contains_any(&name, &VERSION_KEYWORDS), Category::Version, VERSION_SCORE),
    ];
    for (hit, category, score) in keyword_rules {
        if hit {
            categories.insert(category);
            confidence += score;
        }
    }

    if !record.project_files.is_empty() {
        categories.insert(Category::ActiveProject);
        confidence += ACTIVE_PROJECT_SCORE;
    } else if !record.audio_files.is_empty() {
        categories.insert(Category::AudioOnly);
        confidence += AUDIO_ONLY_SCORE;
    }

    let suggested_folder = suggest_folder(&categories, &name, branded);
    Analysis {
        categories,
        confidence,
        suggested_folder,
        needs_review: confidence < REVIEW_THRESHOLD,
    }
}

/// Ordered decision list; the first matching rule decides.
pub fn suggest_folder(categories: &BTreeSet<Category>, name: &str, branded: bool) -> Folder {
    let name = name.to_lowercase();
    let completed = contains_any(&name, &COMPLETION_KEYWORDS);
    let has = |c: Category| categories.contains(&c);

    if has(Category::Stems) {
        return if branded {
            Folder::MyStems
        } else {
            Folder::ReceivedStems
        };
    }
    if has(Category::Collaboration) {
        return if completed {
            Folder::CompletedCollabs
        } else {
            Folder::ActiveCollabs
        };
    }
    if has(Category::Remix) {
        return if completed {
            Folder::Remixes
        } else {
            Folder::InProgress
        };
    }
    if completed {
        // Remix was handled above, so in practice this is always Singles.
        return if has(Category::Remix) {
            Folder::Remixes
        } else {
            Folder::Singles
        };
    }
    if contains_any(&name, &MIX_KEYWORDS) {
        return Folder::ReadyForMaster;
    }
    if contains_any(&name, &WORK_IN_PROGRESS_KEYWORDS) {
        return Folder::InProgress;
    }
    if has(Category::ActiveProject) {
        return Folder::InProgress;
    }
    Folder::Experiments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, project_files: &[&str], audio_files: &[&str]) -> ProjectRecord {
        ProjectRecord {
            path: format!("/music/{}", name),
            name: name.to_string(),
            project_files: project_files.iter().map(|s| s.to_string()).collect(),
            audio_files: audio_files.iter().map(|s| s.to_string()).collect(),
            total_files: project_files.len() + audio_files.len(),
        }
    }

    fn tags(analysis: &Analysis) -> Vec<Category> {
        analysis.categories.iter().copied().collect()
    }

    #[test]
    fn remix_collab_final_goes_to_completed_collabs() {
        let a = categorize(&record("Track_Remix_feat_Artist_Final", &["song.als"], &[]));
        assert_eq!(
            tags(&a),
            vec![Category::Remix, Category::Collaboration, Category::ActiveProject]
        );
        assert_eq!(a.confidence, 65);
        assert!(!a.needs_review);
        assert_eq!(a.suggested_folder, Folder::CompletedCollabs);
    }

    #[test]
    fn audio_only_jam_is_archived_for_review() {
        let a = categorize(&record("random_jam", &[], &["a.wav", "b.wav", "c.wav"]));
        assert_eq!(tags(&a), vec![Category::AudioOnly]);
        assert_eq!(a.confidence, 10);
        assert!(a.needs_review);
        assert_eq!(a.suggested_folder, Folder::Experiments);
    }

    #[test]
    fn stems_outrank_everything_and_follow_brand() {
        let mine = categorize(&record("SADACT stems final", &["x.als"], &[]));
        assert_eq!(mine.suggested_folder, Folder::MyStems);
        assert_eq!(mine.confidence, 30 + 35 + 20);

        let received = categorize(&record("Client Stems feat Someone", &[], &["a.wav"]));
        assert_eq!(received.suggested_folder, Folder::ReceivedStems);
    }

    #[test]
    fn brand_marker_in_path_counts() {
        let mut r = record("night drive", &["x.flp"], &[]);
        r.path = "/home/u/Sadact/night drive".to_string();
        let a = categorize(&r);
        assert!(a.has(Category::SadactProject));
        assert_eq!(a.confidence, 50);
        assert!(!a.needs_review);
    }

    #[test]
    fn remix_without_completion_stays_in_progress() {
        let a = categorize(&record("sunrise bootleg", &["s.als"], &[]));
        assert_eq!(a.suggested_folder, Folder::InProgress);
        let done = categorize(&record("sunrise bootleg master", &["s.als"], &[]));
        assert_eq!(done.suggested_folder, Folder::Remixes);
    }

    #[test]
    fn completion_without_tags_is_a_single() {
        let a = categorize(&record("ocean_final", &["o.als"], &[]));
        assert_eq!(a.suggested_folder, Folder::Singles);
    }

    #[test]
    fn mix_and_wip_keywords() {
        assert_eq!(
            categorize(&record("bassline mixed", &["b.als"], &[])).suggested_folder,
            Folder::ReadyForMaster
        );
        let wip = categorize(&record("bassline wip", &[], &["1.wav", "2.wav", "3.wav"]));
        assert!(wip.has(Category::Version));
        assert_eq!(wip.suggested_folder, Folder::InProgress);
    }

    #[test]
    fn plain_project_is_in_progress_and_bare_dir_is_experiment() {
        assert_eq!(
            categorize(&record("groove", &["g.als"], &[])).suggested_folder,
            Folder::InProgress
        );
        let empty = categorize(&record("groove", &[], &[]));
        assert!(empty.categories.is_empty());
        assert_eq!(empty.confidence, 0);
        assert_eq!(empty.suggested_folder, Folder::Experiments);
    }

    #[test]
    fn draft_also_reads_as_collaboration() {
        // "draft" contains "ft"
        let a = categorize(&record("draft", &["d.als"], &[]));
        assert!(a.has(Category::Collaboration));
        assert_eq!(a.suggested_folder, Folder::ActiveCollabs);
    }

    #[test]
    fn confidence_can_exceed_one_hundred() {
        let a = categorize(&record("sadact remix feat stems v2", &["p.als"], &["a.wav"]));
        assert_eq!(a.confidence, 30 + 25 + 20 + 35 + 15 + 20);
    }
}
