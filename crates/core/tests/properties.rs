//! Property tests for the classifier.

use organizer_core::classifier::{categorize, REVIEW_THRESHOLD};
use organizer_core::models::{Category, ProjectRecord};
use proptest::prelude::*;

fn arbitrary_record() -> impl Strategy<Value = ProjectRecord> {
    (
        "[A-Za-z0-9 _&-]{0,40}",
        prop::collection::vec("[a-z]{1,8}\\.als", 0..3),
        prop::collection::vec("[a-z]{1,8}\\.wav", 0..6),
    )
        .prop_map(|(name, project_files, audio_files)| ProjectRecord {
            path: format!("/music/{}", name),
            total_files: project_files.len() + audio_files.len(),
            name,
            project_files,
            audio_files,
        })
}

fn expected_score(categories: &[Category]) -> u32 {
    categories
        .iter()
        .map(|c| match c {
            Category::SadactProject => 30,
            Category::Remix => 25,
            Category::Collaboration => 20,
            Category::Stems => 35,
            Category::Version => 15,
            Category::ActiveProject => 20,
            Category::AudioOnly => 10,
        })
        .sum()
}

proptest! {
    /// Property: confidence is exactly the sum of the fired rules
    #[test]
    fn confidence_is_sum_of_fired_rules(record in arbitrary_record()) {
        let a = categorize(&record);
        let fired: Vec<Category> = a.categories.iter().copied().collect();
        prop_assert_eq!(a.confidence, expected_score(&fired));
    }

    /// Property: review flag mirrors the threshold
    #[test]
    fn review_flag_matches_threshold(record in arbitrary_record()) {
        let a = categorize(&record);
        prop_assert_eq!(a.needs_review, a.confidence < REVIEW_THRESHOLD);
    }

    /// Property: classification is deterministic
    #[test]
    fn classification_is_deterministic(record in arbitrary_record()) {
        prop_assert_eq!(categorize(&record), categorize(&record));
    }

    /// Property: active_project and audio_only never both fire
    #[test]
    fn file_tags_are_exclusive(record in arbitrary_record()) {
        let a = categorize(&record);
        prop_assert!(!(a.has(Category::ActiveProject) && a.has(Category::AudioOnly)));
        prop_assert_eq!(a.has(Category::ActiveProject), !record.project_files.is_empty());
    }
}
