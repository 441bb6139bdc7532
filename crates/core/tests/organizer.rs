use organizer_core::config::{AppConfig, OrganizeConfig, ScanConfig};
use organizer_core::models::Selection;
use organizer_core::organizer::Organizer;
use organizer_core::taxonomy::Folder;
use std::fs;
use tempfile::tempdir;

fn config(scan_root: &std::path::Path, target_root: &std::path::Path) -> AppConfig {
    AppConfig {
        scan: ScanConfig {
            include: vec![scan_root.to_string_lossy().into_owned()],
            exclude: vec![],
        },
        organize: OrganizeConfig {
            target_root: Some(target_root.to_string_lossy().into_owned()),
            dry_run: true,
            copy_then_delete: false,
        },
    }
}

#[test]
fn analyze_groups_by_folder_and_flags_review() {
    let temp = tempdir().unwrap();
    let music = temp.path().join("music");
    let collab = music.join("Track_Remix_feat_Artist_Final");
    fs::create_dir_all(&collab).unwrap();
    fs::write(collab.join("song.als"), b"").unwrap();
    let jam = music.join("random_jam");
    fs::create_dir_all(&jam).unwrap();
    for n in ["a.wav", "b.wav", "c.wav"] {
        fs::write(jam.join(n), b"").unwrap();
    }

    let organizer = Organizer::new(&config(&music, &temp.path().join("organized")));
    let report = organizer.analyze_all_projects().unwrap();

    assert_eq!(report.total(), 2);
    assert_eq!(
        report.grouped[&Folder::CompletedCollabs][0].record.name,
        "Track_Remix_feat_Artist_Final"
    );
    assert_eq!(report.grouped[&Folder::Experiments][0].record.name, "random_jam");
    assert_eq!(report.needs_review.len(), 1);
    assert_eq!(report.needs_review[0].analysis.confidence, 10);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["grouped"]["Archive/Experiments"].is_array());
}

#[test]
fn already_organized_projects_are_not_rescanned() {
    let temp = tempdir().unwrap();
    let music = temp.path().join("music");
    let organized = music.join("organized");
    let filed = Folder::InProgress.resolve(&organized).join("Filed");
    fs::create_dir_all(&filed).unwrap();
    fs::write(filed.join("filed.als"), b"").unwrap();

    let report = Organizer::new(&config(&music, &organized))
        .analyze_all_projects()
        .unwrap();
    assert_eq!(report.total(), 0);
}

#[test]
fn execute_moves_suggested_projects() {
    let temp = tempdir().unwrap();
    let music = temp.path().join("music");
    let song = music.join("night_mixed");
    fs::create_dir_all(&song).unwrap();
    fs::write(song.join("night.als"), b"").unwrap();
    let root = temp.path().join("organized");

    let organizer = Organizer::new(&config(&music, &root)).with_dry_run(false);
    let report = organizer.analyze_all_projects().unwrap();
    let selections: Vec<Selection> = report.projects().map(Selection::suggested).collect();
    assert_eq!(selections[0].target_folder, "Active_Projects/Ready_for_Master");

    let batch = organizer.organize_selected_projects(&selections);
    assert_eq!(batch.succeeded(), 1);
    assert!(batch.log_path.is_some());
    assert!(Folder::ReadyForMaster.resolve(&root).join("night_mixed").join("night.als").exists());
    assert!(!song.exists());
}
