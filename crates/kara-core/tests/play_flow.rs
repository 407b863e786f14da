//! End-to-end flow over a real on-disk library tree: index, search,
//! dispatch, and the resulting play-log contents.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use kara_core::index::{Category, Library};
use kara_core::player::{Dispatcher, PlayOutcome, PlayerCommand};
use kara_core::playlog::PlayLog;
use kara_core::search::{search_label, search_titles};

fn make_library(root: &Path) {
    for category in Category::ALL {
        fs::create_dir_all(root.join(category.dir_name())).unwrap();
    }
    let title_dir = root.join("by-title").join("T");
    fs::create_dir_all(&title_dir).unwrap();
    fs::write(title_dir.join("T - Artist.mp4"), b"").unwrap();
}

fn fake_player(exit_code: i32) -> PlayerCommand {
    PlayerCommand {
        command: "sh".to_string(),
        args: vec!["-c".to_string(), format!("exit {exit_code}")],
    }
}

#[test]
fn search_then_play_logs_one_line_per_attempt() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("videos");
    make_library(&root);

    let library = Library::build(&root).unwrap();

    // "art" finds exactly the one title.
    let hits = search_titles(library.titles(), "art").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].file_name, "T - Artist.mp4");

    // "zzz" finds nothing.
    assert!(search_titles(library.titles(), "zzz").unwrap().is_empty());

    let log_path = tmp.path().join("playlist.txt");
    let log = PlayLog::new(log_path.clone(), root.clone());
    log.open_session().unwrap();

    let mut dispatcher = Dispatcher::new(fake_player(0), log, false);
    let outcome = dispatcher.play(&hits[0], &search_label("art"));
    assert_eq!(
        outcome,
        PlayOutcome::Played {
            display: "T - Artist".to_string()
        }
    );

    let content = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"session\",\"started\""));
    assert!(lines[1].contains("\"searched_for:art\""));
    assert!(lines[1].contains("\"by-title/T/T - Artist.mp4\""));
    assert!(!lines[1].contains("ERROR"));
}

#[test]
fn failed_play_is_logged_with_annotation_and_status() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("videos");
    make_library(&root);

    let library = Library::build(&root).unwrap();
    let entry = library.titles().entries[0].clone();

    let log_path = tmp.path().join("playlist.txt");
    let log = PlayLog::new(log_path.clone(), root.clone());
    let mut dispatcher = Dispatcher::new(fake_player(1), log, false);

    match dispatcher.play(&entry, "by-title") {
        PlayOutcome::Failed { display, reason } => {
            assert_eq!(display, "T - Artist");
            assert!(!reason.is_empty());
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    let content = fs::read_to_string(&log_path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("\"ERROR:"));
}

#[test]
fn random_pick_plays_an_indexed_title() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("videos");
    make_library(&root);

    let library = Library::build(&root).unwrap();
    let picked = library.random_title().unwrap().clone();
    assert!(library.titles().entries.contains(&picked));

    let log = PlayLog::new(tmp.path().join("playlist.txt"), root.clone());
    let mut dispatcher = Dispatcher::new(fake_player(0), log, false);
    assert!(matches!(
        dispatcher.play(&picked, "random"),
        PlayOutcome::Played { .. }
    ));
}
