//! Play dispatcher — external player invocation, unique-play rule, and
//! log bookkeeping.
//!
//! Playback is synchronous on purpose: the configured player is spawned
//! and the call blocks until it exits, so exactly one video plays at a
//! time. Every attempt appends exactly one play-log line, whether the
//! player ran, failed, or the unique-play rule blocked it.

use std::collections::HashSet;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::config::PlayerConfig;
use crate::index::IndexEntry;
use crate::playlog::PlayLog;

/// The external player executable and its fixed arguments. The file path
/// is appended as the final argument.
#[derive(Debug, Clone)]
pub struct PlayerCommand {
    pub command: String,
    pub args: Vec<String>,
}

impl From<&PlayerConfig> for PlayerCommand {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
        }
    }
}

impl PlayerCommand {
    fn run(&self, path: &Path) -> std::io::Result<std::process::ExitStatus> {
        Command::new(&self.command)
            .args(&self.args)
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
    }
}

/// Result of one play attempt, carrying the display name for the status
/// label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Played { display: String },
    Failed { display: String, reason: String },
    NotUnique { display: String },
}

/// Owns the session history and the play log; the only way to start
/// playback.
pub struct Dispatcher {
    player: PlayerCommand,
    log: PlayLog,
    unique: bool,
    history: HashSet<String>,
}

impl Dispatcher {
    pub fn new(player: PlayerCommand, log: PlayLog, unique: bool) -> Self {
        Self {
            player,
            log,
            unique,
            history: HashSet::new(),
        }
    }

    pub fn unique(&self) -> bool {
        self.unique
    }

    /// Whether this base name was already played this session.
    /// Entries with the same base name in different directories are
    /// deliberately conflated.
    pub fn already_played(&self, display: &str) -> bool {
        self.history.contains(display)
    }

    /// Play one entry, blocking until the player exits. `filter` is the
    /// label recorded in the play log (category name, `random`, or
    /// `searched_for:…`).
    pub fn play(&mut self, entry: &IndexEntry, filter: &str) -> PlayOutcome {
        let display = entry.display_name();
        let path = entry.path();

        if self.unique && self.history.contains(&display) {
            let blocked = display.as_str();
            info!("duplicate play blocked: {blocked}");
            self.log_line(filter, &path, Some("ERROR:NOT UNIQUE"));
            return PlayOutcome::NotUnique { display };
        }

        info!("playing {} (filter={filter})", path.display());
        let (outcome, annotation) = match self.player.run(&path) {
            Ok(status) if status.success() => (
                PlayOutcome::Played {
                    display: display.clone(),
                },
                None,
            ),
            Ok(status) => {
                let reason = status.to_string();
                (
                    PlayOutcome::Failed {
                        display: display.clone(),
                        reason: reason.clone(),
                    },
                    Some(format!("ERROR:{reason}")),
                )
            }
            Err(err) => {
                let reason = err.to_string();
                (
                    PlayOutcome::Failed {
                        display: display.clone(),
                        reason: reason.clone(),
                    },
                    Some(format!("ERROR:{reason}")),
                )
            }
        };

        self.log_line(filter, &path, annotation.as_deref());
        // History is updated after the attempt, success or not.
        self.history.insert(display);
        outcome
    }

    fn log_line(&self, filter: &str, path: &Path, error: Option<&str>) {
        if let Err(err) = self.log.append(filter, path, error) {
            warn!("play log append failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn entry_in(dir: &Path, name: &str) -> IndexEntry {
        IndexEntry {
            dir: dir.to_path_buf(),
            file_name: name.to_string(),
            group: None,
        }
    }

    fn sh(script: &str) -> PlayerCommand {
        // The file path lands in $0; the script ignores it.
        PlayerCommand {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    fn dispatcher(tmp: &TempDir, player: PlayerCommand, unique: bool) -> Dispatcher {
        let log = PlayLog::new(tmp.path().join("playlist.txt"), tmp.path().to_path_buf());
        Dispatcher::new(player, log, unique)
    }

    fn log_lines(tmp: &TempDir) -> Vec<String> {
        std::fs::read_to_string(tmp.path().join("playlist.txt"))
            .unwrap_or_default()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn successful_play_logs_clean_line() {
        let tmp = TempDir::new().unwrap();
        let mut d = dispatcher(&tmp, sh("exit 0"), false);
        let entry = entry_in(&tmp.path().join("by-title"), "T - Artist.mp4");

        let outcome = d.play(&entry, "by-title");
        assert_eq!(
            outcome,
            PlayOutcome::Played {
                display: "T - Artist".to_string()
            }
        );
        let lines = log_lines(&tmp);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("\"by-title\",\"by-title/T - Artist.mp4\""));
        assert!(!lines[0].contains("ERROR"));
    }

    #[test]
    fn nonzero_exit_is_failure_with_annotation() {
        let tmp = TempDir::new().unwrap();
        let mut d = dispatcher(&tmp, sh("exit 1"), false);
        let entry = entry_in(&tmp.path().join("by-title"), "T - Artist.mp4");

        match d.play(&entry, "by-title") {
            PlayOutcome::Failed { display, .. } => assert_eq!(display, "T - Artist"),
            other => panic!("expected Failed, got {other:?}"),
        }
        let line = log_lines(&tmp).pop().unwrap();
        assert!(line.contains("\"ERROR:"));
    }

    #[test]
    fn spawn_failure_is_failure_with_annotation() {
        let tmp = TempDir::new().unwrap();
        let player = PlayerCommand {
            command: tmp
                .path()
                .join("no-such-player")
                .to_string_lossy()
                .into_owned(),
            args: vec![],
        };
        let mut d = dispatcher(&tmp, player, false);
        let entry = entry_in(&tmp.path().join("by-title"), "T - Artist.mp4");

        assert!(matches!(
            d.play(&entry, "by-title"),
            PlayOutcome::Failed { .. }
        ));
        assert!(log_lines(&tmp).pop().unwrap().contains("\"ERROR:"));
    }

    #[test]
    fn unique_mode_blocks_second_play_without_invoking_player() {
        let tmp = TempDir::new().unwrap();
        let marker = tmp.path().join("invocations");
        let mut d = dispatcher(
            &tmp,
            sh(&format!("echo run >> '{}'; exit 0", marker.display())),
            true,
        );
        let entry = entry_in(&tmp.path().join("by-title"), "T - Artist.mp4");

        assert!(matches!(d.play(&entry, "by-title"), PlayOutcome::Played { .. }));
        assert_eq!(
            d.play(&entry, "by-title"),
            PlayOutcome::NotUnique {
                display: "T - Artist".to_string()
            }
        );

        // Player ran exactly once.
        let runs = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(runs.lines().count(), 1);

        // Both attempts logged; second one annotated.
        let lines = log_lines(&tmp);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(",\"ERROR:NOT UNIQUE\""));
    }

    #[test]
    fn same_base_name_in_different_dirs_is_conflated() {
        let tmp = TempDir::new().unwrap();
        let mut d = dispatcher(&tmp, sh("exit 0"), true);
        let a = entry_in(&tmp.path().join("by-title/T"), "T - Artist.mp4");
        let b = entry_in(&tmp.path().join("by-genre/rock"), "T - Artist.mp4");

        assert!(matches!(d.play(&a, "by-title"), PlayOutcome::Played { .. }));
        assert!(matches!(
            d.play(&b, "by-genre"),
            PlayOutcome::NotUnique { .. }
        ));
    }

    #[test]
    fn history_updated_even_after_failure() {
        let tmp = TempDir::new().unwrap();
        let mut d = dispatcher(&tmp, sh("exit 1"), true);
        let entry = entry_in(&tmp.path().join("by-title"), "T - Artist.mp4");

        assert!(matches!(d.play(&entry, "by-title"), PlayOutcome::Failed { .. }));
        assert!(d.already_played("T - Artist"));
        assert!(matches!(
            d.play(&entry, "by-title"),
            PlayOutcome::NotUnique { .. }
        ));
    }

    #[test]
    fn non_unique_mode_allows_repeats() {
        let tmp = TempDir::new().unwrap();
        let mut d = dispatcher(&tmp, sh("exit 0"), false);
        let entry = entry_in(&tmp.path().join("by-title"), "T - Artist.mp4");

        assert!(matches!(d.play(&entry, "by-title"), PlayOutcome::Played { .. }));
        assert!(matches!(d.play(&entry, "by-title"), PlayOutcome::Played { .. }));
        assert_eq!(log_lines(&tmp).len(), 2);
    }

    #[test]
    fn player_receives_the_file_path() {
        let tmp = TempDir::new().unwrap();
        let argfile = tmp.path().join("argv0");
        let mut d = dispatcher(
            &tmp,
            sh(&format!("echo \"$0\" > '{}'; exit 0", argfile.display())),
            false,
        );
        let dir = tmp.path().join("by-title");
        let entry = entry_in(&dir, "T - Artist.mp4");
        d.play(&entry, "by-title");

        let seen = std::fs::read_to_string(&argfile).unwrap();
        assert_eq!(
            PathBuf::from(seen.trim()),
            dir.join("T - Artist.mp4")
        );
    }
}
