//! Append-only play log.
//!
//! One quoted-comma-separated line per play attempt plus one session
//! marker per process launch. The file is opened, appended, and closed
//! per event; nothing ever reads it back.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::KaraError;

pub struct PlayLog {
    path: PathBuf,
    root: PathBuf,
}

impl PlayLog {
    /// `root` is the library root; logged paths are recorded relative to it.
    pub fn new(path: PathBuf, root: PathBuf) -> Self {
        Self { path, root }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the session-boundary marker. Called once at startup.
    pub fn open_session(&self) -> Result<(), KaraError> {
        self.write_line(&format!("\"{}\",\"session\",\"started\"\n", timestamp()))
    }

    /// Append one play record: timestamp, filter label, path relative to
    /// the library root, and an optional error annotation.
    pub fn append(
        &self,
        filter: &str,
        file_path: &Path,
        error: Option<&str>,
    ) -> Result<(), KaraError> {
        let rel = file_path.strip_prefix(&self.root).unwrap_or(file_path);
        let mut line = format!(
            "\"{}\",\"{}\",\"{}\"",
            timestamp(),
            filter,
            rel.display()
        );
        if let Some(err) = error {
            line.push_str(&format!(",\"{err}\""));
        }
        line.push('\n');
        self.write_line(&line)
    }

    fn write_line(&self, line: &str) -> Result<(), KaraError> {
        let io = |source| KaraError::PlayLog {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io)?;
        file.write_all(line.as_bytes()).map_err(io)
    }
}

/// Compact ISO-like local timestamp, e.g. `20260826T213045`.
fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%dT%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn session_marker_then_records() {
        let tmp = TempDir::new().unwrap();
        let log_path = tmp.path().join("playlist.txt");
        let log = PlayLog::new(log_path.clone(), tmp.path().to_path_buf());

        log.open_session().unwrap();
        log.append(
            "by-genre",
            &tmp.path().join("by-genre/rock/T - Artist.mp4"),
            None,
        )
        .unwrap();

        let lines = read_lines(&log_path);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("\"session\",\"started\""));
        assert!(lines[1].ends_with("\"by-genre\",\"by-genre/rock/T - Artist.mp4\""));
    }

    #[test]
    fn error_annotation_is_appended_as_fourth_field() {
        let tmp = TempDir::new().unwrap();
        let log_path = tmp.path().join("playlist.txt");
        let log = PlayLog::new(log_path.clone(), tmp.path().to_path_buf());

        log.append(
            "random",
            &tmp.path().join("by-title/T/T - Artist.mp4"),
            Some("ERROR:NOT UNIQUE"),
        )
        .unwrap();

        let line = read_lines(&log_path).pop().unwrap();
        assert_eq!(line.matches("\",\"").count(), 3);
        assert!(line.ends_with(",\"ERROR:NOT UNIQUE\""));
    }

    #[test]
    fn paths_outside_root_are_logged_verbatim() {
        let tmp = TempDir::new().unwrap();
        let log_path = tmp.path().join("playlist.txt");
        let log = PlayLog::new(log_path.clone(), tmp.path().join("videos"));

        log.append("by-title", Path::new("/elsewhere/song.mp4"), None)
            .unwrap();
        let line = read_lines(&log_path).pop().unwrap();
        assert!(line.contains("\"/elsewhere/song.mp4\""));
    }

    #[test]
    fn timestamp_is_compact_iso_like() {
        let ts = timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(&ts[8..9], "T");
        assert!(ts[..8].chars().all(|c| c.is_ascii_digit()));
    }
}
