//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use std::collections::HashSet;

use kara_core::index::{IndexEntry, Library};

use crate::widgets::status_bar::InputMode;

/// What the header status line currently says.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusLine {
    #[default]
    Idle,
    /// Shown for the frame drawn just before the blocking player call.
    Playing(String),
    LastPlayed(String),
    PlayError {
        name: String,
        detail: String,
    },
    NotUnique(String),
    NoMatch(String),
}

/// The full shared state of the application.
pub struct AppState {
    /// Immutable category indexes, built once at startup.
    pub library: Library,

    // ── Picker contents ─────────────────────────────────────────────────────
    /// The entries currently shown in the picker.
    pub results: Vec<IndexEntry>,
    /// Play-log filter label for the current result set (category name,
    /// `searched_for:…`).
    pub results_label: String,
    /// Width of the group-label column for the current results (0 = no column).
    pub group_width: usize,

    // ── Session ─────────────────────────────────────────────────────────────
    pub status: StatusLine,
    /// Whether the unique-play rule is active.
    pub unique: bool,
    /// Base names already attempted this session; drives the ✓ mark in the
    /// picker. Mirrors the dispatcher's history.
    pub played: HashSet<String>,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub input_mode: InputMode,
}

impl AppState {
    pub fn already_played(&self, display: &str) -> bool {
        self.played.contains(display)
    }
}
