//! Action enum — all user-initiated intents and internal events.

use kara_core::index::Category;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    CategoryList,
    Picker,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Picking ──────────────────────────────────────────────────────────────
    /// Load a whole category index into the picker.
    Browse(Category),
    /// Run a title search and load the matches into the picker.
    Search(String),
    /// Play a random title from the full index.
    Random,
    /// Play the picker entry at this index into the current result set.
    Play(usize),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Search input ─────────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}
