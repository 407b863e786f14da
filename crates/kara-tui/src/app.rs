//! App — component-based event loop around a deliberately blocking play path.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries terminal events in from a reader task.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - A play request is staged in `pending_play`, the "Currently playing"
//!   frame is drawn, and only then is the external player invoked — the call
//!   blocks the whole loop until the player exits, so exactly one video plays
//!   at a time and the UI is intentionally frozen meanwhile.

use std::collections::HashSet;
use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Borders,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use kara_core::index::{Category, IndexEntry, Library};
use kara_core::player::{Dispatcher, PlayOutcome};
use kara_core::search::{search_label, search_titles};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, StatusLine},
    component::Component,
    components::{
        category_list::CategoryList, header::Header, help_overlay::HelpOverlay, picker::Picker,
    },
    focus::FocusRing,
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
}

// ── Pane area tracking ────────────────────────────────────────────────────────

/// Stores the last-drawn layout rects for each focusable pane.
/// Used by `handle_mouse` to do hit-testing without recomputing the layout.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    categories: Rect,
    picker: Rect,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    /// Shared state (passed read-only to components).
    pub state: AppState,

    /// Owns the play log and the session history; the only play entry point.
    dispatcher: Dispatcher,

    // ── Components ────────────────────────────────────────────────────────────
    header: Header,
    category_list: CategoryList,
    picker: Picker,
    help_overlay: HelpOverlay,

    focus: FocusRing,
    show_keys_bar: bool,

    /// Staged play request: drawn first, executed after. `(entry, filter label)`.
    pending_play: Option<(IndexEntry, String)>,

    should_quit: bool,
    pane_areas: PaneAreas,
    toast: ToastManager,
}

impl App {
    pub fn new(
        library: Library,
        dispatcher: Dispatcher,
        initial_search: Option<String>,
    ) -> Self {
        let unique = dispatcher.unique();
        let state = AppState {
            library,
            results: Vec::new(),
            results_label: String::new(),
            group_width: 0,
            status: StatusLine::Idle,
            unique,
            played: HashSet::new(),
            input_mode: InputMode::Normal,
        };

        let mut app = Self {
            state,
            dispatcher,
            header: Header::new(),
            category_list: CategoryList::new(),
            picker: Picker::new(),
            help_overlay: HelpOverlay::new(),
            focus: FocusRing::new(vec![ComponentId::CategoryList, ComponentId::Picker]),
            show_keys_bar: true,
            pending_play: None,
            should_quit: false,
            pane_areas: PaneAreas::default(),
            toast: ToastManager::new(),
        };

        // A search term given on the command line is run before the first
        // frame, with the picker focused and the term left editable.
        if let Some(term) = initial_search {
            app.picker.search_input.set_text(&term);
            app.dispatch(Action::Search(term));
        }

        app
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // Toast expiry check.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            // A staged play runs now, after its "Currently playing" frame was
            // drawn above. This call does not return until the player exits.
            if let Some((entry, filter)) = self.pending_play.take() {
                let outcome =
                    tokio::task::block_in_place(|| self.dispatcher.play(&entry, &filter));
                self.finish_play(outcome);
                // Drop input typed at the frozen UI.
                while rx.try_recv().is_ok() {}
                needs_redraw = true;
                continue;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    match msg {
                        AppMessage::Event(ev) => match ev {
                            Event::Key(key) => {
                                if key.kind != KeyEventKind::Release {
                                    let actions = self.handle_key(key);
                                    for a in actions {
                                        self.dispatch(a);
                                    }
                                }
                            }
                            Event::Mouse(mouse) => {
                                let actions = self.handle_mouse(mouse);
                                for a in actions {
                                    self.dispatch(a);
                                }
                            }
                            Event::Resize(w, h) => {
                                self.dispatch(Action::Resize(w, h));
                            }
                            _ => {}
                        },
                    }
                    needs_redraw = true;
                }

                _ = ui_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        // Global keys — always active regardless of focus/mode
        match key.code {
            KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE => {
                if self.state.input_mode == InputMode::Normal {
                    return vec![Action::Quit];
                }
            }
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return vec![Action::Quit];
            }
            KeyCode::Char('?') if self.state.input_mode == InputMode::Normal => {
                return vec![Action::ToggleHelp];
            }
            _ => {}
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            // Any other key closes the overlay
            return vec![Action::ToggleHelp];
        }

        // Tab / Shift-Tab always cycle focus (closing the search bar first)
        match key.code {
            KeyCode::Tab => {
                if self.state.input_mode == InputMode::Search {
                    return vec![Action::CloseSearch, Action::FocusNext];
                }
                return vec![Action::FocusNext];
            }
            KeyCode::BackTab => {
                if self.state.input_mode == InputMode::Search {
                    return vec![Action::CloseSearch, Action::FocusPrev];
                }
                return vec![Action::FocusPrev];
            }
            _ => {}
        }

        // Global picking keys (Normal mode only)
        if self.state.input_mode == InputMode::Normal {
            match key.code {
                KeyCode::Char('r') => return vec![Action::Random],
                KeyCode::Char('/') => {
                    self.focus.set(ComponentId::Picker);
                    self.picker.search_input.activate();
                    return vec![Action::OpenSearch];
                }
                KeyCode::Char('1') => {
                    self.focus.set_by_position(0);
                    return vec![];
                }
                KeyCode::Char('2') => {
                    self.focus.set_by_position(1);
                    return vec![];
                }
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                _ => {}
            }
        }

        // Dispatch to the focused component
        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::CategoryList) => self.category_list.handle_key(key, s),
            Some(ComponentId::Picker) => self.picker.handle_key(key, s),
            _ => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click || self.help_overlay.visible {
            return vec![];
        }

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas;
        let (col, row) = (event.column, event.row);
        let s = &self.state;

        // Focus follows the click.
        if hit(areas.categories, col, row) {
            let mut actions = self.category_list.handle_mouse(event, areas.categories, s);
            if !self.focus.is_focused(ComponentId::CategoryList) {
                actions.insert(0, Action::FocusPane(ComponentId::CategoryList));
            }
            return actions;
        }
        if hit(areas.picker, col, row) {
            let mut actions = self.picker.handle_mouse(event, areas.picker, s);
            if !self.focus.is_focused(ComponentId::Picker) {
                actions.insert(0, Action::FocusPane(ComponentId::Picker));
            }
            return actions;
        }

        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // App-level state changes first, so components see the updated state
        // when the action is broadcast below.
        match &action {
            Action::Browse(category) => self.apply_browse(*category),
            Action::Search(term) => self.apply_search(term.clone()),
            Action::Random => self.request_random(),
            Action::Play(index) => self.request_play(*index),

            Action::OpenSearch => self.state.input_mode = InputMode::Search,
            Action::CloseSearch => self.state.input_mode = InputMode::Normal,

            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => self.focus.set(*id),

            Action::CopyToClipboard(text) => self.copy_to_clipboard(text),
            Action::ToggleKeys => self.show_keys_bar = !self.show_keys_bar,
            Action::ToggleHelp => self.help_overlay.toggle(),
            Action::Quit => self.should_quit = true,
            Action::Resize(..) => {}
        }

        // Broadcast to all components; collect secondary actions.
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.category_list.on_action(&action, s));
            out.extend(self.picker.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };
        for a in secondary {
            self.dispatch(a);
        }
    }

    fn apply_browse(&mut self, category: Category) {
        let index = self.state.library.category(category);
        self.state.results = index.entries.clone();
        self.state.group_width = index.group_width;
        self.state.results_label = category.dir_name().to_string();
        self.state.input_mode = InputMode::Normal;
        self.focus.set(ComponentId::Picker);
        info!(
            "browse {}: {} entries",
            category.dir_name(),
            self.state.results.len()
        );
    }

    fn apply_search(&mut self, term: String) {
        match search_titles(self.state.library.titles(), &term) {
            Ok(hits) => {
                info!("search \"{term}\": {} matches", hits.len());
                if hits.is_empty() {
                    self.state.status = StatusLine::NoMatch(term.clone());
                }
                self.state.results = hits;
                self.state.group_width = 0;
                self.state.results_label = search_label(&term);
                self.focus.set(ComponentId::Picker);
            }
            Err(err) => {
                warn!("search \"{term}\" failed: {err}");
                self.toast.error(format!("bad search pattern: {term}"));
            }
        }
        self.state.input_mode = InputMode::Normal;
    }

    fn request_random(&mut self) {
        match self.state.library.random_title().cloned() {
            Some(entry) => self.stage_play(entry, "random".to_string()),
            None => self.toast.warning("library has no titles"),
        }
    }

    fn request_play(&mut self, index: usize) {
        if let Some(entry) = self.state.results.get(index).cloned() {
            let label = self.state.results_label.clone();
            self.stage_play(entry, label);
        }
    }

    /// Stage the play so the next frame shows "Currently playing" before the
    /// loop makes the blocking player call.
    fn stage_play(&mut self, entry: IndexEntry, filter: String) {
        self.state.status = StatusLine::Playing(entry.display_name());
        self.pending_play = Some((entry, filter));
    }

    fn finish_play(&mut self, outcome: PlayOutcome) {
        match outcome {
            PlayOutcome::Played { display } => {
                self.state.played.insert(display.clone());
                self.state.status = StatusLine::LastPlayed(display);
            }
            PlayOutcome::Failed { display, reason } => {
                self.state.played.insert(display.clone());
                self.toast.error(format!("player failed: {reason}"));
                self.state.status = StatusLine::PlayError {
                    name: display,
                    detail: reason,
                };
            }
            PlayOutcome::NotUnique { display } => {
                self.state.status = StatusLine::NotUnique(display);
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string())) {
            Ok(()) => self.toast.success("path copied"),
            Err(err) => {
                warn!("clipboard error: {err}");
                self.toast.warning("clipboard unavailable");
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        // Fill the entire terminal with the base background colour so that
        // any unstyled cells appear black rather than the terminal default.
        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        let header_h = 2u16;
        let status_h = if self.show_keys_bar { 1u16 } else { 0 };

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_h),
                Constraint::Min(0),
                Constraint::Length(status_h),
            ])
            .split(area);

        self.header.draw(frame, outer[0], false, &self.state);

        if self.show_keys_bar {
            status_bar::draw_keys_bar(frame, outer[2], self.state.input_mode);
        }

        // ── Body: categories | picker ────────────────────────────────────────
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(0)])
            .split(outer[1]);

        // Left pane omits its right border; the picker's left border is the
        // shared divider.
        self.category_list.borders = Borders::TOP | Borders::LEFT | Borders::BOTTOM;
        let cats_focused = self.focus.is_focused(ComponentId::CategoryList);
        self.category_list
            .draw(frame, cols[0], cats_focused, &self.state);
        self.pane_areas.categories = cols[0];

        self.picker.borders = Borders::ALL;
        let picker_focused = self.focus.is_focused(ComponentId::Picker);
        self.picker.draw(frame, cols[1], picker_focused, &self.state);
        self.pane_areas.picker = cols[1];

        // ── Help overlay (on top of everything) ──────────────────────────────
        if self.help_overlay.visible {
            self.help_overlay.draw(frame, area, false, &self.state);
        }

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}
