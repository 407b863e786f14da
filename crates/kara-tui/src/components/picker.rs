//! Picker component — right pane listing the current result set, with the
//! title search bar at its bottom edge.

use kara_core::index::IndexEntry;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_GROUP, C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY, C_SELECTION_BG, C_TOAST_WARNING},
    widgets::{
        pane_chrome::{pane_chrome_borders, Badge},
        scrollable_list::ScrollableList,
        search_input::{SearchEvent, SearchInput},
    },
};

pub struct Picker {
    list: ScrollableList<IndexEntry>,
    pub search_input: SearchInput,
    list_state: ListState,
    pub borders: Borders,
}

impl Picker {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
            search_input: SearchInput::default(),
            list_state: ListState::default(),
            borders: Borders::ALL,
        }
    }

    /// Replace the list contents from the shared result set. Called by the
    /// App after a browse or search.
    pub fn sync_results(&mut self, state: &AppState) {
        self.list.set_items(state.results.clone());
    }

    pub fn selected_entry(&self) -> Option<&IndexEntry> {
        self.list.selected_item()
    }
}

impl Component for Picker {
    fn id(&self) -> ComponentId {
        ComponentId::Picker
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        if self.search_input.is_active() {
            match key.code {
                KeyCode::Up => {
                    self.list.select_up(1);
                    return vec![];
                }
                KeyCode::Down => {
                    self.list.select_down(1);
                    return vec![];
                }
                _ => {}
            }
            return match self.search_input.handle_key(key) {
                SearchEvent::Submitted(term) => vec![Action::Search(term)],
                SearchEvent::Cancelled => vec![Action::CloseSearch],
                SearchEvent::Edited => vec![],
            };
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),

            KeyCode::Enter => {
                if self.list.selected_item().is_some() {
                    return vec![Action::Play(self.list.selected)];
                }
            }

            KeyCode::Char('/') => {
                self.search_input.activate();
                return vec![Action::OpenSearch];
            }

            KeyCode::Char('y') => {
                if let Some(entry) = self.list.selected_item() {
                    let text = entry.path().to_string_lossy().into_owned();
                    return vec![Action::CopyToClipboard(text)];
                }
            }

            _ => {}
        }

        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        let rel_row = event.row.saturating_sub(area.y + 1) as usize;
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(ratatui::crossterm::event::MouseButton::Left) => {
                let was = self.list.selected;
                if self.list.handle_click(rel_row) && was == self.list.selected {
                    // Second click on the same row plays it.
                    return vec![Action::Play(self.list.selected)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        match action {
            Action::Browse(_) | Action::Search(_) => {
                self.sync_results(state);
            }
            Action::CloseSearch => {
                self.search_input.deactivate();
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = state.unique.then_some(Badge {
            text: "UNIQUE",
            color: C_TOAST_WARNING,
        });
        let title = if state.results_label.is_empty() {
            "titles".to_string()
        } else {
            format!("titles · {}", state.results_label)
        };
        let block = pane_chrome_borders(&title, Some('2'), focused, badge, self.borders);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.list.is_empty() {
            let hint = match &state.status {
                crate::app_state::StatusLine::NoMatch(term) => {
                    format!("  no titles match \"{term}\"")
                }
                _ => "  pick a category or press / to search".to_string(),
            };
            frame.render_widget(
                Paragraph::new(Span::styled(hint, Style::default().fg(C_MUTED))),
                inner,
            );
        }

        // Reserve the bottom row for the search bar when it is open.
        let list_h = if self.search_input.is_active() {
            inner.height.saturating_sub(1)
        } else {
            inner.height
        } as usize;

        self.list.ensure_visible(list_h);
        let sel_in_view = self.list.selected_in_view(list_h);

        let items: Vec<ListItem> = self
            .list
            .visible_items(list_h)
            .iter()
            .enumerate()
            .map(|(view_row, (_, entry))| {
                let is_selected = view_row == sel_in_view;
                let display = entry.display_name();
                let played = state.already_played(&display);

                let name_style = if is_selected {
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
                } else if played {
                    Style::default().fg(C_MUTED)
                } else {
                    Style::default().fg(C_SECONDARY)
                };

                let mut spans = vec![Span::raw(" ")];
                if state.group_width > 0 {
                    let label = entry.group.as_deref().unwrap_or("");
                    let pad = state.group_width.saturating_sub(label.width());
                    spans.push(Span::styled(
                        format!("{label}{} ", " ".repeat(pad)),
                        Style::default().fg(C_GROUP),
                    ));
                }
                spans.push(Span::styled(display, name_style));
                if played {
                    spans.push(Span::styled(" ✓", Style::default().fg(C_PLAYING)));
                }

                let item_bg = if is_selected {
                    Style::default().bg(C_SELECTION_BG)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(spans)).style(item_bg)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state.select(Some(sel_in_view));
        let list_area = Rect {
            height: list_h as u16,
            ..inner
        };
        frame.render_stateful_widget(list, list_area, &mut self.list_state);

        if self.search_input.is_active() {
            let search_area = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            };
            self.search_input.draw(frame, search_area);
        }
    }
}
