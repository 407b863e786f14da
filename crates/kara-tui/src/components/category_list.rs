//! CategoryList component — left pane with the six browse categories plus
//! a random-pick row.

use kara_core::index::Category;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Borders, List, ListItem, ListState},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::{pane_chrome::pane_chrome_borders, scrollable_list::ScrollableList},
};

/// One row in the category pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Category(Category),
    Random,
}

impl Row {
    const ALL: [Row; 7] = [
        Row::Category(Category::ArtistFirst),
        Row::Category(Category::ArtistLast),
        Row::Category(Category::Decade),
        Row::Category(Category::Genre),
        Row::Category(Category::Mood),
        Row::Category(Category::Title),
        Row::Random,
    ];

    fn label(self) -> &'static str {
        match self {
            Row::Category(Category::ArtistFirst) => "artist (first name)",
            Row::Category(Category::ArtistLast) => "artist (last name)",
            Row::Category(Category::Decade) => "decade",
            Row::Category(Category::Genre) => "genre",
            Row::Category(Category::Mood) => "mood",
            Row::Category(Category::Title) => "title",
            Row::Random => "random pick",
        }
    }

    fn activate(self) -> Action {
        match self {
            Row::Category(cat) => Action::Browse(cat),
            Row::Random => Action::Random,
        }
    }
}

pub struct CategoryList {
    list: ScrollableList<Row>,
    list_state: ListState,
    pub borders: Borders,
}

impl CategoryList {
    pub fn new() -> Self {
        let mut list = ScrollableList::new();
        list.set_items(Row::ALL.to_vec());
        Self {
            list,
            list_state: ListState::default(),
            borders: Borders::ALL,
        }
    }
}

impl Component for CategoryList {
    fn id(&self) -> ComponentId {
        ComponentId::CategoryList
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(1),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter => {
                if let Some(row) = self.list.selected_item() {
                    return vec![row.activate()];
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
                // Click selects; a second click on the same row activates.
                let was = self.list.selected;
                if self.list.handle_click(rel_row) && was == self.list.selected {
                    if let Some(row) = self.list.selected_item() {
                        return vec![row.activate()];
                    }
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome_borders("categories", Some('1'), focused, None, self.borders);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let content_h = inner.height as usize;
        self.list.ensure_visible(content_h);
        let sel_in_view = self.list.selected_in_view(content_h);

        let items: Vec<ListItem> = self
            .list
            .visible_items(content_h)
            .iter()
            .enumerate()
            .map(|(view_row, (_, row))| {
                let is_selected = view_row == sel_in_view;
                let name_style = if is_selected {
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(C_SECONDARY)
                };
                let count = match row {
                    Row::Category(cat) => {
                        format!("{:>5}", state.library.category(*cat).entries.len())
                    }
                    Row::Random => format!("{:>5}", "?"),
                };

                let line = Line::from(vec![
                    Span::raw(" "),
                    Span::styled(format!("{:<22}", row.label()), name_style),
                    Span::styled(count, Style::default().fg(C_MUTED)),
                ]);
                let item_bg = if is_selected {
                    Style::default().bg(C_SELECTION_BG)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(item_bg)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state.select(Some(sel_in_view));
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }
}
