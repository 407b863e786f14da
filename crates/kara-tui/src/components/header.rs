//! Header component — 2-row top bar.
//!
//! Row 1: playback status (current, last played, errors).
//! Row 2: external-player hint and library summary.
//!
//! Not focusable; draws to a 2-row area.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, StatusLine},
    component::Component,
    theme::{C_ACCENT, C_ERROR, C_MUTED, C_PLAYING, C_SECONDARY, C_TOAST_WARNING},
};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Picker
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.height < 2 {
            frame.render_widget(Clear, area);
            frame.render_widget(Paragraph::new(build_status(state)), area);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        frame.render_widget(Clear, rows[0]);
        frame.render_widget(Paragraph::new(build_status(state)), rows[0]);
        frame.render_widget(Clear, rows[1]);
        frame.render_widget(Paragraph::new(build_hint(state)), rows[1]);
    }
}

fn build_status(state: &AppState) -> Line<'static> {
    let spans = match &state.status {
        StatusLine::Idle => vec![Span::styled(
            " pick something to sing".to_string(),
            Style::default().fg(C_MUTED),
        )],
        StatusLine::Playing(name) => vec![
            Span::styled(" Currently playing: ", Style::default().fg(C_SECONDARY)),
            Span::styled(
                name.clone(),
                Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD),
            ),
        ],
        StatusLine::LastPlayed(name) => vec![
            Span::styled(" Last played: ", Style::default().fg(C_SECONDARY)),
            Span::styled(name.clone(), Style::default().fg(C_PLAYING)),
        ],
        StatusLine::PlayError { name, detail } => vec![
            Span::styled(
                " ERROR PLAYING: ".to_string(),
                Style::default().fg(C_ERROR).add_modifier(Modifier::BOLD),
            ),
            Span::styled(name.clone(), Style::default().fg(C_ACCENT)),
            Span::styled(format!("  ({detail})"), Style::default().fg(C_MUTED)),
        ],
        StatusLine::NotUnique(name) => vec![
            Span::styled(" Already played: ", Style::default().fg(C_TOAST_WARNING)),
            Span::styled(name.clone(), Style::default().fg(C_SECONDARY)),
        ],
        StatusLine::NoMatch(term) => vec![
            Span::styled(" No titles match: ", Style::default().fg(C_SECONDARY)),
            Span::styled(term.clone(), Style::default().fg(C_ACCENT)),
        ],
    };
    Line::from(spans)
}

fn build_hint(state: &AppState) -> Line<'static> {
    let total = state.library.titles().entries.len();
    Line::from(vec![
        Span::styled(
            " When video plays, press F for Full Screen, and Q to quit".to_string(),
            Style::default().fg(C_MUTED),
        ),
        Span::styled(
            format!("   {} titles · {}", total, state.library.root().display()),
            Style::default().fg(C_MUTED),
        ),
    ])
}
