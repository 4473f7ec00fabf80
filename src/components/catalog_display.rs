use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{CatalogGrid, CatalogGridProps, Component};
use crate::action::Action;
use crate::state::AppState;
use crate::theme::{ACCENT, ACCENT_GOLD, TEXT_DIM, TEXT_MAIN};

/// Props for CatalogDisplay - read-only view of state
pub struct CatalogDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main screen: header, card grid, key hints.
pub struct CatalogDisplay {
    grid: CatalogGrid,
    status_bar: StatusBar,
}

impl Default for CatalogDisplay {
    fn default() -> Self {
        Self {
            grid: CatalogGrid,
            status_bar: StatusBar::new(),
        }
    }
}

impl CatalogDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for CatalogDisplay {
    type Props<'a> = CatalogDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let state = props.state;

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::CursorMove(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::CursorMove(1)),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorRow(-1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorRow(1)),
                KeyCode::Home | KeyCode::Char('g') => Some(Action::CursorJumpTop),
                KeyCode::End | KeyCode::Char('G') => Some(Action::CursorJumpBottom),
                KeyCode::Enter => state
                    .cursor_item()
                    .map(|item| Action::Select(Some(item.id))),
                KeyCode::Char('f') => state
                    .cursor_item()
                    .map(|item| Action::FavoriteToggle(item.id)),
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Char('r') => Some(Action::CatalogFetch),
                KeyCode::Esc if !state.search.query.is_empty() => Some(Action::SearchClose),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: CatalogDisplayProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Grid
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        render_header(frame, chunks[0], props.state);

        self.grid
            .render(frame, chunks[1], CatalogGridProps { state: props.state });

        let retry_hint = matches!(props.state.catalog, DataResource::Failed(_));
        let mut hints = vec![
            StatusBarHint::new("enter", "details"),
            StatusBarHint::new("f", "favorite"),
            StatusBarHint::new("/", "search"),
        ];
        if retry_hint {
            hints.push(StatusBarHint::new("r", "retry"));
        }
        hints.push(StatusBarHint::new("q", "quit"));

        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let shown = state.filtered_indices.len();
    let total = state.items().len();
    let favorites = state.favorites.len();

    let mut spans = vec![
        Span::styled(
            "POKEGRID",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {shown}/{total} shown"),
            Style::default().fg(TEXT_DIM),
        ),
    ];
    if favorites > 0 {
        spans.push(Span::styled(
            format!("  ★ {favorites}"),
            Style::default().fg(ACCENT_GOLD),
        ));
    }
    if !state.search.query.is_empty() {
        spans.push(Span::styled(
            format!("  filter: {}", state.search.query),
            Style::default().fg(TEXT_MAIN),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
