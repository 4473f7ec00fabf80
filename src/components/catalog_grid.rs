use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::state::{grid_columns, AppState, CatalogItem, CARD_HEIGHT, CARD_WIDTH};
use crate::theme::{
    format_name, type_icon, ACCENT, ACCENT_GOLD, ERROR_FG, TEXT_DIM, TEXT_MAIN,
};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Render-only card grid. Key handling lives in `CatalogDisplay`.
pub struct CatalogGrid;

pub struct CatalogGridProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for CatalogGrid {
    type Props<'a> = CatalogGridProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        match &state.catalog {
            DataResource::Loading => render_loading(frame, area, state.tick),
            DataResource::Failed(error) => render_error(frame, area, error),
            DataResource::Empty => {
                render_message(frame, area, "Press r to load the catalog", TEXT_DIM)
            }
            DataResource::Loaded(items) => {
                if state.filtered_indices.is_empty() {
                    if items.is_empty() {
                        render_message(frame, area, "The catalog came back empty.", TEXT_DIM);
                    } else {
                        let message =
                            format!("No matches for \"{}\"", state.search.query.trim());
                        render_message(frame, area, &message, TEXT_DIM);
                    }
                } else {
                    render_cards(frame, area, state);
                }
            }
        }
    }
}

fn render_loading(frame: &mut Frame, area: Rect, tick: u64) {
    let spinner = SPINNER[(tick as usize) % SPINNER.len()];
    let message = format!("{spinner} Loading catalog...");
    render_message(frame, area, &message, TEXT_DIM);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Catalog load failed",
            Style::default().fg(ERROR_FG).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(error.to_string(), Style::default().fg(ERROR_FG))).centered(),
        Line::default(),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(TEXT_DIM)),
            Span::styled("r", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(" to retry", Style::default().fg(TEXT_DIM)),
        ])
        .centered(),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        vertical_center(area, 4),
    );
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, fg: ratatui::style::Color) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(fg),
        )))
        .alignment(Alignment::Center),
        vertical_center(area, 1),
    );
}

fn vertical_center(area: Rect, height: u16) -> Rect {
    let top = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: height.min(area.height),
    }
}

fn render_cards(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = grid_columns(area.width);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let cursor_row = state.cursor / columns;
    let first_row = if cursor_row >= visible_rows {
        cursor_row + 1 - visible_rows
    } else {
        0
    };

    for (position, index) in state.filtered_indices.iter().enumerate() {
        let Some(item) = state.items().get(*index) else {
            continue;
        };
        let row = position / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let column = position % columns;
        let card = Rect {
            x: area.x + column as u16 * CARD_WIDTH,
            y: area.y + (row - first_row) as u16 * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width.saturating_sub(column as u16 * CARD_WIDTH)),
            height: CARD_HEIGHT.min(area.height.saturating_sub((row - first_row) as u16 * CARD_HEIGHT)),
        };
        if card.width < 4 || card.height < 3 {
            continue;
        }
        render_card(
            frame,
            card,
            item,
            position == state.cursor,
            state.is_favorite(item.id),
        );
    }
}

fn render_card(frame: &mut Frame, area: Rect, item: &CatalogItem, is_cursor: bool, is_favorite: bool) {
    let border_style = if is_cursor {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut title = vec![
        Span::styled(format!("#{:03} ", item.id), Style::default().fg(TEXT_DIM)),
        Span::styled(
            format_name(&item.name),
            Style::default().fg(TEXT_MAIN).add_modifier(if is_cursor {
                Modifier::BOLD
            } else {
                Modifier::empty()
            }),
        ),
    ];
    if is_favorite {
        title.push(Span::styled(" ★", Style::default().fg(ACCENT_GOLD)));
    }

    let badges = Line::from(
        item.types
            .iter()
            .flat_map(|tag| type_badge(tag))
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(vec![Line::from(title), badges]), inner);
}

fn type_badge(tag: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if let Some(icon) = type_icon(tag) {
        spans.push(Span::raw(format!("{icon} ")));
    }
    spans.push(Span::styled(
        format!("{tag} "),
        Style::default().fg(TEXT_DIM),
    ));
    spans
}
