use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::Component;
use crate::action::Action;
use crate::state::CatalogItem;
use crate::theme::{
    format_name, stat_color, stat_label, type_icon, ACCENT_GOLD, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};

pub const MODAL_WIDTH: u16 = 48;
pub const MODAL_HEIGHT: u16 = 18;

/// Track length of a stat bar, in cells. One cell per 2.5 percent.
const BAR_TRACK: u16 = 40;

/// Bar fill as a percentage of the track, clamped at 100.
pub fn stat_fill_percent(base: u16) -> u16 {
    base.min(100)
}

/// Detail overlay for the selected item.
pub struct DetailPanel {
    modal: Modal,
}

pub struct DetailPanelProps<'a> {
    /// Resolved selection; `None` for a dangling id, which draws nothing.
    pub item: Option<&'a CatalogItem>,
    pub is_favorite: bool,
    pub is_focused: bool,
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self { modal: Modal::new() }
    }
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::Select(None)),
                KeyCode::Char('f') => props.item.map(|item| Action::FavoriteToggle(item.id)),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(item) = props.item else {
            // Dangling selection: nothing to show, closing still works.
            return;
        };
        if area.width < MODAL_WIDTH / 2 || area.height < 8 {
            return;
        }

        let modal_area = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        let is_favorite = props.is_favorite;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let lines = detail_lines(item, is_favorite, content_area.width);
            frame.render_widget(ratatui::widgets::Paragraph::new(lines), content_area);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(BG_PANEL),
                        padding: Padding::xy(2, 1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::Select(None),
                render_content: &mut render_content,
            },
        );
    }
}

fn detail_lines(item: &CatalogItem, is_favorite: bool, width: u16) -> Vec<Line<'static>> {
    let mut title = vec![
        Span::styled(format!("#{:03} ", item.id), Style::default().fg(TEXT_DIM)),
        Span::styled(
            format_name(&item.name),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ),
    ];
    if is_favorite {
        title.push(Span::styled(" ★", Style::default().fg(ACCENT_GOLD)));
    }

    let badges: Vec<Span<'static>> = item
        .types
        .iter()
        .flat_map(|tag| {
            let mut spans = Vec::new();
            if let Some(icon) = type_icon(tag) {
                spans.push(Span::raw(format!("{icon} ")));
            }
            spans.push(Span::styled(
                format!("{tag}  "),
                Style::default().fg(TEXT_DIM),
            ));
            spans
        })
        .collect();

    let mut lines = vec![
        Line::from(title),
        Line::from(badges),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "Height {:>5.1} m    Weight {:>6.1} kg",
                item.height_m, item.weight_kg
            ),
            Style::default().fg(TEXT_MAIN),
        )),
        Line::default(),
    ];

    let track = BAR_TRACK.min(width.saturating_sub(10)).max(4);
    for stat in &item.stats {
        lines.push(stat_line(&stat.name, stat.base, track));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "esc close   f favorite",
        Style::default().fg(TEXT_DIM),
    )));
    lines
}

fn stat_line(name: &str, base: u16, track: u16) -> Line<'static> {
    let percent = stat_fill_percent(base);
    let filled = (u32::from(track) * u32::from(percent) / 100) as usize;
    let empty = track as usize - filled;
    Line::from(vec![
        Span::styled(
            format!("{:>4} {:>3} ", stat_label(name), base),
            Style::default().fg(TEXT_MAIN),
        ),
        Span::styled("█".repeat(filled), Style::default().fg(stat_color(name))),
        Span::styled("░".repeat(empty), Style::default().fg(Color::Rgb(50, 60, 74))),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_percent_is_base_value() {
        assert_eq!(stat_fill_percent(0), 0);
        assert_eq!(stat_fill_percent(45), 45);
        assert_eq!(stat_fill_percent(100), 100);
    }

    #[test]
    fn test_fill_percent_clamps_above_100() {
        assert_eq!(stat_fill_percent(140), 100);
        assert_eq!(stat_fill_percent(255), 100);
    }

    #[test]
    fn test_stat_line_uses_stat_color() {
        let line = stat_line("hp", 45, 40);
        // label+value span, filled span, empty span
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].style.fg, Some(Color::Rgb(0xff, 0x6b, 0x6b)));
        // 45% of a 40-cell track -> 18 filled cells
        assert_eq!(line.spans[1].content.chars().count(), 18);
        assert_eq!(line.spans[2].content.chars().count(), 22);
    }

    #[test]
    fn test_stat_line_full_bar_when_clamped() {
        let line = stat_line("attack", 140, 40);
        assert_eq!(line.spans[1].content.chars().count(), 40);
        assert_eq!(line.spans[2].content.chars().count(), 0);
    }
}
