use super::{composer, header, theme, transcript};
use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Screen regions, computed once per frame so the starfield can be scoped
/// to one of them before the panels are drawn on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub transcript: Rect,
    pub composer: Rect,
    pub footer: Rect,
}

pub fn split(area: Rect) -> Areas {
    // Vertical: header | transcript | composer | footer
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(5),    // transcript
            Constraint::Length(5), // composer
            Constraint::Length(1), // footer
        ])
        .split(area);

    // The chat panel takes the middle 90% of the width.
    let centered = |r: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(5),
                Constraint::Percentage(90),
                Constraint::Percentage(5),
            ])
            .split(r)[1]
    };

    Areas {
        header: centered(vert[0]),
        transcript: centered(vert[1]),
        composer: centered(vert[2]),
        footer: vert[3],
    }
}

pub fn draw_layout(f: &mut Frame, areas: &Areas, app: &mut App) {
    header::draw_header(f, areas.header, app);
    transcript::draw_transcript(f, areas.transcript, app);
    composer::draw_composer(f, areas.composer, app);
    draw_footer(f, areas.footer, app);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    // Show flash message if active, otherwise normal footer
    if let Some(msg) = &app.flash_message {
        if app.tick < app.flash_until {
            let footer = Line::from(vec![Span::styled(
                format!(" {} ", msg),
                Style::default()
                    .fg(theme::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]);
            f.render_widget(Paragraph::new(footer), area);
            return;
        }
    }

    let footer = Line::from(vec![
        Span::styled(" [Enter]", theme::key_hint_style()),
        Span::styled(" Send  ", theme::footer_style()),
        Span::styled("[Alt+Enter]", theme::key_hint_style()),
        Span::styled(" Newline  ", theme::footer_style()),
        Span::styled("[PgUp/PgDn]", theme::key_hint_style()),
        Span::styled(" Scroll  ", theme::footer_style()),
        Span::styled("[Ctrl+Y]", theme::key_hint_style()),
        Span::styled(" Copy reply  ", theme::footer_style()),
        Span::styled("[F1]", theme::key_hint_style()),
        Span::styled(" Help  ", theme::footer_style()),
        Span::styled("[Esc]", theme::key_hint_style()),
        Span::styled(" Quit", theme::footer_style()),
    ]);

    f.render_widget(Paragraph::new(footer), area);
}
