use super::theme;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<15}", keys), theme::key_hint_style()),
        Span::styled(action, Style::default().fg(theme::TEXT)),
    ])
}

pub fn draw_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(65, 21, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Line::from(vec![Span::styled(
            " Help - AI Chat ",
            theme::panel_title_style(),
        )]))
        .borders(Borders::ALL)
        .border_style(theme::border_style(true))
        .style(Style::default().bg(theme::SURFACE));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::from(""),
        section("COMPOSE"),
        binding("Enter", "Send message"),
        binding("Alt+Enter", "New line (also Shift+Enter, Ctrl+J)"),
        binding("Backspace", "Delete last character"),
        binding("Ctrl+U", "Clear input"),
        Line::from(""),
        section("TRANSCRIPT"),
        binding("PgUp/PgDn", "Scroll a page"),
        binding("Ctrl+↑/↓", "Scroll a line"),
        binding("End", "Follow latest"),
        binding("Ctrl+Y", "Copy last reply"),
        Line::from(""),
        section("GLOBAL"),
        binding("F1", "Toggle help"),
        binding("Esc / Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to close",
            Style::default().fg(theme::TEXT_DIM),
        )),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}
