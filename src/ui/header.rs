use super::theme;
use crate::app::App;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const SPARKLE_CHARS: &[char] = &['.', '+', '*', '+', '.', ' '];

pub fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let tick = app.tick as usize;

    // Sparkle animation: cycle through characters at different phases
    let left_sparkle = SPARKLE_CHARS[tick / 4 % SPARKLE_CHARS.len()];
    let right_sparkle = SPARKLE_CHARS[(tick / 4 + 3) % SPARKLE_CHARS.len()];

    let lines = vec![
        Line::from(vec![Span::styled("  TERMINAL CHAT", theme::eyebrow_style())]),
        Line::from(vec![Span::styled(
            format!("  {} A I   C h a t {}", left_sparkle, right_sparkle),
            theme::title_style(),
        )]),
        Line::from(vec![Span::styled(
            format!("  Connected to {}", app.endpoint()),
            theme::subtitle_style(),
        )]),
    ];

    f.render_widget(Paragraph::new(lines), area);
}
