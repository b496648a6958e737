use super::theme;
use super::transcript::wrap_text;
use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn draw_composer(f: &mut Frame, area: Rect, app: &App) {
    f.render_widget(Clear, area);

    let mut title = vec![Span::styled(" MESSAGE ", theme::panel_title_style())];
    if app.conversation.is_waiting() {
        title.push(Span::styled(
            "waiting for reply… ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(theme::border_style(app.can_send()))
        .style(Style::default().bg(theme::SURFACE));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Blinking cursor
    let cursor = if app.tick / 15 % 2 == 0 { "█" } else { " " };

    if app.input.is_empty() {
        let line = Line::from(vec![
            Span::styled(" > ", Style::default().fg(theme::ACCENT_WARM)),
            Span::styled(cursor, Style::default().fg(theme::ACCENT)),
            Span::styled(
                "Ask something...",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]);
        f.render_widget(Paragraph::new(line), inner);
        return;
    }

    // Leave room for the prompt and the cursor.
    let width = (inner.width as usize).saturating_sub(4);
    let wrapped = wrap_text(&app.input, width);
    let skip = wrapped.len().saturating_sub(inner.height as usize);
    let last = wrapped.len() - 1;

    let lines: Vec<Line> = wrapped
        .into_iter()
        .enumerate()
        .skip(skip)
        .map(|(i, text)| {
            let prompt = if i == 0 { " > " } else { "   " };
            let mut spans = vec![
                Span::styled(prompt, Style::default().fg(theme::ACCENT_WARM)),
                Span::styled(text, Style::default().fg(theme::TEXT)),
            ];
            if i == last {
                spans.push(Span::styled(cursor, Style::default().fg(theme::ACCENT)));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
