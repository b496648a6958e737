use super::theme;
use crate::app::App;
use crate::chat::ERROR_PREFIX;
use crate::types::{Message, Role};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TYPING_FRAMES: &[&str] = &["●∙∙", "∙●∙", "∙∙●"];

/// Draws the message list. Clamps `app.scroll_back` to what is scrollable.
pub fn draw_transcript(f: &mut Frame, area: Rect, app: &mut App) {
    let scrolled = app.scroll_back > 0;
    let mut title = vec![
        Span::styled(" ", theme::subtitle_style()),
        Span::styled("● ", theme::subtitle_style()),
        Span::styled("● ", theme::subtitle_style()),
        Span::styled("● ", theme::subtitle_style()),
        Span::styled("TRANSCRIPT ", theme::panel_title_style()),
    ];
    if scrolled {
        title.push(Span::styled("[End] latest ", theme::key_hint_style()));
    }

    // No background: the starfield shows through.
    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(theme::border_style(scrolled));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let bubble_width = (inner.width as usize * 4 / 5).max(10);
    let mut lines: Vec<Line> = Vec::new();
    for message in app.conversation.messages() {
        push_message(&mut lines, message, bubble_width);
    }
    if app.conversation.is_waiting() {
        let dots = TYPING_FRAMES[(app.tick / 6) as usize % TYPING_FRAMES.len()];
        lines.push(Line::from(Span::styled(
            Role::Assistant.to_string(),
            theme::role_style(Role::Assistant),
        )));
        lines.push(Line::from(Span::styled(
            format!(" {} ", dots),
            theme::bubble_style(Role::Assistant, false),
        )));
    }

    let visible = inner.height as usize;
    let total = lines.len();
    let max_back = total.saturating_sub(visible);
    app.scroll_back = app.scroll_back.min(max_back);
    let start = total.saturating_sub(visible + app.scroll_back);
    let end = (start + visible).min(total);

    let visible_lines: Vec<Line> = lines.drain(start..end).collect();
    f.render_widget(Paragraph::new(visible_lines), inner);
}

/// Role/time header plus the wrapped, padded bubble. Assistant messages sit
/// on the left, the user's on the right.
fn push_message(lines: &mut Vec<Line<'static>>, message: &Message, bubble_width: usize) {
    let alignment = match message.role {
        Role::User => Alignment::Right,
        Role::Assistant => Alignment::Left,
    };
    let is_error = message.role == Role::Assistant && message.content.starts_with(ERROR_PREFIX);

    lines.push(
        Line::from(vec![
            Span::styled(message.role.to_string(), theme::role_style(message.role)),
            Span::styled(
                format!(" · {}", message.sent_at.format("%H:%M")),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::DIM),
            ),
        ])
        .alignment(alignment),
    );

    let wrapped = wrap_text(&message.content, bubble_width.saturating_sub(2));
    let inner_width = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);
    let style = theme::bubble_style(message.role, is_error);
    for text in wrapped {
        let pad = inner_width - text.width();
        lines.push(
            Line::from(Span::styled(
                format!(" {}{} ", text, " ".repeat(pad)),
                style,
            ))
            .alignment(alignment),
        );
    }
    lines.push(Line::from(""));
}

/// Greedy word wrap by display width. Explicit newlines are kept; words
/// longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in raw.split(' ') {
            let word_width = word.width();
            let sep = usize::from(!current.is_empty());
            if current_width + sep + word_width <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += sep + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatClient;
    use crate::types::Config;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Duration;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap_text("hello world", 5), vec!["hello", "world"]);
        assert_eq!(wrap_text("a bc def", 4), vec!["a bc", "def"]);
    }

    #[test]
    fn splits_words_longer_than_the_width() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn keeps_explicit_newlines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn measures_wide_characters() {
        assert_eq!(wrap_text("日本語", 4), vec!["日本", "語"]);
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn scroll_back_is_clamped_to_content() {
        let client = ChatClient::new("http://127.0.0.1:9/chat", Duration::from_secs(1)).unwrap();
        let mut app = App::new(&Config::default(), client);
        app.scroll_back = 1000;
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();

        terminal
            .draw(|f| draw_transcript(f, f.area(), &mut app))
            .unwrap();

        // Greeting fits entirely, so there is nothing to scroll back to.
        assert_eq!(app.scroll_back, 0);
        assert!(screen_text(&terminal).contains("Ask me anything."));
    }
}
