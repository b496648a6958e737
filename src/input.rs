use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAGE: usize = 10;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Help overlay swallows the next key
    if app.show_help {
        app.toggle_help();
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::F(1) => app.toggle_help(),
        KeyCode::Enter if alt || shift => app.input.push('\n'),
        KeyCode::Enter => app.send_message(),
        // Many terminals report Ctrl+Enter as Ctrl+J.
        KeyCode::Char('j') if ctrl => app.input.push('\n'),
        KeyCode::Char('y') if ctrl => app.copy_last_reply(),
        KeyCode::Char('u') if ctrl => app.input.clear(),
        KeyCode::Char(c) if !ctrl => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Up if ctrl => app.scroll_up(1),
        KeyCode::Down if ctrl => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::End => app.follow_latest(),
        _ => {}
    }
}
