use crate::types::Role;
use ratatui::style::{Color, Modifier, Style};

// ── Base palette ────────────────────────────────────────────────
pub const SURFACE: Color = Color::Rgb(12, 14, 22);
pub const BORDER: Color = Color::Rgb(50, 52, 62);
pub const BORDER_FOCUS: Color = Color::Rgb(140, 140, 160);

pub const TEXT: Color = Color::Rgb(235, 235, 235);
pub const TEXT_DIM: Color = Color::Rgb(130, 130, 140);
pub const ACCENT: Color = Color::Rgb(235, 235, 235);
pub const ACCENT_WARM: Color = Color::Rgb(200, 190, 255);

pub const SUCCESS: Color = Color::Rgb(0, 255, 0);
pub const ERROR: Color = Color::Rgb(255, 80, 80);

pub const USER_BUBBLE: Color = Color::Rgb(30, 27, 75);
pub const ASSISTANT_BUBBLE: Color = Color::Rgb(15, 23, 42);

// ── Composite styles ────────────────────────────────────────────
pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn eyebrow_style() -> Style {
    Style::default().fg(ACCENT_WARM)
}

pub fn subtitle_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn panel_title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn key_hint_style() -> Style {
    Style::default()
        .fg(ACCENT_WARM)
        .add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn footer_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Header line above each message.
pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(ACCENT_WARM).add_modifier(Modifier::BOLD),
        Role::Assistant => Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD),
    }
}

/// Body text of a message bubble.
pub fn bubble_style(role: Role, is_error: bool) -> Style {
    let style = match role {
        Role::User => Style::default().fg(TEXT).bg(USER_BUBBLE),
        Role::Assistant => Style::default().fg(TEXT).bg(ASSISTANT_BUBBLE),
    };
    if is_error {
        style.fg(ERROR)
    } else {
        style
    }
}
