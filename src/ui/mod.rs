pub mod composer;
pub mod header;
pub mod help;
pub mod layout;
pub mod starfield;
pub mod theme;
pub mod transcript;

use crate::app::App;
use crate::starfield::Region;
use ratatui::Frame;
use std::time::Instant;

/// Master render function: draws starfield, layout, panels, then help overlay.
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let areas = layout::split(area);

    // Layer 0: starfield background
    let star_area = match app.stars.config().region {
        Region::Full => area,
        Region::Transcript => areas.transcript,
    };
    let mut surface = starfield::TerminalSurface::new(f.buffer_mut(), star_area);
    app.animate_stars(&mut surface, Instant::now());

    // Layer 1: header, transcript, composer, footer
    layout::draw_layout(f, &areas, app);

    // Layer 2: help overlay
    if app.show_help {
        help::draw_help(f, area);
    }
}
