use crate::starfield::{Bounds, Surface};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

/// Surface dots per terminal column and row. Stars move at sub-cell
/// resolution even though each one lands in a single cell.
const DOTS_X: f64 = 2.0;
const DOTS_Y: f64 = 4.0;
/// Near stars get huge; never paint more than this many cells out from the center.
const MAX_CELL_SPREAD: i32 = 2;

/// A region of the terminal buffer the starfield paints into.
pub struct TerminalSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= self.area.width as i32 || row >= self.area.height as i32 {
            return;
        }
        let cell = &mut self.buf[(self.area.x + col as u16, self.area.y + row as u16)];
        cell.set_char(ch);
        cell.set_style(Style::default().fg(color));
    }
}

impl Surface for TerminalSurface<'_> {
    fn size(&self) -> Option<Bounds> {
        if self.area.width == 0 || self.area.height == 0 {
            return None;
        }
        Some(Bounds::new(
            self.area.width as f64 * DOTS_X,
            self.area.height as f64 * DOTS_Y,
        ))
    }

    fn clear(&mut self) {
        for row in self.area.top()..self.area.bottom() {
            for col in self.area.left()..self.area.right() {
                self.buf[(col, row)].reset();
            }
        }
    }

    fn fill_disk(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        let col = (x / DOTS_X).floor() as i32;
        let row = (y / DOTS_Y).floor() as i32;
        let (ch, color) = star_appearance(radius, color);

        // Disks wider than a cell bleed into their neighbours.
        let spread_x = ((radius / DOTS_X) as i32).min(MAX_CELL_SPREAD);
        let spread_y = ((radius / DOTS_Y) as i32).min(MAX_CELL_SPREAD);
        if spread_x > 0 || spread_y > 0 {
            for dy in -spread_y..=spread_y {
                for dx in -spread_x..=spread_x {
                    if (dx, dy) == (0, 0) || !within_ellipse(dx, dy, spread_x, spread_y) {
                        continue;
                    }
                    self.put(col + dx, row + dy, '•', color);
                }
            }
        }

        self.put(col, row, ch, color);
    }
}

fn within_ellipse(dx: i32, dy: i32, rx: i32, ry: i32) -> bool {
    let nx = dx as f64 / rx.max(1) as f64;
    let ny = dy as f64 / ry.max(1) as f64;
    nx * nx + ny * ny <= 1.0
}

/// Glyph and shade for a projected radius: distant stars are small and dim.
fn star_appearance(radius: f64, color: Color) -> (char, Color) {
    let ch = if radius < 0.75 {
        '·'
    } else if radius < 1.5 {
        '∙'
    } else if radius < 3.0 {
        '•'
    } else {
        '✦'
    };
    let brightness = (0.35 + radius / 4.0).clamp(0.0, 1.0);
    (ch, shade(color, brightness))
}

fn shade(color: Color, brightness: f64) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let scale = |c: u8| (c as f64 * brightness).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}
