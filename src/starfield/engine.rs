use super::field::{star_count, Bounds, Field};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Upper bound on simulated time per frame. A long stall (suspended
/// terminal, debugger) advances the field by at most this much.
pub const MAX_FRAME_DT: Duration = Duration::from_millis(50);

/// Which part of the screen the starfield is drawn behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Full,
    Transcript,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarfieldConfig {
    /// Stars per unit of surface area.
    pub density: f64,
    /// Depth units consumed per millisecond.
    pub speed: f64,
    pub color: Color,
    pub region: Region,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            density: 0.0012,
            speed: 0.035,
            color: Color::Rgb(255, 255, 255),
            region: Region::Full,
        }
    }
}

/// Something the starfield can paint onto.
pub trait Surface {
    /// Current on-screen size, or `None` when there is nothing to draw on.
    fn size(&self) -> Option<Bounds>;
    fn clear(&mut self);
    fn fill_disk(&mut self, x: f64, y: f64, radius: f64, color: Color);
}

struct Running {
    field: Field,
    /// Cached surface size, kept current by resize notifications.
    bounds: Bounds,
    last_frame: Instant,
    frame_pending: bool,
}

/// The animated background. Idle until [`Starfield::start`] succeeds; the
/// host loop then calls [`Starfield::frame`] once per display frame.
pub struct Starfield<R = StdRng> {
    config: StarfieldConfig,
    rng: R,
    running: Option<Running>,
}

impl Starfield<StdRng> {
    pub fn new(config: StarfieldConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Starfield<R> {
    pub fn with_rng(config: StarfieldConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            running: None,
        }
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn frame_pending(&self) -> bool {
        self.running.as_ref().is_some_and(|r| r.frame_pending)
    }

    /// Number of stars in the live population, zero while idle.
    pub fn star_count(&self) -> usize {
        self.running.as_ref().map_or(0, |r| r.field.len())
    }

    /// Bind to `surface`, populate the field and schedule the first frame.
    ///
    /// Returns `false` and stays idle if the surface has no size yet.
    /// Starting an already running engine restarts it with a new population.
    pub fn start<S: Surface + ?Sized>(&mut self, surface: &S, now: Instant) -> bool {
        self.stop();

        let Some(bounds) = surface.size() else {
            return false;
        };

        let count = star_count(bounds, self.config.density);
        let field = Field::populate(count, self.config.speed, bounds, &mut self.rng);
        self.running = Some(Running {
            field,
            bounds,
            last_frame: now,
            frame_pending: true,
        });
        true
    }

    /// Cancel the pending frame and drop the resize subscription. Safe to
    /// call any number of times, including when `start` never succeeded.
    pub fn stop(&mut self) {
        self.running = None;
    }

    /// Bounds-changed notification. Only the cached size is updated; existing
    /// stars are left alone. Ignored while idle.
    pub fn notify_resize(&mut self, bounds: Bounds) {
        if let Some(running) = &mut self.running {
            running.bounds = bounds;
        }
    }

    /// Run one frame: clear, advance, paint, schedule the next frame.
    /// Does nothing unless a frame is pending.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, now: Instant) {
        let color = self.config.color;
        let Some(running) = &mut self.running else {
            return;
        };
        if !running.frame_pending {
            return;
        }
        running.frame_pending = false;

        let dt = now
            .saturating_duration_since(running.last_frame)
            .min(MAX_FRAME_DT);
        running.last_frame = now;

        let bounds = running.bounds;
        surface.clear();
        let sprites = running
            .field
            .advance(dt.as_secs_f64() * 1000.0, bounds, &mut self.rng);
        for sprite in sprites {
            surface.fill_disk(sprite.x, sprite.y, sprite.radius, color);
        }

        running.frame_pending = true;
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> Option<&mut Field> {
        self.running.as_mut().map(|r| &mut r.field)
    }

    #[cfg(test)]
    pub(crate) fn field(&self) -> Option<&Field> {
        self.running.as_ref().map(|r| &r.field)
    }

    #[cfg(test)]
    pub(crate) fn bounds(&self) -> Option<Bounds> {
        self.running.as_ref().map(|r| r.bounds)
    }
}
