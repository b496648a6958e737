use rand::Rng;

/// Smallest population a field is ever created with, so tiny surfaces still show stars.
pub const MIN_STARS: usize = 80;
/// Near plane: a star whose depth reaches this value is recycled.
pub const DEPTH_FLOOR: f64 = 1.0;
/// Spawn depth range, `[MIN_SPAWN_DEPTH, MAX_SPAWN_DEPTH)`.
pub const MIN_SPAWN_DEPTH: f64 = 10.0;
pub const MAX_SPAWN_DEPTH: f64 = 1000.0;
pub const FOCAL_LENGTH: f64 = 200.0;

const MIN_SIZE: f64 = 0.2;
const MAX_SIZE: f64 = 1.7;

/// Width and height of a drawing surface, in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Half-open containment: `[0, width) x [0, height)`.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < self.width && y >= 0.0 && y < self.height
    }
}

/// A single particle. `x`/`y` are offsets from the projection center before
/// perspective is applied; `z` is the distance to the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub size: f64,
}

impl Star {
    /// Draw a fresh star scoped to the given surface bounds.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> Self {
        Self {
            x: (rng.gen::<f64>() - 0.5) * bounds.width * 2.0,
            y: (rng.gen::<f64>() - 0.5) * bounds.height * 2.0,
            z: rng.gen_range(MIN_SPAWN_DEPTH..MAX_SPAWN_DEPTH),
            size: rng.gen_range(MIN_SIZE..MAX_SIZE),
        }
    }

    /// Screen-space position and radius, or `None` if the projected center
    /// falls outside `bounds`.
    pub fn project(&self, bounds: Bounds) -> Option<(f64, f64, f64)> {
        let perspective = FOCAL_LENGTH / self.z;
        let sx = self.x * perspective + bounds.width / 2.0;
        let sy = self.y * perspective + bounds.height / 2.0;
        if !bounds.contains(sx, sy) {
            return None;
        }
        Some((sx, sy, self.size * perspective))
    }
}

/// One disk to paint this frame. `slot` is the arena index of the star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub slot: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Population size for a surface: `max(MIN_STARS, floor(area * density))`.
pub fn star_count(bounds: Bounds, density: f64) -> usize {
    let raw = (bounds.area() * density).floor();
    if raw.is_finite() && raw > 0.0 {
        (raw as usize).max(MIN_STARS)
    } else {
        MIN_STARS
    }
}

/// Fixed-capacity arena of stars. Slots are stable; the star in a slot is
/// replaced wholesale when it crosses the near plane.
#[derive(Debug, Clone)]
pub struct Field {
    stars: Vec<Star>,
    speed: f64,
}

impl Field {
    pub fn populate<R: Rng + ?Sized>(count: usize, speed: f64, bounds: Bounds, rng: &mut R) -> Self {
        let stars = (0..count).map(|_| Star::spawn(rng, bounds)).collect();
        Self { stars, speed }
    }

    #[cfg(test)]
    pub(crate) fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[cfg(test)]
    pub(crate) fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Advance every star by `dt_ms` and return what should be drawn.
    ///
    /// Stars that reach the near plane are respawned against `bounds` and left
    /// out of the returned list for this frame. Stars projecting outside
    /// `bounds` are culled from the list but keep their state.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt_ms: f64, bounds: Bounds, rng: &mut R) -> Vec<Sprite> {
        let step = self.speed * dt_ms;
        let mut sprites = Vec::with_capacity(self.stars.len());

        for (slot, star) in self.stars.iter_mut().enumerate() {
            star.z -= step;
            if star.z <= DEPTH_FLOOR {
                *star = Star::spawn(rng, bounds);
                continue;
            }
            if let Some((x, y, radius)) = star.project(bounds) {
                sprites.push(Sprite { slot, x, y, radius });
            }
        }

        sprites
    }
}
