//! Stars approaching the viewer, projected onto a 2D surface.
//!
//! [`field`] holds the simulation proper: a fixed arena of stars advanced by
//! an explicit `dt`. [`engine`] wraps it with the start/stop lifecycle, frame
//! pacing and resize handling, and paints through the [`Surface`] trait.

pub mod engine;
pub mod field;

pub use engine::{Region, Starfield, StarfieldConfig, Surface};
pub use field::Bounds;
