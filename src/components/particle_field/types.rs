//! Core value types shared by the simulation and the renderer.

/// A single simulated particle.
///
/// `z` is a pseudo-depth: it scales the rendered shadow and decides stacking
/// order but takes no part in any projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Base diameter in pixels before depth scaling.
	pub size: f64,
	pub x: f64,
	pub y: f64,
	pub z: f64,
	pub dx: f64,
	pub dy: f64,
	pub dz: f64,
	/// CSS color drawn from the active palette.
	pub color: String,
}

/// Visible area the particles bounce inside, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(800.0, 600.0)
	}
}
