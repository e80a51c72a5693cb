//! Simulation state and the operations that grow or recolor it.
//!
//! One [`SimulationState`] exists per mounted field. It is created when the
//! component mounts, mutated by the frame loop and input handlers, and passed
//! by reference to every update and render function.

use log::debug;
use rand::Rng;
use rand::distributions::Standard;

use super::config::SimulationConfig;
use super::palette::{Palette, PaletteSource};
use super::types::{Particle, Viewport};

/// Attraction target driven by mouse or touch input.
///
/// `x`, `y` and `z` are only meaningful while `down` is set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerState {
	pub down: bool,
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

/// Everything the frame loop reads and writes.
#[derive(Clone, Debug)]
pub struct SimulationState {
	/// Ticks since start.
	pub frame: u64,
	/// Timestamp of the previous tick, in milliseconds.
	pub prev_frame_start_time: f64,
	/// Seconds elapsed between the previous tick and this one.
	pub delta_time: f64,
	/// Particles in spawn order. Rendering sorts a view, never this vector.
	pub particles: Vec<Particle>,
	pub pointer: PointerState,
	/// Edge length of the anchor element, fixed after construction.
	pub render_container_size: f64,
	/// Active color set.
	pub palette: Palette,
	pub viewport: Viewport,
}

impl SimulationState {
	pub fn new(viewport: Viewport, config: &SimulationConfig) -> Self {
		Self {
			frame: 0,
			prev_frame_start_time: 0.0,
			delta_time: 0.0,
			particles: Vec::new(),
			pointer: PointerState::default(),
			render_container_size: config.render_container_size,
			palette: Palette::default(),
			viewport,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport = Viewport::new(width, height);
	}
}

/// Uniform sample in `[0, 1)`.
pub(crate) fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
	rng.sample(Standard)
}

/// Append up to `count` randomly placed particles colored from the active
/// palette.
///
/// With [`SimulationConfig::max_particles`] set, particles that would exceed
/// the cap are dropped. Returns how many were actually added.
pub fn spawn_particles<R: Rng + ?Sized>(
	state: &mut SimulationState,
	count: usize,
	config: &SimulationConfig,
	rng: &mut R,
) -> usize {
	let allowed = match config.max_particles {
		Some(cap) => count.min(cap.saturating_sub(state.particles.len())),
		None => count,
	};
	if allowed < count {
		debug!(
			"shadow-field: capacity {:?} reached, rejected {} of {} particles",
			config.max_particles,
			count - allowed,
			count
		);
	}

	let Viewport { width, height } = state.viewport;
	state.particles.reserve(allowed);
	for _ in 0..allowed {
		let particle = Particle {
			size: config.particle_size,
			x: unit(rng) * width,
			y: unit(rng) * height,
			z: unit(rng) * config.spawn_depth,
			dx: unit(rng) * config.spawn_speed,
			dy: unit(rng) * config.spawn_speed,
			dz: unit(rng) * config.spawn_speed,
			color: state.palette.choose(rng).to_string(),
		};
		state.particles.push(particle);
	}

	debug!(
		"shadow-field: spawned {}, total {}",
		allowed,
		state.particles.len()
	);
	allowed
}

/// Activate a random palette from `source` and recolor every particle from it.
pub fn set_random_palette<R: Rng + ?Sized>(
	state: &mut SimulationState,
	source: &PaletteSource,
	rng: &mut R,
) {
	state.palette = source.choose(rng).clone();
	for p in &mut state.particles {
		p.color = state.palette.choose(rng).to_string();
	}
	debug!(
		"shadow-field: palette rerolled to {:?}",
		state.palette.colors()
	);
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn rgb_palette() -> Palette {
		Palette::new(vec!["red".into(), "green".into(), "blue".into()]).unwrap()
	}

	fn fresh_state() -> SimulationState {
		let mut state = SimulationState::new(Viewport::new(800.0, 600.0), &SimulationConfig::default());
		state.palette = rgb_palette();
		state
	}

	#[test]
	fn spawn_adds_requested_count() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut state = fresh_state();
		let config = SimulationConfig::default();

		assert_eq!(spawn_particles(&mut state, 3, &config, &mut rng), 3);
		assert_eq!(state.particles.len(), 3);
		for p in &state.particles {
			assert_eq!(p.size, 6.0);
			assert!(["red", "green", "blue"].contains(&p.color.as_str()));
			assert!((0.0..800.0).contains(&p.x));
			assert!((0.0..600.0).contains(&p.y));
			assert!((0.0..100.0).contains(&p.z));
			for v in [p.dx, p.dy, p.dz] {
				assert!((0.0..60.0).contains(&v));
			}
		}
	}

	#[test]
	fn spawn_grows_without_cap() {
		let mut rng = StdRng::seed_from_u64(2);
		let mut state = fresh_state();
		let config = SimulationConfig::default();

		spawn_particles(&mut state, 300, &config, &mut rng);
		for _ in 0..10 {
			spawn_particles(&mut state, config.burst_count, &config, &mut rng);
		}
		assert_eq!(state.particles.len(), 350);
	}

	#[test]
	fn spawn_rejects_past_capacity() {
		let mut rng = StdRng::seed_from_u64(3);
		let mut state = fresh_state();
		let config = SimulationConfig {
			max_particles: Some(8),
			..SimulationConfig::default()
		};

		assert_eq!(spawn_particles(&mut state, 5, &config, &mut rng), 5);
		assert_eq!(spawn_particles(&mut state, 5, &config, &mut rng), 3);
		assert_eq!(spawn_particles(&mut state, 5, &config, &mut rng), 0);
		assert_eq!(state.particles.len(), 8);
	}

	#[test]
	fn reroll_recolors_from_new_palette() {
		let mut rng = StdRng::seed_from_u64(4);
		let mut state = fresh_state();
		let config = SimulationConfig::default();
		spawn_particles(&mut state, 40, &config, &mut rng);

		let source = PaletteSource::from_json(r##"[["#111111","#222222"]]"##).unwrap();
		set_random_palette(&mut state, &source, &mut rng);

		assert_eq!(state.palette.colors(), ["#111111", "#222222"]);
		assert!(state.particles.iter().all(|p| state.palette.contains(&p.color)));
	}

	#[test]
	fn reroll_keeps_particle_count_and_positions() {
		let mut rng = StdRng::seed_from_u64(5);
		let mut state = fresh_state();
		let config = SimulationConfig::default();
		spawn_particles(&mut state, 10, &config, &mut rng);
		let before: Vec<_> = state.particles.iter().map(|p| (p.x, p.y, p.z)).collect();

		set_random_palette(&mut state, &PaletteSource::builtin(), &mut rng);

		let after: Vec<_> = state.particles.iter().map(|p| (p.x, p.y, p.z)).collect();
		assert_eq!(before, after);
	}
}
