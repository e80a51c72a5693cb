//! Per-frame particle physics: boundary reflection, friction and pointer
//! attraction.

use super::config::SimulationConfig;
use super::state::SimulationState;

/// Bounds of a particle's centre along an axis of length `extent`, inset by
/// half its size. An axis shorter than the particle falls back to the whole
/// extent.
fn inset_bounds(extent: f64, half: f64) -> (f64, f64) {
	if extent < 2.0 * half {
		(0.0, extent.max(0.0))
	} else {
		(half, extent - half)
	}
}

/// Advance one bounded axis by `dt`.
///
/// If integrating would carry the position outside `[lo, hi]`, the position
/// is pinned to the violated bound and the velocity is negated instead.
fn step_axis(pos: &mut f64, vel: &mut f64, (lo, hi): (f64, f64), dt: f64) {
	let next = *pos + *vel * dt;
	if next < lo || next > hi {
		*pos = next.clamp(lo, hi);
		*vel = -*vel;
	} else {
		*pos = next;
	}
}

/// Move every particle one step of `state.delta_time` seconds.
pub fn update_particles(state: &mut SimulationState, config: &SimulationConfig) {
	let dt = state.delta_time;
	let (width, height) = (state.viewport.width, state.viewport.height);
	let pointer = state.pointer.clone();
	let friction = config.friction * (1.0 - dt);

	for p in &mut state.particles {
		let half = p.size / 2.0;
		step_axis(&mut p.x, &mut p.dx, inset_bounds(width, half), dt);
		step_axis(&mut p.y, &mut p.dy, inset_bounds(height, half), dt);
		step_axis(&mut p.z, &mut p.dz, (0.0, config.depth_limit), dt);

		p.dx *= friction;
		p.dy *= friction;
		p.dz *= friction;

		if !pointer.down {
			continue;
		}
		let (ox, oy, oz) = (pointer.x - p.x, pointer.y - p.y, pointer.z - p.z);
		let dist = (ox * ox + oy * oy + oz * oz).sqrt();
		// A particle sitting exactly on the target has no direction to fall in.
		if dist == 0.0 {
			continue;
		}
		let grav = config.attraction_scale
			* config
				.attraction_cap
				.min(config.attraction_strength / (dist * dist));
		let pull = dt * grav / dist;
		p.dx += ox * pull;
		p.dy += oy * pull;
		p.dz += oz * pull;
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::super::state::spawn_particles;
	use super::super::types::{Particle, Viewport};
	use super::*;

	fn particle(x: f64, y: f64, z: f64, dx: f64, dy: f64, dz: f64) -> Particle {
		Particle {
			size: 6.0,
			x,
			y,
			z,
			dx,
			dy,
			dz,
			color: "red".into(),
		}
	}

	fn state_with(particles: Vec<Particle>, dt: f64) -> SimulationState {
		let mut state = SimulationState::new(Viewport::new(800.0, 600.0), &SimulationConfig::default());
		state.particles = particles;
		state.delta_time = dt;
		state
	}

	#[test]
	fn reflects_off_left_edge() {
		let config = SimulationConfig::default();
		let mut state = state_with(vec![particle(2.0, 300.0, 50.0, -50.0, 0.0, 0.0)], 0.1);

		update_particles(&mut state, &config);

		let p = &state.particles[0];
		assert_eq!(p.x, 3.0);
		let expected = 50.0 * 0.99999 * 0.9;
		assert!((p.dx - expected).abs() < 1e-9);
	}

	#[test]
	fn reflects_off_far_edges() {
		let config = SimulationConfig::default();
		let mut state = state_with(
			vec![particle(795.0, 595.0, 399.0, 100.0, 100.0, 100.0)],
			0.1,
		);

		update_particles(&mut state, &config);

		let p = &state.particles[0];
		assert_eq!(p.x, 797.0);
		assert_eq!(p.y, 597.0);
		assert_eq!(p.z, 400.0);
		assert!(p.dx < 0.0 && p.dy < 0.0 && p.dz < 0.0);
	}

	#[test]
	fn integrates_inside_bounds() {
		let config = SimulationConfig::default();
		let mut state = state_with(vec![particle(100.0, 100.0, 100.0, 10.0, -20.0, 30.0)], 0.5);

		update_particles(&mut state, &config);

		let p = &state.particles[0];
		assert_eq!((p.x, p.y, p.z), (105.0, 90.0, 115.0));
		assert!((p.dx - 10.0 * 0.99999 * 0.5).abs() < 1e-9);
	}

	#[test]
	fn friction_never_grows_speed_for_short_steps() {
		let mut rng = StdRng::seed_from_u64(11);
		let config = SimulationConfig::default();
		let mut state = state_with(Vec::new(), 0.016);
		spawn_particles(&mut state, 200, &config, &mut rng);

		for _ in 0..100 {
			let before: Vec<_> = state.particles.iter().map(|p| (p.dx, p.dy, p.dz)).collect();
			update_particles(&mut state, &config);
			for (p, (dx, dy, dz)) in state.particles.iter().zip(before) {
				assert!(p.dx.abs() <= dx.abs());
				assert!(p.dy.abs() <= dy.abs());
				assert!(p.dz.abs() <= dz.abs());
			}
		}
	}

	#[test]
	fn long_steps_reverse_velocity() {
		let config = SimulationConfig::default();
		let mut state = state_with(vec![particle(400.0, 300.0, 200.0, 1.0, 1.0, 1.0)], 1.5);

		update_particles(&mut state, &config);

		let p = &state.particles[0];
		assert!(p.dx < 0.0 && p.dy < 0.0 && p.dz < 0.0);
	}

	#[test]
	fn stays_in_bounds_under_attraction() {
		let mut rng = StdRng::seed_from_u64(12);
		let config = SimulationConfig::default();
		let mut state = state_with(Vec::new(), 0.05);
		spawn_particles(&mut state, 300, &config, &mut rng);
		state.pointer.down = true;
		state.pointer.x = 10.0;
		state.pointer.y = 590.0;
		state.pointer.z = 20.0;

		for step in 0..500 {
			state.delta_time = if step % 50 == 0 { 2.0 } else { 0.05 };
			update_particles(&mut state, &config);
			for p in &state.particles {
				assert!((0.0..=800.0).contains(&p.x));
				assert!((0.0..=600.0).contains(&p.y));
				assert!((0.0..=400.0).contains(&p.z));
			}
		}
	}

	#[test]
	fn attraction_pulls_toward_pointer() {
		let config = SimulationConfig::default();
		let mut state = state_with(vec![particle(100.0, 300.0, 50.0, 0.0, 0.0, 0.0)], 0.01);
		state.pointer.down = true;
		state.pointer.x = 400.0;
		state.pointer.y = 300.0;
		state.pointer.z = 50.0;

		update_particles(&mut state, &config);

		let p = &state.particles[0];
		// 25_830_000 / 300^2 ~= 287, doubled, over 0.01s.
		let expected = 2.0 * (25_830_000.0_f64 / 90_000.0) * 0.01;
		assert!((p.dx - expected).abs() < 1e-9);
		assert_eq!(p.dy, 0.0);
		assert_eq!(p.dz, 0.0);
	}

	#[test]
	fn attraction_is_capped_near_pointer() {
		let config = SimulationConfig::default();
		let mut state = state_with(vec![particle(100.0, 300.0, 50.0, 0.0, 0.0, 0.0)], 0.01);
		state.pointer.down = true;
		state.pointer.x = 101.0;
		state.pointer.y = 300.0;
		state.pointer.z = 50.0;

		update_particles(&mut state, &config);

		assert!((state.particles[0].dx - 2.0 * 1600.0 * 0.01).abs() < 1e-9);
	}

	#[test]
	fn zero_distance_leaves_velocity_finite() {
		let config = SimulationConfig::default();
		let mut state = state_with(vec![particle(100.0, 100.0, 20.0, 0.0, 0.0, 0.0)], 0.1);
		state.pointer.down = true;
		state.pointer.x = 100.0;
		state.pointer.y = 100.0;
		state.pointer.z = 20.0;

		update_particles(&mut state, &config);

		let p = &state.particles[0];
		assert!(p.dx.is_finite() && p.dy.is_finite() && p.dz.is_finite());
		assert_eq!((p.dx, p.dy, p.dz), (0.0, 0.0, 0.0));
	}

	#[test]
	fn released_pointer_does_not_attract() {
		let config = SimulationConfig::default();
		let mut state = state_with(vec![particle(100.0, 100.0, 20.0, 0.0, 0.0, 0.0)], 0.1);
		state.pointer.x = 500.0;
		state.pointer.y = 500.0;

		update_particles(&mut state, &config);

		assert_eq!(state.particles[0].dx, 0.0);
	}

	#[test]
	fn viewport_narrower_than_particle_keeps_it_on_screen() {
		let config = SimulationConfig::default();
		let mut state = state_with(vec![particle(1.0, 1.0, 1.0, 5.0, 5.0, 5.0)], 0.1);
		state.resize(2.0, 2.0);

		update_particles(&mut state, &config);
		let p = &state.particles[0];
		assert_eq!((p.x, p.y), (1.5, 1.5));

		for _ in 0..20 {
			update_particles(&mut state, &config);
			let p = &state.particles[0];
			assert!((0.0..=2.0).contains(&p.x));
			assert!((0.0..=2.0).contains(&p.y));
		}
	}

	#[test]
	fn zero_sized_viewport_pins_to_origin() {
		let config = SimulationConfig::default();
		let mut state = state_with(vec![particle(1.0, 1.0, 1.0, 5.0, -5.0, 0.0)], 0.1);
		state.resize(0.0, 0.0);

		update_particles(&mut state, &config);

		assert_eq!((state.particles[0].x, state.particles[0].y), (0.0, 0.0));
	}
}
