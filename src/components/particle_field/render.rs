//! Box-shadow rendering for the particle field.
//!
//! Every particle becomes one layer of the anchor element's `box-shadow`:
//!
//! ```text
//! <x>px <y>px 0 <spread>px <color>
//! ```
//!
//! Layers earlier in the list paint on top, so particles are emitted in
//! descending depth. The anchor is a small fixed-size element positioned off
//! screen by its own size; offsets add half of that size back so each shadow
//! is centred on the particle's position.

use std::fmt::Write;

use log::warn;
use web_sys::HtmlElement;

use super::config::SimulationConfig;
use super::state::SimulationState;
use super::types::Particle;

/// Serialize the particle list into a `box-shadow` value.
///
/// Sorting is stable, so particles at equal depth keep spawn order.
/// `state.particles` itself is left untouched.
pub fn box_shadow(state: &SimulationState, config: &SimulationConfig) -> String {
	let mut ordered: Vec<&Particle> = state.particles.iter().collect();
	ordered.sort_by(|a, b| b.z.total_cmp(&a.z));

	let anchor = state.render_container_size;
	let half_anchor = anchor / 2.0;
	let mut out = String::with_capacity(ordered.len() * 32);
	for (i, p) in ordered.into_iter().enumerate() {
		let apparent = p.size * (1.0 + p.z / config.depth_scale);
		let spread = (apparent - anchor) / 2.0;
		if i > 0 {
			out.push(',');
		}
		let _ = write!(
			out,
			"{}px {}px 0 {}px {}",
			p.x + half_anchor,
			p.y + half_anchor,
			spread,
			p.color
		);
	}
	out
}

/// Write the current frame onto the anchor element. Does nothing without one.
pub fn render_particles(
	state: &SimulationState,
	config: &SimulationConfig,
	anchor: Option<&HtmlElement>,
) {
	let Some(anchor) = anchor else {
		return;
	};
	let written = anchor
		.style()
		.set_property("box-shadow", &box_shadow(state, config));
	report_write(written);
}

/// Log a failed style write. Returns whether the write went through.
fn report_write<E: std::fmt::Debug>(result: Result<(), E>) -> bool {
	match result {
		Ok(()) => true,
		Err(e) => {
			warn!("shadow-field: failed to write box-shadow: {:?}", e);
			false
		}
	}
}
