//! Normalized pointer and keyboard input.
//!
//! Browser events are reduced to [`PointerInput`] and [`KeyAction`] values by
//! the component; the functions here apply them to the simulation state.

use rand::Rng;

use super::config::SimulationConfig;
use super::state::{SimulationState, unit};

/// A pointer or touch event in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
	/// `mousemove` / `touchmove`: retarget without engaging attraction.
	Move { x: f64, y: f64 },
	/// `mousedown` / `touchstart`: retarget, pick a new depth and engage.
	Press { x: f64, y: f64 },
	/// `mouseup` / `touchend`: disengage.
	Release,
}

/// Something a key press asks the field to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
	SpawnBurst,
	RerollPalette,
}

impl KeyAction {
	/// Map a `KeyboardEvent.code` to an action using the configured bindings.
	pub fn from_code(code: &str, config: &SimulationConfig) -> Option<Self> {
		if code == config.spawn_key {
			Some(Self::SpawnBurst)
		} else if code == config.palette_key {
			Some(Self::RerollPalette)
		} else {
			None
		}
	}
}

/// Apply one pointer event to the attraction target.
pub fn apply_pointer<R: Rng + ?Sized>(
	state: &mut SimulationState,
	input: PointerInput,
	config: &SimulationConfig,
	rng: &mut R,
) {
	match input {
		PointerInput::Move { x, y } => {
			state.pointer.x = x;
			state.pointer.y = y;
		}
		PointerInput::Press { x, y } => {
			let (base, span) = config.touch_depth;
			state.pointer.down = true;
			state.pointer.x = x;
			state.pointer.y = y;
			state.pointer.z = base + span * unit(rng);
		}
		PointerInput::Release => state.pointer.down = false,
	}
}
