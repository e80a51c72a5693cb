//! Tunable simulation parameters.
//!
//! Every constant the physics, spawner, input adapter and renderer rely on is
//! collected here so the effect can be tuned in one place. Defaults reproduce
//! the stock look; a handful of values can be overridden from the page query
//! string (see [`SimulationConfig::from_query`]).

/// Complete simulation configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
	/// Particles spawned at startup when the query string does not say otherwise.
	pub default_particle_count: usize,
	/// Base diameter of every spawned particle.
	pub particle_size: f64,
	/// Spawn depth is uniform in `[0, spawn_depth)`.
	pub spawn_depth: f64,
	/// Each spawn velocity component is uniform in `[0, spawn_speed)`.
	pub spawn_speed: f64,
	/// Upper bound of the z axis. The lower bound is always 0.
	pub depth_limit: f64,
	/// Per-step damping factor, further scaled by `1 - dt`.
	pub friction: f64,
	/// Longest step the frame clock will report, in seconds.
	pub max_delta_time: f64,
	/// Ceiling of the inverse-square attraction term.
	pub attraction_cap: f64,
	/// Numerator of the inverse-square attraction term.
	pub attraction_strength: f64,
	/// Multiplier applied after capping.
	pub attraction_scale: f64,
	/// Pointer depth on press is `base + span * rand`.
	pub touch_depth: (f64, f64),
	/// Edge length of the anchor element the shadows hang off.
	pub render_container_size: f64,
	/// Depth at which a particle renders at twice its base size.
	pub depth_scale: f64,
	/// Particles added by the spawn key.
	pub burst_count: usize,
	/// `KeyboardEvent.code` that spawns a burst.
	pub spawn_key: String,
	/// `KeyboardEvent.code` that rerolls the palette.
	pub palette_key: String,
	/// Optional hard cap on the particle count. `None` lets spawns grow forever.
	pub max_particles: Option<usize>,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			default_particle_count: 300,
			particle_size: 6.0,
			spawn_depth: 100.0,
			spawn_speed: 60.0,
			depth_limit: 400.0,
			friction: 0.99999,
			max_delta_time: 2.0,
			attraction_cap: 1600.0,
			attraction_strength: 25_830_000.0,
			attraction_scale: 2.0,
			touch_depth: (10.0, 25.0),
			render_container_size: 32.0,
			depth_scale: 30.0,
			burst_count: 5,
			spawn_key: "Space".to_string(),
			palette_key: "KeyC".to_string(),
			max_particles: None,
		}
	}
}

impl SimulationConfig {
	/// Build a config from `location.search` (with or without the leading `?`).
	///
	/// The first parameter's value, whatever its key, sets the initial particle
	/// count. `max=<n>` sets a particle capacity.
	pub fn from_query(search: &str) -> Self {
		let mut config = Self::default();
		let query = search.strip_prefix('?').unwrap_or(search);
		if let Some(cap) = query
			.split('&')
			.filter_map(|pair| pair.split_once('='))
			.find(|(key, _)| *key == "max")
			.and_then(|(_, value)| parse_int_prefix(value))
		{
			config.max_particles = Some(cap);
		}
		config
	}

	/// Initial particle count requested by the query string.
	///
	/// Zero, garbage and absent values all fall back to
	/// [`default_particle_count`](Self::default_particle_count).
	pub fn initial_count(&self, search: &str) -> usize {
		let query = search.strip_prefix('?').unwrap_or(search);
		query
			.split('&')
			.next()
			.and_then(|pair| pair.split_once('='))
			.and_then(|(_, value)| parse_int_prefix(value))
			.filter(|&count| count > 0)
			.unwrap_or(self.default_particle_count)
	}
}

/// Parse the leading run of ASCII digits, ignoring anything after it.
fn parse_int_prefix(value: &str) -> Option<usize> {
	let value = value.trim_start();
	let end = value
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(value.len());
	value[..end].parse().ok()
}
