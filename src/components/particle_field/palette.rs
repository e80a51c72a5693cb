//! Color palettes for the particle field.
//!
//! A [`PaletteSource`] is the read-only collection of color sets loaded once
//! at startup; the simulation holds one [`Palette`] from it as the active set.
//! Pages normally supply the collection as JSON, and [`PaletteSource::builtin`]
//! covers pages that don't.

use rand::Rng;
use serde::Deserialize;

use super::error::PaletteError;

/// RGB color used to describe the built-in palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Color {
	r: u8,
	g: u8,
	b: u8,
}

impl Color {
	pub(crate) const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	pub(crate) fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// A non-empty ordered set of CSS color strings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Palette {
	colors: Vec<String>,
}

impl Palette {
	/// Wrap a color list, rejecting empty ones.
	pub fn new(colors: Vec<String>) -> Option<Self> {
		if colors.is_empty() {
			None
		} else {
			Some(Self { colors })
		}
	}

	fn from_colors(colors: &[Color]) -> Self {
		Self {
			colors: colors.iter().map(|c| c.to_css_rgb()).collect(),
		}
	}

	pub fn colors(&self) -> &[String] {
		&self.colors
	}

	pub fn contains(&self, color: &str) -> bool {
		self.colors.iter().any(|c| c == color)
	}

	/// Pick one color uniformly at random.
	pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
		&self.colors[rng.gen_range(0..self.colors.len())]
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::from_colors(&NEON)
	}
}

/// Saturated neon accents (default).
const NEON: [Color; 5] = [
	Color::rgb(255, 0, 110),   // Hot pink
	Color::rgb(251, 86, 7),    // Blaze
	Color::rgb(255, 190, 11),  // Amber
	Color::rgb(131, 56, 236),  // Violet
	Color::rgb(58, 134, 255),  // Azure
];

/// Warm sunset tones.
const SUNSET: [Color; 5] = [
	Color::rgb(249, 65, 68),   // Red
	Color::rgb(243, 114, 44),  // Orange
	Color::rgb(248, 150, 30),  // Tangerine
	Color::rgb(249, 199, 79),  // Saffron
	Color::rgb(144, 190, 109), // Pistachio
];

/// Ocean depths, blues and teals.
const OCEAN: [Color; 5] = [
	Color::rgb(3, 4, 94),      // Navy
	Color::rgb(0, 119, 182),   // Cerulean
	Color::rgb(0, 180, 216),   // Sky
	Color::rgb(144, 224, 239), // Ice
	Color::rgb(202, 240, 248), // Foam
];

/// Soft pastels.
const PASTEL: [Color; 5] = [
	Color::rgb(255, 173, 173), // Rose
	Color::rgb(255, 214, 165), // Peach
	Color::rgb(253, 255, 182), // Butter
	Color::rgb(202, 255, 191), // Mint
	Color::rgb(155, 246, 255), // Aqua
];

/// Cool teals and purples.
const AURORA: [Color; 5] = [
	Color::rgb(100, 145, 135), // Eucalyptus
	Color::rgb(115, 135, 155), // Slate
	Color::rgb(130, 120, 150), // Wisteria
	Color::rgb(120, 130, 160), // Periwinkle
	Color::rgb(135, 140, 150), // Pewter
];

/// The collection of color sets the active palette is drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteSource {
	palettes: Vec<Palette>,
}

impl PaletteSource {
	/// Palettes compiled into the crate.
	pub fn builtin() -> Self {
		Self {
			palettes: [&NEON, &SUNSET, &OCEAN, &PASTEL, &AURORA]
				.into_iter()
				.map(|set| Palette::from_colors(set))
				.collect(),
		}
	}

	/// Parse a JSON array of color arrays, e.g. `[["#f00", "#0f0"], ["red"]]`.
	pub fn from_json(json: &str) -> Result<Self, PaletteError> {
		let palettes: Vec<Palette> = serde_json::from_str(json)?;
		if palettes.is_empty() {
			return Err(PaletteError::Empty);
		}
		if let Some(i) = palettes.iter().position(|p| p.colors.is_empty()) {
			return Err(PaletteError::EmptySet(i));
		}
		Ok(Self { palettes })
	}

	pub fn len(&self) -> usize {
		self.palettes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.palettes.is_empty()
	}

	pub fn palettes(&self) -> &[Palette] {
		&self.palettes
	}

	/// Pick one palette uniformly at random.
	pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Palette {
		&self.palettes[rng.gen_range(0..self.palettes.len())]
	}
}

impl Default for PaletteSource {
	fn default() -> Self {
		Self::builtin()
	}
}
