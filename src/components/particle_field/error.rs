//! Error types for palette data loading.

use thiserror::Error;

/// Errors raised while reading the palette collection.
#[derive(Debug, Error)]
pub enum PaletteError {
	/// The palette payload is not a JSON array of string arrays.
	#[error("invalid palette JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// The payload parsed but contained no palettes.
	#[error("palette collection is empty")]
	Empty,

	/// One of the palettes has no colors.
	#[error("palette {0} has no colors")]
	EmptySet(usize),
}
