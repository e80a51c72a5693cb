//! shadow-field: an animated particle field drawn entirely with `box-shadow`.
//!
//! This crate provides a WASM-based Leptos component that simulates a few
//! hundred drifting particles, pulls them toward a held pointer, and paints
//! them as shadow layers of a single element.

// Only needed for its `js` feature, which lets `rand` seed from the browser.
use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{PaletteError, PaletteSource, ParticleField, SimulationConfig};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("shadow-field: logging initialized");
}

/// Load palettes from a script element with id="palette-data".
/// Expected format: JSON array of color arrays, e.g. `[["#fff", "#000"]]`.
fn load_palettes() -> Option<PaletteSource> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("palette-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match PaletteSource::from_json(&json_text) {
		Ok(source) => {
			info!("shadow-field: loaded {} palettes", source.len());
			Some(source)
		}
		Err(e) => {
			warn!("shadow-field: failed to load palette data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads palettes from the DOM and renders the particle field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let palettes = load_palettes().unwrap_or_default();
	let palette_signal = Signal::derive(move || palettes.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="shadow-field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleField palettes=palette_signal />
	}
}
