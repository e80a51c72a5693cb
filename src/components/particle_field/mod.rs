//! Box-shadow particle field component.
//!
//! Draws a drifting cloud of particles without a canvas: each particle is one
//! layer of a single element's `box-shadow`. Includes:
//! - Bounded 3D drift with elastic edge reflection and friction
//! - Inverse-square attraction toward a held pointer or touch
//! - Palette rerolls and particle bursts from the keyboard
//! - Depth-sorted, depth-scaled shadow serialization
//!
//! # Example
//!
//! ```ignore
//! use shadow_field::{ParticleField, PaletteSource};
//!
//! let palettes = PaletteSource::builtin();
//! view! { <ParticleField palettes=Signal::derive(move || palettes.clone()) /> }
//! ```

mod component;
pub mod config;
mod driver;
mod error;
mod input;
pub mod palette;
mod physics;
mod render;
mod state;
mod types;

pub use component::ParticleField;
pub use config::SimulationConfig;
pub use driver::{DriverCore, DriverPhase, FrameClock, FrameDriver, FrameScheduler, WindowScheduler};
pub use error::PaletteError;
pub use input::{KeyAction, PointerInput};
pub use palette::{Palette, PaletteSource};
pub use render::box_shadow;
pub use state::{PointerState, SimulationState};
pub use types::{Particle, Viewport};
