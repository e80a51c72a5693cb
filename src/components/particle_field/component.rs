//! Leptos component hosting the particle field.
//!
//! The component renders one small anchor `<div>` and paints every particle
//! as a layer of its `box-shadow`. Pointer, touch, keyboard and resize events
//! are bound on the window and forwarded to the simulation; a
//! [`FrameDriver`] runs physics and render once per animation frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

use super::config::SimulationConfig;
use super::driver::{FrameClock, FrameDriver};
use super::input::{KeyAction, PointerInput, apply_pointer};
use super::palette::PaletteSource;
use super::physics::update_particles;
use super::render::render_particles;
use super::state::{SimulationState, set_random_palette, spawn_particles};
use super::types::Viewport;

/// Bundles the simulation with everything needed to advance and mutate it.
struct FieldContext {
	state: SimulationState,
	config: SimulationConfig,
	palettes: PaletteSource,
	clock: FrameClock,
	rng: StdRng,
}

impl FieldContext {
	/// Build the field: pick a palette, then spawn `count` particles from it.
	fn new(
		viewport: Viewport,
		config: SimulationConfig,
		palettes: PaletteSource,
		count: usize,
		mut rng: StdRng,
	) -> Self {
		let mut state = SimulationState::new(viewport, &config);
		set_random_palette(&mut state, &palettes, &mut rng);
		spawn_particles(&mut state, count, &config, &mut rng);
		Self {
			clock: FrameClock::new(config.max_delta_time),
			state,
			config,
			palettes,
			rng,
		}
	}

	fn tick(&mut self, timestamp: f64, anchor: Option<&HtmlElement>) {
		self.clock.advance(&mut self.state, timestamp);
		update_particles(&mut self.state, &self.config);
		render_particles(&self.state, &self.config, anchor);
	}

	fn pointer(&mut self, input: PointerInput) {
		apply_pointer(&mut self.state, input, &self.config, &mut self.rng);
	}

	fn key(&mut self, action: KeyAction) {
		match action {
			KeyAction::SpawnBurst => {
				spawn_particles(
					&mut self.state,
					self.config.burst_count,
					&self.config,
					&mut self.rng,
				);
			}
			KeyAction::RerollPalette => {
				set_random_palette(&mut self.state, &self.palettes, &mut self.rng);
			}
		}
	}
}

/// A window event binding that unregisters itself when dropped.
struct WindowListener {
	event: &'static str,
	closure: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
	fn bind(window: &Window, event: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Self> {
		let closure = Closure::<dyn FnMut(Event)>::new(handler);
		// Non-passive so touch handlers may cancel scrolling.
		let options = AddEventListenerOptions::new();
		options.set_passive(false);
		window
			.add_event_listener_with_callback_and_add_event_listener_options(
				event,
				closure.as_ref().unchecked_ref(),
				&options,
			)
			.ok()?;
		Some(Self { event, closure })
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			let _ = window
				.remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
		}
	}
}

fn window_viewport(window: &Window) -> Viewport {
	let read = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	let fallback = Viewport::default();
	Viewport::new(
		read(window.inner_width(), fallback.width),
		read(window.inner_height(), fallback.height),
	)
}

/// Reduce a mouse or touch event to a [`PointerInput`].
fn pointer_input(ev: &Event) -> Option<PointerInput> {
	let kind = ev.type_();
	match kind.as_str() {
		"mousemove" | "mousedown" => {
			let mouse = ev.dyn_ref::<MouseEvent>()?;
			let (x, y) = (mouse.client_x() as f64, mouse.client_y() as f64);
			Some(if kind == "mousedown" {
				PointerInput::Press { x, y }
			} else {
				PointerInput::Move { x, y }
			})
		}
		"touchstart" | "touchmove" => {
			let touch = ev.unchecked_ref::<TouchEvent>().touches().get(0)?;
			let (x, y) = (touch.client_x() as f64, touch.client_y() as f64);
			Some(if kind == "touchstart" {
				PointerInput::Press { x, y }
			} else {
				PointerInput::Move { x, y }
			})
		}
		"mouseup" | "touchend" => Some(PointerInput::Release),
		_ => None,
	}
}

const POINTER_EVENTS: [&str; 6] = [
	"mousemove",
	"mousedown",
	"mouseup",
	"touchstart",
	"touchmove",
	"touchend",
];

/// Renders the particle field over the whole viewport.
///
/// Palettes come from the `palettes` signal; the initial particle count and an
/// optional capacity are read from the page query string.
#[component]
pub fn ParticleField(#[prop(into)] palettes: Signal<PaletteSource>) -> impl IntoView {
	let anchor_ref = NodeRef::<leptos::html::Div>::new();
	let context: Rc<RefCell<Option<FieldContext>>> = Rc::new(RefCell::new(None));
	let driver = Rc::new(FrameDriver::new());
	let listeners: Rc<RefCell<Vec<WindowListener>>> = Rc::new(RefCell::new(Vec::new()));
	let anchor_size = SimulationConfig::default().render_container_size;

	Effect::new(move |_| {
		if anchor_ref.get().is_none() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		// Drop bindings from an earlier run before wiring new ones.
		listeners.borrow_mut().clear();

		let search = window.location().search().unwrap_or_default();
		let config = SimulationConfig::from_query(&search);
		let count = config.initial_count(&search);
		let field = FieldContext::new(
			window_viewport(&window),
			config,
			palettes.get(),
			count,
			StdRng::from_entropy(),
		);
		info!(
			"shadow-field: {} particles, {} palettes",
			field.state.particles.len(),
			field.palettes.len()
		);
		*context.borrow_mut() = Some(field);

		let mut bound = Vec::new();
		for event in POINTER_EVENTS {
			let context_pointer = context.clone();
			bound.extend(WindowListener::bind(&window, event, move |ev: Event| {
				let Some(input) = pointer_input(&ev) else {
					return;
				};
				ev.prevent_default();
				if let Some(ref mut c) = *context_pointer.borrow_mut() {
					c.pointer(input);
				}
			}));
		}

		let context_key = context.clone();
		bound.extend(WindowListener::bind(&window, "keydown", move |ev: Event| {
			let Some(key) = ev.dyn_ref::<KeyboardEvent>() else {
				return;
			};
			if let Some(ref mut c) = *context_key.borrow_mut() {
				if let Some(action) = KeyAction::from_code(&key.code(), &c.config) {
					c.key(action);
				}
			}
		}));

		let context_resize = context.clone();
		bound.extend(WindowListener::bind(&window, "resize", move |_: Event| {
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				let Viewport { width, height } = window_viewport(&win);
				c.state.resize(width, height);
			}
		}));
		*listeners.borrow_mut() = bound;

		let context_anim = context.clone();
		driver.start(move |timestamp| {
			// The node ref is disposed with the component; treat that as no anchor.
			let anchor: Option<HtmlElement> = anchor_ref.try_get_untracked().flatten().map(Into::into);
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.tick(timestamp, anchor.as_ref());
			}
		});
	});

	let anchor_style = format!(
		"position: absolute; left: -{s}px; top: -{s}px; width: {s}px; height: {s}px; \
		 overflow: visible; border-radius: 500px;",
		s = anchor_size
	);

	view! { <div node_ref=anchor_ref id="render" style=anchor_style /> }
}
