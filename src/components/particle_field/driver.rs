//! Frame timing and the `requestAnimationFrame` loop.
//!
//! [`FrameClock`] turns raw frame timestamps into a clamped step length and is
//! independent of the browser. [`FrameDriver`] owns the frame loop: it is the
//! only place a frame handle lives, restarting it cancels the loop it started
//! before, and dropping it cancels the pending frame.
//!
//! Scheduling goes through [`FrameScheduler`]. The browser implementation,
//! [`WindowScheduler`], wraps `requestAnimationFrame`; its JS callback only
//! holds a weak reference back to the driver, so nothing keeps a dropped
//! driver's loop alive.

use std::cell::{Cell, OnceCell, RefCell};
use std::rc::{Rc, Weak};

use log::debug;
use wasm_bindgen::prelude::*;

use super::state::SimulationState;

/// Advances the timing fields of a [`SimulationState`].
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
	max_delta_time: f64,
}

impl FrameClock {
	pub fn new(max_delta_time: f64) -> Self {
		Self { max_delta_time }
	}

	/// Record a tick at `timestamp` (milliseconds) and return the step length
	/// in seconds, capped at the configured maximum. A clock running backwards
	/// yields a zero step.
	pub fn advance(&self, state: &mut SimulationState, timestamp: f64) -> f64 {
		state.frame += 1;
		let elapsed = (timestamp - state.prev_frame_start_time) / 1000.0;
		state.delta_time = elapsed.clamp(0.0, self.max_delta_time);
		state.prev_frame_start_time = timestamp;
		state.delta_time
	}
}

/// Lifecycle of a [`FrameDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverPhase {
	Idle,
	Running,
}

/// Host primitive that calls a driver back once per frame.
pub trait FrameScheduler: Sized + 'static {
	/// Ask for one call to [`DriverCore::fire`] on `core` at the next frame.
	fn request_frame(&self, core: &Weak<DriverCore<Self>>) -> Option<i32>;

	/// Withdraw a request made by [`request_frame`](Self::request_frame).
	fn cancel_frame(&self, handle: i32);
}

/// Shared state behind a [`FrameDriver`], reachable from scheduled callbacks.
pub struct DriverCore<S: FrameScheduler> {
	scheduler: S,
	handle: Cell<Option<i32>>,
	on_frame: RefCell<Option<Box<dyn FnMut(f64)>>>,
}

impl<S: FrameScheduler> DriverCore<S> {
	/// Run one frame and, if still running, schedule the next.
	pub fn fire(self: &Rc<Self>, timestamp: f64) {
		self.handle.set(None);
		{
			let mut on_frame = self.on_frame.borrow_mut();
			let Some(on_frame) = on_frame.as_mut() else {
				return;
			};
			on_frame(timestamp);
		}
		if self.on_frame.borrow().is_some() {
			let handle = self.scheduler.request_frame(&Rc::downgrade(self));
			self.handle.set(handle);
		}
	}
}

/// Drives a per-frame callback through a [`FrameScheduler`].
pub struct FrameDriver<S: FrameScheduler = WindowScheduler> {
	core: Rc<DriverCore<S>>,
}

impl FrameDriver<WindowScheduler> {
	/// Driver backed by the window's `requestAnimationFrame`.
	pub fn new() -> Self {
		Self::with_scheduler(WindowScheduler::default())
	}
}

impl Default for FrameDriver<WindowScheduler> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: FrameScheduler> FrameDriver<S> {
	pub fn with_scheduler(scheduler: S) -> Self {
		Self {
			core: Rc::new(DriverCore {
				scheduler,
				handle: Cell::new(None),
				on_frame: RefCell::new(None),
			}),
		}
	}

	pub fn phase(&self) -> DriverPhase {
		if self.core.on_frame.borrow().is_some() {
			DriverPhase::Running
		} else {
			DriverPhase::Idle
		}
	}

	/// Start calling `on_frame` with the frame timestamp every frame.
	///
	/// Any loop this driver started earlier is cancelled first. The first
	/// frame runs immediately with timestamp `0`.
	pub fn start<F>(&self, on_frame: F)
	where
		F: FnMut(f64) + 'static,
	{
		if self.phase() == DriverPhase::Running {
			debug!("shadow-field: restarting frame loop");
		}
		self.stop();
		*self.core.on_frame.borrow_mut() = Some(Box::new(on_frame));
		self.core.fire(0.0);
	}

	/// Cancel the pending frame, if any, and drop the callback.
	pub fn stop(&self) {
		if let Some(id) = self.core.handle.take() {
			self.core.scheduler.cancel_frame(id);
		}
		// Released outside the borrow so the callback's own drop can't re-enter.
		let released = self.core.on_frame.borrow_mut().take();
		drop(released);
	}
}

impl<S: FrameScheduler> Drop for FrameDriver<S> {
	fn drop(&mut self) {
		self.stop();
	}
}

/// [`FrameScheduler`] backed by `window.requestAnimationFrame`.
#[derive(Default)]
pub struct WindowScheduler {
	callback: OnceCell<Closure<dyn FnMut(f64)>>,
}

impl FrameScheduler for WindowScheduler {
	fn request_frame(&self, core: &Weak<DriverCore<Self>>) -> Option<i32> {
		let callback = self.callback.get_or_init(|| {
			let core = core.clone();
			Closure::new(move |timestamp: f64| {
				if let Some(core) = core.upgrade() {
					core.fire(timestamp);
				}
			})
		});
		web_sys::window()?
			.request_animation_frame(callback.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&self, handle: i32) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle);
		}
	}
}
