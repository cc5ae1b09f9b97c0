use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;

/// Shared stop flag. Cloning shares the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
	pub fn cancel(&self) {
		self.0.set(true);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.get()
	}
}

/// Whatever hands out frame callbacks: the browser, or a fake in tests.
pub trait FrameScheduler {
	/// Asks for one more frame. `None` when the host refused.
	fn request_frame(&self) -> Option<i32>;
	fn cancel_frame(&self, id: i32);
	/// Drops the frame callback.
	fn release(&self);
}

/// Token plus the id of the frame that is currently scheduled.
#[derive(Debug, Default)]
pub struct LoopState {
	token: CancelToken,
	pending: Cell<Option<i32>>,
}

impl LoopState {
	/// Schedules the first frame. On refusal the callback is released, since
	/// nothing will ever run it.
	pub fn begin<S: FrameScheduler + ?Sized>(&self, scheduler: &S) -> bool {
		if self.schedule(scheduler) {
			return true;
		}
		self.token.cancel();
		scheduler.release();
		false
	}

	fn schedule<S: FrameScheduler + ?Sized>(&self, scheduler: &S) -> bool {
		match scheduler.request_frame() {
			Some(id) => {
				self.pending.set(Some(id));
				true
			}
			None => {
				warn!("frame loop: could not schedule next frame");
				false
			}
		}
	}

	/// One iteration. Returns whether `on_frame` ran.
	pub fn run_frame<S, F>(&self, scheduler: &S, on_frame: &mut F) -> bool
	where
		S: FrameScheduler + ?Sized,
		F: FnMut() + ?Sized,
	{
		self.pending.set(None);
		if self.token.is_cancelled() {
			return false;
		}
		on_frame();
		// `on_frame` may have stopped the loop itself.
		if !self.token.is_cancelled() {
			self.schedule(scheduler);
		}
		true
	}

	/// Flips the token and cancels the pending frame. Idempotent.
	pub fn halt<S: FrameScheduler + ?Sized>(&self, scheduler: &S) {
		if self.token.is_cancelled() {
			return;
		}
		self.token.cancel();
		if let Some(id) = self.pending.take() {
			scheduler.cancel_frame(id);
		}
		scheduler.release();
	}
}

/// requestAnimationFrame with the callback it keeps re-registering.
#[derive(Default)]
struct BrowserFrames {
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameScheduler for BrowserFrames {
	fn request_frame(&self) -> Option<i32> {
		let window = web_sys::window()?;
		let callback = self.callback.borrow();
		window
			.request_animation_frame(callback.as_ref()?.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&self, id: i32) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(id);
		}
	}

	fn release(&self) {
		// Breaks the closure's reference to itself.
		self.callback.borrow_mut().take();
	}
}

/// A requestAnimationFrame loop owned by one animator.
///
/// Each iteration checks the token before doing any work and only then
/// schedules the next frame, so frames never overlap.
pub struct FrameLoop {
	state: Rc<LoopState>,
	frames: Rc<BrowserFrames>,
}

impl FrameLoop {
	pub fn start(mut on_frame: impl FnMut() + 'static) -> Option<Self> {
		let (state, frames) = (Rc::new(LoopState::default()), Rc::new(BrowserFrames::default()));

		let (state_cb, frames_cb) = (state.clone(), frames.clone());
		*frames.callback.borrow_mut() = Some(Closure::new(move || {
			state_cb.run_frame(&*frames_cb, &mut on_frame);
		}));

		if !state.begin(&*frames) {
			return None;
		}
		debug!("frame loop started");
		Some(Self { state, frames })
	}

	/// Flips the token, cancels the pending frame and drops the closure.
	pub fn stop(&self) {
		self.state.halt(&*self.frames);
		debug!("frame loop stopped");
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}
