use glam::DVec2;
use log::debug;
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::render::Surface;
use super::types::{Dimensions, Pointer};

/// One decorative scene: a set of entities that can be rebuilt, stepped and drawn.
pub trait Scene {
	/// Short name used in log lines.
	const NAME: &'static str;

	/// Discards every entity and spawns a fresh set for `dims`.
	fn regenerate(&mut self, rng: &mut dyn RngCore, dims: Dimensions);

	fn len(&self) -> usize;

	/// Advances one frame. Positions are inside `dims` afterwards.
	fn step(&mut self, dims: Dimensions, pointer: Pointer);

	fn render<S: Surface + ?Sized>(&self, surface: &mut S, dims: Dimensions);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// No usable size seen yet.
	Idle,
	Running,
}

/// Owns a scene plus everything a frame needs: the random source, the latest
/// size and the latest pointer. Events only overwrite those; the next frame
/// picks them up.
pub struct Animator<S> {
	scene: S,
	rng: SmallRng,
	dims: Dimensions,
	pointer: Pointer,
	phase: Phase,
}

impl<S: Scene> Animator<S> {
	pub fn new(scene: S, seed: u64) -> Self {
		Self {
			scene,
			rng: SmallRng::seed_from_u64(seed),
			dims: Dimensions::default(),
			pointer: Pointer::default(),
			phase: Phase::Idle,
		}
	}

	#[cfg(test)]
	pub fn phase(&self) -> Phase {
		self.phase
	}

	#[cfg(test)]
	pub fn dimensions(&self) -> Dimensions {
		self.dims
	}

	#[cfg(test)]
	pub fn scene(&self) -> &S {
		&self.scene
	}

	/// Regenerates the scene for a new box. An empty box before the first
	/// successful sizing leaves the animator idle.
	pub fn resize(&mut self, dims: Dimensions) {
		if self.phase == Phase::Idle && dims.is_empty() {
			debug!("{}: container not ready, staying idle", S::NAME);
			return;
		}
		self.dims = dims;
		self.scene.regenerate(&mut self.rng, dims);
		self.phase = Phase::Running;
		debug!(
			"{}: {}x{} -> {} entities",
			S::NAME,
			dims.width,
			dims.height,
			self.scene.len()
		);
	}

	pub fn pointer_moved(&mut self, position: DVec2) {
		self.pointer = Pointer {
			position,
			inside: true,
		};
	}

	pub fn pointer_left(&mut self) {
		self.pointer.inside = false;
	}

	/// Steps and redraws. Returns `false` while idle, leaving the surface untouched.
	pub fn frame<T: Surface + ?Sized>(&mut self, surface: &mut T) -> bool {
		if self.phase == Phase::Idle {
			return false;
		}
		self.scene.step(self.dims, self.pointer);
		self.scene.render(surface, self.dims);
		true
	}
}
