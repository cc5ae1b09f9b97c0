use glam::DVec2;
use rand::RngCore;

use super::generate;
use super::render::Surface;
use super::state::Scene;
use super::types::{Dimensions, Particle, Pointer, Rgba, SceneConfig};

/// Particles closer than this get a connecting line.
pub const LINK_DISTANCE: f64 = 100.0;
pub const LINK_ALPHA: f64 = 0.2;
pub const LINK_WIDTH: f64 = 0.5;
pub const LINK_COLOR: Rgba = Rgba::new(255, 255, 255, 0.5);
/// The pointer only affects particles inside this radius.
pub const POINTER_RADIUS: f64 = 150.0;
pub const POINTER_FORCE: f64 = 0.01;

pub const DEFAULT_CONFIG: SceneConfig = SceneConfig {
	density: 15.0,
	opacity: 1.0,
};

/// Free-floating particles that wrap at the edges and shy away from the pointer.
#[derive(Clone, Debug)]
pub struct ParticleField {
	config: SceneConfig,
	particles: Vec<Particle>,
}

impl ParticleField {
	pub fn new(config: SceneConfig) -> Self {
		Self {
			config,
			particles: Vec::new(),
		}
	}

	#[cfg(test)]
	pub fn with_particles(config: SceneConfig, particles: Vec<Particle>) -> Self {
		Self { config, particles }
	}

	#[cfg(test)]
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}
}

impl Default for ParticleField {
	fn default() -> Self {
		Self::new(DEFAULT_CONFIG)
	}
}

/// Leaving one edge puts the coordinate on the opposite edge.
fn wrap(value: f64, max: f64) -> f64 {
	if value < 0.0 {
		max
	} else if value > max {
		0.0
	} else {
		value
	}
}

/// Velocity change for a particle at `position`. Zero outside [`POINTER_RADIUS`].
pub fn pointer_push(position: DVec2, pointer: DVec2) -> DVec2 {
	let offset = pointer - position;
	let distance = offset.length();
	if distance >= POINTER_RADIUS {
		return DVec2::ZERO;
	}
	let force = (POINTER_RADIUS - distance) / POINTER_RADIUS;
	-offset * force * POINTER_FORCE
}

impl Scene for ParticleField {
	const NAME: &'static str = "particles";

	fn regenerate(&mut self, rng: &mut dyn RngCore, dims: Dimensions) {
		self.particles = generate::spawn_particles(rng, dims, self.config.density);
	}

	fn len(&self) -> usize {
		self.particles.len()
	}

	fn step(&mut self, dims: Dimensions, pointer: Pointer) {
		for p in &mut self.particles {
			p.position += p.velocity;
			p.position.x = wrap(p.position.x, dims.width);
			p.position.y = wrap(p.position.y, dims.height);

			// No damping: speed keeps growing while the pointer lingers.
			if pointer.inside {
				p.velocity += pointer_push(p.position, pointer.position);
			}
		}
	}

	fn render<S: Surface + ?Sized>(&self, surface: &mut S, dims: Dimensions) {
		surface.clear(dims.width, dims.height);
		for p in &self.particles {
			surface.fill_circle(p.position, p.size, p.color, p.opacity * self.config.opacity);
		}

		let alpha = LINK_ALPHA * self.config.opacity;
		for (i, a) in self.particles.iter().enumerate() {
			for b in &self.particles[i + 1..] {
				if a.position.distance(b.position) < LINK_DISTANCE {
					surface.stroke_line(a.position, b.position, LINK_COLOR, alpha, LINK_WIDTH);
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::super::render::recording::{Op, RecordingSurface};
	use super::*;

	const DIMS: Dimensions = Dimensions {
		width: 200.0,
		height: 100.0,
	};

	fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
		Particle {
			position: DVec2::new(x, y),
			velocity: DVec2::new(vx, vy),
			size: 2.0,
			color: generate::PARTICLE_PALETTE[0],
			opacity: 0.5,
		}
	}

	fn field(particles: Vec<Particle>) -> ParticleField {
		ParticleField::with_particles(DEFAULT_CONFIG, particles)
	}

	#[test]
	fn wraps_at_every_edge() {
		let mut f = field(vec![
			particle(199.9, 50.0, 0.5, 0.0),
			particle(0.1, 50.0, -0.5, 0.0),
			particle(100.0, 99.9, 0.0, 0.5),
			particle(100.0, 0.1, 0.0, -0.5),
		]);
		f.step(DIMS, Pointer::default());

		let positions: Vec<DVec2> = f.particles().iter().map(|p| p.position).collect();
		assert_eq!(positions[0], DVec2::new(0.0, 50.0));
		assert_eq!(positions[1], DVec2::new(200.0, 50.0));
		assert_eq!(positions[2], DVec2::new(100.0, 0.0));
		assert_eq!(positions[3], DVec2::new(100.0, 100.0));
	}

	#[test]
	fn positions_stay_in_bounds() {
		let mut f = field(vec![
			particle(10.0, 10.0, 3.0, -7.0),
			particle(190.0, 90.0, 4.0, 4.0),
			particle(0.0, 0.0, -0.2, -0.2),
		]);
		for _ in 0..500 {
			f.step(DIMS, Pointer::default());
			assert!(f.particles().iter().all(|p| DIMS.contains(p.position)));
		}
	}

	#[test]
	fn pointer_nearby_pushes_particle() {
		let pointer = Pointer {
			position: DVec2::new(100.0, 100.0),
			inside: true,
		};
		let dims = Dimensions::new(2000.0, 2000.0);
		let mut f = field(vec![
			particle(150.0, 100.0, 0.0, 0.0),
			particle(1100.0, 100.0, 0.0, 0.0),
		]);
		f.step(dims, pointer);

		let (near, far) = (f.particles()[0].velocity, f.particles()[1].velocity);
		assert_eq!(far, DVec2::ZERO);
		assert!(near.x != 0.0);
		assert_eq!(near.y, 0.0);
		// (150 - 50) / 150 * 50 * 0.01
		assert!((near.x - 1.0 / 3.0).abs() < 1e-12);
	}

	#[test]
	fn pointer_outside_canvas_is_ignored() {
		let pointer = Pointer {
			position: DVec2::new(100.0, 50.0),
			inside: false,
		};
		let mut f = field(vec![particle(110.0, 50.0, 0.0, 0.0)]);
		f.step(DIMS, pointer);
		assert_eq!(f.particles()[0].velocity, DVec2::ZERO);
	}

	#[test]
	fn pointer_push_accumulates() {
		let pointer = Pointer {
			position: DVec2::new(100.0, 50.0),
			inside: true,
		};
		let mut f = field(vec![particle(120.0, 50.0, 0.0, 0.0)]);
		f.step(DIMS, pointer);
		let first = f.particles()[0].velocity.x;
		f.step(DIMS, pointer);
		assert!(f.particles()[0].velocity.x > first);
	}

	#[test]
	fn close_pair_gets_one_faint_line() {
		let f = field(vec![
			particle(10.0, 10.0, 0.0, 0.0),
			particle(50.0, 10.0, 0.0, 0.0),
			particle(190.0, 90.0, 0.0, 0.0),
		]);
		let mut surface = RecordingSurface::default();
		f.render(&mut surface, DIMS);

		assert_eq!(surface.ops[0], Op::Clear(200.0, 100.0));
		assert_eq!(surface.circles().len(), 3);
		assert_eq!(
			surface.lines(),
			vec![&Op::Line {
				from: DVec2::new(10.0, 10.0),
				to: DVec2::new(50.0, 10.0),
				color: LINK_COLOR,
				alpha: 0.2,
				width: LINK_WIDTH,
			}]
		);
	}

	#[test]
	fn particle_alpha_scales_with_opacity() {
		let config = SceneConfig {
			density: 15.0,
			opacity: 0.5,
		};
		let f = ParticleField::with_particles(config, vec![particle(10.0, 10.0, 0.0, 0.0)]);
		let mut surface = RecordingSurface::default();
		f.render(&mut surface, DIMS);

		let circles = surface.circles();
		let Op::Circle { alpha, radius, .. } = circles[0] else {
			panic!("expected a circle");
		};
		assert_eq!(*alpha, 0.25);
		assert_eq!(*radius, 2.0);
	}
}
