use rand::RngCore;

use super::generate::{self, NEIGHBOR_DISTANCE};
use super::render::Surface;
use super::state::Scene;
use super::types::{Dimensions, Node, Pointer, Rgba, SceneConfig};

pub const NODE_RADIUS: f64 = 2.0;
pub const NODE_COLOR: Rgba = Rgba::new(157, 78, 221, 1.0);
pub const LINE_WIDTH: f64 = 1.0;

pub const DEFAULT_CONFIG: SceneConfig = SceneConfig {
	density: 15.0,
	opacity: 0.3,
};

/// Drifting nodes joined to the neighbors they had at spawn time.
#[derive(Clone, Debug)]
pub struct PolygonField {
	config: SceneConfig,
	nodes: Vec<Node>,
}

impl PolygonField {
	pub fn new(config: SceneConfig) -> Self {
		Self {
			config,
			nodes: Vec::new(),
		}
	}

	#[cfg(test)]
	pub fn with_nodes(config: SceneConfig, nodes: Vec<Node>) -> Self {
		Self { config, nodes }
	}

	#[cfg(test)]
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}
}

impl Default for PolygonField {
	fn default() -> Self {
		Self::new(DEFAULT_CONFIG)
	}
}

/// Reverses `velocity` on touching an edge and keeps `value` inside `[0, max]`.
fn bounce(value: &mut f64, velocity: &mut f64, max: f64) {
	if *value <= 0.0 || *value >= max {
		*velocity = -*velocity;
	}
	*value = value.clamp(0.0, max.max(0.0));
}

/// Line alpha fades linearly to zero at [`NEIGHBOR_DISTANCE`].
pub fn link_alpha(opacity: f64, distance: f64) -> f64 {
	opacity * (1.0 - distance / NEIGHBOR_DISTANCE) * 0.4
}

impl Scene for PolygonField {
	const NAME: &'static str = "polygons";

	fn regenerate(&mut self, rng: &mut dyn RngCore, dims: Dimensions) {
		self.nodes = generate::spawn_nodes(rng, dims, self.config.density);
	}

	fn len(&self) -> usize {
		self.nodes.len()
	}

	fn step(&mut self, dims: Dimensions, _pointer: Pointer) {
		for node in &mut self.nodes {
			node.position += node.velocity;
			bounce(&mut node.position.x, &mut node.velocity.x, dims.width);
			bounce(&mut node.position.y, &mut node.velocity.y, dims.height);
		}
	}

	fn render<S: Surface + ?Sized>(&self, surface: &mut S, dims: Dimensions) {
		surface.clear(dims.width, dims.height);
		let fill = NODE_COLOR.with_alpha(self.config.opacity * 0.6);

		for node in &self.nodes {
			surface.fill_circle(node.position, NODE_RADIUS, fill, 1.0);

			// Links that drifted past the threshold stay in the list but are skipped.
			for &j in &node.connections {
				let Some(other) = self.nodes.get(j) else {
					continue;
				};
				let distance = node.position.distance(other.position);
				if distance < NEIGHBOR_DISTANCE {
					let stroke = NODE_COLOR.with_alpha(link_alpha(self.config.opacity, distance));
					surface.stroke_line(node.position, other.position, stroke, 1.0, LINE_WIDTH);
				}
			}
		}
	}
}
