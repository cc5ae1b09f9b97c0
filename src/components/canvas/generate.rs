//! Entity generation for both scene variants.
//!
//! Every function takes its random source as a parameter, so a seeded
//! generator reproduces the same layout for the same dimensions.

use glam::DVec2;
use rand::Rng;

use super::types::{Dimensions, Node, Particle, Rgba};

/// Orange, light orange, purple, blue.
pub const PARTICLE_PALETTE: [Rgba; 4] = [
	Rgba::new(255, 107, 53, 0.8),
	Rgba::new(247, 147, 30, 0.8),
	Rgba::new(157, 78, 221, 0.8),
	Rgba::new(77, 24, 255, 0.8),
];

/// Largest velocity component magnitude at spawn, in px per frame.
pub const MAX_SPAWN_SPEED: f64 = 0.25;
/// Nodes closer than this at spawn become neighbors.
pub const NEIGHBOR_DISTANCE: f64 = 120.0;
pub const MAX_CONNECTIONS: usize = 3;

/// `floor(area / (density * 1000))`. Zero for unusable input.
pub fn entity_count(dims: Dimensions, density: f64) -> usize {
	if dims.is_empty() || !(density.is_finite() && density > 0.0) {
		return 0;
	}
	(dims.area() / (density * 1000.0)).floor() as usize
}

fn spawn_position<R: Rng + ?Sized>(rng: &mut R, dims: Dimensions) -> DVec2 {
	DVec2::new(
		rng.r#gen::<f64>() * dims.width,
		rng.r#gen::<f64>() * dims.height,
	)
}

fn spawn_velocity<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
	DVec2::new(
		rng.gen_range(-MAX_SPAWN_SPEED..MAX_SPAWN_SPEED),
		rng.gen_range(-MAX_SPAWN_SPEED..MAX_SPAWN_SPEED),
	)
}

pub fn spawn_particles<R: Rng + ?Sized>(
	rng: &mut R,
	dims: Dimensions,
	density: f64,
) -> Vec<Particle> {
	(0..entity_count(dims, density))
		.map(|_| Particle {
			position: spawn_position(rng, dims),
			velocity: spawn_velocity(rng),
			size: rng.gen_range(1.0..4.0),
			color: PARTICLE_PALETTE[rng.gen_range(0..PARTICLE_PALETTE.len())],
			opacity: rng.gen_range(0.1..0.6),
		})
		.collect()
}

/// Spawns nodes and links them with [`link_neighbors`].
pub fn spawn_nodes<R: Rng + ?Sized>(rng: &mut R, dims: Dimensions, density: f64) -> Vec<Node> {
	let mut nodes: Vec<Node> = (0..entity_count(dims, density))
		.map(|_| Node {
			position: spawn_position(rng, dims),
			velocity: spawn_velocity(rng),
			connections: Vec::with_capacity(MAX_CONNECTIONS),
		})
		.collect();
	link_neighbors(&mut nodes);
	nodes
}

/// Gives each node the first [`MAX_CONNECTIONS`] other nodes, in index order,
/// that lie within [`NEIGHBOR_DISTANCE`]. This is not a nearest-k search.
pub fn link_neighbors(nodes: &mut [Node]) {
	let positions: Vec<DVec2> = nodes.iter().map(|n| n.position).collect();
	for (i, node) in nodes.iter_mut().enumerate() {
		node.connections = positions
			.iter()
			.enumerate()
			.filter(|&(j, other)| j != i && node.position.distance(*other) < NEIGHBOR_DISTANCE)
			.map(|(j, _)| j)
			.take(MAX_CONNECTIONS)
			.collect();
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn node_at(x: f64, y: f64) -> Node {
		Node {
			position: DVec2::new(x, y),
			velocity: DVec2::ZERO,
			connections: Vec::new(),
		}
	}

	#[test]
	fn count_follows_area_over_density() {
		let dims = Dimensions::new(800.0, 600.0);
		assert_eq!(entity_count(dims, 15.0), 32);
		assert_eq!(entity_count(dims, 40.0), 12);
		assert_eq!(entity_count(Dimensions::new(10.0, 10.0), 15.0), 0);
	}

	#[test]
	fn count_is_zero_for_unusable_input() {
		let dims = Dimensions::new(800.0, 600.0);
		assert_eq!(entity_count(dims, 0.0), 0);
		assert_eq!(entity_count(dims, -3.0), 0);
		assert_eq!(entity_count(dims, f64::NAN), 0);
		assert_eq!(entity_count(Dimensions::default(), 15.0), 0);
	}

	#[test]
	fn spawned_particles_match_count_and_ranges() {
		let mut rng = SmallRng::seed_from_u64(7);
		let dims = Dimensions::new(800.0, 600.0);
		let particles = spawn_particles(&mut rng, dims, 15.0);

		assert_eq!(particles.len(), 32);
		for p in &particles {
			assert!(dims.contains(p.position));
			assert!(p.velocity.x.abs() <= MAX_SPAWN_SPEED);
			assert!(p.velocity.y.abs() <= MAX_SPAWN_SPEED);
			assert!((1.0..4.0).contains(&p.size));
			assert!((0.1..0.6).contains(&p.opacity));
			assert!(PARTICLE_PALETTE.contains(&p.color));
		}
	}

	#[test]
	fn same_seed_same_connections() {
		let dims = Dimensions::new(800.0, 600.0);
		let a = spawn_nodes(&mut SmallRng::seed_from_u64(42), dims, 15.0);
		let b = spawn_nodes(&mut SmallRng::seed_from_u64(42), dims, 15.0);

		assert_eq!(a.len(), 32);
		assert_eq!(a, b);
		let links_a: Vec<_> = a.iter().map(|n| n.connections.clone()).collect();
		let links_b: Vec<_> = b.iter().map(|n| n.connections.clone()).collect();
		assert_eq!(links_a, links_b);
	}

	#[test]
	fn neighbors_are_first_found_not_nearest() {
		// Node 0 has four candidates under the threshold; the closest one
		// (index 4) comes last and is therefore left out.
		let mut nodes = vec![
			node_at(0.0, 0.0),
			node_at(100.0, 0.0),
			node_at(0.0, 100.0),
			node_at(90.0, 0.0),
			node_at(1.0, 1.0),
			node_at(500.0, 500.0),
		];
		link_neighbors(&mut nodes);

		assert_eq!(nodes[0].connections, vec![1, 2, 3]);
		assert!(nodes[5].connections.is_empty());
		for (i, node) in nodes.iter().enumerate() {
			assert!(node.connections.len() <= MAX_CONNECTIONS);
			assert!(!node.connections.contains(&i));
		}
	}

	#[test]
	fn threshold_is_exclusive() {
		let mut nodes = vec![node_at(0.0, 0.0), node_at(NEIGHBOR_DISTANCE, 0.0)];
		link_neighbors(&mut nodes);
		assert!(nodes[0].connections.is_empty());
	}
}
