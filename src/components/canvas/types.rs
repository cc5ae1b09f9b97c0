use std::fmt;

use glam::DVec2;

/// Drawing area in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
	pub width: f64,
	pub height: f64,
}

impl Dimensions {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// An empty box means the container is not laid out yet.
	pub fn is_empty(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}

	pub fn area(&self) -> f64 {
		self.width * self.height
	}

	#[cfg(test)]
	pub fn contains(&self, p: DVec2) -> bool {
		(0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
	}
}

/// A CSS color with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Rgba {
	pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}
}

impl fmt::Display for Rgba {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub position: DVec2,
	pub velocity: DVec2,
	pub size: f64,
	pub color: Rgba,
	pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub position: DVec2,
	pub velocity: DVec2,
	/// Indices into the owning node list, fixed when the list is generated.
	pub connections: Vec<usize>,
}

/// Last known pointer position relative to the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
	pub position: DVec2,
	pub inside: bool,
}

/// Per-instance tuning shared by both scene variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
	/// Higher density means fewer entities.
	pub density: f64,
	pub opacity: f64,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rgba_formats_as_css() {
		assert_eq!(
			Rgba::new(157, 78, 221, 0.5).to_string(),
			"rgba(157, 78, 221, 0.5)"
		);
	}

	#[test]
	fn zero_sized_box_is_empty() {
		assert!(Dimensions::new(0.0, 300.0).is_empty());
		assert!(Dimensions::new(f64::NAN, 300.0).is_empty());
		assert!(!Dimensions::new(1.0, 1.0).is_empty());
	}
}
