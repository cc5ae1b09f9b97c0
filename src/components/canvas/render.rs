use std::f64::consts::PI;

use glam::DVec2;
use web_sys::CanvasRenderingContext2d;

use super::types::Rgba;

/// The drawing operations a scene needs.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, alpha: f64);
	fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, alpha: f64, width: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, alpha: f64) {
		self.set_global_alpha(alpha);
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		self.set_fill_style_str(&color.to_string());
		self.fill();
		self.set_global_alpha(1.0);
	}

	fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, alpha: f64, width: f64) {
		self.set_global_alpha(alpha);
		self.set_stroke_style_str(&color.to_string());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.stroke();
		self.set_global_alpha(1.0);
	}
}
