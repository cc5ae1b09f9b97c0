use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::types::Dimensions;

/// Where the animator takes its CSS box from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeSource {
	/// The browser viewport, for fullscreen backgrounds.
	Window,
	/// The canvas' own layout box, for canvases that fill a container.
	Container,
}

/// CSS box plus the matching backing-store resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
	pub css: Dimensions,
	pub pixel_ratio: f64,
	pub backing_width: u32,
	pub backing_height: u32,
}

pub fn measure(css_width: f64, css_height: f64, pixel_ratio: f64) -> SurfaceSize {
	let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
		pixel_ratio
	} else {
		1.0
	};
	let css = Dimensions::new(css_width.max(0.0), css_height.max(0.0));
	SurfaceSize {
		css,
		pixel_ratio,
		backing_width: (css.width * pixel_ratio).floor() as u32,
		backing_height: (css.height * pixel_ratio).floor() as u32,
	}
}

/// Reads the current box for `source`. `None` when the browser can't tell yet.
pub fn read_box(
	source: SizeSource,
	window: &Window,
	canvas: &HtmlCanvasElement,
) -> Option<SurfaceSize> {
	let (w, h) = match source {
		SizeSource::Window => (
			window.inner_width().ok()?.as_f64()?,
			window.inner_height().ok()?.as_f64()?,
		),
		SizeSource::Container => {
			let rect = canvas.get_bounding_client_rect();
			(rect.width(), rect.height())
		}
	};
	Some(measure(w, h, window.device_pixel_ratio()))
}

/// Resizes the backing store and maps drawing units back to CSS pixels.
/// Setting the canvas size resets the context, so the transform is reapplied.
pub fn apply(
	size: &SurfaceSize,
	source: SizeSource,
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
) -> Result<(), JsValue> {
	canvas.set_width(size.backing_width);
	canvas.set_height(size.backing_height);
	// Container canvases are sized by their stylesheet.
	if source == SizeSource::Window {
		let style = canvas.style();
		style.set_property("width", &format!("{}px", size.css.width))?;
		style.set_property("height", &format!("{}px", size.css.height))?;
	}
	ctx.set_transform(size.pixel_ratio, 0.0, 0.0, size.pixel_ratio, 0.0, 0.0)
}
