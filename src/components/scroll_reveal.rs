use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use leptos::html::Div;
use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Share of the element that must be on screen before it reveals.
pub const REVEAL_THRESHOLD: f64 = 0.3;
const EASING: &str = "cubic-bezier(0.25, 0.1, 0.25, 1)";

/// The direction the element travels while revealing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
	#[default]
	Up,
	Down,
	Left,
	Right,
}

impl Direction {
	/// Starting offset in CSS pixels, relative to the resting position.
	pub fn offset(self, distance: f64) -> DVec2 {
		match self {
			Direction::Up => DVec2::new(0.0, distance),
			Direction::Down => DVec2::new(0.0, -distance),
			Direction::Left => DVec2::new(distance, 0.0),
			Direction::Right => DVec2::new(-distance, 0.0),
		}
	}
}

/// Hidden-then-shown state of one element. Once shown it stays shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
	direction: Direction,
	distance: f64,
	/// Seconds.
	delay: f64,
	/// Seconds.
	duration: f64,
	shown: bool,
}

impl Reveal {
	pub fn new(direction: Direction, distance: f64, delay: f64, duration: f64) -> Self {
		Self {
			direction,
			distance,
			delay,
			duration,
			shown: false,
		}
	}

	/// Feeds one intersection report. Returns `true` only on the report that
	/// reveals the element.
	pub fn observe(&mut self, ratio: f64, intersecting: bool) -> bool {
		if self.shown || !intersecting || ratio < REVEAL_THRESHOLD {
			return false;
		}
		self.shown = true;
		true
	}

	/// Shows the element without waiting for a report.
	pub fn show(&mut self) {
		self.shown = true;
	}

	#[cfg(test)]
	pub fn is_shown(&self) -> bool {
		self.shown
	}

	/// Inline style for the current state.
	pub fn style(&self) -> String {
		if !self.shown {
			let offset = self.direction.offset(self.distance);
			return format!(
				"opacity: 0; transform: translate({}px, {}px);",
				offset.x, offset.y
			);
		}
		let timing = format!("{}s {EASING} {}s", self.duration, self.delay);
		let transition = format!("opacity {timing}, transform {timing}");
		format!("opacity: 1; transform: translate(0px, 0px); transition: {transition};")
	}
}

/// A live observer. Dropping it disconnects.
struct Watch {
	observer: IntersectionObserver,
	_on_change: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for Watch {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

fn watch(el: &Element, reveal: RwSignal<Reveal>) -> Option<Watch> {
	let on_change = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
		move |entries: js_sys::Array, observer: IntersectionObserver| {
			for entry in entries.iter() {
				let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
					continue;
				};
				let (ratio, hit) = (entry.intersection_ratio(), entry.is_intersecting());
				if reveal.try_update(|r| r.observe(ratio, hit)).unwrap_or(false) {
					debug!("scroll reveal: shown at {:.2}", ratio);
					observer.disconnect();
				}
			}
		},
	);

	let options = IntersectionObserverInit::new();
	options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
	let observer =
		IntersectionObserver::new_with_options(on_change.as_ref().unchecked_ref(), &options)
			.ok()?;
	observer.observe(el);
	Some(Watch {
		observer,
		_on_change: on_change,
	})
}

/// Fades and slides its children in the first time 30% of them scroll into view.
#[component]
pub fn ScrollReveal(
	children: Children,
	/// Seconds before the transition starts.
	#[prop(default = 0.0)]
	delay: f64,
	/// Seconds.
	#[prop(default = 0.5)]
	duration: f64,
	#[prop(optional)] direction: Direction,
	/// Starting offset in CSS pixels.
	#[prop(default = 50.0)]
	distance: f64,
	#[prop(optional, into)] class: String,
) -> impl IntoView {
	let div_ref = NodeRef::<Div>::new();
	let reveal = RwSignal::new(Reveal::new(direction, distance, delay, duration));
	let watching: Rc<RefCell<Option<Watch>>> = Rc::new(RefCell::new(None));
	let watching_init = watching.clone();

	Effect::new(move |_| {
		let Some(el) = div_ref.get() else {
			return;
		};
		watching_init.borrow_mut().take();
		let next = watch(&el, reveal);
		if next.is_none() {
			// Without an observer the content would never appear.
			warn!("scroll reveal: IntersectionObserver unavailable, showing immediately");
			reveal.update(Reveal::show);
		}
		*watching_init.borrow_mut() = next;
	});

	let watching = SendWrapper::new(watching);
	on_cleanup(move || {
		watching.borrow_mut().take();
	});

	view! {
		<div
			node_ref=div_ref
			class=format!("scroll-reveal {class}")
			style=move || reveal.with(Reveal::style)
		>
			{children()}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offsets_point_against_travel() {
		assert_eq!(Direction::Up.offset(50.0), DVec2::new(0.0, 50.0));
		assert_eq!(Direction::Down.offset(50.0), DVec2::new(0.0, -50.0));
		assert_eq!(Direction::Left.offset(20.0), DVec2::new(20.0, 0.0));
		assert_eq!(Direction::Right.offset(20.0), DVec2::new(-20.0, 0.0));
		assert_eq!(Direction::default(), Direction::Up);
	}

	#[test]
	fn reveals_once_past_threshold() {
		let mut reveal = Reveal::new(Direction::Up, 50.0, 0.0, 0.5);

		assert!(!reveal.observe(0.1, true));
		assert!(!reveal.observe(0.5, false));
		assert!(!reveal.is_shown());

		assert!(reveal.observe(REVEAL_THRESHOLD, true));
		assert!(reveal.is_shown());

		// Scrolling away and back changes nothing.
		assert!(!reveal.observe(0.0, false));
		assert!(!reveal.observe(1.0, true));
		assert!(reveal.is_shown());
	}

	#[test]
	fn hidden_style_uses_direction_offset() {
		let reveal = Reveal::new(Direction::Right, 30.0, 0.0, 0.5);
		assert_eq!(reveal.style(), "opacity: 0; transform: translate(-30px, 0px);");
	}

	#[test]
	fn shown_style_carries_timing() {
		let mut reveal = Reveal::new(Direction::Down, 50.0, 0.2, 0.5);
		reveal.show();

		let style = reveal.style();
		assert!(style.starts_with("opacity: 1; transform: translate(0px, 0px);"));
		assert!(style.contains("opacity 0.5s cubic-bezier(0.25, 0.1, 0.25, 1) 0.2s"));
		assert!(style.contains("transform 0.5s cubic-bezier(0.25, 0.1, 0.25, 1) 0.2s"));
	}
}
