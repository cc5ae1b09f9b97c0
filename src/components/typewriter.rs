use std::time::Duration;

use leptos::prelude::*;
use log::{debug, warn};

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeStep {
	/// Not started, or already complete.
	Idle,
	/// One more character became visible.
	Typed,
	/// All characters were already visible; typing stops now.
	Finished,
}

/// Reveals a string one character per tick.
#[derive(Clone, Debug, Default)]
pub struct Typewriter {
	text: String,
	shown: usize,
	typing: bool,
	complete: bool,
}

impl Typewriter {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..Self::default()
		}
	}

	pub fn start(&mut self) {
		if !self.complete {
			self.typing = true;
		}
	}

	pub fn tick(&mut self) -> TypeStep {
		if !self.typing {
			return TypeStep::Idle;
		}
		if self.shown < self.text.chars().count() {
			self.shown += 1;
			TypeStep::Typed
		} else {
			self.typing = false;
			self.complete = true;
			TypeStep::Finished
		}
	}

	/// The revealed prefix, cut on a char boundary.
	pub fn visible(&self) -> &str {
		let end = self
			.text
			.char_indices()
			.nth(self.shown)
			.map_or(self.text.len(), |(i, _)| i);
		&self.text[..end]
	}

	#[cfg(test)]
	pub fn is_typing(&self) -> bool {
		self.typing
	}

	#[cfg(test)]
	pub fn is_complete(&self) -> bool {
		self.complete
	}
}

/// Types `text` out after `delay` ms, one character every `speed` ms.
#[component]
pub fn TypewriterText(
	#[prop(into)] text: String,
	#[prop(default = 0)] delay: u64,
	#[prop(default = 50)] speed: u64,
	#[prop(optional, into)] class: String,
	/// Runs once, after the last character.
	#[prop(optional)]
	on_complete: Option<Callback<()>>,
) -> impl IntoView {
	let machine = StoredValue::new(Typewriter::new(text));
	let interval = StoredValue::new(None::<IntervalHandle>);
	let (shown, set_shown) = signal(String::new());
	let (typing, set_typing) = signal(false);

	let tick = move || {
		let Some((step, visible)) = machine.try_update_value(|m| (m.tick(), m.visible().to_owned()))
		else {
			return;
		};
		match step {
			TypeStep::Typed => set_shown.set(visible),
			TypeStep::Finished => {
				if let Some(handle) = interval.try_get_value().flatten() {
					handle.clear();
				}
				set_typing.set(false);
				debug!("typewriter: done");
				if let Some(cb) = on_complete {
					cb.run(());
				}
			}
			TypeStep::Idle => {}
		}
	};

	let start = move || {
		machine.update_value(Typewriter::start);
		set_typing.set(true);
		match set_interval_with_handle(tick, Duration::from_millis(speed)) {
			Ok(handle) => interval.set_value(Some(handle)),
			Err(err) => warn!("typewriter: could not start interval: {:?}", err),
		}
	};

	let timeout = match set_timeout_with_handle(start, Duration::from_millis(delay)) {
		Ok(handle) => Some(handle),
		Err(err) => {
			warn!("typewriter: could not schedule start: {:?}", err);
			None
		}
	};

	on_cleanup(move || {
		if let Some(handle) = timeout {
			handle.clear();
		}
		if let Some(handle) = interval.try_get_value().flatten() {
			handle.clear();
		}
	});

	view! {
		<span class=format!("typewriter-text {class}")>
			{move || shown.get()}
			<Show when=move || typing.get()>
				<span class="typewriter-caret" />
			</Show>
		</span>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn idle_until_started() {
		let mut tw = Typewriter::new("hi");
		assert_eq!(tw.tick(), TypeStep::Idle);
		assert_eq!(tw.visible(), "");
		assert!(!tw.is_typing());
	}

	#[test]
	fn reveals_one_char_per_tick_then_finishes_once() {
		let mut tw = Typewriter::new("abc");
		tw.start();
		assert!(tw.is_typing());

		let steps: Vec<TypeStep> = (0..5).map(|_| tw.tick()).collect();
		assert_eq!(
			steps,
			vec![
				TypeStep::Typed,
				TypeStep::Typed,
				TypeStep::Typed,
				TypeStep::Finished,
				TypeStep::Idle,
			]
		);
		assert_eq!(tw.visible(), "abc");
		assert!(tw.is_complete());
		assert!(!tw.is_typing());
	}

	#[test]
	fn multibyte_text_is_cut_on_char_boundaries() {
		let mut tw = Typewriter::new("héllo✓");
		tw.start();
		tw.tick();
		tw.tick();
		assert_eq!(tw.visible(), "hé");
		for _ in 0..4 {
			tw.tick();
		}
		assert_eq!(tw.visible(), "héllo✓");
	}

	#[test]
	fn restart_after_completion_is_ignored() {
		let mut tw = Typewriter::new("");
		tw.start();
		assert_eq!(tw.tick(), TypeStep::Finished);
		tw.start();
		assert_eq!(tw.tick(), TypeStep::Idle);
	}
}
