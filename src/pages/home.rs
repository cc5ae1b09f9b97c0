use leptos::prelude::*;

use crate::components::canvas::ParticlesBackground;
use crate::components::scroll_reveal::{Direction, ScrollReveal};
use crate::components::typewriter::TypewriterText;

/// Landing hero over the particle field.
#[component]
pub fn Home() -> impl IntoView {
	let (typed, set_typed) = signal(false);

	view! {
		<main class="hero">
			<ParticlesBackground />
			<div class="hero-content">
				<ScrollReveal delay=0.2 direction=Direction::Down>
					<h1>
						<TypewriterText
							text="Hello, I build things for the web."
							delay=400
							on_complete=Callback::new(move |_| set_typed.set(true))
						/>
					</h1>
				</ScrollReveal>
				<Show when=move || typed.get()>
					<a class="hero-cta" href="/portfolio">
						"See my work"
					</a>
				</Show>
			</div>
		</main>
	}
}
