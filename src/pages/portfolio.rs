use leptos::prelude::*;

use crate::components::canvas::{ParticlesBackground, PolygonConnections};
use crate::components::scroll_reveal::{Direction, ScrollReveal};

/// Portfolio page. Section content is static copy; the canvases and the
/// reveal transitions are the only moving parts.
#[component]
pub fn Portfolio() -> impl IntoView {
	view! {
		<main class="portfolio">
			<div class="portfolio-backdrop">
				<ParticlesBackground />
				<PolygonConnections density=15.0 opacity=0.2 />
			</div>

			<section id="about" class="portfolio-section">
				<ScrollReveal class="reveal-card">
					<PolygonConnections density=40.0 opacity=0.08 />
					<h2>"About"</h2>
				</ScrollReveal>
			</section>

			<section id="works" class="portfolio-section">
				<ScrollReveal delay=0.2 direction=Direction::Left>
					<h2>"Works"</h2>
				</ScrollReveal>
			</section>

			<section id="contact" class="portfolio-section">
				<ScrollReveal class="reveal-card" delay=0.2>
					<PolygonConnections density=35.0 opacity=0.1 class="contact-graph" />
					<h2>"Contact"</h2>
				</ScrollReveal>
			</section>
		</main>
	}
}
