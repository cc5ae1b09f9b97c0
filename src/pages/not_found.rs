use leptos::prelude::*;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<section class="not-found">
			<h1>"404"</h1>
			<p>"Nothing lives at this address."</p>
			<a href="/">"Back home"</a>
		</section>
	}
}
