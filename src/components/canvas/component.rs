use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use leptos::html::Canvas;
use leptos::prelude::*;
use log::{debug, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::frame_loop::FrameLoop;
use super::particles::{self, ParticleField};
use super::polygons::{self, PolygonField};
use super::sizer::{self, SizeSource};
use super::state::{Animator, Scene};
use super::types::SceneConfig;

type SharedAnimator<S> = Rc<RefCell<Animator<S>>>;

/// Everything a running animator holds on the page. Dropping it tears down.
struct Mounted {
	window: Window,
	on_resize: Closure<dyn FnMut()>,
	frames: FrameLoop,
}

impl Drop for Mounted {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
		self.frames.stop();
		debug!("animator unmounted");
	}
}

fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Re-reads the box, resizes the surface and regenerates the scene.
fn fit<S: Scene>(
	source: SizeSource,
	window: &Window,
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	animator: &RefCell<Animator<S>>,
) {
	let Some(size) = sizer::read_box(source, window, canvas) else {
		warn!("{}: viewport size unavailable, skipping", S::NAME);
		return;
	};
	if let Err(err) = sizer::apply(&size, source, canvas, ctx) {
		warn!("{}: could not resize surface: {:?}", S::NAME, err);
	}
	animator.borrow_mut().resize(size.css);
}

fn mount<S: Scene + 'static>(
	canvas: HtmlCanvasElement,
	source: SizeSource,
	animator: SharedAnimator<S>,
) -> Option<Mounted> {
	let window = web_sys::window()?;
	let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

	fit(source, &window, &canvas, &ctx, &animator);

	let (anim_frame, mut ctx_frame) = (animator.clone(), ctx.clone());
	let frames = FrameLoop::start(move || {
		anim_frame.borrow_mut().frame(&mut ctx_frame);
	})?;

	let (win_resize, anim_resize) = (window.clone(), animator.clone());
	let on_resize = Closure::<dyn FnMut()>::new(move || {
		fit(source, &win_resize, &canvas, &ctx, &anim_resize);
	});
	window
		.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
		.ok()?;

	info!("{}: animator mounted", S::NAME);
	Some(Mounted {
		window,
		on_resize,
		frames,
	})
}

/// Mounts the animator once the canvas exists and tears it down with the owner.
fn use_animator<S: Scene + 'static>(
	canvas_ref: NodeRef<Canvas>,
	source: SizeSource,
	animator: SharedAnimator<S>,
) {
	let mounted: Rc<RefCell<Option<Mounted>>> = Rc::new(RefCell::new(None));
	let mounted_init = mounted.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		// A rerun replaces the previous mount instead of stacking loops.
		mounted_init.borrow_mut().take();
		let next = mount(canvas, source, animator.clone());
		if next.is_none() {
			warn!("{}: no 2d context, animator stays idle", S::NAME);
		}
		*mounted_init.borrow_mut() = next;
	});

	let mounted = SendWrapper::new(mounted);
	on_cleanup(move || {
		mounted.borrow_mut().take();
	});
}

fn pointer_in(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<DVec2> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(DVec2::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Fullscreen field of drifting particles that shy away from the pointer.
#[component]
pub fn ParticlesBackground(
	/// Higher values spawn fewer particles.
	#[prop(default = particles::DEFAULT_CONFIG.density)]
	density: f64,
	#[prop(default = particles::DEFAULT_CONFIG.opacity)] opacity: f64,
	/// Fixed seed for a reproducible layout.
	#[prop(optional)]
	seed: Option<u64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let field = ParticleField::new(SceneConfig { density, opacity });
	let animator = Rc::new(RefCell::new(Animator::new(
		field,
		seed.unwrap_or_else(random_seed),
	)));
	use_animator(canvas_ref, SizeSource::Window, animator.clone());

	let (anim_mm, anim_me, anim_ml) = (animator.clone(), animator.clone(), animator);
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(p) = pointer_in(canvas_ref, &ev) {
			anim_mm.borrow_mut().pointer_moved(p);
		}
	};
	let on_mouseenter = move |ev: MouseEvent| {
		if let Some(p) = pointer_in(canvas_ref, &ev) {
			anim_me.borrow_mut().pointer_moved(p);
		}
	};
	let on_mouseleave = move |_: MouseEvent| {
		anim_ml.borrow_mut().pointer_left();
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particles-background"
			on:mousemove=on_mousemove
			on:mouseenter=on_mouseenter
			on:mouseleave=on_mouseleave
			style="position: absolute; inset: 0; z-index: 0; display: block;"
		/>
	}
}

/// Slowly drifting nodes linked to their spawn-time neighbors. Fills its
/// positioned container and ignores the pointer.
#[component]
pub fn PolygonConnections(
	/// Higher values spawn fewer nodes.
	#[prop(default = polygons::DEFAULT_CONFIG.density)]
	density: f64,
	#[prop(default = polygons::DEFAULT_CONFIG.opacity)] opacity: f64,
	#[prop(optional, into)] class: String,
	/// Fixed seed for a reproducible layout.
	#[prop(optional)]
	seed: Option<u64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let field = PolygonField::new(SceneConfig { density, opacity });
	let animator = Rc::new(RefCell::new(Animator::new(
		field,
		seed.unwrap_or_else(random_seed),
	)));
	use_animator(canvas_ref, SizeSource::Container, animator);

	view! {
		<canvas
			node_ref=canvas_ref
			class=format!("polygon-connections {class}")
			style="position: absolute; inset: 0; width: 100%; height: 100%; pointer-events: none;"
		/>
	}
}
