//! Leptos component wrapping the explore canvas.
//!
//! The component creates an HTML canvas element, builds the engine from the
//! data model, and wires up mouse and touch handlers. An animation loop runs
//! via `requestAnimationFrame`, ticking the engine and rendering the scene
//! each frame. A small view-switch bar exposes the page's view command.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::engine::{Explore, View};
use super::render;
use super::scene::Point;
use super::theme::Theme;
use super::types::ExploreData;

/// Minimum horizontal travel (px) for a touch to register as a swipe.
const SWIPE_THRESHOLD: f64 = 60.0;

/// Bundles the engine with its visual theme.
struct ExploreContext {
	engine: Explore,
	theme: Theme,
}

/// Renders the interactive explore canvas.
///
/// Pass the data model via the reactive `data` signal. The component sizes
/// itself to its parent container by default; set `fullscreen = true` to
/// fill the viewport and resize automatically with the window. Explicit
/// `width`/`height` override automatic sizing.
#[component]
pub fn ExploreCanvas(
	#[prop(into)] data: Signal<ExploreData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<ExploreContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let touch_start_x: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let viewport_width = window.inner_width().unwrap().as_f64().unwrap();
		let mut engine = Explore::new(w, h);
		engine.set_data(data.get());
		if let Err(e) = engine.init(viewport_width) {
			warn!("explore: init failed: {e}");
			return;
		}
		engine.show_topics();

		*context_init.borrow_mut() = Some(ExploreContext {
			engine,
			theme: Theme::light(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.engine.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.engine.tick(0.016);
				render::render(c.engine.scene(), &ctx, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.engine.set_mouse_position(Point::new(x, y));
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			// Park the pointer far off-canvas so hover hit-tests miss.
			c.engine.set_mouse_position(Point::new(f64::MIN, f64::MIN));
		}
	};

	let touch_start = touch_start_x.clone();
	let on_touchstart = move |ev: TouchEvent| {
		if let Some(touch) = ev.changed_touches().get(0) {
			touch_start.set(Some(touch.client_x() as f64));
		}
	};

	let (context_te, touch_end) = (context.clone(), touch_start_x.clone());
	let on_touchend = move |ev: TouchEvent| {
		let Some(start_x) = touch_end.take() else {
			return;
		};
		let Some(touch) = ev.changed_touches().get(0) else {
			return;
		};
		let delta = touch.client_x() as f64 - start_x;
		if let Some(ref c) = *context_te.borrow() {
			if delta <= -SWIPE_THRESHOLD {
				c.engine.notify_swipe_left();
			} else if delta >= SWIPE_THRESHOLD {
				c.engine.notify_swipe_right();
			}
		}
	};

	let switch = {
		let context = context.clone();
		move |view: View| {
			let context = context.clone();
			move |_: MouseEvent| {
				if let Some(ref mut c) = *context.borrow_mut() {
					c.engine.switch_view(view);
				}
			}
		}
	};

	view! {
		<div class="explore-canvas">
			<canvas
				node_ref=canvas_ref
				class="explore-canvas-surface"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:touchstart=on_touchstart
				on:touchend=on_touchend
				style="display: block;"
			/>
			<div class="explore-view-switch">
				<button on:click=switch(View::Explore)>"explore"</button>
				<button on:click=switch(View::Topics)>"topics"</button>
				<button on:click=switch(View::Issues)>"issues"</button>
			</div>
		</div>
	}
}
