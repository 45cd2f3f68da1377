//! Leptos component wrapping the particle viewer canvas.
//!
//! The component creates an HTML canvas element and wires up mouse, wheel and
//! keyboard handlers for node dragging, zoom/pan, view reset and pausing. An
//! animation loop runs via `requestAnimationFrame`, advancing the viewer and
//! redrawing it each frame.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::config::ViewerConfig;
use super::render;
use super::scale::ScaleConfig;
use super::theme::Theme;
use super::types::{GraphData, NetworkEdge, NetworkNode};
use super::viewer::ParticleViewer;
use super::zoom_pan::{Modifiers, MouseButton};

type NetworkViewer = ParticleViewer<NetworkNode, NetworkEdge>;

/// Bundles the viewer with its visual configuration.
struct ViewerContext {
	viewer: NetworkViewer,
	scale: ScaleConfig,
	theme: Theme,
}

/// Build a viewer holding every node, edge, force and spring in `data`.
/// Entries naming unknown nodes are logged and skipped.
pub fn build_viewer(data: &GraphData, width: f32, height: f32, config: ViewerConfig) -> NetworkViewer {
	let network = data.to_network(width, height);
	let mut viewer = ParticleViewer::with_config(width, height, config);

	for node in network.nodes {
		viewer.add_node(node);
	}
	let mut skipped = 0;
	for edge in network.edges {
		if viewer.add_edge(edge).is_err() {
			skipped += 1;
		}
	}
	for (a, b, strength) in &network.forces {
		if let Err(e) = viewer.add_force(a, b, *strength) {
			warn!("particle-view: force {} -> {} skipped: {}", a.id, b.id, e);
		}
	}
	for (a, b, length) in &network.springs {
		if let Err(e) = viewer.add_spring(a, b, *length) {
			warn!("particle-view: spring {} -> {} skipped: {}", a.id, b.id, e);
		}
	}

	info!(
		"particle-view: {} nodes, {} edges ({} skipped)",
		viewer.num_nodes(),
		viewer.num_edges(),
		skipped
	);
	viewer
}

fn canvas_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Vec2 {
	let rect = canvas.get_bounding_client_rect();
	Vec2::new(
		(ev.client_x() as f64 - rect.left()) as f32,
		(ev.client_y() as f64 - rect.top()) as f32,
	)
}

fn modifiers(ev: &MouseEvent) -> Modifiers {
	Modifiers {
		shift: ev.shift_key(),
		ctrl: ev.ctrl_key() || ev.meta_key(),
		alt: ev.alt_key(),
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Renders an interactive spring-embedder layout on a canvas element.
///
/// The canvas sizes itself to its parent by default; `fullscreen = true`
/// fills the window and follows resizes. Explicit `width`/`height` override
/// automatic sizing.
///
/// Click a node to drag it, hold Shift (or the configured modifier) and drag
/// to pan, Shift+right-drag or scroll to zoom. `r` resets the view, `p` or
/// space pauses the simulation.
#[component]
pub fn ParticleViewerCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: ViewerConfig,
	#[prop(default = None)] theme: Option<Theme>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<ViewerContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let key_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init, key_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone(), key_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = match (fullscreen, window_size(&window)) {
			(true, Some(size)) => size,
			_ => (
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
			),
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				warn!("particle-view: canvas has no 2d context");
				return;
			}
		};

		*context_init.borrow_mut() = Some(ViewerContext {
			viewer: build_viewer(&data.get(), w as f32, h as f32, config.clone()),
			scale: ScaleConfig::default(),
			theme: theme.clone().unwrap_or_default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.viewer.resize(nw as f32, nh as f32);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let context_key = context_init.clone();
		*key_cb_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if let Some(ref mut c) = *context_key.borrow_mut() {
				match ev.key().as_str() {
					"r" | "R" => c.viewer.reset_view(),
					"p" | "P" | " " => {
						c.viewer.toggle_paused();
						info!("particle-view: paused = {}", c.viewer.is_paused());
					}
					_ => {}
				}
			}
		}));
		if let Some(ref cb) = *key_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.viewer.advance_frame();
				render::render(&c.viewer, &ctx, &c.scale, &c.theme);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let position = move |ev: &MouseEvent| {
		canvas_ref
			.get()
			.map(|c| canvas_position(&c.into(), ev))
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(pos) = position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(button) = MouseButton::from_dom(ev.button()) {
				c.viewer
					.zoomer_mut()
					.mouse_pressed(pos, button, modifiers(&ev));
				if button == MouseButton::Left {
					c.viewer.select_nearest_with_mouse();
				}
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(pos) = position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.viewer.zoomer_mut().mouse_moved(pos);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			// Drop first: the zoomer still reports its drag until released.
			c.viewer.drop_selected();
			c.viewer.zoomer_mut().mouse_released();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.viewer.zoomer_mut().mouse_released();
			c.viewer.drop_selected();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		let Some(pos) = position(mouse) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.viewer.zoomer_mut().mouse_wheel(pos, ev.delta_y());
		}
	};

	let on_contextmenu = move |ev: MouseEvent| ev.prevent_default();

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-viewer-canvas"
			tabindex="0"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:contextmenu=on_contextmenu
			style="display: block; cursor: crosshair;"
		/>
	}
}
