//! Canvas rendering for the particle viewer.
//!
//! A frame is drawn in three layers:
//! 1. Background (screen space)
//! 2. Auxiliary springs, then edges (world space)
//! 3. Nodes, then the selection ring on top
//!
//! World space is reached by applying the interactive zoom/pan first and the
//! auto-centring camera second.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{Color, Theme};
use super::types::{Edge, Node};
use super::viewer::ParticleViewer;

/// Renders the current state of the viewer. Call after
/// [`ParticleViewer::advance_frame`].
pub fn render<N: Node, E: Edge<N>>(
	viewer: &ParticleViewer<N, E>,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let (width, height) = viewer.size();
	let (width, height) = (width as f64, height as f64);
	let (centre, camera_scale) = viewer.centroid();
	let camera_scale = if camera_scale > 0.0 {
		camera_scale as f64
	} else {
		1.0
	};

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);

	let k = viewer.zoomer().zoom() * camera_scale;
	let scale = ScaledValues::new(config, theme.edge.weight, theme.spring.dash, k);

	ctx.save();
	viewer.zoomer().transform(ctx);
	let _ = ctx.translate(width / 2.0, height / 2.0);
	let _ = ctx.scale(camera_scale, camera_scale);
	let _ = ctx.translate(-centre.x as f64, -centre.y as f64);

	if theme.spring.visible {
		draw_springs(viewer, ctx, &scale, theme);
	}
	if scale.edge_line_width > 0.0 {
		for (edge, a, b) in viewer.edges() {
			edge.draw(
				ctx,
				a.x as f64,
				a.y as f64,
				b.x as f64,
				b.y as f64,
				&scale,
				theme,
			);
		}
	}

	for (node, p) in viewer.nodes() {
		node.draw(ctx, p.x as f64, p.y as f64, &scale, theme);
	}

	if let Some(p) = viewer.selected().and_then(|n| viewer.position(n)) {
		ctx.begin_path();
		let _ = ctx.arc(
			p.x as f64,
			p.y as f64,
			scale.node_radius + scale.ring_width * 2.0,
			0.0,
			TAU,
		);
		ctx.set_stroke_style_str(&theme.selection.ring.to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
	}

	ctx.restore();
}

fn draw_springs<N: Node, E: Edge<N>>(
	viewer: &ParticleViewer<N, E>,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(scale.dash.0),
		&JsValue::from_f64(scale.dash.1),
	));
	ctx.set_stroke_style_str(&theme.spring.stroke.to_css());
	ctx.set_line_width(scale.edge_line_width.max(0.5 / scale.k));

	ctx.begin_path();
	for (a, b) in viewer.springs() {
		ctx.move_to(a.x as f64, a.y as f64);
		ctx.line_to(b.x as f64, b.y as f64);
	}
	ctx.stroke();

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Default edge look: a straight line.
pub fn draw_edge_line(
	ctx: &CanvasRenderingContext2d,
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
	width: f64,
	color: Color,
) {
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.stroke();
}

/// Default node look: a filled circle.
pub fn draw_node_dot(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, color: Color) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, TAU);
	ctx.set_fill_style_str(&color.to_css());
	ctx.fill();
}

/// Draw `text` left-aligned and vertically centred at (`x`, `y`).
pub fn draw_label(
	ctx: &CanvasRenderingContext2d,
	text: &str,
	x: f64,
	y: f64,
	scale: &ScaledValues,
	theme: &Theme,
) {
	ctx.set_fill_style_str(&theme.node.label_color.to_css());
	ctx.set_font(&scale.label_font);
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(text, x, y);
}
