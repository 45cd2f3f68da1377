//! Zoom-dependent sizing for viewer visuals.
//!
//! Drawing happens in world space after both the zoom/pan transform and the
//! camera scale are applied, so the effective zoom `k` is their product.
//!
//! - [`ScaleBehavior::World`]: scales with zoom.
//! - [`ScaleBehavior::Screen`]: constant pixel size (divides by `k`).
//! - [`ScaleBehavior::Clamped`]: world-space size kept within pixel bounds.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World/Screen variants complete the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Fixed size in world units; grows and shrinks with zoom.
	World,
	/// Fixed size in screen pixels.
	Screen,
	/// World size kept within a screen-pixel range.
	Clamped {
		/// Smallest on-screen size.
		min_screen: f64,
		/// Largest on-screen size.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space size for a base value at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Base sizes and how they respond to zoom.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node radius in world units.
	pub node_radius: f64,
	/// How the node radius follows zoom.
	pub node_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Gap between a node and its label in screen pixels.
	pub label_gap: f64,
	/// Selection ring width in screen pixels.
	pub ring_width: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 5.0,
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 3.0,
				max_screen: 24.0,
			},
			label_size: 11.0,
			label_gap: 4.0,
			ring_width: 1.5,
		}
	}
}

/// Pre-computed world-space sizes for one frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Effective zoom (zoom/pan factor times camera scale).
	pub k: f64,
	/// Node radius in world units.
	pub node_radius: f64,
	/// Edge stroke width; zero or less disables edge drawing.
	pub edge_line_width: f64,
	/// e.g. `"11px sans-serif"`
	pub label_font: String,
	/// Label offset from the node edge.
	pub label_gap: f64,
	/// Selection ring stroke width.
	pub ring_width: f64,
	/// Spring dash pattern in world space.
	pub dash: (f64, f64),
}

impl ScaledValues {
	/// Sizes for effective zoom `k`. A non-positive or non-finite `k` is
	/// treated as 1.
	pub fn new(config: &ScaleConfig, edge_weight: f64, dash: (f64, f64), k: f64) -> Self {
		let k = if k.is_finite() && k > 0.0 { k } else { 1.0 };
		Self {
			k,
			node_radius: config.node_behavior.apply(config.node_radius, k),
			edge_line_width: edge_weight / k,
			label_font: format!("{}px sans-serif", config.label_size / k),
			label_gap: config.label_gap / k,
			ring_width: config.ring_width / k,
			dash: (dash.0 / k, dash.1 / k),
		}
	}
}
