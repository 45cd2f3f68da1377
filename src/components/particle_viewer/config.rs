//! Physics and camera tuning for the viewer.
//!
//! Every field has a default, so a partial JSON object (or none at all) is a
//! valid configuration.

use serde::Deserialize;

use super::zoom_pan::MouseMask;

/// Tunable constants for a [`ParticleViewer`](super::ParticleViewer).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
	/// Spring strength for edges. Edge springs are never replaced by
	/// `add_spring`, which tells them apart by this strength.
	pub edge_strength: f32,
	/// Strength of auxiliary springs created by `add_spring`.
	pub spring_strength: f32,
	/// Damping of every spring the viewer creates.
	pub damping: f32,
	/// Drag applied to all particles (larger is slower).
	pub drag: f32,
	/// Vertical gravity. Zero for network layouts.
	pub gravity: f32,
	/// Mass of each node's particle.
	pub node_mass: f32,
	/// Simulated time advanced per `update_particles` call.
	pub time_step: f32,
	/// Distance below which attractions stop growing.
	pub attraction_min_distance: f32,
	/// Camera easing factor per frame (0 snaps, 1 never moves).
	pub camera_smoothness: f32,
	/// Bounding box padding factor used when fitting the camera.
	pub camera_margin: f32,
	/// Modifier that must be held for zoom/pan drags.
	#[serde(with = "mask_name")]
	pub mouse_mask: MouseMask,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			edge_strength: 1.0,
			spring_strength: 0.5,
			damping: 0.1,
			drag: 0.75,
			gravity: 0.0,
			node_mass: 1.0,
			time_step: 0.3,
			attraction_min_distance: 0.1,
			camera_smoothness: 0.9,
			camera_margin: 1.2,
			mouse_mask: MouseMask::Shift,
		}
	}
}

mod mask_name {
	use serde::{Deserialize, Deserializer, de::Error};

	use super::MouseMask;

	pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<MouseMask, D::Error> {
		let name = String::deserialize(d)?;
		match name.to_ascii_lowercase().as_str() {
			"none" => Ok(MouseMask::None),
			"shift" => Ok(MouseMask::Shift),
			"ctrl" | "control" => Ok(MouseMask::Ctrl),
			"alt" => Ok(MouseMask::Alt),
			other => Err(D::Error::custom(format!("unknown mouse mask `{other}`"))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let cfg: ViewerConfig = serde_json::from_str(r#"{ "drag": 0.3, "mouse_mask": "Ctrl" }"#)
			.expect("valid config");
		assert_eq!(cfg.drag, 0.3);
		assert_eq!(cfg.mouse_mask, MouseMask::Ctrl);
		assert_eq!(cfg.edge_strength, 1.0);
		assert_eq!(cfg.time_step, 0.3);
	}

	#[test]
	fn unknown_mask_is_rejected() {
		let err = serde_json::from_str::<ViewerConfig>(r#"{ "mouse_mask": "meta" }"#);
		assert!(err.is_err());
	}
}
