//! Camera centring on the bounding box of all particles.
//!
//! Each frame the viewer computes a target centre and scale that fit every
//! particle on screen, and a [`Smoother3`] eases the live camera towards it.

use glam::Vec2;

/// Exponential easing of a 3-component value (centre x, centre y, scale).
///
/// Each `tick` moves the value a fixed fraction `1 - smoothness` of the way
/// towards its target, so a smoothness of `0.9` closes 10% of the gap per
/// frame.
#[derive(Clone, Debug)]
pub struct Smoother3 {
	value: [f32; 3],
	target: [f32; 3],
	smoothness: f32,
	primed: bool,
}

impl Smoother3 {
	/// Start at `initial`; `smoothness` is clamped to `0..=1`.
	pub fn new(smoothness: f32, initial: [f32; 3]) -> Self {
		Self {
			value: initial,
			target: initial,
			smoothness: smoothness.clamp(0.0, 1.0),
			primed: false,
		}
	}

	/// Set the value to ease towards. The very first target is adopted
	/// immediately so the camera does not sweep in from the origin at zero
	/// scale.
	pub fn set_target(&mut self, x: f32, y: f32, z: f32) {
		self.target = [x, y, z];
		if !self.primed {
			self.value = self.target;
			self.primed = true;
		}
	}

	/// Move one step towards the target. Does nothing until a target is set.
	pub fn tick(&mut self) {
		if !self.primed {
			return;
		}
		let s = self.smoothness;
		for (v, t) in self.value.iter_mut().zip(self.target) {
			*v = s * *v + (1.0 - s) * t;
		}
	}

	/// Current centre x.
	pub fn x(&self) -> f32 {
		self.value[0]
	}

	/// Current centre y.
	pub fn y(&self) -> f32 {
		self.value[1]
	}

	/// Current scale.
	pub fn z(&self) -> f32 {
		self.value[2]
	}

	/// Value being eased towards.
	pub fn target(&self) -> [f32; 3] {
		self.target
	}
}

/// Centre and scale that fit `positions` into a `width` x `height` view with
/// `margin` (1.2 leaves 10% of free space on each side).
///
/// Returns `None` when there is nothing to fit. An axis with zero extent
/// places no limit on the scale; if both are degenerate the scale is 1.
pub fn centroid_target(
	positions: impl IntoIterator<Item = Vec2>,
	width: f32,
	height: f32,
	margin: f32,
) -> Option<[f32; 3]> {
	let mut iter = positions.into_iter();
	let first = iter.next()?;
	let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

	let range = max - min;
	let centre = min + range * 0.5;

	let fit = |extent: f32, span: f32| {
		if span > f32::EPSILON {
			extent / (span * margin)
		} else {
			f32::INFINITY
		}
	};
	let scale = fit(height, range.y).min(fit(width, range.x));
	let scale = if scale.is_finite() { scale } else { 1.0 };

	Some([centre.x, centre.y, scale])
}

/// Map a screen position into world space for a camera centred on `centre`
/// at `scale`, in a view of the given size.
pub fn screen_to_world(screen: Vec2, width: f32, height: f32, centre: Vec2, scale: f32) -> Vec2 {
	let half = Vec2::new(width / 2.0, height / 2.0);
	(screen - half) / scale + centre
}
