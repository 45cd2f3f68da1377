//! Mouse-driven zoom and pan applied on top of the auto-centring camera.
//!
//! Drags only start while the mouse-mask modifier is held, which leaves plain
//! clicks free for node selection. Left-drag pans, right-drag zooms about the
//! press point and the wheel zooms about the cursor.

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

/// Smallest zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 10.0;

/// Modifier key that must be held for zoom/pan drags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MouseMask {
	/// Drags always zoom/pan.
	None,
	/// Shift must be held.
	#[default]
	Shift,
	/// Ctrl (or Cmd) must be held.
	Ctrl,
	/// Alt must be held.
	Alt,
}

/// Modifier keys held during a mouse event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
	/// Shift key.
	pub shift: bool,
	/// Ctrl or Meta key.
	pub ctrl: bool,
	/// Alt key.
	pub alt: bool,
}

impl MouseMask {
	fn satisfied_by(self, m: Modifiers) -> bool {
		match self {
			MouseMask::None => true,
			MouseMask::Shift => m.shift,
			MouseMask::Ctrl => m.ctrl,
			MouseMask::Alt => m.alt,
		}
	}
}

/// Mouse buttons relevant to zoom/pan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
	/// Primary button: pans.
	Left,
	/// Ignored by zoom/pan.
	Middle,
	/// Secondary button: zooms.
	Right,
}

impl MouseButton {
	/// Map a DOM `MouseEvent.button` code.
	pub fn from_dom(code: i16) -> Option<Self> {
		match code {
			0 => Some(MouseButton::Left),
			1 => Some(MouseButton::Middle),
			2 => Some(MouseButton::Right),
			_ => None,
		}
	}
}

#[derive(Clone, Debug)]
enum DragMode {
	Idle,
	Pan { start: Vec2, offset_start: Vec2 },
	Zoom { anchor: Vec2, start_y: f32, zoom_start: f64 },
}

/// Screen-space zoom/pan transform: `screen = world * zoom + offset`.
#[derive(Clone, Debug)]
pub struct ZoomPan {
	offset: Vec2,
	zoom: f64,
	mouse: Vec2,
	mouse_mask: MouseMask,
	drag: DragMode,
}

impl Default for ZoomPan {
	fn default() -> Self {
		Self::new(MouseMask::default())
	}
}

impl ZoomPan {
	/// Identity transform gated by `mouse_mask`.
	pub fn new(mouse_mask: MouseMask) -> Self {
		Self {
			offset: Vec2::ZERO,
			zoom: 1.0,
			mouse: Vec2::ZERO,
			mouse_mask,
			drag: DragMode::Idle,
		}
	}

	/// Change the modifier that starts drags.
	pub fn set_mouse_mask(&mut self, mask: MouseMask) {
		self.mouse_mask = mask;
	}

	/// Current zoom factor.
	pub fn zoom(&self) -> f64 {
		self.zoom
	}

	/// Current pan offset in screen pixels.
	pub fn offset(&self) -> Vec2 {
		self.offset
	}

	/// True while a zoom or pan drag owns the mouse.
	pub fn is_mouse_captured(&self) -> bool {
		!matches!(self.drag, DragMode::Idle)
	}

	/// Raw mouse position in screen pixels.
	pub fn mouse_screen(&self) -> Vec2 {
		self.mouse
	}

	/// Last mouse position with the zoom/pan transform removed.
	pub fn mouse_coord(&self) -> Vec2 {
		self.to_world(self.mouse)
	}

	/// Remove the zoom/pan transform from a screen position.
	pub fn to_world(&self, screen: Vec2) -> Vec2 {
		(screen - self.offset) / self.zoom as f32
	}

	/// Return to the identity transform and abandon any drag.
	pub fn reset(&mut self) {
		self.offset = Vec2::ZERO;
		self.zoom = 1.0;
		self.drag = DragMode::Idle;
	}

	/// Start a pan (left) or zoom (right) drag if the mask modifier is held.
	pub fn mouse_pressed(&mut self, pos: Vec2, button: MouseButton, modifiers: Modifiers) {
		self.mouse = pos;
		if !self.mouse_mask.satisfied_by(modifiers) {
			return;
		}
		self.drag = match button {
			MouseButton::Left => DragMode::Pan {
				start: pos,
				offset_start: self.offset,
			},
			MouseButton::Right => DragMode::Zoom {
				anchor: pos,
				start_y: pos.y,
				zoom_start: self.zoom,
			},
			MouseButton::Middle => DragMode::Idle,
		};
	}

	/// Track a mouse move, updating any drag in progress.
	pub fn mouse_moved(&mut self, pos: Vec2) {
		self.mouse = pos;
		match self.drag {
			DragMode::Idle => {}
			DragMode::Pan {
				start,
				offset_start,
			} => {
				self.offset = offset_start + (pos - start);
			}
			DragMode::Zoom {
				anchor,
				start_y,
				zoom_start,
			} => {
				// Dragging up zooms in, 100px doubles or halves.
				let factor = 2f64.powf(((start_y - pos.y) / 100.0) as f64);
				self.zoom_about(anchor, zoom_start * factor);
			}
		}
	}

	/// End any drag in progress.
	pub fn mouse_released(&mut self) {
		self.drag = DragMode::Idle;
	}

	/// Wheel zoom about the cursor; positive `delta_y` zooms out.
	pub fn mouse_wheel(&mut self, pos: Vec2, delta_y: f64) {
		self.mouse = pos;
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.zoom_about(pos, self.zoom * factor);
	}

	fn zoom_about(&mut self, anchor: Vec2, new_zoom: f64) {
		let new_zoom = new_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = (new_zoom / self.zoom) as f32;
		self.offset = anchor - (anchor - self.offset) * ratio;
		self.zoom = new_zoom;
	}

	/// Apply the transform to a 2D context.
	pub fn transform(&self, ctx: &CanvasRenderingContext2d) {
		let _ = ctx.translate(self.offset.x as f64, self.offset.y as f64);
		let _ = ctx.scale(self.zoom, self.zoom);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SHIFT: Modifiers = Modifiers {
		shift: true,
		ctrl: false,
		alt: false,
	};

	#[test]
	fn drags_require_mask() {
		let mut zp = ZoomPan::default();
		zp.mouse_pressed(Vec2::new(10.0, 10.0), MouseButton::Left, Modifiers::default());
		assert!(!zp.is_mouse_captured());
		zp.mouse_moved(Vec2::new(50.0, 10.0));
		assert_eq!(zp.offset(), Vec2::ZERO);

		zp.mouse_pressed(Vec2::new(10.0, 10.0), MouseButton::Left, SHIFT);
		assert!(zp.is_mouse_captured());
		zp.mouse_moved(Vec2::new(50.0, 30.0));
		assert_eq!(zp.offset(), Vec2::new(40.0, 20.0));
		zp.mouse_released();
		assert!(!zp.is_mouse_captured());
	}

	#[test]
	fn mouse_coord_removes_transform() {
		let mut zp = ZoomPan::new(MouseMask::None);
		zp.mouse_pressed(Vec2::ZERO, MouseButton::Left, Modifiers::default());
		zp.mouse_moved(Vec2::new(20.0, 10.0));
		zp.mouse_released();
		zp.mouse_wheel(Vec2::new(20.0, 10.0), -1.0);
		zp.mouse_moved(Vec2::new(31.0, 21.0));
		let w = zp.mouse_coord();
		assert!((w.x - 10.0).abs() < 1e-4 && (w.y - 10.0).abs() < 1e-4);
	}

	#[test]
	fn wheel_zoom_keeps_cursor_fixed_and_clamps() {
		let mut zp = ZoomPan::default();
		let cursor = Vec2::new(120.0, 80.0);
		let before = zp.to_world(cursor);
		zp.mouse_wheel(cursor, -3.0);
		let after = zp.to_world(cursor);
		assert!((before - after).length() < 1e-3);

		for _ in 0..200 {
			zp.mouse_wheel(cursor, -1.0);
		}
		assert_eq!(zp.zoom(), MAX_ZOOM);
		for _ in 0..200 {
			zp.mouse_wheel(cursor, 1.0);
		}
		assert_eq!(zp.zoom(), MIN_ZOOM);
	}

	#[test]
	fn right_drag_zooms_and_reset_restores_identity() {
		let mut zp = ZoomPan::default();
		zp.mouse_pressed(Vec2::new(0.0, 200.0), MouseButton::Right, SHIFT);
		zp.mouse_moved(Vec2::new(0.0, 100.0));
		assert!((zp.zoom() - 2.0).abs() < 1e-9);

		zp.reset();
		assert_eq!(zp.zoom(), 1.0);
		assert_eq!(zp.offset(), Vec2::ZERO);
		assert!(!zp.is_mouse_captured());
	}
}
