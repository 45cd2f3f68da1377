//! Visual theming for the particle viewer.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0 to 1.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with opacity `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// CSS form: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string. Supports hex (`#RRGGBB`) and
	/// `rgb()`/`rgba()` functional notation; anything else is mid grey.
	pub fn parse(s: &str) -> Color {
		let s = s.trim();
		if s.starts_with('#') && s.len() == 7 {
			let channel = |r: std::ops::Range<usize>| {
				s.get(r)
					.and_then(|hex| u8::from_str_radix(hex, 16).ok())
					.unwrap_or(128)
			};
			Color::rgb(channel(1..3), channel(3..5), channel(5..7))
		} else if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.map(str::trim)
				.collect();
			let channel = |i: usize| nums.get(i).and_then(|n| n.parse().ok()).unwrap_or(128);
			let a = nums.get(3).and_then(|n| n.parse().ok()).unwrap_or(1.0);
			Color::rgba(channel(0), channel(1), channel(2), a)
		} else {
			Color::rgb(128, 128, 128)
		}
	}
}

/// Node appearance.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Fill for nodes without their own color.
	pub fill: Color,
	/// Label text color.
	pub label_color: Color,
}

/// Edge appearance.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line color.
	pub stroke: Color,
	/// Stroke weight in screen pixels. Edges are skipped when not positive.
	pub weight: f64,
}

/// Appearance of auxiliary springs added with `add_spring`.
#[derive(Clone, Debug)]
pub struct SpringStyle {
	/// Whether auxiliary springs are drawn at all.
	pub visible: bool,
	/// Line color.
	pub stroke: Color,
	/// Dash pattern (dash, gap) in screen pixels.
	pub dash: (f64, f64),
}

/// Ring drawn around the mouse-selected node.
#[derive(Clone, Debug)]
pub struct SelectionStyle {
	/// Ring stroke color.
	pub ring: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name accepted by [`Theme::by_name`].
	pub name: &'static str,
	/// Canvas fill behind everything.
	pub background: Color,
	/// Edge lines.
	pub edge: EdgeStyle,
	/// Node dots and labels.
	pub node: NodeStyle,
	/// Auxiliary spring lines.
	pub spring: SpringStyle,
	/// Held-node highlight.
	pub selection: SelectionStyle,
}

impl Theme {
	/// Translucent dark red nodes joined by grey-black edges on white.
	pub fn classic() -> Self {
		Self {
			name: "classic",
			background: Color::rgb(255, 255, 255),
			edge: EdgeStyle {
				stroke: Color::rgba(0, 0, 0, 180.0 / 255.0),
				weight: 1.0,
			},
			node: NodeStyle {
				fill: Color::rgba(120, 50, 50, 180.0 / 255.0),
				label_color: Color::rgba(40, 40, 40, 0.9),
			},
			spring: SpringStyle {
				visible: false,
				stroke: Color::rgba(0, 0, 0, 0.25),
				dash: (4.0, 4.0),
			},
			selection: SelectionStyle {
				ring: Color::rgba(200, 60, 60, 0.9),
			},
		}
	}

	/// Elegant dark theme
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: Color::rgb(18, 20, 28),
			edge: EdgeStyle {
				stroke: Color::rgba(100, 120, 150, 0.6),
				weight: 1.5,
			},
			node: NodeStyle {
				fill: Color::rgb(129, 161, 193),
				label_color: Color::rgba(255, 255, 255, 0.85),
			},
			spring: SpringStyle {
				visible: true,
				stroke: Color::rgba(100, 120, 150, 0.25),
				dash: (6.0, 4.0),
			},
			selection: SelectionStyle {
				ring: Color::rgba(255, 255, 255, 0.8),
			},
		}
	}

	/// Look up a theme by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"classic" => Some(Self::classic()),
			"midnight" => Some(Self::midnight()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::classic()
	}
}
