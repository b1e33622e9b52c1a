//! Visual styling for the explore canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Visual style for issue and filler items.
#[derive(Clone, Debug)]
pub struct ItemStyle {
	/// Radius (px) of an issue dot.
	pub issue_radius: f64,
	/// Radius (px) of a filler dot.
	pub fake_radius: f64,
	/// Fill color for issue dots.
	pub issue_color: Color,
	/// Fill color for filler dots.
	pub fake_color: Color,
}

/// Style for topic cluster labels.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub color: Color,
	/// CSS font shorthand.
	pub font: &'static str,
}

/// Connector line stroke width (color and alpha come from the caller).
#[derive(Clone, Debug)]
pub struct LineStyle {
	pub width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub item: ItemStyle,
	pub label: LabelStyle,
	pub line: LineStyle,
}

impl Theme {
	/// Light paper-like theme matching the host site (default).
	pub fn light() -> Self {
		Self {
			name: "light",
			background: BackgroundStyle {
				color: Color::rgb(242, 240, 237),
				color_secondary: Color::rgb(250, 249, 247),
				use_gradient: true,
			},
			item: ItemStyle {
				issue_radius: 5.0,
				fake_radius: 2.5,
				issue_color: Color::rgb(60, 60, 60),
				fake_color: Color::rgb(150, 148, 145),
			},
			label: LabelStyle {
				color: Color::rgb(40, 40, 40),
				font: "13px sans-serif",
			},
			line: LineStyle { width: 1.0 },
		}
	}

	/// Dark variant for embedding on dark pages.
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			item: ItemStyle {
				issue_radius: 5.0,
				fake_radius: 2.5,
				issue_color: Color::rgb(220, 220, 220),
				fake_color: Color::rgb(110, 115, 122),
			},
			label: LabelStyle {
				color: Color::rgb(230, 230, 230),
				font: "13px sans-serif",
			},
			line: LineStyle { width: 1.0 },
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
