//! Visual theming for the tree chart.
//!
//! Provides the branch palette and the stroke/fill colors used by the renderer.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const BLACK: Color = Color::rgb(0, 0, 0);
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors handed out to the top-level branches of the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct BranchPalette {
	/// Color of the root node.
	pub root: Color,
	pub colors: Vec<Color>,
}

impl BranchPalette {
	/// Transit-line palette: one strong color per top-level branch.
	pub fn transit() -> Self {
		Self {
			root: Color::BLACK,
			colors: vec![
				Color::rgb(0, 57, 166),    // Blue
				Color::rgb(255, 99, 25),   // Orange
				Color::rgb(108, 190, 69),  // Lime
				Color::rgb(153, 102, 51),  // Brown
				Color::rgb(167, 169, 172), // Light gray
				Color::rgb(252, 204, 10),  // Yellow
				Color::rgb(128, 129, 131), // Gray
				Color::rgb(238, 53, 46),   // Red
				Color::rgb(0, 147, 60),    // Green
				Color::rgb(185, 51, 173),  // Purple
			],
		}
	}

	/// Palette color for the `index`-th branch, cycling when the tree has more
	/// top-level branches than colors.
	pub fn get(&self, index: usize) -> Color {
		if self.colors.is_empty() {
			return Color::BLACK;
		}
		self.colors[index % self.colors.len()]
	}
}

/// Link stroke colors.
#[derive(Clone, Debug)]
pub struct LinkTheme {
	/// Outer halo stroke that separates overlapping links.
	pub halo: Color,
	/// Inner stroke for links whose target has no branch color.
	pub color: Color,
}

/// Node marker colors.
#[derive(Clone, Debug)]
pub struct NodeTheme {
	/// Outline of bar markers.
	pub outline: Color,
	/// Inner fill of markers for nodes that can be toggled.
	pub toggle_fill: Color,
	/// Inner fill of leaf markers.
	pub leaf_fill: Color,
}

/// Label text style.
#[derive(Clone, Debug)]
pub struct LabelTheme {
	pub color: Color,
	/// Halo drawn behind the text so it stays readable over links.
	pub halo: Color,
	pub halo_width: f64,
	/// Font size in chart units.
	pub font_size: f64,
	pub font_family: &'static str,
}

impl LabelTheme {
	pub fn font(&self) -> String {
		format!("{}px {}", self.font_size, self.font_family)
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Preset name.
	pub name: &'static str,
	/// Canvas fill behind the chart.
	pub background: Color,
	/// Link colors.
	pub link: LinkTheme,
	/// Marker colors.
	pub node: NodeTheme,
	/// Label text style.
	pub label: LabelTheme,
}

impl Theme {
	/// Black-and-white transit map look used with bus-bar links (default).
	pub fn transit() -> Self {
		Self {
			name: "transit",
			background: Color::WHITE,
			link: LinkTheme {
				halo: Color::WHITE,
				color: Color::BLACK,
			},
			node: NodeTheme {
				outline: Color::BLACK,
				toggle_fill: Color::WHITE,
				leaf_fill: Color::BLACK,
			},
			label: LabelTheme {
				color: Color::BLACK,
				halo: Color::WHITE,
				halo_width: 3.0,
				font_size: 10.0,
				font_family: "sans-serif",
			},
		}
	}

	/// Muted gray look used with diagonal links and circle markers.
	pub fn classic() -> Self {
		Self {
			name: "classic",
			background: Color::WHITE,
			link: LinkTheme {
				halo: Color::rgba(255, 255, 255, 0.0),
				color: Color::rgba(85, 85, 85, 0.4),
			},
			node: NodeTheme {
				outline: Color::rgba(0, 0, 0, 0.0),
				toggle_fill: Color::rgb(85, 85, 85),
				leaf_fill: Color::rgb(153, 153, 153),
			},
			label: LabelTheme {
				color: Color::BLACK,
				halo: Color::WHITE,
				halo_width: 3.0,
				font_size: 10.0,
				font_family: "sans-serif",
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::transit()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_render_as_hex() {
		assert_eq!(Color::rgb(0, 57, 166).to_css(), "#0039a6");
		assert_eq!(
			Color::rgba(85, 85, 85, 0.4).to_css(),
			"rgba(85, 85, 85, 0.4)"
		);
	}

	#[test]
	fn palette_cycles_past_its_length() {
		let palette = BranchPalette::transit();
		assert_eq!(palette.get(0), palette.get(10));
		assert_eq!(palette.get(3), Color::rgb(153, 102, 51));
	}

	#[test]
	fn empty_palette_falls_back_to_black() {
		let palette = BranchPalette {
			root: Color::BLACK,
			colors: Vec::new(),
		};
		assert_eq!(palette.get(4), Color::BLACK);
	}
}
