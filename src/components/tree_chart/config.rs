//! Visual configuration for the tree chart.
//!
//! Every size the chart uses lives here: margins, the column grid that spaces
//! tree levels, stroke widths, sibling spacing and the transition duration.
//! Two presets cover the supported looks:
//!
//! - [`ChartConfig::bus_bar`]: orthogonal, side-by-side links with bar markers
//!   whose length grows with the number of children, colored per top-level
//!   branch.
//! - [`ChartConfig::diagonal`]: thin curved links with circle markers.

use super::geometry::LinkStyle;
use super::layout::LayoutParams;
use super::theme::BranchPalette;

/// Space kept free around the chart, in chart units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

impl Margin {
	pub const fn uniform(value: f64) -> Self {
		Self {
			top: value,
			right: value,
			bottom: value,
			left: value,
		}
	}
}

/// Outer (halo/outline) and inner stroke widths of a drawn element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeWidths {
	pub outer: f64,
	pub inner: f64,
}

/// Shape drawn at each node position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerStyle {
	/// A bar along the cross axis spanning the node's extent.
	Bar,
	/// A filled circle.
	Circle { radius: f64 },
}

/// Label placement relative to the node position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelConfig {
	/// Horizontal offset from the node.
	pub offset_x: f64,
	/// Baseline shift in ems (negative lifts the text).
	pub dy_em: f64,
}

/// Complete chart configuration.
#[derive(Clone, Debug)]
pub struct ChartConfig {
	/// Space around the tree inside the surface.
	pub margin: Margin,
	/// Number of depth levels that fit across the available width.
	pub column_count: f64,
	/// Link halo (outer) and stroke (inner) widths.
	pub link: StrokeWidths,
	/// Marker outline (outer) and fill (inner) widths.
	pub node: StrokeWidths,
	/// Shape of parent→child links.
	pub link_style: LinkStyle,
	/// Shape drawn at each node.
	pub marker: MarkerStyle,
	/// Minimum gap between adjacent subtrees on the same level.
	pub spacing: f64,
	/// Cross-axis space a node reserves per active child beyond the first.
	pub extent_per_child: f64,
	/// Length of every expand/collapse transition.
	pub duration_ms: f64,
	/// Colors for top-level branches; `None` draws every link in the theme color.
	pub palette: Option<BranchPalette>,
	pub label: LabelConfig,
	/// Pointer distance, in screen pixels, within which a node counts as hit.
	pub hit_radius: f64,
}

impl ChartConfig {
	/// Side-by-side orthogonal links, one color per top-level branch.
	pub fn bus_bar() -> Self {
		let link = StrokeWidths {
			outer: 4.0,
			inner: 2.0,
		};
		Self {
			margin: Margin::uniform(10.0),
			column_count: 6.0,
			link,
			node: StrokeWidths {
				outer: 8.0,
				inner: 4.0,
			},
			link_style: LinkStyle::BusBar,
			marker: MarkerStyle::Bar,
			spacing: 22.0,
			extent_per_child: link.outer,
			duration_ms: 500.0,
			palette: Some(BranchPalette::transit()),
			label: LabelConfig {
				offset_x: 6.0,
				dy_em: -0.3,
			},
			hit_radius: 8.0,
		}
	}

	/// Curved links and circle markers.
	pub fn diagonal() -> Self {
		Self {
			margin: Margin::uniform(10.0),
			column_count: 6.0,
			link: StrokeWidths {
				outer: 0.0,
				inner: 1.5,
			},
			node: StrokeWidths {
				outer: 0.0,
				inner: 0.0,
			},
			link_style: LinkStyle::Diagonal,
			marker: MarkerStyle::Circle { radius: 2.5 },
			spacing: 10.0,
			extent_per_child: 0.0,
			duration_ms: 500.0,
			palette: None,
			label: LabelConfig {
				offset_x: 6.0,
				dy_em: 0.31,
			},
			hit_radius: 8.0,
		}
	}

	/// Width available to the tree inside the margins.
	pub fn inner_width(&self, surface_width: f64) -> f64 {
		(surface_width - self.margin.left - self.margin.right).max(0.0)
	}

	/// Depth-axis distance between consecutive tree levels.
	pub fn column_width(&self, surface_width: f64) -> f64 {
		if self.column_count <= 0.0 {
			return 0.0;
		}
		self.inner_width(surface_width) / self.column_count
	}

	/// Size-function parameters for a surface of `surface_width`.
	pub fn layout_params(&self, surface_width: f64) -> LayoutParams {
		LayoutParams {
			column_width: self.column_width(surface_width),
			spacing: self.spacing,
			extent_per_child: self.extent_per_child,
		}
	}
}

impl Default for ChartConfig {
	fn default() -> Self {
		Self::bus_bar()
	}
}
