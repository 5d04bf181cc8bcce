//! Link path geometry.
//!
//! Layout coordinates put the cross axis in `x` and the depth axis in `y`; on
//! screen the depth axis runs horizontally, so every [`Point`] here is already
//! swapped: `Point { x: node.y, y: node.x }`.
//!
//! Every path is exactly four points so that a path can be interpolated into
//! any other path of the same style, including the degenerate self-link used
//! as the start and end of enter/exit transitions.

use std::fmt::Write;

/// A screen-oriented point (horizontal = depth axis, vertical = cross axis).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Screen point for a node at layout position (`cross`, `depth`).
	pub const fn from_layout(cross: f64, depth: f64) -> Self {
		Self { x: depth, y: cross }
	}

	pub fn lerp(self, other: Point, t: f64) -> Point {
		Point {
			x: self.x + (other.x - self.x) * t,
			y: self.y + (other.y - self.y) * t,
		}
	}

	pub fn distance_to_segment(self, a: Point, b: Point) -> f64 {
		let (dx, dy) = (b.x - a.x, b.y - a.y);
		let len2 = dx * dx + dy * dy;
		let t = if len2 < f64::EPSILON {
			0.0
		} else {
			(((self.x - a.x) * dx + (self.y - a.y) * dy) / len2).clamp(0.0, 1.0)
		};
		let (px, py) = (a.x + dx * t - self.x, a.y + dy * t - self.y);
		(px * px + py * py).sqrt()
	}
}

/// How links between a parent and its children are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStyle {
	/// Smooth cubic curve, horizontal at both ends.
	Diagonal,
	/// Orthogonal trunk-and-branch path fanning siblings side by side.
	BusBar,
}

/// Layout position of a link endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
	/// Cross-axis coordinate.
	pub x: f64,
	/// Depth-axis coordinate.
	pub y: f64,
}

impl Anchor {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub const fn point(self) -> Point {
		Point::from_layout(self.x, self.y)
	}
}

/// A four-point link path.
///
/// For [`LinkStyle::BusBar`] the points are the vertices of a polyline; for
/// [`LinkStyle::Diagonal`] they are start, two control points and end of a
/// cubic Bézier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkPath {
	pub style: LinkStyle,
	pub points: [Point; 4],
}

impl LinkPath {
	/// Zero-length path collapsed onto `at`.
	pub fn degenerate(style: LinkStyle, at: Anchor) -> Self {
		Self {
			style,
			points: [at.point(); 4],
		}
	}

	pub fn is_degenerate(&self) -> bool {
		self.points.iter().all(|p| *p == self.points[0])
	}

	/// Point-wise interpolation towards `other`. The result keeps `other`'s style.
	pub fn lerp(&self, other: &LinkPath, t: f64) -> LinkPath {
		let mut points = self.points;
		for (p, q) in points.iter_mut().zip(other.points) {
			*p = p.lerp(q, t);
		}
		LinkPath {
			style: other.style,
			points,
		}
	}

	/// SVG path data, e.g. `M0,0L50,0L50,20L100,20`.
	pub fn to_svg_path(&self) -> String {
		let [p0, p1, p2, p3] = self.points;
		let mut d = String::new();
		let _ = write!(d, "M{},{}", p0.x, p0.y);
		match self.style {
			LinkStyle::BusBar => {
				for p in [p1, p2, p3] {
					let _ = write!(d, "L{},{}", p.x, p.y);
				}
			}
			LinkStyle::Diagonal => {
				let _ = write!(d, "C{},{},{},{},{},{}", p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
			}
		}
		d
	}
}

/// Offsets, in multiples of the link width, of one bus-bar link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BusBarOffsets {
	/// Cross-axis shift of the link's start on the source's marker.
	pub source: f64,
	/// Depth-axis shift of the vertical bus segment from the midpoint.
	pub bus: f64,
}

/// Compute the fan-out offsets of the link from a source at cross-axis
/// `source_x` to its `index`-th active child.
///
/// `children_x` holds the cross-axis positions of all active children of the
/// source, in order, as produced by the current layout pass.
pub fn bus_bar_offsets(source_x: f64, children_x: &[f64], index: usize, link_width: f64) -> BusBarOffsets {
	let n = children_x.len().saturating_sub(1) as f64;
	let i = index as f64;

	// First child lying above the point where its own link would leave the source.
	let mut j = 0;
	while j < children_x.len() && source_x + (j as f64 - n / 2.0) * link_width > children_x[j] {
		j += 1;
	}
	let j = j as f64;

	let bus = if i < j {
		i - j / 2.0
	} else {
		(n - j - 1.0) / 2.0 - (i - j)
	};
	BusBarOffsets {
		source: i - n / 2.0,
		bus,
	}
}

/// Path of a link between `source` and its `index`-th active child `target`.
///
/// `children_x` is only read for [`LinkStyle::BusBar`].
pub fn link_path(
	style: LinkStyle,
	source: Anchor,
	target: Anchor,
	children_x: &[f64],
	index: usize,
	link_width: f64,
) -> LinkPath {
	if source == target {
		return LinkPath::degenerate(style, source);
	}
	match style {
		LinkStyle::Diagonal => {
			let mid = (source.y + target.y) / 2.0;
			LinkPath {
				style,
				points: [
					source.point(),
					Point::new(mid, source.x),
					Point::new(mid, target.x),
					target.point(),
				],
			}
		}
		LinkStyle::BusBar => {
			let offsets = bus_bar_offsets(source.x, children_x, index, link_width);
			let start = Point::new(source.y, source.x + offsets.source * link_width);
			let bus_x = (source.y + target.y) / 2.0 + offsets.bus * link_width;
			LinkPath {
				style,
				points: [
					start,
					Point::new(bus_x, start.y),
					Point::new(bus_x, target.x),
					target.point(),
				],
			}
		}
	}
}
