//! Canvas-side chart state and interaction tracking.
//!
//! Wraps the [`DiagramController`] with the surface size, the user's pan/zoom
//! transform and hover tracking, and maps between screen pixels and chart
//! coordinates.

use super::config::ChartConfig;
use super::controller::DiagramController;
use super::error::LoadError;
use super::geometry::Point;
use super::hierarchy::NodeId;
use super::layout::ViewBox;
use super::types::TreeData;

/// Pointer travel, in pixels, after which a press counts as a pan rather than
/// a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Uniform scale followed by a translation: `screen = k * chart + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0 for user zoom).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// `outer ∘ self`: apply `self` first, then `outer`.
	pub fn then(self, outer: ViewTransform) -> ViewTransform {
		ViewTransform {
			x: outer.k * self.x + outer.x,
			y: outer.k * self.y + outer.y,
			k: outer.k * self.k,
		}
	}

	pub fn invert(self, screen: Point) -> Point {
		Point::new((screen.x - self.x) / self.k, (screen.y - self.y) / self.k)
	}
}

#[cfg(test)]
impl ViewTransform {
	fn apply(self, point: Point) -> Point {
		Point::new(self.k * point.x + self.x, self.k * point.y + self.y)
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	/// Set once the pointer moved far enough that the release is not a click.
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Core chart state, created once the canvas is mounted and mutated by the
/// event handlers and the animation loop.
pub struct ChartState {
	pub controller: DiagramController,
	/// User pan/zoom, applied on top of the view-box fit.
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hovered: Option<NodeId>,
	pub width: f64,
	pub height: f64,
}

impl ChartState {
	pub fn new(data: &TreeData, config: ChartConfig, width: f64, height: f64, now_ms: f64) -> Result<Self, LoadError> {
		Ok(Self {
			controller: DiagramController::new(data, config, width, now_ms)?,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
		})
	}

	pub fn config(&self) -> &ChartConfig {
		self.controller.config()
	}

	/// Chart → screen transform for a frame showing `view_box`.
	///
	/// The view box is scaled uniformly to fit the surface and centered on both
	/// axes, the chart origin is shifted by the top/left margins, and the user
	/// transform is applied last.
	pub fn fit(&self, view_box: ViewBox) -> ViewTransform {
		let margin = self.config().margin;
		let scale = if view_box.width > 0.0 && view_box.height > 0.0 {
			(self.width / view_box.width).min(self.height / view_box.height)
		} else {
			1.0
		};
		let fit = ViewTransform {
			x: (self.width - view_box.width * scale) / 2.0 - view_box.min_x * scale + margin.left * scale,
			y: (self.height - view_box.height * scale) / 2.0 - view_box.min_y * scale + margin.top * scale,
			k: scale,
		};
		fit.then(self.transform)
	}

	pub fn screen_to_chart(&self, sx: f64, sy: f64, view_box: ViewBox) -> Point {
		self.fit(view_box).invert(Point::new(sx, sy))
	}

	/// Node under the screen position at `now_ms`, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64, now_ms: f64) -> Option<NodeId> {
		let scene = self.controller.frame(now_ms);
		let point = self.screen_to_chart(sx, sy, scene.view_box);
		let scale = self.fit(scene.view_box).k;
		let config = self.config();
		scene.node_at(point, config.marker, config.hit_radius / scale)
	}

	/// Whether `id` can be expanded or collapsed.
	pub fn is_toggleable(&self, id: NodeId) -> bool {
		self.controller
			.tree()
			.get(id)
			.is_some_and(|node| !node.is_leaf())
	}

	/// Pointer cursor for the current hover and pan state.
	pub fn cursor(&self) -> &'static str {
		match self.hovered {
			_ if self.pan.moved => "grabbing",
			Some(id) if self.is_toggleable(id) => "pointer",
			_ => "default",
		}
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<NodeId>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		true
	}

	/// Toggle the node under the pointer. Releases that end a pan are ignored.
	pub fn activate_at(&mut self, sx: f64, sy: f64, now_ms: f64) -> bool {
		if self.pan.moved {
			self.pan.moved = false;
			return false;
		}
		match self.node_at_position(sx, sy, now_ms) {
			Some(id) => self.controller.handle_activate(id, now_ms),
			None => false,
		}
	}

	pub fn start_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		if !self.pan.active {
			return;
		}
		let (dx, dy) = (x - self.pan.start_x, y - self.pan.start_y);
		if dx.hypot(dy) > DRAG_THRESHOLD {
			self.pan.moved = true;
		}
		if self.pan.moved {
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
		}
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zoom around the screen point `(x, y)`, keeping it fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn resize(&mut self, width: f64, height: f64, now_ms: f64) {
		self.width = width;
		self.height = height;
		self.controller.resize(width, now_ms);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> ChartState {
		let data = TreeData::branch(
			"root",
			vec![
				TreeData::leaf("a"),
				TreeData::branch("flar", vec![TreeData::leaf("b1")]),
				TreeData::leaf("c"),
			],
		);
		ChartState::new(&data, ChartConfig::bus_bar(), 620.0, 400.0, 0.0).unwrap()
	}

	#[test]
	fn fit_centers_the_view_box_and_applies_margins() {
		let state = state();
		let view_box = state.controller.view_box();
		assert_eq!(view_box.height, 64.0);

		let fit = state.fit(view_box);
		assert_eq!(fit, ViewTransform { x: 10.0, y: 200.0, k: 1.0 });
		assert_eq!(fit.apply(Point::new(100.0, -22.0)), Point::new(110.0, 178.0));
	}

	#[test]
	fn screen_to_chart_inverts_the_fit() {
		let mut state = state();
		state.transform = ViewTransform { x: 15.0, y: -40.0, k: 2.0 };
		let view_box = state.controller.view_box();
		let chart = Point::new(100.0, 22.0);
		let screen = state.fit(view_box).apply(chart);
		let back = state.screen_to_chart(screen.x, screen.y, view_box);
		assert!((back.x - chart.x).abs() < 1e-9);
		assert!((back.y - chart.y).abs() < 1e-9);
	}

	#[test]
	fn hit_testing_finds_markers_once_settled() {
		let state = state();
		assert_eq!(state.node_at_position(10.0, 203.0, 1000.0), Some(NodeId(0)));
		assert_eq!(state.node_at_position(110.0, 178.0, 1000.0), Some(NodeId(1)));
		assert_eq!(state.node_at_position(60.0, 100.0, 1000.0), None);
		// Everything is invisible while the first transition starts.
		assert_eq!(state.node_at_position(110.0, 178.0, 0.0), None);
	}

	#[test]
	fn clicks_toggle_only_nodes_with_children() {
		let mut state = state();
		assert!(state.is_toggleable(NodeId(2)));
		assert!(!state.is_toggleable(NodeId(1)));
		assert!(!state.activate_at(110.0, 178.0, 1000.0));
		assert!(state.activate_at(110.0, 200.0, 1000.0));
		assert_eq!(state.controller.links().len(), 4);
	}

	#[test]
	fn cursor_follows_hover_and_pan() {
		let mut state = state();
		assert_eq!(state.cursor(), "default");
		state.set_hover(state.node_at_position(110.0, 200.0, 1000.0));
		assert_eq!(state.cursor(), "pointer");
		state.set_hover(state.node_at_position(110.0, 178.0, 1000.0));
		assert_eq!(state.cursor(), "default");
		state.start_pan(0.0, 0.0);
		state.pan_to(10.0, 0.0);
		assert_eq!(state.cursor(), "grabbing");
	}

	#[test]
	fn a_pan_swallows_the_following_click() {
		let mut state = state();
		state.start_pan(110.0, 200.0);
		state.pan_to(111.0, 201.0);
		assert_eq!(state.transform, ViewTransform::default());
		state.pan_to(130.0, 200.0);
		state.end_pan();
		assert_eq!(state.transform.x, 20.0);
		assert!(!state.activate_at(130.0, 200.0, 1000.0));
		assert!(!state.pan.moved);
	}

	#[test]
	fn zoom_keeps_the_cursor_point_fixed() {
		let mut state = state();
		let view_box = state.controller.view_box();
		let before = state.screen_to_chart(200.0, 150.0, view_box);
		state.zoom_at(200.0, 150.0, -1.0);
		let after = state.screen_to_chart(200.0, 150.0, view_box);
		assert!((state.transform.k - 1.1).abs() < 1e-12);
		assert!((before.x - after.x).abs() < 1e-9);
		assert!((before.y - after.y).abs() < 1e-9);
	}

	#[test]
	fn resize_relayouts_for_the_new_width() {
		let mut state = state();
		state.resize(1220.0, 800.0, 1000.0);
		assert_eq!(state.height, 800.0);
		assert_eq!(state.controller.view_box().width, 1220.0);
	}
}
