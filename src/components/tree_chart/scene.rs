//! Render-ready snapshot of the diagram.
//!
//! A [`Scene`] holds one sprite per drawn node and link, keyed by node id (links
//! by their target's id), so that two scenes can be matched element by element
//! and interpolated.

use std::collections::BTreeMap;

use super::config::MarkerStyle;
use super::geometry::{LinkPath, Point};
use super::hierarchy::NodeId;
use super::layout::ViewBox;

/// Drawn state of one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeSprite {
	pub id: NodeId,
	/// Screen-oriented position (see [`Point`]).
	pub position: Point,
	pub extent: f64,
	pub opacity: f64,
}

impl NodeSprite {
	pub fn lerp(&self, other: &NodeSprite, t: f64) -> NodeSprite {
		NodeSprite {
			id: other.id,
			position: self.position.lerp(other.position, t),
			extent: self.extent + (other.extent - self.extent) * t,
			opacity: self.opacity + (other.opacity - self.opacity) * t,
		}
	}

	/// Distance from `point` to the node's marker.
	pub fn distance(&self, point: Point, marker: MarkerStyle) -> f64 {
		match marker {
			MarkerStyle::Bar => {
				let half = self.extent / 2.0;
				let top = Point::new(self.position.x, self.position.y - half);
				let bottom = Point::new(self.position.x, self.position.y + half);
				point.distance_to_segment(top, bottom)
			}
			MarkerStyle::Circle { radius } => {
				let (dx, dy) = (point.x - self.position.x, point.y - self.position.y);
				((dx * dx + dy * dy).sqrt() - radius).max(0.0)
			}
		}
	}
}

/// Drawn state of the link ending at `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkSprite {
	pub target: NodeId,
	pub path: LinkPath,
	pub opacity: f64,
}

impl LinkSprite {
	pub fn lerp(&self, other: &LinkSprite, t: f64) -> LinkSprite {
		LinkSprite {
			target: other.target,
			path: self.path.lerp(&other.path, t),
			opacity: self.opacity + (other.opacity - self.opacity) * t,
		}
	}
}

/// Everything the renderer draws for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub nodes: BTreeMap<NodeId, NodeSprite>,
	pub links: BTreeMap<NodeId, LinkSprite>,
	pub view_box: ViewBox,
}

impl Scene {
	/// Nearest visible node whose marker is within `radius` of `point`.
	pub fn node_at(&self, point: Point, marker: MarkerStyle, radius: f64) -> Option<NodeId> {
		self.nodes
			.values()
			.filter(|sprite| sprite.opacity > 0.0)
			.map(|sprite| (sprite.id, sprite.distance(point, marker)))
			.filter(|&(_, distance)| distance <= radius)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(id, _)| id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sprite(id: usize, x: f64, y: f64, extent: f64) -> NodeSprite {
		NodeSprite {
			id: NodeId(id),
			position: Point::new(x, y),
			extent,
			opacity: 1.0,
		}
	}

	fn scene(sprites: &[NodeSprite]) -> Scene {
		Scene {
			nodes: sprites.iter().map(|s| (s.id, *s)).collect(),
			..Scene::default()
		}
	}

	#[test]
	fn bar_markers_are_hit_along_their_extent() {
		let scene = scene(&[sprite(0, 0.0, 0.0, 40.0), sprite(1, 100.0, 0.0, 0.0)]);
		assert_eq!(scene.node_at(Point::new(3.0, 18.0), MarkerStyle::Bar, 5.0), Some(NodeId(0)));
		assert_eq!(scene.node_at(Point::new(3.0, 30.0), MarkerStyle::Bar, 5.0), None);
		assert_eq!(scene.node_at(Point::new(98.0, 1.0), MarkerStyle::Bar, 5.0), Some(NodeId(1)));
	}

	#[test]
	fn nearest_marker_wins() {
		let scene = scene(&[sprite(0, 0.0, 0.0, 0.0), sprite(1, 6.0, 0.0, 0.0)]);
		assert_eq!(scene.node_at(Point::new(4.0, 0.0), MarkerStyle::Bar, 8.0), Some(NodeId(1)));
	}

	#[test]
	fn circle_radius_counts_as_hit_area() {
		let scene = scene(&[sprite(0, 0.0, 0.0, 0.0)]);
		let marker = MarkerStyle::Circle { radius: 5.0 };
		assert_eq!(scene.node_at(Point::new(0.0, 9.0), marker, 4.0), Some(NodeId(0)));
		assert_eq!(scene.node_at(Point::new(0.0, 10.0), marker, 4.0), None);
	}

	#[test]
	fn invisible_nodes_cannot_be_hit() {
		let mut hidden = sprite(0, 0.0, 0.0, 0.0);
		hidden.opacity = 0.0;
		let scene = scene(&[hidden]);
		assert_eq!(scene.node_at(Point::new(0.0, 0.0), MarkerStyle::Bar, 5.0), None);
	}

	#[test]
	fn sprites_interpolate_linearly() {
		let a = NodeSprite {
			opacity: 0.0,
			..sprite(3, 0.0, 0.0, 0.0)
		};
		let b = sprite(3, 100.0, 50.0, 8.0);
		let mid = a.lerp(&b, 0.5);
		assert_eq!(mid.position, Point::new(50.0, 25.0));
		assert_eq!(mid.extent, 4.0);
		assert_eq!(mid.opacity, 0.5);
	}
}
