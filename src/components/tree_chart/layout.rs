//! Bridge between the hierarchy and a tree layout engine.
//!
//! The adapter builds a sized copy of the active (non-collapsed) tree, hands
//! it to any [`TreeLayout`] implementation and writes the resulting positions
//! and extents back onto the nodes. Collapsed subtrees never reach the engine
//! and keep whatever coordinates they had.

use super::hierarchy::{Hierarchy, NodeId};

/// A node as seen by the layout engine.
#[derive(Clone, Debug, PartialEq)]
pub struct SizedNode {
	/// Node this entry stands for.
	pub id: NodeId,
	/// `[cross-axis size, depth-axis size]`.
	pub size: [f64; 2],
	/// Active children, in order.
	pub children: Vec<SizedNode>,
}

/// Engine output for one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
	/// Node being placed.
	pub id: NodeId,
	/// Cross-axis center.
	pub x: f64,
	/// Depth-axis position.
	pub y: f64,
}

/// A hierarchical layout algorithm.
pub trait TreeLayout {
	/// Position every node of `root`. Adjacent subtrees at the same depth must
	/// be at least `spacing` apart beyond their cross-axis sizes.
	fn compute_layout(&self, root: &SizedNode, spacing: f64) -> Vec<Placement>;
}

/// Parameters of the size function handed to the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	/// Depth-axis size of every node.
	pub column_width: f64,
	/// Minimum gap between adjacent subtrees.
	pub spacing: f64,
	/// Cross-axis space reserved per additional active child.
	pub extent_per_child: f64,
}

impl LayoutParams {
	/// Cross-axis extent for a node with `active` participating children.
	pub fn extent(&self, active: usize) -> f64 {
		active.saturating_sub(1) as f64 * self.extent_per_child
	}
}

/// Cross-axis range covered by the visible nodes after a layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub max_x: f64,
	/// Column width times the number of visible levels.
	pub depth_extent: f64,
}

impl Bounds {
	pub fn height(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn contains(&self, x: f64) -> bool {
		x >= self.min_x && x <= self.max_x
	}
}

/// Visible region of the chart, in the same units as the node coordinates
/// shifted by the margins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewBox {
	pub min_x: f64,
	pub min_y: f64,
	pub width: f64,
	pub height: f64,
}

impl ViewBox {
	/// `(0, min cross, surface width, cross range + top/bottom margins)`.
	pub fn for_bounds(bounds: &Bounds, surface_width: f64, margin_top: f64, margin_bottom: f64) -> Self {
		Self {
			min_x: 0.0,
			min_y: bounds.min_x,
			width: surface_width,
			height: bounds.height() + margin_top + margin_bottom,
		}
	}

	pub fn lerp(&self, other: &ViewBox, t: f64) -> ViewBox {
		ViewBox {
			min_x: self.min_x + (other.min_x - self.min_x) * t,
			min_y: self.min_y + (other.min_y - self.min_y) * t,
			width: self.width + (other.width - self.width) * t,
			height: self.height + (other.height - self.height) * t,
		}
	}
}

/// Lay out the active tree and return its bounds.
pub fn layout<L: TreeLayout + ?Sized>(tree: &mut Hierarchy, engine: &L, params: &LayoutParams) -> Bounds {
	let root = tree.root_id();
	let sized = sized_tree(tree, root, params);
	let placements = engine.compute_layout(&sized, params.spacing);

	for placement in &placements {
		let extent = tree
			.get(placement.id)
			.and_then(|n| n.active_children())
			.map_or(0.0, |c| params.extent(c.len()));
		if let Some(node) = tree.get_mut(placement.id) {
			node.x = placement.x;
			node.y = placement.y;
			node.extent = extent;
		}
	}

	let root = tree.root();
	let mut bounds = Bounds {
		min_x: root.x,
		max_x: root.x,
		depth_extent: 0.0,
	};
	let mut max_depth = 0;
	for id in tree.visible() {
		let Some(node) = tree.get(id) else {
			continue;
		};
		bounds.min_x = bounds.min_x.min(node.x);
		bounds.max_x = bounds.max_x.max(node.x);
		max_depth = max_depth.max(node.depth);
	}
	bounds.depth_extent = params.column_width * (max_depth + 1) as f64;
	bounds
}

fn sized_tree(tree: &Hierarchy, id: NodeId, params: &LayoutParams) -> SizedNode {
	let active = tree.get(id).and_then(|n| n.active_children()).unwrap_or_default();
	SizedNode {
		id,
		size: [params.extent(active.len()), params.column_width],
		children: active.iter().map(|&c| sized_tree(tree, c, params)).collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::tree_chart::flextree::FlexTree;
	use crate::components::tree_chart::hierarchy::{default_expansion, tests::arb_tree};
	use crate::components::tree_chart::types::TreeData;
	use proptest::prelude::*;

	const PARAMS: LayoutParams = LayoutParams {
		column_width: 100.0,
		spacing: 22.0,
		extent_per_child: 4.0,
	};

	/// Puts every node at its id, for checking what the adapter forwards.
	struct ById;

	impl TreeLayout for ById {
		fn compute_layout(&self, root: &SizedNode, _spacing: f64) -> Vec<Placement> {
			let mut out = Vec::new();
			let mut stack = vec![root];
			while let Some(node) = stack.pop() {
				out.push(Placement {
					id: node.id,
					x: node.id.0 as f64,
					y: node.id.0 as f64 * 10.0,
				});
				stack.extend(node.children.iter());
			}
			out
		}
	}

	fn sample() -> Hierarchy {
		let data = TreeData::branch(
			"root",
			vec![
				TreeData::branch(
					"flare.a",
					vec![TreeData::leaf("a1"), TreeData::leaf("a2"), TreeData::leaf("a3")],
				),
				TreeData::branch("flar", vec![TreeData::leaf("b1")]),
			],
		);
		Hierarchy::load(&data, default_expansion).unwrap()
	}

	#[test]
	fn extent_tracks_active_children() {
		assert_eq!(PARAMS.extent(0), 0.0);
		assert_eq!(PARAMS.extent(1), 0.0);
		assert_eq!(PARAMS.extent(3), 8.0);
	}

	#[test]
	fn collapsed_subtrees_are_not_sent_to_the_engine() {
		let tree = sample();
		let sized = sized_tree(&tree, tree.root_id(), &PARAMS);
		assert_eq!(sized.size, [4.0, 100.0]);
		assert_eq!(sized.children.len(), 2);
		assert_eq!(sized.children[0].size, [8.0, 100.0]);
		assert_eq!(sized.children[0].children.len(), 3);
		assert!(sized.children[1].children.is_empty(), "collapsed node keeps no children");
		assert_eq!(sized.children[1].size, [0.0, 100.0]);
	}

	#[test]
	fn stale_coordinates_survive_for_hidden_nodes() {
		let mut tree = sample();
		tree.get_mut(NodeId(6)).unwrap().x = 42.0;
		layout(&mut tree, &ById, &PARAMS);
		assert_eq!(tree.get(NodeId(6)).unwrap().x, 42.0);
		assert_eq!(tree.get(NodeId(5)).unwrap().x, 5.0);
		assert_eq!(tree.get(NodeId(1)).unwrap().extent, 8.0);
	}

	#[test]
	fn bounds_span_visible_nodes() {
		let mut tree = sample();
		let bounds = layout(&mut tree, &ById, &PARAMS);
		assert_eq!(bounds.min_x, 0.0);
		assert_eq!(bounds.max_x, 5.0);
		assert_eq!(bounds.depth_extent, 300.0);
	}

	#[test]
	fn view_box_adds_vertical_margins() {
		let bounds = Bounds {
			min_x: -40.0,
			max_x: 60.0,
			depth_extent: 0.0,
		};
		let vb = ViewBox::for_bounds(&bounds, 800.0, 10.0, 10.0);
		assert_eq!(
			vb,
			ViewBox {
				min_x: 0.0,
				min_y: -40.0,
				width: 800.0,
				height: 120.0,
			}
		);
	}

	proptest! {
		#[test]
		fn every_visible_node_lies_within_bounds(data in arb_tree()) {
			let mut tree = Hierarchy::load(&data, default_expansion).unwrap();
			let bounds = layout(&mut tree, &FlexTree, &PARAMS);
			for id in tree.visible() {
				let x = tree.get(id).unwrap().x;
				prop_assert!(bounds.contains(x), "{x} outside {bounds:?}");
			}
		}
	}
}
