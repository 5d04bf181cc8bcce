//! Tidy tree layout with variable node sizes.
//!
//! Each subtree is laid out with its root at cross-axis 0 and summarized by a
//! per-level contour (leftmost and rightmost occupied cross-axis edge). Sibling
//! subtrees are packed left to right: each one is shifted just far enough that
//! at every level they share it clears the accumulated contour by `spacing`.
//! The parent is then centered over the span covered by its children's boxes,
//! from the first child's left edge to the last child's right edge.
//!
//! Nodes at the same depth share a depth-axis position whenever their parents
//! have equal depth-axis sizes, which is how the adapter always sizes them.

use super::layout::{Placement, SizedNode, TreeLayout};

/// Default layout engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlexTree;

impl TreeLayout for FlexTree {
	fn compute_layout(&self, root: &SizedNode, spacing: f64) -> Vec<Placement> {
		walk(root, 0.0, spacing).placements
	}
}

/// A laid out subtree, positioned relative to its own root.
struct Subtree {
	placements: Vec<Placement>,
	/// `(left edge, right edge)` per level, level 0 being the subtree root.
	contour: Vec<(f64, f64)>,
}

fn walk(node: &SizedNode, y: f64, spacing: f64) -> Subtree {
	let half = node.size[0] / 2.0;
	let mut placements = vec![Placement {
		id: node.id,
		x: 0.0,
		y,
	}];
	let mut contour = vec![(-half, half)];
	if node.children.is_empty() {
		return Subtree {
			placements,
			contour,
		};
	}

	let child_y = y + node.size[1];
	let subtrees: Vec<Subtree> = node
		.children
		.iter()
		.map(|child| walk(child, child_y, spacing))
		.collect();

	let mut merged: Vec<(f64, f64)> = Vec::new();
	let mut offsets = Vec::with_capacity(subtrees.len());
	for sub in &subtrees {
		let offset = if merged.is_empty() {
			0.0
		} else {
			merged
				.iter()
				.zip(&sub.contour)
				.map(|(&(_, right), &(left, _))| right + spacing - left)
				.fold(f64::NEG_INFINITY, f64::max)
		};
		for (level, &(left, right)) in sub.contour.iter().enumerate() {
			let (left, right) = (left + offset, right + offset);
			match merged.get_mut(level) {
				Some(edge) => {
					edge.0 = edge.0.min(left);
					edge.1 = edge.1.max(right);
				}
				None => merged.push((left, right)),
			}
		}
		offsets.push(offset);
	}

	// Center over the span from the first child's left edge to the last
	// child's right edge, not over the child centers.
	let (span_left, span_right) = merged[0];
	let center = (span_left + span_right) / 2.0;
	for (sub, offset) in subtrees.into_iter().zip(offsets) {
		placements.extend(sub.placements.into_iter().map(|p| Placement {
			x: p.x + offset - center,
			..p
		}));
	}
	contour.extend(
		merged
			.into_iter()
			.map(|(left, right)| (left - center, right - center)),
	);

	Subtree {
		placements,
		contour,
	}
}
