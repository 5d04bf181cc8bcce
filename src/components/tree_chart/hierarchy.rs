//! Node graph built once from the input document.
//!
//! Nodes live in an arena indexed by [`NodeId`], assigned in pre-order. The
//! shape of the tree never changes after load; only the expand flag and the
//! layout coordinates of each node mutate.

use log::debug;

use super::error::LoadError;
use super::theme::{BranchPalette, Color};
use super::types::TreeData;

/// Stable node identity: the node's pre-order index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// Expand/collapse state of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
	/// Children participate in layout.
	Expanded,
	/// Children are cached but hidden.
	Collapsed,
	/// No children at all; cannot be toggled.
	Leaf,
}

/// A single node of the diagram.
#[derive(Clone, Debug)]
pub struct Node {
	pub id: NodeId,
	pub name: String,
	pub parent: Option<NodeId>,
	pub depth: usize,
	all_children: Vec<NodeId>,
	expanded: bool,
	/// Cross-axis coordinate from the latest layout pass.
	pub x: f64,
	/// Depth-axis coordinate from the latest layout pass.
	pub y: f64,
	/// Cross-axis coordinate captured before the latest layout pass.
	pub x0: f64,
	/// Depth-axis coordinate captured before the latest layout pass.
	pub y0: f64,
	/// Cross-axis space reserved for this node's outgoing links.
	pub extent: f64,
	pub color: Option<Color>,
}

impl Node {
	/// Full, load-time child list. Never changes.
	pub fn all_children(&self) -> &[NodeId] {
		&self.all_children
	}

	/// Children currently participating in layout.
	///
	/// Either `None` (collapsed or leaf) or the complete child list.
	pub fn active_children(&self) -> Option<&[NodeId]> {
		(self.expanded && !self.all_children.is_empty()).then_some(self.all_children.as_slice())
	}

	pub fn is_leaf(&self) -> bool {
		self.all_children.is_empty()
	}

	pub fn state(&self) -> NodeState {
		match (self.is_leaf(), self.expanded) {
			(true, _) => NodeState::Leaf,
			(false, true) => NodeState::Expanded,
			(false, false) => NodeState::Collapsed,
		}
	}
}

/// Default initial expansion: the root and every node whose name is exactly
/// seven characters long (counted in UTF-16 code units) start expanded.
pub fn default_expansion(node: &Node) -> bool {
	node.depth == 0 || node.name.encode_utf16().count() == 7
}

/// Parent-to-child edge between two visible nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	pub source: NodeId,
	pub target: NodeId,
}

/// The loaded tree.
#[derive(Clone, Debug)]
pub struct Hierarchy {
	nodes: Vec<Node>,
}

impl Hierarchy {
	/// Parse, validate and load a JSON document.
	pub fn from_json(text: &str, expand: impl Fn(&Node) -> bool) -> Result<Self, LoadError> {
		let data: TreeData = serde_json::from_str(text)?;
		Self::load(&data, expand)
	}

	/// Build the node arena from already-parsed data.
	///
	/// `expand` decides which nodes start expanded; it sees each node with its
	/// name, depth and parent already set.
	pub fn load(data: &TreeData, expand: impl Fn(&Node) -> bool) -> Result<Self, LoadError> {
		validate_tree(data)?;

		let mut nodes = Vec::new();
		push_subtree(&mut nodes, data, None, 0);
		for node in &mut nodes {
			node.expanded = expand(node);
		}

		debug!("tree-chart: loaded {} nodes", nodes.len());
		Ok(Self { nodes })
	}

	/// The root node.
	pub fn root(&self) -> &Node {
		&self.nodes[0]
	}

	/// Id of the root node (always 0).
	pub fn root_id(&self) -> NodeId {
		NodeId(0)
	}

	/// Node by id, `None` for unknown ids.
	pub fn get(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.0)
	}

	pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.get_mut(id.0)
	}

	/// Number of nodes, visible or not.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Always `false` for a loaded tree.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Every node in pre-order, visible or not.
	pub fn descendants(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter()
	}

	/// Nodes reachable from the root through active children, in pre-order.
	pub fn visible(&self) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack = vec![self.root_id()];
		while let Some(id) = stack.pop() {
			out.push(id);
			if let Some(children) = self.nodes[id.0].active_children() {
				stack.extend(children.iter().rev().copied());
			}
		}
		out
	}

	/// Active parent→child edges, ordered by target pre-order.
	pub fn links(&self) -> Vec<Link> {
		self.visible()
			.into_iter()
			.filter_map(|id| {
				self.nodes[id.0].parent.map(|source| Link { source, target: id })
			})
			.collect()
	}

	/// Expand state of `id`, `None` for unknown ids.
	pub fn state(&self, id: NodeId) -> Option<NodeState> {
		self.get(id).map(Node::state)
	}

	/// Flip a node between expanded and collapsed.
	///
	/// Returns the new state, or `None` when the node is a leaf or unknown.
	pub fn toggle(&mut self, id: NodeId) -> Option<NodeState> {
		let node = self.nodes.get_mut(id.0)?;
		if node.is_leaf() {
			return None;
		}
		node.expanded = !node.expanded;
		Some(node.state())
	}

	/// Remember current coordinates as the transition origin.
	pub fn stash_positions(&mut self) {
		for node in &mut self.nodes {
			node.x0 = node.x;
			node.y0 = node.y;
		}
	}

	/// Color each top-level branch from the palette; deeper nodes inherit.
	pub fn assign_colors(&mut self, palette: &BranchPalette) {
		let root_color = palette.root;
		// Pre-order guarantees a parent is colored before its children.
		for i in 0..self.nodes.len() {
			let color = match self.nodes[i].parent {
				None => root_color,
				Some(parent) if parent.0 == 0 => {
					let index = self.nodes[0]
						.all_children
						.iter()
						.position(|c| c.0 == i)
						.unwrap_or(0);
					palette.get(index)
				}
				Some(parent) => self.nodes[parent.0].color.unwrap_or(root_color),
			};
			self.nodes[i].color = Some(color);
		}
	}
}

/// Reject documents that parse but cannot be shown: every node needs a
/// non-blank name.
pub fn validate_tree(data: &TreeData) -> Result<(), LoadError> {
	validate(data, &mut vec![])
}

fn validate(data: &TreeData, path: &mut Vec<usize>) -> Result<(), LoadError> {
	if data.name.trim().is_empty() {
		let mut rendered = String::from("root");
		for index in path.iter() {
			rendered.push('/');
			rendered.push_str(&index.to_string());
		}
		return Err(LoadError::BlankName { path: rendered });
	}
	for (index, child) in data.child_slice().iter().enumerate() {
		path.push(index);
		validate(child, path)?;
		path.pop();
	}
	Ok(())
}

fn push_subtree(nodes: &mut Vec<Node>, data: &TreeData, parent: Option<NodeId>, depth: usize) -> NodeId {
	let id = NodeId(nodes.len());
	nodes.push(Node {
		id,
		name: data.name.clone(),
		parent,
		depth,
		all_children: Vec::new(),
		expanded: true,
		x: 0.0,
		y: 0.0,
		x0: 0.0,
		y0: 0.0,
		extent: 0.0,
		color: None,
	});
	let children: Vec<NodeId> = data
		.child_slice()
		.iter()
		.map(|child| push_subtree(nodes, child, Some(id), depth + 1))
		.collect();
	nodes[id.0].all_children = children;
	id
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use proptest::prelude::*;

	pub(crate) fn arb_tree() -> impl Strategy<Value = TreeData> {
		let leaf = "[a-z.]{1,9}".prop_map(TreeData::leaf);
		leaf.prop_recursive(4, 48, 5, |inner| {
			("[a-z.]{1,9}", prop::collection::vec(inner, 0..5))
				.prop_map(|(name, children)| TreeData::branch(name, children))
		})
	}

	fn scenario() -> TreeData {
		TreeData::branch(
			"root",
			vec![
				TreeData::branch("flare.a", vec![TreeData::leaf("x"), TreeData::leaf("y")]),
				TreeData::branch("flar", vec![TreeData::leaf("z")]),
			],
		)
	}

	#[test]
	fn ids_follow_pre_order() {
		let tree = Hierarchy::load(&scenario(), default_expansion).unwrap();
		let names: Vec<&str> = tree.descendants().map(|n| n.name.as_str()).collect();
		assert_eq!(names, ["root", "flare.a", "x", "y", "flar", "z"]);
		let flar = tree.get(NodeId(4)).unwrap();
		assert_eq!(flar.parent, Some(NodeId(0)));
		assert_eq!(flar.all_children(), &[NodeId(5)]);
	}

	#[test]
	fn default_policy_expands_root_and_seven_char_names() {
		let tree = Hierarchy::load(&scenario(), default_expansion).unwrap();
		assert_eq!(tree.state(NodeId(0)), Some(NodeState::Expanded));
		assert_eq!(tree.state(NodeId(1)), Some(NodeState::Expanded));
		assert_eq!(tree.state(NodeId(4)), Some(NodeState::Collapsed));
		assert_eq!(tree.state(NodeId(2)), Some(NodeState::Leaf));
		assert_eq!(
			tree.visible(),
			vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3), NodeId(4)]
		);
	}

	#[test]
	fn custom_policy_is_honored() {
		let tree = Hierarchy::load(&scenario(), |n| n.depth == 0).unwrap();
		assert_eq!(tree.visible(), vec![NodeId(0), NodeId(1), NodeId(4)]);
	}

	#[test]
	fn leaf_toggle_is_rejected() {
		let mut tree = Hierarchy::load(&scenario(), default_expansion).unwrap();
		assert_eq!(tree.toggle(NodeId(2)), None);
		assert_eq!(tree.toggle(NodeId(99)), None);
		assert_eq!(tree.state(NodeId(2)), Some(NodeState::Leaf));
	}

	#[test]
	fn links_cover_visible_edges_only() {
		let tree = Hierarchy::load(&scenario(), default_expansion).unwrap();
		let targets: Vec<NodeId> = tree.links().iter().map(|l| l.target).collect();
		assert_eq!(targets, vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)]);
	}

	#[test]
	fn blank_names_fail_to_load() {
		let data = TreeData::branch("root", vec![TreeData::leaf("a"), TreeData::leaf("  ")]);
		let err = Hierarchy::load(&data, default_expansion).unwrap_err();
		assert!(
			matches!(err, LoadError::BlankName { ref path } if path == "root/1"),
			"unexpected error: {err}"
		);
	}

	#[test]
	fn malformed_json_fails_to_load() {
		for text in [
			"",
			"{",
			r#"{"children": []}"#,
			r#"{"name": "root", "children": [{"size": 3}]}"#,
			r#"{"name": "root", "children": {"name": "a"}}"#,
		] {
			assert!(
				matches!(Hierarchy::from_json(text, default_expansion), Err(LoadError::Parse(_))),
				"expected parse failure for {text:?}"
			);
		}
	}

	#[test]
	fn null_children_and_extra_fields_are_accepted() {
		let tree = Hierarchy::from_json(
			r#"{"name": "root", "children": [{"name": "a", "children": null, "size": 12}]}"#,
			default_expansion,
		)
		.unwrap();
		assert_eq!(tree.len(), 2);
		assert!(tree.get(NodeId(1)).unwrap().is_leaf());
	}

	#[test]
	fn branch_colors_are_inherited() {
		let mut tree = Hierarchy::load(&scenario(), default_expansion).unwrap();
		let palette = BranchPalette::transit();
		tree.assign_colors(&palette);
		assert_eq!(tree.get(NodeId(0)).unwrap().color, Some(Color::BLACK));
		assert_eq!(tree.get(NodeId(1)).unwrap().color, Some(palette.get(0)));
		assert_eq!(tree.get(NodeId(3)).unwrap().color, Some(palette.get(0)));
		assert_eq!(tree.get(NodeId(4)).unwrap().color, Some(palette.get(1)));
		assert_eq!(tree.get(NodeId(5)).unwrap().color, Some(palette.get(1)));
	}

	proptest! {
		#[test]
		fn ids_are_a_stable_permutation(data in arb_tree()) {
			let a = Hierarchy::load(&data, default_expansion).unwrap();
			let b = Hierarchy::load(&data, default_expansion).unwrap();
			let ids: Vec<usize> = a.descendants().map(|n| n.id.0).collect();
			prop_assert_eq!(ids, (0..a.len()).collect::<Vec<_>>());
			for (x, y) in a.descendants().zip(b.descendants()) {
				prop_assert_eq!(x.id, y.id);
				prop_assert_eq!(&x.name, &y.name);
				prop_assert_eq!(x.parent, y.parent);
			}
		}

		#[test]
		fn collapse_then_expand_restores_children(data in arb_tree()) {
			let mut tree = Hierarchy::load(&data, |_| true).unwrap();
			let before: Vec<Vec<NodeId>> =
				tree.descendants().map(|n| n.all_children().to_vec()).collect();
			for i in 0..tree.len() {
				let id = NodeId(i);
				if tree.get(id).unwrap().is_leaf() {
					prop_assert_eq!(tree.toggle(id), None);
					continue;
				}
				prop_assert_eq!(tree.toggle(id), Some(NodeState::Collapsed));
				prop_assert!(tree.get(id).unwrap().active_children().is_none());
				prop_assert_eq!(tree.toggle(id), Some(NodeState::Expanded));
				prop_assert_eq!(
					tree.get(id).unwrap().active_children(),
					Some(before[i].as_slice())
				);
			}
			let after: Vec<Vec<NodeId>> =
				tree.descendants().map(|n| n.all_children().to_vec()).collect();
			prop_assert_eq!(before, after);
		}
	}
}
