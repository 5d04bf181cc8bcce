//! Input data structures for the tree chart component.

use serde::Deserialize;

/// One element of the hierarchical input document.
///
/// Mirrors the usual `flare.json` shape: every object carries a `name` and an
/// optional `children` array of the same shape. Any other fields (`size`,
/// `value`, ...) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TreeData {
	/// Display label. Required and must not be blank.
	pub name: String,
	/// Nested children. Absent or `null` for leaves.
	#[serde(default)]
	pub children: Option<Vec<TreeData>>,
}

impl TreeData {
	/// A leaf element with no children.
	pub fn leaf(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			children: None,
		}
	}

	/// An element with the given children.
	pub fn branch(name: impl Into<String>, children: Vec<TreeData>) -> Self {
		Self {
			name: name.into(),
			children: Some(children),
		}
	}

	pub(crate) fn child_slice(&self) -> &[TreeData] {
		self.children.as_deref().unwrap_or_default()
	}
}
