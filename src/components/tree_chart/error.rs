//! Load-time failures. Nothing after a successful load can fail.

use thiserror::Error;

/// Reasons the input document could not be turned into a diagram.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The page has no element carrying the tree data.
	#[error("tree data element `#{0}` not found")]
	MissingSource(String),
	/// The document is not valid JSON or does not match the expected shape.
	#[error("failed to parse tree data: {0}")]
	Parse(#[from] serde_json::Error),
	/// A node has an empty (or whitespace-only) name.
	#[error("node at {path} has a blank name")]
	BlankName {
		/// Child-index path from the root, e.g. `root/2/0`.
		path: String,
	},
}
