/// Which end of a node pair failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairEnd {
	/// The first node argument.
	First,
	/// The second node argument.
	Second,
}

impl std::fmt::Display for PairEnd {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PairEnd::First => f.write_str("first"),
			PairEnd::Second => f.write_str("second"),
		}
	}
}

/// Errors reported by viewer operations on node pairs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewerError {
	/// A node named by the operation has no particle in the viewer.
	#[error("{end} node has not been added to the viewer")]
	MissingNode {
		/// Which argument was unknown.
		end: PairEnd,
	},
}

/// Result type for viewer operations.
pub type Result<T> = std::result::Result<T, ViewerError>;
