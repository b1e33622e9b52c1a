//! Error types for the explore canvas.

use thiserror::Error;

/// Errors surfaced by data loading and mode initialization.
///
/// Unresolved references are soft: the affected issue is skipped with a
/// warning and the topic keeps its remaining issues. Load failures block
/// initialization and are shown to the host page.
#[derive(Debug, Error)]
pub enum ExploreError {
	/// The embedded data model is missing or unusable.
	#[error("explore data failed to load: {0}")]
	DataLoad(String),

	/// The embedded data model did not parse.
	#[error("explore data failed to parse: {0}")]
	Parse(#[from] serde_json::Error),

	/// A topic referenced an issue id absent from the canvas.
	#[error("issue \"{id}\" is not present on the canvas")]
	UnresolvedIssue {
		/// The missing issue identifier.
		id: String,
	},
}
