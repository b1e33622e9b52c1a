//! Data model for the explore canvas, as embedded by the host page.

use serde::Deserialize;

/// A reference to one issue belonging to a topic.
#[derive(Clone, Debug, Deserialize)]
pub struct IssueRecord {
	/// Identifier used to look the issue item up on the canvas.
	pub id: String,
	/// Optional display title.
	pub title: Option<String>,
}

/// One topic: a named cluster of issues.
#[derive(Clone, Debug, Deserialize)]
pub struct TopicRecord {
	/// Stable identifier for this topic.
	pub id: String,
	/// Optional display name, drawn as the cluster label.
	pub name: Option<String>,
	/// Ordered issues belonging to this topic.
	pub issues: Vec<IssueRecord>,
}

/// Complete explore model: the ordered topic list.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExploreData {
	pub topics: Vec<TopicRecord>,
}
