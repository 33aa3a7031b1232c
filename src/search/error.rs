use thiserror::Error;

use super::node::NodeId;

/// Failures of the search controller. None of them reach the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
	/// The graph widget did not exist when the warm-up period ended.
	#[error("Network visualization not found")]
	WidgetUnavailable,
	/// A result referenced a node the graph no longer holds.
	#[error("Node not found: {0}")]
	NodeNotFound(NodeId),
}

/// Failures while reading [`SearchConfig`](super::SearchConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The inline JSON config is malformed.
	#[error("Failed to parse search config: {0}")]
	Parse(#[from] serde_json::Error),
}
