use crate::search::NodeId;

/// A node as handed to the canvas.
#[derive(Clone, Debug)]
pub struct GraphNode {
	pub id: NodeId,
	pub label: Option<String>,
	/// Explicit fill; falls back to the group palette.
	pub color: Option<String>,
	pub group: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct GraphLink {
	pub source: NodeId,
	pub target: NodeId,
}

#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
