use std::fmt;

/// Opaque node identifier, unique within a graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
	/// Wrap a raw identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// The raw identifier.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for NodeId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

/// Colors used while a node is selected or dragged.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightColor {
	/// Fill color.
	pub background: String,
	/// Outline color.
	pub border: String,
}

/// Structured node color: fill, outline and the pair used on interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeColor {
	/// Fill color.
	pub background: String,
	/// Outline color.
	pub border: String,
	/// Colors shown while the node is grabbed.
	pub highlight: HighlightColor,
}

impl NodeColor {
	/// Same color for fill, outline and highlight.
	pub fn solid(color: &str) -> Self {
		Self::with_border(color, color)
	}

	/// Fill and outline, reused for the highlight pair.
	pub fn with_border(background: &str, border: &str) -> Self {
		Self {
			background: background.to_owned(),
			border: border.to_owned(),
			highlight: HighlightColor {
				background: background.to_owned(),
				border: border.to_owned(),
			},
		}
	}
}

/// Default node radius in world units.
pub const DEFAULT_NODE_SIZE: f64 = 5.0;
/// Default outline width in world units.
pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;

/// Everything a highlight may change on a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
	/// Fill and outline colors.
	pub color: NodeColor,
	/// Outline width.
	pub border_width: f64,
	/// Node radius.
	pub size: f64,
}

impl NodeStyle {
	/// Style with default border width and size.
	pub fn new(color: NodeColor) -> Self {
		Self {
			color,
			border_width: DEFAULT_BORDER_WIDTH,
			size: DEFAULT_NODE_SIZE,
		}
	}
}

/// Snapshot of a node as the widget exposes it.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
	/// Node identifier.
	pub id: NodeId,
	/// Display label, matched by search.
	pub label: Option<String>,
	/// Current style.
	pub style: NodeStyle,
	/// Style captured before any highlight; the restore target.
	pub original_style: Option<NodeStyle>,
}

/// Partial update merged into the node with the same id.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePatch {
	/// Target node.
	pub id: NodeId,
	/// Replacement style, if any.
	pub style: Option<NodeStyle>,
	/// Replacement original style, if any.
	pub original_style: Option<NodeStyle>,
}

impl NodePatch {
	/// Empty patch for `id`.
	pub fn new(id: NodeId) -> Self {
		Self {
			id,
			style: None,
			original_style: None,
		}
	}

	/// Set the current style.
	pub fn style(mut self, style: NodeStyle) -> Self {
		self.style = Some(style);
		self
	}

	/// Set the original style.
	pub fn original_style(mut self, style: NodeStyle) -> Self {
		self.original_style = Some(style);
		self
	}
}
