use super::node::NodeId;

/// One matching node, as listed in the results panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
	/// Matching node.
	pub id: NodeId,
	/// Its label.
	pub label: String,
}

/// Content of the results panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultsView {
	/// Nothing to show.
	#[default]
	Empty,
	/// A search ran and matched nothing.
	NoResults,
	/// Header plus one entry per match.
	Matches(Vec<SearchResult>),
}

/// Where a document click landed, resolved by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
	/// Inside the results panel.
	ResultsPanel,
	/// The search text field.
	SearchInput,
	/// The search trigger button.
	SearchButton,
	/// Anywhere else.
	Elsewhere,
}

/// What the caller should do with the key event after the controller saw it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyResponse {
	/// Suppress the browser's default action.
	pub prevent_default: bool,
}

/// When a keyup in the search field should run the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchTrigger {
	/// Now, cancelling any pending search.
	Immediate,
	/// After this many milliseconds without further input.
	Debounced(u32),
}

/// The UI elements the controller talks to: search input, results panel and
/// trigger button.
pub trait SearchPorts {
	/// Current text of the search input.
	fn query(&self) -> String;

	/// Replace the text of the search input.
	fn set_query(&mut self, query: &str);

	/// Display the panel with new content. Clears the active entry.
	fn show_results(&mut self, view: ResultsView);

	/// Hide the panel, keeping its content.
	fn hide_results(&mut self);

	/// Hide and empty the panel.
	fn clear_results(&mut self);

	/// Mark the entry for `id` as the selected one.
	fn set_active(&mut self, id: &NodeId);

	/// Move keyboard focus to the search input.
	fn focus_input(&mut self);
}
