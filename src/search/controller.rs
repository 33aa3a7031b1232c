use log::debug;

use super::config::SearchConfig;
use super::error::SearchError;
use super::node::{NodeId, NodePatch};
use super::ports::{ClickTarget, KeyResponse, ResultsView, SearchPorts, SearchResult, SearchTrigger};
use super::widget::GraphWidget;

/// Binds a search field and results panel to a graph widget.
///
/// The controller owns no node state of its own. Original styles live on the
/// nodes (see [`NodeView::original_style`](super::NodeView::original_style)),
/// so a second controller bound to the same widget restores to the same
/// originals.
pub struct SearchController<W, P> {
	widget: W,
	ports: P,
	config: SearchConfig,
}

impl<W: GraphWidget, P: SearchPorts> SearchController<W, P> {
	/// Bind to `widget` once the warm-up period is over.
	///
	/// Captures the original style of every node before returning.
	pub fn attach(widget: Option<W>, ports: P, config: SearchConfig) -> Result<Self, SearchError> {
		let widget = widget.ok_or(SearchError::WidgetUnavailable)?;
		let mut controller = Self {
			widget,
			ports,
			config,
		};
		controller.capture_original_styles();
		Ok(controller)
	}

	/// Record the current style as original on every node that has none yet.
	/// Returns how many nodes were captured.
	pub fn capture_original_styles(&mut self) -> usize {
		let mut captured = 0;
		for id in self.widget.node_ids() {
			let Some(node) = self.widget.node(&id) else {
				continue;
			};
			if node.original_style.is_none() {
				self.widget
					.update_node(NodePatch::new(id).original_style(node.style));
				captured += 1;
			}
		}
		captured
	}

	/// Put every node whose style drifted back to its original.
	pub fn restore_all(&mut self) {
		for id in self.widget.node_ids() {
			let Some(node) = self.widget.node(&id) else {
				continue;
			};
			if let Some(original) = node.original_style {
				if node.style != original {
					self.widget.update_node(NodePatch::new(id).style(original));
				}
			}
		}
	}

	/// Filter nodes by label and show the matches.
	///
	/// Queries shorter than `min_query_len` hide the panel. An empty query
	/// also restores node colors when `reset_on_empty_query` is set.
	pub fn search(&mut self, query: &str) -> Vec<SearchResult> {
		let len = query.chars().count();
		if len < self.config.min_query_len {
			self.ports.clear_results();
			if len == 0 && self.config.reset_on_empty_query {
				self.restore_all();
			}
			return Vec::new();
		}

		self.restore_all();

		let needle = query.to_lowercase();
		let results: Vec<SearchResult> = self
			.widget
			.node_ids()
			.into_iter()
			.filter_map(|id| {
				let label = self.widget.node(&id)?.label?;
				label
					.to_lowercase()
					.contains(&needle)
					.then_some(SearchResult { id, label })
			})
			.collect();

		debug!("search {:?}: {} match(es)", query, results.len());
		if results.is_empty() {
			self.ports.show_results(ResultsView::NoResults);
		} else {
			self.ports.show_results(ResultsView::Matches(results.clone()));
		}
		results
	}

	/// Search for whatever the input currently holds.
	pub fn search_current(&mut self) -> Vec<SearchResult> {
		let query = self.ports.query();
		self.search(&query)
	}

	/// Highlight one node and move the camera onto it.
	pub fn select_result(&mut self, id: &NodeId) -> Result<(), SearchError> {
		let Some(node) = self.widget.node(id) else {
			return Err(SearchError::NodeNotFound(id.clone()));
		};

		// nodes added after attach have no original yet
		self.capture_original_styles();
		self.restore_all();

		let base = node.original_style.unwrap_or(node.style);
		self.widget
			.update_node(NodePatch::new(id.clone()).style(self.config.highlight_style(&base)));
		self.widget.focus(id, self.config.focus_options());
		self.ports.set_active(id);
		debug!("selected {}", id);
		Ok(())
	}

	/// Empty the input and panel and restore every node.
	pub fn clear_search(&mut self) {
		self.ports.set_query("");
		self.ports.clear_results();
		self.restore_all();
	}

	/// Document-level keyboard shortcuts.
	pub fn handle_key(&mut self, key: &str, focus_in_text_input: bool) -> KeyResponse {
		match key {
			"/" if !focus_in_text_input => {
				self.ports.focus_input();
				KeyResponse {
					prevent_default: true,
				}
			}
			"Escape" => {
				self.clear_search();
				KeyResponse::default()
			}
			_ => KeyResponse::default(),
		}
	}

	/// Clicks outside the search controls dismiss the panel.
	pub fn handle_click(&mut self, target: ClickTarget) {
		if target == ClickTarget::Elsewhere {
			self.ports.hide_results();
		}
	}

	/// Decide when a keyup in the search field should search.
	pub fn plan_keyup(&self, key: &str, query: &str) -> SearchTrigger {
		if key == "Enter"
			|| self.config.debounce_ms == 0
			|| query.chars().count() < self.config.min_query_len
		{
			SearchTrigger::Immediate
		} else {
			SearchTrigger::Debounced(self.config.debounce_ms)
		}
	}

	/// The bound widget.
	pub fn widget(&self) -> &W {
		&self.widget
	}

	/// The bound UI ports.
	pub fn ports(&self) -> &P {
		&self.ports
	}

	/// Active configuration.
	pub fn config(&self) -> &SearchConfig {
		&self.config
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::search::node::{NodeColor, NodeStyle, NodeView};
	use crate::search::widget::FocusOptions;

	#[derive(Default)]
	struct MemoryGraph {
		order: Vec<NodeId>,
		nodes: HashMap<NodeId, NodeView>,
		focused: Vec<(NodeId, FocusOptions)>,
		updates: usize,
	}

	impl MemoryGraph {
		fn with_labels(labels: &[(&str, &str)]) -> Self {
			let mut graph = Self::default();
			for (id, label) in labels {
				graph.push(id, Some(label), "#97c2fc");
			}
			graph
		}

		fn push(&mut self, id: &str, label: Option<&str>, color: &str) {
			let id = NodeId::from(id);
			self.order.push(id.clone());
			self.nodes.insert(
				id.clone(),
				NodeView {
					id,
					label: label.map(str::to_owned),
					style: NodeStyle::new(NodeColor::solid(color)),
					original_style: None,
				},
			);
		}

		fn style(&self, id: &str) -> &NodeStyle {
			&self.nodes[&NodeId::from(id)].style
		}

		fn original(&self, id: &str) -> Option<&NodeStyle> {
			self.nodes[&NodeId::from(id)].original_style.as_ref()
		}

		fn highlighted(&self, highlight: &NodeColor) -> Vec<NodeId> {
			self.order
				.iter()
				.filter(|id| &self.nodes[*id].style.color == highlight)
				.cloned()
				.collect()
		}

		fn all_original(&self) -> bool {
			self.nodes
				.values()
				.all(|n| n.original_style.as_ref() == Some(&n.style))
		}
	}

	impl GraphWidget for MemoryGraph {
		fn node_ids(&self) -> Vec<NodeId> {
			self.order.clone()
		}

		fn node(&self, id: &NodeId) -> Option<NodeView> {
			self.nodes.get(id).cloned()
		}

		fn update_node(&mut self, patch: NodePatch) {
			let Some(node) = self.nodes.get_mut(&patch.id) else {
				return;
			};
			self.updates += 1;
			if let Some(style) = patch.style {
				node.style = style;
			}
			if let Some(original) = patch.original_style {
				node.original_style = Some(original);
			}
		}

		fn focus(&mut self, id: &NodeId, options: FocusOptions) {
			self.focused.push((id.clone(), options));
		}
	}

	#[derive(Default)]
	struct RecordingPorts {
		query: String,
		visible: bool,
		view: ResultsView,
		active: Option<NodeId>,
		focus_requests: usize,
	}

	impl SearchPorts for RecordingPorts {
		fn query(&self) -> String {
			self.query.clone()
		}

		fn set_query(&mut self, query: &str) {
			self.query = query.to_owned();
		}

		fn show_results(&mut self, view: ResultsView) {
			self.visible = true;
			self.view = view;
			self.active = None;
		}

		fn hide_results(&mut self) {
			self.visible = false;
		}

		fn clear_results(&mut self) {
			self.visible = false;
			self.view = ResultsView::Empty;
			self.active = None;
		}

		fn set_active(&mut self, id: &NodeId) {
			self.active = Some(id.clone());
		}

		fn focus_input(&mut self) {
			self.focus_requests += 1;
		}
	}

	type Controller = SearchController<MemoryGraph, RecordingPorts>;

	fn movies() -> MemoryGraph {
		MemoryGraph::with_labels(&[("1", "The Matrix"), ("2", "Matrix Reloaded"), ("3", "Inception")])
	}

	fn controller(graph: MemoryGraph) -> Controller {
		SearchController::attach(Some(graph), RecordingPorts::default(), SearchConfig::default())
			.unwrap()
	}

	fn highlight() -> NodeColor {
		let config = SearchConfig::default();
		NodeColor::with_border(&config.highlight_color, &config.highlight_border)
	}

	fn ids(results: &[SearchResult]) -> Vec<&str> {
		results.iter().map(|r| r.id.as_str()).collect()
	}

	#[test]
	fn attach_without_widget_fails() {
		let result = Controller::attach(None, RecordingPorts::default(), SearchConfig::default());
		assert_eq!(result.err(), Some(SearchError::WidgetUnavailable));
	}

	#[test]
	fn attach_captures_current_styles() {
		let mut graph = movies();
		graph.push("4", Some("Memento"), "#ff0000");
		let ctl = controller(graph);
		assert!(ctl.widget().all_original());
		assert_eq!(ctl.widget().original("4").unwrap().color.background, "#ff0000");
	}

	#[test]
	fn capture_runs_once() {
		let mut ctl = controller(movies());
		ctl.select_result(&"1".into()).unwrap();
		assert_eq!(ctl.capture_original_styles(), 0);
		assert_eq!(ctl.widget().original("1").unwrap().color, NodeColor::solid("#97c2fc"));

		// a second controller on the same graph must not adopt the highlight
		let graph = ctl.widget;
		let again = controller(graph);
		assert_eq!(again.widget().original("1").unwrap().color, NodeColor::solid("#97c2fc"));
	}

	#[test]
	fn search_matches_case_insensitively_in_order() {
		let mut ctl = controller(movies());
		let results = ctl.search("matrix");
		assert_eq!(ids(&results), ["1", "2"]);
		assert!(ctl.ports().visible);
		assert_eq!(ctl.ports().view, ResultsView::Matches(results));

		assert_eq!(ids(&ctl.search("INCEP")), ["3"]);
	}

	#[test]
	fn search_does_not_trim() {
		let mut ctl = controller(movies());
		assert_eq!(ids(&ctl.search("x r")), ["2"]);
		assert!(ctl.search(" matrix ").is_empty());
	}

	#[test]
	fn search_without_matches_shows_indicator() {
		let mut ctl = controller(movies());
		assert!(ctl.search("xyz").is_empty());
		assert!(ctl.ports().visible);
		assert_eq!(ctl.ports().view, ResultsView::NoResults);
	}

	#[test]
	fn unlabeled_nodes_never_match() {
		let mut graph = movies();
		graph.push("4", None, "#97c2fc");
		let mut ctl = controller(graph);
		assert_eq!(ids(&ctl.search("ma")), ["1", "2"]);
	}

	#[test]
	fn one_char_query_hides_without_touching_colors() {
		let mut ctl = controller(movies());
		ctl.search("matrix");
		ctl.select_result(&"2".into()).unwrap();
		let updates = ctl.widget().updates;

		assert!(ctl.search("m").is_empty());
		assert!(!ctl.ports().visible);
		assert_eq!(ctl.ports().view, ResultsView::Empty);
		assert_eq!(ctl.widget().updates, updates);
		assert_eq!(ctl.widget().highlighted(&highlight()), [NodeId::from("2")]);
	}

	#[test]
	fn empty_query_resets_when_configured() {
		let mut ctl = controller(movies());
		ctl.select_result(&"2".into()).unwrap();
		assert!(ctl.search("").is_empty());
		assert!(ctl.widget().all_original());
	}

	#[test]
	fn empty_query_keeps_colors_when_not_configured() {
		let config = SearchConfig::vivid();
		let mut ctl = Controller::attach(Some(movies()), RecordingPorts::default(), config).unwrap();
		ctl.select_result(&"2".into()).unwrap();
		ctl.search("");
		assert!(!ctl.ports().visible);
		assert_eq!(ctl.widget().highlighted(&highlight()), [NodeId::from("2")]);
	}

	#[test]
	fn new_search_clears_stale_highlight() {
		let mut ctl = controller(movies());
		ctl.select_result(&"3".into()).unwrap();
		ctl.search("matrix");
		assert!(ctl.widget().all_original());
		assert_eq!(ctl.ports().active, None);
	}

	#[test]
	fn search_current_reads_the_input() {
		let mut ctl = controller(movies());
		ctl.ports.query = "reloaded".into();
		assert_eq!(ids(&ctl.search_current()), ["2"]);
	}

	#[test]
	fn select_highlights_focuses_and_marks_active() {
		let mut ctl = controller(movies());
		ctl.search("matrix");
		ctl.select_result(&"2".into()).unwrap();

		let style = ctl.widget().style("2");
		assert_eq!(style.color, highlight());
		assert_eq!(style.border_width, 3.0);
		assert_eq!(style.size, 9.0);

		let (focused, options) = ctl.widget().focused.last().unwrap();
		assert_eq!(focused.as_str(), "2");
		assert_eq!(options.scale, 15.0);
		assert_eq!(options.animation_duration_ms, 1000);
		assert_eq!(ctl.ports().active, Some(NodeId::from("2")));
	}

	#[test]
	fn select_is_idempotent() {
		let mut ctl = controller(movies());
		ctl.select_result(&"1".into()).unwrap();
		let once: Vec<NodeStyle> = ["1", "2", "3"].iter().map(|id| ctl.widget().style(id).clone()).collect();
		ctl.select_result(&"1".into()).unwrap();
		let twice: Vec<NodeStyle> = ["1", "2", "3"].iter().map(|id| ctl.widget().style(id).clone()).collect();
		assert_eq!(once, twice);
		assert_eq!(ctl.widget().highlighted(&highlight()), [NodeId::from("1")]);
	}

	#[test]
	fn selecting_another_node_moves_the_highlight() {
		let mut ctl = controller(movies());
		ctl.select_result(&"2".into()).unwrap();
		ctl.select_result(&"1".into()).unwrap();
		assert_eq!(Some(ctl.widget().style("2")), ctl.widget().original("2"));
		assert_eq!(ctl.widget().style("1").color, highlight());
		assert_eq!(ctl.widget().highlighted(&highlight()), [NodeId::from("1")]);
	}

	#[test]
	fn select_unknown_node_is_rejected_without_mutation() {
		let mut ctl = controller(movies());
		ctl.select_result(&"1".into()).unwrap();
		let updates = ctl.widget().updates;

		let err = ctl.select_result(&"42".into()).unwrap_err();
		assert_eq!(err, SearchError::NodeNotFound("42".into()));
		assert_eq!(ctl.widget().updates, updates);
		assert_eq!(ctl.widget().focused.len(), 1);
		assert_eq!(ctl.widget().highlighted(&highlight()), [NodeId::from("1")]);
	}

	#[test]
	fn select_captures_nodes_added_after_attach() {
		let mut ctl = controller(movies());
		ctl.widget.push("4", Some("Interstellar"), "#00ff00");
		ctl.select_result(&"4".into()).unwrap();
		assert_eq!(ctl.widget().original("4").unwrap().color, NodeColor::solid("#00ff00"));
		ctl.clear_search();
		assert_eq!(ctl.widget().style("4").color, NodeColor::solid("#00ff00"));
	}

	#[test]
	fn clear_restores_from_any_state() {
		let mut ctl = controller(movies());
		ctl.clear_search();
		assert!(ctl.widget().all_original());

		ctl.ports.query = "matrix".into();
		ctl.search_current();
		ctl.clear_search();
		assert!(ctl.widget().all_original());
		assert_eq!(ctl.ports().view, ResultsView::Empty);

		ctl.ports.query = "matrix".into();
		ctl.search_current();
		ctl.select_result(&"1".into()).unwrap();
		ctl.clear_search();
		assert!(ctl.widget().all_original());
		assert!(!ctl.ports().visible);
		assert_eq!(ctl.ports().query, "");
		assert_eq!(ctl.ports().active, None);
	}

	#[test]
	fn slash_focuses_input_outside_text_fields() {
		let mut ctl = controller(movies());
		assert!(ctl.handle_key("/", false).prevent_default);
		assert_eq!(ctl.ports().focus_requests, 1);

		assert!(!ctl.handle_key("/", true).prevent_default);
		assert_eq!(ctl.ports().focus_requests, 1);
	}

	#[test]
	fn escape_clears_regardless_of_focus() {
		let mut ctl = controller(movies());
		ctl.ports.query = "matrix".into();
		ctl.search_current();
		ctl.select_result(&"2".into()).unwrap();

		assert!(!ctl.handle_key("Escape", true).prevent_default);
		assert!(ctl.widget().all_original());
		assert_eq!(ctl.ports().query, "");
		assert!(!ctl.ports().visible);
	}

	#[test]
	fn other_keys_are_ignored() {
		let mut ctl = controller(movies());
		ctl.search("matrix");
		assert_eq!(ctl.handle_key("a", false), KeyResponse::default());
		assert!(ctl.ports().visible);
	}

	#[test]
	fn click_outside_hides_without_touching_colors() {
		let mut ctl = controller(movies());
		ctl.search("matrix");
		ctl.select_result(&"1".into()).unwrap();

		for inside in [ClickTarget::ResultsPanel, ClickTarget::SearchInput, ClickTarget::SearchButton] {
			ctl.handle_click(inside);
			assert!(ctl.ports().visible);
		}

		ctl.handle_click(ClickTarget::Elsewhere);
		assert!(!ctl.ports().visible);
		assert!(matches!(ctl.ports().view, ResultsView::Matches(_)));
		assert_eq!(ctl.widget().style("1").color, highlight());
	}

	#[test]
	fn keyup_planning_follows_debounce_policy() {
		let ctl = controller(movies());
		assert_eq!(ctl.plan_keyup("Enter", "ma"), SearchTrigger::Immediate);
		assert_eq!(ctl.plan_keyup("a", "ma"), SearchTrigger::Debounced(300));
		assert_eq!(ctl.plan_keyup("m", "m"), SearchTrigger::Immediate);
		assert_eq!(ctl.plan_keyup("Backspace", ""), SearchTrigger::Immediate);

		let eager = Controller::attach(Some(movies()), RecordingPorts::default(), SearchConfig::subtle())
			.unwrap();
		assert_eq!(eager.plan_keyup("a", "matrix"), SearchTrigger::Immediate);
	}
}
