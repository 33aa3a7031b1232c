use leptos::prelude::*;

use crate::search::{NodeId, ResultsView, SearchPorts};

/// What the results panel shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelState {
	pub visible: bool,
	pub view: ResultsView,
	pub active: Option<NodeId>,
}

impl PanelState {
	fn show(&mut self, view: ResultsView) {
		self.visible = true;
		self.view = view;
		self.active = None;
	}

	fn hide(&mut self) {
		self.visible = false;
	}

	fn clear(&mut self) {
		*self = Self::default();
	}

	fn activate(&mut self, id: &NodeId) {
		self.active = Some(id.clone());
	}

	pub fn is_active(&self, id: &NodeId) -> bool {
		self.active.as_ref() == Some(id)
	}
}

/// [`SearchPorts`] over the panel's signals and the input element.
#[derive(Clone, Copy)]
pub struct SignalPorts {
	pub query: RwSignal<String>,
	pub panel: RwSignal<PanelState>,
	pub input: NodeRef<leptos::html::Input>,
}

impl SearchPorts for SignalPorts {
	fn query(&self) -> String {
		self.query.get_untracked()
	}

	fn set_query(&mut self, query: &str) {
		self.query.set(query.to_owned());
	}

	fn show_results(&mut self, view: ResultsView) {
		self.panel.update(|p| p.show(view));
	}

	fn hide_results(&mut self) {
		self.panel.update(PanelState::hide);
	}

	fn clear_results(&mut self) {
		self.panel.update(PanelState::clear);
	}

	fn set_active(&mut self, id: &NodeId) {
		self.panel.update(|p| p.activate(id));
	}

	fn focus_input(&mut self) {
		if let Some(input) = self.input.get_untracked() {
			let _ = input.focus();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::search::SearchResult;

	fn matches() -> ResultsView {
		ResultsView::Matches(vec![SearchResult {
			id: "1".into(),
			label: "The Matrix".into(),
		}])
	}

	#[test]
	fn show_replaces_content_and_drops_selection() {
		let mut panel = PanelState::default();
		panel.show(matches());
		panel.activate(&"1".into());
		assert!(panel.is_active(&"1".into()));

		panel.show(ResultsView::NoResults);
		assert!(panel.visible);
		assert_eq!(panel.view, ResultsView::NoResults);
		assert_eq!(panel.active, None);
	}

	#[test]
	fn hide_keeps_content_and_clear_empties() {
		let mut panel = PanelState::default();
		panel.show(matches());
		panel.activate(&"1".into());

		panel.hide();
		assert!(!panel.visible);
		assert_eq!(panel.view, matches());
		assert!(panel.is_active(&"1".into()));

		panel.clear();
		assert_eq!(panel, PanelState::default());
	}
}
