use std::cell::RefCell;
use std::rc::Rc;

use super::state::ForceGraphState;
use crate::search::{FocusOptions, GraphWidget, NodeId, NodePatch, NodeView};

/// Shared slot for the canvas state.
///
/// Empty until the canvas has mounted and built its graph, which is why the
/// search panel waits before binding to it.
#[derive(Clone, Default)]
pub struct GraphHandle(Rc<RefCell<Option<ForceGraphState>>>);

impl GraphHandle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn install(&self, state: ForceGraphState) {
		*self.0.borrow_mut() = Some(state);
	}

	pub fn is_ready(&self) -> bool {
		self.0.borrow().is_some()
	}

	pub fn with<R>(&self, f: impl FnOnce(&ForceGraphState) -> R) -> Option<R> {
		self.0.borrow().as_ref().map(f)
	}

	pub fn with_mut<R>(&self, f: impl FnOnce(&mut ForceGraphState) -> R) -> Option<R> {
		self.0.borrow_mut().as_mut().map(f)
	}
}

impl GraphWidget for GraphHandle {
	fn node_ids(&self) -> Vec<NodeId> {
		self.with(|s| s.node_ids()).unwrap_or_default()
	}

	fn node(&self, id: &NodeId) -> Option<NodeView> {
		self.with(|s| s.node(id)).flatten()
	}

	fn update_node(&mut self, patch: NodePatch) {
		self.with_mut(|s| s.update_node(patch));
	}

	fn focus(&mut self, id: &NodeId, options: FocusOptions) {
		self.with_mut(|s| s.focus(id, options));
	}
}
