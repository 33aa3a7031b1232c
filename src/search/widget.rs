use serde::Deserialize;

use super::node::{NodeId, NodePatch, NodeView};

/// Easing curve for camera animations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
	/// Constant speed.
	Linear,
	/// Accelerate then decelerate.
	#[default]
	EaseInOutQuad,
	/// Fast start, slow finish.
	EaseOutCubic,
}

impl Easing {
	/// Map linear progress `t` in `[0, 1]` onto the curve.
	pub fn apply(self, t: f64) -> f64 {
		let t = t.clamp(0.0, 1.0);
		match self {
			Self::Linear => t,
			Self::EaseInOutQuad => {
				if t < 0.5 {
					2.0 * t * t
				} else {
					1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
				}
			}
			Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
		}
	}
}

/// Camera focus parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusOptions {
	/// Target zoom factor.
	pub scale: f64,
	/// Animation length; zero jumps immediately.
	pub animation_duration_ms: u32,
	/// Animation curve.
	pub easing: Easing,
}

/// The graph visualization the search controller drives.
///
/// Implementations own the node collection. Every call is short-lived: the
/// controller never holds a node across calls.
pub trait GraphWidget {
	/// All node ids in enumeration order.
	fn node_ids(&self) -> Vec<NodeId>;

	/// Snapshot of one node, `None` if the id is unknown.
	fn node(&self, id: &NodeId) -> Option<NodeView>;

	/// Merge the present fields of `patch` into its node. Unknown ids are ignored.
	fn update_node(&mut self, patch: NodePatch);

	/// Move the camera onto `id`.
	fn focus(&mut self, id: &NodeId, options: FocusOptions);
}
