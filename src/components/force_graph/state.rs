use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::types::GraphData;
use crate::search::{
	Easing, FocusOptions, GraphWidget, NodeColor, NodeId, NodePatch, NodeStyle, NodeView,
};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const HIT_RADIUS: f64 = 12.0;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 20.0;

/// Per-node display record. The simulation node carries its slot in
/// `ForceGraphState::nodes` as user data.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: Option<String>,
	pub style: NodeStyle,
	pub original_style: Option<NodeStyle>,
	idx: DefaultNodeIdx,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Camera flight toward a node. The node is re-read every frame so the
/// camera follows it while the simulation is still moving.
#[derive(Clone, Copy, Debug)]
struct CameraAnimation {
	target: DefaultNodeIdx,
	from_center: (f64, f64),
	from_k: f64,
	to_k: f64,
	elapsed_ms: f64,
	duration_ms: f64,
	easing: Easing,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<usize, ()>,
	pub nodes: Vec<NodeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	lookup: HashMap<NodeId, usize>,
	camera: Option<CameraAnimation>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut lookup = HashMap::new();

		for (i, node) in data.nodes.iter().enumerate() {
			if lookup.contains_key(&node.id) {
				warn!("duplicate node id {}, skipped", node.id);
				continue;
			}
			let color = node.color.clone().unwrap_or_else(|| {
				node.group
					.map(|g| COLORS[g as usize % COLORS.len()].into())
					.unwrap_or(COLORS[0].into())
			});
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			let slot = nodes.len();
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: slot,
			});
			nodes.push(NodeInfo {
				id: node.id.clone(),
				label: node.label.clone(),
				style: NodeStyle::new(NodeColor::with_border(&color, "#e0e0e0")),
				original_style: None,
				idx,
			});
			lookup.insert(node.id.clone(), slot);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (lookup.get(&link.source), lookup.get(&link.target)) {
				graph.add_edge(nodes[src].idx, nodes[tgt].idx, EdgeData::default());
			}
		}
		debug!("graph built: {} nodes, {} links", nodes.len(), data.links.len());

		Self {
			graph,
			nodes,
			lookup,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			camera: None,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// World point currently at the middle of the canvas.
	pub fn view_center(&self) -> (f64, f64) {
		self.screen_to_graph(self.width / 2.0, self.height / 2.0)
	}

	fn center_on(&mut self, gx: f64, gy: f64, k: f64) {
		self.transform.k = k;
		self.transform.x = self.width / 2.0 - gx * k;
		self.transform.y = self.height / 2.0 - gy * k;
	}

	pub fn position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn info(&self, slot: usize) -> Option<&NodeInfo> {
		self.nodes.get(slot)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let reach = self
				.info(node.data.user_data)
				.map_or(HIT_RADIUS, |info| HIT_RADIUS.max(info.style.size + 2.0));
			// world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < reach {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn is_grabbed(&self, idx: DefaultNodeIdx) -> bool {
		self.drag.active && self.drag.node_idx == Some(idx)
	}

	#[cfg(test)]
	pub fn is_camera_animating(&self) -> bool {
		self.camera.is_some()
	}

	/// Start dragging the node under the pointer, or panning if there is none.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.camera = None;
		if let Some(idx) = self.node_at_position(x, y) {
			let (nx, ny) = self.position(idx).unwrap_or_default();
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: nx as f32,
				node_start_y: ny as f32,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			let (dx, dy) = (
				(x - self.drag.start_x) / self.transform.k,
				(y - self.drag.start_y) / self.transform.k,
			);
			let (nx, ny) = (
				self.drag.node_start_x + dx as f32,
				self.drag.node_start_y + dy as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Dropped nodes stay pinned where they were released.
	pub fn pointer_up(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	/// Zoom by one wheel notch about the given screen point.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		self.camera = None;
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
		self.advance_camera(dt as f64 * 1000.0);
	}

	fn advance_camera(&mut self, dt_ms: f64) {
		let Some(mut anim) = self.camera else {
			return;
		};
		anim.elapsed_ms += dt_ms;
		let t = if anim.duration_ms <= 0.0 {
			1.0
		} else {
			(anim.elapsed_ms / anim.duration_ms).min(1.0)
		};
		let Some((nx, ny)) = self.position(anim.target) else {
			self.camera = None;
			return;
		};

		let e = anim.easing.apply(t);
		let (cx, cy) = anim.from_center;
		self.center_on(
			cx + (nx - cx) * e,
			cy + (ny - cy) * e,
			anim.from_k + (anim.to_k - anim.from_k) * e,
		);
		self.camera = (t < 1.0).then_some(anim);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

impl GraphWidget for ForceGraphState {
	fn node_ids(&self) -> Vec<NodeId> {
		self.nodes.iter().map(|n| n.id.clone()).collect()
	}

	fn node(&self, id: &NodeId) -> Option<NodeView> {
		let info = self.nodes.get(*self.lookup.get(id)?)?;
		Some(NodeView {
			id: info.id.clone(),
			label: info.label.clone(),
			style: info.style.clone(),
			original_style: info.original_style.clone(),
		})
	}

	fn update_node(&mut self, patch: NodePatch) {
		let Some(info) = self
			.lookup
			.get(&patch.id)
			.and_then(|&slot| self.nodes.get_mut(slot))
		else {
			return;
		};
		if let Some(style) = patch.style {
			info.style = style;
		}
		if let Some(original) = patch.original_style {
			info.original_style = Some(original);
		}
	}

	fn focus(&mut self, id: &NodeId, options: FocusOptions) {
		let Some(target) = self.lookup.get(id).map(|&slot| self.nodes[slot].idx) else {
			return;
		};
		self.drag = DragState::default();
		self.pan.active = false;
		self.camera = Some(CameraAnimation {
			target,
			from_center: self.view_center(),
			from_k: self.transform.k,
			to_k: options.scale.clamp(MIN_ZOOM, MAX_ZOOM),
			elapsed_ms: 0.0,
			duration_ms: options.animation_duration_ms as f64,
			easing: options.easing,
		});
		self.advance_camera(0.0);
	}
}
