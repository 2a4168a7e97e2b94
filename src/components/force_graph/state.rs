use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::types::{EdgeInfo, NodeInfo};
use crate::graph::{GraphRenderer, PersonId, PhysicsConfig, RenderOptions, SceneEdge, SceneNode};

pub const NODE_RADIUS: f64 = 8.0;
pub const HIT_RADIUS: f64 = 14.0;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
pub const FOCUS_SCALE: f64 = 1.2;
const FOCUS_DURATION: f64 = 0.8;
const FOCUS_SPEED: f64 = 6.0;
const SPAWN_RADIUS: f64 = 150.0;
const NODE_MASS: f32 = 10.0;

pub fn group_color(group: Option<&str>) -> &'static str {
	match group {
		Some("Friends") => "#88C0D0",
		Some("Family") => "#A3BE8C",
		Some("Work") => "#5E81AC",
		Some("School") => "#B48EAD",
		_ => "#D08770",
	}
}

impl From<PhysicsConfig> for SimulationParameters {
	fn from(config: PhysicsConfig) -> Self {
		SimulationParameters {
			force_charge: config.force_charge,
			force_spring: config.force_spring,
			force_max: config.force_max,
			node_speed: config.node_speed,
			damping_factor: config.damping_factor,
		}
	}
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

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

#[derive(Clone, Debug, Default)]
struct FocusState {
	target: Option<PersonId>,
	request: u64,
	remaining: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	ids: HashMap<PersonId, DefaultNodeIdx>,
	edges: Vec<EdgeInfo>,
	focus: FocusState,
}

impl ForceGraphState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			graph: ForceGraph::new(PhysicsConfig::default().into()),
			ids: HashMap::new(),
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			focus: FocusState::default(),
			width,
			height,
			animation_running: true,
		}
	}

	pub fn edges(&self) -> &[EdgeInfo] {
		&self.edges
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Hovered node position and its tooltip text.
	pub fn tooltip(&self) -> Option<(f64, f64, String)> {
		let idx = self.hover.node?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((
					node.x() as f64,
					node.y() as f64,
					node.data.user_data.tooltip.clone(),
				));
			}
		});
		found
	}

	/// Stop steering the camera; the user took over.
	pub fn cancel_focus_animation(&mut self) {
		self.focus.remaining = 0.0;
	}

	pub fn tick(&mut self, dt: f32) {
		if self.animation_running {
			self.graph.update(dt);
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}

		self.step_focus(dt as f64);
	}

	fn step_focus(&mut self, dt: f64) {
		if self.focus.remaining <= 0.0 {
			return;
		}
		let position = self
			.focus
			.target
			.and_then(|id| self.ids.get(&id).copied())
			.and_then(|idx| self.node_position(idx));
		let Some((x, y)) = position else {
			self.focus.remaining = 0.0;
			return;
		};

		let goal = ViewTransform {
			x: self.width / 2.0 - x * FOCUS_SCALE,
			y: self.height / 2.0 - y * FOCUS_SCALE,
			k: FOCUS_SCALE,
		};
		let blend = (dt * FOCUS_SPEED).min(1.0);
		self.transform.x += (goal.x - self.transform.x) * blend;
		self.transform.y += (goal.y - self.transform.y) * blend;
		self.transform.k += (goal.k - self.transform.k) * blend;
		self.focus.remaining -= dt;
	}

	/// Adopt a new canvas size, keeping the view centered where it was.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

impl GraphRenderer for ForceGraphState {
	fn render(&mut self, nodes: &[SceneNode], edges: &[SceneEdge], options: &RenderOptions) {
		// Carry positions and pins of people already on screen into the new simulation.
		let mut by_idx = HashMap::new();
		self.graph.visit_nodes(|node| {
			by_idx.insert(node.index(), (node.x(), node.y(), node.data.is_anchor));
		});
		let previous: HashMap<PersonId, (f32, f32, bool)> = self
			.ids
			.iter()
			.filter_map(|(id, idx)| by_idx.get(idx).map(|p| (*id, *p)))
			.collect();

		let mut graph = ForceGraph::new(options.physics.into());
		let mut ids = HashMap::with_capacity(nodes.len());
		let count = nodes.len().max(1) as f64;

		for (i, node) in nodes.iter().enumerate() {
			let (x, y, is_anchor) = previous.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count;
				(
					(SPAWN_RADIUS * angle.cos()) as f32,
					(SPAWN_RADIUS * angle.sin()) as f32,
					false,
				)
			});
			let tooltip = node.title.clone().unwrap_or_else(|| match &node.group {
				Some(group) => format!("{} ({})", node.label, group),
				None => node.label.clone(),
			});

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: NODE_MASS,
				is_anchor,
				user_data: NodeInfo {
					label: node.label.clone(),
					tooltip,
					color: group_color(node.group.as_deref()),
					opacity: node.opacity,
				},
			});
			ids.insert(node.id, idx);
		}

		let mut drawn = Vec::with_capacity(edges.len());
		for edge in edges {
			if let (Some(&source), Some(&target)) = (ids.get(&edge.from), ids.get(&edge.to)) {
				graph.add_edge(source, target, EdgeData::default());
				drawn.push(EdgeInfo {
					source,
					target,
					value: edge.value,
					opacity: edge.opacity,
				});
			}
		}
		debug!(
			"Rendering {} people and {} relationships (physics {})",
			ids.len(),
			drawn.len(),
			options.physics_enabled
		);

		self.graph = graph;
		self.ids = ids;
		self.edges = drawn;
		// Node indices belong to the old simulation.
		self.drag = DragState::default();
		self.hover = HoverState::default();
		self.animation_running = options.physics_enabled;

		// A repeated request for the same person re-centers the camera too.
		if options.focus != self.focus.target || options.focus_request != self.focus.request {
			self.focus = FocusState {
				target: options.focus,
				request: options.focus_request,
				remaining: if options.focus.is_some() {
					FOCUS_DURATION
				} else {
					0.0
				},
			};
		}
	}
}
