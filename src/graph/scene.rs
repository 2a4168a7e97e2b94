//! Renderer-facing snapshot of the graph and the seam the canvas plugs into.

use super::types::PersonId;

/// A person as the renderer sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	/// Person id.
	pub id: PersonId,
	/// Display name.
	pub label: String,
	/// Category, used for coloring.
	pub group: Option<String>,
	/// Tooltip text.
	pub title: Option<String>,
	/// Emphasis in `[0, 1]`.
	pub opacity: f64,
}

/// A relationship that passed the proximity threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
	/// One endpoint.
	pub from: PersonId,
	/// The other endpoint.
	pub to: PersonId,
	/// Proximity strength.
	pub value: f64,
	/// Display text.
	pub title: Option<String>,
	/// Emphasis in `[0, 1]`.
	pub opacity: f64,
}

/// Everything a renderer needs to draw one frame of data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphScene {
	/// Every person, in insertion order.
	pub nodes: Vec<SceneNode>,
	/// Visible relationships, in insertion order.
	pub edges: Vec<SceneEdge>,
}

/// Force simulation tuning handed to the layout backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
	/// Repulsion between every pair of people.
	pub force_charge: f32,
	/// Attraction along relationships.
	pub force_spring: f32,
	/// Upper bound on the force applied to a node per step.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Velocity damping per step.
	pub damping_factor: f32,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// View settings that accompany a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
	/// Whether the layout simulation keeps stepping.
	pub physics_enabled: bool,
	/// Simulation tuning.
	pub physics: PhysicsConfig,
	/// Person the camera should center on.
	pub focus: Option<PersonId>,
	/// Bumped on every focus request, even for the same person.
	pub focus_request: u64,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			physics_enabled: true,
			physics: PhysicsConfig::default(),
			focus: None,
			focus_request: 0,
		}
	}
}

/// A backend able to lay out and draw a proximity graph.
pub trait GraphRenderer {
	/// Replace the drawn graph with `nodes` and `edges`.
	fn render(&mut self, nodes: &[SceneNode], edges: &[SceneEdge], options: &RenderOptions);

	/// Convenience wrapper over [`GraphRenderer::render`].
	fn render_scene(&mut self, scene: &GraphScene, options: &RenderOptions) {
		self.render(&scene.nodes, &scene.edges, options);
	}
}
