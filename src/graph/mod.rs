//! The proximity graph: people, weighted relationships and the store that
//! owns them, independent of any rendering environment.

pub mod ego;
mod error;
mod scene;
mod store;
mod types;

pub use error::{GraphError, Result};
pub use scene::{GraphRenderer, GraphScene, PhysicsConfig, RenderOptions, SceneEdge, SceneNode};
pub use store::{DEFAULT_RANDOM_EDGES, DEFAULT_RANDOM_NODES, ProximityGraphStore};
pub use types::{GROUPS, GraphData, Person, PersonId, Relationship, proximity_title};

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Default)]
	struct RecordingRenderer {
		frames: Vec<(usize, usize, RenderOptions)>,
	}

	impl GraphRenderer for RecordingRenderer {
		fn render(&mut self, nodes: &[SceneNode], edges: &[SceneEdge], options: &RenderOptions) {
			self.frames.push((nodes.len(), edges.len(), options.clone()));
		}
	}

	fn add_named(store: &mut ProximityGraphStore, label: &str) -> Result<PersonId> {
		let id = store.try_add_person(label, None, None)?.id;
		Ok(id)
	}

	#[test]
	fn checked_paths_compose_with_question_mark() {
		let mut store = ProximityGraphStore::new();
		assert_eq!(add_named(&mut store, "Fay"), Ok(PersonId(6)));
		assert_eq!(add_named(&mut store, ""), Err(GraphError::EmptyLabelRejected));
	}

	#[test]
	fn store_drives_renderer_without_a_browser() {
		let mut store = ProximityGraphStore::new();
		let mut renderer = RecordingRenderer::default();
		renderer.render_scene(&store.scene(), &store.render_options());

		store.set_proximity_threshold(0.6);
		store.set_physics_enabled(false);
		store.set_focus(Some(PersonId(1)));
		renderer.render_scene(&store.scene(), &store.render_options());

		assert_eq!(renderer.frames.len(), 2);
		assert_eq!(renderer.frames[0].0, 5);
		assert_eq!(renderer.frames[0].1, 5);
		assert!(renderer.frames[0].2.physics_enabled);

		assert_eq!(renderer.frames[1].1, 3);
		assert!(!renderer.frames[1].2.physics_enabled);
		assert_eq!(renderer.frames[1].2.focus, Some(PersonId(1)));
	}
}
