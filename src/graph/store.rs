use std::collections::BTreeSet;

use log::{debug, info, warn};
use rand::Rng;

use super::ego::{edge_opacity, ego_neighborhood, node_opacity};
use super::error::{self, GraphError};
use super::scene::{GraphScene, PhysicsConfig, RenderOptions, SceneEdge, SceneNode};
use super::types::{GROUPS, GraphData, Person, PersonId, Relationship, proximity_title};

/// People added by the "Generate Random Network" control.
pub const DEFAULT_RANDOM_NODES: usize = 10;
/// Relationships added by the "Generate Random Network" control.
pub const DEFAULT_RANDOM_EDGES: usize = 15;

/// Authoritative graph plus the view-state that filters and focuses it.
///
/// The unchecked mutations mirror what the controls need and never fail;
/// callers that cannot guarantee well-formed input use the `try_*` variants.
#[derive(Clone, Debug, PartialEq)]
pub struct ProximityGraphStore {
	data: GraphData,
	focused: Option<PersonId>,
	focus_request: u64,
	proximity_threshold: f64,
	physics_enabled: bool,
	physics: PhysicsConfig,
}

impl Default for ProximityGraphStore {
	fn default() -> Self {
		Self::new()
	}
}

impl ProximityGraphStore {
	/// A store holding the seed graph.
	pub fn new() -> Self {
		Self::with_data(GraphData::seed())
	}

	/// A store over arbitrary data with default view-state.
	pub fn with_data(data: GraphData) -> Self {
		Self {
			data,
			focused: None,
			focus_request: 0,
			proximity_threshold: 0.0,
			physics_enabled: true,
			physics: PhysicsConfig::default(),
		}
	}

	/// Restore the seed graph and default view-state.
	pub fn reset(&mut self) {
		info!("Resetting proximity graph to seed");
		*self = Self::new();
	}

	/// The underlying collections.
	pub fn data(&self) -> &GraphData {
		&self.data
	}

	/// People in insertion order.
	pub fn people(&self) -> &[Person] {
		&self.data.nodes
	}

	/// Relationships in insertion order.
	pub fn relationships(&self) -> &[Relationship] {
		&self.data.edges
	}

	/// Look up a person by id.
	pub fn person(&self, id: PersonId) -> Option<&Person> {
		self.data.nodes.iter().find(|p| p.id == id)
	}

	/// The relationship joining `a` and `b`, in either direction.
	pub fn relationship_between(&self, a: PersonId, b: PersonId) -> Option<&Relationship> {
		self.data.edges.iter().find(|e| e.connects(a, b))
	}

	/// Current ego-focus target.
	pub fn focused(&self) -> Option<PersonId> {
		self.focused
	}

	/// Minimum proximity a relationship needs to be visible.
	pub fn proximity_threshold(&self) -> f64 {
		self.proximity_threshold
	}

	/// Whether the layout simulation should run.
	pub fn physics_enabled(&self) -> bool {
		self.physics_enabled
	}

	/// Append a person with the next free id.
	///
	/// Ids top out at `u32::MAX`; past that the last id is handed out again.
	/// Use [`try_add_person`](Self::try_add_person) to be refused instead.
	pub fn add_person(
		&mut self,
		label: impl Into<String>,
		group: Option<String>,
		title: Option<String>,
	) -> &Person {
		let person = Person {
			id: self.data.next_id(),
			label: label.into(),
			group,
			title,
		};
		debug!("Adding person {} ({:?})", person.id, person.label);
		let idx = self.data.nodes.len();
		self.data.nodes.push(person);
		&self.data.nodes[idx]
	}

	/// Relate two people, overwriting the strength of an existing pair.
	///
	/// Direction is ignored when looking for the existing edge. Neither
	/// endpoint is validated.
	pub fn add_or_update_relationship(
		&mut self,
		from: PersonId,
		to: PersonId,
		value: f64,
	) -> &Relationship {
		let idx = match self.data.edge_index(from, to) {
			Some(idx) => {
				debug!("Updating relationship {}-{} to {:.2}", from, to, value);
				let edge = &mut self.data.edges[idx];
				edge.value = value;
				edge.title = Some(proximity_title(value));
				idx
			}
			None => {
				debug!("Adding relationship {}-{} at {:.2}", from, to, value);
				self.data.edges.push(Relationship {
					from,
					to,
					value,
					title: Some(proximity_title(value)),
				});
				self.data.edges.len() - 1
			}
		};
		&self.data.edges[idx]
	}

	/// Change the strength of an existing pair; `None` if they are unrelated.
	pub fn update_relationship(
		&mut self,
		from: PersonId,
		to: PersonId,
		value: f64,
	) -> Option<&Relationship> {
		let idx = self.data.edge_index(from, to)?;
		let edge = &mut self.data.edges[idx];
		edge.value = value;
		edge.title = Some(proximity_title(value));
		Some(&self.data.edges[idx])
	}

	/// [`add_person`](Self::add_person) that refuses blank labels.
	pub fn try_add_person(
		&mut self,
		label: &str,
		group: Option<String>,
		title: Option<String>,
	) -> error::Result<&Person> {
		let label = label.trim();
		if label.is_empty() {
			warn!("Rejected person with empty name");
			return Err(GraphError::EmptyLabelRejected);
		}
		if self.data.checked_next_id().is_none() {
			warn!("Rejected person {:?}, ids exhausted", label);
			return Err(GraphError::IdsExhausted);
		}
		Ok(self.add_person(label, group, title))
	}

	/// [`add_or_update_relationship`](Self::add_or_update_relationship) that
	/// requires two distinct, existing people.
	pub fn try_relate(
		&mut self,
		from: PersonId,
		to: PersonId,
		value: f64,
	) -> error::Result<&Relationship> {
		for id in [from, to] {
			if self.person(id).is_none() {
				warn!("Rejected relationship with unknown person {}", id);
				return Err(GraphError::UnknownPersonId(id));
			}
		}
		if from == to {
			warn!("Rejected self relationship for {}", from);
			return Err(GraphError::SelfLoopRejected(from));
		}
		Ok(self.add_or_update_relationship(from, to, value))
	}

	/// Select the ego-focus target, or clear it.
	///
	/// Every call counts as a new request, so re-applying the same person
	/// re-centers the view.
	pub fn set_focus(&mut self, person: Option<PersonId>) {
		debug!("Focus set to {:?}", person);
		self.focused = person;
		self.focus_request = self.focus_request.wrapping_add(1);
	}

	/// Set the visibility threshold. Not clamped.
	pub fn set_proximity_threshold(&mut self, threshold: f64) {
		self.proximity_threshold = threshold;
	}

	/// Toggle the layout simulation.
	pub fn set_physics_enabled(&mut self, enabled: bool) {
		self.physics_enabled = enabled;
	}

	/// Relationships with `value >= threshold`, in insertion order.
	pub fn visible_edges(&self, threshold: f64) -> Vec<&Relationship> {
		self.data
			.edges
			.iter()
			.filter(|e| e.value >= threshold)
			.collect()
	}

	/// People within two hops of `person` along `visible_edges`.
	///
	/// Empty when `person` is not in the graph.
	pub fn ego_neighborhood(
		&self,
		person: PersonId,
		visible_edges: &[&Relationship],
	) -> BTreeSet<PersonId> {
		if self.person(person).is_none() {
			return BTreeSet::new();
		}
		ego_neighborhood(person, visible_edges.iter().copied())
	}

	/// Append `node_count` random people and `edge_count` random relationships.
	///
	/// Endpoints are drawn from everyone in the graph. Pairs are not merged,
	/// so a generated edge may repeat an existing pair.
	pub fn generate_random_graph<R: Rng>(
		&mut self,
		rng: &mut R,
		node_count: usize,
		edge_count: usize,
	) {
		let added = match self.data.checked_next_id() {
			Some(first) => (first.0..=u32::MAX).take(node_count).count(),
			None => 0,
		};
		if added < node_count {
			warn!("Person ids exhausted, adding {} of {} people", added, node_count);
		}
		let first = self.data.next_id().0;
		for id in (first..=u32::MAX).take(added) {
			let group = GROUPS[rng.gen_range(0..GROUPS.len())];
			self.data.nodes.push(Person {
				id: PersonId(id),
				label: format!("Person {}", id),
				group: Some(group.into()),
				title: None,
			});
		}

		let total = self.data.nodes.len();
		if total < 2 {
			warn!("Not enough people to generate relationships ({})", total);
			return;
		}
		for _ in 0..edge_count {
			let source = rng.gen_range(0..total);
			let mut target = rng.gen_range(0..total);
			while target == source {
				target = rng.gen_range(0..total);
			}
			let value = f64::from(rng.gen_range(0..=10u8)) / 10.0;
			self.data.edges.push(Relationship {
				from: self.data.nodes[source].id,
				to: self.data.nodes[target].id,
				value,
				title: Some(proximity_title(value)),
			});
		}
		info!(
			"Generated {} people and {} relationships ({} / {} total)",
			added,
			edge_count,
			self.data.nodes.len(),
			self.data.edges.len()
		);
	}

	/// Snapshot for the renderer: every person, threshold-filtered edges,
	/// and emphasis from the current focus.
	pub fn scene(&self) -> GraphScene {
		let visible = self.visible_edges(self.proximity_threshold);
		let neighborhood = self
			.focused
			.map(|ego| self.ego_neighborhood(ego, &visible));
		let neighborhood = neighborhood.as_ref();

		let nodes = self
			.data
			.nodes
			.iter()
			.map(|p| SceneNode {
				id: p.id,
				label: p.label.clone(),
				group: p.group.clone(),
				title: p.title.clone(),
				opacity: node_opacity(neighborhood, p.id),
			})
			.collect();
		let edges = visible
			.iter()
			.map(|e| SceneEdge {
				from: e.from,
				to: e.to,
				value: e.value,
				title: e.title.clone(),
				opacity: edge_opacity(neighborhood, e),
			})
			.collect();

		GraphScene { nodes, edges }
	}

	/// View settings for the renderer.
	pub fn render_options(&self) -> RenderOptions {
		RenderOptions {
			physics_enabled: self.physics_enabled,
			physics: self.physics,
			focus: self.focused,
			focus_request: self.focus_request,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	use super::*;
	use crate::graph::ego::{DIMMED_EDGE_OPACITY, DIMMED_NODE_OPACITY, FULL_OPACITY};

	fn pair(edge: &Relationship) -> (u32, u32, f64) {
		(edge.from.0, edge.to.0, edge.value)
	}

	fn chain_store() -> ProximityGraphStore {
		let mut store = ProximityGraphStore::with_data(GraphData::default());
		for name in ["A", "B", "C", "D"] {
			store.add_person(name, None, None);
		}
		store.add_or_update_relationship(PersonId(1), PersonId(2), 0.9);
		store.add_or_update_relationship(PersonId(2), PersonId(3), 0.6);
		store.add_or_update_relationship(PersonId(3), PersonId(4), 0.3);
		store
	}

	#[test]
	fn fresh_store_holds_seed() {
		let store = ProximityGraphStore::new();
		assert_eq!(store.people().len(), 5);
		assert_eq!(store.relationships().len(), 5);
		assert_eq!(store.focused(), None);
		assert_eq!(store.proximity_threshold(), 0.0);
		assert!(store.physics_enabled());
	}

	#[test]
	fn seed_threshold_filter() {
		let store = ProximityGraphStore::new();
		let visible: Vec<_> = store.visible_edges(0.6).into_iter().map(pair).collect();
		assert_eq!(visible, vec![(1, 2, 0.9), (2, 3, 0.6), (4, 5, 0.7)]);
	}

	#[test]
	fn add_person_takes_next_id() {
		let mut store = ProximityGraphStore::new();
		let person = store.add_person("Frank", Some("School".into()), None);
		assert_eq!(person.id, PersonId(6));
		assert_eq!(person.group.as_deref(), Some("School"));
		assert_eq!(store.people().last().map(|p| p.label.as_str()), Some("Frank"));
	}

	#[test]
	fn add_person_allows_empty_label() {
		let mut store = ProximityGraphStore::new();
		assert_eq!(store.add_person("", None, None).label, "");
	}

	#[test]
	fn relating_twice_updates_in_place() {
		let mut store = ProximityGraphStore::with_data(GraphData::default());
		store.add_person("A", None, None);
		store.add_person("B", None, None);
		store.add_person("C", None, None);
		store.add_or_update_relationship(PersonId(1), PersonId(2), 0.3);
		store.add_or_update_relationship(PersonId(1), PersonId(3), 0.4);
		let edge = store.add_or_update_relationship(PersonId(2), PersonId(1), 0.7);
		assert_eq!(edge.value, 0.7);
		assert_eq!(edge.title.as_deref(), Some("Proximity: 0.70"));

		assert_eq!(store.relationships().len(), 2);
		assert_eq!(pair(&store.relationships()[0]), (1, 2, 0.7));
		assert_eq!(pair(&store.relationships()[1]), (1, 3, 0.4));
	}

	#[test]
	fn updating_seed_edge_regenerates_title() {
		let mut store = ProximityGraphStore::new();
		store.add_or_update_relationship(PersonId(2), PersonId(1), 0.25);
		let edge = store.relationship_between(PersonId(1), PersonId(2));
		assert_eq!(edge.and_then(|e| e.title.as_deref()), Some("Proximity: 0.25"));
		assert_eq!(store.relationships().len(), 5);
	}

	#[test]
	fn update_relationship_ignores_unrelated_pair() {
		let mut store = ProximityGraphStore::new();
		assert!(store.update_relationship(PersonId(1), PersonId(5), 0.5).is_none());
		assert_eq!(store.relationships().len(), 5);

		let edge = store.update_relationship(PersonId(5), PersonId(4), 0.1);
		assert_eq!(edge.map(|e| e.value), Some(0.1));
	}

	#[test]
	fn try_add_person_rejects_blank_label() {
		let mut store = ProximityGraphStore::new();
		assert_eq!(
			store.try_add_person("   ", None, None).map(|p| p.id),
			Err(GraphError::EmptyLabelRejected)
		);
		assert_eq!(store.people().len(), 5);

		let person = store.try_add_person("  Gina ", Some("Work".into()), None);
		assert_eq!(person.map(|p| p.label.clone()), Ok("Gina".to_string()));
	}

	#[test]
	fn try_relate_validates_endpoints() {
		let mut store = ProximityGraphStore::new();
		assert_eq!(
			store.try_relate(PersonId(1), PersonId(42), 0.5).map(|e| e.value),
			Err(GraphError::UnknownPersonId(PersonId(42)))
		);
		assert_eq!(
			store.try_relate(PersonId(3), PersonId(3), 0.5).map(|e| e.value),
			Err(GraphError::SelfLoopRejected(PersonId(3)))
		);
		assert_eq!(store.relationships().len(), 5);

		assert!(store.try_relate(PersonId(1), PersonId(5), 0.8).is_ok());
		assert_eq!(store.relationships().len(), 6);
	}

	#[test]
	fn ego_neighborhood_respects_threshold() {
		let store = chain_store();
		let visible = store.visible_edges(0.5);
		let hood = store.ego_neighborhood(PersonId(1), &visible);
		assert_eq!(hood, BTreeSet::from([PersonId(1), PersonId(2), PersonId(3)]));
	}

	#[test]
	fn ego_neighborhood_of_unknown_person_is_empty() {
		let store = chain_store();
		let visible = store.visible_edges(0.0);
		assert!(store.ego_neighborhood(PersonId(99), &visible).is_empty());
	}

	#[test]
	fn focus_does_not_touch_data() {
		let mut store = ProximityGraphStore::new();
		let before = store.data().clone();
		store.set_focus(Some(PersonId(2)));
		assert_eq!(store.focused(), Some(PersonId(2)));
		assert_eq!(store.data(), &before);
		store.set_focus(None);
		assert_eq!(store.focused(), None);
	}

	#[test]
	fn scene_applies_threshold_and_focus() {
		let mut store = chain_store();
		store.set_proximity_threshold(0.5);
		store.set_focus(Some(PersonId(1)));
		let scene = store.scene();

		assert_eq!(scene.nodes.len(), 4);
		assert_eq!(scene.edges.len(), 2);
		let opacities: Vec<f64> = scene.nodes.iter().map(|n| n.opacity).collect();
		assert_eq!(
			opacities,
			vec![FULL_OPACITY, FULL_OPACITY, FULL_OPACITY, DIMMED_NODE_OPACITY]
		);
		assert!(scene.edges.iter().all(|e| e.opacity == FULL_OPACITY));

		store.set_focus(Some(PersonId(4)));
		let scene = store.scene();
		assert!(scene.edges.iter().all(|e| e.opacity == DIMMED_EDGE_OPACITY));
		assert_eq!(scene.nodes[3].opacity, FULL_OPACITY);
	}

	#[test]
	fn scene_without_focus_is_fully_opaque() {
		let scene = ProximityGraphStore::new().scene();
		assert!(scene.nodes.iter().all(|n| n.opacity == FULL_OPACITY));
		assert!(scene.edges.iter().all(|e| e.opacity == FULL_OPACITY));
	}

	#[test]
	fn render_options_follow_view_state() {
		let mut store = ProximityGraphStore::new();
		store.set_physics_enabled(false);
		store.set_focus(Some(PersonId(3)));
		let options = store.render_options();
		assert!(!options.physics_enabled);
		assert_eq!(options.focus, Some(PersonId(3)));
	}

	#[test]
	fn reset_restores_seed() {
		let mut store = ProximityGraphStore::new();
		store.add_person("Extra", None, None);
		store.set_proximity_threshold(0.4);
		store.set_physics_enabled(false);
		store.reset();
		assert_eq!(store, ProximityGraphStore::new());
	}

	#[test]
	fn random_graph_grows_by_requested_amounts() {
		let mut rng = ChaCha8Rng::seed_from_u64(7);
		let mut store = ProximityGraphStore::new();
		store.generate_random_graph(&mut rng, DEFAULT_RANDOM_NODES, DEFAULT_RANDOM_EDGES);

		assert_eq!(store.people().len(), 15);
		assert_eq!(store.relationships().len(), 20);
		let new_edges = &store.relationships()[5..];
		assert!(new_edges.iter().all(|e| e.from != e.to));
		assert!(new_edges.iter().all(|e| (0.0..=1.0).contains(&e.value)));
		assert!(
			new_edges
				.iter()
				.all(|e| ((e.value * 10.0).round() / 10.0 - e.value).abs() < 1e-12)
		);
		let ids: Vec<u32> = store.people()[5..].iter().map(|p| p.id.0).collect();
		assert_eq!(ids, (6..=15).collect::<Vec<_>>());
		assert!(
			store.people()[5..]
				.iter()
				.all(|p| p.group.as_deref().is_some_and(|g| GROUPS.contains(&g)))
		);
	}

	#[test]
	fn random_graph_without_pairs_adds_no_edges() {
		let mut rng = ChaCha8Rng::seed_from_u64(1);
		let mut store = ProximityGraphStore::with_data(GraphData::default());
		store.generate_random_graph(&mut rng, 1, 5);
		assert_eq!(store.people().len(), 1);
		assert!(store.relationships().is_empty());
	}

	#[test]
	fn repeated_focus_is_a_new_request() {
		let mut store = ProximityGraphStore::new();
		store.set_focus(Some(PersonId(2)));
		let first = store.render_options();
		store.set_focus(Some(PersonId(2)));
		let second = store.render_options();
		assert_eq!(first.focus, second.focus);
		assert_ne!(first.focus_request, second.focus_request);

		// Other view changes leave the request alone
		store.set_proximity_threshold(0.3);
		assert_eq!(store.render_options().focus_request, second.focus_request);
	}

	fn store_at_id_ceiling() -> ProximityGraphStore {
		let mut data = GraphData::seed();
		data.nodes.push(Person {
			id: PersonId(u32::MAX - 1),
			label: "Penultimate".into(),
			group: None,
			title: None,
		});
		ProximityGraphStore::with_data(data)
	}

	#[test]
	fn try_add_person_refuses_when_ids_run_out() {
		let mut store = store_at_id_ceiling();
		assert_eq!(
			store.try_add_person("Last", None, None).map(|p| p.id),
			Ok(PersonId(u32::MAX))
		);
		assert_eq!(
			store.try_add_person("One too many", None, None).map(|p| p.id),
			Err(GraphError::IdsExhausted)
		);
		assert_eq!(store.people().len(), 7);
	}

	#[test]
	fn random_graph_stops_at_id_ceiling() {
		let mut rng = ChaCha8Rng::seed_from_u64(3);
		let mut store = store_at_id_ceiling();
		store.generate_random_graph(&mut rng, 5, 4);

		assert_eq!(store.people().len(), 7);
		assert_eq!(store.people()[6].id, PersonId(u32::MAX));
		assert_eq!(store.relationships().len(), 9);

		store.generate_random_graph(&mut rng, 5, 0);
		assert_eq!(store.people().len(), 7);
	}

	#[derive(Clone, Debug)]
	enum Op {
		Person,
		Relate(u32, u32, u8),
	}

	fn op() -> impl Strategy<Value = Op> {
		prop_oneof![
			Just(Op::Person),
			(1u32..12, 1u32..12, 0u8..=10).prop_map(|(a, b, v)| Op::Relate(a, b, v)),
		]
	}

	proptest! {
		#[test]
		fn prop_person_ids_strictly_increase(count in 1usize..40) {
			let mut store = ProximityGraphStore::new();
			let mut last = store.data().next_id().0 - 1;
			for _ in 0..count {
				let id = store.add_person("p", None, None).id.0;
				prop_assert!(id > last);
				last = id;
			}
			let unique: HashSet<_> = store.people().iter().map(|p| p.id).collect();
			prop_assert_eq!(unique.len(), store.people().len());
		}

		#[test]
		fn prop_one_edge_per_pair(ops in prop::collection::vec(op(), 0..60)) {
			let mut store = ProximityGraphStore::new();
			for op in ops {
				match op {
					Op::Person => {
						store.add_person("p", None, None);
					}
					Op::Relate(a, b, v) => {
						store.add_or_update_relationship(PersonId(a), PersonId(b), f64::from(v) / 10.0);
					}
				}
			}
			let mut seen = HashSet::new();
			for edge in store.relationships() {
				let key = (edge.from.min(edge.to), edge.from.max(edge.to));
				prop_assert!(seen.insert(key), "duplicate pair {:?}", key);
			}
		}

		#[test]
		fn prop_threshold_filter_is_monotone(t1 in 0.0f64..=1.0, t2 in 0.0f64..=1.0, seed in any::<u64>()) {
			let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
			let mut rng = ChaCha8Rng::seed_from_u64(seed);
			let mut store = ProximityGraphStore::new();
			store.generate_random_graph(&mut rng, 10, 15);

			let wide = store.visible_edges(lo);
			let narrow = store.visible_edges(hi);
			prop_assert!(narrow.len() <= wide.len());
			for edge in narrow {
				prop_assert!(wide.iter().any(|w| std::ptr::eq(*w, edge)));
			}
		}

		#[test]
		fn prop_random_graph_never_self_loops(seed in any::<u64>(), nodes in 0usize..20, edges in 0usize..30) {
			let mut rng = ChaCha8Rng::seed_from_u64(seed);
			let mut store = ProximityGraphStore::new();
			store.generate_random_graph(&mut rng, nodes, edges);
			prop_assert_eq!(store.people().len(), 5 + nodes);
			prop_assert_eq!(store.relationships().len(), 5 + edges);
			prop_assert!(store.relationships()[5..].iter().all(|e| e.from != e.to));
		}
	}
}
