use std::fmt;

/// Categorical groups offered by the UI and used for random assignment.
pub const GROUPS: [&str; 4] = ["Friends", "Family", "Work", "School"];

/// Identifier of a person; assigned by the store and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(pub u32);

impl fmt::Display for PersonId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A node of the proximity graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
	/// Store-assigned identifier.
	pub id: PersonId,
	/// Display name.
	pub label: String,
	/// Open-ended category, usually one of [`GROUPS`].
	pub group: Option<String>,
	/// Tooltip text.
	pub title: Option<String>,
}

/// An undirected, weighted edge between two people.
#[derive(Clone, Debug, PartialEq)]
pub struct Relationship {
	/// One endpoint.
	pub from: PersonId,
	/// The other endpoint.
	pub to: PersonId,
	/// Proximity strength, conventionally within `[0, 1]`.
	pub value: f64,
	/// Display text.
	pub title: Option<String>,
}

impl Relationship {
	/// Returns true if this edge joins `a` and `b`, in either direction.
	pub fn connects(&self, a: PersonId, b: PersonId) -> bool {
		(self.from == a && self.to == b) || (self.from == b && self.to == a)
	}

	/// Returns true if `id` is one of the endpoints.
	pub fn touches(&self, id: PersonId) -> bool {
		self.from == id || self.to == id
	}

	/// The endpoint opposite `id`, if `id` is an endpoint.
	pub fn other(&self, id: PersonId) -> Option<PersonId> {
		if self.from == id {
			Some(self.to)
		} else if self.to == id {
			Some(self.from)
		} else {
			None
		}
	}
}

/// Title shown for relationships created or updated through the store.
pub fn proximity_title(value: f64) -> String {
	format!("Proximity: {:.2}", value)
}

/// The node and edge collections, both in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// People in insertion order.
	pub nodes: Vec<Person>,
	/// Relationships in insertion order.
	pub edges: Vec<Relationship>,
}

impl GraphData {
	/// The five-person graph every session starts from.
	pub fn seed() -> Self {
		let person = |id, label: &str, group: &str| Person {
			id: PersonId(id),
			label: label.into(),
			group: Some(group.into()),
			title: None,
		};
		let edge = |from, to, value, title: &str| Relationship {
			from: PersonId(from),
			to: PersonId(to),
			value,
			title: Some(title.into()),
		};

		Self {
			nodes: vec![
				person(1, "Alice", "Friends"),
				person(2, "Bob", "Friends"),
				person(3, "Charlie", "Work"),
				person(4, "David", "Family"),
				person(5, "Emily", "Work"),
			],
			edges: vec![
				edge(1, 2, 0.9, "Best Friends"),
				edge(1, 3, 0.5, "Acquaintances"),
				edge(2, 3, 0.6, "Friends"),
				edge(3, 4, 0.3, "Colleagues"),
				edge(4, 5, 0.7, "Close Friends"),
			],
		}
	}

	/// The id the next added person receives: one past the current maximum.
	///
	/// Saturates at `u32::MAX`; see [`GraphData::checked_next_id`].
	pub fn next_id(&self) -> PersonId {
		PersonId(self.max_id().saturating_add(1))
	}

	/// Like [`GraphData::next_id`], but `None` once `u32::MAX` is taken.
	pub fn checked_next_id(&self) -> Option<PersonId> {
		self.max_id().checked_add(1).map(PersonId)
	}

	fn max_id(&self) -> u32 {
		self.nodes.iter().map(|n| n.id.0).max().unwrap_or(0)
	}

	/// Index of the edge joining `a` and `b`, if any.
	pub fn edge_index(&self, a: PersonId, b: PersonId) -> Option<usize> {
		self.edges.iter().position(|e| e.connects(a, b))
	}
}
