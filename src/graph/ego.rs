//! Two-hop ego neighborhoods and the emphasis they drive.

use std::collections::BTreeSet;

use super::types::{PersonId, Relationship};

/// Opacity of people outside the focused neighborhood.
pub const DIMMED_NODE_OPACITY: f64 = 0.2;
/// Opacity of relationships not fully inside the focused neighborhood.
pub const DIMMED_EDGE_OPACITY: f64 = 0.1;
/// Opacity of everything emphasized.
pub const FULL_OPACITY: f64 = 1.0;

/// People within two hops of `ego` along `edges`.
///
/// The ego is always a member, even when no edge touches it.
pub fn ego_neighborhood<'a, I>(ego: PersonId, edges: I) -> BTreeSet<PersonId>
where
	I: IntoIterator<Item = &'a Relationship>,
	I::IntoIter: Clone,
{
	let edges = edges.into_iter();

	let mut first_hop = BTreeSet::from([ego]);
	first_hop.extend(edges.clone().filter_map(|e| e.other(ego)));

	let mut reached = first_hop.clone();
	for edge in edges {
		if first_hop.contains(&edge.from) || first_hop.contains(&edge.to) {
			reached.insert(edge.from);
			reached.insert(edge.to);
		}
	}
	reached
}

/// Node opacity for an optional focus neighborhood.
pub fn node_opacity(neighborhood: Option<&BTreeSet<PersonId>>, id: PersonId) -> f64 {
	match neighborhood {
		Some(set) if !set.contains(&id) => DIMMED_NODE_OPACITY,
		_ => FULL_OPACITY,
	}
}

/// Edge opacity for an optional focus neighborhood.
pub fn edge_opacity(neighborhood: Option<&BTreeSet<PersonId>>, edge: &Relationship) -> f64 {
	match neighborhood {
		Some(set) if !(set.contains(&edge.from) && set.contains(&edge.to)) => DIMMED_EDGE_OPACITY,
		_ => FULL_OPACITY,
	}
}
