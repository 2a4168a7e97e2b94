use force_graph::DefaultNodeIdx;

/// Per-node payload carried through the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub tooltip: String,
	pub color: &'static str,
	pub opacity: f64,
}

/// A drawn relationship between two simulation nodes.
#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub value: f64,
	pub opacity: f64,
}
