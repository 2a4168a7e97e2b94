pub mod control_panel;
pub mod explainer;
pub mod force_graph;
pub mod graph_view;
