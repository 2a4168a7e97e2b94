use leptos::prelude::*;

use super::explainer::ExplainerPanel;
use super::force_graph::ForceGraphCanvas;
use crate::graph::ProximityGraphStore;

/// Canvas area with the explainer toggle.
#[component]
pub fn GraphView(store: RwSignal<ProximityGraphStore>) -> impl IntoView {
	let (show_explainer, set_show_explainer) = signal(false);
	let scene = Signal::derive(move || store.with(|s| s.scene()));
	let options = Signal::derive(move || store.with(|s| s.render_options()));

	view! {
		<section class="graph-view">
			<button
				class="explainer-toggle"
				on:click=move |_| set_show_explainer.update(|shown| *shown = !*shown)
			>
				{move || if show_explainer.get() { "Hide Explainer" } else { "Show Graph Explainer" }}
			</button>
			{move || show_explainer.get().then(|| view! {
				<div class="explainer-overlay">
					<ExplainerPanel />
				</div>
			})}
			<ForceGraphCanvas scene=scene options=options />
		</section>
	}
}
