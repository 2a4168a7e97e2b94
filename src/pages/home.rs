use leptos::prelude::*;

use crate::components::control_panel::ControlPanel;
use crate::components::graph_view::GraphView;
use crate::graph::ProximityGraphStore;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// One store per session, handed to both halves of the page
	let store = RwSignal::new(ProximityGraphStore::new());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="proximity-app">
				<ControlPanel store=store />
				<GraphView store=store />
			</main>
		</ErrorBoundary>
	}
}
