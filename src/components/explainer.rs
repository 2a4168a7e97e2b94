use leptos::prelude::*;

/// How proximity scores come about, shown over the graph on request.
#[component]
pub fn ExplainerPanel() -> impl IntoView {
	view! {
		<div class="explainer-panel">
			<h2>"A Graph of Proximity"</h2>

			<section>
				<h3>"Relationships over timelines"</h3>
				<p>
					"A weighted graph of who is close to whom captures the structure of human "
					"relationships better than timelines or metadata."
				</p>
			</section>

			<section>
				<h3>"How proximity updates"</h3>
				<p>"Proximity between two people grows with their interactions:"</p>
				<ul>
					<li><strong>"Match = +0.9"</strong>" strong connection formed"</li>
					<li><strong>"Same event = +0.6"</strong>" meaningful shared experience"</li>
					<li><strong>"DM = +0.4"</strong>" direct communication"</li>
					<li><strong>"Like = +0.1"</strong>" lightweight acknowledgment"</li>
				</ul>
			</section>

			<section>
				<h3>"Reading the graph"</h3>
				<pre class="explainer-example">
					"Alice -[0.9]- Bob\nAlice -[0.5]- Charlie\nBob   -[0.6]- Charlie"
				</pre>
				<p>
					"Thicker, brighter lines are stronger relationships. The threshold slider hides "
					"weak ones, and ego focus dims everyone more than two hops from the chosen person."
				</p>
			</section>
		</div>
	}
}
