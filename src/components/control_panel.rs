use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::graph::{DEFAULT_RANDOM_EDGES, DEFAULT_RANDOM_NODES, GROUPS, PersonId, ProximityGraphStore};

fn parse_person(value: &str) -> Option<PersonId> {
	value.parse().ok().map(PersonId)
}

fn person_value(id: Option<PersonId>) -> String {
	id.map(|id| id.to_string()).unwrap_or_default()
}

fn person_options(store: RwSignal<ProximityGraphStore>) -> impl IntoView {
	move || {
		store.with(|s| {
			s.people()
				.iter()
				.map(|p| view! { <option value=p.id.to_string()>{p.label.clone()}</option> })
				.collect_view()
		})
	}
}

/// Side panel with every control that mutates the graph or its view.
#[component]
pub fn ControlPanel(store: RwSignal<ProximityGraphStore>) -> impl IntoView {
	let (name, set_name) = signal(String::new());
	let (group, set_group) = signal(GROUPS[0].to_string());
	let (from, set_from) = signal(None::<PersonId>);
	let (to, set_to) = signal(None::<PersonId>);
	let (proximity, set_proximity) = signal(0.5_f64);
	let (selected, set_selected) = signal(None::<PersonId>);
	let (error, set_error) = signal(None::<String>);

	let on_add_person = move |ev: SubmitEvent| {
		ev.prevent_default();
		let (label, chosen) = (name.get_untracked(), group.get_untracked());
		match store.try_update(|s| s.try_add_person(&label, Some(chosen), None).map(|p| p.id)) {
			Some(Ok(id)) => {
				info!("Added person {}", id);
				set_name.set(String::new());
				set_error.set(None);
			}
			Some(Err(err)) => set_error.set(Some(err.to_string())),
			None => {}
		}
	};

	let on_add_relationship = move |ev: SubmitEvent| {
		ev.prevent_default();
		let (Some(a), Some(b)) = (from.get_untracked(), to.get_untracked()) else {
			set_error.set(Some("select two people".into()));
			return;
		};
		let value = proximity.get_untracked();
		match store.try_update(|s| s.try_relate(a, b, value).map(|e| e.value)) {
			Some(Ok(value)) => {
				info!("Related {} and {} at {:.1}", a, b, value);
				set_error.set(None);
			}
			Some(Err(err)) => set_error.set(Some(err.to_string())),
			None => {}
		}
	};

	let on_focus = move |ev: SubmitEvent| {
		ev.prevent_default();
		store.update(|s| s.set_focus(selected.get_untracked()));
	};

	let on_generate = move |_: MouseEvent| {
		let mut rng = ChaCha8Rng::seed_from_u64(js_sys::Date::now() as u64);
		store.update(|s| {
			s.generate_random_graph(&mut rng, DEFAULT_RANDOM_NODES, DEFAULT_RANDOM_EDGES)
		});
	};

	let on_reset = move |_: MouseEvent| {
		store.update(|s| s.reset());
		set_from.set(None);
		set_to.set(None);
		set_selected.set(None);
		set_error.set(None);
	};

	view! {
		<aside class="control-panel">
			<h2>"Control Panel"</h2>

			<section class="panel-section">
				<h3>"Add Person"</h3>
				<form on:submit=on_add_person>
					<label>"Name"</label>
					<input
						type="text"
						placeholder="Person name"
						prop:value=move || name.get()
						on:input=move |ev| set_name.set(event_target_value(&ev))
					/>
					<label>"Group"</label>
					<select
						prop:value=move || group.get()
						on:change=move |ev| set_group.set(event_target_value(&ev))
					>
						{GROUPS.iter().map(|g| view! { <option value=*g>{*g}</option> }).collect_view()}
					</select>
					<button type="submit">"Add Person"</button>
				</form>
			</section>

			<section class="panel-section">
				<h3>"Add Relationship"</h3>
				<form on:submit=on_add_relationship>
					<label>"Person A"</label>
					<select
						prop:value=move || person_value(from.get())
						on:change=move |ev| set_from.set(parse_person(&event_target_value(&ev)))
					>
						<option value="">"Select person..."</option>
						{person_options(store)}
					</select>
					<label>"Person B"</label>
					<select
						prop:value=move || person_value(to.get())
						on:change=move |ev| set_to.set(parse_person(&event_target_value(&ev)))
					>
						<option value="">"Select person..."</option>
						{person_options(store)}
					</select>
					<label>{move || format!("Proximity ({:.1})", proximity.get())}</label>
					<input
						type="range"
						min="0.1"
						max="1"
						step="0.1"
						prop:value=move || proximity.get().to_string()
						on:input=move |ev| {
							if let Ok(value) = event_target_value(&ev).parse() {
								set_proximity.set(value);
							}
						}
					/>
					<button type="submit">"Add Relationship"</button>
				</form>
			</section>

			{move || error.get().map(|msg| view! { <p class="panel-error">{msg}</p> })}

			<section class="panel-section">
				<h3>"Ego Focus"</h3>
				<form on:submit=on_focus>
					<label>"Focus on Person"</label>
					<select
						prop:value=move || person_value(selected.get())
						on:change=move |ev| set_selected.set(parse_person(&event_target_value(&ev)))
					>
						<option value="">"Show all"</option>
						{person_options(store)}
					</select>
					<button type="submit">"Apply Focus"</button>
				</form>
			</section>

			<section class="panel-section">
				<h3>"Simulation Settings"</h3>
				<label>
					<input
						type="checkbox"
						prop:checked=move || store.with(|s| s.physics_enabled())
						on:change=move |ev| {
							let enabled = event_target_checked(&ev);
							store.update(|s| s.set_physics_enabled(enabled));
						}
					/>
					"Enable Physics"
				</label>
				<label>
					{move || {
						format!(
							"Filter Weak Connections ({:.1})",
							store.with(|s| s.proximity_threshold()),
						)
					}}
				</label>
				<input
					type="range"
					min="0"
					max="0.9"
					step="0.1"
					prop:value=move || store.with(|s| s.proximity_threshold()).to_string()
					on:input=move |ev| {
						if let Ok(threshold) = event_target_value(&ev).parse() {
							store.update(|s| s.set_proximity_threshold(threshold));
						}
					}
				/>
			</section>

			<section class="panel-section">
				<button class="generate" on:click=on_generate>
					"Generate Random Network"
				</button>
				<button class="reset" on:click=on_reset>
					"Reset"
				</button>
			</section>
		</aside>
	}
}
