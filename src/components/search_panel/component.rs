use std::time::Duration;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, KeyboardEvent};

use super::ports::{PanelState, SignalPorts};
use crate::components::force_graph::GraphHandle;
use crate::search::{
	ClickTarget, GraphWidget, NodeId, ResultsView, SearchConfig, SearchController, SearchResult,
	SearchTrigger,
};

type Controller = SearchController<GraphHandle, SignalPorts>;
type Listeners = Vec<(&'static str, Closure<dyn FnMut(Event)>)>;

/// Id of the optional `<script type="application/json">` holding a [`SearchConfig`].
pub const CONFIG_ELEMENT_ID: &str = "search-config";

/// Read the inline config, falling back to defaults.
pub fn load_config() -> SearchConfig {
	let Some(raw) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
		.and_then(|el| el.text_content())
	else {
		return SearchConfig::default();
	};
	SearchConfig::from_json(&raw).unwrap_or_else(|err| {
		warn!("{err}, using defaults");
		SearchConfig::default()
	})
}

fn focus_in_text_input() -> bool {
	let Some(active) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.active_element())
	else {
		return false;
	};
	matches!(active.tag_name().as_str(), "INPUT" | "TEXTAREA")
		|| active
			.dyn_ref::<HtmlElement>()
			.is_some_and(HtmlElement::is_content_editable)
}

/// Classify a click by the path it was dispatched along. The path is fixed
/// at dispatch, so it stays valid when a handler re-renders the target.
fn click_target(
	ev: &Event,
	results: Option<web_sys::Node>,
	input: Option<web_sys::Node>,
	button: Option<web_sys::Node>,
) -> ClickTarget {
	let path = ev.composed_path();
	let on_path = |el: &Option<web_sys::Node>| {
		el.as_ref().is_some_and(|el| {
			path.iter()
				.any(|n| n.dyn_ref::<web_sys::Node>().is_some_and(|n| n.is_same_node(Some(el))))
		})
	};
	if on_path(&results) {
		ClickTarget::ResultsPanel
	} else if on_path(&input) {
		ClickTarget::SearchInput
	} else if on_path(&button) {
		ClickTarget::SearchButton
	} else {
		ClickTarget::Elsewhere
	}
}

/// Document-wide `/`, `Escape` and click-outside handling.
fn listen_document(
	controller: StoredValue<Option<Controller>, LocalStorage>,
	listeners: StoredValue<Listeners, LocalStorage>,
	refs: (
		NodeRef<leptos::html::Div>,
		NodeRef<leptos::html::Input>,
		NodeRef<leptos::html::Button>,
	),
) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};

	let keydown = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
		let Some(ev) = ev.dyn_ref::<KeyboardEvent>() else {
			return;
		};
		let key = ev.key();
		let in_text = focus_in_text_input();
		let response = controller
			.try_update_value(|c| c.as_mut().map(|c| c.handle_key(&key, in_text)))
			.flatten();
		if response.is_some_and(|r| r.prevent_default) {
			ev.prevent_default();
		}
	});

	let (results_ref, input_ref, button_ref) = refs;
	let click = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
		let target = click_target(
			&ev,
			results_ref.get_untracked().map(Into::into),
			input_ref.get_untracked().map(Into::into),
			button_ref.get_untracked().map(Into::into),
		);
		controller.try_update_value(|c| {
			if let Some(c) = c {
				c.handle_click(target);
			}
		});
	});

	listeners.update_value(|ls| {
		for (kind, cb) in [("keydown", keydown), ("click", click)] {
			let _ = document.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref());
			ls.push((kind, cb));
		}
	});
}

/// Search box and results list for the movie graph.
///
/// Binds to `graph` after `warmup_ms`; if the graph is not there by then the
/// panel stays inert for the rest of the page's life.
#[component]
pub fn SearchPanel(
	graph: GraphHandle,
	#[prop(optional)] config: Option<SearchConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_else(load_config);
	let query = RwSignal::new(String::new());
	let panel = RwSignal::new(PanelState::default());
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let button_ref = NodeRef::<leptos::html::Button>::new();
	let results_ref = NodeRef::<leptos::html::Div>::new();
	let ports = SignalPorts {
		query,
		panel,
		input: input_ref,
	};

	let controller = StoredValue::new_local(None::<Controller>);
	let pending = StoredValue::new_local(None::<TimeoutHandle>);
	let last_seen = StoredValue::new_local(String::new());
	let listeners = StoredValue::new_local(Listeners::new());

	let warmup = Duration::from_millis(config.warmup_ms.into());
	set_timeout(
		move || {
			let ready = graph.is_ready().then(|| graph.clone());
			match SearchController::attach(ready, ports, config) {
				Ok(ctl) => {
					info!("search bound to {} nodes", ctl.widget().node_ids().len());
					controller.set_value(Some(ctl));
					listen_document(controller, listeners, (results_ref, input_ref, button_ref));
				}
				Err(err) => error!("{err}"),
			}
		},
		warmup,
	);

	on_cleanup(move || {
		pending.try_with_value(|p| {
			if let Some(handle) = p {
				handle.clear();
			}
		});
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			return;
		};
		listeners.try_with_value(|ls| {
			for (kind, cb) in ls {
				let _ =
					document.remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref());
			}
		});
	});

	let run_search = move || {
		if let Some(handle) = pending.get_value() {
			handle.clear();
		}
		pending.set_value(None);
		controller.update_value(|c| {
			if let Some(c) = c {
				c.search_current();
			}
		});
	};

	let on_keyup = move |ev: KeyboardEvent| {
		let key = ev.key();
		let value = event_target_value(&ev);
		let changed = last_seen.with_value(|last| *last != value);
		last_seen.set_value(value.clone());
		// arrows, modifiers and the `/` shortcut leave the query as it was
		if key != "Enter" && !changed {
			return;
		}

		let Some(trigger) = controller.with_value(|c| c.as_ref().map(|c| c.plan_keyup(&key, &value)))
		else {
			return;
		};
		match trigger {
			SearchTrigger::Immediate => run_search(),
			SearchTrigger::Debounced(ms) => {
				if let Some(handle) = pending.get_value() {
					handle.clear();
				}
				match set_timeout_with_handle(run_search, Duration::from_millis(ms.into())) {
					Ok(handle) => pending.set_value(Some(handle)),
					Err(_) => run_search(),
				}
			}
		}
	};

	let select = move |id: &NodeId| {
		controller.update_value(|c| {
			if let Some(Err(err)) = c.as_mut().map(|c| c.select_result(id)) {
				warn!("{err}");
			}
		});
	};

	let results_view = Memo::new(move |_| panel.with(|p| p.view.clone()));
	let result_item = move |result: SearchResult| {
		let (id_click, id_active) = (result.id.clone(), result.id);
		view! {
			<div
				class="resultItem"
				class:active=move || panel.with(|p| p.is_active(&id_active))
				on:click=move |_| select(&id_click)
			>
				{result.label}
			</div>
		}
	};

	view! {
		<div id="searchContainer">
			<div class="searchHeader">
				<h3>"Movie Explorer"</h3>
				<div class="searchDescription">"Search the graph by movie title"</div>
			</div>
			<div class="searchControls">
				<input
					type="text"
					id="searchInput"
					node_ref=input_ref
					placeholder="Search for a movie... (Press '/' to focus)"
					prop:value=query
					on:input=move |ev| query.set(event_target_value(&ev))
					on:keyup=on_keyup
				/>
				<button id="searchBtn" node_ref=button_ref on:click=move |_| run_search()>
					"Search"
				</button>
			</div>
		</div>
		<div
			id="searchResults"
			node_ref=results_ref
			style:display=move || { if panel.with(|p| p.visible) { "block" } else { "none" } }
		>
			{move || match results_view.get() {
				ResultsView::Empty => ().into_any(),
				ResultsView::NoResults => {
					view! { <div class="searchDescription">"No movies found"</div> }.into_any()
				}
				ResultsView::Matches(results) => {
					let title = format!("Found {} movies", results.len());
					view! {
						<div id="searchTitle">{title}</div>
						{results.into_iter().map(result_item).collect_view()}
					}
						.into_any()
				}
			}}
		</div>
	}
}
