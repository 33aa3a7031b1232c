use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, GraphData, GraphHandle, GraphLink, GraphNode};
use crate::components::search_panel::SearchPanel;

const MOVIE_GROUP: u32 = 0;
const PERSON_GROUP: u32 = 1;

/// (movie, cast) pairs for the demo graph.
const CATALOG: &[(&str, &[&str])] = &[
	("The Matrix", &["Keanu Reeves", "Carrie-Anne Moss", "Laurence Fishburne"]),
	("Matrix Reloaded", &["Keanu Reeves", "Carrie-Anne Moss", "Laurence Fishburne"]),
	("The Matrix Revolutions", &["Keanu Reeves", "Carrie-Anne Moss"]),
	("John Wick", &["Keanu Reeves", "Willem Dafoe"]),
	("Speed", &["Keanu Reeves", "Sandra Bullock"]),
	("Inception", &["Leonardo DiCaprio", "Tom Hardy", "Elliot Page"]),
	("The Revenant", &["Leonardo DiCaprio", "Tom Hardy"]),
	("Mad Max: Fury Road", &["Tom Hardy", "Charlize Theron"]),
	("Gravity", &["Sandra Bullock", "George Clooney"]),
	("Memento", &["Guy Pearce", "Carrie-Anne Moss"]),
	("Spider-Man", &["Tobey Maguire", "Willem Dafoe"]),
];

/// Build the movie/actor graph: one node per movie and per person, one link
/// from each person to every movie they appear in.
fn movie_graph() -> GraphData {
	let mut data = GraphData::default();
	for (m, (title, cast)) in CATALOG.iter().enumerate() {
		let movie_id = format!("movie-{m}");
		data.nodes.push(GraphNode {
			id: movie_id.clone().into(),
			label: Some((*title).to_owned()),
			color: None,
			group: Some(MOVIE_GROUP),
		});
		for name in cast.iter() {
			let person_id = format!("person-{}", name.to_lowercase().replace(' ', "-"));
			if !data.nodes.iter().any(|n| n.id.as_str() == person_id) {
				data.nodes.push(GraphNode {
					id: person_id.clone().into(),
					label: Some((*name).to_owned()),
					color: None,
					group: Some(PERSON_GROUP),
				});
			}
			data.links.push(GraphLink {
				source: person_id.into(),
				target: movie_id.clone().into(),
			});
		}
	}
	data
}

/// Fullscreen graph with the search panel bound to it.
#[component]
fn MovieExplorer() -> impl IntoView {
	let graph_data = Signal::derive(movie_graph);
	let graph = GraphHandle::new();

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_data graph=graph.clone() fullscreen=true />
			<SearchPanel graph=graph />
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
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

			<MovieExplorer />
		</ErrorBoundary>
	}
}
