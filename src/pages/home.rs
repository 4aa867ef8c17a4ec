use leptos::either::Either;
use leptos::prelude::*;

use crate::components::force_graph::{CompanyGraph, load_graph_data};

const DATA_URL: &str = "data.json";

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// Fetched once; a failure ends up in the error boundary
	let graph_data = LocalResource::new(|| load_graph_data(DATA_URL));

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
			<div class="fullscreen-graph">
				{move || match graph_data.get() {
					None => Either::Left(view! { <p class="loading">"Loading graph..."</p> }),
					Some(result) => Either::Right(
						result.map(|data| view! { <CompanyGraph data=data /> }),
					),
				}}
			</div>
		</ErrorBoundary>
	}
}
