//! explore-canvas: interactive topic-cluster visualization for issue data.
//!
//! This crate provides a WASM-based canvas widget that renders topics as
//! clusters of issue dots with hover highlighting and swipe paging between
//! topics.

use leptos::either::Either;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::explore::{
	ExploreCanvas, ExploreData, ExploreError, IssueRecord, TopicRecord,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("explore-canvas: logging initialized");
}

/// Load the explore model from a script element with id="explore-data".
/// Expected format: JSON with { topics: [...] }
pub fn load_explore_data() -> Result<ExploreData, ExploreError> {
	let window: Window =
		web_sys::window().ok_or_else(|| ExploreError::DataLoad("no window".into()))?;
	let document = window
		.document()
		.ok_or_else(|| ExploreError::DataLoad("no document".into()))?;
	let element = document
		.get_element_by_id("explore-data")
		.ok_or_else(|| ExploreError::DataLoad("script element #explore-data not found".into()))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| ExploreError::DataLoad("#explore-data is not a script element".into()))?;
	let json_text = script
		.text()
		.map_err(|_| ExploreError::DataLoad("could not read #explore-data".into()))?;

	let data: ExploreData = serde_json::from_str(&json_text)?;
	info!("explore-canvas: loaded {} topics", data.topics.len());
	Ok(data)
}

/// Main application component.
/// Loads the model from the DOM and renders the explore canvas, or an error
/// overlay when the model is missing or unparsable.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	match load_explore_data() {
		Ok(data) => {
			let data_signal = Signal::derive(move || data.clone());

			Either::Left(view! {
				<Html attr:lang="en" attr:dir="ltr" />
				<Title text="Explore" />
				<Meta charset="UTF-8" />
				<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

				<div class="fullscreen-explore">
					<ExploreCanvas data=data_signal fullscreen=true />
					<div class="explore-overlay">
						<h1>"Explore"</h1>
						<p class="subtitle">
							"Hover a topic to trace its issues. Swipe to move between topics."
						</p>
					</div>
				</div>
			})
		}
		Err(e) => {
			warn!("explore-canvas: {e}");
			Either::Right(view! {
				<div class="explore-load-error">
					<h1>"Explore"</h1>
					<p>{format!("The visualization could not be loaded: {e}")}</p>
				</div>
			})
		}
	}
}
