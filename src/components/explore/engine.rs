//! Engine facade exposed to the host page.
//!
//! Owns the scene and the presentation modes, advances the engine clock,
//! and dispatches view switches over the closed view set. The host binds
//! the engine to a canvas element and forwards pointer and swipe input.

use log::{info, warn};

use super::error::ExploreError;
use super::mode::{Lifecycle, Mode};
use super::scene::{Point, Scene};
use super::topics_mode::TopicsMode;
use super::types::ExploreData;

/// Filler items created in the scene's shared pool.
const FAKE_POOL_SIZE: usize = 200;

/// Views the host page can switch between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
	Explore,
	Topics,
	Issues,
}

impl View {
	/// The view name used by the host page.
	pub fn label(self) -> &'static str {
		match self {
			View::Explore => "explore",
			View::Topics => "topics",
			View::Issues => "issues",
		}
	}
}

/// The rendering engine behind the explore canvas.
pub struct Explore {
	scene: Scene,
	topics: TopicsMode,
	clock: f64,
	data: Option<ExploreData>,
	initialized: bool,
}

impl Explore {
	/// Create an engine for a canvas of the given pixel size.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			scene: Scene::new(width, height),
			topics: TopicsMode::new(),
			clock: 0.0,
			data: None,
			initialized: false,
		}
	}

	/// Assign the data model. Only callable before [`Self::init`].
	pub fn set_data(&mut self, data: ExploreData) {
		if self.initialized {
			warn!("explore: set_data after init is ignored");
			return;
		}
		self.data = Some(data);
	}

	/// Build scene items and initialize the modes.
	///
	/// The breakpoint is chosen from the viewport width, which may differ
	/// from the canvas size in embedded layouts.
	pub fn init(&mut self, viewport_width: f64) -> Result<(), ExploreError> {
		if self.initialized {
			warn!("explore: init called twice");
			return Ok(());
		}
		let data = self
			.data
			.clone()
			.ok_or_else(|| ExploreError::DataLoad("no data set before init".into()))?;

		for topic in &data.topics {
			for issue in &topic.issues {
				self.scene.add_issue_item(&issue.id);
			}
		}
		for _ in 0..FAKE_POOL_SIZE {
			self.scene.add_fake_item();
		}

		self.topics.set_data(data.topics);
		self.topics.init(&self.scene, viewport_width);
		self.initialized = true;
		info!(
			"explore: initialized with {} scene items",
			self.scene.item_count()
		);
		Ok(())
	}

	/// Show the topics view.
	pub fn show_topics(&mut self) {
		if !self.initialized {
			warn!("explore: show_topics before init");
			return;
		}
		self.topics.show(&mut self.scene, self.clock);
	}

	/// Dispatch a view switch from the host page.
	pub fn switch_view(&mut self, view: View) {
		match view {
			View::Topics => self.show_topics(),
			View::Explore | View::Issues => {
				warn!("explore: view \"{}\" is not implemented", view.label());
			}
		}
	}

	/// Advance one frame: emit render-start and drive the active mode.
	pub fn tick(&mut self, dt: f64) {
		self.clock += dt;
		self.scene.render_start.emit(&());
		self.topics.tick(&mut self.scene, self.clock, dt);
	}

	/// Forward the pointer position from the host canvas element.
	pub fn set_mouse_position(&mut self, position: Point) {
		self.scene.set_mouse_position(position);
	}

	/// A leftward swipe gesture was recognized.
	pub fn notify_swipe_left(&self) {
		self.scene.swipe_left.emit(&());
	}

	/// A rightward swipe gesture was recognized.
	pub fn notify_swipe_right(&self) {
		self.scene.swipe_right.emit(&());
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.scene.resize(width, height);
	}

	/// The scene, for rendering.
	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	/// Lifecycle of the topics mode.
	pub fn topics_lifecycle(&self) -> Lifecycle {
		self.topics.lifecycle()
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::{IssueRecord, TopicRecord};
	use super::*;

	fn data(topics: usize, issues_per: usize) -> ExploreData {
		ExploreData {
			topics: (0..topics)
				.map(|i| TopicRecord {
					id: format!("topic-{i}"),
					name: None,
					issues: (0..issues_per)
						.map(|j| IssueRecord {
							id: format!("issue-{i}-{j}"),
							title: None,
						})
						.collect(),
				})
				.collect(),
		}
	}

	#[test]
	fn init_without_data_is_a_load_failure() {
		let mut engine = Explore::new(1200.0, 800.0);
		assert!(matches!(
			engine.init(1200.0),
			Err(ExploreError::DataLoad(_))
		));
	}

	#[test]
	fn init_builds_issue_items_and_fake_pool() {
		let mut engine = Explore::new(1200.0, 800.0);
		engine.set_data(data(2, 3));
		engine.init(1200.0).expect("init should succeed");

		assert_eq!(engine.scene.fakes().len(), FAKE_POOL_SIZE);
		assert_eq!(engine.scene.item_count(), 6 + FAKE_POOL_SIZE);
		assert!(engine.scene.item_by_id("issue-1-2").is_some());
	}

	#[test]
	fn issues_shared_between_topics_resolve_to_one_item() {
		let mut model = data(2, 1);
		model.topics[1].issues[0].id = "issue-0-0".into();

		let mut engine = Explore::new(1200.0, 800.0);
		engine.set_data(model);
		engine.init(1200.0).expect("init should succeed");
		assert_eq!(engine.scene.item_count(), 1 + FAKE_POOL_SIZE);
	}

	#[test]
	fn show_topics_reaches_shown_after_the_fade() {
		let mut engine = Explore::new(1200.0, 800.0);
		engine.set_data(data(3, 2));
		engine.init(1200.0).expect("init should succeed");

		engine.show_topics();
		assert_eq!(engine.topics_lifecycle(), Lifecycle::Showing);

		for _ in 0..40 {
			engine.tick(0.016);
		}
		assert_eq!(engine.topics_lifecycle(), Lifecycle::Shown);
	}

	#[test]
	fn unimplemented_views_are_inert() {
		let mut engine = Explore::new(1200.0, 800.0);
		engine.set_data(data(2, 1));
		engine.init(1200.0).expect("init should succeed");

		engine.switch_view(View::Explore);
		engine.switch_view(View::Issues);
		assert_eq!(engine.topics_lifecycle(), Lifecycle::Initialized);

		engine.switch_view(View::Topics);
		assert_eq!(engine.topics_lifecycle(), Lifecycle::Showing);
	}
}
