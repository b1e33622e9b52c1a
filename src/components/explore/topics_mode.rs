//! Topics mode: clustered topic layout, hover highlighting, swipe paging.
//!
//! Builds one [`Topic`] per source record, positions the clusters per the
//! active responsive breakpoint, redraws connector lines every render frame,
//! and pages horizontally between topics on swipe gestures. Canvas and topic
//! event listeners enqueue into the mode's event queue; the queue is drained
//! inside [`Mode::tick`], so delivery never re-enters mode state.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, warn};

use super::error::ExploreError;
use super::events::ListenerId;
use super::mode::{Lifecycle, Mode};
use super::responsive::Breakpoint;
use super::scene::{ItemHandle, Point, Scene};
use super::theme::Color;
use super::topic::{Topic, TopicRegistry, pseudo_random};
use super::types::TopicRecord;

/// Filler items attached to every topic.
pub const FAKES_PER_TOPIC: usize = 20;

/// Alpha of the issue chain drawn on the hover-selected topic.
const SELECTED_LINE_ALPHA: f64 = 0.1;
/// Alpha of the cluster haze drawn on every other topic.
const CLUSTER_LINE_ALPHA: f64 = 0.02;
const LINE_COLOR: Color = Color::rgb(0, 0, 0);

/// Horizontal margin (px) subtracted from the canvas for the large spread.
const LARGE_SPREAD_MARGIN: f64 = 400.0;
/// Horizontal margin (px) for the medium two-column grid.
const MEDIUM_GRID_MARGIN: f64 = 500.0;
/// Row step (px) of the medium grid.
const MEDIUM_ROW_STEP: f64 = 350.0;

/// Initial cluster position for one topic, relative to the centered origin.
/// Coordinates are pixel-aligned.
fn initial_position(
	breakpoint: Breakpoint,
	canvas_width: f64,
	index: usize,
	count: usize,
) -> Point {
	let i = index as f64;
	let position = match breakpoint {
		Breakpoint::Large => {
			let spread = canvas_width - LARGE_SPREAD_MARGIN;
			let x = if count <= 1 {
				0.0
			} else {
				spread / (count as f64 - 1.0) * i - spread / 2.0
			};
			Point::new(x, 0.0)
		}
		Breakpoint::Medium => {
			let span = canvas_width - MEDIUM_GRID_MARGIN;
			let x = span * (index % 2) as f64 - span / 2.0;
			let y = MEDIUM_ROW_STEP * (index / 2) as f64 - MEDIUM_ROW_STEP;
			Point::new(x, y)
		}
		Breakpoint::Small => Point::new(canvas_width * i, 0.0),
	};
	position.round()
}

enum QueuedEvent {
	RenderStart,
	SwipeLeft,
	SwipeRight,
	HoverEnter(usize),
	HoverExit(usize),
}

struct CanvasSubscriptions {
	render_start: ListenerId,
	swipe_left: ListenerId,
	swipe_right: ListenerId,
}

struct TopicSubscription {
	over: ListenerId,
	out: ListenerId,
}

/// The topics presentation mode.
pub struct TopicsMode {
	data: Option<Vec<TopicRecord>>,
	registry: TopicRegistry,
	lifecycle: Lifecycle,
	breakpoint: Breakpoint,
	/// Currently centered topic during swipe paging.
	focus: usize,
	/// Topic the pointer is currently over, if any.
	selected: Option<usize>,
	queue: Rc<RefCell<VecDeque<QueuedEvent>>>,
	canvas_subs: Option<CanvasSubscriptions>,
	topic_subs: Vec<TopicSubscription>,
}

impl Default for TopicsMode {
	fn default() -> Self {
		Self::new()
	}
}

impl TopicsMode {
	pub fn new() -> Self {
		Self {
			data: None,
			registry: TopicRegistry::default(),
			lifecycle: Lifecycle::Uninitialized,
			breakpoint: Breakpoint::Small,
			focus: 0,
			selected: None,
			queue: Rc::new(RefCell::new(VecDeque::new())),
			canvas_subs: None,
			topic_subs: Vec::new(),
		}
	}

	/// Store the topic source records. Only callable before [`Self::init`].
	pub fn set_data(&mut self, data: Vec<TopicRecord>) {
		if self.lifecycle != Lifecycle::Uninitialized {
			warn!("topics mode: set_data after init is ignored");
			return;
		}
		self.data = Some(data);
	}

	/// Resolve issues, pick fillers, build and place every topic.
	pub fn init(&mut self, scene: &Scene, viewport_width: f64) {
		if self.lifecycle != Lifecycle::Uninitialized {
			warn!("topics mode: init called twice");
			return;
		}
		let Some(records) = self.data.take() else {
			warn!("topics mode: init without data");
			return;
		};

		self.breakpoint = Breakpoint::classify(viewport_width);
		let count = records.len();
		let canvas_width = scene.canvas_size().x;

		for (i, record) in records.iter().enumerate() {
			let issues = resolve_issues(scene, record);
			let fakes = select_fakes(scene, i);
			let mut topic = Topic::new(record, i, issues, fakes);
			topic.place(initial_position(self.breakpoint, canvas_width, i, count));
			topic.setup();
			self.registry.register(topic);
		}

		self.lifecycle = Lifecycle::Initialized;
		debug!("topics mode: initialized {count} topics");
	}

	fn start_show(&mut self, scene: &mut Scene, clock: f64) {
		scene.attach_container();

		let mut topic_subs = Vec::with_capacity(self.registry.len());
		for topic in self.registry.iter_mut() {
			topic.show(clock);

			let queue = Rc::clone(&self.queue);
			let over = topic.mouse_over.add(move |&index: &usize| {
				queue.borrow_mut().push_back(QueuedEvent::HoverEnter(index));
			});
			let queue = Rc::clone(&self.queue);
			let out = topic.mouse_out.add(move |&index: &usize| {
				queue.borrow_mut().push_back(QueuedEvent::HoverExit(index));
			});
			topic_subs.push(TopicSubscription { over, out });
		}
		self.topic_subs = topic_subs;

		let queue = Rc::clone(&self.queue);
		let render_start = scene.render_start.add(move |&()| {
			queue.borrow_mut().push_back(QueuedEvent::RenderStart);
		});
		let queue = Rc::clone(&self.queue);
		let swipe_left = scene.swipe_left.add(move |&()| {
			queue.borrow_mut().push_back(QueuedEvent::SwipeLeft);
		});
		let queue = Rc::clone(&self.queue);
		let swipe_right = scene.swipe_right.add(move |&()| {
			queue.borrow_mut().push_back(QueuedEvent::SwipeRight);
		});
		self.canvas_subs = Some(CanvasSubscriptions {
			render_start,
			swipe_left,
			swipe_right,
		});

		self.lifecycle = Lifecycle::Showing;
		debug!("topics mode: showing");
	}

	fn start_hide(&mut self, scene: &mut Scene, clock: f64) {
		scene.detach_container();

		if let Some(subs) = self.canvas_subs.take() {
			scene.render_start.remove(subs.render_start);
			scene.swipe_left.remove(subs.swipe_left);
			scene.swipe_right.remove(subs.swipe_right);
		}

		let topic_subs = std::mem::take(&mut self.topic_subs);
		for (topic, subs) in self.registry.iter_mut().zip(topic_subs) {
			topic.hide(clock);
			topic.end_tone_down(clock);
			topic.mouse_over.remove(subs.over);
			topic.mouse_out.remove(subs.out);
		}

		self.queue.borrow_mut().clear();
		self.selected = None;
		self.lifecycle = Lifecycle::Hiding;
		debug!("topics mode: hiding");
	}

	fn process_event(&mut self, scene: &mut Scene, event: QueuedEvent, clock: f64, dt: f64) {
		match event {
			QueuedEvent::RenderStart => {
				self.draw_lines(scene);
				self.update_topics(scene, clock, dt);
			}
			QueuedEvent::SwipeLeft => self.swipe_to_next(scene, clock),
			QueuedEvent::SwipeRight => self.swipe_to_previous(scene, clock),
			QueuedEvent::HoverEnter(index) => self.on_mouse_over(index, clock),
			QueuedEvent::HoverExit(index) => self.on_mouse_out(index, clock),
		}
	}

	/// Rebuild the connector-line buffer: a consecutive chain on the
	/// selected topic, the complete pair graph on every other one.
	fn draw_lines(&self, scene: &mut Scene) {
		scene.clear_lines();

		for topic in self.registry.iter() {
			let issues = topic.issues();
			if Some(topic.index()) == self.selected {
				for pair in issues.windows(2) {
					scene.draw_line(pair[0], pair[1], LINE_COLOR, SELECTED_LINE_ALPHA);
				}
			} else {
				for j in 0..issues.len() {
					for k in 0..issues.len() {
						if j != k {
							scene.draw_line(issues[j], issues[k], LINE_COLOR, CLUSTER_LINE_ALPHA);
						}
					}
				}
			}
		}
	}

	fn update_topics(&mut self, scene: &mut Scene, clock: f64, dt: f64) {
		scene.clear_labels();
		for topic in self.registry.iter_mut() {
			topic.update(scene, clock, dt);
		}
	}

	fn on_mouse_over(&mut self, index: usize, clock: f64) {
		self.selected = Some(index);
		for topic in self.registry.others_mut(index) {
			topic.tone_down(clock);
		}
	}

	fn on_mouse_out(&mut self, index: usize, clock: f64) {
		for topic in self.registry.others_mut(index) {
			topic.end_tone_down(clock);
		}
		self.selected = None;
	}

	fn swipe_to_next(&mut self, scene: &Scene, clock: f64) {
		if self.registry.is_empty() {
			return;
		}
		self.focus = (self.focus + 1).min(self.registry.len() - 1);
		self.page_topics(scene, clock);
	}

	fn swipe_to_previous(&mut self, scene: &Scene, clock: f64) {
		self.focus = self.focus.saturating_sub(1);
		self.page_topics(scene, clock);
	}

	fn page_topics(&mut self, scene: &Scene, clock: f64) {
		let width = scene.canvas_size().x;
		let focus = self.focus as f64;
		for topic in self.registry.iter_mut() {
			let x = width * (topic.index() as f64 - focus);
			topic.move_to(Point::new(x, 0.0), clock);
		}
	}
}

fn resolve_issues(scene: &Scene, record: &TopicRecord) -> Vec<ItemHandle> {
	record
		.issues
		.iter()
		.filter_map(|issue| match scene.item_by_id(&issue.id) {
			Some(handle) => Some(handle),
			None => {
				// Skip-and-warn: a missing issue never fails the topic.
				warn!(
					"{}",
					ExploreError::UnresolvedIssue {
						id: issue.id.clone(),
					}
				);
				None
			}
		})
		.collect()
}

fn select_fakes(scene: &Scene, topic_index: usize) -> Vec<ItemHandle> {
	let pool = scene.fakes();
	if pool.is_empty() {
		return Vec::new();
	}
	(0..FAKES_PER_TOPIC)
		.map(|j| {
			let seed = topic_index as f64 * 57.3 + j as f64;
			let slot = (pseudo_random(seed) * pool.len() as f64) as usize;
			pool[slot.min(pool.len() - 1)]
		})
		.collect()
}

impl Mode for TopicsMode {
	fn lifecycle(&self) -> Lifecycle {
		self.lifecycle
	}

	fn show(&mut self, scene: &mut Scene, clock: f64) {
		match self.lifecycle {
			Lifecycle::Initialized | Lifecycle::Hidden | Lifecycle::Hiding => {
				self.start_show(scene, clock);
			}
			Lifecycle::Showing | Lifecycle::Shown => {}
			Lifecycle::Uninitialized | Lifecycle::TornDown => {
				warn!("topics mode: show in state {:?}", self.lifecycle);
			}
		}
	}

	fn hide(&mut self, scene: &mut Scene, clock: f64) {
		match self.lifecycle {
			Lifecycle::Showing | Lifecycle::Shown => self.start_hide(scene, clock),
			_ => {}
		}
	}

	fn tick(&mut self, scene: &mut Scene, clock: f64, dt: f64) {
		match self.lifecycle {
			Lifecycle::Showing => {
				let all_shown = self.registry.iter().all(|t| t.show_finished(clock));
				if all_shown {
					self.lifecycle = Lifecycle::Shown;
					debug!("topics mode: shown");
				}
			}
			Lifecycle::Hiding => {
				// Listeners are already removed; the hidden state is
				// declared on the first tick after the hide started.
				self.lifecycle = Lifecycle::Hidden;
				debug!("topics mode: hidden");
			}
			_ => {}
		}

		if !self.lifecycle.is_active() {
			return;
		}

		loop {
			let event = self.queue.borrow_mut().pop_front();
			let Some(event) = event else {
				break;
			};
			self.process_event(scene, event, clock, dt);
		}
	}

	fn teardown(&mut self, scene: &mut Scene, clock: f64) {
		if self.lifecycle.is_active() {
			self.start_hide(scene, clock);
		}
		self.registry.clear();
		self.topic_subs.clear();
		self.queue.borrow_mut().clear();
		self.lifecycle = Lifecycle::TornDown;
	}
}

#[cfg(test)]
mod tests {
	use super::super::topic::Emphasis;
	use super::super::types::IssueRecord;
	use super::*;

	fn records(topics: usize, issues_per: usize) -> Vec<TopicRecord> {
		(0..topics)
			.map(|i| TopicRecord {
				id: format!("topic-{i}"),
				name: Some(format!("Topic {i}")),
				issues: (0..issues_per)
					.map(|j| IssueRecord {
						id: format!("issue-{i}-{j}"),
						title: None,
					})
					.collect(),
			})
			.collect()
	}

	fn scene_for(records: &[TopicRecord]) -> Scene {
		let mut scene = Scene::new(1200.0, 800.0);
		for record in records {
			for issue in &record.issues {
				scene.add_issue_item(&issue.id);
			}
		}
		for _ in 0..40 {
			scene.add_fake_item();
		}
		scene
	}

	fn ready_mode(scene: &Scene, records: Vec<TopicRecord>, viewport_width: f64) -> TopicsMode {
		let mut mode = TopicsMode::new();
		mode.set_data(records);
		mode.init(scene, viewport_width);
		mode
	}

	fn frame(mode: &mut TopicsMode, scene: &mut Scene, clock: f64) {
		scene.render_start.emit(&());
		mode.tick(scene, clock, 0.016);
	}

	fn target_xs(mode: &TopicsMode) -> Vec<f64> {
		mode.registry.iter().map(|t| t.target_position().x).collect()
	}

	#[test]
	fn large_layout_spreads_evenly_and_symmetrically() {
		let records = records(4, 3);
		let scene = scene_for(&records);
		let mode = ready_mode(&scene, records, 1200.0);

		assert_eq!(target_xs(&mode), vec![-400.0, -133.0, 133.0, 400.0]);
		for topic in mode.registry.iter() {
			assert_eq!(topic.target_position().y, 0.0);
		}
	}

	#[test]
	fn large_layout_single_topic_sits_at_origin() {
		let records = records(1, 2);
		let scene = scene_for(&records);
		let mode = ready_mode(&scene, records, 1200.0);
		assert_eq!(target_xs(&mode), vec![0.0]);
	}

	#[test]
	fn medium_layout_alternates_columns_and_steps_rows() {
		let records = records(5, 1);
		let scene = scene_for(&records);
		let mode = ready_mode(&scene, records, 800.0);

		// span = 1200 - 500 = 700
		assert_eq!(target_xs(&mode), vec![-350.0, 350.0, -350.0, 350.0, -350.0]);
		let ys: Vec<f64> = mode
			.registry
			.iter()
			.map(|t| t.target_position().y)
			.collect();
		assert_eq!(ys, vec![-350.0, -350.0, 0.0, 0.0, 350.0]);
	}

	#[test]
	fn small_layout_pages_side_by_side() {
		let records = records(3, 1);
		let scene = scene_for(&records);
		let mode = ready_mode(&scene, records, 400.0);
		assert_eq!(target_xs(&mode), vec![0.0, 1200.0, 2400.0]);
	}

	#[test]
	fn every_topic_gets_twenty_fakes() {
		let records = records(3, 1);
		let scene = scene_for(&records);
		let mode = ready_mode(&scene, records, 400.0);
		for topic in mode.registry.iter() {
			assert_eq!(topic.fakes().len(), FAKES_PER_TOPIC);
		}
	}

	#[test]
	fn unresolved_issue_is_skipped_not_fatal() {
		let mut with_missing = records(1, 2);
		let scene = scene_for(&with_missing);
		with_missing[0].issues.push(IssueRecord {
			id: "nowhere".into(),
			title: None,
		});
		let mode = ready_mode(&scene, with_missing, 1200.0);
		assert_eq!(mode.registry.get(0).unwrap().issues().len(), 2);
	}

	#[test]
	fn swipe_round_trip_restores_positions() {
		let records = records(3, 1);
		let mut scene = scene_for(&records);
		let mut mode = ready_mode(&scene, records, 400.0);
		mode.show(&mut scene, 0.0);

		let before = target_xs(&mode);
		scene.swipe_left.emit(&());
		frame(&mut mode, &mut scene, 0.016);
		assert_eq!(mode.focus, 1);
		assert_eq!(target_xs(&mode), vec![-1200.0, 0.0, 1200.0]);

		scene.swipe_right.emit(&());
		frame(&mut mode, &mut scene, 0.032);
		assert_eq!(mode.focus, 0);
		assert_eq!(target_xs(&mode), before);
	}

	#[test]
	fn swipe_clamps_at_both_boundaries() {
		let records = records(3, 1);
		let mut scene = scene_for(&records);
		let mut mode = ready_mode(&scene, records, 400.0);
		mode.show(&mut scene, 0.0);

		scene.swipe_right.emit(&());
		frame(&mut mode, &mut scene, 0.016);
		assert_eq!(mode.focus, 0);

		for i in 0..5 {
			scene.swipe_left.emit(&());
			frame(&mut mode, &mut scene, 0.032 + i as f64 * 0.016);
		}
		// Cap is topic_count - 1, not the source's hardcoded 3.
		assert_eq!(mode.focus, 2);
	}

	#[test]
	fn line_counts_follow_selection() {
		let records = records(2, 3);
		let mut scene = scene_for(&records);
		let mut mode = ready_mode(&scene, records, 1200.0);
		mode.show(&mut scene, 0.0);

		// No selection: complete pair graph on both topics.
		frame(&mut mode, &mut scene, 0.016);
		assert_eq!(scene.lines().len(), 2 * 3 * 2);

		// Hover topic 0 (center x = 600 - 400 = 200 on the large spread).
		scene.set_mouse_position(Point::new(200.0, 400.0));
		frame(&mut mode, &mut scene, 0.032);
		assert_eq!(mode.selected, Some(0));

		frame(&mut mode, &mut scene, 0.048);
		let selected_lines = scene
			.lines()
			.iter()
			.filter(|l| (l.alpha - SELECTED_LINE_ALPHA).abs() < 1e-9)
			.count();
		let cluster_lines = scene
			.lines()
			.iter()
			.filter(|l| (l.alpha - CLUSTER_LINE_ALPHA).abs() < 1e-9)
			.count();
		assert_eq!(selected_lines, 3 - 1);
		assert_eq!(cluster_lines, 3 * 2);
	}

	#[test]
	fn hover_exit_restores_other_topics() {
		let records = records(3, 1);
		let mut scene = scene_for(&records);
		let mut mode = ready_mode(&scene, records, 1200.0);
		mode.show(&mut scene, 0.0);

		// Topic 0 center on the large spread: 600 - 400 = 200.
		scene.set_mouse_position(Point::new(200.0, 400.0));
		frame(&mut mode, &mut scene, 0.016);
		assert_eq!(mode.selected, Some(0));
		for topic in mode.registry.iter().filter(|t| t.index() != 0) {
			assert_eq!(topic.emphasis(), Emphasis::TonedDown);
		}

		scene.set_mouse_position(Point::new(-10_000.0, -10_000.0));
		frame(&mut mode, &mut scene, 0.032);
		assert_eq!(mode.selected, None);
		for topic in mode.registry.iter() {
			assert_eq!(topic.emphasis(), Emphasis::Normal);
		}
	}

	#[test]
	fn listener_symmetry_across_show_hide() {
		let records = records(2, 1);
		let mut scene = scene_for(&records);
		let mut mode = ready_mode(&scene, records, 1200.0);

		mode.show(&mut scene, 0.0);
		assert_eq!(scene.render_start.listener_count(), 1);
		assert_eq!(scene.swipe_left.listener_count(), 1);
		assert_eq!(scene.swipe_right.listener_count(), 1);
		for topic in mode.registry.iter() {
			assert_eq!(topic.mouse_over.listener_count(), 1);
			assert_eq!(topic.mouse_out.listener_count(), 1);
		}

		mode.hide(&mut scene, 0.1);
		assert_eq!(scene.render_start.listener_count(), 0);
		assert_eq!(scene.swipe_left.listener_count(), 0);
		assert_eq!(scene.swipe_right.listener_count(), 0);
		for topic in mode.registry.iter() {
			assert_eq!(topic.mouse_over.listener_count(), 0);
			assert_eq!(topic.mouse_out.listener_count(), 0);
		}
	}

	#[test]
	fn immediate_teardown_leaves_no_listeners() {
		let records = records(2, 1);
		let mut scene = scene_for(&records);
		let mut mode = ready_mode(&scene, records, 1200.0);

		mode.show(&mut scene, 0.0);
		mode.teardown(&mut scene, 0.0);
		assert_eq!(scene.render_start.listener_count(), 0);
		assert_eq!(scene.swipe_left.listener_count(), 0);
		assert_eq!(scene.swipe_right.listener_count(), 0);
		assert!(mode.registry.is_empty());
		assert_eq!(mode.lifecycle(), Lifecycle::TornDown);
	}

	#[test]
	fn shown_when_every_show_animation_finishes() {
		let records = records(2, 1);
		let mut scene = scene_for(&records);
		let mut mode = ready_mode(&scene, records, 1200.0);

		mode.show(&mut scene, 0.0);
		assert_eq!(mode.lifecycle(), Lifecycle::Showing);

		frame(&mut mode, &mut scene, 0.1);
		assert_eq!(mode.lifecycle(), Lifecycle::Showing);

		frame(&mut mode, &mut scene, 0.6);
		assert_eq!(mode.lifecycle(), Lifecycle::Shown);
	}

	#[test]
	fn hidden_is_declared_on_the_next_tick() {
		let records = records(2, 1);
		let mut scene = scene_for(&records);
		let mut mode = ready_mode(&scene, records, 1200.0);

		mode.show(&mut scene, 0.0);
		frame(&mut mode, &mut scene, 0.6);
		mode.hide(&mut scene, 0.7);
		assert_eq!(mode.lifecycle(), Lifecycle::Hiding);
		assert!(!scene.container_attached());

		mode.tick(&mut scene, 0.716, 0.016);
		assert_eq!(mode.lifecycle(), Lifecycle::Hidden);
	}

	#[test]
	fn set_data_after_init_is_ignored() {
		let initial = records(2, 1);
		let scene = scene_for(&initial);
		let mut mode = ready_mode(&scene, initial, 1200.0);

		mode.set_data(records(5, 1));
		mode.init(&scene, 1200.0);
		assert_eq!(mode.registry.len(), 2);
	}

	#[test]
	fn show_before_init_is_rejected() {
		let mut scene = Scene::new(1200.0, 800.0);
		let mut mode = TopicsMode::new();
		mode.show(&mut scene, 0.0);
		assert_eq!(mode.lifecycle(), Lifecycle::Uninitialized);
		assert_eq!(scene.render_start.listener_count(), 0);
	}
}
