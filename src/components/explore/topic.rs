//! Topic clusters and the registry that owns them.
//!
//! A topic wraps one cluster's visual state: its issue and filler item
//! handles, local item layout, position/fade tweens, and emphasis. Topics
//! write item world positions and alphas into the scene every frame and
//! emit hover notifications observed by the owning mode.

use std::f64::consts::{PI, TAU};

use super::events::EventStream;
use super::scene::{ItemHandle, Point, Scene};
use super::tween::Tween;
use super::types::TopicRecord;

/// Pointer distance (px) from the cluster center that counts as hovering.
pub const TOPIC_RADIUS: f64 = 130.0;
/// Radius (px) of the ring issues are laid out on.
const ISSUE_RING_RADIUS: f64 = 70.0;
/// Filler scatter band (px) around the cluster center.
const FAKE_SCATTER_MIN: f64 = 30.0;
const FAKE_SCATTER_MAX: f64 = 120.0;

/// Show fade duration (seconds); the mode reports shown when every topic's
/// fade has finished.
pub const SHOW_DURATION: f64 = 0.5;
/// Hide fade duration (seconds).
pub const HIDE_DURATION: f64 = 0.25;
/// Paging move duration (seconds).
const MOVE_DURATION: f64 = 0.4;
/// Emphasis fade duration (seconds).
const TONE_DURATION: f64 = 0.2;

/// Item opacity while a sibling topic is highlighted.
const TONED_DOWN_ALPHA: f64 = 0.15;
/// Filler dots render dimmer than issues.
const FAKE_BASE_ALPHA: f64 = 0.6;

/// Sinusoidal drift applied to filler dots.
const DRIFT_AMPLITUDE: f64 = 2.0;
const DRIFT_SPEED: f64 = 1.2;

/// Fraction of the pointer offset the hovered cluster leans towards.
const POINTER_FOLLOW: f64 = 0.04;
/// Exponential smoothing speed for the pointer lean.
const POINTER_FOLLOW_SPEED: f64 = 6.0;

/// Deterministic pseudo-random in `[0, 1)` from a seed.
pub(super) fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

/// Visual emphasis of a topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	Normal,
	/// The pointer is over this topic.
	Highlighted,
	/// A sibling topic is highlighted; this one is de-emphasized.
	TonedDown,
}

/// One topic cluster.
pub struct Topic {
	index: usize,
	name: Option<String>,
	issues: Vec<ItemHandle>,
	fakes: Vec<ItemHandle>,
	position: Tween<Point>,
	show_alpha: Tween<f64>,
	emphasis_alpha: Tween<f64>,
	emphasis: Emphasis,
	issue_offsets: Vec<Point>,
	fake_offsets: Vec<Point>,
	fake_phases: Vec<f64>,
	pointer_shift: Point,
	hovered: bool,
	visible: bool,
	set_up: bool,
	/// Emits this topic's index when the pointer enters the cluster.
	pub mouse_over: EventStream<usize>,
	/// Emits this topic's index when the pointer leaves the cluster.
	pub mouse_out: EventStream<usize>,
}

impl Topic {
	/// Construct a topic from its source record and resolved item handles.
	pub fn new(
		record: &TopicRecord,
		index: usize,
		issues: Vec<ItemHandle>,
		fakes: Vec<ItemHandle>,
	) -> Self {
		Self {
			index,
			name: record.name.clone(),
			issues,
			fakes,
			position: Tween::settled(Point::default()),
			show_alpha: Tween::settled(0.0),
			emphasis_alpha: Tween::settled(1.0),
			emphasis: Emphasis::Normal,
			issue_offsets: Vec::new(),
			fake_offsets: Vec::new(),
			fake_phases: Vec::new(),
			pointer_shift: Point::default(),
			hovered: false,
			visible: false,
			set_up: false,
			mouse_over: EventStream::new(),
			mouse_out: EventStream::new(),
		}
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn issues(&self) -> &[ItemHandle] {
		&self.issues
	}

	pub fn fakes(&self) -> &[ItemHandle] {
		&self.fakes
	}

	pub fn emphasis(&self) -> Emphasis {
		self.emphasis
	}

	/// Place the cluster without animation, pixel-aligned.
	pub fn place(&mut self, position: Point) {
		self.position.snap_to(position.round());
	}

	/// The position the cluster is resting at or heading for.
	pub fn target_position(&self) -> Point {
		self.position.target()
	}

	/// Lay out issues on an inner ring and fillers on a scattered band.
	/// Safe to call more than once; layout is computed a single time.
	pub fn setup(&mut self) {
		if self.set_up {
			return;
		}
		self.set_up = true;

		let count = self.issues.len();
		self.issue_offsets = (0..count)
			.map(|j| {
				if count <= 1 {
					return Point::default();
				}
				let angle = j as f64 * TAU / count as f64 - PI / 2.0;
				Point::new(
					angle.cos() * ISSUE_RING_RADIUS,
					angle.sin() * ISSUE_RING_RADIUS,
				)
			})
			.collect();

		let base = self.index as f64 * 31.7;
		self.fake_offsets = (0..self.fakes.len())
			.map(|j| {
				let seed = base + j as f64;
				let angle = pseudo_random(seed * 1.1) * TAU;
				let radius = FAKE_SCATTER_MIN
					+ pseudo_random(seed * 2.3) * (FAKE_SCATTER_MAX - FAKE_SCATTER_MIN);
				Point::new(angle.cos() * radius, angle.sin() * radius)
			})
			.collect();
		self.fake_phases = (0..self.fakes.len())
			.map(|j| pseudo_random(base + j as f64 * 7.9) * TAU)
			.collect();
	}

	/// Begin the show fade. No-op when already shown or showing.
	pub fn show(&mut self, clock: f64) {
		if self.visible && (self.show_alpha.target() - 1.0).abs() < f64::EPSILON {
			return;
		}
		self.visible = true;
		self.show_alpha.retarget(1.0, clock, SHOW_DURATION);
	}

	/// Begin the hide fade. No-op when already hidden or hiding.
	pub fn hide(&mut self, clock: f64) {
		if !self.visible && self.show_alpha.target().abs() < f64::EPSILON {
			return;
		}
		self.visible = false;
		self.hovered = false;
		self.show_alpha.retarget(0.0, clock, HIDE_DURATION);
	}

	/// Whether the show fade has completed.
	pub fn show_finished(&self, clock: f64) -> bool {
		self.visible && self.show_alpha.finished_at(clock)
	}

	/// Animate the cluster to a new position. An in-flight move is
	/// replaced, not queued.
	pub fn move_to(&mut self, position: Point, clock: f64) {
		self.position.retarget(position.round(), clock, MOVE_DURATION);
	}

	/// De-emphasize every item in the topic.
	pub fn tone_down(&mut self, clock: f64) {
		if self.emphasis == Emphasis::TonedDown {
			return;
		}
		self.emphasis = Emphasis::TonedDown;
		self.emphasis_alpha
			.retarget(TONED_DOWN_ALPHA, clock, TONE_DURATION);
	}

	/// Restore emphasis after [`Self::tone_down`].
	pub fn end_tone_down(&mut self, clock: f64) {
		if self.emphasis != Emphasis::TonedDown {
			return;
		}
		self.emphasis = Emphasis::Normal;
		self.emphasis_alpha.retarget(1.0, clock, TONE_DURATION);
	}

	/// Per-frame update: hit-test the pointer, lean towards it when
	/// hovered, drift the fillers, and write item state into the scene.
	pub fn update(&mut self, scene: &mut Scene, clock: f64, dt: f64) {
		let origin = scene.container_offset();
		let center = origin + self.position.value_at(clock);
		let pointer = scene.mouse_position();

		let inside = self.visible && pointer.distance_to(center) < TOPIC_RADIUS;
		if inside && !self.hovered {
			self.hovered = true;
			self.emphasis = Emphasis::Highlighted;
			self.mouse_over.emit(&self.index);
		} else if !inside && self.hovered {
			self.hovered = false;
			if self.emphasis == Emphasis::Highlighted {
				self.emphasis = Emphasis::Normal;
			}
			self.mouse_out.emit(&self.index);
		}

		let shift_target = if self.hovered {
			(pointer - center) * POINTER_FOLLOW
		} else {
			Point::default()
		};
		let blend = 1.0 - (-POINTER_FOLLOW_SPEED * dt).exp();
		self.pointer_shift = self.pointer_shift + (shift_target - self.pointer_shift) * blend;

		let alpha = self.show_alpha.value_at(clock) * self.emphasis_alpha.value_at(clock);
		let anchor = center + self.pointer_shift;

		for (j, &handle) in self.issues.iter().enumerate() {
			let item = scene.item_mut(handle);
			item.position = anchor + self.issue_offsets[j];
			item.alpha = alpha;
		}

		for (j, &handle) in self.fakes.iter().enumerate() {
			let phase = self.fake_phases[j];
			let drift = Point::new(
				(clock * DRIFT_SPEED + phase).sin() * DRIFT_AMPLITUDE,
				(clock * DRIFT_SPEED * 0.8 + phase * 1.3).cos() * DRIFT_AMPLITUDE,
			);
			let item = scene.item_mut(handle);
			item.position = anchor + self.fake_offsets[j] + drift;
			item.alpha = alpha * FAKE_BASE_ALPHA;
		}

		if let Some(name) = &self.name {
			scene.draw_label(name, anchor + Point::new(0.0, -TOPIC_RADIUS * 0.75), alpha);
		}
	}
}

/// All live topics, owned by the active mode.
///
/// Registered at construction time and cleared on teardown so hover
/// handling never sees topics from a previous mode.
#[derive(Default)]
pub struct TopicRegistry {
	topics: Vec<Topic>,
}

impl TopicRegistry {
	pub fn register(&mut self, topic: Topic) {
		self.topics.push(topic);
	}

	pub fn len(&self) -> usize {
		self.topics.len()
	}

	pub fn is_empty(&self) -> bool {
		self.topics.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&Topic> {
		self.topics.get(index)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Topic> {
		self.topics.iter()
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Topic> {
		self.topics.iter_mut()
	}

	/// Every live topic except the one at `excluded`.
	pub fn others_mut(&mut self, excluded: usize) -> impl Iterator<Item = &mut Topic> {
		self.topics
			.iter_mut()
			.filter(move |t| t.index != excluded)
	}

	pub fn clear(&mut self) {
		self.topics.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use std::rc::Rc;

	fn record(name: &str) -> TopicRecord {
		TopicRecord {
			id: name.to_lowercase(),
			name: Some(name.to_string()),
			issues: Vec::new(),
		}
	}

	fn scene_with_items(issues: usize, fakes: usize) -> (Scene, Vec<ItemHandle>, Vec<ItemHandle>) {
		let mut scene = Scene::new(1200.0, 800.0);
		let issue_handles = (0..issues)
			.map(|i| scene.add_issue_item(&format!("issue-{i}")))
			.collect();
		let fake_handles = (0..fakes).map(|_| scene.add_fake_item()).collect();
		(scene, issue_handles, fake_handles)
	}

	#[test]
	fn setup_is_idempotent() {
		let (_, issues, fakes) = scene_with_items(4, 3);
		let mut topic = Topic::new(&record("Privacy"), 0, issues, fakes);
		topic.setup();
		let first = topic.issue_offsets.clone();
		topic.setup();
		assert_eq!(topic.issue_offsets, first);
	}

	#[test]
	fn hover_emits_enter_then_exit_once() {
		let (mut scene, issues, fakes) = scene_with_items(2, 0);
		let mut topic = Topic::new(&record("Privacy"), 3, issues, fakes);
		topic.setup();
		topic.show(0.0);

		let events: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
		let enters = Rc::clone(&events);
		topic.mouse_over.add(move |_| enters.borrow_mut().push("over"));
		let exits = Rc::clone(&events);
		topic.mouse_out.add(move |_| exits.borrow_mut().push("out"));

		// Center of a 1200x800 canvas, topic at local origin.
		scene.set_mouse_position(Point::new(600.0, 400.0));
		topic.update(&mut scene, 0.016, 0.016);
		topic.update(&mut scene, 0.032, 0.016);
		assert_eq!(*events.borrow(), vec!["over"]);
		assert_eq!(topic.emphasis(), Emphasis::Highlighted);

		scene.set_mouse_position(Point::new(0.0, 0.0));
		topic.update(&mut scene, 0.048, 0.016);
		topic.update(&mut scene, 0.064, 0.016);
		assert_eq!(*events.borrow(), vec!["over", "out"]);
		assert_eq!(topic.emphasis(), Emphasis::Normal);
	}

	#[test]
	fn tone_down_pairing_restores_emphasis() {
		let (_, issues, fakes) = scene_with_items(1, 0);
		let mut topic = Topic::new(&record("Privacy"), 0, issues, fakes);

		topic.tone_down(0.0);
		topic.tone_down(0.1);
		assert_eq!(topic.emphasis(), Emphasis::TonedDown);

		topic.end_tone_down(0.2);
		topic.end_tone_down(0.3);
		assert_eq!(topic.emphasis(), Emphasis::Normal);
		assert_eq!(topic.emphasis_alpha.target(), 1.0);
	}

	#[test]
	fn move_to_replaces_in_flight_animation() {
		let (_, issues, fakes) = scene_with_items(0, 0);
		let mut topic = Topic::new(&record("Privacy"), 0, issues, fakes);

		topic.move_to(Point::new(1200.0, 0.0), 0.0);
		topic.move_to(Point::new(-2400.0, 0.0), 0.1);
		assert_eq!(topic.target_position(), Point::new(-2400.0, 0.0));
	}

	#[test]
	fn show_and_hide_tolerate_redundant_calls() {
		let (_, issues, fakes) = scene_with_items(0, 0);
		let mut topic = Topic::new(&record("Privacy"), 0, issues, fakes);

		topic.show(0.0);
		topic.show(0.1);
		assert!(!topic.show_finished(0.1));
		assert!(topic.show_finished(SHOW_DURATION));

		topic.hide(1.0);
		topic.hide(1.1);
		assert!(!topic.show_finished(2.0));
	}

	#[test]
	fn update_writes_item_positions_and_alpha() {
		let (mut scene, issues, fakes) = scene_with_items(3, 2);
		let handle = issues[0];
		let mut topic = Topic::new(&record("Privacy"), 0, issues, fakes);
		topic.setup();
		topic.place(Point::new(100.0, 0.0));
		topic.show(0.0);

		topic.update(&mut scene, SHOW_DURATION + 1.0, 0.016);
		let item = scene.item(handle);
		assert!((item.alpha - 1.0).abs() < 1e-9);
		// Issue ring sits around the placed center (600 + 100, 400).
		assert!(item.position.distance_to(Point::new(700.0, 400.0)) <= 71.0);
	}

	#[test]
	fn registry_others_excludes_selected() {
		let mut registry = TopicRegistry::default();
		for i in 0..3 {
			registry.register(Topic::new(&record("T"), i, Vec::new(), Vec::new()));
		}
		let others: Vec<usize> = registry.others_mut(1).map(|t| t.index()).collect();
		assert_eq!(others, vec![0, 2]);
	}
}
