//! Canvas scene abstraction: coordinate space, items, lines, and events.
//!
//! The scene owns every drawable item (issue dots and the shared filler
//! pool), the per-frame connector-line buffer, the current pointer position,
//! and the event streams modes subscribe to. Modes and topics hold item
//! handles, never items; the renderer reads the scene each frame and
//! translates it to 2D context calls.

use std::collections::HashMap;

use super::events::EventStream;
use super::theme::Color;

/// A point in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Round both coordinates to the nearest integer pixel.
	pub fn round(self) -> Self {
		Self {
			x: self.x.round(),
			y: self.y.round(),
		}
	}

	pub fn distance_to(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

impl std::ops::Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl std::ops::Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl std::ops::Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

/// What an item represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
	/// A real data item, looked up by identifier.
	Issue,
	/// A decorative filler dot from the shared pool.
	Fake,
}

/// Stable handle to an item in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemHandle(usize);

/// One drawable dot. World position and alpha are rewritten every frame by
/// the topic that currently owns the item.
#[derive(Clone, Debug)]
pub struct SceneItem {
	pub kind: ItemKind,
	pub position: Point,
	pub alpha: f64,
}

/// A connector line queued for the current frame.
#[derive(Clone, Debug)]
pub struct Line {
	pub from: Point,
	pub to: Point,
	pub color: Color,
	pub alpha: f64,
}

/// A text label queued for the current frame.
#[derive(Clone, Debug)]
pub struct Label {
	pub text: String,
	pub position: Point,
	pub alpha: f64,
}

/// The scene graph consumed by modes and the renderer.
pub struct Scene {
	canvas_size: Point,
	items: Vec<SceneItem>,
	index_by_id: HashMap<String, ItemHandle>,
	fakes: Vec<ItemHandle>,
	lines: Vec<Line>,
	labels: Vec<Label>,
	mouse_position: Point,
	container_attached: bool,
	/// Fires at the start of every render frame while the loop runs.
	pub render_start: EventStream<()>,
	/// Fires when a leftward swipe gesture is recognized.
	pub swipe_left: EventStream<()>,
	/// Fires when a rightward swipe gesture is recognized.
	pub swipe_right: EventStream<()>,
}

impl Scene {
	/// Create an empty scene for a canvas of the given pixel size.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			canvas_size: Point::new(width, height),
			items: Vec::new(),
			index_by_id: HashMap::new(),
			fakes: Vec::new(),
			lines: Vec::new(),
			labels: Vec::new(),
			// Off-canvas until the first pointer event arrives.
			mouse_position: Point::new(f64::MIN, f64::MIN),
			container_attached: false,
			render_start: EventStream::new(),
			swipe_left: EventStream::new(),
			swipe_right: EventStream::new(),
		}
	}

	/// Canvas pixel dimensions.
	pub fn canvas_size(&self) -> Point {
		self.canvas_size
	}

	/// The centered origin that topic positions are relative to.
	pub fn container_offset(&self) -> Point {
		Point::new(self.canvas_size.x / 2.0, self.canvas_size.y / 2.0).round()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.canvas_size = Point::new(width, height);
	}

	/// Add an issue item. Returns the existing handle if the id is already
	/// present (issues may be shared between topics).
	pub fn add_issue_item(&mut self, id: &str) -> ItemHandle {
		if let Some(&handle) = self.index_by_id.get(id) {
			return handle;
		}
		let handle = ItemHandle(self.items.len());
		self.items.push(SceneItem {
			kind: ItemKind::Issue,
			position: Point::default(),
			alpha: 0.0,
		});
		self.index_by_id.insert(id.to_string(), handle);
		handle
	}

	/// Add one filler item to the shared pool.
	pub fn add_fake_item(&mut self) -> ItemHandle {
		let handle = ItemHandle(self.items.len());
		self.items.push(SceneItem {
			kind: ItemKind::Fake,
			position: Point::default(),
			alpha: 0.0,
		});
		self.fakes.push(handle);
		handle
	}

	/// Look an issue item up by identifier.
	pub fn item_by_id(&self, id: &str) -> Option<ItemHandle> {
		self.index_by_id.get(id).copied()
	}

	/// The shared filler pool.
	pub fn fakes(&self) -> &[ItemHandle] {
		&self.fakes
	}

	pub fn item(&self, handle: ItemHandle) -> &SceneItem {
		&self.items[handle.0]
	}

	pub fn item_mut(&mut self, handle: ItemHandle) -> &mut SceneItem {
		&mut self.items[handle.0]
	}

	/// All items, for rendering.
	pub fn items(&self) -> impl Iterator<Item = &SceneItem> {
		self.items.iter()
	}

	pub fn item_count(&self) -> usize {
		self.items.len()
	}

	/// Drop all lines queued for this frame.
	pub fn clear_lines(&mut self) {
		self.lines.clear();
	}

	/// Queue a line between two items for this frame.
	pub fn draw_line(&mut self, a: ItemHandle, b: ItemHandle, color: Color, alpha: f64) {
		let from = self.item(a).position;
		let to = self.item(b).position;
		self.lines.push(Line {
			from,
			to,
			color,
			alpha,
		});
	}

	pub fn lines(&self) -> &[Line] {
		&self.lines
	}

	pub fn clear_labels(&mut self) {
		self.labels.clear();
	}

	/// Queue a text label for this frame.
	pub fn draw_label(&mut self, text: &str, position: Point, alpha: f64) {
		self.labels.push(Label {
			text: text.to_string(),
			position,
			alpha,
		});
	}

	pub fn labels(&self) -> &[Label] {
		&self.labels
	}

	pub fn set_mouse_position(&mut self, position: Point) {
		self.mouse_position = position;
	}

	pub fn mouse_position(&self) -> Point {
		self.mouse_position
	}

	/// Attach the active mode's container; the renderer draws items only
	/// while attached.
	pub fn attach_container(&mut self) {
		self.container_attached = true;
	}

	pub fn detach_container(&mut self) {
		self.container_attached = false;
	}

	pub fn container_attached(&self) -> bool {
		self.container_attached
	}
}
