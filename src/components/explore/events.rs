//! Single-threaded event streams with explicit listener handles.
//!
//! The canvas exposes its render-start and swipe events as streams, and each
//! topic exposes its hover notifications the same way. Listeners are added
//! and removed by handle so that a mode can unsubscribe exactly what it
//! subscribed when it hides.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle returned by [`EventStream::add`], used to remove the listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

struct StreamInner<T> {
	next_id: usize,
	listeners: Vec<(ListenerId, Rc<dyn Fn(&T)>)>,
}

/// A cloneable handle to a listener registry.
///
/// Clones share the same registry. Not `Send`; the whole crate runs on the
/// UI event loop.
pub struct EventStream<T> {
	inner: Rc<RefCell<StreamInner<T>>>,
}

impl<T> Clone for EventStream<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T> Default for EventStream<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> EventStream<T> {
	/// Create an empty stream.
	pub fn new() -> Self {
		Self {
			inner: Rc::new(RefCell::new(StreamInner {
				next_id: 0,
				listeners: Vec::new(),
			})),
		}
	}

	/// Register a listener; returns the handle needed to remove it.
	pub fn add(&self, listener: impl Fn(&T) + 'static) -> ListenerId {
		let mut inner = self.inner.borrow_mut();
		let id = ListenerId(inner.next_id);
		inner.next_id += 1;
		inner.listeners.push((id, Rc::new(listener)));
		id
	}

	/// Remove a previously registered listener. Returns false if the handle
	/// was already removed.
	pub fn remove(&self, id: ListenerId) -> bool {
		let mut inner = self.inner.borrow_mut();
		let before = inner.listeners.len();
		inner.listeners.retain(|(lid, _)| *lid != id);
		inner.listeners.len() != before
	}

	/// Emit an event to every current listener.
	///
	/// The listener list is snapshotted first, so listeners may add or
	/// remove listeners on this stream while the event is delivered.
	pub fn emit(&self, event: &T) {
		let snapshot: Vec<Rc<dyn Fn(&T)>> = self
			.inner
			.borrow()
			.listeners
			.iter()
			.map(|(_, f)| Rc::clone(f))
			.collect();
		for listener in snapshot {
			listener(event);
		}
	}

	/// Number of currently registered listeners.
	pub fn listener_count(&self) -> usize {
		self.inner.borrow().listeners.len()
	}
}
