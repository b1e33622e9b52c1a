//! Mode lifecycle contract.
//!
//! A mode is one way of presenting the data set on the canvas. Only one
//! mode is shown at a time; the engine drives the active mode's frame tick
//! and orchestrates show/hide transitions between modes.

use super::scene::Scene;

/// Lifecycle states of a mode.
///
/// `Showing` and `Hiding` are the windows in which the enter/exit animation
/// runs; the mode reports `Shown`/`Hidden` when the animation subsystem
/// says the transition finished, not after a fixed delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
	Uninitialized,
	Initialized,
	Showing,
	Shown,
	Hiding,
	Hidden,
	TornDown,
}

impl Lifecycle {
	/// Whether the mode currently owns the canvas (subscriptions live,
	/// per-frame work running).
	pub fn is_active(self) -> bool {
		matches!(self, Lifecycle::Showing | Lifecycle::Shown)
	}
}

/// Lifecycle operations every concrete mode implements.
///
/// The closed set of modes is {topics, explore, issues}; only the topics
/// mode is implemented, so the engine dispatches statically rather than
/// through trait objects. The contract still lives here so every mode
/// exposes the same surface.
pub trait Mode {
	/// Current lifecycle state.
	fn lifecycle(&self) -> Lifecycle;

	/// Begin the show transition. Tolerates being called while already
	/// showing or shown.
	fn show(&mut self, scene: &mut Scene, clock: f64);

	/// Begin the hide transition. Tolerates being called while already
	/// hiding or hidden.
	fn hide(&mut self, scene: &mut Scene, clock: f64);

	/// Per-frame work: process queued events, advance transitions.
	fn tick(&mut self, scene: &mut Scene, clock: f64, dt: f64);

	/// Release everything; the mode cannot be shown again afterwards.
	fn teardown(&mut self, scene: &mut Scene, clock: f64);
}
