//! Explore canvas: clustered topic visualization.
//!
//! Renders topic clusters on an HTML canvas with:
//! - Per-breakpoint layout (spread, grid, or paged) chosen from the viewport
//! - Connector lines tracing issues within each cluster, redrawn per frame
//! - Hover highlighting that tones down every other cluster
//! - Horizontal swipe paging between topics on small viewports
//!
//! # Example
//!
//! ```ignore
//! use explore_canvas::{ExploreCanvas, ExploreData};
//!
//! let data: ExploreData = serde_json::from_str(model_json)?;
//!
//! view! { <ExploreCanvas data=data.into() fullscreen=true /> }
//! ```

mod component;
mod engine;
mod error;
mod events;
mod mode;
mod render;
pub mod responsive;
mod scene;
pub mod theme;
mod topic;
mod topics_mode;
mod tween;
mod types;

pub use component::ExploreCanvas;
pub use engine::{Explore, View};
pub use error::ExploreError;
pub use theme::Theme;
pub use types::{ExploreData, IssueRecord, TopicRecord};
