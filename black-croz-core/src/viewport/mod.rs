//! Viewport activity tracking.
//!
//! This module follows a set of named regions (page sections) inside a
//! scrollable document and maintains two pieces of state for the rendering
//! layer:
//!
//! - **Active region**: the single region currently crossing the viewport's
//!   center line. Used to highlight the matching navigation entry.
//! - **Revealed regions**: regions that have been sufficiently visible at
//!   least once. A reveal is permanent for the lifetime of the tracker.
//!
//! # Structure
//!
//! - [`RegionRegistry`] turns an ordered id list into resolved regions through
//!   an injected [`AnchorResolver`].
//! - [`IntersectionEvaluator`] is the pure state machine applying visibility
//!   batches to an [`ActivityState`].
//! - [`ActivityStore`] publishes snapshots and notifies subscribers.
//! - [`ViewportTracker`] owns the lifecycle: it connects two observers on an
//!   [`ObservationSource`] (one per [`Band`]), routes batches into the
//!   evaluator and disconnects everything on teardown.
//!
//! Everything here is single-threaded and callback driven; no locks are
//! involved.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use black_croz_core::viewport::{
//!     Band, ManualSource, TrackerConfig, ViewportTracker, VisibilityEvent,
//! };
//!
//! let anchors: HashMap<String, u32> =
//!     [("home".to_string(), 0), ("about".to_string(), 1)].into();
//!
//! let mut tracker = ViewportTracker::mount(
//!     ["home", "about"],
//!     &anchors,
//!     ManualSource::new(),
//!     TrackerConfig::default(),
//! )
//! .unwrap();
//!
//! let active = tracker.observer(Band::Active);
//! tracker.deliver(active, &[VisibilityEvent::entering("about", 0.4)]);
//! assert_eq!(tracker.snapshot().active_id, "about");
//! ```

mod config;
mod error;
mod evaluator;
mod model;
mod registry;
mod source;
mod store;
mod tracker;

pub use config::{ObserverOptions, RootMargin, TrackerConfig, DEFAULT_REVEAL_THRESHOLD};
pub use error::{Result, TrackerError};
pub use evaluator::{IntersectionEvaluator, Transition};
pub use model::{ActivityState, Band, ObserverId, Region, RegionId, VisibilityEvent};
pub use registry::{AnchorResolver, RegionRegistry};
pub use source::{ManualSource, ObservationSource};
pub use store::{ActivityStore, Subscription};
pub use tracker::ViewportTracker;
