use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a trackable region, e.g. `"lookbook"`.
pub type RegionId = String;

/// A registered region together with its layout anchor.
///
/// The anchor is opaque to the tracker; it is whatever the observation
/// source needs to watch the region (a DOM node handle, a layout box, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Region<A> {
    pub id: RegionId,
    pub anchor: A,
}

/// One visibility change reported by the observation source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityEvent {
    pub region_id: RegionId,
    pub is_intersecting: bool,
    /// Visible fraction of the region, `0.0..=1.0`.
    pub intersection_ratio: f64,
}

impl VisibilityEvent {
    pub fn new(region_id: impl Into<RegionId>, is_intersecting: bool, intersection_ratio: f64) -> Self {
        Self {
            region_id: region_id.into(),
            is_intersecting,
            intersection_ratio,
        }
    }

    /// An event for a region that started intersecting.
    pub fn entering(region_id: impl Into<RegionId>, intersection_ratio: f64) -> Self {
        Self::new(region_id, true, intersection_ratio)
    }

    /// An event for a region that stopped intersecting.
    pub fn leaving(region_id: impl Into<RegionId>) -> Self {
        Self::new(region_id, false, 0.0)
    }
}

/// Tracker state shared with the rendering layer.
///
/// `revealed_ids` only ever grows while a tracker is alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityState {
    pub active_id: RegionId,
    pub revealed_ids: BTreeSet<RegionId>,
}

impl ActivityState {
    /// Initial state: `active_id` set to the default, nothing revealed.
    pub fn new(default_active_id: impl Into<RegionId>) -> Self {
        Self {
            active_id: default_active_id.into(),
            revealed_ids: BTreeSet::new(),
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_id == id
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed_ids.contains(id)
    }
}

/// The two independent observation policies.
///
/// Both consume the same kind of visibility signal but are configured and
/// evaluated separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Center-line band driving active-region selection.
    Active,
    /// Threshold band driving one-time reveals.
    Reveal,
}

impl Band {
    pub const ALL: [Band; 2] = [Band::Active, Band::Reveal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Reveal => "reveal",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one connected observer.
///
/// Every mount of a tracker uses a fresh generation, so batches produced by
/// observers from an earlier mount can be told apart and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId {
    pub band: Band,
    pub generation: u64,
}

impl ObserverId {
    pub fn new(band: Band, generation: u64) -> Self {
        Self { band, generation }
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.band, self.generation)
    }
}
