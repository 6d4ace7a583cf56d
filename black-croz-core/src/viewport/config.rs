use serde::{Deserialize, Serialize};

use super::error::{Result, TrackerError};
use super::model::Band;
use crate::sections::DEFAULT_ACTIVE_SECTION;

/// Visible fraction at which a region counts as revealed.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.15;

/// Margins applied to the viewport before intersection is computed, in
/// percent of the viewport size. Negative values shrink the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Collapses the viewport vertically onto its center line.
    pub const CENTER_LINE: RootMargin = RootMargin {
        top: -50.0,
        right: 0.0,
        bottom: -50.0,
        left: 0.0,
    };

    fn values(&self) -> [f64; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Options handed to the observation source when an observer connects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    /// Visible fraction at which the source reports a change.
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::ZERO,
            threshold: 0.0,
        }
    }
}

impl ObserverOptions {
    /// A region intersects only while it crosses the viewport's center line.
    pub fn center_line() -> Self {
        Self {
            root_margin: RootMargin::CENTER_LINE,
            threshold: 0.0,
        }
    }

    /// Full viewport, reporting once `threshold` of a region is visible.
    pub fn threshold(threshold: f64) -> Self {
        Self {
            root_margin: RootMargin::ZERO,
            threshold,
        }
    }

    fn validate(&self, band: Band) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(TrackerError::invalid(format!(
                "{band} threshold must be within 0.0..=1.0, got {}",
                self.threshold
            )));
        }
        if self
            .root_margin
            .values()
            .iter()
            .any(|m| !m.is_finite() || !(-100.0..=100.0).contains(m))
        {
            return Err(TrackerError::invalid(format!(
                "{band} root margin must be within -100%..=100%"
            )));
        }
        Ok(())
    }
}

/// Configuration of a [`ViewportTracker`](super::ViewportTracker).
///
/// Missing fields fall back to the defaults when deserialized, so the
/// tracker config can be embedded in a larger config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Active region before any event has been observed.
    pub default_active_id: String,
    /// Policy for the active-region band.
    pub active: ObserverOptions,
    /// Policy for the reveal band.
    pub reveal: ObserverOptions,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_active_id: DEFAULT_ACTIVE_SECTION.to_string(),
            active: ObserverOptions::center_line(),
            reveal: ObserverOptions::threshold(DEFAULT_REVEAL_THRESHOLD),
        }
    }
}

impl TrackerConfig {
    pub fn with_default_active(mut self, id: impl Into<String>) -> Self {
        self.default_active_id = id.into();
        self
    }

    pub fn with_reveal_threshold(mut self, threshold: f64) -> Self {
        self.reveal.threshold = threshold;
        self
    }

    pub fn options(&self, band: Band) -> &ObserverOptions {
        match band {
            Band::Active => &self.active,
            Band::Reveal => &self.reveal,
        }
    }

    pub fn reveal_threshold(&self) -> f64 {
        self.reveal.threshold
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_active_id.trim().is_empty() {
            return Err(TrackerError::invalid("default active id must not be empty"));
        }
        self.active.validate(Band::Active)?;
        self.reveal.validate(Band::Reveal)
    }
}
