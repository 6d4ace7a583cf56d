//! Intersection evaluation state machine.
//!
//! The evaluator applies one batch of [`VisibilityEvent`]s to an
//! [`ActivityState`]. It has no knowledge of observers, stores or anchors,
//! which keeps the transition rules testable in isolation:
//!
//! - **Active band**: an intersecting event makes its region active. Events
//!   are applied in delivery order, so the last intersecting region of a
//!   batch wins. Ratios are not compared. Non-intersecting events leave the
//!   active region where it is.
//! - **Reveal band**: an intersecting event whose ratio reaches the reveal
//!   threshold reveals its region. Reveals are never undone; revealing a
//!   region twice is a no-op.
//!
//! Events for regions outside the eligible set are discarded.

use std::collections::HashSet;

use super::config::TrackerConfig;
use super::model::{ActivityState, Band, RegionId, VisibilityEvent};

/// Effect of one applied batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// The active region differs from the one before the batch.
    pub active_changed: bool,
    /// Regions revealed by this batch, in event order.
    pub newly_revealed: Vec<RegionId>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        !self.active_changed && self.newly_revealed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct IntersectionEvaluator {
    reveal_threshold: f64,
    eligible: HashSet<RegionId>,
}

impl IntersectionEvaluator {
    pub fn new<I, S>(config: &TrackerConfig, eligible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RegionId>,
    {
        Self {
            reveal_threshold: config.reveal_threshold(),
            eligible: eligible.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_eligible(&self, id: &str) -> bool {
        self.eligible.contains(id)
    }

    pub fn apply(&self, band: Band, events: &[VisibilityEvent], state: &mut ActivityState) -> Transition {
        match band {
            Band::Active => self.apply_active(events, state),
            Band::Reveal => self.apply_reveal(events, state),
        }
    }

    fn apply_active(&self, events: &[VisibilityEvent], state: &mut ActivityState) -> Transition {
        let before = state.active_id.clone();

        for event in events.iter().filter(|e| e.is_intersecting) {
            if !self.is_eligible(&event.region_id) {
                tracing::trace!(region = %event.region_id, "Ignoring event for unregistered region");
                continue;
            }
            if state.active_id != event.region_id {
                state.active_id.clone_from(&event.region_id);
            }
        }

        Transition {
            active_changed: state.active_id != before,
            newly_revealed: Vec::new(),
        }
    }

    fn apply_reveal(&self, events: &[VisibilityEvent], state: &mut ActivityState) -> Transition {
        let mut newly_revealed = Vec::new();

        for event in events {
            // NaN never reaches the threshold
            let reaches = event.intersection_ratio >= self.reveal_threshold;
            if !event.is_intersecting || !reaches {
                continue;
            }
            if !self.is_eligible(&event.region_id) {
                tracing::trace!(region = %event.region_id, "Ignoring event for unregistered region");
                continue;
            }
            if state.revealed_ids.insert(event.region_id.clone()) {
                newly_revealed.push(event.region_id.clone());
            }
        }

        Transition {
            active_changed: false,
            newly_revealed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator(ids: &[&str]) -> IntersectionEvaluator {
        IntersectionEvaluator::new(&TrackerConfig::default(), ids.iter().copied())
    }

    #[test]
    fn last_intersecting_event_wins() {
        let eval = evaluator(&["home", "about", "contact"]);
        let mut state = ActivityState::new("home");

        let t = eval.apply(
            Band::Active,
            &[
                VisibilityEvent::entering("about", 0.5),
                VisibilityEvent::entering("contact", 0.3),
            ],
            &mut state,
        );

        assert_eq!(state.active_id, "contact");
        assert!(t.active_changed);
    }

    #[test]
    fn active_region_is_sticky() {
        let eval = evaluator(&["home", "about"]);
        let mut state = ActivityState::new("home");
        eval.apply(Band::Active, &[VisibilityEvent::entering("about", 0.1)], &mut state);

        let t = eval.apply(Band::Active, &[VisibilityEvent::leaving("about")], &mut state);

        assert_eq!(state.active_id, "about");
        assert!(t.is_empty());
    }

    #[test]
    fn returning_to_the_same_region_is_not_a_change() {
        let eval = evaluator(&["home", "about"]);
        let mut state = ActivityState::new("home");

        let t = eval.apply(
            Band::Active,
            &[
                VisibilityEvent::entering("about", 0.2),
                VisibilityEvent::entering("home", 0.2),
            ],
            &mut state,
        );

        assert_eq!(state.active_id, "home");
        assert!(!t.active_changed);
    }

    #[test]
    fn reveal_requires_threshold() {
        let eval = evaluator(&["about"]);
        let mut state = ActivityState::new("home");

        let below = eval.apply(Band::Reveal, &[VisibilityEvent::entering("about", 0.1)], &mut state);
        assert!(below.is_empty());

        let at = eval.apply(Band::Reveal, &[VisibilityEvent::entering("about", 0.15)], &mut state);
        assert_eq!(at.newly_revealed, vec!["about".to_string()]);
        assert!(state.is_revealed("about"));
    }

    #[test]
    fn nan_ratio_never_reveals() {
        let eval = evaluator(&["about"]);
        let mut state = ActivityState::new("home");

        let t = eval.apply(Band::Reveal, &[VisibilityEvent::entering("about", f64::NAN)], &mut state);

        assert!(t.is_empty());
        assert!(!state.is_revealed("about"));
    }

    #[test]
    fn reveal_is_idempotent() {
        let eval = evaluator(&["about"]);
        let mut state = ActivityState::new("home");
        eval.apply(Band::Reveal, &[VisibilityEvent::entering("about", 0.9)], &mut state);

        let again = eval.apply(Band::Reveal, &[VisibilityEvent::entering("about", 1.0)], &mut state);

        assert!(again.is_empty());
        assert_eq!(state.revealed_ids.len(), 1);
    }

    #[test]
    fn bands_do_not_cross() {
        let eval = evaluator(&["home", "about"]);
        let mut state = ActivityState::new("home");

        eval.apply(Band::Reveal, &[VisibilityEvent::entering("about", 1.0)], &mut state);
        assert_eq!(state.active_id, "home");

        eval.apply(Band::Active, &[VisibilityEvent::entering("about", 1.0)], &mut state);
        assert_eq!(state.revealed_ids.len(), 1);
    }

    #[test]
    fn unknown_regions_are_ignored() {
        let eval = evaluator(&["home"]);
        let mut state = ActivityState::new("home");

        let t = eval.apply(Band::Active, &[VisibilityEvent::entering("lookbook", 1.0)], &mut state);
        let r = eval.apply(Band::Reveal, &[VisibilityEvent::entering("lookbook", 1.0)], &mut state);

        assert!(t.is_empty());
        assert!(r.is_empty());
        assert_eq!(state, ActivityState::new("home"));
    }
}
