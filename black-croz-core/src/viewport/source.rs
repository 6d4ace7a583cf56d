use std::collections::BTreeMap;
use std::convert::Infallible;

use super::config::ObserverOptions;
use super::model::{ObserverId, Region};

/// Platform primitive that watches regions and reports visibility changes.
///
/// The tracker connects one observer per [`Band`](super::Band) and tells the
/// source which regions each observer watches. The source reports changes by
/// handing batches to [`ViewportTracker::deliver`](super::ViewportTracker::deliver)
/// tagged with the observer they came from.
pub trait ObservationSource {
    type Anchor;
    type Error: std::error::Error + Send + Sync + 'static;

    fn connect(&mut self, observer: ObserverId, options: &ObserverOptions) -> Result<(), Self::Error>;

    fn observe(&mut self, observer: ObserverId, region: &Region<Self::Anchor>) -> Result<(), Self::Error>;

    /// Stops watching one region. Unknown regions are ignored.
    fn unobserve(&mut self, observer: ObserverId, region_id: &str);

    /// Stops watching everything for `observer` and forgets it.
    fn disconnect(&mut self, observer: ObserverId);
}

#[derive(Debug, Clone)]
struct Observed<A> {
    options: ObserverOptions,
    regions: Vec<Region<A>>,
}

/// In-memory observation source.
///
/// Records connected observers and the regions they watch, and leaves the
/// actual visibility computation to whoever drives it: a headless host, a
/// replay of recorded scroll sessions, or a test.
#[derive(Debug, Clone)]
pub struct ManualSource<A> {
    observers: BTreeMap<ObserverId, Observed<A>>,
}

impl<A> Default for ManualSource<A> {
    fn default() -> Self {
        Self {
            observers: BTreeMap::new(),
        }
    }
}

impl<A> ManualSource<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self, observer: ObserverId) -> bool {
        self.observers.contains_key(&observer)
    }

    /// Observers currently connected, ordered by band then generation.
    pub fn connected(&self) -> Vec<ObserverId> {
        self.observers.keys().copied().collect()
    }

    pub fn options(&self, observer: ObserverId) -> Option<&ObserverOptions> {
        self.observers.get(&observer).map(|o| &o.options)
    }

    /// Ids watched by `observer`, in the order they were observed.
    pub fn observed_ids(&self, observer: ObserverId) -> Vec<&str> {
        self.observers
            .get(&observer)
            .map(|o| o.regions.iter().map(|r| r.id.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn is_observing(&self, observer: ObserverId, region_id: &str) -> bool {
        self.observers
            .get(&observer)
            .is_some_and(|o| o.regions.iter().any(|r| r.id == region_id))
    }
}

impl<A: Clone> ObservationSource for ManualSource<A> {
    type Anchor = A;
    type Error = Infallible;

    fn connect(&mut self, observer: ObserverId, options: &ObserverOptions) -> Result<(), Infallible> {
        self.observers.insert(
            observer,
            Observed {
                options: options.clone(),
                regions: Vec::new(),
            },
        );
        Ok(())
    }

    fn observe(&mut self, observer: ObserverId, region: &Region<A>) -> Result<(), Infallible> {
        if let Some(observed) = self.observers.get_mut(&observer) {
            observed.regions.retain(|r| r.id != region.id);
            observed.regions.push(region.clone());
        }
        Ok(())
    }

    fn unobserve(&mut self, observer: ObserverId, region_id: &str) {
        if let Some(observed) = self.observers.get_mut(&observer) {
            observed.regions.retain(|r| r.id != region_id);
        }
    }

    fn disconnect(&mut self, observer: ObserverId) {
        self.observers.remove(&observer);
    }
}
