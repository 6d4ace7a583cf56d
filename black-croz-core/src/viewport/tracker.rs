use std::rc::Rc;

use super::config::TrackerConfig;
use super::error::{Result, TrackerError};
use super::evaluator::IntersectionEvaluator;
use super::model::{ActivityState, Band, ObserverId, VisibilityEvent};
use super::registry::{AnchorResolver, RegionRegistry};
use super::source::ObservationSource;
use super::store::ActivityStore;

/// Lifecycle manager tying a region registry, the evaluator and the store to
/// a live observation source.
///
/// Mounting connects one observer per [`Band`]. Teardown happens through
/// [`detach`](Self::detach) or on drop, and disconnects every observer that
/// was connected. Once detached, delivered batches are discarded and the
/// snapshot stays frozen.
pub struct ViewportTracker<S: ObservationSource> {
    config: TrackerConfig,
    source: S,
    registry: RegionRegistry<S::Anchor>,
    store: ActivityStore,
    /// `None` once detached.
    evaluator: Option<IntersectionEvaluator>,
    generation: u64,
}

impl<S: ObservationSource> ViewportTracker<S> {
    /// Registers `ids`, connects both observers and starts tracking.
    ///
    /// Fails with [`TrackerError::InvalidArgument`] for an empty or malformed
    /// id sequence or an invalid config, and with [`TrackerError::Source`] if
    /// the source refuses an observer. Nothing stays connected on failure.
    pub fn mount<R, I, T>(ids: I, resolver: &R, source: S, config: TrackerConfig) -> Result<Self>
    where
        R: AnchorResolver<Anchor = S::Anchor> + ?Sized,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        config.validate()?;
        let registry = RegionRegistry::register(ids, resolver)?;
        let store = ActivityStore::new(ActivityState::new(config.default_active_id.clone()));

        let mut tracker = Self {
            config,
            source,
            registry,
            store,
            evaluator: None,
            generation: 0,
        };
        tracker.attach()?;

        tracing::debug!(
            regions = tracker.registry.len(),
            generation = tracker.generation,
            "Viewport tracker mounted"
        );
        Ok(tracker)
    }

    /// Applies one batch reported by `observer`.
    ///
    /// The store is notified at most once per batch, and only if the batch
    /// changed the state. Batches from a detached tracker or from observers of
    /// an earlier mount are discarded.
    pub fn deliver(&mut self, observer: ObserverId, events: &[VisibilityEvent]) {
        let Some(evaluator) = self.evaluator.as_ref() else {
            tracing::trace!(%observer, "Tracker detached, dropping batch");
            return;
        };
        if observer.generation != self.generation {
            tracing::debug!(%observer, current = self.generation, "Dropping stale batch");
            return;
        }

        let mut next = ActivityState::clone(&self.store.get_snapshot());
        let transition = evaluator.apply(observer.band, events, &mut next);
        if transition.is_empty() {
            return;
        }

        for id in &transition.newly_revealed {
            tracing::debug!(region = %id, "Region revealed");
            self.source.unobserve(observer, id);
        }
        if transition.active_changed {
            tracing::trace!(region = %next.active_id, "Active region changed");
        }
        self.store.commit(next);
    }

    /// Replaces the tracked region set.
    ///
    /// The new ids are validated before anything is torn down, so a malformed
    /// sequence leaves the current tracking intact. Otherwise all observers are
    /// disconnected and the mount sequence runs again. Reveals carry over; an
    /// active region that is no longer registered falls back to the default.
    pub fn set_regions<R, I, T>(&mut self, ids: I, resolver: &R) -> Result<()>
    where
        R: AnchorResolver<Anchor = S::Anchor> + ?Sized,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let registry = RegionRegistry::register(ids, resolver)?;

        self.detach();
        self.registry = registry;

        let current = self.store.get_snapshot();
        if !self.registry.contains(&current.active_id)
            && current.active_id != self.config.default_active_id
        {
            let mut next = ActivityState::clone(&current);
            next.active_id.clone_from(&self.config.default_active_id);
            self.store.commit(next);
        }

        self.attach()
    }

    /// Disconnects every observer. Idempotent.
    pub fn detach(&mut self) {
        if self.evaluator.take().is_none() {
            return;
        }
        for observer in self.observers() {
            self.source.disconnect(observer);
        }
        tracing::debug!(generation = self.generation, "Viewport tracker detached");
    }

    pub fn is_attached(&self) -> bool {
        self.evaluator.is_some()
    }

    /// Observer identity for `band` in the current mount.
    pub fn observer(&self, band: Band) -> ObserverId {
        ObserverId::new(band, self.generation)
    }

    pub fn observers(&self) -> [ObserverId; 2] {
        Band::ALL.map(|band| self.observer(band))
    }

    pub fn store(&self) -> ActivityStore {
        self.store.clone()
    }

    pub fn snapshot(&self) -> Rc<ActivityState> {
        self.store.get_snapshot()
    }

    pub fn registry(&self) -> &RegionRegistry<S::Anchor> {
        &self.registry
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn attach(&mut self) -> Result<()> {
        self.generation += 1;

        let mut connected = Vec::with_capacity(Band::ALL.len());
        if let Err(err) = self.connect_observers(&mut connected) {
            for observer in connected {
                self.source.disconnect(observer);
            }
            tracing::warn!(error = %err, "Observation source failed during mount");
            return Err(TrackerError::source(err));
        }

        self.evaluator = Some(IntersectionEvaluator::new(&self.config, self.registry.ids()));
        Ok(())
    }

    fn connect_observers(&mut self, connected: &mut Vec<ObserverId>) -> std::result::Result<(), S::Error> {
        let revealed = self.store.get_snapshot();

        for band in Band::ALL {
            let observer = ObserverId::new(band, self.generation);
            self.source.connect(observer, self.config.options(band))?;
            connected.push(observer);

            for region in self.registry.regions() {
                if band == Band::Reveal && revealed.is_revealed(&region.id) {
                    continue;
                }
                self.source.observe(observer, region)?;
            }
        }
        Ok(())
    }
}

impl<S: ObservationSource> Drop for ViewportTracker<S> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<S> std::fmt::Debug for ViewportTracker<S>
where
    S: ObservationSource + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportTracker")
            .field("config", &self.config)
            .field("source", &self.source)
            .field("regions", &self.registry.declared_ids())
            .field("store", &self.store)
            .field("attached", &self.is_attached())
            .field("generation", &self.generation)
            .finish()
    }
}
