use std::collections::{HashMap, HashSet};

use super::error::{Result, TrackerError};
use super::model::{Region, RegionId};

/// Resolves a region id to the anchor the observation source watches.
///
/// Returning `None` means the region is not (yet) present in the layout.
pub trait AnchorResolver {
    type Anchor;

    fn resolve(&self, id: &str) -> Option<Self::Anchor>;
}

impl<A, F> AnchorResolver for F
where
    F: Fn(&str) -> Option<A>,
{
    type Anchor = A;

    fn resolve(&self, id: &str) -> Option<A> {
        self(id)
    }
}

impl<A: Clone> AnchorResolver for HashMap<String, A> {
    type Anchor = A;

    fn resolve(&self, id: &str) -> Option<A> {
        self.get(id).cloned()
    }
}

/// Ordered set of regions the tracker follows.
///
/// Registration never fails because of missing anchors: unresolved ids are
/// remembered in [`declared_ids`](Self::declared_ids) but take no part in
/// tracking. When an id is listed more than once the last occurrence wins,
/// both for its position and for its anchor.
#[derive(Debug, Clone)]
pub struct RegionRegistry<A> {
    declared: Vec<RegionId>,
    regions: Vec<Region<A>>,
}

impl<A> RegionRegistry<A> {
    pub fn register<R, I, S>(ids: I, resolver: &R) -> Result<Self>
    where
        R: AnchorResolver<Anchor = A> + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let declared = normalize_ids(ids)?;

        let mut regions = Vec::with_capacity(declared.len());
        for id in &declared {
            match resolver.resolve(id) {
                Some(anchor) => regions.push(Region {
                    id: id.clone(),
                    anchor,
                }),
                None => tracing::debug!(region = %id, "No anchor for region, skipping"),
            }
        }

        if regions.is_empty() {
            tracing::debug!("No region resolved, tracker will stay idle");
        }

        Ok(Self { declared, regions })
    }

    /// Every id passed at registration, deduplicated, resolved or not.
    pub fn declared_ids(&self) -> &[RegionId] {
        &self.declared
    }

    /// Regions with a live anchor, in registration order.
    pub fn regions(&self) -> &[Region<A>] {
        &self.regions
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.id.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&Region<A>> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Whether `id` is registered with a resolved anchor.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Validates ids and collapses duplicates, keeping the last occurrence.
fn normalize_ids<I, S>(ids: I) -> Result<Vec<RegionId>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids: Vec<String> = ids.into_iter().map(|s| s.as_ref().to_string()).collect();
    if ids.is_empty() {
        return Err(TrackerError::invalid("region id sequence must not be empty"));
    }
    if let Some(pos) = ids.iter().position(|id| id.trim().is_empty()) {
        return Err(TrackerError::invalid(format!(
            "region id at position {pos} is empty"
        )));
    }

    let mut seen = HashSet::with_capacity(ids.len());
    let mut unique: Vec<RegionId> = ids
        .into_iter()
        .rev()
        .filter(|id| seen.insert(id.clone()))
        .collect();
    unique.reverse();
    Ok(unique)
}
