//! The tracker registry.
//!
//! Maps tracker names to instances so producers anywhere in the process
//! can reach "the" tracker without holding a reference. Registration
//! happens at startup; lookups happen on every track call, so the map
//! sits behind read-biased locks.

use crate::error::{TrackerError, TrackerResult};
use crate::tracker::Tracker;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};
use tracing::{debug, warn};

static GLOBAL: LazyLock<TrackerRepository> = LazyLock::new(TrackerRepository::new);

/// Registry of named tracker instances with one designated default.
///
/// Usable standalone (tests construct their own), with a process-wide
/// instance behind [`TrackerRepository::global`] for call sites that
/// want ambient ergonomics. [`reset`](TrackerRepository::reset) restores
/// the empty state either way.
#[derive(Default)]
pub struct TrackerRepository {
    trackers: RwLock<HashMap<String, Arc<Tracker>>>,
    default_name: RwLock<Option<String>>,
}

impl TrackerRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide repository.
    #[must_use]
    pub fn global() -> &'static TrackerRepository {
        &GLOBAL
    }

    /// Registers a tracker under its `tracker_id`.
    ///
    /// Registering a name that is already taken overwrites the previous
    /// mapping: last registration wins, which keeps hot-reload setups
    /// working. `make_default` promotes the tracker to the default.
    pub fn register(&self, tracker: Arc<Tracker>, make_default: bool) {
        let name = tracker.tracker_id().to_string();
        let previous = self
            .trackers
            .write()
            .unwrap()
            .insert(name.clone(), tracker);
        if previous.is_some() {
            warn!(name, "tracker re-registered, previous instance replaced");
        } else {
            debug!(name, "tracker registered");
        }
        if make_default {
            *self.default_name.write().unwrap() = Some(name);
        }
    }

    /// Resolves a tracker by name, or the default when no name is given.
    pub fn get(&self, name: Option<&str>) -> TrackerResult<Arc<Tracker>> {
        let trackers = self.trackers.read().unwrap();
        match name {
            Some(name) => trackers
                .get(name)
                .cloned()
                .ok_or_else(|| TrackerError::TrackerNotFound(name.to_string())),
            None => {
                let default_name = self.default_name.read().unwrap();
                let name = default_name
                    .as_deref()
                    .ok_or(TrackerError::NoDefaultTracker)?;
                trackers
                    .get(name)
                    .cloned()
                    .ok_or(TrackerError::NoDefaultTracker)
            }
        }
    }

    /// The name of the current default tracker, if one is set.
    #[must_use]
    pub fn default_name(&self) -> Option<String> {
        self.default_name.read().unwrap().clone()
    }

    /// Registered tracker names, in no particular order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.trackers.read().unwrap().keys().cloned().collect()
    }

    /// Number of registered trackers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trackers.read().unwrap().len()
    }

    /// Whether no tracker is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trackers.read().unwrap().is_empty()
    }

    /// Drops all registrations and the default. Meant for tests and
    /// development reloads; registered trackers keep running until their
    /// last reference drops.
    pub fn reset(&self) {
        self.trackers.write().unwrap().clear();
        *self.default_name.write().unwrap() = None;
    }
}
