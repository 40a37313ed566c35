use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::scoring::{EconomicContext, LocationKey};

/// Storage for resolved contexts, injected into the Census client.
pub trait ContextCache: Send + Sync {
    fn get(&self, location: &LocationKey) -> Option<EconomicContext>;
    fn insert(&self, location: LocationKey, context: EconomicContext);
}

/// Process-local cache whose entries expire after a fixed time-to-live.
#[derive(Debug)]
pub struct InMemoryTtlCache {
    ttl: Duration,
    entries: Mutex<HashMap<LocationKey, (Instant, EconomicContext)>>,
}

impl InMemoryTtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContextCache for InMemoryTtlCache {
    fn get(&self, location: &LocationKey) -> Option<EconomicContext> {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = guard
            .get(location)
            .map(|(stored_at, context)| (stored_at.elapsed() < self.ttl, *context));
        match entry {
            Some((true, context)) => Some(context),
            Some((false, _)) => {
                guard.remove(location);
                None
            }
            None => None,
        }
    }

    /// Expired entries for every location are pruned on each insert.
    fn insert(&self, location: LocationKey, context: EconomicContext) {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        guard.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        guard.insert(location, (Instant::now(), context));
    }
}

/// Cache that never stores anything; every lookup goes to the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContextCache;

impl ContextCache for NoContextCache {
    fn get(&self, _location: &LocationKey) -> Option<EconomicContext> {
        None
    }

    fn insert(&self, _location: LocationKey, _context: EconomicContext) {}
}
