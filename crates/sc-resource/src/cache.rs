use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use sc_core::ResolveError;
use tracing::{debug, info, warn};

use crate::Transport;

type Slot = Arc<Mutex<Option<Arc<str>>>>;

/// Fetch-once store from resource locator to body text.
///
/// A locator is fetched at most once for the lifetime of the cache; later
/// lookups return the stored body even if the backing resource has changed.
/// Failures are never stored, so the next lookup retries.
///
/// Each locator owns its own slot lock: concurrent first lookups of one
/// locator run a single fetch, while different locators fetch in parallel.
pub struct ResourceCache {
    transport: Arc<dyn Transport>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl ResourceCache {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn resolve(&self, locator: &str) -> Result<Arc<str>, ResolveError> {
        let slot = self.slot(locator);
        let mut body = slot.lock();
        if let Some(cached) = body.as_ref() {
            debug!(locator, "resource cache hit");
            return Ok(Arc::clone(cached));
        }

        debug!(locator, "resource cache miss");
        let fetched: Arc<str> = match self.fetch(locator) {
            Ok(fetched) => fetched.into(),
            Err(error) => {
                drop(body);
                self.release_empty_slot(locator, &slot);
                return Err(error);
            }
        };
        *body = Some(Arc::clone(&fetched));
        debug!(locator, bytes = fetched.len(), "resource cached");
        Ok(fetched)
    }

    pub fn contains(&self, locator: &str) -> bool {
        let slot = self.slots.lock().get(locator).cloned();
        slot.is_some_and(|slot| slot.lock().is_some())
    }

    pub fn len(&self) -> usize {
        let slots = self.slots.lock().values().cloned().collect::<Vec<_>>();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, locator: &str) -> Slot {
        let mut slots = self.slots.lock();
        Arc::clone(slots.entry(locator.to_string()).or_default())
    }

    // Removes a slot left empty by a failed fetch unless another lookup holds it.
    fn release_empty_slot(&self, locator: &str, slot: &Slot) {
        let mut slots = self.slots.lock();
        let unused = slots.get(locator).is_some_and(|current| {
            Arc::ptr_eq(current, slot) && Arc::strong_count(slot) == 2 && slot.lock().is_none()
        });
        if unused {
            slots.remove(locator);
        }
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.lock().len()
    }

    fn fetch(&self, locator: &str) -> Result<String, ResolveError> {
        let bytes = if self.transport.local_resource_exists(locator) {
            self.transport.read_local_resource(locator)
        } else if self.transport.is_valid_remote_address(locator) {
            info!(locator, "fetching remote resource");
            self.transport.fetch(locator)
        } else {
            return Err(ResolveError::LocatorInvalid {
                locator: locator.to_string(),
            });
        };

        match bytes {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(fault) => {
                warn!(locator, %fault, "resource fetch failed");
                Err(ResolveError::FetchFailed {
                    locator: locator.to_string(),
                    fault,
                })
            }
        }
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entries", &self.len())
            .finish()
    }
}
