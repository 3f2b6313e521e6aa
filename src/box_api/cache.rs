use std::sync::{Arc, RwLock};
use tracing::info;

use crate::errors::BoxError;

/// Lazily built, process-lifetime client slot.
///
/// The lock only guards the pointer; construction runs outside it, so two
/// concurrent first calls may both build a client. The later write wins and
/// the other instance is dropped. A failed build leaves the slot empty.
pub struct ClientCache<C> {
    slot: RwLock<Option<Arc<C>>>,
}

impl<C> Default for ClientCache<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ClientCache<C> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn get(&self) -> Option<Arc<C>> {
        self.slot.read().ok().and_then(|guard| guard.clone())
    }

    /// Return the cached client, building it with `build` on first use.
    ///
    /// # Errors
    ///
    /// Propagates the error from `build`; nothing is cached in that case.
    pub fn get_or_try_init<F>(&self, build: F) -> Result<Arc<C>, BoxError>
    where
        F: FnOnce() -> Result<C, BoxError>,
    {
        if let Some(client) = self.get() {
            return Ok(client);
        }

        let client = Arc::new(build()?);
        if let Ok(mut guard) = self.slot.write() {
            *guard = Some(Arc::clone(&client));
        }
        info!("Box client initialized");
        Ok(client)
    }

    /// Drop the cached client so the next call builds a fresh one.
    pub fn reset(&self) {
        if let Ok(mut guard) = self.slot.write() {
            *guard = None;
        }
    }
}
