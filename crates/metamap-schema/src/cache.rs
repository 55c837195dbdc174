//! Process-lifetime schema cache.
//!
//! The cache guarantees at most one external retrieval per distinct schema
//! reference for the lifetime of the process. Entries are never overwritten
//! or invalidated; a failed retrieval writes nothing, so the next call for
//! the same reference retries.
//!
//! Concurrent `fetch_or_retrieve` calls for the same reference are
//! serialized per reference: the global map lock is held only long enough
//! to resolve the reference's slot, and a per-slot lock covers the check
//! and the retrieval itself. Unrelated references never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use metamap_model::SchemaRef;

use crate::SchemaError;

/// A raw schema document as retrieved from its source.
pub type SchemaBody = serde_json::Value;

/// The retrieval seam: resolves a schema reference to its body.
///
/// The engine ships a filesystem-backed implementation; callers needing a
/// different transport implement this trait and inject it.
pub trait SchemaSource: Send + Sync {
    fn retrieve(&self, reference: &SchemaRef) -> Result<SchemaBody, SchemaError>;
}

#[derive(Debug, Default)]
struct Slot {
    body: Mutex<Option<SchemaBody>>,
}

/// Cache of retrieved schema bodies keyed by reference.
#[derive(Debug, Default)]
pub struct SchemaCache {
    slots: Mutex<HashMap<SchemaRef, Arc<Slot>>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a body has been stored for the reference.
    pub fn contains(&self, reference: &SchemaRef) -> bool {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        match slots.get(reference) {
            Some(slot) => slot
                .body
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_some(),
            None => false,
        }
    }

    /// Return the cached body for the reference.
    pub fn get(&self, reference: &SchemaRef) -> Result<SchemaBody, SchemaError> {
        let slot = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.get(reference).cloned()
        };
        let body = match &slot {
            Some(slot) => slot
                .body
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            None => None,
        };
        body.ok_or_else(|| SchemaError::NotCached {
            reference: reference.clone(),
        })
    }

    /// Store a body for the reference.
    ///
    /// Idempotent for equal bodies. Callers must not insert conflicting
    /// bodies for one reference; if they do, the first write wins and the
    /// entry is never overwritten.
    pub fn insert(&self, reference: &SchemaRef, body: SchemaBody) {
        let slot = self.slot(reference);
        let mut stored = slot.body.lock().unwrap_or_else(PoisonError::into_inner);
        if stored.is_none() {
            *stored = Some(body);
        }
    }

    /// Return the cached body, or invoke `retrieve` exactly once, store the
    /// result, and return it.
    ///
    /// A retrieval failure writes no entry and propagates to the caller, so
    /// a later call with the same reference re-attempts retrieval.
    pub fn fetch_or_retrieve<F>(
        &self,
        reference: &SchemaRef,
        retrieve: F,
    ) -> Result<SchemaBody, SchemaError>
    where
        F: FnOnce(&SchemaRef) -> Result<SchemaBody, SchemaError>,
    {
        let slot = self.slot(reference);
        let mut stored = slot.body.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(body) = stored.as_ref() {
            debug!(reference = %reference, "schema cache hit");
            return Ok(body.clone());
        }

        info!(reference = %reference, "retrieving schema");
        let body = retrieve(reference)?;
        *stored = Some(body.clone());
        Ok(body)
    }

    /// `fetch_or_retrieve` against an injected source.
    pub fn fetch_from(
        &self,
        reference: &SchemaRef,
        source: &dyn SchemaSource,
    ) -> Result<SchemaBody, SchemaError> {
        self.fetch_or_retrieve(reference, |reference| source.retrieve(reference))
    }

    fn slot(&self, reference: &SchemaRef) -> Arc<Slot> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(reference.clone()).or_default())
    }
}
