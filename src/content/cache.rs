//! Merged-bundle memoization.
//!
//! Merging is pure, so two concurrent first requests for the same uncached
//! key may both compute the result; the worst outcome is duplicated work,
//! never corrupted output, and no lock is held during the merge itself.

use crate::content::defaults::default_tree;
use crate::content::merge::merge;
use crate::content::overrides::OverrideRegistry;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Process-lifetime cache of merged content bundles keyed by
/// `(domain, locale)`.
///
/// Operational caveat: a cached bundle does not observe later changes to its
/// override document. Call `invalidate` (or `invalidate_all`) after deploying
/// new content, or restart the process; nothing expires on its own.
pub struct BundleCache {
    overrides: OverrideRegistry,
    bundles: Mutex<HashMap<(String, String), Arc<Value>>>,
}

impl BundleCache {
    pub fn new(overrides: OverrideRegistry) -> Self {
        Self {
            overrides,
            bundles: Mutex::new(HashMap::new()),
        }
    }

    /// The merged bundle for `(domain, locale)`, computed on first request
    /// and memoized. Fails only for an unknown domain; a missing or broken
    /// override document degrades to the pure default tree.
    pub fn bundle(&self, domain: &str, locale: &str) -> Result<Arc<Value>> {
        let key = (domain.to_string(), locale.to_string());

        if let Some(bundle) = self.bundles.lock().unwrap().get(&key) {
            return Ok(Arc::clone(bundle));
        }

        let default = default_tree(domain)
            .with_context(|| format!("Unknown content domain '{}'", domain))?;
        let override_doc = self.overrides.load(domain, locale);
        let merged = Arc::new(merge(default, override_doc.as_ref()));
        debug!(domain, locale, "computed merged content bundle");

        // If another thread raced us here, keep its entry so every caller
        // sees one canonical Arc per key.
        let mut bundles = self.bundles.lock().unwrap();
        let entry = bundles.entry(key).or_insert(merged);
        Ok(Arc::clone(entry))
    }

    /// Drop the cached bundle for one `(domain, locale)` pair; the next
    /// request recomputes it from the current override document.
    pub fn invalidate(&self, domain: &str, locale: &str) {
        self.bundles
            .lock()
            .unwrap()
            .remove(&(domain.to_string(), locale.to_string()));
    }

    /// Drop every cached bundle.
    pub fn invalidate_all(&self) {
        self.bundles.lock().unwrap().clear();
    }
}
