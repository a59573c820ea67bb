//! Locale override documents.
//!
//! Overrides are optional JSON files addressed by `(domain, locale)`. The
//! registry resolves every path once at startup from the configured content
//! directory, so "which documents could exist" is an explicit, inspectable
//! mapping rather than an ad-hoc filesystem probe per request. Loading stays
//! lenient: a missing or unparsable document is not an error, it simply means
//! "no override" and the caller merges against defaults only.

use crate::content::defaults::DOMAINS;
use crate::locales::LocaleRegistry;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Startup-resolved mapping of `(domain, locale)` to override document path.
#[derive(Debug, Clone)]
pub struct OverrideRegistry {
    entries: HashMap<(String, String), PathBuf>,
}

impl OverrideRegistry {
    /// Build the registry for every known domain and enabled locale.
    ///
    /// Documents live at `<content_dir>/<domain>.<locale>.json`. The files
    /// themselves are not required to exist.
    pub fn new(content_dir: &Path) -> Self {
        let mut entries = HashMap::new();

        for domain in DOMAINS {
            for locale in LocaleRegistry::get().list_enabled() {
                let path = content_dir.join(format!("{}.{}.json", domain, locale.code));
                entries.insert((domain.to_string(), locale.code.to_string()), path);
            }
        }

        Self { entries }
    }

    /// The resolved path for a pair, if the pair is registered.
    pub fn path(&self, domain: &str, locale: &str) -> Option<&Path> {
        self.entries
            .get(&(domain.to_string(), locale.to_string()))
            .map(PathBuf::as_path)
    }

    /// Load the override document for `(domain, locale)`.
    ///
    /// Returns `None` for an unregistered pair, a missing file, or a file
    /// that fails to parse; none of these propagate an error.
    pub fn load(&self, domain: &str, locale: &str) -> Option<Value> {
        let path = match self.path(domain, locale) {
            Some(path) => path,
            None => {
                debug!(domain, locale, "no override document registered");
                return None;
            }
        };

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                debug!(domain, locale, path = %path.display(), "override document absent");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(
                    domain,
                    locale,
                    path = %path.display(),
                    error = %e,
                    "override document failed to parse; falling back to defaults"
                );
                None
            }
        }
    }
}
