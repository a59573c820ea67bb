//! Static content resolution for multi-locale pages.
//!
//! Each content domain (pricing, integrations, country pages) has a canonical
//! default tree compiled into the binary that defines the full schema and the
//! source-language values. A locale may ship a partial override document;
//! missing or malformed documents degrade to "no override". Rendering sees
//! the merged result, memoized per `(domain, locale)`, with `{{token}}`
//! placeholders substituted per designated field.
//!
//! - `defaults`: compiled default content trees, one per domain
//! - `overrides`: startup-resolved registry of override document paths
//! - `merge`: pure recursive default/override merge
//! - `cache`: process-lifetime bundle memoization with explicit invalidation
//! - `interpolate`: `{{token}}` substitution on designated string paths

pub mod cache;
pub mod defaults;
pub mod interpolate;
pub mod merge;
pub mod overrides;

pub use cache::BundleCache;
pub use overrides::OverrideRegistry;
