//! Translation-group linkage and locale-content resolution for the
//! marketing site backend.
//!
//! Two concerns live here:
//!
//! 1. **Database content** (`store`, `linkage`, `sync`): per-locale rows of
//!    the same logical item carry no foreign key to each other; group
//!    membership is computed per domain (compound key, shared attributes, or
//!    exact creation timestamp), and a fixed set of non-translatable shared
//!    fields is re-propagated across the group after every write.
//! 2. **Static content** (`content`, `locales`): compiled default trees per
//!    domain, optional per-locale override documents merged on top, memoized
//!    per `(domain, locale)`, with `{{token}}` interpolation on designated
//!    fields.
//!
//! HTTP routing, authentication, uploads and page rendering are external
//! collaborators; this crate only exposes the resolution and synchronization
//! primitives they call.

pub mod config;
pub mod content;
pub mod linkage;
pub mod locales;
pub mod store;
pub mod sync;
