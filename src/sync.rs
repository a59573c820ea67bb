//! Shared-field synchronization across translation groups.
//!
//! Admin CRUD handlers call `propagate_shared_fields` after persisting a row.
//! The primary write and the sibling propagation are two separate store
//! calls: if the process dies between them the group is left transiently
//! inconsistent, and the next successful write to any member restores the
//! invariant. There is no locking, no retry and no version check; concurrent
//! writers are last-writer-wins at row granularity.

use crate::linkage::{canonical_member, resolve_group};
use crate::store::{ContentEntity, ContentStore, EntityType, SharedFields};
use anyhow::Result;
use tracing::{debug, info};

/// Propagate `shared` to every *other* member of the target's translation
/// group. Translatable fields are never touched. Returns the number of
/// sibling rows updated.
///
/// The target row must already be persisted with `shared` applied; the group
/// is resolved from those post-write values, so for shared-attribute domains
/// a changed tuple only reaches rows that already carry the new tuple.
pub fn propagate_shared_fields(
    store: &ContentStore,
    target: &ContentEntity,
    shared: &SharedFields,
) -> Result<usize> {
    let mut resolved_target = target.clone();
    resolved_target.shared = shared.clone();

    let group = resolve_group(store, &resolved_target)?;
    let siblings: Vec<(String, String)> = group
        .iter()
        .filter(|member| !(member.id == target.id && member.locale == target.locale))
        .map(|member| member.key())
        .collect();

    if siblings.is_empty() {
        debug!(
            entity_type = target.entity_type.as_str(),
            id = target.id.as_str(),
            "singleton translation group, nothing to propagate"
        );
        return Ok(0);
    }

    let updated = store.update_shared_fields(target.entity_type, &siblings, shared)?;
    info!(
        entity_type = target.entity_type.as_str(),
        id = target.id.as_str(),
        locale = target.locale.as_str(),
        updated,
        "propagated shared fields to translation siblings"
    );

    Ok(updated)
}

/// Result of one maintenance sweep over an entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResyncReport {
    /// Translation groups visited
    pub groups: usize,

    /// Groups whose members disagreed on at least one shared field
    pub diverged_groups: usize,

    /// Sibling rows rewritten to the canonical values
    pub rows_updated: usize,
}

/// Sweep every row of `entity_type`, detect groups whose shared fields have
/// diverged (e.g. after a crash between write and propagation) and restore
/// the invariant from the canonical member: the default-locale row when
/// present, else the first row the store returns.
pub fn resync_entity_type(
    store: &ContentStore,
    entity_type: EntityType,
    default_locale: &str,
) -> Result<ResyncReport> {
    let rows = store.list_by_type(entity_type)?;
    let mut report = ResyncReport::default();
    let mut visited: Vec<(String, String)> = Vec::new();

    for row in &rows {
        if visited.contains(&row.key()) {
            continue;
        }

        let group = resolve_group(store, row)?;
        for member in &group {
            visited.push(member.key());
        }
        report.groups += 1;

        let canonical = match canonical_member(&group, default_locale) {
            Some(member) => member.clone(),
            None => continue,
        };

        let stale: Vec<(String, String)> = group
            .iter()
            .filter(|member| member.shared != canonical.shared)
            .map(|member| member.key())
            .collect();
        if stale.is_empty() {
            continue;
        }

        report.diverged_groups += 1;
        report.rows_updated +=
            store.update_shared_fields(entity_type, &stale, &canonical.shared)?;
        info!(
            entity_type = entity_type.as_str(),
            canonical_id = canonical.id.as_str(),
            canonical_locale = canonical.locale.as_str(),
            restored = stale.len(),
            "restored shared-field invariant from canonical member"
        );
    }

    Ok(report)
}
