//! Translation-group linkage.
//!
//! No foreign key ties the per-locale renditions of a content item together;
//! membership in a translation group is computed from the row itself using a
//! per-domain strategy. The strategies do not fall back to one another: when
//! the primary strategy finds no siblings the group is a singleton, never a
//! guess.

use crate::store::{ContentEntity, ContentStore, EntityType};
use anyhow::Result;
use tracing::warn;

/// How a domain's rows are matched with their translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkageStrategy {
    /// The row's own `(id, locale)` pair is authoritative; group = all rows
    /// sharing `id`. Trivial and exact.
    CompoundKey,

    /// Rows have independent ids per locale; group = all rows whose
    /// `(icon, show_on_homepage)` tuple matches.
    SharedAttribute,

    /// Group = all rows with an identical creation timestamp, set
    /// intentionally when a translation is created linked to a source row.
    /// Brittle: a write path that does not copy the timestamp verbatim
    /// silently orphans the translation into its own singleton group.
    ExactTimestamp,

    /// Group = all rows whose normalized title is equal. Used only by
    /// maintenance tooling, never by the live write path.
    TitleString,
}

impl EntityType {
    /// The configured linkage strategy for this domain.
    pub fn strategy(self) -> LinkageStrategy {
        match self {
            EntityType::Faq | EntityType::BlogPost | EntityType::CountryPage => {
                LinkageStrategy::CompoundKey
            }
            EntityType::Service | EntityType::DemoItem => LinkageStrategy::SharedAttribute,
            EntityType::Story | EntityType::Plan => LinkageStrategy::ExactTimestamp,
        }
    }
}

/// A detectable data-integrity violation inside one translation group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// More than one row in the same locale matched the group key. Not
    /// auto-resolved: the first match wins for reads and the condition is
    /// reported for out-of-band cleanup.
    DuplicateLocale { locale: String, ids: Vec<String> },
}

/// Resolve the translation group of `entity`, always including the entity
/// itself.
///
/// Uses the domain's configured strategy (`EntityType::strategy`). Duplicate
/// rows in one locale are kept in store order ("first match wins") and logged
/// as a data-integrity violation.
pub fn resolve_group(store: &ContentStore, entity: &ContentEntity) -> Result<Vec<ContentEntity>> {
    let mut group = match entity.entity_type.strategy() {
        LinkageStrategy::CompoundKey => store.list_by_id(entity.entity_type, &entity.id)?,
        LinkageStrategy::SharedAttribute => store.list_by_shared_tuple(
            entity.entity_type,
            entity.shared.icon.as_deref(),
            entity.shared.show_on_homepage,
        )?,
        LinkageStrategy::ExactTimestamp => {
            store.list_by_created_at(entity.entity_type, &entity.created_at)?
        }
        // Title-string linkage is maintenance-only; a live entity type is
        // never configured with it.
        LinkageStrategy::TitleString => resolve_group_by_title(store, entity)?,
    };

    // The contract is "always contains the entity itself", even when the row
    // has not been persisted yet or its stored shared fields diverge from the
    // in-memory copy.
    if !group
        .iter()
        .any(|member| member.id == entity.id && member.locale == entity.locale)
    {
        group.insert(0, entity.clone());
    }

    for violation in group_integrity_violations(&group) {
        let IntegrityViolation::DuplicateLocale { locale, ids } = &violation;
        warn!(
            entity_type = entity.entity_type.as_str(),
            locale = locale.as_str(),
            ?ids,
            "translation group has multiple rows in one locale; first match wins"
        );
    }

    Ok(group)
}

/// Resolve a group by normalized-title equality.
///
/// Near-duplicate titles (trailing qualifiers, punctuation differences) will
/// not match; that is a data-quality concern for the audit tooling, not
/// something resolved here.
pub fn resolve_group_by_title(
    store: &ContentStore,
    entity: &ContentEntity,
) -> Result<Vec<ContentEntity>> {
    let needle = normalize_title(&entity.title);
    let group = store
        .list_by_type(entity.entity_type)?
        .into_iter()
        .filter(|row| normalize_title(&row.title) == needle)
        .collect();
    Ok(group)
}

/// Normalize a title for string linkage: trim, collapse internal whitespace,
/// lowercase.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Detect per-locale duplicates in a resolved group (invariant: at most one
/// member per locale).
pub fn group_integrity_violations(group: &[ContentEntity]) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for member in group {
        if seen.contains(&member.locale.as_str()) {
            continue;
        }
        seen.push(&member.locale);

        let ids: Vec<String> = group
            .iter()
            .filter(|m| m.locale == member.locale)
            .map(|m| m.id.clone())
            .collect();
        if ids.len() > 1 {
            violations.push(IntegrityViolation::DuplicateLocale {
                locale: member.locale.clone(),
                ids,
            });
        }
    }

    violations
}

/// Pick the member that supplies canonical shared-field values when the group
/// has diverged: prefer the row in the default locale, else the first row
/// returned by the store.
pub fn canonical_member<'a>(
    group: &'a [ContentEntity],
    default_locale: &str,
) -> Option<&'a ContentEntity> {
    group
        .iter()
        .find(|member| member.locale == default_locale)
        .or_else(|| group.first())
}
