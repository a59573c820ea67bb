//! Title-string linkage audit - maintenance tooling only, never part of the
//! live write path.
//!
//! Groups every row of every entity type by normalized title and reports
//! cross-locale groups plus any group holding two rows in the same locale
//! (an unresolved linkage ambiguity). Near-duplicate titles intentionally do
//! not match; they show up as separate singleton lines for a human to judge.
//!
//! Usage:
//!   cargo run --bin audit-titles
//!
//! Required environment variables:
//! - DATABASE_PATH

use anyhow::Result;
use locale_content::config::Config;
use locale_content::linkage::{group_integrity_violations, normalize_title, IntegrityViolation};
use locale_content::store::{ContentEntity, ContentStore, EntityType};
use std::collections::BTreeMap;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_content=info".parse().unwrap()),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    // Audits must not create schema as a side effect.
    let store = ContentStore::open_existing(&config.database_path)?;

    let mut ambiguous_groups = 0;

    for entity_type in EntityType::ALL {
        let rows = store.list_by_type(entity_type)?;
        if rows.is_empty() {
            continue;
        }

        let mut by_title: BTreeMap<String, Vec<ContentEntity>> = BTreeMap::new();
        for row in rows {
            by_title
                .entry(normalize_title(&row.title))
                .or_default()
                .push(row);
        }

        println!("== {} ==", entity_type.as_str());
        for (title, group) in &by_title {
            let locales: Vec<&str> = group.iter().map(|m| m.locale.as_str()).collect();
            println!("  \"{}\" -> {} row(s) [{}]", title, group.len(), locales.join(", "));

            for violation in group_integrity_violations(group) {
                let IntegrityViolation::DuplicateLocale { locale, ids } = &violation;
                ambiguous_groups += 1;
                println!(
                    "    !! ambiguity: locale '{}' has {} rows ({})",
                    locale,
                    ids.len(),
                    ids.join(", ")
                );
            }
        }
    }

    if ambiguous_groups > 0 {
        println!("\n{} ambiguous group(s) need manual cleanup", ambiguous_groups);
    } else {
        info!("No per-locale ambiguities found");
    }

    Ok(())
}
