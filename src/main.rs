use anyhow::Result;
use locale_content::config::Config;
use locale_content::store::{ContentStore, EntityType};
use locale_content::sync::resync_entity_type;
use tracing::info;

/// Maintenance job: sweep every DB-backed content domain and restore the
/// shared-field invariant for groups left diverged by an interrupted
/// write-then-propagate sequence.
fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_content=info".parse()?),
        )
        .init();

    info!("Starting translation-group resync job");

    let config = Config::from_env()?;
    let store = ContentStore::new(&config.database_path)?;

    let mut total_groups = 0;
    let mut total_restored = 0;

    for entity_type in EntityType::ALL {
        let report = resync_entity_type(&store, entity_type, &config.default_locale)?;
        info!(
            entity_type = entity_type.as_str(),
            groups = report.groups,
            diverged = report.diverged_groups,
            restored = report.rows_updated,
            "resync pass complete"
        );
        total_groups += report.groups;
        total_restored += report.rows_updated;
    }

    info!(total_groups, total_restored, "Resync finished successfully");
    Ok(())
}
