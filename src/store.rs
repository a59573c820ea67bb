use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors the store reports with a dedicated type rather than a generic
/// SQLite failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writes against a database that was never migrated fail loudly with an
    /// actionable message. Reads against the same database degrade to "no
    /// rows found" instead.
    #[error("content_entries table is missing; run database migrations before writing")]
    MissingTable,
}

/// Content domains persisted in the store.
///
/// The variant determines which linkage strategy groups a row with its
/// translations (see `linkage::EntityType::strategy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Service,
    DemoItem,
    Story,
    Faq,
    Plan,
    BlogPost,
    CountryPage,
}

impl EntityType {
    pub const ALL: [EntityType; 7] = [
        EntityType::Service,
        EntityType::DemoItem,
        EntityType::Story,
        EntityType::Faq,
        EntityType::Plan,
        EntityType::BlogPost,
        EntityType::CountryPage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Service => "service",
            EntityType::DemoItem => "demo_item",
            EntityType::Story => "story",
            EntityType::Faq => "faq",
            EntityType::Plan => "plan",
            EntityType::BlogPost => "blog_post",
            EntityType::CountryPage => "country_page",
        }
    }

    pub fn parse(s: &str) -> Option<EntityType> {
        EntityType::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

/// Fields that must hold identical values across every locale of a
/// translation group. Never locale-specific text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SharedFields {
    /// Icon identifier (e.g., "gift", "shield")
    pub icon: Option<String>,

    /// Whether the item is featured on the homepage
    pub show_on_homepage: bool,

    /// Category reference shared by all renditions
    pub category: Option<String>,
}

/// One persisted row: a single locale's rendition of a logical content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntity {
    pub id: String,
    pub locale: String,
    pub entity_type: EntityType,

    /// Translatable headline
    pub title: String,

    /// Translatable body/summary
    pub description: Option<String>,

    /// Domain-specific translatable extras (bullet lists, CTA labels, ...)
    pub payload: Value,

    /// Non-translatable fields kept in sync across the group
    pub shared: SharedFields,

    /// RFC 3339 creation timestamp. Compared byte-for-byte by the
    /// exact-timestamp linkage strategy, so it must be copied verbatim when
    /// creating a linked translation (see `translation_for`).
    pub created_at: String,
}

impl ContentEntity {
    /// Create a new entity with a fresh creation timestamp.
    pub fn new(entity_type: EntityType, id: &str, locale: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            locale: locale.to_string(),
            entity_type,
            title: title.to_string(),
            description: None,
            payload: Value::Object(serde_json::Map::new()),
            shared: SharedFields::default(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Start a translation of this entity for another locale.
    ///
    /// Copies the shared fields and the exact `created_at` string so that
    /// timestamp-linked domains stay in the same group. Translatable fields
    /// are carried over as a starting point for the translator. For
    /// shared-attribute domains the caller should assign a fresh `id` before
    /// persisting (those domains have independent ids per locale).
    pub fn translation_for(&self, locale: &str) -> Self {
        let mut translation = self.clone();
        translation.locale = locale.to_string();
        translation
    }

    /// Composite key identifying this exact row.
    pub fn key(&self) -> (String, String) {
        (self.id.clone(), self.locale.clone())
    }
}

#[derive(Clone)]
pub struct ContentStore {
    conn: Arc<Mutex<Connection>>,
}

impl ContentStore {
    /// Open the database and create the schema if it does not exist yet.
    pub fn new(database_path: &str) -> Result<Self> {
        let store = Self::open_existing(database_path)?;

        {
            let conn = store.conn.lock().unwrap();
            conn.execute(
                "CREATE TABLE IF NOT EXISTS content_entries (
                    entity_type TEXT NOT NULL,
                    id TEXT NOT NULL,
                    locale TEXT NOT NULL,
                    title TEXT NOT NULL,
                    description TEXT,
                    payload TEXT NOT NULL DEFAULT '{}',
                    icon TEXT,
                    show_on_homepage INTEGER NOT NULL DEFAULT 0,
                    category TEXT,
                    created_at TEXT NOT NULL,
                    PRIMARY KEY (entity_type, id, locale)
                )",
                [],
            )
            .context("Failed to create content_entries table")?;
        }

        Ok(store)
    }

    /// Open the database without running any migration.
    ///
    /// Used by maintenance tooling that must not create schema as a side
    /// effect. Reads against a missing table return no rows; writes fail
    /// with `StoreError::MissingTable`.
    pub fn open_existing(database_path: &str) -> Result<Self> {
        let conn = Connection::open(database_path)
            .context(format!("Failed to open database at {}", database_path))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert a row, or replace the existing rendition with the same
    /// `(entity_type, id, locale)` key.
    pub fn upsert(&self, entity: &ContentEntity) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let payload =
            serde_json::to_string(&entity.payload).context("Failed to serialize payload")?;

        conn.execute(
            "INSERT OR REPLACE INTO content_entries
             (entity_type, id, locale, title, description, payload, icon, show_on_homepage, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                entity.entity_type.as_str(),
                entity.id,
                entity.locale,
                entity.title,
                entity.description,
                payload,
                entity.shared.icon,
                entity.shared.show_on_homepage as i64,
                entity.shared.category,
                entity.created_at,
            ],
        )
        .map_err(map_write_error)?;

        Ok(())
    }

    /// Fetch one rendition by its full key.
    pub fn get(
        &self,
        entity_type: EntityType,
        id: &str,
        locale: &str,
    ) -> Result<Option<ContentEntity>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = match conn.prepare(&format!(
            "SELECT {} FROM content_entries
             WHERE entity_type = ?1 AND id = ?2 AND locale = ?3",
            ENTITY_COLUMNS
        )) {
            Ok(stmt) => stmt,
            Err(e) if is_missing_table(&e) => return Ok(None),
            Err(e) => return Err(e).context("Failed to prepare content lookup"),
        };

        let entity = stmt
            .query_row(params![entity_type.as_str(), id, locale], row_to_entity)
            .optional()
            .context("Failed to fetch content entry")?;

        Ok(entity)
    }

    /// Delete one rendition. Returns whether a row was removed.
    pub fn delete(&self, entity_type: EntityType, id: &str, locale: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let rows = conn
            .execute(
                "DELETE FROM content_entries
                 WHERE entity_type = ?1 AND id = ?2 AND locale = ?3",
                params![entity_type.as_str(), id, locale],
            )
            .map_err(map_write_error)?;

        Ok(rows > 0)
    }

    /// All renditions sharing an id (compound-key linkage), in insertion order.
    pub fn list_by_id(&self, entity_type: EntityType, id: &str) -> Result<Vec<ContentEntity>> {
        self.query_entities(
            &format!(
                "SELECT {} FROM content_entries
                 WHERE entity_type = ?1 AND id = ?2
                 ORDER BY rowid",
                ENTITY_COLUMNS
            ),
            params![entity_type.as_str(), id],
        )
    }

    /// All renditions matching a shared-attribute tuple, in insertion order.
    pub fn list_by_shared_tuple(
        &self,
        entity_type: EntityType,
        icon: Option<&str>,
        show_on_homepage: bool,
    ) -> Result<Vec<ContentEntity>> {
        self.query_entities(
            &format!(
                "SELECT {} FROM content_entries
                 WHERE entity_type = ?1 AND icon IS ?2 AND show_on_homepage = ?3
                 ORDER BY rowid",
                ENTITY_COLUMNS
            ),
            params![entity_type.as_str(), icon, show_on_homepage as i64],
        )
    }

    /// All renditions with an identical creation timestamp (exact string
    /// match, no tolerance window), in insertion order.
    pub fn list_by_created_at(
        &self,
        entity_type: EntityType,
        created_at: &str,
    ) -> Result<Vec<ContentEntity>> {
        self.query_entities(
            &format!(
                "SELECT {} FROM content_entries
                 WHERE entity_type = ?1 AND created_at = ?2
                 ORDER BY rowid",
                ENTITY_COLUMNS
            ),
            params![entity_type.as_str(), created_at],
        )
    }

    /// Every row of one entity type, in insertion order.
    pub fn list_by_type(&self, entity_type: EntityType) -> Result<Vec<ContentEntity>> {
        self.query_entities(
            &format!(
                "SELECT {} FROM content_entries
                 WHERE entity_type = ?1
                 ORDER BY rowid",
                ENTITY_COLUMNS
            ),
            params![entity_type.as_str()],
        )
    }

    /// Count rows of one entity type.
    pub fn count(&self, entity_type: EntityType) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = match conn
            .prepare("SELECT COUNT(*) FROM content_entries WHERE entity_type = ?1")
        {
            Ok(stmt) => stmt,
            Err(e) if is_missing_table(&e) => return Ok(0),
            Err(e) => return Err(e).context("Failed to prepare count"),
        };
        let count: i64 = stmt.query_row(params![entity_type.as_str()], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Bulk-update the shared fields of the given renditions, leaving every
    /// translatable column untouched. Returns the number of rows updated.
    pub fn update_shared_fields(
        &self,
        entity_type: EntityType,
        members: &[(String, String)],
        shared: &SharedFields,
    ) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let mut updated = 0;

        for (id, locale) in members {
            updated += conn
                .execute(
                    "UPDATE content_entries
                     SET icon = ?1, show_on_homepage = ?2, category = ?3
                     WHERE entity_type = ?4 AND id = ?5 AND locale = ?6",
                    params![
                        shared.icon,
                        shared.show_on_homepage as i64,
                        shared.category,
                        entity_type.as_str(),
                        id,
                        locale,
                    ],
                )
                .map_err(map_write_error)?;
        }

        Ok(updated)
    }

    fn query_entities(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<ContentEntity>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = match conn.prepare(sql) {
            Ok(stmt) => stmt,
            Err(e) if is_missing_table(&e) => return Ok(Vec::new()),
            Err(e) => return Err(e).context("Failed to prepare content query"),
        };

        let entities = stmt
            .query_map(params, row_to_entity)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read content entries")?;

        Ok(entities)
    }
}

const ENTITY_COLUMNS: &str =
    "entity_type, id, locale, title, description, payload, icon, show_on_homepage, category, created_at";

fn row_to_entity(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContentEntity> {
    let type_str: String = row.get(0)?;
    let entity_type = EntityType::parse(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            format!("unknown entity type '{}'", type_str).into(),
        )
    })?;

    let payload_str: String = row.get(5)?;
    let payload: Value = serde_json::from_str(&payload_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(ContentEntity {
        entity_type,
        id: row.get(1)?,
        locale: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        payload,
        shared: SharedFields {
            icon: row.get(6)?,
            show_on_homepage: row.get::<_, i64>(7)? != 0,
            category: row.get(8)?,
        },
        created_at: row.get(9)?,
    })
}

fn is_missing_table(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("no such table")
    )
}

fn map_write_error(err: rusqlite::Error) -> anyhow::Error {
    if is_missing_table(&err) {
        StoreError::MissingTable.into()
    } else {
        anyhow::Error::new(err).context("Content store write failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    // ==================== Helper Functions ====================

    /// Create a temporary, migrated store for testing
    fn create_test_store() -> (ContentStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test_content.db");
        let store = ContentStore::new(db_path.to_str().unwrap()).expect("Failed to create store");
        (store, temp_dir)
    }

    fn service(id: &str, locale: &str, title: &str) -> ContentEntity {
        ContentEntity::new(EntityType::Service, id, locale, title)
    }

    // ==================== Initialization Tests ====================

    #[test]
    fn test_store_creation() {
        let (store, _temp_dir) = create_test_store();
        assert_eq!(store.count(EntityType::Service).expect("count"), 0);
    }

    #[test]
    fn test_store_reopening_persists_rows() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let path_str = db_path.to_str().unwrap();

        {
            let store = ContentStore::new(path_str).expect("create");
            store
                .upsert(&service("pentest", "en", "Penetration Testing"))
                .expect("upsert");
        }

        {
            let store = ContentStore::new(path_str).expect("reopen");
            assert_eq!(store.count(EntityType::Service).expect("count"), 1);
        }
    }

    #[test]
    fn test_invalid_database_path() {
        let result = ContentStore::new("/non/existent/path/db.db");
        assert!(result.is_err());
    }

    // ==================== Upsert / Get Tests ====================

    #[test]
    fn test_upsert_and_get_roundtrip() {
        let (store, _temp_dir) = create_test_store();

        let mut entity = service("audit", "en", "Security Audit");
        entity.description = Some("Full-scope review".to_string());
        entity.payload = json!({"bullets": ["scope", "report"], "cta": "Book now"});
        entity.shared = SharedFields {
            icon: Some("shield".to_string()),
            show_on_homepage: true,
            category: Some("security".to_string()),
        };

        store.upsert(&entity).expect("upsert");

        let fetched = store
            .get(EntityType::Service, "audit", "en")
            .expect("get")
            .expect("should exist");

        assert_eq!(fetched.id, "audit");
        assert_eq!(fetched.locale, "en");
        assert_eq!(fetched.title, "Security Audit");
        assert_eq!(fetched.description.as_deref(), Some("Full-scope review"));
        assert_eq!(fetched.payload, entity.payload);
        assert_eq!(fetched.shared, entity.shared);
        assert_eq!(fetched.created_at, entity.created_at);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let (store, _temp_dir) = create_test_store();
        let result = store.get(EntityType::Service, "nope", "en").expect("get");
        assert!(result.is_none());
    }

    #[test]
    fn test_upsert_replaces_same_key() {
        let (store, _temp_dir) = create_test_store();

        store.upsert(&service("a", "en", "Old Title")).expect("1st");
        store.upsert(&service("a", "en", "New Title")).expect("2nd");

        assert_eq!(store.count(EntityType::Service).expect("count"), 1);
        let fetched = store
            .get(EntityType::Service, "a", "en")
            .expect("get")
            .expect("exists");
        assert_eq!(fetched.title, "New Title");
    }

    #[test]
    fn test_same_id_different_locale_are_distinct_rows() {
        let (store, _temp_dir) = create_test_store();

        store.upsert(&service("a", "en", "English")).expect("en");
        store.upsert(&service("a", "es", "Spanish")).expect("es");

        assert_eq!(store.count(EntityType::Service).expect("count"), 2);
    }

    #[test]
    fn test_same_id_different_entity_type_are_distinct_rows() {
        let (store, _temp_dir) = create_test_store();

        store.upsert(&service("a", "en", "Service")).expect("svc");
        store
            .upsert(&ContentEntity::new(EntityType::Faq, "a", "en", "FAQ"))
            .expect("faq");

        assert_eq!(store.count(EntityType::Service).expect("count"), 1);
        assert_eq!(store.count(EntityType::Faq).expect("count"), 1);
    }

    // ==================== Delete Tests ====================

    #[test]
    fn test_delete_existing() {
        let (store, _temp_dir) = create_test_store();

        store.upsert(&service("a", "en", "Title")).expect("upsert");
        assert!(store.delete(EntityType::Service, "a", "en").expect("delete"));
        assert_eq!(store.count(EntityType::Service).expect("count"), 0);
    }

    #[test]
    fn test_delete_nonexistent_returns_false() {
        let (store, _temp_dir) = create_test_store();
        assert!(!store.delete(EntityType::Service, "a", "en").expect("delete"));
    }

    #[test]
    fn test_delete_only_targets_one_locale() {
        let (store, _temp_dir) = create_test_store();

        store.upsert(&service("a", "en", "English")).expect("en");
        store.upsert(&service("a", "es", "Spanish")).expect("es");

        store.delete(EntityType::Service, "a", "en").expect("delete");

        assert!(store.get(EntityType::Service, "a", "en").expect("get").is_none());
        assert!(store.get(EntityType::Service, "a", "es").expect("get").is_some());
    }

    // ==================== Query Tests ====================

    #[test]
    fn test_list_by_id_returns_all_locales() {
        let (store, _temp_dir) = create_test_store();

        store.upsert(&service("x", "en", "English")).expect("en");
        store.upsert(&service("x", "es", "Spanish")).expect("es");
        store.upsert(&service("y", "en", "Other")).expect("other");

        let rows = store.list_by_id(EntityType::Service, "x").expect("list");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.id == "x"));
    }

    #[test]
    fn test_list_by_id_insertion_order() {
        let (store, _temp_dir) = create_test_store();

        store.upsert(&service("x", "es", "Spanish")).expect("es");
        store.upsert(&service("x", "en", "English")).expect("en");

        let rows = store.list_by_id(EntityType::Service, "x").expect("list");
        assert_eq!(rows[0].locale, "es", "store order is insertion order");
        assert_eq!(rows[1].locale, "en");
    }

    #[test]
    fn test_list_by_shared_tuple() {
        let (store, _temp_dir) = create_test_store();

        let mut a = service("a", "en", "Gift A");
        a.shared.icon = Some("gift".to_string());
        a.shared.show_on_homepage = true;
        let mut b = service("b", "es", "Gift B");
        b.shared.icon = Some("gift".to_string());
        b.shared.show_on_homepage = true;
        let mut c = service("c", "en", "Other");
        c.shared.icon = Some("shield".to_string());
        c.shared.show_on_homepage = true;

        store.upsert(&a).expect("a");
        store.upsert(&b).expect("b");
        store.upsert(&c).expect("c");

        let rows = store
            .list_by_shared_tuple(EntityType::Service, Some("gift"), true)
            .expect("list");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.id == "a"));
        assert!(rows.iter().any(|r| r.id == "b"));
    }

    #[test]
    fn test_list_by_shared_tuple_null_icon() {
        let (store, _temp_dir) = create_test_store();

        store.upsert(&service("a", "en", "No icon")).expect("a");

        let rows = store
            .list_by_shared_tuple(EntityType::Service, None, false)
            .expect("list");
        assert_eq!(rows.len(), 1, "IS comparison must match NULL icons");
    }

    #[test]
    fn test_list_by_created_at_exact_match_only() {
        let (store, _temp_dir) = create_test_store();

        let mut a = ContentEntity::new(EntityType::Plan, "a", "en", "Starter");
        a.created_at = "2024-03-01T09:00:00+00:00".to_string();
        let b = a.translation_for("es");
        let mut c = ContentEntity::new(EntityType::Plan, "c", "en", "Other");
        c.created_at = "2024-03-01T09:00:01+00:00".to_string();

        store.upsert(&a).expect("a");
        store.upsert(&b).expect("b");
        store.upsert(&c).expect("c");

        let rows = store
            .list_by_created_at(EntityType::Plan, "2024-03-01T09:00:00+00:00")
            .expect("list");
        assert_eq!(rows.len(), 2, "one second off must not match");
    }

    #[test]
    fn test_list_by_type_filters_other_types() {
        let (store, _temp_dir) = create_test_store();

        store.upsert(&service("a", "en", "Service")).expect("svc");
        store
            .upsert(&ContentEntity::new(EntityType::Faq, "q1", "en", "Question"))
            .expect("faq");

        let services = store.list_by_type(EntityType::Service).expect("list");
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].entity_type, EntityType::Service);
    }

    // ==================== Shared-Field Update Tests ====================

    #[test]
    fn test_update_shared_fields_bulk() {
        let (store, _temp_dir) = create_test_store();

        store.upsert(&service("a", "en", "English")).expect("en");
        store.upsert(&service("a", "es", "Spanish")).expect("es");
        store.upsert(&service("a", "de", "German")).expect("de");

        let shared = SharedFields {
            icon: Some("rocket".to_string()),
            show_on_homepage: true,
            category: Some("launch".to_string()),
        };
        let members = vec![
            ("a".to_string(), "es".to_string()),
            ("a".to_string(), "de".to_string()),
        ];

        let updated = store
            .update_shared_fields(EntityType::Service, &members, &shared)
            .expect("update");
        assert_eq!(updated, 2);

        let es = store
            .get(EntityType::Service, "a", "es")
            .expect("get")
            .expect("exists");
        assert_eq!(es.shared, shared);

        // Untargeted row untouched
        let en = store
            .get(EntityType::Service, "a", "en")
            .expect("get")
            .expect("exists");
        assert_eq!(en.shared, SharedFields::default());
    }

    #[test]
    fn test_update_shared_fields_preserves_translatable_columns() {
        let (store, _temp_dir) = create_test_store();

        let mut es = service("a", "es", "Título en español");
        es.description = Some("Descripción".to_string());
        es.payload = json!({"bullets": ["uno", "dos"]});
        store.upsert(&es).expect("upsert");

        let shared = SharedFields {
            icon: Some("gift".to_string()),
            show_on_homepage: true,
            category: None,
        };
        store
            .update_shared_fields(
                EntityType::Service,
                &[("a".to_string(), "es".to_string())],
                &shared,
            )
            .expect("update");

        let fetched = store
            .get(EntityType::Service, "a", "es")
            .expect("get")
            .expect("exists");
        assert_eq!(fetched.title, "Título en español");
        assert_eq!(fetched.description.as_deref(), Some("Descripción"));
        assert_eq!(fetched.payload, json!({"bullets": ["uno", "dos"]}));
        assert_eq!(fetched.shared, shared);
    }

    #[test]
    fn test_update_shared_fields_empty_member_list() {
        let (store, _temp_dir) = create_test_store();
        let updated = store
            .update_shared_fields(EntityType::Service, &[], &SharedFields::default())
            .expect("update");
        assert_eq!(updated, 0);
    }

    #[test]
    fn test_update_shared_fields_missing_member_counts_zero() {
        let (store, _temp_dir) = create_test_store();
        let updated = store
            .update_shared_fields(
                EntityType::Service,
                &[("ghost".to_string(), "en".to_string())],
                &SharedFields::default(),
            )
            .expect("update");
        assert_eq!(updated, 0);
    }

    // ==================== Missing Table Tests ====================

    #[test]
    fn test_unmigrated_reads_degrade_to_empty() {
        let temp_dir = TempDir::new().expect("temp dir");
        let db_path = temp_dir.path().join("bare.db");
        let store = ContentStore::open_existing(db_path.to_str().unwrap()).expect("open");

        assert!(store.get(EntityType::Service, "a", "en").expect("get").is_none());
        assert!(store.list_by_id(EntityType::Service, "a").expect("list").is_empty());
        assert!(store
            .list_by_shared_tuple(EntityType::Service, Some("gift"), true)
            .expect("list")
            .is_empty());
        assert!(store.list_by_type(EntityType::Service).expect("list").is_empty());
        assert_eq!(store.count(EntityType::Service).expect("count"), 0);
    }

    #[test]
    fn test_unmigrated_write_raises_migration_error() {
        let temp_dir = TempDir::new().expect("temp dir");
        let db_path = temp_dir.path().join("bare.db");
        let store = ContentStore::open_existing(db_path.to_str().unwrap()).expect("open");

        let err = store
            .upsert(&service("a", "en", "Title"))
            .expect_err("write should fail");
        assert!(
            err.to_string().contains("run database migrations"),
            "error should be actionable: {}",
            err
        );
        assert!(err.downcast_ref::<StoreError>().is_some());
    }

    // ==================== Entity Helper Tests ====================

    #[test]
    fn test_translation_for_copies_timestamp_and_shared() {
        let mut en = ContentEntity::new(EntityType::Plan, "pro", "en", "Pro Plan");
        en.shared.icon = Some("star".to_string());

        let es = en.translation_for("es");

        assert_eq!(es.locale, "es");
        assert_eq!(es.id, en.id);
        assert_eq!(es.created_at, en.created_at, "timestamp must be byte-identical");
        assert_eq!(es.shared, en.shared);
    }

    #[test]
    fn test_entity_type_parse_roundtrip() {
        for entity_type in EntityType::ALL {
            assert_eq!(EntityType::parse(entity_type.as_str()), Some(entity_type));
        }
        assert_eq!(EntityType::parse("unknown"), None);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_sql_injection_prevention() {
        let (store, _temp_dir) = create_test_store();

        let malicious_id = "x'; DROP TABLE content_entries; --";
        store
            .upsert(&service(malicious_id, "en", "Title"))
            .expect("upsert");

        assert_eq!(store.count(EntityType::Service).expect("count"), 1);
        assert!(store
            .get(EntityType::Service, malicious_id, "en")
            .expect("get")
            .is_some());
    }

    #[test]
    fn test_unicode_title_roundtrip() {
        let (store, _temp_dir) = create_test_store();

        store
            .upsert(&service("a", "de", "Überwachung & Prüfung"))
            .expect("upsert");

        let fetched = store
            .get(EntityType::Service, "a", "de")
            .expect("get")
            .expect("exists");
        assert_eq!(fetched.title, "Überwachung & Prüfung");
    }

    // ==================== Concurrency Tests ====================

    #[test]
    fn test_store_clone_shares_connection() {
        let (store, _temp_dir) = create_test_store();
        let clone = store.clone();

        store.upsert(&service("a", "en", "Title")).expect("upsert");
        assert_eq!(clone.count(EntityType::Service).expect("count"), 1);
    }

    #[test]
    fn test_concurrent_upserts_no_deadlock() {
        let (store, _temp_dir) = create_test_store();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for j in 0..10 {
                        let id = format!("svc-{}-{}", i, j);
                        store
                            .upsert(&service(&id, "en", "Concurrent"))
                            .expect("upsert should not deadlock");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("thread should complete");
        }

        assert_eq!(store.count(EntityType::Service).expect("count"), 80);
    }
}
