use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Store
    pub database_path: String,

    // Static content
    pub content_dir: String,

    // Locale handling
    pub default_locale: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Store
            database_path: std::env::var("DATABASE_PATH").context("DATABASE_PATH not set")?,

            // Static content (directory holding locale override documents)
            content_dir: std::env::var("CONTENT_DIR").unwrap_or_else(|_| "content".to_string()),

            // Locale handling
            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),
        })
    }
}
