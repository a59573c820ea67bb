//! Preview binary - prints the merged, interpolated content bundle for one
//! (domain, locale) pair exactly as the page renderer would receive it.
//!
//! Usage:
//!   cargo run --bin preview -- pricing es
//!   cargo run --bin preview -- countries de country=Germany currency=EUR
//!
//! Optional environment variables:
//! - CONTENT_DIR (defaults to "content")

use anyhow::{bail, Result};
use locale_content::content::{interpolate, BundleCache, OverrideRegistry};
use locale_content::locales::Locale;
use std::collections::HashMap;
use std::path::Path;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_content=info".parse().unwrap()),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("Usage: preview <domain> <locale> [key=value ...]");
    }

    let domain = &args[0];
    let locale = Locale::from_code(&args[1])?;

    // Remaining args become the interpolation context
    let mut context = HashMap::new();
    for pair in &args[2..] {
        match pair.split_once('=') {
            Some((key, value)) => {
                context.insert(key.to_string(), value.to_string());
            }
            None => bail!("Context argument '{}' is not key=value", pair),
        }
    }

    let content_dir = std::env::var("CONTENT_DIR").unwrap_or_else(|_| "content".to_string());
    let cache = BundleCache::new(OverrideRegistry::new(Path::new(&content_dir)));

    let bundle = cache.bundle(domain, locale.code())?;
    let rendered = interpolate::interpolate_bundle(&bundle, domain, &context);

    println!("--- {} / {} ---", domain, locale.code());
    println!("{}", serde_json::to_string_pretty(&rendered)?);

    Ok(())
}
