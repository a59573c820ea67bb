//! `{{token}}` interpolation for merged content bundles.
//!
//! Substitution runs after merging and only on the string fields a domain
//! has designated; non-string and non-designated fields are never scanned.
//! A token whose key is absent from the context stays verbatim in the
//! output: silent passthrough, not an error.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("token regex is valid")
    })
}

/// The dotted string paths a domain designates for interpolation.
///
/// Only country pages carry runtime tokens today; the other domains render
/// their merged bundles as-is.
pub fn interpolatable_paths(domain: &str) -> &'static [&'static str] {
    match domain {
        "countries" => &[
            "hero.title",
            "hero.subtitle",
            "seo.title",
            "seo.description",
        ],
        _ => &[],
    }
}

/// Substitute every `{{key}}` occurrence in one string from the context.
/// Unknown keys pass through verbatim.
pub fn interpolate_str(input: &str, context: &HashMap<String, String>) -> String {
    token_regex()
        .replace_all(input, |caps: &regex::Captures<'_>| {
            match context.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Apply interpolation to a merged bundle, per designated field.
///
/// Returns a new bundle; the input is not modified. Designated paths that do
/// not resolve to a string in the bundle are skipped.
pub fn interpolate_bundle(
    bundle: &Value,
    domain: &str,
    context: &HashMap<String, String>,
) -> Value {
    let mut result = bundle.clone();

    for path in interpolatable_paths(domain) {
        if let Some(field) = lookup_path_mut(&mut result, path) {
            if let Value::String(s) = field {
                *field = Value::String(interpolate_str(s, context));
            }
        }
    }

    result
}

fn lookup_path_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object_mut()?.get_mut(segment)?;
    }
    Some(current)
}
