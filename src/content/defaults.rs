//! Default content trees: the canonical, schema-defining content object for
//! each domain, in the source language.
//!
//! These are compiled into the binary and always present. A locale override
//! document may replace any subtree, but the default tree defines the
//! contract: keys that do not exist here never reach the rendered output.

use serde_json::{json, Value};
use std::sync::OnceLock;

/// All content domains with a compiled default tree.
pub const DOMAINS: [&str; 3] = ["pricing", "integrations", "countries"];

/// The default content tree for a domain, or `None` for an unknown domain.
pub fn default_tree(domain: &str) -> Option<&'static Value> {
    match domain {
        "pricing" => Some(pricing_tree()),
        "integrations" => Some(integrations_tree()),
        "countries" => Some(countries_tree()),
        _ => None,
    }
}

fn pricing_tree() -> &'static Value {
    static TREE: OnceLock<Value> = OnceLock::new();
    TREE.get_or_init(|| {
        json!({
            "hero": {
                "title": "Simple, transparent pricing",
                "subtitle": "Start free, upgrade when the team grows."
            },
            "billing_note": "All prices in USD, billed monthly. Cancel anytime.",
            "metrics": [
                { "label": "Uptime", "value": "99.9%" },
                { "label": "Countries covered", "value": "40+" },
                { "label": "Support response", "value": "< 2h" }
            ],
            "faq": {
                "title": "Frequently asked questions",
                "contact_hint": "Still have questions? Talk to our team."
            },
            "cta": {
                "label": "Start your free trial",
                "href": "/signup"
            }
        })
    })
}

fn integrations_tree() -> &'static Value {
    static TREE: OnceLock<Value> = OnceLock::new();
    TREE.get_or_init(|| {
        json!({
            "hero": {
                "title": "Works with the tools you already use",
                "subtitle": "Connect payroll, HR and accounting in minutes."
            },
            "categories": [
                { "slug": "payroll", "title": "Payroll" },
                { "slug": "hr", "title": "HR platforms" },
                { "slug": "accounting", "title": "Accounting" }
            ],
            "request": {
                "title": "Missing an integration?",
                "body": "Tell us what you need and we will build it.",
                "cta_label": "Request an integration"
            }
        })
    })
}

fn countries_tree() -> &'static Value {
    static TREE: OnceLock<Value> = OnceLock::new();
    TREE.get_or_init(|| {
        json!({
            "hero": {
                "title": "Hire in {{country}} with confidence",
                "subtitle": "Everything you need to employ talent in {{country}}, without opening a local entity."
            },
            "sections": {
                "overview": {
                    "title": "Overview",
                    "body": "Employment regulations, payroll cadence and mandatory benefits at a glance."
                },
                "onboarding": {
                    "title": "Onboarding",
                    "body": "Compliant contracts generated and signed in days, not months."
                }
            },
            "facts": [
                { "label": "Currency", "value": "{{currency}}" },
                { "label": "Payroll frequency", "value": "Monthly" }
            ],
            "seo": {
                "title": "Hiring employees in {{country}}",
                "description": "A practical guide to employment, payroll and benefits in {{country}}."
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_domain_has_a_tree() {
        for domain in DOMAINS {
            let tree = default_tree(domain);
            assert!(tree.is_some(), "missing default tree for {}", domain);
            assert!(tree.unwrap().is_object(), "{} tree must be an object", domain);
        }
    }

    #[test]
    fn test_unknown_domain_has_no_tree() {
        assert!(default_tree("careers").is_none());
        assert!(default_tree("").is_none());
    }

    #[test]
    fn test_trees_are_singletons() {
        let a = default_tree("pricing").unwrap();
        let b = default_tree("pricing").unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_countries_tree_carries_tokens() {
        let tree = default_tree("countries").unwrap();
        let title = tree["hero"]["title"].as_str().unwrap();
        assert!(title.contains("{{country}}"));
    }
}
