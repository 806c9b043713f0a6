//! Field-level validation of link attributes.
//!
//! Storage engines never validate; the HTTP layer runs these checks before
//! calling into the [`LinkStorage`][crate::LinkStorage] contract.

use crate::link::{
    Link, NewLink, MAX_COMMENT_CHARS, MAX_ORIGINAL_URL_CHARS, MAX_SHORT_NAME_CHARS,
};
use std::fmt::Display;
use thiserror::Error;
use url::Url;

/// Short names that would shadow the service's own routes.
pub const RESERVED_SHORT_NAMES: &[&str] = &["api", "swagger", "metrics", "health"];

/// A single failed rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The attribute name as it appears on the wire (e.g. `shortName`).
    pub field: &'static str,
    /// The rule that failed (e.g. `required`, `urlscheme`).
    pub rule: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "field validation for '{}' failed on the '{}' rule",
            self.field, self.rule
        )
    }
}

/// Every rule that failed while validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed on {} field rule(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, rule: &'static str) {
        self.errors.push(FieldError { field, rule });
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Validates a link about to be created. An empty short name is accepted
/// and means "generate one".
pub fn validate_new_link(link: &NewLink) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Some(rule) = check_short_name(&link.short_name) {
        errors.push("shortName", rule);
    }
    if let Some(rule) = check_original_url(&link.original_url) {
        errors.push("originalUrl", rule);
    }
    if let Some(rule) = check_comment(&link.comment) {
        errors.push("comment", rule);
    }
    errors.into_result()
}

/// Validates a full replacement of a stored link. Updates never generate
/// aliases, so the short name is required.
pub fn validate_link(link: &Link) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if link.short_name.is_empty() {
        errors.push("shortName", "required");
    } else if let Some(rule) = check_short_name(&link.short_name) {
        errors.push("shortName", rule);
    }
    if let Some(rule) = check_original_url(&link.original_url) {
        errors.push("originalUrl", rule);
    }
    if let Some(rule) = check_comment(&link.comment) {
        errors.push("comment", rule);
    }
    errors.into_result()
}

fn check_short_name(short_name: &str) -> Option<&'static str> {
    if short_name.is_empty() {
        return None;
    }

    if short_name.chars().count() > MAX_SHORT_NAME_CHARS {
        return Some("max");
    }

    if !short_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Some("shortname");
    }

    if RESERVED_SHORT_NAMES.contains(&short_name) {
        return Some("reserved");
    }

    None
}

fn check_original_url(original_url: &str) -> Option<&'static str> {
    if original_url.is_empty() {
        return Some("required");
    }

    if original_url.chars().count() > MAX_ORIGINAL_URL_CHARS {
        return Some("max");
    }

    let Ok(url) = Url::parse(original_url) else {
        return Some("url");
    };

    match url.scheme() {
        "http" | "https" => None,
        _ => Some("urlscheme"),
    }
}

fn check_comment(comment: &str) -> Option<&'static str> {
    (comment.chars().count() > MAX_COMMENT_CHARS).then_some("max")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::LinkId;

    fn rules(result: Result<(), ValidationErrors>) -> Vec<(&'static str, &'static str)> {
        result
            .err()
            .map(|e| e.errors.into_iter().map(|f| (f.field, f.rule)).collect())
            .unwrap_or_default()
    }

    #[test]
    fn valid_new_links() {
        assert!(validate_new_link(&NewLink::new("", "https://example.com")).is_ok());
        assert!(validate_new_link(&NewLink::new("abc-123", "http://example.com/x?y=1")).is_ok());
        assert!(validate_new_link(&NewLink::new("ABC", "https://example.com")).is_ok());
    }

    #[test]
    fn invalid_short_name_characters() {
        for name in ["abc def", "abc/def", "abc_def", "ÄÖÜ", "a.b"] {
            assert_eq!(
                rules(validate_new_link(&NewLink::new(name, "https://example.com"))),
                vec![("shortName", "shortname")],
                "{name}"
            );
        }
    }

    #[test]
    fn reserved_short_names() {
        for name in RESERVED_SHORT_NAMES {
            assert_eq!(
                rules(validate_new_link(&NewLink::new(*name, "https://example.com"))),
                vec![("shortName", "reserved")]
            );
        }
    }

    #[test]
    fn invalid_urls() {
        assert_eq!(
            rules(validate_new_link(&NewLink::new("abc", ""))),
            vec![("originalUrl", "required")]
        );
        assert_eq!(
            rules(validate_new_link(&NewLink::new("abc", "not a url"))),
            vec![("originalUrl", "url")]
        );
        assert_eq!(
            rules(validate_new_link(&NewLink::new("abc", "ftp://example.com"))),
            vec![("originalUrl", "urlscheme")]
        );
    }

    #[test]
    fn reports_every_failed_field() {
        assert_eq!(
            rules(validate_new_link(&NewLink::new("a b", "mailto:me@example.com"))),
            vec![("shortName", "shortname"), ("originalUrl", "urlscheme")]
        );
    }

    #[test]
    fn update_requires_short_name() {
        let link = NewLink::new("", "https://example.com").into_link(LinkId::new(1));
        assert_eq!(rules(validate_link(&link)), vec![("shortName", "required")]);

        let link = NewLink::new("abc", "https://example.com").into_link(LinkId::new(1));
        assert!(validate_link(&link).is_ok());
    }

    #[test]
    fn over_length_fields() {
        let link = NewLink::new("a".repeat(MAX_SHORT_NAME_CHARS + 1), "https://example.com")
            .with_comment("c".repeat(MAX_COMMENT_CHARS + 1));
        assert_eq!(
            rules(validate_new_link(&link)),
            vec![("shortName", "max"), ("comment", "max")]
        );

        let url = format!("https://example.com/{}", "p".repeat(MAX_ORIGINAL_URL_CHARS));
        let link = NewLink::new("abc", url).into_link(LinkId::new(1));
        assert_eq!(rules(validate_link(&link)), vec![("originalUrl", "max")]);

        let link = NewLink::new("a".repeat(MAX_SHORT_NAME_CHARS), "https://example.com")
            .with_comment("c".repeat(MAX_COMMENT_CHARS));
        assert!(validate_new_link(&link).is_ok());
    }
}
