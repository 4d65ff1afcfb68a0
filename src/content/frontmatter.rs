//! Untyped frontmatter records.
//!
//! A [`FrontmatterRecord`] holds whatever the leading YAML block of a
//! document decoded to. Typed accessors return `None` both for missing keys
//! and for values of the wrong shape, so coercion can fall back to defaults.

use serde_yaml::{Mapping, Value};

use crate::i18n::Localized;

/// Key-value pairs decoded from a document's YAML frontmatter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontmatterRecord {
    fields: Mapping,
}

impl FrontmatterRecord {
    /// Parse YAML text into a record.
    ///
    /// Malformed YAML, or YAML that is not a mapping, is logged and yields an
    /// empty record. This never fails.
    pub fn parse(yaml: &str) -> Self {
        if yaml.trim().is_empty() {
            return Self::default();
        }

        match serde_yaml::from_str::<Value>(yaml) {
            Ok(Value::Mapping(fields)) => Self { fields },
            Ok(Value::Null) => Self::default(),
            Ok(other) => {
                tracing::warn!(
                    kind = value_kind(&other),
                    "frontmatter is not a mapping; ignoring it"
                );
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse frontmatter");
                Self::default()
            }
        }
    }

    pub fn from_mapping(fields: Mapping) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Get the raw value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.fields.get(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        let value = self.get(key)?;
        value.as_str().or_else(|| wrong_shape(key, "string", value))
    }

    /// Like [`get_str`](Self::get_str), but empty strings count as missing.
    pub fn get_non_empty_str(&self, key: &str) -> Option<&str> {
        self.get_str(key).filter(|s| !s.is_empty())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        let value = self.get(key)?;
        value.as_bool().or_else(|| wrong_shape(key, "boolean", value))
    }

    /// Get an integer. Integral floats (`3.0`) are accepted.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| f as i64)
            })
            .or_else(|| wrong_shape(key, "integer", value))
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        let value = self.get(key)?;
        value
            .as_u64()
            .or_else(|| wrong_shape(key, "non-negative integer", value))
    }

    /// Get a list of strings. Non-string entries are skipped.
    pub fn get_string_list(&self, key: &str) -> Option<Vec<String>> {
        let value = self.get(key)?;
        let Some(items) = value.as_sequence() else {
            return wrong_shape(key, "list", value);
        };

        let list = items
            .iter()
            .filter_map(|item| match item.as_str() {
                Some(s) => Some(s.to_string()),
                None => {
                    tracing::debug!(key, value = ?item, "skipping non-string list entry");
                    None
                }
            })
            .collect();
        Some(list)
    }

    /// Get a bilingual value.
    ///
    /// A mapping reads its `ja` and `en` keys (missing keys become empty).
    /// A plain string is used for both locales.
    pub fn get_localized(&self, key: &str) -> Option<Localized> {
        let value = self.get(key)?;
        match value {
            Value::String(s) => Some(Localized::uniform(s.clone())),
            Value::Mapping(map) => {
                let text = |lang: &str| {
                    map.get(lang)
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                };
                Some(Localized::new(text("ja"), text("en")))
            }
            other => wrong_shape(key, "bilingual mapping", other),
        }
    }

    /// Get a nested mapping as its own record.
    pub fn get_record(&self, key: &str) -> Option<FrontmatterRecord> {
        let value = self.get(key)?;
        match value {
            Value::Mapping(map) => Some(FrontmatterRecord::from_mapping(map.clone())),
            other => wrong_shape(key, "mapping", other),
        }
    }
}

fn wrong_shape<T>(key: &str, expected: &str, value: &Value) -> Option<T> {
    tracing::debug!(
        key,
        expected,
        found = value_kind(value),
        "frontmatter value has unexpected shape; using default"
    );
    None
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_mapping() {
        let record = FrontmatterRecord::parse("id: post-1\npublished: true\norder: 2\n");
        assert_eq!(record.len(), 3);
        assert_eq!(record.get_str("id"), Some("post-1"));
        assert_eq!(record.get_bool("published"), Some(true));
        assert_eq!(record.get_i64("order"), Some(2));
    }

    #[test]
    fn test_parse_malformed_yaml_is_empty() {
        let record = FrontmatterRecord::parse("title: [unclosed\n  - nope: :");
        assert!(record.is_empty());
    }

    #[test]
    fn test_parse_non_mapping_is_empty() {
        assert!(FrontmatterRecord::parse("- a\n- b\n").is_empty());
        assert!(FrontmatterRecord::parse("just a string").is_empty());
        assert!(FrontmatterRecord::parse("   \n").is_empty());
    }

    #[test]
    fn test_unquoted_date_is_a_string() {
        let record = FrontmatterRecord::parse("publishedAt: 2024-01-01");
        assert_eq!(record.get_str("publishedAt"), Some("2024-01-01"));
    }

    #[test]
    fn test_wrong_shapes_are_none() {
        let record = FrontmatterRecord::parse("tags: rust\nfeatured: yes please\norder: first");
        assert_eq!(record.get_string_list("tags"), None);
        assert_eq!(record.get_bool("featured"), None);
        assert_eq!(record.get_i64("order"), None);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let record = FrontmatterRecord::parse("thumbnail:\n");
        assert!(record.get("thumbnail").is_none());
        assert_eq!(record.get_str("thumbnail"), None);
    }

    #[test]
    fn test_integral_float_order() {
        let record = FrontmatterRecord::parse("order: 3.0\nother: 3.5");
        assert_eq!(record.get_i64("order"), Some(3));
        assert_eq!(record.get_i64("other"), None);
    }

    #[test]
    fn test_string_list_skips_non_strings() {
        let record = FrontmatterRecord::parse("tags:\n  - Rust\n  - 42\n  - Svelte\n");
        assert_eq!(
            record.get_string_list("tags"),
            Some(vec!["Rust".to_string(), "Svelte".to_string()])
        );
    }

    #[test]
    fn test_localized_from_mapping_and_string() {
        let record = FrontmatterRecord::parse(
            "title:\n  ja: こんにちは\n  en: Hello\ndescription:\n  en: Only English\nsummary: Both\n",
        );
        assert_eq!(
            record.get_localized("title"),
            Some(Localized::new("こんにちは", "Hello"))
        );
        assert_eq!(
            record.get_localized("description"),
            Some(Localized::new("", "Only English"))
        );
        assert_eq!(record.get_localized("summary"), Some(Localized::uniform("Both")));
    }

    #[test]
    fn test_nested_record() {
        let record = FrontmatterRecord::parse(
            "images:\n  thumbnail: /img/a.png\n  gallery:\n    - /img/b.png\n",
        );
        let images = record.get_record("images").unwrap();
        assert_eq!(images.get_str("thumbnail"), Some("/img/a.png"));
        assert_eq!(
            images.get_string_list("gallery"),
            Some(vec!["/img/b.png".to_string()])
        );
    }
}
