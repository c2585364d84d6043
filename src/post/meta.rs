//! Post metadata from frontmatter.

use serde::{Deserialize, Serialize};

/// Arbitrary frontmatter fields, in source order.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Accept both a string and a native TOML datetime (`date = 2023-03-15`).
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<toml::Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s)),
        Some(toml::Value::Datetime(dt)) => Ok(Some(dt.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a date string, found {}",
            other.type_str()
        ))),
    }
}

/// Post metadata from frontmatter
///
/// # Standard Fields
///
/// | Field         | Type          | Description                          |
/// |---------------|---------------|--------------------------------------|
/// | `title`       | `String`      | Post title (falls back to the slug)  |
/// | `date`        | `String`      | Publication date, ISO 8601           |
/// | `description` | `String`      | Summary (falls back to the excerpt)  |
/// | `slug`        | `String`      | URL path override                    |
/// | `tags`        | `Vec<String>` | Tags; some exclude a post from lists |
/// | `draft`       | `bool`        | Draft status (default: false)        |
///
/// Any other field is kept in `extra` and passed through to the archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PostMeta {
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub draft: bool,
    #[serde(flatten)]
    pub extra: JsonMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_meta_deserialize() {
        let json = r#"{"title": "Hello", "draft": true, "tags": ["rust", "web"]}"#;
        let meta: PostMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert!(meta.draft);
        assert_eq!(meta.tags, vec!["rust", "web"]);
    }

    #[test]
    fn test_post_meta_null_tags() {
        let meta: PostMeta = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_post_meta_extra_fields() {
        let json = r#"{"title": "Test", "custom_field": "value", "number": 42}"#;
        let meta: PostMeta = serde_json::from_str(json).unwrap();
        assert_eq!(
            meta.extra.get("custom_field").and_then(|v| v.as_str()),
            Some("value")
        );
        assert_eq!(meta.extra.get("number").and_then(|v| v.as_i64()), Some(42));
    }

    #[test]
    fn test_toml_native_date() {
        let meta: PostMeta = toml::from_str("date = 2023-03-15").unwrap();
        assert_eq!(meta.date.as_deref(), Some("2023-03-15"));

        let meta: PostMeta = toml::from_str("date = 2023-03-15T08:30:00Z").unwrap();
        assert_eq!(meta.date.as_deref(), Some("2023-03-15T08:30:00Z"));

        let meta: PostMeta = toml::from_str("date = \"2023-03-15\"").unwrap();
        assert_eq!(meta.date.as_deref(), Some("2023-03-15"));
    }

    #[test]
    fn test_non_string_date_rejected() {
        assert!(toml::from_str::<PostMeta>("date = 20230315").is_err());
    }
}
