//! Frontmatter extraction from YAML (`---`) or TOML (`+++`) blocks.

use anyhow::{Result, anyhow};
use serde_json::Value;

use super::PostMeta;

/// Extract frontmatter and return `(metadata, body)`.
///
/// Returns `Ok(None)` when the document has no frontmatter block.
pub fn extract_frontmatter(content: &str) -> Result<Option<(PostMeta, &str)>> {
    match detect_frontmatter(content) {
        Some((fm, body, is_toml)) => {
            let meta = if is_toml {
                parse_toml(fm)?
            } else {
                parse_yaml_like(fm)
            };
            Ok(Some((meta, body)))
        }
        None => Ok(None),
    }
}

/// Parse TOML frontmatter.
fn parse_toml(content: &str) -> Result<PostMeta> {
    toml::from_str(content).map_err(|e| anyhow!("Invalid TOML frontmatter: {}", e))
}

/// Parse simple YAML-like frontmatter.
///
/// Supports `key: value` pairs, quoted scalars, flow lists (`[a, b]`),
/// comma lists (`a, b`) and block lists:
///
/// ```text
/// tags:
///   - rust
///   - standalone
/// ```
fn parse_yaml_like(content: &str) -> PostMeta {
    let mut meta = PostMeta::default();
    // Key waiting for `- item` lines
    let mut pending: Option<(String, Vec<String>)> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ")
            && let Some((_, items)) = pending.as_mut()
        {
            items.push(unquote(item.trim()).to_string());
            continue;
        }

        if let Some((key, items)) = pending.take() {
            apply_list(&mut meta, key, items);
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if value.is_empty() {
            pending = Some((key.to_string(), Vec::new()));
            continue;
        }

        match key.to_lowercase().as_str() {
            "title" => meta.title = Some(unquote(value).to_string()),
            "date" => meta.date = Some(unquote(value).to_string()),
            "description" => meta.description = Some(unquote(value).to_string()),
            "slug" => meta.slug = Some(unquote(value).to_string()),
            "draft" => meta.draft = value.eq_ignore_ascii_case("true"),
            "tags" => meta.tags = split_list(value),
            _ => {
                // Custom field -> extra (preserve original key case)
                meta.extra.insert(key.to_string(), parse_yaml_value(value));
            }
        }
    }

    if let Some((key, items)) = pending.take() {
        apply_list(&mut meta, key, items);
    }

    meta
}

/// Store a block list collected under `key`.
fn apply_list(meta: &mut PostMeta, key: String, items: Vec<String>) {
    if key.eq_ignore_ascii_case("tags") {
        meta.tags = items;
    } else if !items.is_empty() {
        meta.extra.insert(
            key,
            Value::Array(items.into_iter().map(Value::String).collect()),
        );
    }
}

/// Split `a, b` or `[a, "b"]` into trimmed, unquoted items.
fn split_list(value: &str) -> Vec<String> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    inner
        .split(',')
        .map(|s| unquote(s.trim()).to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2
            && let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote))
        {
            return inner;
        }
    }
    s
}

/// Parse a YAML-like value string to JSON value
///
/// Supports:
/// - Booleans: `true`, `false`
/// - Numbers: `123`, `3.14`
/// - Arrays: `a, b, c` or `[a, b, c]` -> `["a", "b", "c"]`
/// - Strings: everything else (quotes stripped)
fn parse_yaml_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }

    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }

    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }

    let quoted = unquote(s);
    if quoted.len() != s.len() {
        return Value::String(quoted.to_string());
    }

    if s.starts_with('[') || s.contains(',') {
        return Value::Array(split_list(s).into_iter().map(Value::String).collect());
    }

    Value::String(s.to_string())
}

/// Detect and extract frontmatter.
/// Returns `(frontmatter, body, is_toml)` if found.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if let Some(rest) = trimmed.strip_prefix(fence)
            && let Some(end) = rest.find(&format!("\n{fence}"))
        {
            let fm = rest[..end].trim();
            let body = rest[end + 1 + fence.len()..].trim_start_matches(['\r', '\n']);
            return Some((fm, body, is_toml));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: a, b\n---\n\n# Body";
        let (meta, body) = extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(meta.title, Some("Hello".to_string()));
        assert_eq!(meta.date, Some("2024-01-01".to_string()));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_yaml_quoted_values() {
        let content = "---\ntitle: \"Colons: everywhere\"\ndate: \"2019-03-07T12:00:00.000Z\"\ndescription: 'short'\n---\n";
        let (meta, _) = extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(meta.title.as_deref(), Some("Colons: everywhere"));
        assert_eq!(meta.date.as_deref(), Some("2019-03-07T12:00:00.000Z"));
        assert_eq!(meta.description.as_deref(), Some("short"));
    }

    #[test]
    fn test_yaml_flow_and_block_lists() {
        let content = "---\ntags: [\"standalone\", notes]\n---\n";
        let (meta, _) = extract_frontmatter(content).unwrap().unwrap();
        assert_eq!(meta.tags, vec!["standalone", "notes"]);

        let content = "---\ntitle: Now\ntags:\n  - standalone\n  - \"meta\"\ndraft: true\n---\n";
        let (meta, _) = extract_frontmatter(content).unwrap().unwrap();
        assert_eq!(meta.tags, vec!["standalone", "meta"]);
        assert!(meta.draft);
        assert_eq!(meta.title.as_deref(), Some("Now"));
    }

    #[test]
    fn test_yaml_extra_fields() {
        let content =
            "---\ntitle: Hello\ncustom: world\ncount: 42\nflag: true\nitems: x, y, z\n---\n";
        let (meta, _) = extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(meta.extra.get("custom"), Some(&serde_json::json!("world")));
        assert_eq!(meta.extra.get("count"), Some(&serde_json::json!(42)));
        assert_eq!(meta.extra.get("flag"), Some(&serde_json::json!(true)));
        assert_eq!(
            meta.extra.get("items"),
            Some(&serde_json::json!(["x", "y", "z"]))
        );
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ndate = 2023-03-15\ntags = [\"a\", \"b\"]\n+++\n\n# Body";
        let (meta, body) = extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(meta.title, Some("Hello".to_string()));
        assert_eq!(meta.date.as_deref(), Some("2023-03-15"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_invalid_toml_frontmatter() {
        let content = "+++\ntitle = \n+++\n";
        assert!(extract_frontmatter(content).is_err());
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(extract_frontmatter("# Just content").unwrap().is_none());
        assert!(extract_frontmatter("---\nnever closed").unwrap().is_none());
    }

    #[test]
    fn test_crlf_body() {
        let content = "---\r\ntitle: Hello\r\n---\r\nBody";
        let (meta, body) = extract_frontmatter(content).unwrap().unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(body, "Body");
    }
}
