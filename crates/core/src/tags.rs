//! Style tag lists and tag-usage normalization.
//!
//! A style's tags are an ordered `Vec<String>` everywhere except the
//! `styles.tags_json` column, where they are stored as a JSON array.
//! [`encode_tags`] and [`decode_tags`] are the only crossing points.

/// Default number of entries returned by the hot-tags endpoint.
pub const DEFAULT_HOT_LIMIT: i64 = 20;

/// Upper bound for the hot-tags `limit` parameter.
pub const MAX_HOT_LIMIT: i64 = 100;

/// Serialize a tag list for the `tags_json` column.
pub fn encode_tags(tags: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tags)
}

/// Parse the `tags_json` column. An empty column decodes to an empty list.
pub fn decode_tags(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

/// Normalize a tag for usage statistics: trimmed and lowercased.
///
/// Returns `None` for blank input.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let normalized = tag.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    Some(normalized)
}

/// Normalize a batch of copied tags, dropping blanks but keeping duplicates
/// so that each occurrence is counted.
pub fn normalize_batch<'a, I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    tags.into_iter().filter_map(|t| normalize_tag(t)).collect()
}

/// Clamp a requested hot-tags limit into `1..=MAX_HOT_LIMIT`.
pub fn clamp_hot_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_HOT_LIMIT).clamp(1, MAX_HOT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_survive_the_column_encoding() {
        let tags = vec!["lo-fi".to_string(), "Jazz Hop".to_string(), "夜".to_string()];
        let raw = encode_tags(&tags).unwrap();
        assert_eq!(raw, r#"["lo-fi","Jazz Hop","夜"]"#);
        assert_eq!(decode_tags(&raw).unwrap(), tags);
    }

    #[test]
    fn blank_column_decodes_to_empty_list() {
        assert!(decode_tags("").unwrap().is_empty());
        assert!(decode_tags("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_column_is_an_error() {
        assert!(decode_tags("not json").is_err());
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_tag("  Lo-Fi "), Some("lo-fi".to_string()));
        assert_eq!(normalize_tag("   "), None);
        assert_eq!(normalize_tag(&"X".repeat(150)), Some("x".repeat(150)));
    }

    #[test]
    fn batch_keeps_duplicates_and_drops_blanks() {
        let input = vec![
            "Lo-Fi".to_string(),
            " lo-fi ".to_string(),
            "".to_string(),
            "Jazz".to_string(),
        ];
        assert_eq!(normalize_batch(&input), ["lo-fi", "lo-fi", "jazz"]);
    }

    #[test]
    fn hot_limit_is_clamped() {
        assert_eq!(clamp_hot_limit(None), DEFAULT_HOT_LIMIT);
        assert_eq!(clamp_hot_limit(Some(0)), 1);
        assert_eq!(clamp_hot_limit(Some(500)), MAX_HOT_LIMIT);
        assert_eq!(clamp_hot_limit(Some(7)), 7);
    }
}
