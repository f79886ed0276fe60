use serde_json::Value;

use crate::models::{MetaTag, TagStatus};

const FALLBACK_NAME: &str = "JSON-LD";
const INVALID_ADVICE: &str = "Invalid JSON-LD structure. Check the syntax.";

/// Grade one `application/ld+json` block. Decode failures become a warning
/// tag and never abort the analysis.
pub fn grade_json_ld(raw: &str) -> MetaTag {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Null) | Err(_) => {
            tracing::debug!(len = raw.len(), "Invalid JSON-LD block");
            MetaTag::new(FALLBACK_NAME, raw, TagStatus::Warning)
                .with_recommendation(Some(INVALID_ADVICE))
        }
        Ok(value) => MetaTag::new(schema_type(&value), raw, TagStatus::Good),
    }
}

/// The block's `@type`. Multi-typed nodes are joined with ", ".
fn schema_type(value: &Value) -> String {
    let name = match value.get("@type") {
        Some(Value::String(kind)) => kind.clone(),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    };

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_block_uses_schema_type() {
        let tag = grade_json_ld(r#"{"@context":"https://schema.org","@type":"Article"}"#);
        assert_eq!(tag.name, "Article");
        assert_eq!(tag.status, TagStatus::Good);
        assert!(tag.recommendation.is_none());
        assert!(tag.tag_type.is_none());
    }

    #[test]
    fn valid_block_without_type_uses_fallback_name() {
        let tag = grade_json_ld(r#"{"@context":"https://schema.org"}"#);
        assert_eq!(tag.name, "JSON-LD");
        assert_eq!(tag.status, TagStatus::Good);
    }

    #[test]
    fn top_level_array_uses_fallback_name() {
        let tag = grade_json_ld(r#"[{"@type":"Person"}]"#);
        assert_eq!(tag.name, "JSON-LD");
        assert_eq!(tag.status, TagStatus::Good);
    }

    #[test]
    fn multi_typed_node_joins_types() {
        let tag = grade_json_ld(r#"{"@type":["Article","NewsArticle"]}"#);
        assert_eq!(tag.name, "Article, NewsArticle");
    }

    #[test]
    fn invalid_json_warns() {
        let tag = grade_json_ld("{bad json");
        assert_eq!(tag.name, "JSON-LD");
        assert_eq!(tag.content, "{bad json");
        assert_eq!(tag.status, TagStatus::Warning);
        assert_eq!(tag.recommendation.as_deref(), Some(INVALID_ADVICE));
    }

    #[test]
    fn empty_block_warns() {
        let tag = grade_json_ld("");
        assert_eq!(tag.status, TagStatus::Warning);
        assert_eq!(tag.content, "");
    }

    #[test]
    fn null_document_warns() {
        assert_eq!(grade_json_ld("null").status, TagStatus::Warning);
    }
}
