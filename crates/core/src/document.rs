use serde::{Deserialize, Deserializer, Serialize};

pub const UNKNOWN_LEVEL: &str = "未知层级";
pub const UNKNOWN_TITLE: &str = "未知标题";
pub const UNKNOWN_DATE: &str = "未知日期";
pub const UNKNOWN_SOURCE: &str = "未知来源";
pub const NO_CONTENT: &str = "无内容";

/// A policy record as delivered by the crawler/storage layer.
///
/// Every field is optional: records scraped from different sites are
/// routinely missing one or more of them. Use [`Document::resolve`] to get
/// a fully populated view with placeholders substituted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Issuing authority / administrative tier.
    #[serde(default, deserialize_with = "lenient_string")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pub_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
}

/// Resolved document metadata with placeholders for missing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyInfo {
    pub id: String,
    pub title: String,
    pub level: String,
    pub pub_date: String,
    pub source: String,
    pub content: String,
}

impl Document {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Substitute placeholders for absent or blank metadata.
    ///
    /// Blank content is kept as-is; only an absent body becomes `无内容`.
    pub fn resolve(&self) -> PolicyInfo {
        PolicyInfo {
            id: self.id.clone().unwrap_or_default(),
            title: or_placeholder(&self.title, UNKNOWN_TITLE),
            level: or_placeholder(&self.level, UNKNOWN_LEVEL),
            pub_date: or_placeholder(&self.pub_date, UNKNOWN_DATE),
            source: or_placeholder(&self.source, UNKNOWN_SOURCE),
            content: self
                .content
                .clone()
                .unwrap_or_else(|| NO_CONTENT.to_string()),
        }
    }
}

fn or_placeholder(field: &Option<String>, placeholder: &str) -> String {
    match field {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => placeholder.to_string(),
    }
}

/// Accept strings, numbers and booleans; anything else (null, arrays,
/// objects) is treated as missing.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
