use serde_json::Value;

use crate::formats::catalog;
use crate::model::ManifestFormat;

/// Return the first schema in catalog order whose structural matcher
/// accepts `content`, or `None` when nothing matches (or the value is not
/// a JSON object).
pub fn detect(content: &Value) -> Option<ManifestFormat> {
    let content = content.as_object()?;
    catalog()
        .iter()
        .find(|schema| schema.matches(content))
        .map(|schema| schema.id())
}
