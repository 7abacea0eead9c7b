use serde_json::{Map, Value};

use crate::formats::{identity, properties_allowed, properties_present, ConvertFn, ManifestSchema};
use crate::model::ManifestFormat;

const REQUIRED_ROOT_PROPERTIES: &[&str] = &["name", "author", "version"];

const VALID_ROOT_PROPERTIES: &[&str] = &[
    "name",
    "author",
    "version",
    "default_locale",
    "description",
    "manifest_version",
    "icons",
    "content_security_policy",
    "browser_action",
    "page_action",
    "background",
    "commands",
    "content_scripts",
    "externally_connectable",
    "homepage_url",
    "addressbar",
    "options_page",
    "permissions",
    "optional_permissions",
    "web_accessible_resources",
    "minimum_edge_version",
    "key",
    "-ms-preload",
];

/// Legacy browser-extension packaging schema. Structurally unrelated to the
/// canonical schema; its converters are identity transforms and the
/// general rule set is skipped for it at validation time.
pub struct EdgeExtensionSchema;

impl ManifestSchema for EdgeExtensionSchema {
    fn id(&self) -> ManifestFormat {
        ManifestFormat::EdgeExtension
    }

    fn matches(&self, content: &Map<String, Value>) -> bool {
        properties_present(content, REQUIRED_ROOT_PROPERTIES)
            && properties_allowed(content, VALID_ROOT_PROPERTIES)
    }

    fn to_canonical(&self) -> Option<ConvertFn> {
        Some(identity)
    }

    fn from_canonical(&self) -> Option<ConvertFn> {
        Some(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn matches_an_extension_manifest() {
        let content = obj(json!({
            "name": "Extension",
            "author": "Contoso",
            "version": "1.0.0",
            "browser_action": {"default_icon": "icon.png"}
        }));
        assert!(EdgeExtensionSchema.matches(&content));
    }

    #[test]
    fn requires_name_author_and_version() {
        let content = obj(json!({"name": "Extension", "version": "1.0.0"}));
        assert!(!EdgeExtensionSchema.matches(&content));
    }

    #[test]
    fn rejects_unknown_root_properties() {
        let content = obj(json!({
            "name": "Extension",
            "author": "Contoso",
            "version": "1.0.0",
            "sidebar": {}
        }));
        assert!(!EdgeExtensionSchema.matches(&content));
    }
}
