use serde_json::{Map, Value};

use crate::formats::{is_extension_member, ManifestSchema};
use crate::model::ManifestFormat;

const VALID_ROOT_PROPERTIES: &[&str] = &[
    "name",
    "short_name",
    "scope",
    "icons",
    "display",
    "orientation",
    "start_url",
    "lang",
    "theme_color",
    "dir",
    "description",
    "related_applications",
    "prefer_related_applications",
    "background_color",
];

const VALID_ICON_PROPERTIES: &[&str] = &["sizes", "src", "type", "purpose"];

/// The canonical/base schema. All conversions route through it, so it
/// carries no converters of its own.
pub struct W3cSchema;

impl ManifestSchema for W3cSchema {
    fn id(&self) -> ManifestFormat {
        ManifestFormat::W3c
    }

    fn matches(&self, content: &Map<String, Value>) -> bool {
        for (prop, value) in content {
            let lower = prop.to_ascii_lowercase();
            if !VALID_ROOT_PROPERTIES.contains(&lower.as_str()) && !is_extension_member(&lower) {
                return false;
            }

            if lower == "icons" {
                let Some(icons) = value.as_array() else {
                    return false;
                };
                for icon in icons {
                    let Some(icon) = icon.as_object() else {
                        return false;
                    };
                    let ok = icon.keys().all(|p| {
                        let lower = p.to_ascii_lowercase();
                        VALID_ICON_PROPERTIES.contains(&lower.as_str())
                            || is_extension_member(&lower)
                    });
                    if !ok {
                        return false;
                    }
                }
            }
        }

        true
    }
}
