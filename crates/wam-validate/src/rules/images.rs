use async_trait::async_trait;
use serde_json::{json, Value};

use crate::finding::{Code, Finding, Level};
use crate::rule::Rule;

/// Check that every required icon size is present. Returns a
/// `missing-image` finding listing the absent sizes, or `None` when all
/// are present. Exported for platform rule authors.
pub fn image_validation(
    content: &Value,
    description: &str,
    platform: &str,
    level: Level,
    required_sizes: &[String],
) -> Option<Finding> {
    let finding = |data: Vec<String>| Finding {
        description: description.to_string(),
        platform: platform.to_string(),
        level,
        member: "/icons".into(),
        code: Code::MissingImage,
        data: Some(json!(data)),
    };

    let Some(icons) = content.get("icons").and_then(Value::as_array).filter(|a| !a.is_empty())
    else {
        return Some(finding(required_sizes.to_vec()));
    };

    let missing: Vec<String> = required_sizes
        .iter()
        .filter(|required| {
            !icons
                .iter()
                .any(|icon| icon.get("sizes").and_then(Value::as_str) == Some(required.as_str()))
        })
        .cloned()
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(finding(missing))
    }
}

/// Check that at least one icon of the group is present. Returns a
/// `missing-image-group` warning listing the acceptable sizes, or `None`
/// when one matches. Exported for platform rule authors.
pub fn image_group_validation(
    content: &Value,
    description: &str,
    platform: &str,
    valid_sizes: &[String],
) -> Option<Finding> {
    let satisfied = content
        .get("icons")
        .and_then(Value::as_array)
        .is_some_and(|icons| {
            icons.iter().any(|icon| {
                icon.get("sizes")
                    .and_then(Value::as_str)
                    .is_some_and(|sizes| valid_sizes.iter().any(|valid| valid == sizes))
            })
        });

    if satisfied {
        return None;
    }

    Some(Finding {
        description: description.to_string(),
        platform: platform.to_string(),
        level: Level::Warning,
        member: "/icons".into(),
        code: Code::MissingImageGroup,
        data: Some(json!(valid_sizes)),
    })
}

/// Registrable wrapper around [`image_validation`].
pub struct IconSizesRule {
    pub description: String,
    pub platform: String,
    pub level: Level,
    pub required_sizes: Vec<String>,
}

#[async_trait]
impl Rule for IconSizesRule {
    fn id(&self) -> &str {
        "icon-sizes"
    }

    async fn evaluate(&self, content: &Value) -> anyhow::Result<Vec<Finding>> {
        Ok(image_validation(
            content,
            &self.description,
            &self.platform,
            self.level,
            &self.required_sizes,
        )
        .into_iter()
        .collect())
    }
}

/// Registrable wrapper around [`image_group_validation`].
pub struct IconGroupRule {
    pub description: String,
    pub platform: String,
    pub valid_sizes: Vec<String>,
}

#[async_trait]
impl Rule for IconGroupRule {
    fn id(&self) -> &str {
        "icon-group"
    }

    async fn evaluate(&self, content: &Value) -> anyhow::Result<Vec<Finding>> {
        Ok(
            image_group_validation(content, &self.description, &self.platform, &self.valid_sizes)
                .into_iter()
                .collect(),
        )
    }
}
