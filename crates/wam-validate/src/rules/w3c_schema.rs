use async_trait::async_trait;
use serde_json::Value;

use wam_core::is_extension_member;

use crate::finding::{Code, Finding, Level, ALL_PLATFORMS};
use crate::reclassify::ICON_PURPOSE_VALUES;
use crate::rule::Rule;

const DISPLAY_VALUES: &[&str] = &["fullscreen", "standalone", "minimal-ui", "browser"];
const ORIENTATION_VALUES: &[&str] = &[
    "any",
    "natural",
    "landscape",
    "landscape-primary",
    "landscape-secondary",
    "portrait",
    "portrait-primary",
    "portrait-secondary",
];
const DIR_VALUES: &[&str] = &["ltr", "rtl", "auto"];

const STRING_MEMBERS: &[&str] = &[
    "name",
    "short_name",
    "description",
    "lang",
    "scope",
    "start_url",
    "theme_color",
    "background_color",
];

const KNOWN_MEMBERS: &[&str] = &[
    "name",
    "short_name",
    "description",
    "lang",
    "scope",
    "start_url",
    "theme_color",
    "background_color",
    "dir",
    "display",
    "orientation",
    "prefer_related_applications",
    "related_applications",
    "icons",
];

/// Member-shape checks over the canonical schema: enum members, typed
/// members, icon entries, and a warning for unrecognized non-extension
/// members.
///
/// The icon `purpose` check treats the member as a single enumerated
/// value. A space-delimited multi-value string therefore produces an
/// error finding here; the reclassification step downgrades it when one
/// of the tokens is legal.
pub struct W3cSchemaRule;

#[async_trait]
impl Rule for W3cSchemaRule {
    fn id(&self) -> &str {
        "w3c-schema"
    }

    async fn evaluate(&self, content: &Value) -> anyhow::Result<Vec<Finding>> {
        let Some(content) = content.as_object() else {
            return Ok(vec![]);
        };

        let mut findings = Vec::new();

        for member in STRING_MEMBERS {
            if let Some(value) = content.get(*member) {
                if !value.is_string() {
                    findings.push(invalid_value(member, "must be a string"));
                }
            }
        }

        check_enum(content.get("dir"), "dir", DIR_VALUES, &mut findings);
        check_enum(content.get("display"), "display", DISPLAY_VALUES, &mut findings);
        check_enum(content.get("orientation"), "orientation", ORIENTATION_VALUES, &mut findings);

        if let Some(value) = content.get("prefer_related_applications") {
            if !value.is_boolean() {
                findings.push(invalid_value("prefer_related_applications", "must be a boolean"));
            }
        }

        if let Some(value) = content.get("related_applications") {
            if !value.is_array() {
                findings.push(invalid_value("related_applications", "must be an array"));
            }
        }

        if let Some(icons) = content.get("icons") {
            check_icons(icons, &mut findings);
        }

        for member in content.keys() {
            let lower = member.to_ascii_lowercase();
            if !KNOWN_MEMBERS.contains(&lower.as_str()) && !is_extension_member(&lower) {
                findings.push(Finding {
                    description: format!("The {member} member is not a recognized W3C manifest member"),
                    platform: ALL_PLATFORMS.into(),
                    level: Level::Warning,
                    member: format!("/{member}"),
                    code: Code::InvalidValue,
                    data: None,
                });
            }
        }

        Ok(findings)
    }
}

fn check_enum(value: Option<&Value>, member: &str, allowed: &[&str], findings: &mut Vec<Finding>) {
    let Some(value) = value else { return };
    let valid = value
        .as_str()
        .is_some_and(|s| allowed.contains(&s.to_ascii_lowercase().as_str()));
    if !valid {
        findings.push(invalid_value(member, &format!("must be one of: {}", allowed.join(", "))));
    }
}

fn check_icons(icons: &Value, findings: &mut Vec<Finding>) {
    let Some(icons) = icons.as_array() else {
        findings.push(invalid_value("icons", "must be an array"));
        return;
    };

    for (index, icon) in icons.iter().enumerate() {
        let Some(icon) = icon.as_object() else {
            findings.push(invalid_value(&format!("icons/{index}"), "must be an object"));
            continue;
        };

        if !icon.get("src").is_some_and(Value::is_string) {
            findings.push(Finding {
                description: "An icon requires a src member".into(),
                platform: ALL_PLATFORMS.into(),
                level: Level::Error,
                member: format!("/icons/{index}/src"),
                code: Code::RequiredValue,
                data: None,
            });
        }

        if let Some(purpose) = icon.get("purpose") {
            let valid = purpose
                .as_str()
                .is_some_and(|s| ICON_PURPOSE_VALUES.contains(&s.to_ascii_lowercase().as_str()));
            if !valid {
                findings.push(invalid_value(
                    &format!("icons/{index}/purpose"),
                    &format!("must be one of: {}", ICON_PURPOSE_VALUES.join(", ")),
                ));
            }
        }
    }
}

fn invalid_value(member: &str, constraint: &str) -> Finding {
    Finding {
        description: format!("The {member} member {constraint}"),
        platform: ALL_PLATFORMS.into(),
        level: Level::Error,
        member: format!("/{member}"),
        code: Code::InvalidValue,
        data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn eval(content: Value) -> Vec<Finding> {
        W3cSchemaRule.evaluate(&content).await.unwrap()
    }

    #[tokio::test]
    async fn flags_invalid_enum_and_typed_members() {
        let findings = eval(json!({
            "name": "Sample App",
            "description": "Web App Sample",
            "short_name": "Sample",
            "display": "test",
            "orientation": "any",
            "dir": "invalidValue",
            "prefer_related_applications": "testValue"
        }))
        .await;

        let mut members: Vec<_> = findings.iter().map(|f| f.member.as_str()).collect();
        members.sort_unstable();
        assert_eq!(members, vec!["/dir", "/display", "/prefer_related_applications"]);
        for finding in &findings {
            assert_eq!(finding.level, Level::Error);
            assert_eq!(finding.platform, ALL_PLATFORMS);
        }
    }

    #[tokio::test]
    async fn warns_on_unknown_members() {
        let findings = eval(json!({
            "name": "Sample App",
            "short_name": "Sample",
            "unknownMember": "test"
        }))
        .await;

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].level, Level::Warning);
        assert_eq!(findings[0].member, "/unknownMember");
    }

    #[tokio::test]
    async fn extension_members_are_not_flagged() {
        let findings = eval(json!({
            "name": "Sample App",
            "mjs_extended_scope": ["https://example.com/*"]
        }))
        .await;
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn a_valid_manifest_yields_no_findings() {
        let findings = eval(json!({
            "name": "Sample App",
            "description": "Web App Sample",
            "short_name": "Sample",
            "start_url": "http://www.test.com",
            "orientation": "any",
            "display": "fullscreen",
            "prefer_related_applications": false,
            "dir": "ltr"
        }))
        .await;
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn multi_value_purpose_is_an_error_here() {
        let findings = eval(json!({
            "icons": [{"src": "icon.png", "purpose": "any maskable"}]
        }))
        .await;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].member, "/icons/0/purpose");
        assert_eq!(findings[0].level, Level::Error);
    }

    #[tokio::test]
    async fn single_legal_purpose_is_accepted() {
        let findings = eval(json!({
            "icons": [{"src": "icon.png", "purpose": "maskable"}]
        }))
        .await;
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn icons_missing_src_are_flagged() {
        let findings = eval(json!({"icons": [{"sizes": "64x64"}]})).await;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].member, "/icons/0/src");
        assert_eq!(findings[0].code, Code::RequiredValue);
    }
}
