use async_trait::async_trait;
use serde_json::Value;

use crate::finding::{Code, Finding, Level, ALL_PLATFORMS};
use crate::rule::Rule;

/// A short name is required to label the generated app; the full name
/// substitutes when present.
pub struct ShortNameRequiredRule;

#[async_trait]
impl Rule for ShortNameRequiredRule {
    fn id(&self) -> &str {
        "short-name-required"
    }

    async fn evaluate(&self, content: &Value) -> anyhow::Result<Vec<Finding>> {
        let named = ["short_name", "name"].iter().any(|member| {
            content
                .get(*member)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.trim().is_empty())
        });

        if named {
            return Ok(vec![]);
        }

        Ok(vec![Finding {
            description: "A short name for the application is required".into(),
            platform: ALL_PLATFORMS.into(),
            level: Level::Error,
            member: "/short_name".into(),
            code: Code::RequiredValue,
            data: None,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_names_are_an_error() {
        let findings = ShortNameRequiredRule.evaluate(&json!({})).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, Code::RequiredValue);
        assert_eq!(findings[0].member, "/short_name");
    }

    #[tokio::test]
    async fn a_blank_short_name_does_not_count() {
        let findings = ShortNameRequiredRule
            .evaluate(&json!({"short_name": "  "}))
            .await
            .unwrap();
        assert_eq!(findings.len(), 1);
    }

    #[tokio::test]
    async fn name_substitutes_for_short_name() {
        let findings = ShortNameRequiredRule
            .evaluate(&json!({"name": "Sample App"}))
            .await
            .unwrap();
        assert!(findings.is_empty());
    }
}
