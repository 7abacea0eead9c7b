use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::finding::{Code, Finding, Level, ALL_PLATFORMS};
use crate::rule::Rule;

/// Extended-scope patterns must be absolute URLs; relative patterns cannot
/// be matched against navigations.
pub struct ExtendedScopeUrlsRule;

#[async_trait]
impl Rule for ExtendedScopeUrlsRule {
    fn id(&self) -> &str {
        "extended-scope-urls"
    }

    async fn evaluate(&self, content: &Value) -> anyhow::Result<Vec<Finding>> {
        let Some(scopes) = content.get("mjs_extended_scope").and_then(Value::as_array) else {
            return Ok(vec![]);
        };

        let mut findings = Vec::new();
        for (index, scope) in scopes.iter().enumerate() {
            let absolute = scope
                .as_str()
                .is_some_and(|s| Url::parse(s).is_ok());
            if !absolute {
                findings.push(Finding {
                    description: "Extended scope entries must be absolute URLs".into(),
                    platform: ALL_PLATFORMS.into(),
                    level: Level::Error,
                    member: format!("/mjs_extended_scope/{index}"),
                    code: Code::RequiredAbsoluteUrl,
                    data: Some(scope.clone()),
                });
            }
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn absolute_patterns_pass() {
        let content = json!({"mjs_extended_scope": ["https://example.com/app/*"]});
        let findings = ExtendedScopeUrlsRule.evaluate(&content).await.unwrap();
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn relative_patterns_are_errors() {
        let content = json!({"mjs_extended_scope": ["https://example.com/*", "app/*"]});
        let findings = ExtendedScopeUrlsRule.evaluate(&content).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].member, "/mjs_extended_scope/1");
        assert_eq!(findings[0].code, Code::RequiredAbsoluteUrl);
    }
}
