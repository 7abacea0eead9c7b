use async_trait::async_trait;
use serde_json::Value;

use crate::finding::{Code, Finding, Level, ALL_PLATFORMS};
use crate::rule::Rule;

/// `mjs_access_whitelist` was superseded by `mjs_extended_scope`.
pub struct DeprecatedMembersRule;

#[async_trait]
impl Rule for DeprecatedMembersRule {
    fn id(&self) -> &str {
        "deprecated-members"
    }

    async fn evaluate(&self, content: &Value) -> anyhow::Result<Vec<Finding>> {
        if content.get("mjs_access_whitelist").is_none() {
            return Ok(vec![]);
        }

        Ok(vec![Finding {
            description:
                "The mjs_access_whitelist member is deprecated. Use mjs_extended_scope instead"
                    .into(),
            platform: ALL_PLATFORMS.into(),
            level: Level::Warning,
            member: "/mjs_access_whitelist".into(),
            code: Code::DeprecatedMember,
            data: None,
        }])
    }
}
