use async_trait::async_trait;
use serde_json::Value;

use crate::finding::Finding;

/// A validation rule: receives canonical manifest content and yields zero
/// or more findings, or fails. Rule failures are isolated by the runner;
/// they never abort sibling rules.
#[async_trait]
pub trait Rule: Send + Sync {
    fn id(&self) -> &str;

    async fn evaluate(&self, content: &Value) -> anyhow::Result<Vec<Finding>>;
}
