use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::rule::Rule;

/// Static rule registry, populated via explicit registration calls at
/// startup. The general set applies to every platform; platform sets are
/// opt-in per validation request and are never merged globally.
#[derive(Default)]
pub struct RuleRegistry {
    general: Vec<Arc<dyn Rule>>,
    platforms: BTreeMap<String, Vec<Arc<dyn Rule>>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in general rule set.
    pub fn with_general_rules() -> Self {
        let mut registry = Self::new();
        for rule in crate::rules::general_rules() {
            registry.register_general(rule);
        }
        registry
    }

    pub fn register_general(&mut self, rule: Arc<dyn Rule>) {
        self.general.push(rule);
    }

    pub fn register_platform(&mut self, platform: impl Into<String>, rule: Arc<dyn Rule>) {
        self.platforms.entry(platform.into()).or_default().push(rule);
    }

    pub fn general(&self) -> &[Arc<dyn Rule>] {
        &self.general
    }

    /// The ordered rule set registered for one platform; empty when the
    /// platform is unknown.
    pub fn platform(&self, platform: &str) -> &[Arc<dyn Rule>] {
        self.platforms.get(platform).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// External platform collaborator: supplies platform-scoped rules and may
/// itself perform I/O. A failing provider is logged and skipped; it never
/// aborts validation.
#[async_trait]
pub trait PlatformProvider: Send + Sync {
    async fn validation_rules(&self, platforms: &[String]) -> anyhow::Result<Vec<Arc<dyn Rule>>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Finding;
    use async_trait::async_trait;
    use serde_json::Value;

    struct NoopRule(&'static str);

    #[async_trait]
    impl Rule for NoopRule {
        fn id(&self) -> &str {
            self.0
        }

        async fn evaluate(&self, _content: &Value) -> anyhow::Result<Vec<Finding>> {
            Ok(vec![])
        }
    }

    #[test]
    fn platform_sets_are_isolated() {
        let mut registry = RuleRegistry::new();
        registry.register_general(Arc::new(NoopRule("g")));
        registry.register_platform("windows", Arc::new(NoopRule("w1")));
        registry.register_platform("windows", Arc::new(NoopRule("w2")));
        registry.register_platform("android", Arc::new(NoopRule("a")));

        assert_eq!(registry.general().len(), 1);
        assert_eq!(registry.platform("windows").len(), 2);
        assert_eq!(registry.platform("android").len(), 1);
        assert!(registry.platform("ios").is_empty());
    }

    #[test]
    fn platform_rules_keep_registration_order() {
        let mut registry = RuleRegistry::new();
        registry.register_platform("windows", Arc::new(NoopRule("first")));
        registry.register_platform("windows", Arc::new(NoopRule("second")));

        let ids: Vec<_> = registry.platform("windows").iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }
}
