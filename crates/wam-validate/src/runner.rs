use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinSet;
use tracing::error;

use crate::finding::Finding;
use crate::rule::Rule;

#[derive(Clone, Debug)]
pub struct RunnerOptions {
    /// Upper bound on a single rule invocation. The legacy behavior had no
    /// timeout at all, so a stalled rule stalled the whole pass; the bound
    /// is a deliberate hardening addition.
    pub rule_timeout: Duration,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            rule_timeout: Duration::from_secs(30),
        }
    }
}

/// Run every rule concurrently against `content` and aggregate their
/// findings. All rules are awaited to completion: a rule that fails, times
/// out, or panics is logged and contributes nothing, and its siblings are
/// unaffected. Aggregate order reflects task completion order, not
/// declaration order.
pub async fn run_rules(
    content: &Arc<Value>,
    rules: &[Arc<dyn Rule>],
    options: &RunnerOptions,
) -> Vec<Finding> {
    let mut tasks = JoinSet::new();

    for rule in rules {
        let rule = Arc::clone(rule);
        let content = Arc::clone(content);
        let timeout = options.rule_timeout;

        tasks.spawn(async move {
            let id = rule.id().to_string();
            match tokio::time::timeout(timeout, rule.evaluate(&content)).await {
                Ok(Ok(findings)) => findings,
                Ok(Err(err)) => {
                    error!(rule = %id, error = %err, "validation rule failed");
                    Vec::new()
                }
                Err(_) => {
                    error!(rule = %id, timeout_ms = timeout.as_millis() as u64, "validation rule timed out");
                    Vec::new()
                }
            }
        });
    }

    let mut findings = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(ruled) => findings.extend(ruled),
            Err(err) => error!(error = %err, "validation rule task aborted"),
        }
    }
    findings
}
