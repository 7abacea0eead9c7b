use std::sync::Arc;

use tracing::{debug, error};

use wam_core::{ManifestDocument, ManifestError, ManifestFormat};

use crate::finding::Finding;
use crate::reclassify::reclassify_icon_purpose;
use crate::registry::{PlatformProvider, RuleRegistry};
use crate::runner::{run_rules, RunnerOptions};

/// Validation pipeline: general pass, per-platform passes, provider
/// passes, then reclassification. Construct once, validate many.
pub struct Validator {
    registry: RuleRegistry,
    providers: Vec<Arc<dyn PlatformProvider>>,
    options: RunnerOptions,
}

impl Validator {
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            registry,
            providers: Vec::new(),
            options: RunnerOptions::default(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn PlatformProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate a canonical-format document for the requested platforms.
    /// Business findings are returned as data; only structural problems
    /// reject.
    pub async fn validate(
        &self,
        document: &ManifestDocument,
        platforms: &[String],
    ) -> Result<Vec<Finding>, ManifestError> {
        document.content_object()?;
        if document.format != Some(ManifestFormat::W3c) {
            return Err(ManifestError::NotW3c);
        }

        let content = Arc::new(document.content.clone());
        let mut findings = Vec::new();

        // The general rule set is W3C-shaped; running it against the
        // legacy extension-packaging format would only produce systematic
        // false findings.
        if self.skip_general_pass(platforms) {
            debug!("skipping the general rule set for the extension-only request");
        } else {
            findings.extend(run_rules(&content, self.registry.general(), &self.options).await);
        }

        for platform in platforms {
            findings.extend(run_rules(&content, self.registry.platform(platform), &self.options).await);
        }

        for provider in &self.providers {
            match provider.validation_rules(platforms).await {
                Ok(rules) => {
                    findings.extend(run_rules(&content, &rules, &self.options).await);
                }
                Err(err) => {
                    error!(error = %err, "platform rule provider failed");
                }
            }
        }

        Ok(reclassify_icon_purpose(findings, &document.content))
    }

    fn skip_general_pass(&self, platforms: &[String]) -> bool {
        platforms.len() == 1 && platforms[0] == ManifestFormat::EdgeExtension.as_str()
    }
}

/// One-shot convenience over [`Validator`] with the built-in general rule
/// set.
pub async fn validate_manifest(
    document: &ManifestDocument,
    platforms: &[String],
) -> Result<Vec<Finding>, ManifestError> {
    Validator::new(RuleRegistry::with_general_rules())
        .validate(document, platforms)
        .await
}
