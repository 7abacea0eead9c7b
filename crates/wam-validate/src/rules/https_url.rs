use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::finding::{Code, Finding, Level, ALL_PLATFORMS};
use crate::rule::Rule;

pub struct HttpsUrlRequiredRule;

#[async_trait]
impl Rule for HttpsUrlRequiredRule {
    fn id(&self) -> &str {
        "https-url-required"
    }

    async fn evaluate(&self, content: &Value) -> anyhow::Result<Vec<Finding>> {
        let is_https = content
            .get("start_url")
            .and_then(Value::as_str)
            .and_then(|s| Url::parse(s).ok())
            .is_some_and(|url| url.scheme() == "https");

        if is_https {
            return Ok(vec![]);
        }

        Ok(vec![Finding {
            description: "The start URL for the target web site needs to be a HTTPS URL".into(),
            platform: ALL_PLATFORMS.into(),
            level: Level::Warning,
            member: "/start_url".into(),
            code: Code::RequiredHttpsUrl,
            data: None,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn https_start_url_passes() {
        let findings = HttpsUrlRequiredRule
            .evaluate(&json!({"start_url": "https://example.com/"}))
            .await
            .unwrap();
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn http_start_url_warns() {
        let findings = HttpsUrlRequiredRule
            .evaluate(&json!({"start_url": "http://example.com/"}))
            .await
            .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].level, Level::Warning);
        assert_eq!(findings[0].code, Code::RequiredHttpsUrl);
    }

    #[tokio::test]
    async fn relative_and_missing_start_urls_warn() {
        for content in [json!({}), json!({"start_url": "/home"})] {
            let findings = HttpsUrlRequiredRule.evaluate(&content).await.unwrap();
            assert_eq!(findings.len(), 1);
        }
    }
}
