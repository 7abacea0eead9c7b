use serde_json::Value;
use tracing::debug;

use crate::finding::{Finding, Level};

/// Tokens a manifest icon `purpose` may carry.
pub const ICON_PURPOSE_VALUES: &[&str] = &["any", "maskable", "monochrome"];

/// Downgrade the known class of false-positive findings: the generic
/// schema check treats an icon `purpose` as a single enumerated value,
/// but the member is in practice a space-delimited multi-value string.
/// An error finding at `/icons/<i>/purpose` whose underlying value
/// contains at least one legal token becomes a warning.
///
/// Only members under the `icons` collection are considered;
/// `purpose`-named fields under `shortcuts` or `screenshots` pass through
/// untouched.
pub fn reclassify_icon_purpose(findings: Vec<Finding>, content: &Value) -> Vec<Finding> {
    findings
        .into_iter()
        .map(|finding| {
            if finding.level != Level::Error {
                return finding;
            }
            let Some(index) = icon_purpose_index(&finding.member) else {
                return finding;
            };
            if !purpose_is_acceptable(content, index) {
                return finding;
            }
            debug!(member = %finding.member, "downgrading multi-value icon purpose finding");
            Finding {
                level: Level::Warning,
                ..finding
            }
        })
        .collect()
}

fn icon_purpose_index(member: &str) -> Option<usize> {
    let path = member.strip_prefix('/').unwrap_or(member);
    let segments: Vec<&str> = path.split('/').collect();
    match segments.as_slice() {
        ["icons", index, "purpose"] => index.parse().ok(),
        _ => None,
    }
}

fn purpose_is_acceptable(content: &Value, index: usize) -> bool {
    content
        .get("icons")
        .and_then(Value::as_array)
        .and_then(|icons| icons.get(index))
        .and_then(|icon| icon.get("purpose"))
        .and_then(Value::as_str)
        .map(|purpose| {
            purpose
                .split_whitespace()
                .any(|token| ICON_PURPOSE_VALUES.contains(&token.to_ascii_lowercase().as_str()))
        })
        .unwrap_or(false)
}
