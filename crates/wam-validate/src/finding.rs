use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel platform id for findings that apply to every platform.
pub const ALL_PLATFORMS: &str = "general";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
    Suggestion,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Code {
    RequiredValue,
    InvalidValue,
    MissingImage,
    MissingImageGroup,
    RequiredAbsoluteUrl,
    RequiredHttpsUrl,
    DeprecatedMember,
}

/// A single validation outcome tied to a manifest member. Findings are
/// data returned to the caller, never errors: the caller decides whether
/// error-level findings block a build.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Finding {
    pub description: String,
    pub platform: String,
    pub level: Level,
    /// Path-like member reference, e.g. `/icons/0/purpose`.
    pub member: String,
    pub code: Code,
    /// Auxiliary payload, e.g. the list of missing icon sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_and_codes_serialize_to_the_wire_vocabulary() {
        assert_eq!(serde_json::to_value(Level::Error).unwrap(), json!("error"));
        assert_eq!(serde_json::to_value(Level::Suggestion).unwrap(), json!("suggestion"));
        assert_eq!(serde_json::to_value(Code::RequiredValue).unwrap(), json!("required-value"));
        assert_eq!(serde_json::to_value(Code::MissingImageGroup).unwrap(), json!("missing-image-group"));
        assert_eq!(serde_json::to_value(Code::RequiredHttpsUrl).unwrap(), json!("required-https-url"));
        assert_eq!(serde_json::to_value(Code::DeprecatedMember).unwrap(), json!("deprecated-member"));
    }

    #[test]
    fn data_is_omitted_when_absent() {
        let finding = Finding {
            description: "test".into(),
            platform: ALL_PLATFORMS.into(),
            level: Level::Warning,
            member: "/name".into(),
            code: Code::RequiredValue,
            data: None,
        };
        let v = serde_json::to_value(&finding).unwrap();
        assert!(v.get("data").is_none());
        assert_eq!(v["platform"], json!("general"));
    }
}
