use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ManifestError;

/// Identifier of a registered manifest schema.
///
/// `W3c` is the canonical hub format; every conversion routes through it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    W3c,
    #[serde(rename = "chromeos")]
    ChromeOs,
    #[serde(rename = "edgeextension")]
    EdgeExtension,
}

impl ManifestFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestFormat::W3c => "w3c",
            ManifestFormat::ChromeOs => "chromeos",
            ManifestFormat::EdgeExtension => "edgeextension",
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManifestFormat {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w3c" => Ok(ManifestFormat::W3c),
            "chromeos" => Ok(ManifestFormat::ChromeOs),
            "edgeextension" => Ok(ManifestFormat::EdgeExtension),
            _ => Err(ManifestError::FormatNotRecognized),
        }
    }
}

/// A manifest body plus the metadata the pipeline tracks alongside it.
///
/// `content` is mutated in place by conversion and start-url normalization;
/// callers that need the pristine body clone the document first.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDocument {
    pub content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ManifestFormat>,
    /// True when the document was synthesized rather than loaded.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_from: Option<String>,
    /// Stamped by callers before persisting provenance, never by the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ManifestDocument {
    pub fn new(content: Value) -> Self {
        Self {
            content,
            format: None,
            generated: false,
            generated_url: None,
            generated_from: None,
            timestamp: None,
        }
    }

    pub fn with_format(content: Value, format: ManifestFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::new(content)
        }
    }

    /// The manifest body as an object map, or `ContentMissing` when the
    /// document holds anything other than a JSON object.
    pub fn content_object(&self) -> Result<&Map<String, Value>, ManifestError> {
        self.content.as_object().ok_or(ManifestError::ContentMissing)
    }

    pub fn content_object_mut(&mut self) -> Result<&mut Map<String, Value>, ManifestError> {
        self.content.as_object_mut().ok_or(ManifestError::ContentMissing)
    }
}
