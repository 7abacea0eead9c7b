use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use crate::convert::convert_to;
use crate::detect::detect;
use crate::error::ManifestError;
use crate::model::{ManifestDocument, ManifestFormat};

/// Parse raw manifest bytes into a detected document.
///
/// A forced format overrides detection; an undetected manifest falls back
/// to the canonical schema. A detected hosted-app manifest is converted to
/// canonical form straight away and re-detected.
pub fn from_json_bytes(
    data: &[u8],
    forced_format: Option<ManifestFormat>,
) -> Result<ManifestDocument, ManifestError> {
    let content: Value =
        serde_json::from_slice(data).map_err(|_| ManifestError::InvalidManifest)?;
    if !content.is_object() {
        return Err(ManifestError::InvalidManifest);
    }

    let format = match (forced_format, detect(&content)) {
        (Some(forced), _) => {
            warn!(format = %forced, "forcing manifest format");
            forced
        }
        (None, Some(detected)) => detected,
        (None, None) => {
            info!("unable to detect the manifest format, assuming w3c");
            ManifestFormat::W3c
        }
    };
    info!(format = %format, "found manifest");

    let document = ManifestDocument::with_format(content, format);
    if format != ManifestFormat::ChromeOs {
        return Ok(document);
    }

    info!("converting the chromeos manifest to w3c format");
    let converted = convert_to(document, Some(ManifestFormat::W3c))?;
    let redetected = detect(&converted.content);
    Ok(ManifestDocument {
        format: redetected,
        ..converted
    })
}

pub fn from_file(
    path: &Path,
    forced_format: Option<ManifestFormat>,
) -> Result<ManifestDocument> {
    let data = std::fs::read(path).with_context(|| format!("read manifest: {}", path.display()))?;
    Ok(from_json_bytes(&data, forced_format)?)
}

pub fn write_to_file(document: &ManifestDocument, path: &Path) -> Result<()> {
    let content = document.content_object()?;
    let json = serde_json::to_string_pretty(content).context("serialize manifest")?;
    std::fs::write(path, json).with_context(|| format!("write manifest: {}", path.display()))?;
    Ok(())
}
