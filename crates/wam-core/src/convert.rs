use serde_json::Value;

use crate::error::ManifestError;
use crate::formats::schema_for;
use crate::model::{ManifestDocument, ManifestFormat};

/// Convert `document` into `output_format` (canonical when omitted),
/// routing through the canonical schema. Identity conversions return the
/// document unchanged, stamping the format if it was unset.
pub fn convert_to(
    mut document: ManifestDocument,
    output_format: Option<ManifestFormat>,
) -> Result<ManifestDocument, ManifestError> {
    if !document.content.is_object() {
        return Err(ManifestError::ContentMissing);
    }

    let input = document.format.unwrap_or(ManifestFormat::W3c);
    let output = output_format.unwrap_or(ManifestFormat::W3c);

    if input == output {
        if document.format.is_none() {
            document.format = Some(output);
        }
        return Ok(document);
    }

    // Both legs must exist before any work happens. The canonical schema
    // needs neither: its leg is the identity.
    let to_canonical = match input {
        ManifestFormat::W3c => None,
        other => Some(
            schema_for(other)
                .to_canonical()
                .ok_or(ManifestError::FormatNotRecognized)?,
        ),
    };
    let from_canonical = match output {
        ManifestFormat::W3c => None,
        other => Some(
            schema_for(other)
                .from_canonical()
                .ok_or(ManifestError::FormatNotRecognized)?,
        ),
    };

    let content = document.content_object()?;
    let mut body = match to_canonical {
        Some(convert) => convert(content)?,
        None => content.clone(),
    };
    if let Some(convert) = from_canonical {
        body = convert(&body)?;
    }

    document.content = Value::Object(body);
    document.format = Some(output);
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_conversion_returns_the_document_unchanged() {
        let doc = ManifestDocument::with_format(json!({"start_url": "/"}), ManifestFormat::W3c);
        let before = doc.content.clone();
        let out = convert_to(doc, Some(ManifestFormat::W3c)).unwrap();
        assert_eq!(out.content, before);
        assert_eq!(out.format, Some(ManifestFormat::W3c));
    }

    #[test]
    fn unset_format_is_stamped_with_the_resolved_value() {
        let doc = ManifestDocument::new(json!({"start_url": "/"}));
        let out = convert_to(doc, None).unwrap();
        assert_eq!(out.format, Some(ManifestFormat::W3c));
    }

    #[test]
    fn hosted_app_converts_to_canonical() {
        let doc = ManifestDocument::with_format(
            json!({
                "app": {"launch": {"web_url": "http://mail.example.com/"}},
                "icons": {"64": "icon_64.png", "128": "icon_128.png"}
            }),
            ManifestFormat::ChromeOs,
        );

        let out = convert_to(doc, Some(ManifestFormat::W3c)).unwrap();
        assert_eq!(out.format, Some(ManifestFormat::W3c));
        assert_eq!(out.content["start_url"], json!("http://mail.example.com/"));
        assert_eq!(
            out.content["icons"],
            json!([
                {"sizes": "64x64", "src": "icon_64.png"},
                {"sizes": "128x128", "src": "icon_128.png"}
            ])
        );
    }

    #[test]
    fn converting_to_a_schema_without_a_converter_fails() {
        let doc = ManifestDocument::with_format(json!({"start_url": "/"}), ManifestFormat::W3c);
        let err = convert_to(doc, Some(ManifestFormat::ChromeOs)).unwrap_err();
        assert!(matches!(err, ManifestError::FormatNotRecognized));
    }

    #[test]
    fn missing_content_fails_up_front() {
        let doc = ManifestDocument::new(json!(null));
        let err = convert_to(doc, None).unwrap_err();
        assert!(matches!(err, ManifestError::ContentMissing));
    }

    #[test]
    fn extension_manifest_round_trips_through_identity_converters() {
        let content = json!({"name": "Ext", "author": "Contoso", "version": "1.0"});
        let doc = ManifestDocument::with_format(content.clone(), ManifestFormat::EdgeExtension);
        let out = convert_to(doc, Some(ManifestFormat::W3c)).unwrap();
        assert_eq!(out.content, content);
        assert_eq!(out.format, Some(ManifestFormat::W3c));
    }
}
