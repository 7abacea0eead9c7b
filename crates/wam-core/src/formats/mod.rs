pub mod chromeos;
pub mod edgeextension;
pub mod w3c;

use serde_json::{Map, Value};

use crate::error::ManifestError;
use crate::model::ManifestFormat;

pub use chromeos::ChromeOsSchema;
pub use edgeextension::EdgeExtensionSchema;
pub use w3c::W3cSchema;

/// Stateless conversion step between a schema and the canonical form.
pub type ConvertFn = fn(&Map<String, Value>) -> Result<Map<String, Value>, ManifestError>;

/// Static descriptor for one registered manifest schema.
pub trait ManifestSchema: Send + Sync {
    fn id(&self) -> ManifestFormat;

    /// Structural predicate: does `content` conform to this schema?
    fn matches(&self, content: &Map<String, Value>) -> bool;

    /// Converter into canonical form; `None` when the schema does not
    /// support it. The canonical schema itself returns `None` (the
    /// conversion engine short-circuits that leg).
    fn to_canonical(&self) -> Option<ConvertFn> {
        None
    }

    /// Converter out of canonical form; `None` when unsupported.
    fn from_canonical(&self) -> Option<ConvertFn> {
        None
    }
}

static CHROME_OS: ChromeOsSchema = ChromeOsSchema;
static EDGE_EXTENSION: EdgeExtensionSchema = EdgeExtensionSchema;
static W3C: W3cSchema = W3cSchema;

// Registration order doubles as the detection tie-break: platform schemas
// first, the canonical schema last as the default. Intentional, not
// accidental.
static CATALOG: &[&dyn ManifestSchema] = &[&CHROME_OS, &EDGE_EXTENSION, &W3C];

pub fn catalog() -> &'static [&'static dyn ManifestSchema] {
    CATALOG
}

pub fn schema_for(format: ManifestFormat) -> &'static dyn ManifestSchema {
    match format {
        ManifestFormat::W3c => &W3C,
        ManifestFormat::ChromeOs => &CHROME_OS,
        ManifestFormat::EdgeExtension => &EDGE_EXTENSION,
    }
}

/// Extension members carry an application-defined namespace prefix, e.g.
/// `mjs_extended_scope`. A leading underscore does not qualify.
pub fn is_extension_member(name: &str) -> bool {
    name.find('_').is_some_and(|i| i > 0)
}

/// Allow-list pass shared by every matcher: each property must be a known
/// member (case-insensitive) or an extension member.
pub(crate) fn properties_allowed(content: &Map<String, Value>, allowed: &[&str]) -> bool {
    content.keys().all(|prop| {
        let lower = prop.to_ascii_lowercase();
        allowed.contains(&lower.as_str()) || is_extension_member(&lower)
    })
}

/// Required-property pass: every listed name must be present,
/// case-insensitively.
pub(crate) fn properties_present(content: &Map<String, Value>, required: &[&str]) -> bool {
    required
        .iter()
        .all(|req| content.keys().any(|prop| prop.eq_ignore_ascii_case(req)))
}

pub(crate) fn identity(content: &Map<String, Value>) -> Result<Map<String, Value>, ManifestError> {
    Ok(content.clone())
}
