use serde_json::{json, Map, Value};

use crate::error::ManifestError;
use crate::formats::{properties_allowed, properties_present, ConvertFn, ManifestSchema};
use crate::model::ManifestFormat;

// see https://developer.chrome.com/webstore/hosted_apps
const REQUIRED_ROOT_PROPERTIES: &[&str] = &["name", "version", "manifest_version", "app"];

const VALID_ROOT_PROPERTIES: &[&str] = &[
    "name",
    "description",
    "version",
    "manifest_version",
    "app",
    "background_page",
    "icons",
    "key",
    "minimum_chrome_version",
    "offline_enabled",
    "permissions",
    "update_url",
    "default_locale",
];

const VALID_APP_PROPERTIES: &[&str] = &["urls", "launch"];
const VALID_APP_LAUNCH_PROPERTIES: &[&str] = &["web_url", "container", "height", "width"];

/// Legacy hosted-app schema: launch URL nested under `app.launch`, icons as
/// a size-keyed map.
pub struct ChromeOsSchema;

impl ManifestSchema for ChromeOsSchema {
    fn id(&self) -> ManifestFormat {
        ManifestFormat::ChromeOs
    }

    fn matches(&self, content: &Map<String, Value>) -> bool {
        if !properties_present(content, REQUIRED_ROOT_PROPERTIES) {
            return false;
        }

        let Some(launch) = content
            .get("app")
            .and_then(|app| app.get("launch"))
            .and_then(Value::as_object)
        else {
            return false;
        };
        if !launch.contains_key("web_url") {
            return false;
        }

        if !properties_allowed(content, VALID_ROOT_PROPERTIES) {
            return false;
        }

        let Some(app) = content.get("app").and_then(Value::as_object) else {
            return false;
        };
        if !properties_allowed(app, VALID_APP_PROPERTIES) {
            return false;
        }
        properties_allowed(launch, VALID_APP_LAUNCH_PROPERTIES)
    }

    fn to_canonical(&self) -> Option<ConvertFn> {
        Some(convert_to_base)
    }
}

fn convert_to_base(content: &Map<String, Value>) -> Result<Map<String, Value>, ManifestError> {
    let launch_url = content
        .get("app")
        .and_then(|app| app.get("launch"))
        .and_then(|launch| launch.get("web_url"))
        .and_then(Value::as_str)
        .ok_or(ManifestError::MemberMissing("app.launch.web_url"))?;

    let mut manifest = Map::new();
    manifest.insert("start_url".into(), json!(launch_url));
    manifest.insert("icons".into(), Value::Array(flatten_icons(content.get("icons"))));

    if let Some(locale) = non_empty_str(content.get("default_locale")) {
        manifest.insert("lang".into(), json!(locale));
    }

    // short_name wins over name as the canonical name
    if let Some(name) = non_empty_str(content.get("name")) {
        manifest.insert("name".into(), json!(name));
    }
    if let Some(short_name) = non_empty_str(content.get("short_name")) {
        manifest.insert("name".into(), json!(short_name));
    }

    let app_urls = content
        .get("app")
        .and_then(|app| app.get("urls"))
        .and_then(Value::as_array);
    let scope_patterns = app_urls.map(|urls| {
        let mut seen: Vec<&str> = Vec::new();
        let mut patterns = Vec::new();
        for url in urls.iter().filter_map(Value::as_str) {
            if !seen.contains(&url) {
                seen.push(url);
                patterns.push(scope_pattern(url.trim()));
            }
        }
        patterns
    });

    if let Some(patterns) = &scope_patterns {
        manifest.insert("mjs_extended_scope".into(), json!(patterns));
    }

    if let Some(permissions) = content.get("permissions").and_then(Value::as_array) {
        let access = permissions
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let mut api_access = vec![access_entry(&scope_pattern(launch_url), &access)];
        for pattern in scope_patterns.iter().flatten() {
            api_access.push(access_entry(pattern, &access));
        }
        manifest.insert("mjs_api_access".into(), Value::Array(api_access));
    }

    Ok(manifest)
}

/// Flatten a `{"64": "icon_64.png"}` size map into canonical icon entries,
/// in ascending numeric size order.
fn flatten_icons(icons: Option<&Value>) -> Vec<Value> {
    let Some(icons) = icons.and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut sizes: Vec<&String> = icons.keys().collect();
    sizes.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });

    sizes
        .into_iter()
        .map(|size| {
            json!({
                "sizes": format!("{size}x{size}"),
                "src": icons[size].clone(),
            })
        })
        .collect()
}

/// Trailing slash becomes a wildcard suffix: `http://a/` -> `http://a/*`.
fn scope_pattern(url: &str) -> String {
    match url.strip_suffix('/') {
        Some(prefix) => format!("{prefix}/*"),
        None => url.to_string(),
    }
}

fn access_entry(pattern: &str, access: &str) -> Value {
    json!({ "match": pattern, "platform": "chrome", "access": access })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
