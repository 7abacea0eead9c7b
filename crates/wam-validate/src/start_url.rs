use serde_json::{json, Value};
use url::Url;

use wam_core::{ManifestDocument, ManifestError, ManifestFormat};

/// Validate the manifest's `start_url`, defaulting it to `/`, and resolve
/// it against the hosted site's URL while enforcing the domain-containment
/// policy: the start URL must live on the site's host or on a subdomain of
/// it.
///
/// The subdomain allowance reduces the start hostname to its last two
/// dot-separated labels, an approximate registrable-domain heuristic. It
/// misclassifies multi-label public suffixes such as `co.uk`; known
/// limitation.
pub fn validate_and_normalize_start_url(
    site_url: Option<&str>,
    document: &mut ManifestDocument,
) -> Result<(), ManifestError> {
    if document.format != Some(ManifestFormat::W3c) {
        return Err(ManifestError::NotW3c);
    }

    let content = document.content_object_mut()?;

    let start_url = match content.get("start_url") {
        Some(value) => {
            let start = value.as_str().unwrap_or_default();
            if !is_url_reference(start) {
                return Err(ManifestError::InvalidStartUrl(value.to_string()));
            }
            start.to_string()
        }
        None => {
            content.insert("start_url".into(), json!("/"));
            "/".to_string()
        }
    };

    let Some(site_url) = site_url else {
        return Ok(());
    };

    let site = Url::parse(site_url).map_err(|_| ManifestError::InvalidSiteUrl(site_url.into()))?;
    let site_host = site
        .host_str()
        .ok_or_else(|| ManifestError::InvalidSiteUrl(site_url.into()))?;

    // The policy applies to the start URL's own hostname; a relative
    // start_url has none and resolves onto the site host anyway.
    if let Some(start_host) = host_of(&start_url) {
        if !start_host.eq_ignore_ascii_case(site_host)
            && !registrable_domain(&start_host)
                .is_some_and(|domain| domain.eq_ignore_ascii_case(site_host))
        {
            return Err(ManifestError::DomainMismatch {
                site: site_host.to_string(),
                start_url: start_host,
            });
        }
    }

    let resolved = site
        .join(&start_url)
        .map_err(|_| ManifestError::InvalidStartUrl(start_url.clone()))?;
    content.insert("start_url".into(), json!(resolved.to_string()));
    Ok(())
}

/// Absolute URL, or a reference resolvable against a base.
fn is_url_reference(candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }
    if Url::parse(candidate).is_ok() {
        return true;
    }
    Url::parse("http://localhost/")
        .expect("static base url")
        .join(candidate)
        .is_ok()
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// Last two dot-separated labels of a hostname.
fn registrable_domain(host: &str) -> Option<String> {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return None;
    }
    Some(labels[labels.len() - 2..].join("."))
}
