use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest content is empty or not initialized.")]
    ContentMissing,
    #[error("Manifest format is not recognized.")]
    FormatNotRecognized,
    #[error("The manifest passed as argument is not a W3C manifest.")]
    NotW3c,
    #[error("Invalid manifest format.")]
    InvalidManifest,
    #[error("The manifest's start_url member is not a valid URL: '{0}'")]
    InvalidStartUrl(String),
    #[error("The site URL is not a valid URL: '{0}'")]
    InvalidSiteUrl(String),
    #[error("The domain of the hosted site ({site}) does not match the domain of the manifest's start_url member ({start_url})")]
    DomainMismatch { site: String, start_url: String },
    #[error("The '{0}' manifest member is missing or invalid.")]
    MemberMissing(&'static str),
}
