pub mod deprecated;
pub mod https_url;
pub mod images;
pub mod scope_urls;
pub mod short_name;
pub mod w3c_schema;

use std::sync::Arc;

use crate::rule::Rule;

pub use deprecated::DeprecatedMembersRule;
pub use https_url::HttpsUrlRequiredRule;
pub use images::{image_group_validation, image_validation, IconGroupRule, IconSizesRule};
pub use scope_urls::ExtendedScopeUrlsRule;
pub use short_name::ShortNameRequiredRule;
pub use w3c_schema::W3cSchemaRule;

/// The built-in general rule set, in registration order. Applies to every
/// platform except the legacy extension-packaging format.
pub fn general_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(W3cSchemaRule),
        Arc::new(ShortNameRequiredRule),
        Arc::new(HttpsUrlRequiredRule),
        Arc::new(DeprecatedMembersRule),
        Arc::new(ExtendedScopeUrlsRule),
    ]
}
