//! Configuration for the mapping sheet generator

use serde::{Deserialize, Serialize};

/// A literal substitution applied to the `links` column of the schema tabs,
/// pinning development URLs to a released version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRewrite {
    /// Substring to replace
    pub from: String,
    /// Replacement
    pub to: String,
}

impl Default for LinkRewrite {
    fn default() -> Self {
        Self {
            from: "1.1-dev".to_string(),
            to: "1.1.5".to_string(),
        }
    }
}

/// Generator configuration.
///
/// All fields have defaults matching the published OCDS 1.1.5 template, so a
/// partial JSON document can override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Output language, selecting translations from the string table
    pub lang: String,
    /// Definition name marking an organization reference. Detection prefers
    /// this stable identifier over the localized title heuristic.
    pub org_ref_definition: String,
    /// Version rewrite for schema tab links, if any
    pub link_rewrite: Option<LinkRewrite>,
    /// Number of blank placeholder rows reserved for publisher-added fields
    pub additional_field_rows: usize,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            org_ref_definition: "OrganizationReference".to_string(),
            link_rewrite: Some(LinkRewrite::default()),
            additional_field_rows: 4,
        }
    }
}

impl MappingConfig {
    /// Default configuration for a language
    #[must_use]
    pub fn for_lang(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = MappingConfig::default();
        assert_eq!(config.lang, "en");
        assert_eq!(config.org_ref_definition, "OrganizationReference");
        assert_eq!(config.additional_field_rows, 4);
        let rewrite = config.link_rewrite.unwrap();
        assert_eq!(rewrite.from, "1.1-dev");
        assert_eq!(rewrite.to, "1.1.5");
    }

    #[test]
    fn test_partial_override() {
        let config: MappingConfig = serde_json::from_str(r#"{"lang": "es"}"#).unwrap();
        assert_eq!(config.lang, "es");
        assert_eq!(config.additional_field_rows, 4);
    }
}
