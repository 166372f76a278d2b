//! Template catalog loading.
//!
//! The catalog lists the template repositories offered by the onboarding
//! select prompt. It is embedded at compile time and can be replaced by a
//! YAML file at runtime:
//!
//! ```yaml
//! version: "1.0"
//! templates:
//!   - name: phenixcoder/lambda-container-service
//!     url: https://github.com/phenixcoder/lambda-container-service.git
//!     description: Lambda container service (Express)
//! ```

use crate::error::{Error, Result};
use crate::git::is_valid_repo_url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Embedded catalog; path is relative to this source file
const EMBEDDED_CATALOG: &str = include_str!("../templates/catalog.yaml");

/// One template repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Ordered list of template repositories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateCatalog {
    pub version: String,
    pub templates: Vec<TemplateEntry>,
}

impl TemplateCatalog {
    /// Load the catalog compiled into the binary
    pub fn from_embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Loading template catalog from {:?}", path.as_ref());
        let yaml = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&yaml)
    }

    /// Parse and validate a catalog from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: TemplateCatalog = serde_yaml_ng::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        if self.templates.is_empty() {
            return Err(Error::invalid_catalog("no templates defined"));
        }

        for entry in &self.templates {
            if !is_valid_repo_url(&entry.url) {
                return Err(Error::invalid_catalog(format!(
                    "template '{}' has an invalid repository URL: {}",
                    entry.name, entry.url
                )));
            }
        }

        Ok(())
    }

    /// Template names in catalog order
    pub fn names(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.name.clone()).collect()
    }

    /// Find a template by name or by repository URL
    pub fn find(&self, key: &str) -> Option<&TemplateEntry> {
        self.templates
            .iter()
            .find(|t| t.name == key || t.url == key)
    }
}
