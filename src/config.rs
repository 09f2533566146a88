//! Site conversion settings
//!
//! The heuristics that are site-specific by nature (which host counts as
//! internal, which container names become flex rows, which font ships
//! with the project) live here instead of being hard-coded.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Host whose links are treated as in-site navigation. Relative
    /// `href`s are always internal.
    pub host: String,

    /// Font file attached wherever a `font-family` declaration appears.
    pub font_file: String,

    /// CSS selector for the content subtree to convert.
    pub content_selector: String,

    /// Regions excised from the document before tokenization.
    pub exclude_tags: Vec<String>,

    /// Container names laid out as flex rows that fill their parent.
    pub row_containers: Vec<String>,

    /// Container names laid out as rows that hug their content.
    pub inline_containers: Vec<String>,

    /// Name of the synthesized scene root.
    pub root_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            font_file: "main-font.woff2".to_string(),
            content_selector: "body".to_string(),
            exclude_tags: vec![
                "head".to_string(),
                "nav".to_string(),
                "footer".to_string(),
            ],
            row_containers: vec![
                "flex-container-content".to_string(),
                "navbar__entries".to_string(),
            ],
            inline_containers: vec!["navbar__entry".to_string()],
            root_name: "content".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn is_row_container(&self, name: &str) -> bool {
        self.row_containers.iter().any(|n| n == name)
    }

    pub fn is_inline_container(&self, name: &str) -> bool {
        self.inline_containers.iter().any(|n| n == name)
    }

    pub fn is_internal_host(&self, host: &str) -> bool {
        !self.host.is_empty() && self.host == host
    }
}
