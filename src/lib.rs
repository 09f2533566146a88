//! HTML to Godot scene compiler
//!
//! Converts static HTML pages into Godot text scenes (`.tscn`) plus the
//! GDScript files they reference, so a site can be browsed as an in-game
//! UI built from Control nodes.
//!
//! # Basic Usage
//!
//! ```no_run
//! use scenegen::{convert_file, ConvertOptions, Result, SiteConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let config = SiteConfig::default();
//!     let options = ConvertOptions::default();
//!     convert_file(Path::new("page.html"), Path::new("out"), &config, &options)?;
//!     Ok(())
//! }
//! ```
//!
//! # Conversion Pipeline
//!
//! 1. **Inline**: stylesheet rules are inlined into `style` attributes
//! 2. **Select**: the configured content subtree is picked out of the document
//! 3. **Scan**: the subtree is flattened into a token stream
//! 4. **Parse**: recursive descent builds the layout node tree
//! 5. **Render**: the tree is serialized to `.tscn` and `.gd` files

pub mod config;
pub mod css;
pub mod error;
pub mod margin;
pub mod node;
pub mod parser;
pub mod render;
pub mod resource;
pub mod scanner;
pub mod script;
pub mod style;

pub mod cli;

use scraper::{Html, Selector};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

pub use config::SiteConfig;
pub use css::CssValue;
pub use error::{ConvertError, Result};
pub use node::{LayoutNode, NodeId, NodeKind, SceneTree, Value};
pub use parser::Parser;
pub use render::{Scene, SceneWriter};
pub use resource::{ExtResource, FontFile, IdGenerator, ResourcePayload, Texture};
pub use scanner::{Scanner, TagCategory, Token};
pub use script::{ScriptFunction, ScriptResource};
pub use style::{Declarations, StyleContext};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Per-run conversion settings that are not site properties.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Scene name; defaults to the input file stem.
    pub scene_name: Option<String>,

    /// Run the CSS inliner before scanning. Disable for documents whose
    /// styles are already inline.
    pub inline_css: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            scene_name: None,
            inline_css: true,
        }
    }
}

/// Conversion statistics and metrics
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    /// Source document size in bytes
    pub source_size: u64,

    /// Tokens produced by the scanner
    pub token_count: usize,

    /// Nodes in the finished layout tree
    pub node_count: usize,

    /// External resources referenced by the scene
    pub resource_count: usize,

    /// Generated script files
    pub script_count: usize,

    /// Conversion time in milliseconds
    pub convert_time_ms: u64,
}

/// Inline stylesheet rules into `style` attributes.
pub fn inline_styles(html: &str) -> Result<String> {
    css_inline::inline(html).map_err(|e| ConvertError::Inline {
        message: e.to_string(),
    })
}

/// Tokenize the configured content subtree of `html`. The document is
/// used as-is; run [`inline_styles`] first if styles live in a stylesheet.
pub fn scan_document(html: &str, config: &SiteConfig) -> Result<Vec<Token>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&config.content_selector).map_err(|e| {
        ConvertError::InvalidSelector {
            message: format!("{}: {}", config.content_selector, e),
        }
    })?;
    let content = document
        .select(&selector)
        .next()
        .ok_or_else(|| ConvertError::ContentNotFound {
            selector: config.content_selector.clone(),
        })?;

    let tokens = Scanner::new(content)
        .exclude_tags(&config.exclude_tags)
        .scan_tokens();
    Ok(tokens)
}

/// Convert an HTML document into a named scene.
pub fn convert_document(
    html: &str,
    scene_name: &str,
    config: &SiteConfig,
) -> Result<(Scene, ConversionStats)> {
    let start_time = Instant::now();
    let mut stats = ConversionStats {
        source_size: html.len() as u64,
        ..Default::default()
    };

    let tokens = scan_document(html, config)?;
    stats.token_count = tokens.len();
    log::debug!("scanned {} tokens from {} bytes", stats.token_count, stats.source_size);

    let mut tree = SceneTree::new();
    let root = tree.new_node(config.root_name.clone(), NodeKind::VBox);
    {
        let node = tree.node_mut(root);
        node.set("size_flags_horizontal", 3i64);
        node.set("size_flags_vertical", 3i64);
    }

    let nodes = {
        let mut parser = Parser::new(tokens, &mut tree, Some(root), config);
        parser.parse()?
    };
    for node in nodes {
        tree.add_child(root, node);
    }

    stats.node_count = tree.flatten(root).len();
    let resources = tree.collect_resources(root);
    stats.resource_count = resources.len();
    stats.script_count = resources
        .iter()
        .filter(|resource| resource.script().is_some())
        .count();
    stats.convert_time_ms = start_time.elapsed().as_millis() as u64;

    log::info!(
        "converted {} into {} nodes, {} resources",
        scene_name,
        stats.node_count,
        stats.resource_count
    );
    Ok((Scene::new(tree, root, scene_name), stats))
}

/// Convert an HTML file and write the scene files into `output_dir`.
pub fn convert_file(
    input: &Path,
    output_dir: &Path,
    config: &SiteConfig,
    options: &ConvertOptions,
) -> Result<ConversionStats> {
    let source = std::fs::read_to_string(input)?;

    let scene_name = match &options.scene_name {
        Some(name) => name.clone(),
        None => input
            .file_stem()
            .map(|stem| stem.to_string_lossy().replace(' ', "-"))
            .unwrap_or_else(|| config.root_name.clone()),
    };

    let html = if options.inline_css {
        inline_styles(&source)?
    } else {
        source
    };

    let (scene, stats) = convert_document(&html, &scene_name, config)?;
    SceneWriter::new(scene, output_dir).write_out()?;
    Ok(stats)
}
