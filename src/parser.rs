//! Recursive descent over the token stream
//!
//! One handler per tag category; categories without a rule of their own
//! degrade into a neutral vertical container rather than failing. The
//! only grammar failure is consuming a token where a scope marker was
//! required, which aborts the whole parse.

use crate::config::SiteConfig;
use crate::css::{self, CssValue};
use crate::error::{ConvertError, Result};
use crate::margin::margin_wrapper;
use crate::node::{NodeId, NodeKind, SceneTree};
use crate::resource::{FontFile, ResourcePayload, Texture};
use crate::scanner::{TagCategory, Token};
use crate::script::{connection_lines, goto_scene_function, ScriptFunction, ScriptResource};
use crate::style::{Declarations, StyleContext};
use regex::Regex;
use url::Url;

/// Where an anchor's `href` points, as far as the compiler cares.
enum LinkTarget {
    /// In-site navigation: the path portion of the link.
    Internal(String),
    /// Off-site: the raw URI, kept as a property.
    External(String),
}

pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    tree: &'a mut SceneTree,
    root: Option<NodeId>,
    config: &'a SiteConfig,
    identifier: Regex,
}

impl<'a> Parser<'a> {
    /// `root` receives the navigation scripts synthesized for internal
    /// links; pass `None` to skip link wiring entirely.
    pub fn new(
        tokens: Vec<Token>,
        tree: &'a mut SceneTree,
        root: Option<NodeId>,
        config: &'a SiteConfig,
    ) -> Self {
        Self {
            tokens,
            current: 0,
            tree,
            root,
            config,
            identifier: Regex::new(r"[^A-Za-z0-9_]").expect("static pattern"),
        }
    }

    pub fn parse(&mut self) -> Result<Vec<NodeId>> {
        let context = StyleContext::new();
        let mut nodes = Vec::new();
        while !self.is_at_end() {
            nodes.push(self.make_node(&context)?);
        }
        Ok(nodes)
    }

    fn make_node(&mut self, context: &StyleContext) -> Result<NodeId> {
        let token = self.advance();
        match token.category {
            TagCategory::Div
            | TagCategory::Body
            | TagCategory::Nav
            | TagCategory::Footer
            | TagCategory::Ul
            | TagCategory::Li
            | TagCategory::Blockquote
            | TagCategory::Head => self.container_node(token, context),
            TagCategory::A => self.anchor_node(token, context),
            TagCategory::H1 | TagCategory::H4 => self.heading_node(token, context),
            TagCategory::P => self.paragraph_node(token, context),
            TagCategory::Span => self.span_node(&token, context),
            TagCategory::Em => self.emphasis_node(&token, context),
            TagCategory::Img => Ok(self.image_node(&token)),
            TagCategory::Text => self.text_node(&token, context),
            TagCategory::StartChildren | TagCategory::EndChildren | TagCategory::Eof => Err(
                ConvertError::unexpected_token(token.to_string(), "expected an element or text"),
            ),
            // Flow, Title, Metadata, Hr, I: no dedicated rule
            _ => self.flow_node(token, context),
        }
    }

    /// Node name from the source element: `id` wins, then joined classes,
    /// then the tag name itself.
    fn derive_name(&self, token: &Token) -> String {
        if let Some(id) = token.attrs.get("id") {
            return id.clone();
        }
        if let Some(classes) = token.attrs.get("class") {
            let joined = classes.split_whitespace().collect::<Vec<_>>().join("-");
            if !joined.is_empty() {
                return joined;
            }
        }
        token.category.default_name().to_string()
    }

    fn container_node(&mut self, token: Token, context: &StyleContext) -> Result<NodeId> {
        let declarations = Declarations::from_style_attr(token.style_attr());
        let name = self.derive_name(&token);
        let node = self.tree.new_node(name, NodeKind::Panel);

        self.apply_container_defaults(node, &token);
        self.apply_style(node, &declarations, context)?;

        let child_context = context.push(declarations.clone());
        for child in self.make_children(&child_context)? {
            self.tree.add_child(node, child);
        }

        if wraps_spacing(token.category) {
            let base = self.tree.node(node).name.clone();
            if let Some(wrapper) = margin_wrapper(self.tree, &base, &declarations)? {
                self.tree.add_child(wrapper, node);
                return Ok(wrapper);
            }
        }
        Ok(node)
    }

    /// Tag-category and special-name defaults, applied before the tag's
    /// own style gets a say.
    fn apply_container_defaults(&mut self, node: NodeId, token: &Token) {
        match token.category {
            TagCategory::Body => {
                self.tree.node_mut(node).kind = NodeKind::VBox;
                self.fill_container(node);
            }
            TagCategory::Nav | TagCategory::Footer => {
                self.tree.node_mut(node).kind = NodeKind::HBox;
                self.fill_container(node);
            }
            TagCategory::Div => {
                let name = self.tree.node(node).name.clone();
                if self.config.is_row_container(&name) {
                    self.tree.node_mut(node).kind = NodeKind::HBox;
                    self.fill_container(node);
                } else if self.config.is_inline_container(&name) {
                    self.tree.node_mut(node).kind = NodeKind::HBox;
                    self.hug_container(node);
                } else {
                    self.tree.node_mut(node).kind = NodeKind::VBox;
                    self.fill_container(node);
                }
            }
            TagCategory::Ul | TagCategory::Li | TagCategory::P | TagCategory::Blockquote => {
                self.tree.node_mut(node).kind = NodeKind::VBox;
            }
            _ => {
                log::debug!("no container defaults for {}", token.category);
            }
        }
    }

    fn fill_container(&mut self, node: NodeId) {
        let node = self.tree.node_mut(node);
        node.set("layout_mode", 2i64);
        node.set("size_flags_horizontal", 3i64);
        node.set("size_flags_vertical", 3i64);
    }

    fn hug_container(&mut self, node: NodeId) {
        let node = self.tree.node_mut(node);
        node.set("layout_mode", 2i64);
        node.set("size_flags_horizontal", 0i64);
        node.set("size_flags_vertical", 0i64);
    }

    /// Inline style overrides: explicit flex layout beats every default,
    /// and font declarations are routed through the polymorphic hooks.
    fn apply_style(
        &mut self,
        node: NodeId,
        declarations: &Declarations,
        context: &StyleContext,
    ) -> Result<()> {
        match (declarations.get("display"), declarations.get("flex-direction")) {
            (Some("flex"), Some("column")) => self.tree.node_mut(node).kind = NodeKind::VBox,
            (Some("flex"), _) => self.tree.node_mut(node).kind = NodeKind::HBox,
            _ => {}
        }

        if declarations.get("font-family").is_some()
            && self.tree.node(node).kind.accepts_font_resource()
        {
            let font = FontFile {
                file: self.config.font_file.clone(),
            };
            self.tree.attach_resource(node, ResourcePayload::Font(font));
        }

        self.apply_font_size(node, declarations, context)?;
        Ok(())
    }

    fn apply_font_size(
        &mut self,
        node: NodeId,
        declarations: &Declarations,
        context: &StyleContext,
    ) -> Result<()> {
        if let Some(raw) = context.font_size(declarations) {
            match css::interpret(raw)? {
                CssValue::Static(size) => self.tree.node_mut(node).apply_font_size(size),
                other => log::warn!("ignoring non-static font-size {:?}", other),
            }
        }
        Ok(())
    }

    fn heading_node(&mut self, token: Token, context: &StyleContext) -> Result<NodeId> {
        let declarations = Declarations::from_style_attr(token.style_attr());
        let name = self.derive_name(&token);
        let node = self.tree.rich_text_label(name, &token.text);

        self.apply_font_size(node, &declarations, context)?;

        let child_context = context.push(declarations.clone());
        for child in self.make_children(&child_context)? {
            self.tree.add_child(node, child);
        }

        let base = self.tree.node(node).name.clone();
        if let Some(wrapper) = margin_wrapper(self.tree, &base, &declarations)? {
            self.tree.add_child(wrapper, node);
            return Ok(wrapper);
        }
        Ok(node)
    }

    /// Children are visited in order; runs of inline text leaves collapse
    /// into single rich-text children so a paragraph does not fragment
    /// into one leaf per phrase.
    fn paragraph_node(&mut self, token: Token, context: &StyleContext) -> Result<NodeId> {
        let declarations = Declarations::from_style_attr(token.style_attr());
        let name = self.derive_name(&token);
        let node = self.tree.new_node(name, NodeKind::Panel);
        self.apply_container_defaults(node, &token);
        self.apply_style(node, &declarations, context)?;

        let child_context = context.push(declarations.clone());
        let children = self.make_children(&child_context)?;

        let mut pending: Vec<String> = Vec::new();
        for child in children {
            let leaf_text = {
                let child_node = self.tree.node(child);
                if child_node.kind.is_text_leaf() {
                    child_node.text().map(str::to_string)
                } else {
                    None
                }
            };
            match leaf_text {
                Some(text) => pending.push(text),
                None => {
                    self.flush_pending(node, &mut pending);
                    self.tree.add_child(node, child);
                }
            }
        }
        self.flush_pending(node, &mut pending);

        Ok(node)
    }

    fn flush_pending(&mut self, parent: NodeId, pending: &mut Vec<String>) {
        if pending.is_empty() {
            return;
        }
        let text = pending.join(" ");
        pending.clear();
        let leaf = self.tree.rich_text_label("text", &text);
        self.tree.add_child(parent, leaf);
    }

    fn anchor_node(&mut self, token: Token, context: &StyleContext) -> Result<NodeId> {
        let declarations = Declarations::from_style_attr(token.style_attr());
        let title_name = token
            .attrs
            .get("title")
            .map(|title| title.replace(' ', "-"))
            .unwrap_or_default();
        let href = token.attrs.get("href").cloned().unwrap_or_default();

        let target = self.classify_link(&href);
        let node = match &target {
            LinkTarget::Internal(path) => {
                let link_name = internal_link_name(path);
                let name = if !title_name.is_empty() {
                    title_name
                } else if !link_name.is_empty() {
                    link_name
                } else {
                    "link".to_string()
                };
                self.tree.new_node(name, NodeKind::Link)
            }
            LinkTarget::External(uri) => {
                let name = if title_name.is_empty() {
                    "link".to_string()
                } else {
                    title_name
                };
                let node = self.tree.new_node(name, NodeKind::LinkExternal);
                self.tree.node_mut(node).set("uri", uri.as_str());
                node
            }
        };
        {
            let link = self.tree.node_mut(node);
            link.set("unique_name_in_owner", true);
            link.set("size_flags_horizontal", 0i64);
        }
        self.apply_font_size(node, &declarations, context)?;

        // The link swallows its children; the first text it finds
        // becomes the button label.
        let child_context = context.push(declarations);
        for child in self.make_children(&child_context)? {
            if self.tree.node(node).text().is_none() {
                if let Some(text) = self.tree.node(child).text().map(str::to_string) {
                    self.tree.node_mut(node).set("text", text);
                }
            }
        }

        if let LinkTarget::Internal(path) = target {
            self.wire_internal_link(node, &path);
        }
        Ok(node)
    }

    fn classify_link(&self, href: &str) -> LinkTarget {
        match Url::parse(href) {
            Ok(url) => match url.host_str() {
                Some(host) if self.config.is_internal_host(host) => {
                    LinkTarget::Internal(url.path().to_string())
                }
                Some(_) => LinkTarget::External(href.to_string()),
                None => LinkTarget::Internal(url.path().to_string()),
            },
            // no scheme/host: a relative link is always in-site
            Err(_) => LinkTarget::Internal(href.to_string()),
        }
    }

    /// Wire an internal link: a `_ready` fragment on the document root
    /// binds the button and connects its pressed signal to a generated
    /// handler that navigates to the target scene.
    fn wire_internal_link(&mut self, node: NodeId, path: &str) {
        let Some(root) = self.root else {
            log::debug!("no document root, skipping link wiring");
            return;
        };

        let node_name = self.tree.node(node).name.clone();
        let var_name = self.sanitize_identifier(&node_name);
        let method_name = format!("_{}_on_button_pressed", var_name);

        let link_name = internal_link_name(path);
        let link_path = path.trim_start_matches('/');
        let scene_path = format!("res://{}{}.tscn", link_path, link_name);

        let mut script = ScriptResource::new("Node");
        script.add_function(ScriptFunction::new(
            "_ready",
            connection_lines(&var_name, &format!("%{}", node_name), "pressed", &method_name),
        ));
        script.add_function(goto_scene_function(&method_name, &scene_path));
        self.tree.attach_script(root, script);
    }

    fn sanitize_identifier(&self, name: &str) -> String {
        let cleaned = self.identifier.replace_all(name, "_").to_string();
        match cleaned.chars().next() {
            Some(first) if first.is_ascii_digit() => format!("_{}", cleaned),
            Some(_) => cleaned,
            None => "link".to_string(),
        }
    }

    fn span_node(&mut self, token: &Token, context: &StyleContext) -> Result<NodeId> {
        let declarations = Declarations::from_style_attr(token.style_attr());
        let text = self.collapse_inline_text(token.text.clone(), context)?;
        let text = match declarations.get("color") {
            Some(color) => format!("[color={}]{}[/color]", color, text),
            None => text,
        };
        Ok(self.tree.rich_text_label("text", &text))
    }

    fn emphasis_node(&mut self, token: &Token, context: &StyleContext) -> Result<NodeId> {
        let text = self.collapse_inline_text(token.text.clone(), context)?;
        Ok(self.tree.rich_text_label("text", &format!("[i]{}[/i]", text)))
    }

    /// Inline tags capture their immediate text at scan time, but nested
    /// element children still arrive as a scope. Fold the text of those
    /// children in so nested inline markup degrades into one leaf.
    fn collapse_inline_text(&mut self, base: String, context: &StyleContext) -> Result<String> {
        let mut parts = Vec::new();
        if !base.is_empty() {
            parts.push(base);
        }
        for child in self.make_children(context)? {
            if let Some(text) = self.tree.node(child).text() {
                parts.push(text.to_string());
            }
        }
        Ok(parts.join(" "))
    }

    fn image_node(&mut self, token: &Token) -> NodeId {
        let node = self.tree.texture_rect("img");
        if let Some(src) = token.attrs.get("src") {
            let file = src.rsplit('/').next().unwrap_or(src).to_string();
            self.tree
                .attach_resource(node, ResourcePayload::Texture(Texture { file }));
        }
        node
    }

    fn text_node(&mut self, token: &Token, context: &StyleContext) -> Result<NodeId> {
        let node = self.tree.plain_label("text", &token.text);
        // bare text has no style attribute of its own
        self.apply_font_size(node, &Declarations::default(), context)?;
        Ok(node)
    }

    /// Generic fallback: unsupported markup becomes a neutral vertical
    /// container so the document still converts.
    fn flow_node(&mut self, token: Token, context: &StyleContext) -> Result<NodeId> {
        log::debug!("no rule for {}, using generic container", token.category);
        let name = self.derive_name(&token);
        let node = self.tree.new_node(name, NodeKind::VBox);
        for child in self.make_children(context)? {
            self.tree.add_child(node, child);
        }
        Ok(node)
    }

    fn make_children(&mut self, context: &StyleContext) -> Result<Vec<NodeId>> {
        if !self.check(TagCategory::StartChildren) {
            return Ok(Vec::new());
        }
        self.consume(TagCategory::StartChildren, "children must open a scope")?;

        let mut children = Vec::new();
        while !self.check(TagCategory::EndChildren) && !self.is_at_end() {
            children.push(self.make_node(context)?);
        }
        self.consume(
            TagCategory::EndChildren,
            "children must end with a closing scope marker",
        )?;
        Ok(children)
    }

    fn check(&self, category: TagCategory) -> bool {
        !self.is_at_end() && self.peek().category == category
    }

    fn consume(&mut self, category: TagCategory, expected: &str) -> Result<Token> {
        if self.check(category) {
            return Ok(self.advance());
        }
        Err(ConvertError::unexpected_token(
            self.peek().to_string(),
            expected,
        ))
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.tokens[self.current - 1].clone()
    }

    fn is_at_end(&self) -> bool {
        self.peek().category == TagCategory::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }
}

fn wraps_spacing(category: TagCategory) -> bool {
    matches!(
        category,
        TagCategory::Div
            | TagCategory::Body
            | TagCategory::Nav
            | TagCategory::Footer
            | TagCategory::Ul
            | TagCategory::Li
    )
}

/// Second-to-last path segment: the scene name of `/articles/foo/`.
fn internal_link_name(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 {
        return String::new();
    }
    segments[segments.len() - 2].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Value;
    use crate::scanner::Scanner;
    use scraper::Html;

    /// Parse an HTML fragment; returns the tree, the fragment wrapper's
    /// children and the synthetic document root.
    fn parse_fragment(html: &str, config: &SiteConfig) -> (SceneTree, Vec<NodeId>, NodeId) {
        let document = Html::parse_fragment(html);
        let tokens = Scanner::new(document.root_element()).scan_tokens();
        let mut tree = SceneTree::new();
        let root = tree.new_node("content", NodeKind::VBox);
        let wrapper = {
            let mut parser = Parser::new(tokens, &mut tree, Some(root), config);
            parser.parse().unwrap()
        };
        let inner = tree.node(wrapper[0]).children.clone();
        (tree, inner, root)
    }

    #[test]
    fn flex_row_style_overrides_the_div_default() {
        let config = SiteConfig::default();
        let (tree, nodes, _) = parse_fragment(
            "<div style=\"display: flex; flex-direction: row\"></div>",
            &config,
        );
        assert_eq!(tree.node(nodes[0]).kind, NodeKind::HBox);
    }

    #[test]
    fn flex_column_style_stays_vertical() {
        let config = SiteConfig::default();
        let (tree, nodes, _) = parse_fragment(
            "<div style=\"display: flex; flex-direction: column\"></div>",
            &config,
        );
        assert_eq!(tree.node(nodes[0]).kind, NodeKind::VBox);
    }

    #[test]
    fn known_row_container_names_become_rows() {
        let config = SiteConfig::default();
        let (tree, nodes, _) =
            parse_fragment("<div class=\"navbar__entries\"></div>", &config);
        let node = tree.node(nodes[0]);
        assert_eq!(node.kind, NodeKind::HBox);
        assert_eq!(node.name, "navbar__entries");
    }

    #[test]
    fn paragraph_coalesces_text_around_block_children() {
        let config = SiteConfig::default();
        let (tree, nodes, _) =
            parse_fragment("<p>alpha <img src=\"images/pic.png\"> beta</p>", &config);

        let paragraph = tree.node(nodes[0]);
        assert_eq!(paragraph.kind, NodeKind::VBox);
        let kinds: Vec<NodeKind> = paragraph
            .children
            .iter()
            .map(|&c| tree.node(c).kind)
            .collect();
        assert_eq!(kinds, vec![NodeKind::RichText, NodeKind::Texture, NodeKind::RichText]);
        assert_eq!(tree.node(paragraph.children[0]).text(), Some("alpha"));
        assert_eq!(tree.node(paragraph.children[2]).text(), Some("beta"));
    }

    #[test]
    fn paragraph_with_only_text_yields_one_leaf() {
        let config = SiteConfig::default();
        let (tree, nodes, _) = parse_fragment("<p>just <em>some</em> words</p>", &config);
        let paragraph = tree.node(nodes[0]);
        assert_eq!(paragraph.children.len(), 1);
        assert_eq!(
            tree.node(paragraph.children[0]).text(),
            Some("just [i]some[/i] words")
        );
    }

    #[test]
    fn internal_anchor_wires_two_functions_on_the_root() {
        let config = SiteConfig::default();
        let (tree, nodes, root) =
            parse_fragment("<a href=\"/articles/foo/\">read me</a>", &config);

        let link = tree.node(nodes[0]);
        assert_eq!(link.kind, NodeKind::Link);
        assert_eq!(link.name, "foo");
        assert_eq!(link.text(), Some("read me"));
        assert!(link.properties.get("uri").is_none());

        let script = tree.node(root).script.as_ref().unwrap().script().unwrap();
        assert_eq!(script.functions.len(), 2);
        let ready = &script.functions["_ready"];
        assert!(ready.lines[0].contains("get_node(\"%foo\")"));
        assert!(ready.lines[1].contains("pressed.connect(_foo_on_button_pressed)"));
        let handler = &script.functions["_foo_on_button_pressed"];
        assert!(handler.lines[0].contains("res://articles/foo/foo.tscn"));
        assert_eq!(handler.lines[1], "Global.on_internal_link_press.emit()");
    }

    #[test]
    fn own_host_anchor_is_internal() {
        let config = SiteConfig {
            host: "mysite.example".to_string(),
            ..SiteConfig::default()
        };
        let (tree, nodes, root) = parse_fragment(
            "<a href=\"https://mysite.example/posts/bar/\">bar</a>",
            &config,
        );
        assert_eq!(tree.node(nodes[0]).kind, NodeKind::Link);
        assert!(tree.node(root).script.is_some());
    }

    #[test]
    fn external_anchor_keeps_the_uri_and_no_script() {
        let config = SiteConfig::default();
        let (tree, nodes, root) = parse_fragment(
            "<a href=\"https://external.example/x\">away</a>",
            &config,
        );

        let link = tree.node(nodes[0]);
        assert_eq!(link.kind, NodeKind::LinkExternal);
        assert_eq!(
            link.properties.get("uri"),
            Some(&Value::Str("https://external.example/x".to_string()))
        );
        assert_eq!(link.text(), Some("away"));
        assert!(tree.node(root).script.is_none());
    }

    #[test]
    fn spacing_produces_a_wrapper_parent() {
        let config = SiteConfig::default();
        let (tree, nodes, _) = parse_fragment(
            "<div id=\"intro\" style=\"padding: 8px\"><p>x</p></div>",
            &config,
        );

        let wrapper = tree.node(nodes[0]);
        assert_eq!(wrapper.kind, NodeKind::Margin);
        assert_eq!(wrapper.name, "intro-margin");
        assert_eq!(wrapper.children.len(), 1);
        let inner = tree.node(wrapper.children[0]);
        assert_eq!(inner.name, "intro");
        assert_eq!(inner.kind, NodeKind::VBox);
    }

    #[test]
    fn font_size_flows_one_level_into_bare_text() {
        let config = SiteConfig::default();
        let (tree, nodes, _) = parse_fragment(
            "<div style=\"font-size: 18px\">hello</div>",
            &config,
        );
        let div = tree.node(nodes[0]);
        let label = tree.node(div.children[0]);
        assert_eq!(label.kind, NodeKind::Label);
        assert_eq!(
            label.properties.get("theme_override_font_sizes/font_size"),
            Some(&Value::Int(18))
        );
    }

    #[test]
    fn font_family_attaches_a_font_resource_to_containers() {
        let config = SiteConfig::default();
        let (tree, nodes, _) = parse_fragment(
            "<div style=\"font-family: serif\"></div>",
            &config,
        );
        let div = tree.node(nodes[0]);
        assert_eq!(div.resources.len(), 1);
        assert_eq!(div.resources[0].type_tag(), "FontFile");
    }

    #[test]
    fn unbalanced_scope_markers_are_fatal() {
        let config = SiteConfig::default();
        let tokens = vec![
            Token::new(TagCategory::Div),
            Token::with_text(TagCategory::StartChildren, "div"),
            Token::with_text(TagCategory::Text, "dangling"),
            Token::new(TagCategory::Eof),
        ];
        let mut tree = SceneTree::new();
        let mut parser = Parser::new(tokens, &mut tree, None, &config);
        let err = parser.parse().unwrap_err();
        assert!(matches!(err, ConvertError::UnexpectedToken { .. }));
    }

    #[test]
    fn image_attaches_its_file_as_a_texture_resource() {
        let config = SiteConfig::default();
        let (tree, nodes, _) =
            parse_fragment("<img src=\"static/images/tower.png\">", &config);
        let image = tree.node(nodes[0]);
        assert_eq!(image.kind, NodeKind::Texture);
        assert_eq!(image.resources[0].path_str(), "tower.png");
    }

    #[test]
    fn nested_inline_markup_folds_into_one_leaf() {
        let config = SiteConfig::default();
        let (tree, nodes, _) =
            parse_fragment("<p><em>hello <span>world</span></em></p>", &config);

        let paragraph = tree.node(nodes[0]);
        assert_eq!(paragraph.children.len(), 1);
        assert_eq!(
            tree.node(paragraph.children[0]).text(),
            Some("[i]hello world[/i]")
        );
    }

    #[test]
    fn span_with_nested_element_keeps_its_color_marker() {
        let config = SiteConfig::default();
        let (tree, nodes, _) = parse_fragment(
            "<p><span style=\"color: red\">warm <em>core</em></span></p>",
            &config,
        );
        let paragraph = tree.node(nodes[0]);
        assert_eq!(
            tree.node(paragraph.children[0]).text(),
            Some("[color=red]warm [i]core[/i][/color]")
        );
    }

    #[test]
    fn span_color_becomes_a_bbcode_marker() {
        let config = SiteConfig::default();
        let (tree, nodes, _) = parse_fragment(
            "<p><span style=\"color: #aa0000\">warm</span><img src=\"a/b.png\"></p>",
            &config,
        );
        let paragraph = tree.node(nodes[0]);
        let first = tree.node(paragraph.children[0]);
        assert_eq!(first.text(), Some("[color=#aa0000]warm[/color]"));
    }
}
