//! Tag classification and tokenization of the markup tree
//!
//! Walks a parsed HTML document in document order and emits a flat token
//! stream. Nesting is encoded with `StartChildren`/`EndChildren` marker
//! tokens so the parser can run plain recursive descent over a `Vec`.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};
use std::collections::HashMap;
use std::fmt;

/// Closed set of tag classes the grammar knows about.
///
/// Unknown tags map to `Flow` so new markup degrades into a neutral
/// container instead of failing the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Text,
    Flow,
    Metadata,
    StartChildren,
    EndChildren,
    P,
    Span,
    Div,
    Title,
    Body,
    H1,
    H4,
    Ul,
    Li,
    Blockquote,
    Em,
    Hr,
    I,
    A,
    Head,
    Footer,
    Img,
    Nav,
    Eof,
}

impl TagCategory {
    pub fn from_tag(name: &str) -> Self {
        match name {
            "h1" => Self::H1,
            "h4" => Self::H4,
            "p" => Self::P,
            "title" => Self::Title,
            "a" => Self::A,
            "em" => Self::Em,
            "i" => Self::I,
            "hr" => Self::Hr,
            "meta" => Self::Metadata,
            "div" => Self::Div,
            "span" => Self::Span,
            "body" => Self::Body,
            "footer" => Self::Footer,
            "head" => Self::Head,
            "img" => Self::Img,
            "nav" => Self::Nav,
            "ul" => Self::Ul,
            "li" => Self::Li,
            "blockquote" => Self::Blockquote,
            _ => Self::Flow,
        }
    }

    /// Leaf tags whose immediate text is captured into the token itself
    /// instead of being re-emitted as a separate `Text` token.
    pub fn collapses_text(self) -> bool {
        matches!(self, Self::H1 | Self::H4 | Self::Em | Self::Span)
    }

    /// Default node name for a token without `id`/`class` attributes.
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Flow => "flow",
            Self::Metadata => "meta",
            Self::P => "p",
            Self::Span => "span",
            Self::Div => "div",
            Self::Title => "title",
            Self::Body => "body",
            Self::H1 => "h1",
            Self::H4 => "h4",
            Self::Ul => "ul",
            Self::Li => "li",
            Self::Blockquote => "blockquote",
            Self::Em => "em",
            Self::Hr => "hr",
            Self::I => "i",
            Self::A => "a",
            Self::Head => "head",
            Self::Footer => "footer",
            Self::Img => "img",
            Self::Nav => "nav",
            Self::StartChildren | Self::EndChildren | Self::Eof => "",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartChildren => write!(f, "start-children"),
            Self::EndChildren => write!(f, "end-children"),
            Self::Eof => write!(f, "EOF"),
            Self::Text => write!(f, "text"),
            other => write!(f, "<{}>", other.default_name()),
        }
    }
}

/// One classified unit of the markup stream.
#[derive(Debug, Clone)]
pub struct Token {
    pub category: TagCategory,
    pub text: String,
    pub attrs: HashMap<String, String>,
}

impl Token {
    pub fn new(category: TagCategory) -> Self {
        Self {
            category,
            text: String::new(),
            attrs: HashMap::new(),
        }
    }

    pub fn with_text(category: TagCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
            attrs: HashMap::new(),
        }
    }

    /// The `style` attribute, if the source element carried one.
    pub fn style_attr(&self) -> Option<&str> {
        self.attrs.get("style").map(String::as_str)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.category)
        } else {
            write!(f, "{}({:?})", self.category, self.text)
        }
    }
}

/// Collapse internal newlines and surrounding whitespace into single spaces.
pub fn clean_text(raw: &str) -> String {
    raw.split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Single forward pass over an element subtree, producing the token stream.
///
/// Not restartable: `scan_tokens` consumes the scanner.
pub struct Scanner<'a> {
    root: ElementRef<'a>,
    excluded: Vec<String>,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(root: ElementRef<'a>) -> Self {
        Self {
            root,
            excluded: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Tag names whose subtrees are excised from the stream entirely
    /// (head, nav, footer and other non-content regions).
    pub fn exclude_tags(mut self, tags: &[String]) -> Self {
        self.excluded = tags.to_vec();
        self
    }

    pub fn scan_tokens(mut self) -> Vec<Token> {
        let root = self.root;
        self.scan_element(root);
        self.tokens.push(Token::new(TagCategory::Eof));
        log::debug!("scanned {} tokens", self.tokens.len());
        self.tokens
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|t| t == name)
    }

    fn scan_node(&mut self, node: NodeRef<'a, Node>) {
        match node.value() {
            Node::Text(text) => {
                let cleaned = clean_text(text);
                if !cleaned.is_empty() {
                    self.tokens.push(Token::with_text(TagCategory::Text, cleaned));
                }
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.scan_element(element);
                }
            }
            _ => {}
        }
    }

    fn scan_element(&mut self, element: ElementRef<'a>) {
        let tag = element.value().name();
        if self.is_excluded(tag) {
            return;
        }

        let category = TagCategory::from_tag(tag);
        let mut token = Token::new(category);
        for (key, value) in element.value().attrs() {
            token.attrs.insert(key.to_string(), value.to_string());
        }
        if category.collapses_text() {
            token.text = immediate_text(element);
        }
        self.tokens.push(token);

        let children: Vec<NodeRef<'a, Node>> = element
            .children()
            .filter(|child| self.emits_token(child, category))
            .collect();

        if !children.is_empty() {
            self.tokens.push(Token::with_text(TagCategory::StartChildren, tag));
            for child in children {
                self.scan_node(child);
            }
            self.tokens.push(Token::with_text(TagCategory::EndChildren, tag));
        }
    }

    /// Whether a child node will contribute at least one token.
    fn emits_token(&self, node: &NodeRef<'a, Node>, parent: TagCategory) -> bool {
        match node.value() {
            // Text under a collapsing tag was already captured.
            Node::Text(_) if parent.collapses_text() => false,
            Node::Text(text) => !clean_text(text).is_empty(),
            Node::Element(element) => !self.is_excluded(element.name()),
            _ => false,
        }
    }
}

/// Concatenated, cleaned text of an element's direct text children.
fn immediate_text(element: ElementRef<'_>) -> String {
    let parts: Vec<String> = element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => {
                let cleaned = clean_text(text);
                (!cleaned.is_empty()).then_some(cleaned)
            }
            _ => None,
        })
        .collect();
    parts.join(" ")
}
