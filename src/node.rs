//! The layout node graph
//!
//! Nodes live in an arena and refer to each other by index: ownership is
//! strictly top-down through `children`, while `parent` is a lookup-only
//! back-reference used to derive serialization paths. Sibling name
//! collisions are resolved by suffixing the incoming child, never by
//! erroring and never by touching the existing sibling.

use crate::resource::{ExtResource, IdGenerator, ResourcePayload};
use crate::script::ScriptResource;
use indexmap::IndexMap;
use std::fmt;

/// Closed set of emitted node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    VBox,
    HBox,
    Panel,
    RichText,
    Label,
    Link,
    LinkExternal,
    Texture,
    Margin,
}

impl NodeKind {
    /// Engine type string written into the scene file.
    pub fn type_str(self) -> &'static str {
        match self {
            Self::VBox => "VBoxContainer",
            Self::HBox => "HBoxContainer",
            Self::Panel => "PanelContainer",
            Self::RichText => "RichTextLabel",
            Self::Label => "Label",
            Self::Link | Self::LinkExternal => "LinkButton",
            Self::Texture => "TextureRect",
            Self::Margin => "MarginContainer",
        }
    }

    /// Structural containers are the only nodes that may carry an
    /// attached font resource.
    pub fn accepts_font_resource(self) -> bool {
        matches!(self, Self::VBox | Self::HBox | Self::Panel | Self::Margin)
    }

    /// Inline text leaves whose `text` coalesces inside a paragraph.
    pub fn is_text_leaf(self) -> bool {
        matches!(self, Self::Label | Self::RichText)
    }
}

/// A property value as it renders into the scene file.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
}

impl Value {
    /// Collapse whole numbers to integers so static pixel lengths render
    /// without a trailing fraction.
    pub fn from_number(number: f64) -> Self {
        if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
            Self::Int(number as i64)
        } else {
            Self::Float(number)
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Str(s) => write!(f, "\"{}\"", s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Index of a node inside its [`SceneTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One emitted UI element.
#[derive(Debug)]
pub struct LayoutNode {
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub properties: IndexMap<String, Value>,
    pub resources: Vec<ExtResource>,
    pub script: Option<ExtResource>,
}

impl LayoutNode {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn text(&self) -> Option<&str> {
        match self.properties.get("text") {
            Some(Value::Str(text)) => Some(text),
            _ => None,
        }
    }

    /// Font-size hook; only text-bearing kinds store the override.
    pub fn apply_font_size(&mut self, size: f64) {
        let key = match self.kind {
            NodeKind::RichText => "theme_override_font_sizes/normal_font_size",
            NodeKind::Label | NodeKind::Link => "theme_override_font_sizes/font_size",
            _ => return,
        };
        self.properties.insert(key.to_string(), Value::from_number(size));
    }
}

/// Arena of layout nodes plus the per-run identifier source.
#[derive(Debug, Default)]
pub struct SceneTree {
    nodes: Vec<LayoutNode>,
    ids: IdGenerator,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_node(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(LayoutNode {
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            properties: IndexMap::new(),
            resources: Vec::new(),
            script: None,
        });
        id
    }

    /// A `RichTextLabel` leaf with BBCode enabled.
    pub fn rich_text_label(&mut self, name: impl Into<String>, text: &str) -> NodeId {
        let id = self.new_node(name, NodeKind::RichText);
        let node = self.node_mut(id);
        node.set("layout_mode", 2i64);
        node.set("bbcode_enabled", true);
        node.set("fit_content", true);
        node.set("text", text);
        id
    }

    /// A plain `Label` leaf.
    pub fn plain_label(&mut self, name: impl Into<String>, text: &str) -> NodeId {
        let id = self.new_node(name, NodeKind::Label);
        let node = self.node_mut(id);
        node.set("layout_mode", 2i64);
        node.set("fit_content", true);
        node.set("text", text);
        id
    }

    /// A `TextureRect` that stretches to its container.
    pub fn texture_rect(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.new_node(name, NodeKind::Texture);
        let node = self.node_mut(id);
        node.set("layout_mode", 2i64);
        node.set("size_flags_vertical", 3i64);
        node.set("expand_mode", 5i64);
        node.set("stretch_mode", 4i64);
        id
    }

    pub fn node(&self, id: NodeId) -> &LayoutNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut LayoutNode {
        &mut self.nodes[id.0]
    }

    /// Append `child` to `parent`, uniquifying the child's name if a
    /// sibling already claimed it. A rename also re-scopes the child's
    /// script path so two renamed siblings never share a script file.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        let taken = self
            .node(parent)
            .children
            .iter()
            .any(|&sibling| self.node(sibling).name == self.node(child).name);
        if taken {
            let suffix = self.ids.next_id();
            let node = self.node_mut(child);
            let renamed = format!("{}-{}", node.name, suffix);
            log::debug!("sibling name collision: {} -> {}", node.name, renamed);
            node.name = renamed.clone();
            if let Some(script) = node.script.as_mut() {
                script.path = renamed;
            }
        }
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Wrap `payload` in a reference scoped by the node's name and attach it.
    pub fn attach_resource(&mut self, id: NodeId, payload: ResourcePayload) {
        let path = self.node(id).name.clone();
        let resource = ExtResource::new(payload, path, &mut self.ids);
        self.node_mut(id).resources.push(resource);
    }

    /// Attach a script, merging functions by name if one is already there.
    pub fn attach_script(&mut self, id: NodeId, script: ScriptResource) {
        if let Some(existing) = self.node_mut(id).script.as_mut().and_then(ExtResource::script_mut) {
            existing.merge(script);
            return;
        }
        let path = self.node(id).name.clone();
        let resource = ExtResource::new(ResourcePayload::Script(script), path, &mut self.ids);
        self.node_mut(id).script = Some(resource);
    }

    /// Slash-joined ancestor names, root excluded: `""` for the root
    /// itself, `"."` for its direct children.
    pub fn derive_path(&self, id: NodeId) -> String {
        let mut ancestors = Vec::new();
        let mut cursor = self.node(id).parent;
        while let Some(parent) = cursor {
            ancestors.push(self.node(parent).name.as_str());
            cursor = self.node(parent).parent;
        }
        match ancestors.len() {
            0 => String::new(),
            1 => ".".to_string(),
            _ => {
                ancestors.reverse();
                ancestors.remove(0);
                ancestors.join("/")
            }
        }
    }

    /// Depth-first pre-order node sequence, root first.
    pub fn flatten(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        self.flatten_into(root, &mut order);
        order
    }

    fn flatten_into(&self, id: NodeId, order: &mut Vec<NodeId>) {
        order.push(id);
        for &child in &self.node(id).children {
            self.flatten_into(child, order);
        }
    }

    /// Every attached resource plus script, in pre-order traversal order.
    /// Drives the scene header's load-step count and resource ordering.
    pub fn collect_resources(&self, root: NodeId) -> Vec<&ExtResource> {
        let mut resources = Vec::new();
        for id in self.flatten(root) {
            let node = self.node(id);
            resources.extend(node.resources.iter());
            if let Some(script) = &node.script {
                resources.push(script);
            }
        }
        resources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{FontFile, Texture};
    use crate::script::{ready_script, ScriptFunction};

    #[test]
    fn sibling_collision_renames_only_the_newcomer() {
        let mut tree = SceneTree::new();
        let root = tree.new_node("root", NodeKind::VBox);
        let first = tree.new_node("text", NodeKind::Label);
        let second = tree.new_node("text", NodeKind::Label);

        tree.add_child(root, first);
        tree.add_child(root, second);

        assert_eq!(tree.node(first).name, "text");
        assert_ne!(tree.node(second).name, "text");
        assert!(tree.node(second).name.starts_with("text-"));
    }

    #[test]
    fn collision_rename_keeps_script_paths_distinct() {
        let mut tree = SceneTree::new();
        let root = tree.new_node("root", NodeKind::VBox);
        let first = tree.new_node("div-margin", NodeKind::Margin);
        let second = tree.new_node("div-margin", NodeKind::Margin);

        // scripts attach during node construction, before re-parenting
        tree.attach_script(first, ready_script("MarginContainer", vec!["a()".into()]));
        tree.attach_script(second, ready_script("MarginContainer", vec!["b()".into()]));
        tree.add_child(root, first);
        tree.add_child(root, second);

        let first_path = tree.node(first).script.as_ref().unwrap().path_str();
        let second_path = tree.node(second).script.as_ref().unwrap().path_str();
        assert_eq!(first_path, "div-margin.gd");
        assert_ne!(first_path, second_path);
        assert_eq!(second_path, format!("{}.gd", tree.node(second).name));
    }

    #[test]
    fn derive_path_walks_ancestors_without_the_root() {
        let mut tree = SceneTree::new();
        let root = tree.new_node("content", NodeKind::VBox);
        let middle = tree.new_node("body", NodeKind::VBox);
        let leaf = tree.new_node("text", NodeKind::Label);
        tree.add_child(root, middle);
        tree.add_child(middle, leaf);

        assert_eq!(tree.derive_path(root), "");
        assert_eq!(tree.derive_path(middle), ".");
        assert_eq!(tree.derive_path(leaf), "body");
    }

    #[test]
    fn flatten_is_preorder_root_first() {
        let mut tree = SceneTree::new();
        let root = tree.new_node("root", NodeKind::VBox);
        let a = tree.new_node("a", NodeKind::VBox);
        let a1 = tree.new_node("a1", NodeKind::Label);
        let b = tree.new_node("b", NodeKind::VBox);
        tree.add_child(root, a);
        tree.add_child(a, a1);
        tree.add_child(root, b);

        let names: Vec<&str> = tree
            .flatten(root)
            .into_iter()
            .map(|id| tree.node(id).name.as_str())
            .collect();
        assert_eq!(names, vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn attach_script_merges_into_existing() {
        let mut tree = SceneTree::new();
        let root = tree.new_node("root", NodeKind::VBox);

        tree.attach_script(root, ready_script("Node", vec!["first()".into()]));
        let mut second = ScriptResource::new("Node");
        second.add_function(ScriptFunction::new("_ready", vec!["second()".into()]));
        tree.attach_script(root, second);

        let script = tree.node(root).script.as_ref().unwrap().script().unwrap();
        assert_eq!(script.functions.len(), 1);
        assert_eq!(script.functions["_ready"].lines, vec!["first()", "second()"]);
    }

    #[test]
    fn collect_resources_is_traversal_ordered() {
        let mut tree = SceneTree::new();
        let root = tree.new_node("root", NodeKind::VBox);
        let child = tree.new_node("img", NodeKind::Texture);
        tree.add_child(root, child);

        tree.attach_resource(
            root,
            ResourcePayload::Font(FontFile {
                file: "f.woff2".into(),
            }),
        );
        tree.attach_script(root, ready_script("Node", vec![]));
        tree.attach_resource(
            child,
            ResourcePayload::Texture(Texture {
                file: "pic.png".into(),
            }),
        );

        let tags: Vec<&str> = tree
            .collect_resources(root)
            .iter()
            .map(|r| r.type_tag())
            .collect();
        assert_eq!(tags, vec!["FontFile", "Script", "Texture2D"]);
    }

    #[test]
    fn font_size_hook_targets_text_kinds_only() {
        let mut tree = SceneTree::new();
        let label = tree.plain_label("text", "hi");
        let panel = tree.new_node("panel", NodeKind::Panel);

        tree.node_mut(label).apply_font_size(18.0);
        tree.node_mut(panel).apply_font_size(18.0);

        assert_eq!(
            tree.node(label)
                .properties
                .get("theme_override_font_sizes/font_size"),
            Some(&Value::Int(18))
        );
        assert!(tree.node(panel).properties.is_empty());
    }
}
