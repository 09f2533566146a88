//! Margin wrapper synthesis
//!
//! A tag carrying any padding or margin declaration gets a synthetic
//! `MarginContainer` parent that owns the four spacing constants, leaving
//! the wrapped node's own properties untouched. Spacing values that only
//! resolve at runtime turn into a generated `_ready` function instead of
//! static constants.

use crate::css::{self, CssValue};
use crate::error::Result;
use crate::node::{NodeId, NodeKind, SceneTree, Value};
use crate::script::{constant_override_lines, ready_script};
use crate::style::{spacing_sides, Declarations, SIDES};

/// Build the wrapper for `base_name` if its declarations carry spacing.
///
/// The caller re-parents the wrapped node under the returned wrapper.
pub fn margin_wrapper(
    tree: &mut SceneTree,
    base_name: &str,
    declarations: &Declarations,
) -> Result<Option<NodeId>> {
    if !declarations.has_spacing() {
        return Ok(None);
    }
    let sides = spacing_sides(declarations);
    if sides.is_empty() {
        return Ok(None);
    }

    let wrapper = tree.new_node(format!("{}-margin", base_name), NodeKind::Margin);
    {
        let node = tree.node_mut(wrapper);
        node.set("layout_mode", 2i64);
        node.set("size_flags_horizontal", 3i64);
        node.set("size_flags_vertical", 3i64);
    }

    let mut fragments = Vec::new();
    for side in SIDES {
        let Some(raw) = sides.get(side) else { continue };
        let constant = format!("margin_{}", side);
        match css::interpret(raw)? {
            CssValue::Static(number) => {
                tree.node_mut(wrapper).set(
                    format!("theme_override_constants/{}", constant),
                    Value::from_number(number),
                );
            }
            CssValue::Runtime(expr) => {
                log::debug!("{}: {} computed at scene start", base_name, constant);
                fragments.extend(constant_override_lines(&constant, &expr));
            }
            CssValue::Literal(keyword) => {
                tree.node_mut(wrapper)
                    .set(format!("theme_override_constants/{}", constant), keyword);
            }
        }
    }

    if !fragments.is_empty() {
        tree.attach_script(wrapper, ready_script(NodeKind::Margin.type_str(), fragments));
    }

    Ok(Some(wrapper))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_spacing_becomes_constants() {
        let mut tree = SceneTree::new();
        let decls = Declarations::parse("padding: 10px 20px");
        let wrapper = margin_wrapper(&mut tree, "body", &decls).unwrap().unwrap();

        let node = tree.node(wrapper);
        assert_eq!(node.name, "body-margin");
        assert_eq!(node.kind, NodeKind::Margin);
        assert_eq!(
            node.properties.get("theme_override_constants/margin_top"),
            Some(&Value::Int(10))
        );
        assert_eq!(
            node.properties.get("theme_override_constants/margin_left"),
            Some(&Value::Int(20))
        );
        assert!(node.script.is_none());
    }

    #[test]
    fn runtime_spacing_becomes_a_ready_fragment() {
        let mut tree = SceneTree::new();
        let decls = Declarations::parse("margin-top: 10vh; margin-left: 4px");
        let wrapper = margin_wrapper(&mut tree, "div", &decls).unwrap().unwrap();

        let node = tree.node(wrapper);
        // the runtime side is no longer a static property
        assert!(node
            .properties
            .get("theme_override_constants/margin_top")
            .is_none());
        assert_eq!(
            node.properties.get("theme_override_constants/margin_left"),
            Some(&Value::Int(4))
        );

        let script = node.script.as_ref().unwrap().script().unwrap();
        assert_eq!(script.source, "MarginContainer");
        let ready = &script.functions["_ready"];
        assert_eq!(ready.lines.len(), 2);
        assert!(ready.lines[0].starts_with("var margin_top = 0.1 *"));
        assert!(ready.lines[1].contains("add_theme_constant_override(\"margin_top\""));
    }

    #[test]
    fn auto_stays_a_keyword_property() {
        let mut tree = SceneTree::new();
        let decls = Declarations::parse("margin-left: auto");
        let wrapper = margin_wrapper(&mut tree, "div", &decls).unwrap().unwrap();
        assert_eq!(
            tree.node(wrapper)
                .properties
                .get("theme_override_constants/margin_left"),
            Some(&Value::Str("auto".to_string()))
        );
    }

    #[test]
    fn no_spacing_means_no_wrapper() {
        let mut tree = SceneTree::new();
        let decls = Declarations::parse("color: red");
        assert!(margin_wrapper(&mut tree, "div", &decls).unwrap().is_none());
    }

    #[test]
    fn bad_length_aborts() {
        let mut tree = SceneTree::new();
        let decls = Declarations::parse("margin-left: 7q");
        assert!(margin_wrapper(&mut tree, "div", &decls).is_err());
    }
}
