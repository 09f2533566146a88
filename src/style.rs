//! Inline style declarations and the ancestor style context
//!
//! Styles reach the compiler pre-inlined into `style` attributes. This
//! module parses those attributes into ordered declaration maps, expands
//! margin/padding shorthands into per-side values, and implements the
//! single-level font inheritance used while descending the token stream.

use indexmap::IndexMap;

/// Ordered `property -> value` map from one `style` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations(IndexMap<String, String>);

impl Declarations {
    /// Parse a raw `style` attribute. Malformed fragments are dropped,
    /// never reported: unknown or broken declarations are not errors.
    pub fn parse(style_attr: &str) -> Self {
        let mut map = IndexMap::new();
        for piece in style_attr.trim().split(';') {
            if let Some((key, value)) = piece.split_once(':') {
                let key = key.trim();
                let value = value.trim();
                if !key.is_empty() && !value.is_empty() {
                    map.insert(key.to_string(), value.to_string());
                }
            }
        }
        Self(map)
    }

    pub fn from_style_attr(attr: Option<&str>) -> Self {
        attr.map(Self::parse).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Any margin or padding declaration present, in either shorthand or
    /// longhand form.
    pub fn has_spacing(&self) -> bool {
        const KEYS: [&str; 10] = [
            "margin",
            "margin-top",
            "margin-right",
            "margin-bottom",
            "margin-left",
            "padding",
            "padding-top",
            "padding-right",
            "padding-bottom",
            "padding-left",
        ];
        KEYS.iter().any(|key| self.0.contains_key(*key))
    }
}

pub const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Four directional spacing values in `top, right, bottom, left` order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxSides {
    pub top: Option<String>,
    pub right: Option<String>,
    pub bottom: Option<String>,
    pub left: Option<String>,
}

impl BoxSides {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    pub fn get(&self, side: &str) -> Option<&str> {
        match side {
            "top" => self.top.as_deref(),
            "right" => self.right.as_deref(),
            "bottom" => self.bottom.as_deref(),
            "left" => self.left.as_deref(),
            _ => None,
        }
    }

    fn set(&mut self, side: &str, value: &str) {
        let slot = match side {
            "top" => &mut self.top,
            "right" => &mut self.right,
            "bottom" => &mut self.bottom,
            "left" => &mut self.left,
            _ => return,
        };
        *slot = Some(value.to_string());
    }

    /// Overlay `other` onto `self`, side by side, where `other` is set.
    fn overlay(&mut self, other: BoxSides) {
        for side in SIDES {
            if let Some(value) = other.get(side) {
                let value = value.to_string();
                self.set(side, &value);
            }
        }
    }
}

/// Expand a `margin`/`padding` shorthand plus its longhands into per-side
/// values. Longhands take precedence over the shorthand when both appear.
pub fn expand_box_shorthand(declarations: &Declarations, property: &str) -> BoxSides {
    let mut sides = BoxSides::default();

    if let Some(shorthand) = declarations.get(property) {
        let parts: Vec<&str> = shorthand.split_whitespace().collect();
        match parts.as_slice() {
            [all] => {
                for side in SIDES {
                    sides.set(side, all);
                }
            }
            [vertical, horizontal] => {
                sides.set("top", vertical);
                sides.set("bottom", vertical);
                sides.set("left", horizontal);
                sides.set("right", horizontal);
            }
            [top, horizontal, bottom] => {
                sides.set("top", top);
                sides.set("bottom", bottom);
                sides.set("left", horizontal);
                sides.set("right", horizontal);
            }
            [top, right, bottom, left] => {
                sides.set("top", top);
                sides.set("right", right);
                sides.set("bottom", bottom);
                sides.set("left", left);
            }
            _ => log::warn!("ignoring {} shorthand with {} parts", property, parts.len()),
        }
    }

    for side in SIDES {
        if let Some(value) = declarations.get(&format!("{}-{}", property, side)) {
            let value = value.to_string();
            sides.set(side, &value);
        }
    }

    sides
}

/// Combined spacing for the margin wrapper: margin first, padding laid
/// over it per side (both map onto the same wrapper constants).
pub fn spacing_sides(declarations: &Declarations) -> BoxSides {
    let mut sides = expand_box_shorthand(declarations, "margin");
    sides.overlay(expand_box_shorthand(declarations, "padding"));
    sides
}

/// Ancestor style stack for font-related declarations.
///
/// An immutable value passed down the recursive descent: entering a
/// structural node pushes that node's declarations, and lookups merge the
/// top of the stack with the current tag's own declarations (own wins).
/// This is the only cascading behavior implemented.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    frames: Vec<Declarations>,
}

impl StyleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, declarations: Declarations) -> Self {
        let mut frames = self.frames.clone();
        frames.push(declarations);
        Self { frames }
    }

    fn top(&self) -> Option<&Declarations> {
        self.frames.last()
    }

    /// Single-level override lookup: `own` first, then the enclosing frame.
    pub fn lookup<'a>(&'a self, own: &'a Declarations, key: &str) -> Option<&'a str> {
        own.get(key).or_else(|| self.top().and_then(|d| d.get(key)))
    }

    pub fn font_size<'a>(&'a self, own: &'a Declarations) -> Option<&'a str> {
        self.lookup(own, "font-size")
    }

    pub fn font_family<'a>(&'a self, own: &'a Declarations) -> Option<&'a str> {
        self.lookup(own, "font-family")
    }
}
