//! Generated GDScript fragments
//!
//! Nodes accumulate named, mergeable blocks of runtime code: lifecycle
//! hooks, `@onready` variable declarations and signal wiring. Independent
//! rules (margin wrapper, link wiring) contribute through the same merge
//! path so one node ends up with a single coherent script.

use indexmap::IndexMap;

/// One `func name():` block of generated code.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFunction {
    pub name: String,
    pub lines: Vec<String>,
}

impl ScriptFunction {
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("func {}():\n", self.name);
        if self.lines.is_empty() {
            out.push_str("\tpass\n");
        } else {
            for line in &self.lines {
                out.push('\t');
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// A GDScript resource attached to a node.
///
/// `source` is the node type the script extends. Functions are keyed by
/// name; adding a function that already exists concatenates its lines
/// after the existing ones instead of replacing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptResource {
    pub source: String,
    pub onready: IndexMap<String, String>,
    pub functions: IndexMap<String, ScriptFunction>,
}

impl ScriptResource {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            onready: IndexMap::new(),
            functions: IndexMap::new(),
        }
    }

    pub fn add_function(&mut self, function: ScriptFunction) {
        match self.functions.get_mut(&function.name) {
            Some(existing) => existing.lines.extend(function.lines),
            None => {
                self.functions.insert(function.name.clone(), function);
            }
        }
    }

    pub fn add_onready(&mut self, name: impl Into<String>, expr: impl Into<String>) {
        self.onready.insert(name.into(), expr.into());
    }

    /// Merge another script into this one, function by function.
    pub fn merge(&mut self, other: ScriptResource) {
        for (_, function) in other.functions {
            self.add_function(function);
        }
        for (name, expr) in other.onready {
            self.onready.insert(name, expr);
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("extends {}\n\n", self.source);
        if !self.onready.is_empty() {
            for (name, expr) in &self.onready {
                out.push_str(&format!("@onready var {} = {}\n", name, expr));
            }
            out.push('\n');
        }
        for function in self.functions.values() {
            out.push_str(&function.render());
            out.push('\n');
        }
        out
    }
}

/// A `_ready` script for `node_type` built from pre-rendered code lines.
pub fn ready_script(node_type: &str, lines: Vec<String>) -> ScriptResource {
    let mut script = ScriptResource::new(node_type);
    script.add_function(ScriptFunction::new("_ready", lines));
    script
}

/// Lines that bind a local to a node path and wire one of its signals.
pub fn connection_lines(
    var_name: &str,
    node_path: &str,
    signal: &str,
    method_name: &str,
) -> Vec<String> {
    vec![
        format!("var {} = self.get_node(\"{}\")", var_name, node_path),
        format!("{}.{}.connect({})", var_name, signal, method_name),
    ]
}

/// Lines that declare a runtime-computed constant override, used when a
/// CSS length only resolves at scene start.
pub fn constant_override_lines(constant: &str, expr: &str) -> Vec<String> {
    vec![
        format!("var {} = {}", constant, expr),
        format!("add_theme_constant_override(\"{}\", {})", constant, constant),
    ]
}

/// Handler that navigates to another scene and announces the jump.
pub fn goto_scene_function(method_name: &str, scene_path: &str) -> ScriptFunction {
    ScriptFunction::new(
        method_name,
        vec![
            format!("Global.goto_scene(\"{}\")", scene_path),
            "Global.on_internal_link_press.emit()".to_string(),
        ],
    )
}
