//! Scene serialization
//!
//! Turns a finished layout tree into the engine's text scene format and
//! writes it to disk together with the generated script files. Nodes are
//! emitted in depth-first pre-order, each block carrying its parent path,
//! so the engine rebuilds the same tree on load.

use crate::error::Result;
use crate::node::{NodeId, SceneTree};
use std::fs;
use std::path::{Path, PathBuf};

const SCENE_FORMAT: u32 = 3;

/// A complete, renderable scene: the node arena, its root and the name
/// the output files are derived from.
pub struct Scene {
    pub tree: SceneTree,
    pub root: NodeId,
    pub name: String,
}

impl Scene {
    pub fn new(tree: SceneTree, root: NodeId, name: impl Into<String>) -> Self {
        Self {
            tree,
            root,
            name: name.into(),
        }
    }

    /// Load steps are every external resource plus the scene itself.
    pub fn load_steps(&self) -> usize {
        self.tree.collect_resources(self.root).len() + 1
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "[gd_scene load_steps={} format={} uid=\"uid://{}\"]\n",
            self.load_steps(),
            SCENE_FORMAT,
            scene_uid(&self.name)
        );

        let resources = self.tree.collect_resources(self.root);
        if !resources.is_empty() {
            out.push('\n');
            for resource in resources {
                out.push_str(&resource.header());
                out.push('\n');
            }
        }

        for id in self.tree.flatten(self.root) {
            out.push('\n');
            out.push_str(&self.render_node(id));
        }
        out
    }

    fn render_node(&self, id: NodeId) -> String {
        let node = self.tree.node(id);

        let mut out = format!("[node name=\"{}\" type=\"{}\"", node.name, node.kind.type_str());
        let parent_path = self.tree.derive_path(id);
        if !parent_path.is_empty() {
            out.push_str(&format!(" parent=\"{}\"", parent_path));
        }
        out.push_str("]\n");

        for (key, value) in &node.properties {
            out.push_str(&format!("{} = {}\n", key, value));
        }
        for resource in &node.resources {
            out.push_str(&format!(
                "{} = ExtResource(\"{}\")\n",
                resource.property_field(),
                resource.id
            ));
        }
        if let Some(script) = &node.script {
            out.push_str(&format!(
                "{} = ExtResource(\"{}\")\n",
                script.property_field(),
                script.id
            ));
        }
        out
    }
}

/// Scene uid derived from a digest of the scene name, so re-running the
/// conversion never churns the uid line.
fn scene_uid(name: &str) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let digest = md5::compute(name);
    digest
        .iter()
        .take(13)
        .map(|byte| ALPHABET[usize::from(*byte) % ALPHABET.len()] as char)
        .collect()
}

/// Writes a scene and its generated scripts into one output directory.
pub struct SceneWriter {
    scene: Scene,
    output_dir: PathBuf,
}

impl SceneWriter {
    pub fn new(scene: Scene, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            scene,
            output_dir: output_dir.into(),
        }
    }

    /// Write `{name}.tscn` plus one `.gd` file per attached script.
    /// Returns the scene file path.
    pub fn write_out(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let scene_file = self.output_dir.join(format!("{}.tscn", self.scene.name));
        let mut rendered = self.scene.render();
        rendered.push('\n');
        fs::write(&scene_file, rendered)?;
        log::info!("wrote scene {}", scene_file.display());

        self.write_out_scripts(&self.output_dir)?;
        Ok(scene_file)
    }

    fn write_out_scripts(&self, dir: &Path) -> Result<()> {
        for resource in self.scene.tree.collect_resources(self.scene.root) {
            let Some(script) = resource.script() else {
                continue;
            };
            let script_file = dir.join(format!("{}.gd", resource.path));
            fs::write(&script_file, script.render())?;
            log::info!("wrote script {}", script_file.display());
        }
        Ok(())
    }
}
