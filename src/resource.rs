//! External resource references
//!
//! Scripts, fonts and textures attached to layout nodes are wrapped in a
//! reference carrying an opaque identifier, a type tag and the path the
//! scene serializer writes. Identifiers are handed out once and never
//! recycled.

use crate::script::ScriptResource;

/// Deterministic identifier source, scoped to one run.
///
/// The ids look like the engine's own five-letter resource ids but come
/// from a monotonic counter so repeated runs produce identical output.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        let mut n = self.next;
        self.next += 1;
        let mut letters = ['a'; 5];
        for slot in letters.iter_mut().rev() {
            *slot = (b'a' + (n % 26) as u8) as char;
            n /= 26;
        }
        letters.iter().collect()
    }
}

/// A font file shipped with the project assets.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFile {
    pub file: String,
}

/// An image file referenced by a texture node.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub file: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourcePayload {
    Script(ScriptResource),
    Font(FontFile),
    Texture(Texture),
}

/// One `[ext_resource ...]` entry of the emitted scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtResource {
    pub id: String,
    pub payload: ResourcePayload,
    /// Path stem; scoped by the owning node's name for scripts.
    pub path: String,
}

impl ExtResource {
    pub fn new(payload: ResourcePayload, path: impl Into<String>, ids: &mut IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            payload,
            path: path.into(),
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self.payload {
            ResourcePayload::Script(_) => "Script",
            ResourcePayload::Font(_) => "FontFile",
            ResourcePayload::Texture(_) => "Texture2D",
        }
    }

    /// Node property this resource is assigned to.
    pub fn property_field(&self) -> &'static str {
        match self.payload {
            ResourcePayload::Script(_) => "script",
            ResourcePayload::Font(_) => "theme_override_fonts/normal_font",
            ResourcePayload::Texture(_) => "texture",
        }
    }

    /// On-disk path written into the resource header.
    pub fn path_str(&self) -> String {
        match &self.payload {
            ResourcePayload::Script(_) => format!("{}.gd", self.path),
            ResourcePayload::Font(font) => format!("res://assets/fonts/{}", font.file),
            ResourcePayload::Texture(texture) => texture.file.clone(),
        }
    }

    pub fn header(&self) -> String {
        format!(
            "[ext_resource type=\"{}\" path=\"{}\" id=\"{}\"]",
            self.type_tag(),
            self.path_str(),
            self.id
        )
    }

    pub fn script(&self) -> Option<&ScriptResource> {
        match &self.payload {
            ResourcePayload::Script(script) => Some(script),
            _ => None,
        }
    }

    pub fn script_mut(&mut self) -> Option<&mut ScriptResource> {
        match &mut self.payload {
            ResourcePayload::Script(script) => Some(script),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_deterministic_and_unique() {
        let mut ids = IdGenerator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        assert_eq!(first, "aaaaa");
        assert_eq!(second, "aaaab");
        assert_ne!(first, second);

        let mut again = IdGenerator::new();
        assert_eq!(again.next_id(), "aaaaa");
    }

    #[test]
    fn id_counter_carries_into_higher_digits() {
        let mut ids = IdGenerator::new();
        let mut last = String::new();
        for _ in 0..27 {
            last = ids.next_id();
        }
        assert_eq!(last, "aaaba");
    }

    #[test]
    fn resource_headers_follow_payload_type() {
        let mut ids = IdGenerator::new();
        let font = ExtResource::new(
            ResourcePayload::Font(FontFile {
                file: "body-font.woff2".into(),
            }),
            "content",
            &mut ids,
        );
        assert_eq!(
            font.header(),
            "[ext_resource type=\"FontFile\" path=\"res://assets/fonts/body-font.woff2\" id=\"aaaaa\"]"
        );

        let script = ExtResource::new(
            ResourcePayload::Script(ScriptResource::new("Node")),
            "content",
            &mut ids,
        );
        assert_eq!(script.path_str(), "content.gd");
        assert_eq!(script.property_field(), "script");
    }
}
