//! Tag → texture handle registry.
//!
//! Textures are registered once while the scene is prepared and receive the
//! next free slot. Draw calls refer to textures by tag; the registry resolves a
//! tag to its slot (or handle) with a linear search every frame.

use crate::resources::texture::TextureError;

/// Number of texture slots a scene may fill.
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// A registered texture: its tag, the slot it was given and the backend handle.
#[derive(Clone, Debug)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub slot: usize,
    pub handle: H,
}

#[derive(Debug)]
pub struct TextureRegistry<H> {
    entries: Vec<TextureEntry<H>>,
}

impl<H> TextureRegistry<H> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a texture and return its slot.
    ///
    /// Duplicate tags are accepted; lookups only ever see the first one.
    pub fn register(&mut self, tag: &str, handle: H) -> Result<usize, TextureError> {
        if self.is_full() {
            return Err(TextureError::SlotsExhausted(MAX_TEXTURE_SLOTS));
        }
        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            slot,
            handle,
        });
        Ok(slot)
    }

    pub fn find_texture_id(&self, tag: &str) -> Option<&H> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.handle)
    }

    pub fn find_texture_slot(&self, tag: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.tag == tag)
    }

    pub fn get(&self, slot: usize) -> Option<&TextureEntry<H>> {
        self.entries.get(slot)
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_TEXTURE_SLOTS
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry<H>> {
        self.entries.iter()
    }

    /// Drop every handle. Slots are handed out from 0 again afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
