//! Ordered image list
//!
//! Entries keep a display handle of type `H` (a texture in the GUI). A handle is
//! released by dropping it, so removing an entry or replacing its crop frees the
//! old handles exactly once.

use crate::types::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

fn next_image_id() -> ImageId {
    ImageId(NEXT_IMAGE_ID.fetch_add(1, Ordering::SeqCst))
}

/// Last crop applied to an entry
#[derive(Debug)]
pub struct AppliedCrop<H> {
    pub image: CroppedImage,
    pub display: H,
    pub rect: CropRect,
}

/// One user-supplied image awaiting composition
#[derive(Debug)]
pub struct ImageEntry<H> {
    id: ImageId,
    file: ImageFile,
    display: H,
    crop: Option<AppliedCrop<H>>,
}

impl<H> ImageEntry<H> {
    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn file(&self) -> &ImageFile {
        &self.file
    }

    pub fn display(&self) -> &H {
        &self.display
    }

    pub fn crop(&self) -> Option<&AppliedCrop<H>> {
        self.crop.as_ref()
    }

    /// Content used for composition: the cropped replacement if present
    pub fn effective_bytes(&self) -> Arc<[u8]> {
        match &self.crop {
            Some(crop) => Arc::clone(&crop.image.bytes),
            None => Arc::clone(&self.file.bytes),
        }
    }

    pub fn effective_display(&self) -> &H {
        match &self.crop {
            Some(crop) => &crop.display,
            None => &self.display,
        }
    }

    pub fn effective_dimensions(&self) -> (u32, u32) {
        match &self.crop {
            Some(crop) => (crop.image.width, crop.image.height),
            None => self.file.dimensions,
        }
    }
}

/// Images in composition order
#[derive(Debug)]
pub struct ImageStore<H> {
    entries: Vec<ImageEntry<H>>,
}

impl<H> Default for ImageStore<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> ImageStore<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageEntry<H>> {
        self.entries.iter()
    }

    pub fn get(&self, id: ImageId) -> Option<&ImageEntry<H>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn position(&self, id: ImageId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn ids(&self) -> Vec<ImageId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    /// Append new entries at the end, each with a fresh identity
    pub fn add(&mut self, files: impl IntoIterator<Item = (ImageFile, H)>) -> Vec<ImageId> {
        let mut added = Vec::new();
        for (file, display) in files {
            let id = next_image_id();
            log::debug!("Adding image {} ({})", id, file.name);
            self.entries.push(ImageEntry {
                id,
                file,
                display,
                crop: None,
            });
            added.push(id);
        }
        added
    }

    /// Remove an entry and drop its handles. Returns false if the id is unknown.
    pub fn remove(&mut self, id: ImageId) -> bool {
        match self.position(id) {
            Some(index) => {
                let entry = self.entries.remove(index);
                log::debug!("Removed image {} ({})", entry.id, entry.file.name);
                true
            }
            None => false,
        }
    }

    /// Move the entry at `from` so that it ends up at `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(ComposeError::InvalidPosition { index, len });
            }
        }

        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        Ok(())
    }

    /// Attach or replace the crop of an entry.
    ///
    /// Returns false, dropping the new handle, when the entry no longer exists.
    pub fn set_crop(&mut self, id: ImageId, image: CroppedImage, display: H, rect: CropRect) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                // Release the superseded handle before attaching the new one
                drop(entry.crop.take());
                entry.crop = Some(AppliedCrop {
                    image,
                    display,
                    rect,
                });
                true
            }
            None => {
                log::debug!("Ignoring crop for removed image {}", id);
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Effective content of every entry, in list order
    pub fn effective_sources(&self) -> Vec<Arc<[u8]>> {
        self.entries.iter().map(ImageEntry::effective_bytes).collect()
    }
}

impl<'a, H> IntoIterator for &'a ImageStore<H> {
    type Item = &'a ImageEntry<H>;
    type IntoIter = std::slice::Iter<'a, ImageEntry<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
