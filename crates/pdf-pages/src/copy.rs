//! Copying page objects between documents

use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Copies objects from one source document into an output document.
///
/// Each source object is copied at most once; later references reuse the copy.
pub(crate) struct ObjectCopier<'a> {
    source: &'a Document,
    cache: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    pub fn new(source: &'a Document) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Copy one page as a new page object under `parent`.
    ///
    /// Inherited attributes are resolved onto the copy. References from inside
    /// the page back to itself (annotation `/P` entries) point to the copy.
    pub fn copy_page(
        &mut self,
        output: &mut Document,
        page_id: ObjectId,
        parent: ObjectId,
    ) -> Result<ObjectId> {
        let page_dict = self.source.get_dictionary(page_id)?;
        let new_page_id = output.new_object_id();

        // Duplicate copies of a page map back-references to the newest copy
        let previous = self.cache.insert(page_id, new_page_id);

        let mut new_page = Dictionary::new();
        for (key, value) in page_dict.iter() {
            if key.as_slice() == b"Parent" || key.as_slice() == b"B" {
                continue;
            }
            new_page.set(key.clone(), self.copy_object(output, value)?);
        }

        for key in INHERITABLE {
            if !new_page.has(key) {
                if let Some(value) = self.inherited(page_dict, key) {
                    let value = value.clone();
                    new_page.set(key, self.copy_object(output, &value)?);
                }
            }
        }

        new_page.set("Parent", Object::Reference(parent));
        output
            .objects
            .insert(new_page_id, Object::Dictionary(new_page));

        // Restore so shared resources keep pointing at a stable target
        match previous {
            Some(old) => self.cache.insert(page_id, old),
            None => self.cache.remove(&page_id),
        };

        Ok(new_page_id)
    }

    /// Look up an inheritable attribute on the ancestors of a page
    fn inherited(&self, page_dict: &Dictionary, key: &[u8]) -> Option<&'a Object> {
        let mut parent = page_dict.get(b"Parent").and_then(Object::as_reference).ok();
        let mut depth = 0;

        while let Some(id) = parent {
            // Guard against malformed trees with parent cycles
            depth += 1;
            if depth > 64 {
                log::warn!("Page tree deeper than 64 levels, ignoring inherited {:?}", key);
                return None;
            }

            let dict = self.source.get_dictionary(id).ok()?;
            if let Ok(value) = dict.get(key) {
                return Some(value);
            }
            parent = dict.get(b"Parent").and_then(Object::as_reference).ok();
        }
        None
    }

    /// Deep copy an object, following references.
    ///
    /// References to page-tree nodes that are not being copied become `null`,
    /// so a link to another page does not drag the whole document along.
    pub fn copy_object(&mut self, output: &mut Document, obj: &Object) -> Result<Object> {
        match obj {
            Object::Reference(id) => {
                if let Some(&new_id) = self.cache.get(id) {
                    return Ok(Object::Reference(new_id));
                }

                let referenced = match self.source.get_object(*id) {
                    Ok(referenced) => referenced,
                    Err(e) => {
                        log::warn!("Dropping dangling reference {:?}: {}", id, e);
                        return Ok(Object::Null);
                    }
                };
                if is_page_tree_node(referenced) {
                    return Ok(Object::Null);
                }

                // Reserve the id first so reference cycles terminate
                let new_id = output.new_object_id();
                self.cache.insert(*id, new_id);
                let copied = self.copy_object(output, referenced)?;
                output.objects.insert(new_id, copied);

                Ok(Object::Reference(new_id))
            }
            Object::Dictionary(dict) => Ok(Object::Dictionary(self.copy_dictionary(output, dict)?)),
            Object::Array(arr) => {
                let new_arr: Result<Vec<_>> = arr
                    .iter()
                    .map(|item| self.copy_object(output, item))
                    .collect();
                Ok(Object::Array(new_arr?))
            }
            Object::Stream(stream) => Ok(Object::Stream(Stream {
                dict: self.copy_dictionary(output, &stream.dict)?,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            })),
            _ => Ok(obj.clone()),
        }
    }

    fn copy_dictionary(&mut self, output: &mut Document, dict: &Dictionary) -> Result<Dictionary> {
        let mut new_dict = Dictionary::new();
        for (key, value) in dict.iter() {
            new_dict.set(key.clone(), self.copy_object(output, value)?);
        }
        Ok(new_dict)
    }
}

fn is_page_tree_node(obj: &Object) -> bool {
    match obj {
        Object::Dictionary(dict) => matches!(
            dict.get(b"Type").and_then(Object::as_name),
            Ok(b"Page") | Ok(b"Pages")
        ),
        _ => false,
    }
}
