use std::collections::{HashMap, HashSet};
use std::path::Path;

use lopdf::{Dictionary, Object, ObjectId, Stream};

use super::document::{Document, Page};
use crate::app::error::Result;

/// A self-contained snapshot of the document taken on the UI thread, so the
/// save worker owns everything it needs and shares nothing.
pub struct SaveJob {
    source: lopdf::Document,
    pages: Vec<Page>,
}

impl SaveJob {
    pub fn new(document: &Document) -> Self {
        Self {
            source: document.source().clone(),
            pages: document.pages().to_vec(),
        }
    }

    /// Assemble the arranged pages into a fresh document and write it out.
    pub fn write_to(&self, dest: &Path) -> Result<()> {
        let mut out = self.assemble()?;
        out.save(dest)?;
        Ok(())
    }

    fn assemble(&self) -> Result<lopdf::Document> {
        let src = &self.source;
        let mut out = lopdf::Document::with_version(src.version.clone());
        let pages_id = out.new_object_id();

        // Everything each kept page references, except its parent chain;
        // the output gets a single flat Pages node instead. Attributes the
        // page inherits from that chain are flattened onto the page itself.
        let mut refs: HashSet<ObjectId> = HashSet::new();
        let mut inherited: HashMap<ObjectId, Vec<(Vec<u8>, Object)>> = HashMap::new();
        for page in &self.pages {
            refs.insert(page.id);
            if let Ok(Object::Dictionary(dict)) = src.get_object(page.id) {
                for (key, value) in dict.iter() {
                    if key == b"Parent" {
                        continue;
                    }
                    collect_refs(value, src, &mut refs);
                }

                let mut attributes = Vec::new();
                for key in INHERITABLE_ATTRIBUTES {
                    if dict.get(key).is_err() {
                        if let Some(value) = inherited_attribute(src, dict, key) {
                            collect_refs(&value, src, &mut refs);
                            attributes.push((key.to_vec(), value));
                        }
                    }
                }
                if !attributes.is_empty() {
                    inherited.insert(page.id, attributes);
                }
            }
        }

        let mut mapping: HashMap<ObjectId, ObjectId> = HashMap::new();
        for old_id in &refs {
            mapping.insert(*old_id, out.new_object_id());
        }

        for (old_id, new_id) in &mapping {
            if let Some(object) = src.objects.get(old_id) {
                out.objects.insert(*new_id, remap_object(object, &mapping));
            }
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let new_id = mapping[&page.id];
            if let Some(Object::Dictionary(dict)) = out.objects.get_mut(&new_id) {
                dict.set("Parent", pages_id);
                if let Some(attributes) = inherited.get(&page.id) {
                    for (key, value) in attributes {
                        dict.set(key.clone(), remap_object(value, &mapping));
                    }
                }
                if page.rotation != 0 {
                    let base = dict
                        .get(b"Rotate")
                        .ok()
                        .and_then(|object| object.as_i64().ok())
                        .unwrap_or(0);
                    dict.set(
                        "Rotate",
                        Object::Integer((base + page.rotation).rem_euclid(360)),
                    );
                }
            }
            kids.push(Object::Reference(new_id));
        }

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Count", Object::Integer(self.pages.len() as i64));
        pages_dict.set("Kids", Object::Array(kids));
        out.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog_dict = Dictionary::new();
        catalog_dict.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog_dict.set("Pages", Object::Reference(pages_id));
        let catalog_id = out.add_object(Object::Dictionary(catalog_dict));
        out.trailer.set("Root", catalog_id);

        out.max_id = out.objects.len() as u32;
        out.renumber_objects();
        out.compress();

        Ok(out)
    }
}

/// Page attributes that may live on an ancestor `Pages` node instead of the
/// page itself. The output has a bare `Pages` root, so these must move down.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

fn inherited_attribute(src: &lopdf::Document, page_dict: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent_id = page_dict.get(b"Parent").ok()?.as_reference().ok()?;
    loop {
        let dict = src.get_object(parent_id).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
}

fn collect_refs(object: &Object, doc: &lopdf::Document, set: &mut HashSet<ObjectId>) {
    match object {
        Object::Reference(id) => {
            if set.insert(*id) {
                if let Ok(target) = doc.get_object(*id) {
                    collect_refs(target, doc, set);
                }
            }
        }
        Object::Array(items) => {
            for item in items {
                collect_refs(item, doc, set);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter() {
                collect_refs(value, doc, set);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter() {
                collect_refs(value, doc, set);
            }
        }
        _ => {}
    }
}

fn remap_object(object: &Object, mapping: &HashMap<ObjectId, ObjectId>) -> Object {
    match object {
        Object::Reference(id) => match mapping.get(id) {
            Some(new_id) => Object::Reference(*new_id),
            None => Object::Reference(*id),
        },
        Object::Array(items) => Object::Array(
            items
                .iter()
                .map(|item| remap_object(item, mapping))
                .collect(),
        ),
        Object::Dictionary(dict) => {
            let mut remapped = Dictionary::new();
            for (key, value) in dict.iter() {
                remapped.set(key.clone(), remap_object(value, mapping));
            }
            Object::Dictionary(remapped)
        }
        Object::Stream(stream) => {
            let mut remapped = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                remapped.set(key.clone(), remap_object(value, mapping));
            }
            Object::Stream(Stream::new(remapped, stream.content.clone()))
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testpdf;
    use super::*;

    fn open_sample(pages: u32) -> (tempfile::TempDir, Document) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pdf");
        testpdf::sample(pages).save(&path).unwrap();
        let document = Document::open(&path).unwrap();
        (dir, document)
    }

    fn saved_pages(document: &Document, dir: &tempfile::TempDir) -> lopdf::Document {
        let dest = dir.path().join("out.pdf");
        SaveJob::new(document).write_to(&dest).unwrap();
        lopdf::Document::load(&dest).unwrap()
    }

    /// The sample marks each source page with a distinct MediaBox width.
    fn media_width(doc: &lopdf::Document, id: ObjectId) -> i64 {
        let dict = doc.get_object(id).unwrap().as_dict().unwrap();
        let media_box = dict.get(b"MediaBox").unwrap().as_array().unwrap();
        media_box[2].as_i64().unwrap()
    }

    fn rotation(doc: &lopdf::Document, id: ObjectId) -> i64 {
        let dict = doc.get_object(id).unwrap().as_dict().unwrap();
        dict.get(b"Rotate")
            .ok()
            .and_then(|object| object.as_i64().ok())
            .unwrap_or(0)
    }

    #[test]
    fn test_untouched_document_round_trips() {
        let (dir, document) = open_sample(3);
        let saved = saved_pages(&document, &dir);

        let pages: Vec<ObjectId> = saved.get_pages().into_values().collect();
        assert_eq!(pages.len(), 3);
        let widths: Vec<i64> = pages.iter().map(|&id| media_width(&saved, id)).collect();
        assert_eq!(widths, vec![testpdf::width(1), testpdf::width(2), testpdf::width(3)]);
    }

    #[test]
    fn test_removed_pages_are_absent() {
        let (dir, mut document) = open_sample(4);
        document.remove_pages(&[0, 2]);

        let saved = saved_pages(&document, &dir);
        let pages: Vec<ObjectId> = saved.get_pages().into_values().collect();
        assert_eq!(pages.len(), 2);
        let widths: Vec<i64> = pages.iter().map(|&id| media_width(&saved, id)).collect();
        assert_eq!(widths, vec![testpdf::width(2), testpdf::width(4)]);
    }

    #[test]
    fn test_reordered_pages_keep_arrangement_order() {
        let (dir, mut document) = open_sample(3);
        document.move_page(2, 0);

        let saved = saved_pages(&document, &dir);
        let pages: Vec<ObjectId> = saved.get_pages().into_values().collect();
        let widths: Vec<i64> = pages.iter().map(|&id| media_width(&saved, id)).collect();
        assert_eq!(widths, vec![testpdf::width(3), testpdf::width(1), testpdf::width(2)]);
    }

    #[test]
    fn test_rotation_is_written_to_page_dictionaries() {
        let (dir, mut document) = open_sample(2);
        document.rotate_pages_right(&[0]);
        document.rotate_pages_left(&[1]);

        let saved = saved_pages(&document, &dir);
        let pages: Vec<ObjectId> = saved.get_pages().into_values().collect();
        assert_eq!(rotation(&saved, pages[0]), 90);
        assert_eq!(rotation(&saved, pages[1]), 270);
    }

    #[test]
    fn test_rotation_accumulates_onto_existing_rotate_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotated.pdf");
        testpdf::sample_with_rotation(1, 180).save(&path).unwrap();

        let mut document = Document::open(&path).unwrap();
        document.rotate_pages_right(&[0]);

        let saved = saved_pages(&document, &dir);
        let pages: Vec<ObjectId> = saved.get_pages().into_values().collect();
        assert_eq!(rotation(&saved, pages[0]), 270);
    }

    #[test]
    fn test_inherited_attributes_are_flattened_onto_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inherited.pdf");
        testpdf::sample_inheriting_attributes(2, 90)
            .save(&path)
            .unwrap();

        let mut document = Document::open(&path).unwrap();
        document.rotate_pages_right(&[1]);

        let saved = saved_pages(&document, &dir);
        let pages: Vec<ObjectId> = saved.get_pages().into_values().collect();
        assert_eq!(pages.len(), 2);

        // The flat Pages root carries no attributes, so each page must now
        // own the MediaBox and Rotate it used to inherit.
        assert_eq!(media_width(&saved, pages[0]), testpdf::width(1));
        assert_eq!(rotation(&saved, pages[0]), 90);
        assert_eq!(rotation(&saved, pages[1]), 180);
    }

    #[test]
    fn test_write_to_unwritable_destination_fails() {
        let (dir, document) = open_sample(1);
        let dest = dir.path().join("missing").join("out.pdf");
        assert!(SaveJob::new(&document).write_to(&dest).is_err());
    }
}
