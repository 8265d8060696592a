//! The document engine: page arrangement, undo/redo history, assembling and
//! writing sliced documents, and raster previews.

pub mod commands;
pub mod document;
pub mod render;
pub mod saver;

pub use document::{Document, Page};

#[cfg(test)]
pub(crate) mod testpdf {
    use lopdf::{dictionary, Document, Object, Stream};

    /// MediaBox width used to tell the sample pages apart after a save.
    pub fn width(page: u32) -> i64 {
        500 + page as i64
    }

    pub fn sample(pages: u32) -> Document {
        sample_with_rotation(pages, 0)
    }

    /// Pages carry no attributes of their own; MediaBox and Rotate live on
    /// the shared `Pages` node.
    pub fn sample_inheriting_attributes(pages: u32, rotate: i64) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for _ in 1..=pages {
            let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            kids.push(Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            })));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
                "MediaBox" => vec![0.into(), 0.into(), width(1).into(), 700.into()],
                "Rotate" => rotate,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc
    }

    /// A minimal document with `pages` pages; each page carries a distinct
    /// MediaBox width and, when non-zero, a `/Rotate` entry.
    pub fn sample_with_rotation(pages: u32, rotate: i64) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for number in 1..=pages {
            let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width(number).into(), 700.into()],
                "Contents" => content_id,
            };
            if rotate != 0 {
                page.set("Rotate", Object::Integer(rotate));
            }
            kids.push(Object::Reference(doc.add_object(page)));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc
    }
}
