//! Merge pipeline: document accumulation and the serialized result.

mod merger;

pub use merger::DocumentMerger;

/// The serialized output of a successful merge.
///
/// Immutable once created; a session replaces it wholesale on the next
/// successful merge and drops it on clear.
#[derive(Debug, Clone)]
pub struct MergeResult {
    bytes: Vec<u8>,
    page_count: usize,
}

impl MergeResult {
    /// Fixed download filename for merged output.
    pub const FILENAME: &'static str = "merged.pdf";

    /// Content type of the merged output.
    pub const CONTENT_TYPE: &'static str = "application/pdf";

    pub(crate) fn new(bytes: Vec<u8>, page_count: usize) -> Self {
        Self { bytes, page_count }
    }

    /// The serialized document bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of pages in the merged document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Size of the serialized document in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty. A successful merge never produces this.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Build a minimal PDF with one empty page per entry in `widths`, each page
/// carrying its width as a MediaBox marker so ordering stays assertable
/// after a merge.
#[cfg(test)]
pub(crate) fn test_pdf_bytes(widths: &[i64]) -> Vec<u8> {
    use lopdf::{Document, Object, ObjectId, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let mut page_ids: Vec<Object> = Vec::new();
    for &width in widths {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
        });
        page_ids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => widths.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("failed to save test PDF");
    buffer
}
