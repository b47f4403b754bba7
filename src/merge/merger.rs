//! Incremental in-memory PDF merging.
//!
//! [`DocumentMerger`] accumulates parsed documents one at a time, in the
//! order they are appended, and serializes the combined document to a byte
//! buffer. Appends are strictly sequential because the output document is a
//! single shared mutable target.

use lopdf::{Document, Object, ObjectId};

use crate::error::{PdfBenchError, Result};

/// Merges parsed PDF documents into a single output document.
///
/// The first appended document becomes the base; each further document is
/// renumbered past the current maximum object id, its objects are copied
/// over wholesale, and its pages are spliced into the base page tree in
/// order.
#[derive(Debug, Default)]
pub struct DocumentMerger {
    output: Option<Document>,
    max_id: u32,
}

impl DocumentMerger {
    /// Create a merger with an empty output document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages accumulated so far.
    pub fn page_count(&self) -> usize {
        self.output
            .as_ref()
            .map(|doc| doc.get_pages().len())
            .unwrap_or(0)
    }

    /// Append all pages of `doc`, preserving their relative order.
    ///
    /// # Errors
    ///
    /// Returns an error if the output document's catalog or page tree is
    /// malformed and the pages cannot be spliced in.
    pub fn append(&mut self, doc: Document) -> Result<()> {
        let Some(output) = self.output.as_mut() else {
            self.max_id = doc.max_id;
            self.output = Some(doc);
            return Ok(());
        };

        let mut doc = doc;

        // Renumber past the current maximum to avoid object id collisions.
        doc.renumber_objects_with(self.max_id + 1);
        self.max_id = doc.max_id;

        // get_pages is keyed by page number, so values come out in page order.
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

        output.objects.extend(doc.objects);

        add_pages_to_tree(output, &page_ids)
    }

    /// Serialize the accumulated document into a byte buffer.
    ///
    /// Consumes the merger; the output is renumbered and compressed before
    /// serialization, matching what a standalone save would produce.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was appended or serialization fails.
    pub fn finish(self) -> Result<(Vec<u8>, usize)> {
        let mut output = self
            .output
            .ok_or_else(|| PdfBenchError::merge_failed("no documents were appended"))?;

        output.renumber_objects();
        output.compress();

        let page_count = output.get_pages().len();

        let mut buffer = Vec::new();
        output
            .save_to(&mut buffer)
            .map_err(|e| PdfBenchError::serialization_failed(e.to_string()))?;

        Ok((buffer, page_count))
    }
}

/// Splice page references into the output document's page tree.
fn add_pages_to_tree(output: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let catalog = output
        .catalog_mut()
        .map_err(|e| PdfBenchError::merge_failed(format!("failed to get catalog: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| PdfBenchError::merge_failed(format!("failed to get pages reference: {e}")))?;

    let pages_obj = output
        .get_object_mut(pages_id)
        .map_err(|e| PdfBenchError::merge_failed(format!("failed to get pages object: {e}")))?;

    let Object::Dictionary(pages_dict) = pages_obj else {
        return Err(PdfBenchError::merge_failed("pages object is not a dictionary"));
    };

    let kids = pages_dict
        .get_mut(b"Kids")
        .map_err(|_| PdfBenchError::merge_failed("pages dictionary missing Kids array"))?;

    let Object::Array(kids_array) = kids else {
        return Err(PdfBenchError::merge_failed("Kids is not an array"));
    };

    for &page_id in page_ids {
        kids_array.push(Object::Reference(page_id));
    }

    let current_count = pages_dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
    pages_dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}
