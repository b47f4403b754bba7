//! Shared helpers for integration tests.
//!
//! Test PDFs are built programmatically with `lopdf`; each page carries a
//! distinct MediaBox width so page ordering stays assertable after a merge.

use lopdf::{Document, Object, ObjectId, dictionary};
use std::path::{Path, PathBuf};

/// Build a minimal PDF with one empty page per entry in `widths`.
pub fn pdf_bytes(widths: &[i64]) -> Vec<u8> {
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

/// Write a test PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, widths: &[i64]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_bytes(widths)).expect("failed to write test PDF");
    path
}

/// MediaBox widths of a serialized document's pages, in page order.
pub fn page_widths(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).expect("failed to parse document");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let Object::Dictionary(page_dict) = doc.get_object(page_id).unwrap() else {
                panic!("page is not a dictionary");
            };
            let Object::Array(mediabox) = page_dict.get(b"MediaBox").unwrap() else {
                panic!("MediaBox is not an array");
            };
            mediabox[2].as_i64().unwrap()
        })
        .collect()
}
