use std::fmt::Display;

use lopdf::Document;
use tracing::{debug, warn};

use super::ExtractionError;

/// Extracts text page by page in page order, concatenated without separators.
///
/// A page whose text cannot be decoded contributes nothing. When every page
/// comes back empty, the whole document is retried once through `pdf-extract`,
/// which copes with more font encodings.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let pages = doc
        .get_pages()
        .into_keys()
        .map(|page_number| (page_number, doc.extract_text(&[page_number])));

    Ok(join_pages(pages, || pdf_extract::extract_text_from_mem(bytes)))
}

fn join_pages<E, F>(
    pages: impl IntoIterator<Item = (u32, Result<String, E>)>,
    fallback: impl FnOnce() -> Result<String, F>,
) -> String
where
    E: Display,
    F: Display,
{
    let mut text = String::new();
    let mut page_count = 0usize;
    for (page_number, page) in pages {
        page_count += 1;
        match page {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => warn!("Skipping unreadable PDF page {page_number}: {e}"),
        }
    }

    if page_count > 0 && text.trim().is_empty() {
        match fallback() {
            Ok(whole) => return whole,
            Err(e) => debug!("pdf-extract fallback produced no text: {e}"),
        }
    }

    text
}
