//! Page-level text extraction from uploaded PDF bytes.

use anyhow::Context;
use report_types::Page;
use tracing::debug;

/// Extract per-page text from a PDF document.
///
/// Page numbers are 1-based in document order. The extractor yields
/// text only; annex tables reach the engine solely through the
/// narrative fallback when served from this path.
pub fn extract_pages(data: &[u8]) -> anyhow::Result<Vec<Page>> {
    let by_page = pdf_extract::extract_text_from_mem_by_pages(data)
        .context("failed to extract text from PDF")?;
    debug!(pages = by_page.len(), "extracted PDF text");

    Ok(by_page
        .into_iter()
        .enumerate()
        .map(|(i, text)| Page::new(i as u32 + 1, text))
        .collect())
}
