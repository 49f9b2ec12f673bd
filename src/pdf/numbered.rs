//! Two-pass page numbering.
//!
//! The footer shows `page/total`, which requires the total page count before
//! any page can be finalized. Pages are therefore captured as live canvas
//! snapshots while the document is produced, and only written out once the
//! end of the document is known:
//!
//! - COLLECTING: every completed page is captured as a snapshot of its
//!   drawing state (not finished bytes) and a fresh canvas is installed.
//!   No footer is drawn.
//! - REPLAYING: entered on `finish()`, when the total equals the number of
//!   snapshots. Each snapshot is restored in order, the footer is stamped
//!   with the now-known total, and only then is the page finalized.
//! - DONE: the document is serialized exactly once after replay.

use pdf_writer::{Finish, Pdf, Rect, Ref};

use super::canvas::{Font, PageCanvas};

/// Footer text position: right-aligned this far from the right page edge,
/// baseline half an inch above the bottom.
const FOOTER_RIGHT_INSET: f32 = 40.0;
const FOOTER_BASELINE: f32 = 36.0;
const FOOTER_FONT_SIZE: f32 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Collecting,
    Replaying,
    Done,
}

/// Streaming page writer with deferred footers.
pub struct NumberedDocument {
    page_width: f32,
    page_height: f32,
    phase: Phase,
    snapshots: Vec<PageCanvas>,
    current: PageCanvas,
}

impl NumberedDocument {
    pub fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            phase: Phase::Collecting,
            snapshots: Vec::new(),
            current: PageCanvas::new(),
        }
    }

    /// The canvas of the page currently being drawn.
    pub fn canvas(&mut self) -> &mut PageCanvas {
        &mut self.current
    }

    /// Complete the current page: capture its drawing state into the
    /// snapshot list and start a fresh page context. Footers are not drawn
    /// here; the total page count is not known yet.
    pub fn end_page(&mut self) {
        debug_assert_eq!(self.phase, Phase::Collecting);
        let full_page = std::mem::take(&mut self.current);
        self.snapshots.push(full_page);
    }

    /// Number of pages captured so far.
    pub fn pages_collected(&self) -> usize {
        self.snapshots.len()
    }

    /// End of document: replay every captured page with the footer stamped,
    /// then serialize the PDF exactly once.
    pub fn finish(mut self) -> Vec<u8> {
        if !self.current.is_empty() {
            self.end_page();
        }
        if self.snapshots.is_empty() {
            // A document always has at least one (blank) page.
            self.snapshots.push(PageCanvas::new());
        }

        self.phase = Phase::Replaying;
        let total = self.snapshots.len();
        log::debug!("replaying {total} captured pages with footers");

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let helvetica_id = Ref::new(3);
        let helvetica_bold_id = Ref::new(4);
        let mut next_ref = 5;

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.type1_font(helvetica_id)
            .base_font(Font::Helvetica.base_font());
        pdf.type1_font(helvetica_bold_id)
            .base_font(Font::HelveticaBold.base_font());

        let mut page_ids = Vec::with_capacity(total);
        for (index, snapshot) in self.snapshots.drain(..).enumerate() {
            // Restore the captured state as the current page, stamp the
            // footer, then finalize.
            let mut canvas = snapshot;
            canvas.text_right(
                self.page_width - FOOTER_RIGHT_INSET,
                FOOTER_BASELINE,
                Font::Helvetica,
                FOOTER_FONT_SIZE,
                &format!("{}/{}", index + 1, total),
            );

            let page_id = Ref::new(next_ref);
            let content_id = Ref::new(next_ref + 1);
            next_ref += 2;
            page_ids.push(page_id);

            pdf.stream(content_id, &canvas.finish());

            let mut page = pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height));
            page.parent(page_tree_id);
            page.contents(content_id);
            page.resources()
                .fonts()
                .pair(Font::Helvetica.resource_name(), helvetica_id)
                .pair(Font::HelveticaBold.resource_name(), helvetica_bold_id);
            page.finish();
        }

        pdf.pages(page_tree_id)
            .kids(page_ids)
            .count(total as i32);

        self.phase = Phase::Done;
        pdf.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .filter(|window| *window == needle)
            .count()
    }

    #[test]
    fn test_footer_sequence_over_three_pages() {
        let mut doc = NumberedDocument::new(595.28, 841.89);
        for page in 0..3 {
            doc.canvas()
                .text(72.0, 800.0, Font::Helvetica, 10.0, &format!("halaman {page}"));
            doc.end_page();
        }
        assert_eq!(doc.pages_collected(), 3);

        let bytes = doc.finish();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count_occurrences(&bytes, b"(1/3)"), 1);
        assert_eq!(count_occurrences(&bytes, b"(2/3)"), 1);
        assert_eq!(count_occurrences(&bytes, b"(3/3)"), 1);
        assert_eq!(count_occurrences(&bytes, b"(1/1)"), 0);
    }

    #[test]
    fn test_trailing_page_joins_document() {
        let mut doc = NumberedDocument::new(595.28, 841.89);
        doc.canvas().text(72.0, 800.0, Font::Helvetica, 10.0, "satu");
        doc.end_page();
        // Second page left in progress; finish() must still count it.
        doc.canvas().text(72.0, 800.0, Font::Helvetica, 10.0, "dua");

        let bytes = doc.finish();
        assert_eq!(count_occurrences(&bytes, b"(1/2)"), 1);
        assert_eq!(count_occurrences(&bytes, b"(2/2)"), 1);
    }

    #[test]
    fn test_empty_document_still_has_one_page() {
        let doc = NumberedDocument::new(595.28, 841.89);
        let bytes = doc.finish();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count_occurrences(&bytes, b"(1/1)"), 1);
    }
}
