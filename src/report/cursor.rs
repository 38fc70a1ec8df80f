// 📐 Layout Cursor - vertical flow control for the report canvas
//
// Tracks the ink position on the current page and starts a fresh page when a
// block would cross the bottom margin. All vertical movement funnels through
// ensure_space / advance, so the margin invariant can be checked without
// rendering a full document.

use anyhow::{anyhow, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

/// Page geometry in millimetres. Defaults to US Letter.
#[derive(Debug, Clone, Copy)]
pub struct PageMetrics {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageMetrics {
    /// Horizontal space between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn top(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageMetrics {
    fn default() -> Self {
        PageMetrics {
            width: 215.9,
            height: 279.4,
            margin: 18.0,
        }
    }
}

/// Running vertical cursor over a paginated PDF document.
///
/// The position is an ink coordinate measured from the page bottom, so it
/// decreases as content flows top to bottom. Position is always ≤ page
/// height, and drawing never lands below the bottom margin because every
/// atomic block reserves its height through [`ensure_space`] first.
///
/// [`ensure_space`]: PageCursor::ensure_space
pub struct PageCursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    metrics: PageMetrics,
    y: f32,
    pages: usize,
}

impl PageCursor {
    pub fn new(title: &str, metrics: PageMetrics) -> Self {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(metrics.width), Mm(metrics.height), "Page 1");
        let layer = doc.get_page(page).get_layer(layer);
        PageCursor {
            doc,
            layer,
            metrics,
            y: metrics.top(),
            pages: 1,
        }
    }

    pub fn builtin_font(&self, font: BuiltinFont) -> Result<IndirectFontRef> {
        self.doc
            .add_builtin_font(font)
            .map_err(|e| anyhow!("Failed to load builtin font: {}", e))
    }

    /// Reserve vertical room for an atomic block of `needed` millimetres.
    ///
    /// If drawing the block would cross the bottom margin, the current page
    /// is finalized, a new page begins, and the position resets to the top.
    /// Must run before drawing any block whose height is known in advance,
    /// never mid-block; wrapped text lines are each their own block and may
    /// legitimately spill onto a new page between lines.
    pub fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < self.metrics.margin {
            self.break_page();
        }
    }

    /// Move the cursor down unconditionally.
    pub fn advance(&mut self, height: f32) {
        self.y -= height;
    }

    fn break_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(self.metrics.width),
            Mm(self.metrics.height),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = self.metrics.top();
    }

    /// Current ink position.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Drawing surface of the current page.
    pub fn layer(&self) -> &PdfLayerReference {
        &self.layer
    }

    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    /// Number of pages started so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Finalize the document and return the PDF bytes.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| anyhow!("Failed to serialize PDF: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_metrics() -> PageMetrics {
        PageMetrics {
            width: 80.0,
            height: 60.0,
            margin: 10.0,
        }
    }

    #[test]
    fn test_new_cursor_starts_at_top_of_first_page() {
        let cursor = PageCursor::new("Test", small_metrics());
        assert_eq!(cursor.pages(), 1);
        assert_eq!(cursor.y(), 50.0);
        assert_eq!(cursor.metrics().content_width(), 60.0);
    }

    #[test]
    fn test_ensure_space_is_noop_when_block_fits() {
        let mut cursor = PageCursor::new("Test", small_metrics());
        cursor.ensure_space(40.0); // exactly reaches the margin
        assert_eq!(cursor.pages(), 1);
        assert_eq!(cursor.y(), 50.0);
    }

    #[test]
    fn test_ensure_space_breaks_page_when_block_overflows() {
        let mut cursor = PageCursor::new("Test", small_metrics());
        cursor.advance(30.0);
        assert_eq!(cursor.y(), 20.0);

        // 15mm no longer fits above the 10mm margin
        cursor.ensure_space(15.0);
        assert_eq!(cursor.pages(), 2);
        assert_eq!(cursor.y(), 50.0);
    }

    #[test]
    fn test_advance_decrements_unconditionally() {
        let mut cursor = PageCursor::new("Test", small_metrics());
        cursor.advance(12.5);
        cursor.advance(12.5);
        assert_eq!(cursor.y(), 25.0);
        assert_eq!(cursor.pages(), 1);
    }

    #[test]
    fn test_reserved_blocks_never_cross_the_margin() {
        let mut cursor = PageCursor::new("Test", small_metrics());
        let line = 5.5;
        for _ in 0..100 {
            cursor.ensure_space(line);
            let top = cursor.y();
            cursor.advance(line);
            // the whole block sits on or above the bottom margin
            assert!(top - line >= cursor.metrics().margin - 1e-4);
        }
        assert!(cursor.pages() > 1);
    }

    #[test]
    fn test_builtin_fonts_load() {
        let cursor = PageCursor::new("Test", PageMetrics::default());
        assert!(cursor.builtin_font(BuiltinFont::Helvetica).is_ok());
        assert!(cursor.builtin_font(BuiltinFont::HelveticaBold).is_ok());
    }

    #[test]
    fn test_finalized_document_is_pdf() {
        let mut cursor = PageCursor::new("Test", small_metrics());
        cursor.ensure_space(45.0);
        let bytes = cursor.into_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
