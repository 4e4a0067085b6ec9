use std::sync::Arc;

use crate::geom::ScreenPoint;
use crate::hocr::HocrDocument;

/// Offset-based text navigation over one parsed document.
///
/// Offsets are character offsets. Queries outside `[0, story_length()]` (or
/// with `start > end`) are caller bugs and panic instead of clamping.
pub trait OffsetText {
    fn story_length(&self) -> usize;

    fn text_range(&self, start: usize, end: usize) -> &str;

    /// `[start, end)` of the line containing `offset`; at or past the last
    /// boundary the tail up to `story_length()` is returned.
    fn line_range(&self, offset: usize) -> (usize, usize);

    /// Same scan over word start offsets.
    fn word_range(&self, offset: usize) -> (usize, usize);

    /// Screen point of the last word starting at or before `offset`; the
    /// capture anchor when no word does.
    fn point_for_offset(&self, offset: usize) -> ScreenPoint;
}

/// A review cursor over one parsed document. Clones share the immutable
/// document, so copies answer queries identically.
#[derive(Debug, Clone)]
pub struct OcrTextView {
    doc: Arc<HocrDocument>,
}

impl OcrTextView {
    pub fn new(doc: Arc<HocrDocument>) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &HocrDocument {
        &self.doc
    }

    fn assert_offset(&self, offset: usize) {
        let len = self.doc.text_len();
        assert!(
            offset <= len,
            "offset {offset} out of bounds for story length {len}"
        );
    }
}

impl From<HocrDocument> for OcrTextView {
    fn from(doc: HocrDocument) -> Self {
        Self::new(Arc::new(doc))
    }
}

impl OffsetText for OcrTextView {
    fn story_length(&self) -> usize {
        self.doc.text_len()
    }

    fn text_range(&self, start: usize, end: usize) -> &str {
        let len = self.doc.text_len();
        assert!(start <= end, "invalid range {start}..{end}: start exceeds end");
        assert!(
            end <= len,
            "range {start}..{end} out of bounds for story length {len}"
        );
        let text = self.doc.text();
        let from = byte_index(text, start);
        let to = byte_index(text, end);
        &text[from..to]
    }

    fn line_range(&self, offset: usize) -> (usize, usize) {
        self.assert_offset(offset);
        scan_boundaries(self.doc.line_breaks().iter().copied(), offset, self.doc.text_len())
    }

    fn word_range(&self, offset: usize) -> (usize, usize) {
        self.assert_offset(offset);
        scan_boundaries(
            self.doc.words().iter().map(|word| word.offset),
            offset,
            self.doc.text_len(),
        )
    }

    fn point_for_offset(&self, offset: usize) -> ScreenPoint {
        self.assert_offset(offset);
        let mut covering = None;
        for word in self.doc.words() {
            if word.offset > offset {
                break;
            }
            covering = Some(word);
        }
        match covering {
            Some(word) => ScreenPoint::new(word.x, word.y),
            None => self.doc.anchor(),
        }
    }
}

// First boundary strictly greater than the offset ends the range; the
// boundary before it (or 0) starts it. Past the last boundary the range runs
// to the end of the story.
fn scan_boundaries(
    boundaries: impl Iterator<Item = usize>,
    offset: usize,
    story_length: usize,
) -> (usize, usize) {
    let mut start = 0;
    for end in boundaries {
        if end > offset {
            return (start, end);
        }
        start = end;
    }
    (start, story_length)
}

fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}
