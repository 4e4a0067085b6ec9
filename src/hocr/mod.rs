mod parse;

use serde::Serialize;
use thiserror::Error;

use crate::geom::ScreenPoint;

pub use parse::parse;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OcrWord {
    /// Start of the word in the flattened text, in characters.
    pub offset: usize,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HocrError {
    #[error("markup is not well-formed: {0}")]
    MalformedMarkup(String),
}

/// One OCR run's parsed result; read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct HocrDocument {
    pub(crate) text: String,
    pub(crate) text_len: usize,
    pub(crate) line_breaks: Vec<usize>,
    pub(crate) words: Vec<OcrWord>,
    pub(crate) anchor: ScreenPoint,
    pub(crate) skipped_words: usize,
}

impl HocrDocument {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the flattened text in characters, not bytes.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Line boundaries in document order. Recorded at line starts, so the
    /// first entry is usually 0; lookups treat each entry as an exclusive end.
    pub fn line_breaks(&self) -> &[usize] {
        &self.line_breaks
    }

    pub fn words(&self) -> &[OcrWord] {
        &self.words
    }

    pub fn anchor(&self) -> ScreenPoint {
        self.anchor
    }

    pub fn skipped_words(&self) -> usize {
        self.skipped_words
    }
}
