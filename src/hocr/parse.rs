use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

use crate::geom::{Scale, ScreenPoint, to_screen};

use super::{HocrDocument, HocrError, OcrWord};

const LINE_CLASS: &str = "ocr_line";
const WORD_CLASSES: [&str; 2] = ["ocrx_word", "ocr_word"];

/// Parse one complete HOCR payload into a document model.
///
/// The input must be one well-formed document: a single top-level element
/// with no character data outside it. Word markers missing a usable `bbox`
/// are dropped (their text still flows) and counted; anything ill-formed is
/// fatal and yields `HocrError::MalformedMarkup` with no partial model.
pub fn parse(markup: &str, origin: ScreenPoint, scale: Scale) -> Result<HocrDocument, HocrError> {
    let mut reader = Reader::from_str(markup);
    reader.trim_text(false);
    let mut builder = DocumentBuilder::new(origin, scale);
    // Exactly one element sits at the top level; only whitespace, comments,
    // and processing instructions may surround it.
    let mut depth = 0usize;
    let mut root_seen = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if depth == 0 {
                    if root_seen {
                        return Err(malformed(&reader, "second document element"));
                    }
                    root_seen = true;
                }
                depth += 1;
                validate_attributes(&e)?;
                builder.open_element(&e)?;
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    if root_seen {
                        return Err(malformed(&reader, "second document element"));
                    }
                    root_seen = true;
                }
                validate_attributes(&e)?;
                builder.open_element(&e)?;
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    return Err(malformed(&reader, "close tag without a matching open tag"));
                }
                depth -= 1;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| malformed(&reader, err))?;
                if depth == 0 {
                    if text.chars().any(|ch| !ch.is_whitespace()) {
                        return Err(malformed(
                            &reader,
                            "character data outside the document element",
                        ));
                    }
                } else {
                    builder.push_text(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if depth == 0 {
                    return Err(malformed(
                        &reader,
                        "character data outside the document element",
                    ));
                }
                let raw = e.into_inner();
                let text = String::from_utf8_lossy(raw.as_ref()).into_owned();
                builder.push_text(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(malformed(&reader, err));
            }
        }
    }

    if depth != 0 {
        return Err(malformed(
            &reader,
            format!("{depth} element(s) still open at end of input"),
        ));
    }
    if !root_seen {
        return Err(malformed(&reader, "no document element found"));
    }

    debug!(
        chars = builder.text_len,
        lines = builder.line_breaks.len(),
        words = builder.words.len(),
        skipped = builder.skipped_words,
        "parsed hocr markup"
    );
    Ok(builder.finish())
}

fn malformed(reader: &Reader<&[u8]>, message: impl std::fmt::Display) -> HocrError {
    HocrError::MalformedMarkup(format!("{} at byte {}", message, reader.buffer_position()))
}

struct DocumentBuilder {
    text: String,
    text_len: usize,
    line_breaks: Vec<usize>,
    words: Vec<OcrWord>,
    block_has_content: bool,
    pending_space: bool,
    skipped_words: usize,
    origin: ScreenPoint,
    scale: Scale,
}

impl DocumentBuilder {
    fn new(origin: ScreenPoint, scale: Scale) -> Self {
        Self {
            text: String::new(),
            text_len: 0,
            line_breaks: Vec::new(),
            words: Vec::new(),
            block_has_content: false,
            pending_space: false,
            skipped_words: 0,
            origin,
            scale,
        }
    }

    fn open_element(&mut self, element: &BytesStart) -> Result<(), HocrError> {
        match element.name().as_ref() {
            b"p" | b"div" => {
                // One flag shared by all blocks: opening any block restarts
                // leading-whitespace suppression, nesting does not stack.
                self.block_has_content = false;
            }
            b"span" => self.open_span(element)?,
            _ => {}
        }
        Ok(())
    }

    fn open_span(&mut self, element: &BytesStart) -> Result<(), HocrError> {
        let Some(class) = attr_value(element, b"class")? else {
            return Ok(());
        };
        if class == LINE_CLASS {
            self.flush_pending_space();
            // Recorded before the line's text arrives, so each entry is the
            // exclusive end of the preceding line.
            self.line_breaks.push(self.text_len);
        } else if WORD_CLASSES.contains(&class.as_str()) {
            self.flush_pending_space();
            match attr_value(element, b"title")?.and_then(|title| bbox_left_top(&title)) {
                Some((left, top)) => {
                    let point = to_screen(left, top, self.origin, self.scale);
                    self.words.push(OcrWord {
                        offset: self.text_len,
                        x: point.x,
                        y: point.y,
                    });
                }
                None => {
                    self.skipped_words += 1;
                    warn!(
                        offset = self.text_len,
                        "dropping word marker without a usable bbox"
                    );
                }
            }
        }
        Ok(())
    }

    fn push_text(&mut self, data: &str) {
        let mut rest = data;
        while !rest.is_empty() {
            let ws_len = leading_len(rest, |ch| ch.is_whitespace());
            if ws_len > 0 {
                if self.block_has_content {
                    self.pending_space = true;
                }
                rest = &rest[ws_len..];
                continue;
            }
            let word_len = leading_len(rest, |ch| !ch.is_whitespace());
            let fragment = &rest[..word_len];
            self.flush_pending_space();
            self.block_has_content = true;
            self.text.push_str(fragment);
            self.text_len += fragment.chars().count();
            rest = &rest[word_len..];
        }
    }

    // A whitespace run only becomes text once something follows it, so runs
    // collapse to one space and trailing whitespace never lands.
    fn flush_pending_space(&mut self) {
        if !self.pending_space {
            return;
        }
        self.pending_space = false;
        if self.text.ends_with(' ') {
            return;
        }
        self.text.push(' ');
        self.text_len += 1;
    }

    fn finish(self) -> HocrDocument {
        HocrDocument {
            text: self.text,
            text_len: self.text_len,
            line_breaks: self.line_breaks,
            words: self.words,
            anchor: self.origin,
            skipped_words: self.skipped_words,
        }
    }
}

fn leading_len(value: &str, pred: impl Fn(char) -> bool) -> usize {
    value
        .chars()
        .take_while(|ch| pred(*ch))
        .map(char::len_utf8)
        .sum()
}

// quick-xml parses attribute lists lazily, so walk every element's list to
// make bad syntax and bad entities fatal wherever they appear.
fn validate_attributes(element: &BytesStart) -> Result<(), HocrError> {
    for attr in element.attributes() {
        let attr = attr
            .map_err(|err| HocrError::MalformedMarkup(format!("bad attribute syntax: {err}")))?;
        attr.unescape_value()
            .map_err(|err| HocrError::MalformedMarkup(format!("bad attribute value: {err}")))?;
    }
    Ok(())
}

fn attr_value(element: &BytesStart, name: &[u8]) -> Result<Option<String>, HocrError> {
    for attr in element.attributes() {
        let attr = attr
            .map_err(|err| HocrError::MalformedMarkup(format!("bad attribute syntax: {err}")))?;
        if attr.key.as_ref() != name {
            continue;
        }
        let value = attr
            .unescape_value()
            .map_err(|err| HocrError::MalformedMarkup(format!("bad attribute value: {err}")))?;
        return Ok(Some(value.into_owned()));
    }
    Ok(None)
}

fn bbox_left_top(title: &str) -> Option<(u32, u32)> {
    let idx = title.find("bbox")?;
    let rest = &title[idx + "bbox".len()..];
    let nums = rest
        .split([' ', ';'])
        .filter(|v| !v.is_empty())
        .take(4)
        .filter_map(|v| v.parse::<u32>().ok())
        .collect::<Vec<_>>();
    if nums.len() != 4 {
        return None;
    }
    Some((nums[0], nums[1]))
}
