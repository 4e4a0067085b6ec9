use hocr_review::{OcrTextView, OffsetText, Scale, ScreenPoint, parse};

const PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN"
    "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en" lang="en">
 <head>
  <title></title>
  <meta http-equiv="Content-Type" content="text/html;charset=utf-8"/>
  <meta name="ocr-system" content="tesseract 3.02"/>
  <meta name="ocr-capabilities" content="ocr_page ocr_carea ocr_par ocr_line ocrx_word"/>
 </head>
 <body>
  <div class="ocr_page" id="page_1" title="image &quot;screen.png&quot;; bbox 0 0 1600 1200; ppageno 0">
   <div class="ocr_carea" id="block_1_1" title="bbox 112 80 1400 240">
    <p class="ocr_par" dir="ltr" id="par_1_1" lang="eng" title="bbox 112 80 1400 240">
     <span class="ocr_line" id="line_1_1" title="bbox 112 80 1040 156; baseline 0 -16; x_size 76">
      <span class="ocrx_word" id="word_1_1" title="bbox 112 80 360 156; x_wconf 96">Save</span>
      <span class="ocrx_word" id="word_1_2" title="bbox 400 80 640 156; x_wconf 94">your</span>
      <span class="ocrx_word" id="word_1_3" title="bbox 680 80 1040 156; x_wconf 95">changes?</span>
     </span>
     <span class="ocr_line" id="line_1_2" title="bbox 112 164 900 240; baseline 0 -16; x_size 76">
      <span class="ocrx_word" id="word_1_4" title="bbox 112 164 400 240; x_wconf 92">Unsaved</span>
      <span class="ocrx_word" id="word_1_5" title="bbox 440 164 640 240; x_wconf 90">work</span>
      <span class="ocrx_word" id="word_1_6" title="bbox 680 164 760 240; x_wconf 89">is</span>
      <span class="ocrx_word" id="word_1_7" title="bbox 800 164 900 240; x_wconf 91">lost</span>
     </span>
    </p>
   </div>
   <div class="ocr_carea" id="block_1_2" title="bbox 112 1000 700 1100">
    <p class="ocr_par" dir="ltr" id="par_1_2" lang="eng" title="bbox 112 1000 700 1100">
     <span class="ocr_line" id="line_1_3" title="bbox 112 1000 700 1080">
      <span class="ocrx_word" id="word_1_8" title="bbox 112 1000 340 1080; x_wconf 93">Cancel</span>
      <span class="ocrx_word" id="word_1_9" title="bbox 420 1000 520 1080; x_wconf 42">OK</span>
     </span>
    </p>
   </div>
  </div>
 </body>
</html>
"#;

fn parse_page() -> OcrTextView {
    let doc = parse(
        PAGE,
        ScreenPoint::new(10.0, 20.0),
        Scale::new(2.0).expect("valid scale"),
    )
    .expect("page parses");
    OcrTextView::from(doc)
}

#[test]
fn flattens_a_tesseract_page() {
    let view = parse_page();
    let doc = view.document();
    assert_eq!(doc.text(), "Save your changes? Unsaved work is lost Cancel OK");
    assert_eq!(doc.line_breaks(), &[0, 19, 40]);
    assert_eq!(doc.words().len(), 9);
    assert_eq!(doc.skipped_words(), 0);
}

#[test]
fn navigates_lines_words_and_points() {
    let view = parse_page();
    assert_eq!(view.story_length(), 49);

    assert_eq!(view.line_range(0), (0, 19));
    assert_eq!(view.line_range(19), (19, 40));
    assert_eq!(view.line_range(48), (40, 49));
    assert_eq!(view.text_range(19, 40), "Unsaved work is lost ");

    assert_eq!(view.word_range(6), (5, 10));
    assert_eq!(view.text_range(5, 10), "your ");
    assert_eq!(view.word_range(41), (40, 47));
    assert_eq!(view.text_range(40, 47), "Cancel ");

    assert_eq!(view.point_for_offset(0), ScreenPoint::new(66.0, 60.0));
    assert_eq!(view.point_for_offset(18), ScreenPoint::new(350.0, 60.0));
    assert_eq!(view.point_for_offset(20), ScreenPoint::new(66.0, 102.0));
    assert_eq!(view.point_for_offset(49), ScreenPoint::new(220.0, 520.0));
}

#[test]
fn copies_navigate_identically() {
    let view = parse_page();
    let copy = view.clone();
    for offset in 0..=view.story_length() {
        assert_eq!(view.line_range(offset), copy.line_range(offset));
        assert_eq!(view.word_range(offset), copy.word_range(offset));
        assert_eq!(view.point_for_offset(offset), copy.point_for_offset(offset));
    }
}

#[test]
fn renders_the_line_table() {
    let view = parse_page();
    let mut rows = Vec::new();
    let mut offset = 0;
    while offset < view.story_length() {
        let (start, end) = view.line_range(offset);
        rows.push(format!("{}..{} [{}]", start, end, view.text_range(start, end)));
        offset = end;
    }
    let rendered = rows.join("\n");
    insta::assert_snapshot!(rendered, @r"
    0..19 [Save your changes? ]
    19..40 [Unsaved work is lost ]
    40..49 [Cancel OK]
    ");
}

#[test]
fn truncated_page_yields_no_model() {
    let truncated = &PAGE[..PAGE.len() / 2];
    let result = parse(
        truncated,
        ScreenPoint::new(0.0, 0.0),
        Scale::new(2.0).expect("valid scale"),
    );
    assert!(result.is_err());
}
