use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use hocr_review::{LanguageTable, OcrTextView, OffsetText, Scale, ScreenPoint};

#[derive(Parser, Debug)]
#[command(
    name = "hocr-review",
    version,
    about = "Inspect hOCR markup as offset-addressable text with screen points"
)]
struct Cli {
    /// hOCR file to read (stdin when omitted)
    input: Option<PathBuf>,

    /// Screen x of the captured region's top-left corner
    #[arg(long = "left", default_value_t = 0.0)]
    left: f32,

    /// Screen y of the captured region's top-left corner
    #[arg(long = "top", default_value_t = 0.0)]
    top: f32,

    /// Upscale factor that was applied to the capture before OCR
    #[arg(long = "scale", default_value_t = 2.0)]
    scale: f32,

    /// Print one row per line: start..end bounds and the line text
    #[arg(long = "lines")]
    lines: bool,

    /// Print one row per word: offset, screen x, screen y
    #[arg(long = "words")]
    words: bool,

    /// Print the screen point for a character offset and exit
    #[arg(long = "point")]
    point: Option<usize>,

    /// Dump the parsed document as JSON
    #[arg(long = "json")]
    json: bool,

    /// Print the OCR language pack for a locale and exit
    #[arg(long = "locale")]
    locale: Option<String>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    hocr_review::logging::init(cli.verbose)?;

    if let Some(locale) = cli.locale.as_deref() {
        let table = LanguageTable::load()?;
        println!("{}", table.default_ocr_lang(locale));
        return Ok(());
    }

    let scale = Scale::new(cli.scale)?;
    let origin = ScreenPoint::new(cli.left, cli.top);
    let markup = read_markup(cli.input.as_ref())?;
    let doc = hocr_review::parse(&markup, origin, scale)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let view = OcrTextView::from(doc);
    if let Some(offset) = cli.point {
        let length = view.story_length();
        if offset > length {
            return Err(anyhow!(
                "offset {} is out of range (story length {})",
                offset,
                length
            ));
        }
        let point = view.point_for_offset(offset);
        println!("{}\t{}", point.x, point.y);
        return Ok(());
    }
    if cli.lines {
        print_lines(&view);
        return Ok(());
    }
    if cli.words {
        print_words(&view);
        return Ok(());
    }

    println!("{}", view.document().text());
    Ok(())
}

fn read_markup(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read hocr file: {}", path.display())),
        None => {
            if io::stdin().is_terminal() {
                return Err(anyhow!("no input: pass a file or pipe hocr markup to stdin"));
            }
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn print_lines(view: &OcrTextView) {
    let length = view.story_length();
    let mut offset = 0;
    while offset < length {
        let (start, end) = view.line_range(offset);
        println!("{}..{}\t{}", start, end, view.text_range(start, end));
        offset = end;
    }
}

fn print_words(view: &OcrTextView) {
    for word in view.document().words() {
        println!("{}\t{}\t{}", word.offset, word.x, word.y);
    }
}
