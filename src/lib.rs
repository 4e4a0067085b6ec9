pub mod geom;
pub mod hocr;
pub mod languages;
pub mod logging;
pub mod view;

pub use geom::{GeometryError, Scale, ScreenPoint, to_screen};
pub use hocr::{HocrDocument, HocrError, OcrWord, parse};
pub use languages::{LanguageTable, available_languages};
pub use view::{OcrTextView, OffsetText};
