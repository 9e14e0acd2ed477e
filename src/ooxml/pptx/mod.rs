//! PowerPoint (.pptx) presentation model.
//!
//! The in-memory side of a presentation that tables are rendered into:
//!
//! - [`Presentation`]: slide size, slide layouts and slides
//! - [`SlideLayout`] / [`Slide`]: shape trees of placeholders
//! - [`Shape`]: a placeholder that can receive a [`Table`]
//! - [`Table`], [`TableCell`], [`TextFrame`]: DrawingML tables and their text
//!
//! Each part serializes to DrawingML/PresentationML with `to_xml`, and
//! [`reader`] parses tables and slide layouts back.
//!
//! # Example
//!
//! ```rust
//! use deckframe::ooxml::pptx::Presentation;
//!
//! let mut pres = Presentation::new();
//! let slide = pres.add_slide("Title and Content").unwrap();
//! let table = slide.placeholder_mut(1).unwrap().insert_table(2, 2).unwrap();
//! table.cell_mut(0, 0).unwrap().set_text("Region");
//!
//! let xml = slide.to_xml().unwrap();
//! assert!(xml.contains("<a:t>Region</a:t>"));
//! ```

pub mod presentation;
pub mod reader;
pub mod shapes;
pub mod slide;
pub mod writer;

pub use presentation::{DEFAULT_SLIDE_HEIGHT, DEFAULT_SLIDE_WIDTH, Presentation};
pub use shapes::{
    Alignment, DEFAULT_TABLE_STYLE_ID, Font, Paragraph, PlaceholderFormat, PlaceholderType, Run,
    Shape, ShapeGeometry, Table, TableCell, TableFlags, TableRow, TextFrame,
};
pub use slide::{Slide, SlideLayout};
