/// DrawingML / PresentationML serialization.
///
/// Writers append to a `String` with `std::fmt::Write`; text and attribute
/// values go through the shared XML escaper.
pub mod slide;
pub mod table;

pub(crate) const NS_DRAWINGML: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_PRESENTATIONML: &str =
    "http://schemas.openxmlformats.org/presentationml/2006/main";
pub(crate) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const TABLE_GRAPHIC_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";
