//! XML text helpers shared by the DrawingML writer and reader.

mod escape;

pub use escape::{escape_xml, predefined_entity, push_escaped};
