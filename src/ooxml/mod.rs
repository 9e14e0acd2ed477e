//! Office Open XML (OOXML) formats.
//!
//! Only PresentationML is modelled: slides, slide layouts and the DrawingML
//! tables placed on them.
pub mod pptx;
