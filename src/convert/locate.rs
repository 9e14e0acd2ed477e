//! Name-keyed lookup of slide layouts and placeholder shapes.
use std::collections::HashMap;

use log::debug;

use crate::ooxml::pptx::{Presentation, SlideLayout};

/// Map each slide layout of `presentation` by name.
///
/// With duplicate layout names the last layout wins.
///
/// ```rust
/// use deckframe::convert::map_layouts;
/// use deckframe::ooxml::pptx::Presentation;
///
/// let pres = Presentation::new();
/// let layouts = map_layouts(&pres);
/// assert_eq!(layouts.len(), 11);
/// assert!(layouts.contains_key("Title and Content"));
/// ```
pub fn map_layouts(presentation: &Presentation) -> HashMap<String, &SlideLayout> {
    let mut layouts = HashMap::with_capacity(presentation.slide_layouts().len());
    for layout in presentation.slide_layouts() {
        debug!("slide layout {:?}", layout.name());
        layouts.insert(layout.name().to_string(), layout);
    }
    layouts
}

/// Map each placeholder shape of `layout` by name to its placeholder index.
///
/// Shapes that are not placeholders are skipped; with duplicate shape names
/// the last shape wins.
pub fn map_shapes(layout: &SlideLayout) -> HashMap<String, u32> {
    let mut shapes = HashMap::new();
    for shape in layout.shapes() {
        let Some(format) = shape.placeholder_format() else {
            continue;
        };
        debug!(
            "{} index: {}, type: {}",
            shape.name(),
            format.idx,
            format.kind.as_xml_val()
        );
        shapes.insert(shape.name().to_string(), format.idx);
    }
    shapes
}
