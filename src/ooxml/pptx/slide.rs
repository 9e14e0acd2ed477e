/// Slides and slide layouts.
use crate::ooxml::pptx::shapes::Shape;

/// A reusable slide layout from the slide master (`p:sldLayout`).
#[derive(Debug, Clone, PartialEq)]
pub struct SlideLayout {
    name: String,
    shapes: Vec<Shape>,
}

impl SlideLayout {
    pub fn new(name: impl Into<String>, shapes: Vec<Shape>) -> Self {
        Self {
            name: name.into(),
            shapes,
        }
    }

    /// Layout name from `p:cSld/@name`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Placeholder shapes in document order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_placeholder())
    }

    /// Placeholder with placeholder index `idx`.
    pub fn placeholder(&self, idx: u32) -> Option<&Shape> {
        self.placeholders()
            .find(|s| s.placeholder_format().is_some_and(|ph| ph.idx == idx))
    }
}

/// A slide (`p:sld`).
///
/// New slides receive a copy of their layout's placeholders, except the
/// date, footer and slide number placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    layout_name: String,
    shapes: Vec<Shape>,
}

impl Slide {
    pub fn new(layout: &SlideLayout) -> Self {
        let shapes = layout
            .placeholders()
            .filter(|s| {
                s.placeholder_format()
                    .is_some_and(|ph| !ph.kind.is_layout_only())
            })
            .cloned()
            .collect();
        Self {
            layout_name: layout.name().to_string(),
            shapes,
        }
    }

    /// Name of the layout this slide was created from.
    #[inline]
    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn add_shape(&mut self, shape: Shape) -> &mut Shape {
        self.shapes.push(shape);
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_placeholder())
    }

    /// Placeholder with placeholder index `idx`.
    pub fn placeholder(&self, idx: u32) -> Option<&Shape> {
        self.placeholders()
            .find(|s| s.placeholder_format().is_some_and(|ph| ph.idx == idx))
    }

    pub fn placeholder_mut(&mut self, idx: u32) -> Option<&mut Shape> {
        self.shapes
            .iter_mut()
            .find(|s| s.placeholder_format().is_some_and(|ph| ph.idx == idx))
    }
}
