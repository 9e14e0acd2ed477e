/// Presentation: slide size, slide layouts and slides.
use crate::common::error::{Error, Result};
use crate::common::style::Length;
use crate::ooxml::pptx::shapes::{PlaceholderFormat, PlaceholderType, Shape, ShapeGeometry};
use crate::ooxml::pptx::slide::{Slide, SlideLayout};

/// Default 4:3 slide width (10in).
pub const DEFAULT_SLIDE_WIDTH: Length = Length::from_emus(9_144_000);
/// Default 4:3 slide height (7.5in).
pub const DEFAULT_SLIDE_HEIGHT: Length = Length::from_emus(6_858_000);

/// A presentation with its slide layouts and slides.
///
/// [`Presentation::new`] carries the eleven layouts of the default Office
/// theme; [`Presentation::with_layouts`] starts from layouts read from a
/// template with [`parse_layout`](crate::ooxml::pptx::reader::parse_layout).
///
/// # Examples
///
/// ```rust
/// use deckframe::ooxml::pptx::Presentation;
///
/// let mut pres = Presentation::new();
/// assert_eq!(pres.slide_layouts().len(), 11);
///
/// let slide = pres.add_slide("Title and Content").unwrap();
/// assert!(slide.placeholder(1).is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    slide_width: Length,
    slide_height: Length,
    layouts: Vec<SlideLayout>,
    slides: Vec<Slide>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation {
    pub fn new() -> Self {
        Self::with_layouts(default_layouts())
    }

    pub fn with_layouts(layouts: Vec<SlideLayout>) -> Self {
        Self {
            slide_width: DEFAULT_SLIDE_WIDTH,
            slide_height: DEFAULT_SLIDE_HEIGHT,
            layouts,
            slides: Vec::new(),
        }
    }

    #[inline]
    pub fn slide_width(&self) -> Length {
        self.slide_width
    }

    #[inline]
    pub fn slide_height(&self) -> Length {
        self.slide_height
    }

    pub fn set_slide_size(&mut self, width: Length, height: Length) {
        self.slide_width = width;
        self.slide_height = height;
    }

    #[inline]
    pub fn slide_layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    pub fn add_layout(&mut self, layout: SlideLayout) {
        self.layouts.push(layout);
    }

    #[inline]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// Append a slide built from the layout named `layout`. With duplicate
    /// layout names the last one wins.
    pub fn add_slide(&mut self, layout: &str) -> Result<&mut Slide> {
        let layout = self
            .layouts
            .iter()
            .rev()
            .find(|l| l.name() == layout)
            .ok_or_else(|| Error::InvalidArgument(format!("no slide layout named {layout:?}")))?;
        let slide = Slide::new(layout);
        self.slides.push(slide);
        let last = self.slides.len() - 1;
        Ok(&mut self.slides[last])
    }
}

const TITLE: ShapeGeometry = ShapeGeometry::from_emus(457_200, 274_638, 8_229_600, 1_143_000);
const BODY: ShapeGeometry = ShapeGeometry::from_emus(457_200, 1_600_200, 8_229_600, 4_525_963);
const BODY_LEFT: ShapeGeometry = ShapeGeometry::from_emus(457_200, 1_600_200, 4_038_600, 4_525_963);
const BODY_RIGHT: ShapeGeometry =
    ShapeGeometry::from_emus(4_648_200, 1_600_200, 4_038_600, 4_525_963);
const DATE: ShapeGeometry = ShapeGeometry::from_emus(457_200, 6_356_350, 2_133_600, 365_125);
const FOOTER: ShapeGeometry = ShapeGeometry::from_emus(3_124_200, 6_356_350, 2_895_600, 365_125);
const SLIDE_NUMBER: ShapeGeometry =
    ShapeGeometry::from_emus(6_553_200, 6_356_350, 2_133_600, 365_125);

type PlaceholderSpec = (&'static str, u32, PlaceholderType, ShapeGeometry);

/// Layouts of the default Office theme, in slide master order.
fn default_layouts() -> Vec<SlideLayout> {
    use PlaceholderType::*;

    let specs: [(&str, &[PlaceholderSpec]); 11] = [
        ("Title Slide", &[
            ("Title", 0, CenterTitle, ShapeGeometry::from_emus(685_800, 2_130_425, 7_772_400, 1_470_025)),
            ("Subtitle", 1, Subtitle, ShapeGeometry::from_emus(1_371_600, 3_886_200, 6_400_800, 1_752_600)),
        ]),
        ("Title and Content", &[
            ("Title", 0, Title, TITLE),
            ("Content Placeholder", 1, Object, BODY),
        ]),
        ("Section Header", &[
            ("Title", 0, Title, ShapeGeometry::from_emus(722_313, 4_406_900, 7_772_400, 1_362_075)),
            ("Text Placeholder", 1, Body, ShapeGeometry::from_emus(722_313, 2_906_713, 7_772_400, 1_500_187)),
        ]),
        ("Two Content", &[
            ("Title", 0, Title, TITLE),
            ("Content Placeholder", 1, Object, BODY_LEFT),
            ("Content Placeholder", 2, Object, BODY_RIGHT),
        ]),
        ("Comparison", &[
            ("Title", 0, Title, TITLE),
            ("Text Placeholder", 1, Body, ShapeGeometry::from_emus(457_200, 1_535_113, 4_040_188, 639_762)),
            ("Content Placeholder", 2, Object, ShapeGeometry::from_emus(457_200, 2_174_875, 4_040_188, 3_951_288)),
            ("Text Placeholder", 3, Body, ShapeGeometry::from_emus(4_645_025, 1_535_113, 4_041_775, 639_762)),
            ("Content Placeholder", 4, Object, ShapeGeometry::from_emus(4_645_025, 2_174_875, 4_041_775, 3_951_288)),
        ]),
        ("Title Only", &[("Title", 0, Title, TITLE)]),
        ("Blank", &[]),
        ("Content with Caption", &[
            ("Title", 0, Title, ShapeGeometry::from_emus(457_200, 273_050, 3_008_313, 1_162_050)),
            ("Content Placeholder", 1, Object, ShapeGeometry::from_emus(3_575_050, 273_050, 5_111_750, 5_853_113)),
            ("Text Placeholder", 2, Body, ShapeGeometry::from_emus(457_200, 1_435_100, 3_008_313, 4_691_063)),
        ]),
        ("Picture with Caption", &[
            ("Title", 0, Title, ShapeGeometry::from_emus(1_792_288, 4_800_600, 5_486_400, 566_738)),
            ("Picture Placeholder", 1, Picture, ShapeGeometry::from_emus(1_792_288, 612_775, 5_486_400, 4_114_800)),
            ("Text Placeholder", 2, Body, ShapeGeometry::from_emus(1_792_288, 5_367_338, 5_486_400, 804_862)),
        ]),
        ("Title and Vertical Text", &[
            ("Title", 0, Title, TITLE),
            ("Vertical Text Placeholder", 1, Body, BODY),
        ]),
        ("Vertical Title and Text", &[
            ("Vertical Title", 0, Title, ShapeGeometry::from_emus(6_629_400, 274_638, 2_057_400, 5_851_525)),
            ("Vertical Text Placeholder", 1, Body, ShapeGeometry::from_emus(457_200, 274_638, 6_019_200, 5_851_525)),
        ]),
    ];

    specs
        .iter()
        .map(|(name, placeholders)| {
            let footer: [PlaceholderSpec; 3] = [
                ("Date Placeholder", 10, Date, DATE),
                ("Footer Placeholder", 11, Footer, FOOTER),
                ("Slide Number Placeholder", 12, SlideNumber, SLIDE_NUMBER),
            ];
            // Shape ids start at 2 (1 is the group shape), names count from 1
            let shapes = placeholders
                .iter()
                .chain(footer.iter())
                .enumerate()
                .map(|(i, (base, idx, kind, geometry))| {
                    Shape::placeholder(
                        i as u32 + 2,
                        format!("{base} {}", i + 1),
                        PlaceholderFormat::new(*idx, *kind),
                        *geometry,
                    )
                })
                .collect();
            SlideLayout::new(*name, shapes)
        })
        .collect()
}
