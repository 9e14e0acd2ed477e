/// Base shape types for PowerPoint presentations.
use crate::common::error::{Error, Result};
use crate::common::style::Length;
use crate::ooxml::pptx::shapes::table::Table;

/// Placeholder type (`p:ph/@type`).
///
/// A `p:ph` element without a type attribute is an [`PlaceholderType::Object`]
/// placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaceholderType {
    Title,
    Body,
    CenterTitle,
    Subtitle,
    Date,
    Footer,
    SlideNumber,
    Header,
    #[default]
    Object,
    Table,
    Chart,
    Picture,
    ClipArt,
    Diagram,
    Media,
    SlideImage,
}

impl PlaceholderType {
    pub fn as_xml_val(self) -> &'static str {
        match self {
            PlaceholderType::Title => "title",
            PlaceholderType::Body => "body",
            PlaceholderType::CenterTitle => "ctrTitle",
            PlaceholderType::Subtitle => "subTitle",
            PlaceholderType::Date => "dt",
            PlaceholderType::Footer => "ftr",
            PlaceholderType::SlideNumber => "sldNum",
            PlaceholderType::Header => "hdr",
            PlaceholderType::Object => "obj",
            PlaceholderType::Table => "tbl",
            PlaceholderType::Chart => "chart",
            PlaceholderType::Picture => "pic",
            PlaceholderType::ClipArt => "clipArt",
            PlaceholderType::Diagram => "dgm",
            PlaceholderType::Media => "media",
            PlaceholderType::SlideImage => "sldImg",
        }
    }

    pub fn from_xml_val(val: &str) -> Option<Self> {
        Some(match val {
            "title" => PlaceholderType::Title,
            "body" => PlaceholderType::Body,
            "ctrTitle" => PlaceholderType::CenterTitle,
            "subTitle" => PlaceholderType::Subtitle,
            "dt" => PlaceholderType::Date,
            "ftr" => PlaceholderType::Footer,
            "sldNum" => PlaceholderType::SlideNumber,
            "hdr" => PlaceholderType::Header,
            "obj" => PlaceholderType::Object,
            "tbl" => PlaceholderType::Table,
            "chart" => PlaceholderType::Chart,
            "pic" => PlaceholderType::Picture,
            "clipArt" => PlaceholderType::ClipArt,
            "dgm" => PlaceholderType::Diagram,
            "media" => PlaceholderType::Media,
            "sldImg" => PlaceholderType::SlideImage,
            _ => return None,
        })
    }

    /// Whether a table graphic frame can be inserted into the placeholder.
    pub fn can_host_table(self) -> bool {
        matches!(self, PlaceholderType::Object | PlaceholderType::Table)
    }

    /// Date, footer and slide number placeholders stay on the layout and
    /// are not copied onto new slides.
    pub(crate) fn is_layout_only(self) -> bool {
        matches!(
            self,
            PlaceholderType::Date | PlaceholderType::Footer | PlaceholderType::SlideNumber
        )
    }
}

/// Placeholder properties of a shape (`p:nvPr/p:ph`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderFormat {
    /// Placeholder index linking a slide shape to its layout shape
    pub idx: u32,
    pub kind: PlaceholderType,
}

impl PlaceholderFormat {
    pub fn new(idx: u32, kind: PlaceholderType) -> Self {
        Self { idx, kind }
    }
}

/// Position and size (`a:xfrm`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShapeGeometry {
    pub left: Length,
    pub top: Length,
    pub width: Length,
    pub height: Length,
}

impl ShapeGeometry {
    pub const fn from_emus(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self {
            left: Length::from_emus(left),
            top: Length::from_emus(top),
            width: Length::from_emus(width),
            height: Length::from_emus(height),
        }
    }
}

/// A shape on a slide or slide layout.
///
/// Placeholders of object or table type can receive a table, which turns
/// the shape into a graphic frame (`p:graphicFrame`) holding an `a:tbl`.
///
/// # Examples
///
/// ```rust
/// use deckframe::ooxml::pptx::{PlaceholderFormat, PlaceholderType, Shape, ShapeGeometry};
///
/// let mut shape = Shape::placeholder(
///     2,
///     "Content Placeholder 1",
///     PlaceholderFormat::new(1, PlaceholderType::Object),
///     ShapeGeometry::from_emus(457_200, 1_600_200, 8_229_600, 4_525_963),
/// );
/// assert!(!shape.has_table());
///
/// shape.insert_table(3, 2).unwrap();
/// assert!(shape.has_table());
/// assert_eq!(shape.table().unwrap().row_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: u32,
    name: String,
    placeholder: Option<PlaceholderFormat>,
    geometry: ShapeGeometry,
    table: Option<Table>,
}

impl Shape {
    /// A plain, non-placeholder shape.
    pub fn new(id: u32, name: impl Into<String>, geometry: ShapeGeometry) -> Self {
        Self {
            id,
            name: name.into(),
            placeholder: None,
            geometry,
            table: None,
        }
    }

    pub fn placeholder(
        id: u32,
        name: impl Into<String>,
        format: PlaceholderFormat,
        geometry: ShapeGeometry,
    ) -> Self {
        Self {
            placeholder: Some(format),
            ..Self::new(id, name, geometry)
        }
    }

    #[inline]
    pub fn shape_id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    #[inline]
    pub fn placeholder_format(&self) -> Option<&PlaceholderFormat> {
        self.placeholder.as_ref()
    }

    #[inline]
    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    #[inline]
    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn table_mut(&mut self) -> Option<&mut Table> {
        self.table.as_mut()
    }

    pub(crate) fn set_table(&mut self, table: Table) {
        self.table = Some(table);
    }

    /// Insert a `rows` x `cols` table sized to the shape, replacing any
    /// existing one.
    pub fn insert_table(&mut self, rows: usize, cols: usize) -> Result<&mut Table> {
        match self.placeholder {
            Some(ph) if ph.kind.can_host_table() => {},
            Some(ph) => {
                return Err(Error::InvalidArgument(format!(
                    "placeholder {:?} is of type {}; only obj and tbl placeholders can hold a table",
                    self.name,
                    ph.kind.as_xml_val()
                )));
            },
            None => {
                return Err(Error::InvalidArgument(format!(
                    "shape {:?} is not a placeholder and cannot hold a table",
                    self.name
                )));
            },
        }
        let table = Table::new(rows, cols, self.geometry.width, self.geometry.height)?;
        Ok(self.table.insert(table))
    }
}
