/// Parsing of DrawingML tables and slide layouts.
///
/// The reader is the counterpart of the writer: it reads back everything the
/// writer emits (cell text and fonts, merges, fills, table flags and style),
/// and reads the placeholders of slide layouts saved by PowerPoint.
use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::common::error::{Error, Result};
use crate::common::style::{Color, Length, RGBColor, ThemeColor};
use crate::common::unit::centipoints_to_pt;
use crate::common::xml::predefined_entity;
use crate::ooxml::pptx::shapes::{
    Alignment, Paragraph, PlaceholderFormat, PlaceholderType, Run, Shape, ShapeGeometry, Table,
    TableCell, TableFlags, TableRow, TextFrame,
};
use crate::ooxml::pptx::slide::SlideLayout;

fn attr_value(e: &BytesStart, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_attr<T: FromStr>(e: &BytesStart, name: &[u8]) -> Result<Option<T>> {
    match attr_value(e, name)? {
        Some(value) => value.trim().parse().map(Some).map_err(|_| {
            Error::Xml(format!(
                "invalid {} value {value:?} on <{}>",
                String::from_utf8_lossy(name),
                String::from_utf8_lossy(e.name().as_ref())
            ))
        }),
        None => Ok(None),
    }
}

fn bool_attr(e: &BytesStart, name: &[u8]) -> Result<Option<bool>> {
    Ok(attr_value(e, name)?.map(|v| v == "1" || v == "true"))
}

fn parse_color(e: &BytesStart) -> Result<Option<Color>> {
    let val = attr_value(e, b"val")?.unwrap_or_default();
    Ok(match e.local_name().as_ref() {
        b"srgbClr" => RGBColor::from_hex(&val).map(Color::Rgb),
        b"schemeClr" => ThemeColor::from_name(&val).map(Color::Theme),
        _ => None,
    })
}

/// Builder state while walking an `a:tbl`.
#[derive(Default)]
struct TableState {
    found: bool,
    flags: Option<TableFlags>,
    style_id: Option<String>,
    in_style_id: bool,
    columns: Vec<Length>,
    rows: Vec<TableRow>,
    row: Option<(Length, Vec<TableCell>)>,
    cell: Option<TableCell>,
    paragraphs: Vec<Paragraph>,
    paragraph: Option<Paragraph>,
    run: Option<Run>,
    in_text: bool,
    in_run_props: bool,
    in_cell_props: bool,
}

impl TableState {
    fn open(&mut self, e: &BytesStart, empty: bool) -> Result<()> {
        match e.local_name().as_ref() {
            b"tbl" => self.found = true,
            b"tblPr" => {
                let mut flags = TableFlags::empty();
                for attr in e.attributes() {
                    let attr = attr?;
                    if let Some(flag) = TableFlags::from_attribute(attr.key.local_name().as_ref()) {
                        let on = attr.unescape_value()?;
                        flags.set(flag, on == "1" || on == "true");
                    }
                }
                self.flags = Some(flags);
            },
            b"tableStyleId" => self.in_style_id = !empty,
            b"gridCol" => {
                let w = parse_attr::<i64>(e, b"w")?.unwrap_or(0);
                self.columns.push(Length::from_emus(w));
            },
            b"tr" => {
                let h = parse_attr::<i64>(e, b"h")?.unwrap_or(0);
                self.row = Some((Length::from_emus(h), Vec::new()));
                if empty {
                    self.close(b"tr")?;
                }
            },
            b"tc" => {
                let mut cell = TableCell::new();
                if let Some(span) = parse_attr::<u32>(e, b"rowSpan")? {
                    cell.set_row_span(span);
                }
                if let Some(span) = parse_attr::<u32>(e, b"gridSpan")? {
                    cell.set_grid_span(span);
                }
                cell.set_h_merge(bool_attr(e, b"hMerge")?.unwrap_or(false));
                cell.set_v_merge(bool_attr(e, b"vMerge")?.unwrap_or(false));
                self.cell = Some(cell);
                self.paragraphs.clear();
                if empty {
                    self.close(b"tc")?;
                }
            },
            b"p" => {
                self.paragraph = Some(Paragraph::default());
                if empty {
                    self.close(b"p")?;
                }
            },
            b"pPr" => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.alignment = attr_value(e, b"algn")?
                        .as_deref()
                        .and_then(Alignment::from_xml_val);
                }
            },
            b"r" => self.run = Some(Run::default()),
            b"rPr" => {
                if let Some(run) = self.run.as_mut() {
                    run.font.size = parse_attr::<u32>(e, b"sz")?
                        .map(|sz| Length::from_pt(centipoints_to_pt(sz)));
                    run.font.bold = bool_attr(e, b"b")?;
                    run.font.italic = bool_attr(e, b"i")?;
                    self.in_run_props = !empty;
                }
            },
            b"latin" if self.in_run_props => {
                if let Some(run) = self.run.as_mut() {
                    run.font.name = attr_value(e, b"typeface")?;
                }
            },
            b"tcPr" => self.in_cell_props = !empty,
            b"srgbClr" | b"schemeClr" => {
                let color = parse_color(e)?;
                if self.in_run_props {
                    if let Some(run) = self.run.as_mut() {
                        run.font.color = color;
                    }
                } else if self.in_cell_props {
                    if let (Some(cell), Some(color)) = (self.cell.as_mut(), color) {
                        cell.set_fill(color);
                    }
                }
            },
            b"t" => self.in_text = !empty,
            _ => {},
        }
        Ok(())
    }

    /// Returns `true` once the table element is closed.
    fn close(&mut self, name: &[u8]) -> Result<bool> {
        match name {
            b"tbl" => return Ok(true),
            b"tableStyleId" => self.in_style_id = false,
            b"t" => self.in_text = false,
            b"rPr" => self.in_run_props = false,
            b"tcPr" => self.in_cell_props = false,
            b"r" => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    paragraph.runs.push(run);
                }
            },
            b"p" => {
                if let Some(paragraph) = self.paragraph.take() {
                    self.paragraphs.push(paragraph);
                }
            },
            b"txBody" => {
                if let Some(cell) = self.cell.as_mut() {
                    let paragraphs = std::mem::take(&mut self.paragraphs);
                    *cell.text_frame_mut() = TextFrame::from_paragraphs(paragraphs);
                }
            },
            b"tc" => {
                let (Some(cell), Some((_, cells))) = (self.cell.take(), self.row.as_mut()) else {
                    return Err(Error::Xml("<a:tc> outside of <a:tr>".to_string()));
                };
                cells.push(cell);
            },
            b"tr" => {
                if let Some((height, cells)) = self.row.take() {
                    if cells.len() != self.columns.len() {
                        return Err(Error::Shape(format!(
                            "table row {} has {} cells, the grid has {} columns",
                            self.rows.len(),
                            cells.len(),
                            self.columns.len()
                        )));
                    }
                    self.rows.push(TableRow::new(height, cells));
                }
            },
            _ => {},
        }
        Ok(false)
    }

    fn text(&mut self, text: &str) {
        if self.in_style_id {
            self.style_id.get_or_insert_with(String::new).push_str(text);
        } else if self.in_text
            && let Some(run) = self.run.as_mut()
        {
            run.text.push_str(text);
        }
    }
}

/// Parse the first `<a:tbl>` in `xml`.
///
/// `xml` may be the table element itself or any enclosing part, such as a
/// graphic frame or a whole slide.
///
/// # Examples
///
/// ```rust
/// use deckframe::common::Length;
/// use deckframe::ooxml::pptx::Table;
/// use deckframe::ooxml::pptx::reader::parse_table;
///
/// let mut table = Table::new(1, 2, Length::from_emus(200), Length::from_emus(50)).unwrap();
/// table.cell_mut(0, 1).unwrap().set_text("Q1 & Q2");
///
/// let parsed = parse_table(&table.to_xml().unwrap()).unwrap();
/// assert_eq!(parsed, table);
/// ```
pub fn parse_table(xml: &str) -> Result<Table> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(false);

    let mut state = TableState::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if state.found || e.local_name().as_ref() == b"tbl" {
                    state.open(&e, false)?;
                }
            },
            Event::Empty(e) => {
                if state.found {
                    state.open(&e, true)?;
                }
            },
            Event::End(e) => {
                if state.found && state.close(e.local_name().as_ref())? {
                    break;
                }
            },
            Event::Text(e) if state.found => {
                let text = std::str::from_utf8(e.as_ref()).map_err(|e| Error::Xml(e.to_string()))?;
                state.text(text);
            },
            Event::GeneralRef(e) if state.found => {
                let resolved = match e.resolve_char_ref()? {
                    Some(c) => Some(c),
                    None => predefined_entity(&e),
                };
                let Some(c) = resolved else {
                    return Err(Error::Xml(format!(
                        "unknown entity &{};",
                        String::from_utf8_lossy(&e)
                    )));
                };
                state.text(c.encode_utf8(&mut [0; 4]));
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    if !state.found {
        return Err(Error::Xml("no <a:tbl> element found".to_string()));
    }
    Ok(Table::from_parts(
        state.columns,
        state.rows,
        state.flags.unwrap_or_else(TableFlags::empty),
        state.style_id,
    ))
}

/// A shape being read from a layout's shape tree.
struct ShapeState {
    element: Vec<u8>,
    depth: usize,
    id: u32,
    name: String,
    placeholder: Option<PlaceholderFormat>,
    geometry: ShapeGeometry,
    has_offset: bool,
    has_extent: bool,
}

impl ShapeState {
    fn new(element: &[u8]) -> Self {
        Self {
            element: element.to_vec(),
            depth: 0,
            id: 0,
            name: String::new(),
            placeholder: None,
            geometry: ShapeGeometry::default(),
            has_offset: false,
            has_extent: false,
        }
    }

    fn visit(&mut self, e: &BytesStart) -> Result<()> {
        match e.local_name().as_ref() {
            b"cNvPr" if self.id == 0 => {
                self.id = parse_attr(e, b"id")?.unwrap_or(0);
                self.name = attr_value(e, b"name")?.unwrap_or_default();
            },
            b"ph" => {
                let kind = match attr_value(e, b"type")? {
                    Some(val) => PlaceholderType::from_xml_val(&val).ok_or_else(|| {
                        Error::Xml(format!("unknown placeholder type {val:?}"))
                    })?,
                    None => PlaceholderType::Object,
                };
                let idx = parse_attr(e, b"idx")?.unwrap_or(0);
                self.placeholder = Some(PlaceholderFormat::new(idx, kind));
            },
            b"off" if !self.has_offset => {
                self.geometry.left = Length::from_emus(parse_attr(e, b"x")?.unwrap_or(0));
                self.geometry.top = Length::from_emus(parse_attr(e, b"y")?.unwrap_or(0));
                self.has_offset = true;
            },
            b"ext" if !self.has_extent => {
                self.geometry.width = Length::from_emus(parse_attr(e, b"cx")?.unwrap_or(0));
                self.geometry.height = Length::from_emus(parse_attr(e, b"cy")?.unwrap_or(0));
                self.has_extent = true;
            },
            _ => {},
        }
        Ok(())
    }

    fn finish(self) -> Shape {
        match self.placeholder {
            Some(format) => Shape::placeholder(self.id, self.name, format, self.geometry),
            None => Shape::new(self.id, self.name, self.geometry),
        }
    }
}

fn is_shape_element(name: &[u8]) -> bool {
    matches!(name, b"sp" | b"graphicFrame" | b"pic" | b"cxnSp")
}

/// Parse a slide layout part (`<p:sldLayout>`).
///
/// Every shape of the layout's shape tree is read with its id, name,
/// placeholder format and position. Shapes nested in groups are flattened.
/// Placeholders without an `a:xfrm` inherit their position from the slide
/// master and are read with a zero geometry.
pub fn parse_layout(xml: &str) -> Result<SlideLayout> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut name = None;
    let mut shapes = Vec::new();
    let mut current: Option<ShapeState> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let local = e.local_name();
                match current.as_mut() {
                    Some(shape) => {
                        if local.as_ref() == shape.element.as_slice() {
                            shape.depth += 1;
                        }
                        shape.visit(&e)?;
                    },
                    None if is_shape_element(local.as_ref()) => {
                        current = Some(ShapeState::new(local.as_ref()));
                    },
                    None if local.as_ref() == b"cSld" => name = attr_value(&e, b"name")?,
                    None => {},
                }
            },
            Event::Empty(e) => {
                if let Some(shape) = current.as_mut() {
                    shape.visit(&e)?;
                }
            },
            Event::End(e) => {
                if let Some(shape) = current.as_mut()
                    && e.local_name().as_ref() == shape.element.as_slice()
                {
                    if shape.depth == 0 {
                        if let Some(shape) = current.take() {
                            shapes.push(shape.finish());
                        }
                    } else {
                        shape.depth -= 1;
                    }
                }
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    let name = name.ok_or_else(|| Error::Xml("slide layout without a <p:cSld> name".to_string()))?;
    Ok(SlideLayout::new(name, shapes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::style::Length;
    use crate::ooxml::pptx::Presentation;
    use crate::ooxml::pptx::shapes::DEFAULT_TABLE_STYLE_ID;

    #[test]
    fn test_parse_written_table() {
        let mut table = Table::new(2, 2, Length::from_emus(400), Length::from_emus(100)).unwrap();
        table.set_flags(TableFlags::FIRST_COL | TableFlags::LAST_ROW);
        {
            let cell = table.cell_mut(0, 0).unwrap();
            cell.set_text("a < b\nsecond");
            cell.set_row_span(2);
            cell.set_fill(Color::Theme(ThemeColor::Accent1));
            let run = cell.text_frame_mut().first_run_mut();
            run.font.size = Some(Length::from_pt(10.5));
            run.font.bold = Some(true);
            run.font.color = Some(Color::Rgb(RGBColor::new(0x12, 0x34, 0x56)));
            run.font.name = Some("Calibri".to_string());
            cell.text_frame_mut().first_paragraph_mut().alignment = Some(Alignment::Right);
        }
        table.cell_mut(1, 0).unwrap().set_v_merge(true);
        table.cell_mut(1, 1).unwrap().set_text(" ");

        let parsed = parse_table(&table.to_xml().unwrap()).unwrap();
        assert_eq!(parsed, table);
        assert_eq!(parsed.cell(1, 1).unwrap().text(), " ");
        assert_eq!(parsed.style_id(), Some(DEFAULT_TABLE_STYLE_ID));
    }

    #[test]
    fn test_parse_table_inside_graphic_frame() {
        let mut pres = Presentation::new();
        let slide = pres.add_slide("Title and Content").unwrap();
        let shape = slide.placeholder_mut(1).unwrap();
        shape.insert_table(1, 3).unwrap();
        let xml = slide.to_xml().unwrap();

        let parsed = parse_table(&xml).unwrap();
        assert_eq!(parsed.column_count(), 3);
        assert_eq!(parsed.row_count(), 1);
    }

    #[test]
    fn test_parse_table_entities_and_char_refs() {
        let xml = r#"<a:tbl xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:tblGrid><a:gridCol w="10"/></a:tblGrid><a:tr h="5"><a:tc><a:txBody><a:p><a:r><a:t>R&amp;D &#8364;</a:t></a:r></a:p></a:txBody></a:tc></a:tr></a:tbl>"#;
        let table = parse_table(xml).unwrap();
        assert_eq!(table.cell(0, 0).unwrap().text(), "R&D \u{20ac}");
        assert!(table.flags().is_empty());
        assert!(table.style_id().is_none());
    }

    #[test]
    fn test_parse_table_errors() {
        assert!(matches!(parse_table("<p:sld/>"), Err(Error::Xml(_))));
        let ragged = r#"<a:tbl><a:tblGrid><a:gridCol w="1"/><a:gridCol w="1"/></a:tblGrid><a:tr h="1"><a:tc/></a:tr></a:tbl>"#;
        assert!(matches!(parse_table(ragged), Err(Error::Shape(_))));
    }

    #[test]
    fn test_parse_layout_roundtrip() {
        let pres = Presentation::new();
        for layout in pres.slide_layouts() {
            let parsed = parse_layout(&layout.to_xml().unwrap()).unwrap();
            assert_eq!(&parsed, layout);
        }
    }

    #[test]
    fn test_parse_layout_inherited_geometry() {
        let xml = r#"<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
            <p:cSld name="Table Layout"><p:spTree>
                <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
                <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
                <p:sp><p:nvSpPr><p:cNvPr id="3" name="Table Placeholder 2"/><p:cNvSpPr/><p:nvPr><p:ph type="tbl" sz="quarter" idx="13"/></p:nvPr></p:nvSpPr>
                    <p:spPr><a:xfrm><a:off x="10" y="20"/><a:ext cx="30" cy="40"/></a:xfrm></p:spPr></p:sp>
            </p:spTree></p:cSld></p:sldLayout>"#;
        let layout = parse_layout(xml).unwrap();
        assert_eq!(layout.name(), "Table Layout");
        assert_eq!(layout.shapes().len(), 2);
        assert_eq!(layout.shapes()[0].geometry(), &ShapeGeometry::default());

        let table = layout.placeholder(13).unwrap();
        assert_eq!(table.shape_id(), 3);
        assert_eq!(table.placeholder_format().unwrap().kind, PlaceholderType::Table);
        assert_eq!(table.geometry(), &ShapeGeometry::from_emus(10, 20, 30, 40));
    }
}
