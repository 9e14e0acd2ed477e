/// DrawingML serialization of tables (`a:tbl`) and their text.
use std::fmt::Write as FmtWrite;

use crate::common::error::Result;
use crate::common::style::Color;
use crate::common::unit::pt_to_centipoints;
use crate::common::xml::push_escaped;
use crate::ooxml::pptx::shapes::{Table, TableCell, TableFlags, TextFrame};
use crate::ooxml::pptx::writer::NS_DRAWINGML;

impl Table {
    /// Serialize the table as a standalone `<a:tbl>` element.
    ///
    /// ```rust
    /// use deckframe::common::Length;
    /// use deckframe::ooxml::pptx::Table;
    ///
    /// let mut table = Table::new(1, 1, Length::from_emus(100), Length::from_emus(50)).unwrap();
    /// table.cell_mut(0, 0).unwrap().set_text("R&D");
    /// let xml = table.to_xml().unwrap();
    /// assert!(xml.starts_with("<a:tbl"));
    /// assert!(xml.contains("<a:t>R&amp;D</a:t>"));
    /// ```
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512 * self.row_count() * self.column_count());
        self.write_element(&mut xml, true)?;
        Ok(xml)
    }

    /// Write the `<a:tbl>` element inside a document that declares the
    /// DrawingML namespace.
    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        self.write_element(xml, false)
    }

    fn write_element(&self, xml: &mut String, declare_ns: bool) -> Result<()> {
        xml.push_str("<a:tbl");
        if declare_ns {
            write!(xml, r#" xmlns:a="{NS_DRAWINGML}""#)?;
        }
        xml.push('>');

        xml.push_str("<a:tblPr");
        for (flag, attr) in TableFlags::ATTRIBUTES {
            if self.flags().contains(flag) {
                write!(xml, r#" {attr}="1""#)?;
            }
        }
        match self.style_id() {
            Some(style_id) => {
                xml.push_str("><a:tableStyleId>");
                push_escaped(xml, style_id);
                xml.push_str("</a:tableStyleId></a:tblPr>");
            },
            None => xml.push_str("/>"),
        }

        xml.push_str("<a:tblGrid>");
        for width in self.column_widths() {
            write!(xml, r#"<a:gridCol w="{}"/>"#, width.emus())?;
        }
        xml.push_str("</a:tblGrid>");

        for row in self.rows() {
            write!(xml, r#"<a:tr h="{}">"#, row.height().emus())?;
            for cell in row.cells() {
                write_cell(xml, cell)?;
            }
            xml.push_str("</a:tr>");
        }

        xml.push_str("</a:tbl>");
        Ok(())
    }
}

fn write_cell(xml: &mut String, cell: &TableCell) -> Result<()> {
    xml.push_str("<a:tc");
    if cell.row_span() > 1 {
        write!(xml, r#" rowSpan="{}""#, cell.row_span())?;
    }
    if cell.grid_span() > 1 {
        write!(xml, r#" gridSpan="{}""#, cell.grid_span())?;
    }
    if cell.h_merge() {
        xml.push_str(r#" hMerge="1""#);
    }
    if cell.v_merge() {
        xml.push_str(r#" vMerge="1""#);
    }
    xml.push('>');

    write_text_body(xml, cell.text_frame())?;

    match cell.fill() {
        Some(color) => {
            xml.push_str("<a:tcPr><a:solidFill>");
            write_color(xml, color)?;
            xml.push_str("</a:solidFill></a:tcPr>");
        },
        None => xml.push_str("<a:tcPr/>"),
    }
    xml.push_str("</a:tc>");
    Ok(())
}

/// Write an `<a:txBody>` for a table cell.
pub(crate) fn write_text_body(xml: &mut String, text_frame: &TextFrame) -> Result<()> {
    xml.push_str("<a:txBody><a:bodyPr/><a:lstStyle/>");
    for paragraph in text_frame.paragraphs() {
        xml.push_str("<a:p>");
        if let Some(alignment) = paragraph.alignment {
            write!(xml, r#"<a:pPr algn="{}"/>"#, alignment.as_xml_val())?;
        }
        for run in &paragraph.runs {
            xml.push_str(r#"<a:r><a:rPr lang="en-US""#);
            let font = &run.font;
            if let Some(size) = font.size {
                write!(xml, r#" sz="{}""#, pt_to_centipoints(size.points()))?;
            }
            if let Some(bold) = font.bold {
                write!(xml, r#" b="{}""#, bold as u8)?;
            }
            if let Some(italic) = font.italic {
                write!(xml, r#" i="{}""#, italic as u8)?;
            }
            xml.push_str(r#" dirty="0""#);

            if font.color.is_none() && font.name.is_none() {
                xml.push_str("/>");
            } else {
                xml.push('>');
                if let Some(color) = font.color {
                    xml.push_str("<a:solidFill>");
                    write_color(xml, color)?;
                    xml.push_str("</a:solidFill>");
                }
                if let Some(name) = &font.name {
                    xml.push_str(r#"<a:latin typeface=""#);
                    push_escaped(xml, name);
                    xml.push_str(r#""/>"#);
                }
                xml.push_str("</a:rPr>");
            }

            xml.push_str("<a:t>");
            push_escaped(xml, &run.text);
            xml.push_str("</a:t></a:r>");
        }
        if paragraph.runs.is_empty() {
            xml.push_str(r#"<a:endParaRPr lang="en-US" dirty="0"/>"#);
        }
        xml.push_str("</a:p>");
    }
    xml.push_str("</a:txBody>");
    Ok(())
}

pub(crate) fn write_color(xml: &mut String, color: Color) -> Result<()> {
    match color {
        Color::Rgb(rgb) => write!(xml, r#"<a:srgbClr val="{}"/>"#, rgb.to_hex())?,
        Color::Theme(theme) => write!(xml, r#"<a:schemeClr val="{}"/>"#, theme.as_xml_val())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::style::{Length, RGBColor, ThemeColor};
    use crate::ooxml::pptx::shapes::Alignment;

    fn table() -> Table {
        Table::new(2, 2, Length::from_emus(200), Length::from_emus(100)).unwrap()
    }

    #[test]
    fn test_table_properties() {
        let xml = table().to_xml().unwrap();
        assert!(xml.contains(r#"<a:tblPr firstRow="1" bandRow="1"><a:tableStyleId>{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}</a:tableStyleId></a:tblPr>"#));
        assert!(xml.contains(r#"<a:tblGrid><a:gridCol w="100"/><a:gridCol w="100"/></a:tblGrid>"#));
        assert_eq!(xml.matches("<a:tr h=\"50\">").count(), 2);
    }

    #[test]
    fn test_merge_attributes() {
        let mut table = table();
        table.cell_mut(0, 0).unwrap().set_row_span(2);
        table.cell_mut(1, 0).unwrap().set_v_merge(true);
        let xml = table.to_xml().unwrap();
        assert!(xml.contains(r#"<a:tc rowSpan="2">"#));
        assert!(xml.contains(r#"<a:tc vMerge="1">"#));
    }

    #[test]
    fn test_run_properties() {
        let mut table = table();
        let cell = table.cell_mut(0, 1).unwrap();
        cell.set_text("North");
        cell.set_fill(Color::Theme(ThemeColor::Accent2));
        let paragraph = cell.text_frame_mut().first_paragraph_mut();
        paragraph.alignment = Some(Alignment::Center);
        let run = cell.text_frame_mut().first_run_mut();
        run.font.size = Some(Length::from_pt(12.0));
        run.font.bold = Some(true);
        run.font.color = Some(Color::Rgb(RGBColor::new(255, 255, 255)));
        run.font.name = Some("Arial".to_string());

        let xml = table.to_xml().unwrap();
        assert!(xml.contains(
            r#"<a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="en-US" sz="1200" b="1" dirty="0"><a:solidFill><a:srgbClr val="FFFFFF"/></a:solidFill><a:latin typeface="Arial"/></a:rPr><a:t>North</a:t></a:r></a:p>"#
        ));
        assert!(xml.contains(
            r#"<a:tcPr><a:solidFill><a:schemeClr val="accent2"/></a:solidFill></a:tcPr>"#
        ));
    }

    #[test]
    fn test_empty_paragraph() {
        let xml = table().to_xml().unwrap();
        assert!(xml.contains(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#));
    }
}
