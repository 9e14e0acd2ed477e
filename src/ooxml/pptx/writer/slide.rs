/// Serialization of shapes, slides and slide layouts.
use std::fmt::Write as FmtWrite;

use crate::common::error::Result;
use crate::common::xml::push_escaped;
use crate::ooxml::pptx::shapes::{PlaceholderType, Shape};
use crate::ooxml::pptx::slide::{Slide, SlideLayout};
use crate::ooxml::pptx::writer::{
    NS_DRAWINGML, NS_PRESENTATIONML, NS_RELATIONSHIPS, TABLE_GRAPHIC_URI,
};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

impl Shape {
    /// Serialize the shape: a `<p:graphicFrame>` when it holds a table,
    /// otherwise a `<p:sp>`.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024);
        self.write_element(&mut xml, true)?;
        Ok(xml)
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        self.write_element(xml, false)
    }

    fn write_element(&self, xml: &mut String, declare_ns: bool) -> Result<()> {
        let ns = |xml: &mut String| -> Result<()> {
            if declare_ns {
                write!(xml, r#" xmlns:a="{NS_DRAWINGML}" xmlns:p="{NS_PRESENTATIONML}""#)?;
            }
            Ok(())
        };

        match self.table() {
            Some(table) => {
                xml.push_str("<p:graphicFrame");
                ns(xml)?;
                xml.push_str("><p:nvGraphicFramePr>");
                self.write_c_nv_pr(xml)?;
                xml.push_str(
                    r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr>"#,
                );
                self.write_nv_pr(xml)?;
                xml.push_str("</p:nvGraphicFramePr>");

                let g = self.geometry();
                write!(
                    xml,
                    r#"<p:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></p:xfrm>"#,
                    g.left.emus(),
                    g.top.emus(),
                    g.width.emus(),
                    g.height.emus()
                )?;
                write!(xml, r#"<a:graphic><a:graphicData uri="{TABLE_GRAPHIC_URI}">"#)?;
                table.write_xml(xml)?;
                xml.push_str("</a:graphicData></a:graphic></p:graphicFrame>");
            },
            None => {
                xml.push_str("<p:sp");
                ns(xml)?;
                xml.push_str("><p:nvSpPr>");
                self.write_c_nv_pr(xml)?;
                if self.is_placeholder() {
                    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
                } else {
                    xml.push_str("<p:cNvSpPr/>");
                }
                self.write_nv_pr(xml)?;
                xml.push_str("</p:nvSpPr>");

                let g = self.geometry();
                write!(
                    xml,
                    r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm></p:spPr>"#,
                    g.left.emus(),
                    g.top.emus(),
                    g.width.emus(),
                    g.height.emus()
                )?;
                xml.push_str("</p:sp>");
            },
        }
        Ok(())
    }

    fn write_c_nv_pr(&self, xml: &mut String) -> Result<()> {
        write!(xml, r#"<p:cNvPr id="{}" name=""#, self.shape_id())?;
        push_escaped(xml, self.name());
        xml.push_str(r#""/>"#);
        Ok(())
    }

    fn write_nv_pr(&self, xml: &mut String) -> Result<()> {
        match self.placeholder_format() {
            Some(ph) => {
                xml.push_str("<p:nvPr><p:ph");
                if ph.kind != PlaceholderType::Object {
                    write!(xml, r#" type="{}""#, ph.kind.as_xml_val())?;
                }
                if ph.idx != 0 {
                    write!(xml, r#" idx="{}""#, ph.idx)?;
                }
                xml.push_str("/></p:nvPr>");
            },
            None => xml.push_str("<p:nvPr/>"),
        }
        Ok(())
    }
}

fn write_shape_tree(xml: &mut String, shapes: &[Shape]) -> Result<()> {
    xml.push_str(
        r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
    );
    for shape in shapes {
        shape.write_xml(xml)?;
    }
    xml.push_str("</p:spTree>");
    Ok(())
}

impl Slide {
    /// Serialize the slide part (`<p:sld>`).
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(XML_DECLARATION);
        write!(
            xml,
            r#"<p:sld xmlns:a="{NS_DRAWINGML}" xmlns:r="{NS_RELATIONSHIPS}" xmlns:p="{NS_PRESENTATIONML}"><p:cSld>"#
        )?;
        write_shape_tree(&mut xml, self.shapes())?;
        xml.push_str("</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
        Ok(xml)
    }
}

impl SlideLayout {
    /// Serialize the slide layout part (`<p:sldLayout>`).
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(XML_DECLARATION);
        write!(
            xml,
            r#"<p:sldLayout xmlns:a="{NS_DRAWINGML}" xmlns:r="{NS_RELATIONSHIPS}" xmlns:p="{NS_PRESENTATIONML}" preserve="1"><p:cSld name=""#
        )?;
        push_escaped(&mut xml, self.name());
        xml.push_str(r#"">"#);
        write_shape_tree(&mut xml, self.shapes())?;
        xml.push_str("</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>");
        Ok(xml)
    }
}
