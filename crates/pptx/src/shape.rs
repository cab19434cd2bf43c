//! Shapes placed on a slide: placeholders, text boxes and pictures.

use crate::units::{font_size_attr, Emu};
use slidegen_core::{Error, Result, Rgb};
use std::fmt::Write as FmtWrite;

/// Whether `c` may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escape XML special characters and drop characters XML 1.0 forbids.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if !is_xml_char(c) => {}
            c => out.push(c),
        }
    }
    out
}

fn xml_err(e: std::fmt::Error) -> Error {
    Error::XmlError(e.to_string())
}

/// Position and size of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: Emu,
    pub y: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Bounds {
    pub fn new(x: Emu, y: Emu, width: Emu, height: Emu) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds given in inches.
    pub fn inches(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            Emu::inches(x),
            Emu::inches(y),
            Emu::inches(width),
            Emu::inches(height),
        )
    }

    fn write_xfrm(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
            self.x.value(),
            self.y.value(),
            self.width.value(),
            self.height.value()
        )
        .map_err(xml_err)
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    fn attr(self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
            Self::Justify => "just",
        }
    }
}

/// Character formatting applied to a paragraph's run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunFormat {
    /// Size in points.
    pub size: Option<f64>,
    /// Latin typeface.
    pub font: Option<String>,
    pub color: Option<Rgb>,
}

impl RunFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, points: f64) -> Self {
        self.size = Some(points);
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    fn write_attrs(&self, xml: &mut String) -> Result<()> {
        xml.push_str(r#" lang="en-US""#);
        if let Some(size) = self.size {
            write!(xml, r#" sz="{}""#, font_size_attr(size)).map_err(xml_err)?;
        }
        xml.push_str(r#" dirty="0""#);
        Ok(())
    }

    /// Child elements of `a:rPr`, in schema order (fill before typeface).
    fn write_children(&self, xml: &mut String) -> Result<()> {
        if let Some(color) = self.color {
            write!(
                xml,
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                color.hex()
            )
            .map_err(xml_err)?;
        }
        if let Some(ref font) = self.font {
            write!(xml, r#"<a:latin typeface="{}"/>"#, escape_xml(font)).map_err(xml_err)?;
        }
        Ok(())
    }

    fn write_element(&self, xml: &mut String, tag: &str) -> Result<()> {
        write!(xml, "<a:{}", tag).map_err(xml_err)?;
        self.write_attrs(xml)?;
        if self.color.is_none() && self.font.is_none() {
            xml.push_str("/>");
        } else {
            xml.push('>');
            self.write_children(xml)?;
            write!(xml, "</a:{}>", tag).map_err(xml_err)?;
        }
        Ok(())
    }
}

/// One paragraph of a text frame, holding at most one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextParagraph {
    pub text: String,
    pub alignment: Option<Alignment>,
    pub format: RunFormat,
}

impl TextParagraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<a:p>");
        if let Some(alignment) = self.alignment {
            write!(xml, r#"<a:pPr algn="{}"/>"#, alignment.attr()).map_err(xml_err)?;
        }

        // An empty paragraph has no run; its formatting lives on the end marker
        if self.text.is_empty() {
            self.format.write_element(xml, "endParaRPr")?;
        } else {
            xml.push_str("<a:r>");
            self.format.write_element(xml, "rPr")?;
            write!(xml, "<a:t>{}</a:t>", escape_xml(&self.text)).map_err(xml_err)?;
            xml.push_str("</a:r>");
        }

        xml.push_str("</a:p>");
        Ok(())
    }
}

/// The text body of a shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFrame {
    pub paragraphs: Vec<TextParagraph>,
    /// `Some(true)` wraps at the shape edge, `Some(false)` never wraps,
    /// `None` inherits from the layout.
    pub word_wrap: Option<bool>,
}

impl TextFrame {
    /// Build a frame from text, one paragraph per `\n`-separated line.
    pub fn from_text(text: &str) -> Self {
        Self {
            paragraphs: text.split('\n').map(TextParagraph::new).collect(),
            word_wrap: None,
        }
    }

    pub fn with_word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = Some(wrap);
        self
    }

    /// Apply `format` to every paragraph.
    pub fn with_format(mut self, format: &RunFormat) -> Self {
        for paragraph in &mut self.paragraphs {
            paragraph.format = format.clone();
        }
        self
    }

    /// Align every paragraph.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        for paragraph in &mut self.paragraphs {
            paragraph.alignment = Some(alignment);
        }
        self
    }

    /// Align only the first paragraph.
    pub fn with_first_alignment(mut self, alignment: Alignment) -> Self {
        if let Some(first) = self.paragraphs.first_mut() {
            first.alignment = Some(alignment);
        }
        self
    }

    /// Plain text, paragraphs joined by `\n`.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_xml(&self, xml: &mut String, auto_fit: bool) -> Result<()> {
        xml.push_str("<p:txBody>");
        xml.push_str("<a:bodyPr");
        match self.word_wrap {
            Some(true) => xml.push_str(r#" wrap="square""#),
            Some(false) => xml.push_str(r#" wrap="none""#),
            None => {}
        }
        if auto_fit {
            xml.push_str("><a:spAutoFit/></a:bodyPr>");
        } else {
            xml.push_str("/>");
        }
        xml.push_str("<a:lstStyle/>");

        if self.paragraphs.is_empty() {
            xml.push_str("<a:p/>");
        }
        for paragraph in &self.paragraphs {
            paragraph.to_xml(xml)?;
        }

        xml.push_str("</p:txBody>");
        Ok(())
    }
}

/// Layout placeholders a slide can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Title on the title slide layout.
    CenteredTitle,
    /// Subtitle on the title slide layout.
    Subtitle,
    /// Title on the other layouts.
    Title,
    /// Main content area.
    Body,
}

impl PlaceholderKind {
    fn ph_element(self) -> &'static str {
        match self {
            Self::CenteredTitle => r#"<p:ph type="ctrTitle"/>"#,
            Self::Subtitle => r#"<p:ph type="subTitle" idx="1"/>"#,
            Self::Title => r#"<p:ph type="title"/>"#,
            Self::Body => r#"<p:ph idx="1"/>"#,
        }
    }

    fn base_name(self) -> &'static str {
        match self {
            Self::CenteredTitle | Self::Title => "Title",
            Self::Subtitle => "Subtitle",
            Self::Body => "Content Placeholder",
        }
    }
}

/// A shape on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub(crate) id: u32,
    pub(crate) kind: ShapeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ShapeKind {
    Placeholder {
        placeholder: PlaceholderKind,
        bounds: Bounds,
        frame: TextFrame,
    },
    TextBox {
        bounds: Bounds,
        frame: TextFrame,
    },
    Picture {
        /// Index into the owning slide's media list.
        media_index: usize,
        bounds: Bounds,
        description: String,
    },
}

impl Shape {
    /// Shape ID, unique within its slide.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Text frame, if the shape has one.
    pub fn text_frame(&self) -> Option<&TextFrame> {
        match &self.kind {
            ShapeKind::Placeholder { frame, .. } | ShapeKind::TextBox { frame, .. } => Some(frame),
            ShapeKind::Picture { .. } => None,
        }
    }

    /// Where the shape sits on the slide.
    pub fn bounds(&self) -> Bounds {
        match &self.kind {
            ShapeKind::Placeholder { bounds, .. }
            | ShapeKind::TextBox { bounds, .. }
            | ShapeKind::Picture { bounds, .. } => *bounds,
        }
    }

    pub fn is_picture(&self) -> bool {
        matches!(self.kind, ShapeKind::Picture { .. })
    }

    /// Generate XML for this shape. `media_rel_ids[i]` is the relationship ID
    /// of the slide's i-th media part.
    pub(crate) fn to_xml(&self, xml: &mut String, media_rel_ids: &[String]) -> Result<()> {
        // python-pptx and PowerPoint number names from the shape id minus one
        let seq = self.id.saturating_sub(1);

        match &self.kind {
            ShapeKind::Placeholder {
                placeholder,
                bounds,
                frame,
            } => {
                xml.push_str("<p:sp><p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="{} {}"/>"#,
                    self.id,
                    placeholder.base_name(),
                    seq
                )
                .map_err(xml_err)?;
                xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
                write!(xml, "<p:nvPr>{}</p:nvPr>", placeholder.ph_element()).map_err(xml_err)?;
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                bounds.write_xfrm(xml)?;
                xml.push_str("</p:spPr>");

                frame.to_xml(xml, false)?;
                xml.push_str("</p:sp>");
            }
            ShapeKind::TextBox { bounds, frame } => {
                xml.push_str("<p:sp><p:nvSpPr>");
                write!(xml, r#"<p:cNvPr id="{}" name="TextBox {}"/>"#, self.id, seq)
                    .map_err(xml_err)?;
                xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/>"#);
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                bounds.write_xfrm(xml)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
                xml.push_str("</p:spPr>");

                // New text boxes don't wrap unless asked to
                let frame_xml = if frame.word_wrap.is_none() {
                    frame.clone().with_word_wrap(false)
                } else {
                    frame.clone()
                };
                frame_xml.to_xml(xml, true)?;
                xml.push_str("</p:sp>");
            }
            ShapeKind::Picture {
                media_index,
                bounds,
                description,
            } => {
                let rel_id = media_rel_ids.get(*media_index).ok_or_else(|| {
                    Error::XmlError(format!("No relationship for media {}", media_index))
                })?;

                xml.push_str("<p:pic><p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
                    self.id,
                    seq,
                    escape_xml(description)
                )
                .map_err(xml_err)?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/>"#);
                xml.push_str("</p:nvPicPr>");

                xml.push_str("<p:blipFill>");
                write!(xml, r#"<a:blip r:embed="{}"/>"#, rel_id).map_err(xml_err)?;
                xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
                xml.push_str("</p:blipFill>");

                xml.push_str("<p:spPr>");
                bounds.write_xfrm(xml)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr>");
                xml.push_str("</p:pic>");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shape: &Shape) -> String {
        let mut xml = String::new();
        shape.to_xml(&mut xml, &["rId2".to_string()]).unwrap();
        xml
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
        assert_eq!(escape_xml("bell\u{7}tab\t"), "belltab\t");
    }

    #[test]
    fn test_escape_xml_drops_noncharacters() {
        assert_eq!(escape_xml("a\u{FFFE}b\u{FFFF}c"), "abc");
        assert_eq!(
            escape_xml("\u{0}\u{1F}x\u{D7FF}\u{E000}\u{FFFD}"),
            "x\u{D7FF}\u{E000}\u{FFFD}"
        );
        assert_eq!(escape_xml("line\r\nnext 🌍"), "line\r\nnext 🌍");
    }

    #[test]
    fn test_frame_from_text_splits_lines() {
        let frame = TextFrame::from_text("Thanks!\n\nBye");
        assert_eq!(frame.paragraphs.len(), 3);
        assert_eq!(frame.paragraphs[1].text, "");
        assert_eq!(frame.text(), "Thanks!\n\nBye");
    }

    #[test]
    fn test_first_alignment_only() {
        let frame = TextFrame::from_text("a\nb").with_first_alignment(Alignment::Center);
        assert_eq!(frame.paragraphs[0].alignment, Some(Alignment::Center));
        assert_eq!(frame.paragraphs[1].alignment, None);
    }

    #[test]
    fn test_placeholder_xml() {
        let frame = TextFrame::from_text("Hello & welcome")
            .with_word_wrap(true)
            .with_alignment(Alignment::Center)
            .with_format(&RunFormat::new().size(18.0).font("Arial").color(Rgb(0, 0, 0)));
        let shape = Shape {
            id: 2,
            kind: ShapeKind::Placeholder {
                placeholder: PlaceholderKind::Title,
                bounds: Bounds::inches(0.5, 0.3, 9.0, 1.25),
                frame,
            },
        };

        let xml = render(&shape);
        assert!(xml.contains(r#"<p:cNvPr id="2" name="Title 1"/>"#));
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains(r#"<a:bodyPr wrap="square"/>"#));
        assert!(xml.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(xml.contains(r#"sz="1800""#));
        assert!(xml.contains(
            r#"<a:solidFill><a:srgbClr val="000000"/></a:solidFill><a:latin typeface="Arial"/>"#
        ));
        assert!(xml.contains("<a:t>Hello &amp; welcome</a:t>"));
    }

    #[test]
    fn test_text_box_defaults_to_no_wrap() {
        let shape = Shape {
            id: 2,
            kind: ShapeKind::TextBox {
                bounds: Bounds::inches(1.0, 2.0, 8.0, 2.0),
                frame: TextFrame::from_text("a\n\nb"),
            },
        };

        let xml = render(&shape);
        assert!(xml.contains(r#"txBox="1""#));
        assert!(xml.contains(r#"<a:bodyPr wrap="none"><a:spAutoFit/></a:bodyPr>"#));
        assert!(xml.contains(r#"<a:endParaRPr lang="en-US" dirty="0"/>"#));
    }

    #[test]
    fn test_picture_xml() {
        let shape = Shape {
            id: 4,
            kind: ShapeKind::Picture {
                media_index: 0,
                bounds: Bounds::inches(0.5, 2.5, 4.0, 3.0),
                description: "ocean waves".to_string(),
            },
        };

        let xml = render(&shape);
        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.contains(r#"descr="ocean waves""#));
        assert!(xml.contains(r#"<a:off x="457200" y="2286000"/>"#));
        assert!(xml.contains(r#"<a:ext cx="3657600" cy="2743200"/>"#));
    }

    #[test]
    fn test_picture_without_relationship_fails() {
        let shape = Shape {
            id: 4,
            kind: ShapeKind::Picture {
                media_index: 3,
                bounds: Bounds::inches(0.0, 0.0, 1.0, 1.0),
                description: String::new(),
            },
        };
        let mut xml = String::new();
        assert!(shape.to_xml(&mut xml, &[]).is_err());
    }
}
