//! A single slide being written.

use crate::shape::{Bounds, PlaceholderKind, Shape, ShapeKind, TextFrame};
use slidegen_core::{Picture, Result};

/// The layouts shipped in the package's slide master.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Centered title and subtitle.
    TitleSlide,
    /// Title with a content area below.
    TitleAndContent,
    /// No placeholders.
    Blank,
}

impl Layout {
    /// All layouts, in the order they're stored in the package.
    pub const ALL: [Layout; 3] = [Layout::TitleSlide, Layout::TitleAndContent, Layout::Blank];

    /// 1-based part number (`slideLayoutN.xml`).
    pub fn part_number(self) -> usize {
        match self {
            Self::TitleSlide => 1,
            Self::TitleAndContent => 2,
            Self::Blank => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TitleSlide => "Title Slide",
            Self::TitleAndContent => "Title and Content",
            Self::Blank => "Blank",
        }
    }
}

/// A slide: a layout reference, shapes in z-order and the media they embed.
#[derive(Debug, Clone)]
pub struct Slide {
    layout: Layout,
    shapes: Vec<Shape>,
    media: Vec<Picture>,
}

impl Slide {
    pub(crate) fn new(layout: Layout) -> Self {
        Self {
            layout,
            shapes: Vec::new(),
            media: Vec::new(),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub(crate) fn media(&self) -> &[Picture] {
        &self.media
    }

    /// Next free shape ID; ID 1 is the shape tree itself.
    fn next_shape_id(&self) -> u32 {
        self.shapes.len() as u32 + 2
    }

    /// Fill a layout placeholder with text.
    pub fn add_placeholder(
        &mut self,
        placeholder: PlaceholderKind,
        bounds: Bounds,
        frame: TextFrame,
    ) -> &mut Self {
        let id = self.next_shape_id();
        self.shapes.push(Shape {
            id,
            kind: ShapeKind::Placeholder {
                placeholder,
                bounds,
                frame,
            },
        });
        self
    }

    /// Add a free-standing text box.
    pub fn add_text_box(&mut self, bounds: Bounds, frame: TextFrame) -> &mut Self {
        let id = self.next_shape_id();
        self.shapes.push(Shape {
            id,
            kind: ShapeKind::TextBox { bounds, frame },
        });
        self
    }

    /// Add a picture stretched into `bounds`.
    pub fn add_picture(
        &mut self,
        picture: Picture,
        bounds: Bounds,
        description: impl Into<String>,
    ) -> &mut Self {
        let id = self.next_shape_id();
        self.media.push(picture);
        self.shapes.push(Shape {
            id,
            kind: ShapeKind::Picture {
                media_index: self.media.len() - 1,
                bounds,
                description: description.into(),
            },
        });
        self
    }

    /// Relationship IDs of this slide's media; `rId1` is the layout.
    pub(crate) fn media_rel_ids(&self) -> Vec<String> {
        (0..self.media.len()).map(|i| format!("rId{}", i + 2)).collect()
    }

    /// Generate `ppt/slides/slideN.xml`.
    pub(crate) fn to_xml(&self) -> Result<String> {
        let rel_ids = self.media_rel_ids();
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);
        xml.push_str("<p:cSld><p:spTree>");
        xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
        xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);

        for shape in &self.shapes {
            shape.to_xml(&mut xml, &rel_ids)?;
        }

        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }

    /// Generate `ppt/slides/_rels/slideN.xml.rels`. `media_targets[i]` is the
    /// package file name of the slide's i-th media part (e.g. `image3.jpg`).
    pub(crate) fn rels_xml(&self, media_targets: &[String]) -> String {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
        xml.push_str(&format!(
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout{}.xml"/>"#,
            self.layout.part_number()
        ));
        for (rel_id, target) in self.media_rel_ids().iter().zip(media_targets) {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/{}"/>"#,
                rel_id, target
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}
