//! Presentation package writer.

use crate::shape::escape_xml;
use crate::slide::{Layout, Slide};
use crate::template;
use crate::units::Emu;
use slidegen_core::{Error, ImageFormat, Result};
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// First ID used in `p:sldIdLst`; lower values are reserved.
const FIRST_SLIDE_ID: u32 = 256;

/// Builds a .pptx package in memory.
///
/// Slides are added in presentation order; the package always carries one
/// slide master, the layouts in [`Layout::ALL`] and one theme.
#[derive(Debug)]
pub struct PresentationWriter {
    title: String,
    slides: Vec<Slide>,
    slide_width: Emu,
    slide_height: Emu,
}

impl Default for PresentationWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationWriter {
    /// Create an empty 10" x 7.5" (4:3) presentation.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            slides: Vec::new(),
            slide_width: Emu::inches(10.0),
            slide_height: Emu::inches(7.5),
        }
    }

    /// Set the document title stored in the core properties.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Append a slide using `layout` and return it for filling in.
    pub fn add_slide(&mut self, layout: Layout) -> &mut Slide {
        self.slides.push(Slide::new(layout));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Number of pictures embedded across all slides.
    pub fn media_count(&self) -> usize {
        self.slides.iter().map(|s| s.media().len()).sum()
    }

    pub fn slide_width(&self) -> Emu {
        self.slide_width
    }

    pub fn slide_height(&self) -> Emu {
        self.slide_height
    }

    /// Serialize the package to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Write the package as a ZIP archive to `writer`.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let xml_options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        // Image data is already compressed
        let media_options = FileOptions::default().compression_method(CompressionMethod::Stored);

        let media_names = self.media_names();
        let formats = self.media_formats();

        put_file(&mut zip, "[Content_Types].xml", xml_options, &self.content_types_xml(&formats))?;
        put_file(&mut zip, "_rels/.rels", xml_options, ROOT_RELS)?;
        put_file(&mut zip, "docProps/core.xml", xml_options, &self.core_props_xml())?;
        put_file(&mut zip, "docProps/app.xml", xml_options, &self.app_props_xml())?;
        put_file(&mut zip, "ppt/presentation.xml", xml_options, &self.presentation_xml()?)?;
        put_file(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            xml_options,
            &self.presentation_rels_xml(),
        )?;
        put_file(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            xml_options,
            &template::slide_master_xml(),
        )?;
        put_file(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            xml_options,
            &template::slide_master_rels_xml(),
        )?;
        for layout in Layout::ALL {
            let n = layout.part_number();
            put_file(
                &mut zip,
                &format!("ppt/slideLayouts/slideLayout{}.xml", n),
                xml_options,
                &template::slide_layout_xml(layout),
            )?;
            put_file(
                &mut zip,
                &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", n),
                xml_options,
                template::slide_layout_rels_xml(),
            )?;
        }
        put_file(&mut zip, "ppt/theme/theme1.xml", xml_options, template::theme_xml())?;

        for (index, (slide, names)) in self.slides.iter().zip(&media_names).enumerate() {
            let n = index + 1;
            put_file(
                &mut zip,
                &format!("ppt/slides/slide{}.xml", n),
                xml_options,
                &slide.to_xml()?,
            )?;
            put_file(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", n),
                xml_options,
                &slide.rels_xml(names),
            )?;

            for (picture, name) in slide.media().iter().zip(names) {
                zip.start_file(format!("ppt/media/{}", name), media_options)
                    .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
                zip.write_all(&picture.data)?;
            }
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;

        log::debug!(
            "Wrote presentation with {} slides and {} images",
            self.slide_count(),
            self.media_count()
        );

        Ok(())
    }

    /// Package-wide media file names per slide: `image1.jpg`, `image2.png`, …
    fn media_names(&self) -> Vec<Vec<String>> {
        let mut counter = 0;
        self.slides
            .iter()
            .map(|slide| {
                slide
                    .media()
                    .iter()
                    .map(|picture| {
                        counter += 1;
                        format!("image{}.{}", counter, picture.format.extension())
                    })
                    .collect()
            })
            .collect()
    }

    /// Distinct media formats, in order of first use.
    fn media_formats(&self) -> Vec<ImageFormat> {
        let mut formats = Vec::new();
        for picture in self.slides.iter().flat_map(|s| s.media()) {
            if !formats.contains(&picture.format) {
                formats.push(picture.format);
            }
        }
        formats
    }

    fn content_types_xml(&self, media_formats: &[ImageFormat]) -> String {
        let mut xml = String::with_capacity(2048);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
        xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        for format in media_formats {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                format.extension(),
                format.mime_type()
            ));
        }
        xml.push_str(r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#);
        xml.push_str(r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#);
        for layout in Layout::ALL {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slideLayouts/slideLayout{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#,
                layout.part_number()
            ));
        }
        for n in 1..=self.slides.len() {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                n
            ));
        }
        xml.push_str(r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);
        xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
        xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
        xml.push_str("</Types>");
        xml
    }

    /// Generate `ppt/presentation.xml`. Relationship `rId1` is the master,
    /// `rId2` the theme and slides follow from `rId3`.
    fn presentation_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);
        xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for index in 0..self.slides.len() {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                    FIRST_SLIDE_ID + index as u32,
                    index + 3
                )
                .map_err(|e| Error::XmlError(e.to_string()))?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/>"#,
            self.slide_width.value(),
            self.slide_height.value()
        )
        .map_err(|e| Error::XmlError(e.to_string()))?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }

    fn presentation_rels_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
        xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#);
        xml.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>"#);
        for n in 1..=self.slides.len() {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                n + 2,
                n
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn core_props_xml(&self) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
                "<dc:title>{}</dc:title><dc:creator>slidegen</dc:creator>",
                "</cp:coreProperties>"
            ),
            escape_xml(&self.title)
        )
    }

    fn app_props_xml(&self) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
                "<Application>slidegen</Application><Slides>{}</Slides>",
                "</Properties>"
            ),
            self.slides.len()
        )
    }
}

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
    r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
    "</Relationships>"
);

fn put_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &str,
    options: FileOptions,
    content: &str,
) -> Result<()> {
    zip.start_file(path, options)
        .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", path, e)))?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}
