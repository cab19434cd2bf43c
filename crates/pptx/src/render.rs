//! Maps a [`DeckPlan`] onto slides.

use crate::shape::{Alignment, Bounds, PlaceholderKind, RunFormat, TextFrame};
use crate::slide::Layout;
use crate::units::Emu;
use crate::writer::PresentationWriter;
use slidegen_core::{DeckPlan, DeckStyle, Picture, PictureBox, SlidePlan};

// Placeholder geometry of the standard 4:3 layouts, in EMUs.
const CENTERED_TITLE: (i64, i64, i64, i64) = (685800, 2130425, 7772400, 1470025);
const SUBTITLE: (i64, i64, i64, i64) = (1371600, 3886200, 6400800, 1752600);
const TITLE: (i64, i64, i64, i64) = (457200, 274638, 8229600, 1143000);
const BODY: (i64, i64, i64, i64) = (457200, 1600200, 8229600, 4525963);

fn bounds((x, y, cx, cy): (i64, i64, i64, i64)) -> Bounds {
    Bounds::new(Emu(x), Emu(y), Emu(cx), Emu(cy))
}

fn picture_bounds(frame: &PictureBox) -> Bounds {
    Bounds::inches(frame.left, frame.top, frame.width, frame.height)
}

/// Lays out planned slides with a [`DeckStyle`].
#[derive(Debug, Clone, Default)]
pub struct DeckRenderer {
    style: DeckStyle,
}

impl DeckRenderer {
    pub fn new(style: DeckStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &DeckStyle {
        &self.style
    }

    /// Build the presentation. `pictures[i]` is the picture for slide `i`;
    /// missing entries and `None` leave the slide without one.
    pub fn render(&self, plan: &DeckPlan, pictures: &[Option<Picture>]) -> PresentationWriter {
        let mut writer = PresentationWriter::new().with_title(plan.title.clone());

        for (index, slide_plan) in plan.slides.iter().enumerate() {
            let picture = pictures.get(index).cloned().flatten();
            self.render_slide(&mut writer, slide_plan, picture);
        }

        writer
    }

    fn render_slide(
        &self,
        writer: &mut PresentationWriter,
        slide_plan: &SlidePlan,
        picture: Option<Picture>,
    ) {
        let style = &self.style;

        match slide_plan {
            SlidePlan::Title {
                title,
                subtitle,
                image_query,
            } => {
                let title_format = RunFormat::new().size(style.title_size).color(style.title_color);
                let subtitle_format = RunFormat::new()
                    .size(style.subtitle_size)
                    .color(style.title_color);

                let slide = writer.add_slide(Layout::TitleSlide);
                slide
                    .add_placeholder(
                        PlaceholderKind::CenteredTitle,
                        bounds(CENTERED_TITLE),
                        TextFrame::from_text(title).with_format(&title_format),
                    )
                    .add_placeholder(
                        PlaceholderKind::Subtitle,
                        bounds(SUBTITLE),
                        TextFrame::from_text(subtitle).with_format(&subtitle_format),
                    );

                if let Some(picture) = picture {
                    slide.add_picture(
                        picture,
                        picture_bounds(&style.title_picture),
                        image_query.as_str(),
                    );
                }
            }
            SlidePlan::Content {
                heading,
                body,
                image_query,
            } => {
                let format = RunFormat::new()
                    .size(style.content_size)
                    .font(style.content_font.as_str())
                    .color(style.content_color);
                let frame = |text: &str| {
                    TextFrame::from_text(text)
                        .with_word_wrap(true)
                        .with_alignment(Alignment::Center)
                        .with_format(&format)
                };

                let slide = writer.add_slide(Layout::TitleAndContent);
                slide
                    .add_placeholder(PlaceholderKind::Title, bounds(TITLE), frame(heading))
                    .add_placeholder(PlaceholderKind::Body, bounds(BODY), frame(body));

                if let Some(picture) = picture {
                    slide.add_picture(
                        picture,
                        picture_bounds(&style.content_picture),
                        image_query.as_str(),
                    );
                }
            }
            SlidePlan::Closing { text } => {
                let format = RunFormat::new()
                    .size(style.closing_size)
                    .color(style.closing_color);

                writer.add_slide(Layout::Blank).add_text_box(
                    picture_bounds(&style.closing_box),
                    TextFrame::from_text(text)
                        .with_format(&format)
                        .with_first_alignment(Alignment::Center),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidegen_core::{DeckRequest, ImageFormat, OutlineBuilder};

    fn plan(content: &str) -> DeckPlan {
        OutlineBuilder::new().build(&DeckRequest::new("Green Planet", content).unwrap())
    }

    fn jpeg() -> Picture {
        Picture {
            data: vec![0xFF, 0xD8, 0xFF, 0xE0],
            format: ImageFormat::Jpeg,
        }
    }

    #[test]
    fn test_layouts_follow_plan() {
        let writer = DeckRenderer::default().render(&plan("one\ntwo"), &[]);
        let layouts: Vec<Layout> = writer.slides().iter().map(|s| s.layout()).collect();
        assert_eq!(
            layouts,
            vec![
                Layout::TitleSlide,
                Layout::TitleAndContent,
                Layout::TitleAndContent,
                Layout::Blank
            ]
        );
        assert_eq!(writer.media_count(), 0);
    }

    #[test]
    fn test_pictures_placed_by_index() {
        let plan = plan("one\ntwo");
        let pictures = vec![Some(jpeg()), None, Some(jpeg()), None];
        let writer = DeckRenderer::default().render(&plan, &pictures);

        let with_pictures: Vec<bool> = writer
            .slides()
            .iter()
            .map(|s| s.shapes().iter().any(|shape| shape.is_picture()))
            .collect();
        assert_eq!(with_pictures, vec![true, false, true, false]);
        assert_eq!(writer.media_count(), 2);
    }

    #[test]
    fn test_title_slide_formatting() {
        let writer = DeckRenderer::default().render(&plan("x"), &[Some(jpeg())]);
        let title = writer.slides()[0].shapes()[0].text_frame().unwrap();

        assert_eq!(title.text(), "Green Planet");
        assert_eq!(title.paragraphs[0].format.size, Some(44.0));
        assert_eq!(
            title.paragraphs[0].format.color.map(|c| c.hex()),
            Some("003366".to_string())
        );

        let subtitle = writer.slides()[0].shapes()[1].text_frame().unwrap();
        assert_eq!(subtitle.paragraphs[0].format.size, Some(24.0));
        assert_eq!(
            subtitle.paragraphs[0].format.color.map(|c| c.hex()),
            Some("003366".to_string())
        );

        let picture = &writer.slides()[0].shapes()[2];
        assert!(picture.is_picture());
        assert_eq!(picture.bounds(), Bounds::inches(7.0, 2.0, 3.0, 2.0));
    }

    #[test]
    fn test_content_slide_formatting() {
        let writer = DeckRenderer::default().render(&plan("Forests store carbon"), &[]);
        let shapes = writer.slides()[1].shapes();

        let heading = shapes[0].text_frame().unwrap();
        assert_eq!(heading.text(), "Slide 2: Forests store carbon...");
        let body = shapes[1].text_frame().unwrap();
        assert_eq!(body.text(), "Forests store carbon");
        assert_eq!(body.word_wrap, Some(true));
        assert_eq!(body.paragraphs[0].alignment, Some(Alignment::Center));
        assert_eq!(body.paragraphs[0].format.font.as_deref(), Some("Arial"));
        assert_eq!(body.paragraphs[0].format.size, Some(18.0));
        assert_eq!(
            body.paragraphs[0].format.color.map(|c| c.hex()),
            Some("000000".to_string())
        );
    }

    #[test]
    fn test_content_picture_frame() {
        let writer = DeckRenderer::default().render(&plan("x"), &[None, Some(jpeg())]);
        let picture = &writer.slides()[1].shapes()[2];
        assert!(picture.is_picture());
        assert_eq!(picture.bounds(), Bounds::inches(0.5, 2.5, 4.0, 3.0));
    }

    #[test]
    fn test_closing_slide() {
        let writer = DeckRenderer::default().render(&plan("x"), &[]);
        let closing = writer.slides().last().unwrap();
        assert_eq!(closing.shapes().len(), 1);
        assert_eq!(closing.shapes()[0].bounds(), Bounds::inches(1.0, 2.0, 8.0, 2.0));
        let frame = closing.shapes()[0].text_frame().unwrap();

        assert_eq!(frame.paragraphs.len(), 3);
        assert_eq!(frame.paragraphs[0].alignment, Some(Alignment::Center));
        assert_eq!(frame.paragraphs[2].alignment, None);
        for paragraph in [&frame.paragraphs[0], &frame.paragraphs[2]] {
            assert_eq!(paragraph.format.size, Some(32.0));
            assert_eq!(
                paragraph.format.color.map(|c| c.hex()),
                Some("008000".to_string())
            );
        }
    }
}
