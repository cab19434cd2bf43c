//! Slide planning: turns a request into the ordered list of slides.

use crate::keywords::KeywordExtractor;
use crate::style::DeckStyle;
use crate::types::{DeckPlan, DeckRequest, SlidePlan};

/// Split content into paragraphs: one per non-empty line, trimmed.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds a [`DeckPlan`]: a title slide, one slide per paragraph and a closing slide.
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    extractor: KeywordExtractor,
    style: DeckStyle,
}

impl OutlineBuilder {
    /// Create a builder with the default extractor and style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom keyword extractor.
    pub fn with_extractor(mut self, extractor: KeywordExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Use a custom style (subtitle, closing text, heading length).
    pub fn with_style(mut self, style: DeckStyle) -> Self {
        self.style = style;
        self
    }

    /// Plan the slides for `request`.
    pub fn build(&self, request: &DeckRequest) -> DeckPlan {
        let paragraphs = split_paragraphs(&request.content);
        let mut slides = Vec::with_capacity(paragraphs.len() + 2);

        slides.push(SlidePlan::Title {
            title: request.title.clone(),
            subtitle: self.style.subtitle.clone(),
            image_query: self.extractor.query(&request.title),
        });

        // Content slides are numbered from 2, after the title slide
        for (number, paragraph) in paragraphs.into_iter().enumerate().map(|(i, p)| (i + 2, p)) {
            slides.push(SlidePlan::Content {
                heading: self.heading(number, &paragraph),
                image_query: self.extractor.query(&paragraph),
                body: paragraph,
            });
        }

        slides.push(SlidePlan::Closing {
            text: self.style.closing_text.clone(),
        });

        log::debug!(
            "Planned {} slides for \"{}\"",
            slides.len(),
            request.title
        );

        DeckPlan {
            title: request.title.clone(),
            slides,
        }
    }

    /// Short heading for a content slide: its number and the start of the paragraph.
    fn heading(&self, number: usize, paragraph: &str) -> String {
        let excerpt: String = paragraph.chars().take(self.style.heading_chars).collect();
        format!("Slide {}: {}...", number, excerpt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, content: &str) -> DeckRequest {
        DeckRequest::new(title, content).unwrap()
    }

    #[test]
    fn test_split_paragraphs() {
        assert_eq!(
            split_paragraphs("Intro\n\n  Body text  \r\n\nEnd"),
            vec!["Intro", "Body text", "End"]
        );
        assert!(split_paragraphs(" \n\t\n").is_empty());
    }

    #[test]
    fn test_plan_shape() {
        let plan = OutlineBuilder::new().build(&request(
            "The Environment",
            "Introduction: nature matters.\n\nBody: recycling helps.\nConclusion: act now!",
        ));

        assert_eq!(plan.slide_count(), 5);
        assert_eq!(plan.content_slide_count(), 3);
        assert!(matches!(plan.slides[0], SlidePlan::Title { .. }));
        assert!(matches!(plan.slides[4], SlidePlan::Closing { .. }));
    }

    #[test]
    fn test_title_slide() {
        let plan = OutlineBuilder::new().build(&request("Ocean Life", "Whales sing"));
        assert_eq!(
            plan.slides[0],
            SlidePlan::Title {
                title: "Ocean Life".to_string(),
                subtitle: "School Assignment - Generated Automatically".to_string(),
                image_query: "ocean life".to_string(),
            }
        );
    }

    #[test]
    fn test_content_headings_numbered_from_two() {
        let plan = OutlineBuilder::new().build(&request("T", "first line\nsecond line"));

        match &plan.slides[1] {
            SlidePlan::Content { heading, body, image_query } => {
                assert_eq!(heading, "Slide 2: first line...");
                assert_eq!(body, "first line");
                assert_eq!(image_query, "first line");
            }
            other => panic!("expected content slide, got {:?}", other),
        }
        match &plan.slides[2] {
            SlidePlan::Content { heading, .. } => assert_eq!(heading, "Slide 3: second line..."),
            other => panic!("expected content slide, got {:?}", other),
        }
    }

    #[test]
    fn test_heading_truncated_to_fifty_chars() {
        let paragraph = "é".repeat(60);
        let plan = OutlineBuilder::new().build(&request("T", &paragraph));

        match &plan.slides[1] {
            SlidePlan::Content { heading, body, .. } => {
                assert_eq!(heading, &format!("Slide 2: {}...", "é".repeat(50)));
                assert_eq!(body.chars().count(), 60);
            }
            other => panic!("expected content slide, got {:?}", other),
        }
    }

    #[test]
    fn test_fallback_query_for_title() {
        let plan = OutlineBuilder::new().build(&request("O Mar", "Waves"));
        assert_eq!(plan.slides[0].image_query(), Some("education"));
    }

    #[test]
    fn test_custom_style_and_extractor() {
        let builder = OutlineBuilder::new()
            .with_style(DeckStyle::default().with_closing_text("Obrigado!"))
            .with_extractor(KeywordExtractor::new().with_fallback("science"));
        let plan = builder.build(&request("Lab", "ok"));

        assert_eq!(plan.slides[1].image_query(), Some("science"));
        assert_eq!(
            plan.slides.last(),
            Some(&SlidePlan::Closing {
                text: "Obrigado!".to_string()
            })
        );
    }
}
