//! End-to-end generation: plan, fetch pictures, render, package.

use crate::render::DeckRenderer;
use slidegen_core::{
    output_filename, DeckPlan, DeckRequest, DeckStyle, ImageSource, KeywordExtractor,
    OutlineBuilder, Picture, Result,
};
use std::fs;
use std::path::{Path, PathBuf};

/// A finished deck, held in memory.
#[derive(Debug, Clone)]
pub struct GeneratedDeck {
    /// File name derived from the title (`slides_<slug>.pptx`).
    pub filename: String,
    /// The .pptx package.
    pub bytes: Vec<u8>,
    pub slide_count: usize,
    /// Slides that received a picture.
    pub images_embedded: usize,
}

impl GeneratedDeck {
    /// Write the deck into `dir` under its file name and return the full path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)?;
        log::info!("Saved {}", path.display());
        Ok(path)
    }
}

/// Generates decks, looking up one picture per slide through an [`ImageSource`].
#[derive(Debug, Clone)]
pub struct DeckGenerator<S> {
    source: S,
    outline: OutlineBuilder,
    renderer: DeckRenderer,
}

impl<S: ImageSource> DeckGenerator<S> {
    /// Create a generator with the default style and keyword extractor.
    pub fn new(source: S) -> Self {
        Self {
            source,
            outline: OutlineBuilder::new(),
            renderer: DeckRenderer::default(),
        }
    }

    /// Use a custom style for both planning and rendering.
    pub fn with_style(mut self, style: DeckStyle) -> Self {
        self.outline = self.outline.with_style(style.clone());
        self.renderer = DeckRenderer::new(style);
        self
    }

    /// Use a custom keyword extractor for image queries.
    pub fn with_extractor(mut self, extractor: KeywordExtractor) -> Self {
        self.outline = self.outline.with_extractor(extractor);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Plan the slides without fetching anything.
    pub fn plan(&self, request: &DeckRequest) -> DeckPlan {
        self.outline.build(request)
    }

    /// Look up pictures for every slide that has a query, one after another.
    pub async fn fetch_pictures(&self, plan: &DeckPlan) -> Vec<Option<Picture>> {
        let mut pictures = Vec::with_capacity(plan.slides.len());

        for (index, slide) in plan.slides.iter().enumerate() {
            let picture = match slide.image_query() {
                Some(query) => {
                    log::debug!("Slide {}: looking up image for \"{}\"", index + 1, query);
                    self.source.fetch(query).await
                }
                None => None,
            };
            pictures.push(picture);
        }

        pictures
    }

    /// Generate the complete deck for `request`.
    pub async fn generate(&self, request: &DeckRequest) -> Result<GeneratedDeck> {
        let plan = self.plan(request);
        let pictures = self.fetch_pictures(&plan).await;
        let images_embedded = pictures.iter().filter(|p| p.is_some()).count();

        let writer = self.renderer.render(&plan, &pictures);
        let bytes = writer.to_bytes()?;

        log::info!(
            "Generated \"{}\": {} slides, {} images",
            plan.title,
            plan.slide_count(),
            images_embedded
        );

        Ok(GeneratedDeck {
            filename: output_filename(&request.title),
            bytes,
            slide_count: plan.slide_count(),
            images_embedded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::inspect;
    use slidegen_core::{ImageFormat, NoImages};
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Returns a tiny PNG for every query except those containing "missing",
    /// and records what was asked.
    #[derive(Default)]
    struct FakeSource {
        queries: Mutex<Vec<String>>,
    }

    impl ImageSource for FakeSource {
        async fn fetch(&self, query: &str) -> Option<Picture> {
            self.queries.lock().unwrap().push(query.to_string());
            if query.contains("missing") {
                return None;
            }
            Some(Picture {
                data: vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
                format: ImageFormat::Png,
            })
        }
    }

    #[tokio::test]
    async fn test_generate_without_images() {
        let generator = DeckGenerator::new(NoImages);
        let request = DeckRequest::new("Meio Ambiente", "Intro\n\nBody\nEnd").unwrap();

        let deck = generator.generate(&request).await.unwrap();
        assert_eq!(deck.filename, "slides_Meio_Ambiente.pptx");
        assert_eq!(deck.slide_count, 5);
        assert_eq!(deck.images_embedded, 0);

        let slides = inspect(Cursor::new(deck.bytes)).unwrap();
        assert_eq!(slides.len(), 5);
        assert!(slides.iter().all(|s| s.pictures == 0));
    }

    #[tokio::test]
    async fn test_one_query_per_illustrated_slide() {
        let generator = DeckGenerator::new(FakeSource::default());
        let request =
            DeckRequest::new("Ocean Waves", "Whales migrate south\nmissing pictures here").unwrap();

        let deck = generator.generate(&request).await.unwrap();
        assert_eq!(deck.images_embedded, 2);

        let queries = generator.source().queries.lock().unwrap().clone();
        assert_eq!(
            queries,
            vec!["ocean waves", "whales migrate south", "missing pictures here"]
        );

        let slides = inspect(Cursor::new(deck.bytes)).unwrap();
        let pictures: Vec<usize> = slides.iter().map(|s| s.pictures).collect();
        assert_eq!(pictures, vec![1, 1, 0, 0]);
    }

    #[tokio::test]
    async fn test_generated_text_reads_back() {
        let generator = DeckGenerator::new(NoImages)
            .with_style(DeckStyle::default().with_closing_text("Obrigado!"));
        let request = DeckRequest::new("Solar <System>", "Planets orbit the sun").unwrap();

        let deck = generator.generate(&request).await.unwrap();
        let slides = inspect(Cursor::new(deck.bytes)).unwrap();

        assert_eq!(
            slides[0].texts,
            vec!["Solar <System>", "School Assignment - Generated Automatically"]
        );
        assert_eq!(
            slides[1].texts,
            vec!["Slide 2: Planets orbit the sun...", "Planets orbit the sun"]
        );
        assert_eq!(slides[2].texts, vec!["Obrigado!"]);
    }

    #[tokio::test]
    async fn test_forbidden_characters_stripped_from_every_part() {
        use quick_xml::events::Event;
        use quick_xml::Reader;
        use std::io::Read;
        use zip::ZipArchive;

        let request = DeckRequest::new("Bad \u{FFFF} title", "line \u{FFFE} here\u{1}").unwrap();
        let deck = DeckGenerator::new(NoImages).generate(&request).await.unwrap();

        let mut archive = ZipArchive::new(Cursor::new(deck.bytes.clone())).unwrap();
        for i in 0..archive.len() {
            let mut part = archive.by_index(i).unwrap();
            let name = part.name().to_string();
            if !(name.ends_with(".xml") || name.ends_with(".rels")) {
                continue;
            }
            let mut xml = String::new();
            part.read_to_string(&mut xml).unwrap();
            assert!(
                !xml.contains(['\u{FFFE}', '\u{FFFF}', '\u{1}']),
                "{} kept a forbidden character",
                name
            );

            let mut reader = Reader::from_str(&xml);
            loop {
                match reader.read_event() {
                    Ok(Event::Eof) => break,
                    Ok(_) => {}
                    Err(e) => panic!("{} is not well-formed: {}", name, e),
                }
            }
        }

        let slides = inspect(Cursor::new(deck.bytes)).unwrap();
        assert_eq!(slides[0].texts[0], "Bad  title");
        assert_eq!(slides[1].texts[1], "line  here");
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let deck = DeckGenerator::new(NoImages)
            .generate(&DeckRequest::new("Save me", "line").unwrap())
            .await
            .unwrap();

        let path = deck.save(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("slides_Save_me.pptx"));
        assert_eq!(std::fs::read(&path).unwrap(), deck.bytes);
    }
}
