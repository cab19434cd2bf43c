//! Domain types for representing a requested deck and its slide plan.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A validated request to generate a deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckRequest {
    /// Deck title, shown on the first slide and used for the file name.
    pub title: String,

    /// Free text; each non-empty line becomes one content slide.
    pub content: String,
}

impl DeckRequest {
    /// Create a request, rejecting a blank title or blank content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let content = content.into();

        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(Error::MissingInput(
                "Please fill in the title and the content!".to_string(),
            ));
        }

        Ok(Self { title, content })
    }
}

/// The planned contents of a deck, before images are fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckPlan {
    /// Deck title as entered.
    pub title: String,

    /// Slides in presentation order.
    pub slides: Vec<SlidePlan>,
}

impl DeckPlan {
    /// Number of slides in the plan.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Number of content slides (one per paragraph).
    pub fn content_slide_count(&self) -> usize {
        self.slides
            .iter()
            .filter(|s| matches!(s, SlidePlan::Content { .. }))
            .count()
    }
}

/// A single planned slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlidePlan {
    /// Opening slide with the deck title and a fixed subtitle.
    Title {
        title: String,
        subtitle: String,
        image_query: String,
    },
    /// One paragraph of the content.
    Content {
        heading: String,
        body: String,
        image_query: String,
    },
    /// Fixed closing slide.
    Closing { text: String },
}

impl SlidePlan {
    /// Image-search query for this slide, if it carries a picture.
    pub fn image_query(&self) -> Option<&str> {
        match self {
            Self::Title { image_query, .. } | Self::Content { image_query, .. } => {
                Some(image_query.as_str())
            }
            Self::Closing { .. } => None,
        }
    }
}

/// Image formats that can be embedded as slide media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }

        None
    }

    /// File extension used for the media part.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
        }
    }

    /// MIME type registered in `[Content_Types].xml`.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }
}

/// An image ready to be placed on a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    /// Raw encoded image bytes.
    pub data: Vec<u8>,

    /// Encoding of `data`.
    pub format: ImageFormat,
}

impl Picture {
    /// Wrap raw bytes, detecting the format from their header.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = ImageFormat::from_magic(&data).ok_or_else(|| {
            Error::UnsupportedImage("unrecognized image header".to_string())
        })?;
        Ok(Self { data, format })
    }
}
