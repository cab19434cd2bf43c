//! Visual style and fixed texts of a generated deck.
//!
//! Geometry is kept in inches and type sizes in points; the writer converts to
//! EMUs when it lays out the package.

use serde::{Deserialize, Serialize};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Hex form used by DrawingML (`RRGGBB`, upper case).
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Position and size of a picture, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PictureBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PictureBox {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Everything about a deck that is not derived from the user's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckStyle {
    /// Subtitle placed under the title on the first slide.
    pub subtitle: String,
    /// Title slide: title size in points.
    pub title_size: f64,
    /// Title slide: subtitle size in points.
    pub subtitle_size: f64,
    /// Title slide: text colour for title and subtitle.
    pub title_color: Rgb,
    /// Title slide picture frame.
    pub title_picture: PictureBox,

    /// Content slides: heading and body size in points.
    pub content_size: f64,
    /// Content slides: typeface.
    pub content_font: String,
    /// Content slides: text colour.
    pub content_color: Rgb,
    /// Content slide picture frame.
    pub content_picture: PictureBox,
    /// Number of paragraph characters kept in a content slide heading.
    pub heading_chars: usize,

    /// Closing slide text; `\n` separates paragraphs.
    pub closing_text: String,
    /// Closing slide text box frame.
    pub closing_box: PictureBox,
    /// Closing slide size in points.
    pub closing_size: f64,
    /// Closing slide text colour.
    pub closing_color: Rgb,
}

impl Default for DeckStyle {
    fn default() -> Self {
        Self {
            subtitle: "School Assignment - Generated Automatically".to_string(),
            title_size: 44.0,
            subtitle_size: 24.0,
            title_color: Rgb(0, 51, 102),
            title_picture: PictureBox::new(7.0, 2.0, 3.0, 2.0),

            content_size: 18.0,
            content_font: "Arial".to_string(),
            content_color: Rgb(0, 0, 0),
            content_picture: PictureBox::new(0.5, 2.5, 4.0, 3.0),
            heading_chars: 50,

            closing_text: "Thank you for your attention!\n\nGenerated to make your life easier."
                .to_string(),
            closing_box: PictureBox::new(1.0, 2.0, 8.0, 2.0),
            closing_size: 32.0,
            closing_color: Rgb(0, 128, 0),
        }
    }
}

impl DeckStyle {
    /// Override the title slide subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Override the closing slide text.
    pub fn with_closing_text(mut self, text: impl Into<String>) -> Self {
        self.closing_text = text.into();
        self
    }
}
