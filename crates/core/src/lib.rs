//! Core domain types, keyword extraction and slide planning
//! for turning a title and a block of text into a slide deck.

pub mod error;
pub mod filename;
pub mod keywords;
pub mod outline;
pub mod source;
pub mod style;
pub mod types;

pub use error::{Error, Result};
pub use filename::output_filename;
pub use keywords::{extract_keywords, image_query, KeywordExtractor};
pub use outline::{split_paragraphs, OutlineBuilder};
pub use source::{ImageSource, NoImages};
pub use style::{DeckStyle, PictureBox, Rgb};
pub use types::{DeckPlan, DeckRequest, ImageFormat, Picture, SlidePlan};
