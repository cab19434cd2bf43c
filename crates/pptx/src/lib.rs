//! PPTX (Office Open XML) backend for slide deck generation.
//!
//! Writes .pptx packages (ZIP archives of PresentationML parts) from a planned
//! deck, and reads them back for inspection.

pub mod pipeline;
pub mod reader;
pub mod render;
pub mod shape;
pub mod slide;
mod template;
pub mod units;
pub mod writer;

pub use pipeline::{DeckGenerator, GeneratedDeck};
pub use reader::{inspect, SlideSummary};
pub use render::DeckRenderer;
pub use shape::{Alignment, Bounds, PlaceholderKind, RunFormat, TextFrame, TextParagraph};
pub use slide::{Layout, Slide};
pub use units::Emu;
pub use writer::PresentationWriter;

/// MIME type of a .pptx file.
pub const PPTX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";
