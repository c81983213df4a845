//! A small PowerPoint (Office Open XML) authoring layer.
//!
//! Models just enough of PresentationML to build decks from the stock title
//! and title-and-content layouts: slides, placeholders, text frames and
//! paragraphs. [`Presentation::save`] produces a complete `.pptx` package.

mod layout;
mod package;
mod parts;
mod presentation;
mod slide;
mod text;

pub use layout::{PlaceholderKind, PlaceholderSpec, SlideLayout};
pub use presentation::{CoreProperties, Presentation};
pub use slide::{Placeholder, Slide};
pub use text::{Paragraph, Points, TextFrame, MAX_LEVEL};

use thiserror::Error;

/// Media type of a `.pptx` document.
pub const PPTX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

#[derive(Debug, Error)]
pub enum PptxError {
    #[error("Layout '{}' has no placeholder with idx {idx}", .layout.name())]
    MissingPlaceholder { layout: SlideLayout, idx: u32 },

    #[error("Paragraph level {0} exceeds the maximum of {}", MAX_LEVEL)]
    InvalidLevel(u8),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
