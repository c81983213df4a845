use super::layout::SlideLayout;
use super::package;
use super::slide::Slide;
use super::PptxError;
use chrono::{DateTime, Utc};
use std::io::{Cursor, Seek, Write};

/// Document metadata written to `docProps/core.xml` and `docProps/app.xml`.
#[derive(Debug, Clone)]
pub struct CoreProperties {
    pub title: String,
    pub author: Option<String>,
    /// Name recorded as the producing application.
    pub generator: String,
    pub created: DateTime<Utc>,
}

impl Default for CoreProperties {
    fn default() -> Self {
        Self {
            title: "PowerPoint Presentation".to_string(),
            author: None,
            generator: env!("CARGO_PKG_NAME").to_string(),
            created: Utc::now(),
        }
    }
}

/// An in-memory presentation built from the stock slide master.
#[derive(Debug, Clone, Default)]
pub struct Presentation {
    slides: Vec<Slide>,
    core_properties: CoreProperties,
}

impl Presentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layouts available to [`Presentation::add_slide`], in master order.
    pub fn slide_layouts(&self) -> &'static [SlideLayout] {
        &SlideLayout::ALL
    }

    /// Append a slide instantiated from `layout` and hand it back for editing.
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut Slide {
        self.slides.push(Slide::from_layout(layout));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn core_properties(&self) -> &CoreProperties {
        &self.core_properties
    }

    pub fn core_properties_mut(&mut self) -> &mut CoreProperties {
        &mut self.core_properties
    }

    /// Serialize the whole package into a fresh buffer.
    pub fn save(&self) -> Result<Vec<u8>, PptxError> {
        let cursor = self.write_to(Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W, PptxError> {
        package::write_package(self, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_presentation_has_no_slides() {
        let prs = Presentation::new();
        assert!(prs.slides().is_empty());
        assert_eq!(
            prs.slide_layouts(),
            &[SlideLayout::Title, SlideLayout::TitleAndContent]
        );
    }

    #[test]
    fn add_slide_appends_in_order() {
        let mut prs = Presentation::new();
        prs.add_slide(SlideLayout::Title)
            .title_mut()
            .unwrap()
            .set_text("first");
        prs.add_slide(SlideLayout::TitleAndContent)
            .title_mut()
            .unwrap()
            .set_text("second");

        let titles: Vec<_> = prs
            .slides()
            .iter()
            .map(|s| s.title().unwrap().text_frame().text())
            .collect();
        assert_eq!(titles, ["first", "second"]);
    }
}
