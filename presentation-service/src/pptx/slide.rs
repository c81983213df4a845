use super::layout::{PlaceholderKind, PlaceholderSpec, SlideLayout};
use super::parts::{GROUP_SHAPE_PROPS, PML_NAMESPACES, XML_HEADER};
use super::text::TextFrame;
use super::PptxError;
use std::fmt::Write as _;

/// A placeholder shape on a slide. Geometry is inherited from the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    spec: PlaceholderSpec,
    shape_id: u32,
    text_frame: TextFrame,
}

impl Placeholder {
    pub fn kind(&self) -> PlaceholderKind {
        self.spec.kind
    }

    pub fn idx(&self) -> u32 {
        self.spec.idx
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.spec.name, self.shape_id - 1)
    }

    pub fn text_frame(&self) -> &TextFrame {
        &self.text_frame
    }

    pub fn text_frame_mut(&mut self) -> &mut TextFrame {
        &mut self.text_frame
    }

    pub fn set_text(&mut self, text: &str) {
        self.text_frame.set_text(text);
    }

    fn write_xml(&self, out: &mut String) {
        let _ = write!(
            out,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr/>"#,
            self.shape_id,
            self.name(),
            self.spec.kind.ph_element(self.spec.idx),
        );
        self.text_frame.write_xml(out);
        out.push_str("</p:sp>");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    layout: SlideLayout,
    placeholders: Vec<Placeholder>,
}

impl Slide {
    /// Instantiate every placeholder the layout declares, each with an empty
    /// text frame. Shape id 1 is reserved for the slide's shape tree.
    pub(crate) fn from_layout(layout: SlideLayout) -> Self {
        let placeholders = layout
            .placeholders()
            .iter()
            .zip(2u32..)
            .map(|(spec, shape_id)| Placeholder {
                spec: *spec,
                shape_id,
                text_frame: TextFrame::default(),
            })
            .collect();

        Self {
            layout,
            placeholders,
        }
    }

    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn title(&self) -> Option<&Placeholder> {
        self.placeholders.iter().find(|p| p.kind().is_title())
    }

    pub fn title_mut(&mut self) -> Result<&mut Placeholder, PptxError> {
        let layout = self.layout;
        self.placeholders
            .iter_mut()
            .find(|p| p.kind().is_title())
            .ok_or(PptxError::MissingPlaceholder { layout, idx: 0 })
    }

    pub fn placeholder(&self, idx: u32) -> Option<&Placeholder> {
        self.placeholders.iter().find(|p| p.idx() == idx)
    }

    pub fn placeholder_mut(&mut self, idx: u32) -> Result<&mut Placeholder, PptxError> {
        let layout = self.layout;
        self.placeholders
            .iter_mut()
            .find(|p| p.idx() == idx)
            .ok_or(PptxError::MissingPlaceholder { layout, idx })
    }

    pub(crate) fn to_xml(&self) -> String {
        let mut shapes = String::new();
        for placeholder in &self.placeholders {
            placeholder.write_xml(&mut shapes);
        }

        format!(
            r#"{XML_HEADER}<p:sld {PML_NAMESPACES}><p:cSld><p:spTree>{GROUP_SHAPE_PROPS}{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_slide_has_title_and_body() {
        let slide = Slide::from_layout(SlideLayout::TitleAndContent);

        assert!(slide.title().is_some());
        assert_eq!(
            slide.placeholder(1).map(Placeholder::kind),
            Some(PlaceholderKind::Body)
        );
    }

    #[test]
    fn missing_placeholder_is_an_error() {
        let mut slide = Slide::from_layout(SlideLayout::Title);

        let err = slide.placeholder_mut(7).unwrap_err();
        assert!(matches!(
            err,
            PptxError::MissingPlaceholder {
                layout: SlideLayout::Title,
                idx: 7
            }
        ));
    }

    #[test]
    fn shape_ids_start_after_the_shape_tree() {
        let slide = Slide::from_layout(SlideLayout::Title);
        let names: Vec<_> = slide.placeholders().iter().map(Placeholder::name).collect();

        assert_eq!(names, ["Title 1", "Subtitle 2"]);
    }

    #[test]
    fn slide_xml_contains_placeholder_text() {
        let mut slide = Slide::from_layout(SlideLayout::Title);
        slide.title_mut().unwrap().set_text("Rust & XML");

        let xml = slide.to_xml();
        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains("<a:t>Rust &amp; XML</a:t>"));
    }
}
