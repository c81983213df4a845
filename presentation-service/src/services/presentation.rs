//! Turns a [`PresentationRequest`] into a `.pptx` document.

use crate::dtos::PresentationRequest;
use crate::pptx::{Points, Presentation, PptxError, SlideLayout};
use service_core::error::AppError;

/// Subtitle of the title slide when the request names no author.
pub const DEFAULT_SUBTITLE: &str = "Auto-generated presentation";

pub const BULLET_FONT_SIZE: Points = Points(22);

/// Subtitle (title slide) and body (content slides) share this index.
const BODY_PLACEHOLDER_IDX: u32 = 1;

impl From<PptxError> for AppError {
    fn from(err: PptxError) -> Self {
        AppError::InternalError(anyhow::Error::new(err).context("Failed to assemble presentation"))
    }
}

/// Title slide first, then one title-and-content slide per requested slide.
pub fn build_presentation(request: &PresentationRequest) -> Result<Presentation, PptxError> {
    let mut prs = Presentation::new();
    {
        let core = prs.core_properties_mut();
        core.title = request.topic.clone();
        core.author = request.author.clone();
    }

    let title_slide = prs.add_slide(SlideLayout::Title);
    title_slide.title_mut()?.set_text(&request.topic);
    title_slide
        .placeholder_mut(BODY_PLACEHOLDER_IDX)?
        .set_text(request.author.as_deref().unwrap_or(DEFAULT_SUBTITLE));

    for content in &request.slides {
        let slide = prs.add_slide(SlideLayout::TitleAndContent);
        slide.title_mut()?.set_text(&content.title);

        let frame = slide
            .placeholder_mut(BODY_PLACEHOLDER_IDX)?
            .text_frame_mut();
        frame.clear();

        for (i, bullet) in content.bullets.iter().enumerate() {
            let paragraph = if i == 0 {
                frame.first_paragraph_mut()
            } else {
                frame.add_paragraph()
            };
            paragraph.set_text(bullet.as_str());
            paragraph.set_level(0)?;
            paragraph.set_font_size(BULLET_FONT_SIZE);
        }
    }

    Ok(prs)
}

pub fn render_presentation(request: &PresentationRequest) -> Result<Vec<u8>, PptxError> {
    build_presentation(request)?.save()
}

/// `My Talk` -> `My_Talk.pptx`
pub fn attachment_filename(topic: &str) -> String {
    format!("{}.pptx", topic.replace(' ', "_"))
}

pub fn content_disposition(topic: &str) -> String {
    format!("attachment; filename=\"{}\"", attachment_filename(topic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::SlideContent;
    use crate::pptx::PlaceholderKind;

    fn request(slides: Vec<SlideContent>, author: Option<&str>) -> PresentationRequest {
        PresentationRequest {
            topic: "My Talk".to_string(),
            slides,
            author: author.map(str::to_string),
        }
    }

    fn slide(title: &str, bullets: &[&str]) -> SlideContent {
        SlideContent {
            title: title.to_string(),
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
        }
    }

    #[test]
    fn filename_replaces_spaces() {
        assert_eq!(attachment_filename("My Talk"), "My_Talk.pptx");
        assert_eq!(attachment_filename("Single"), "Single.pptx");
        assert_eq!(attachment_filename(" a  b "), "_a__b_.pptx");
        assert_eq!(
            content_disposition("My Talk"),
            r#"attachment; filename="My_Talk.pptx""#
        );
    }

    #[test]
    fn title_slide_uses_topic_and_author() {
        let prs = build_presentation(&request(vec![], Some("Jo"))).unwrap();

        let title_slide = &prs.slides()[0];
        assert_eq!(title_slide.layout(), SlideLayout::Title);
        assert_eq!(title_slide.title().unwrap().text_frame().text(), "My Talk");
        let subtitle = title_slide.placeholder(1).unwrap();
        assert_eq!(subtitle.kind(), PlaceholderKind::Subtitle);
        assert_eq!(subtitle.text_frame().text(), "Jo");
        assert_eq!(prs.core_properties().author.as_deref(), Some("Jo"));
    }

    #[test]
    fn missing_author_uses_default_subtitle() {
        let prs = build_presentation(&request(vec![], None)).unwrap();

        let subtitle = prs.slides()[0].placeholder(1).unwrap();
        assert_eq!(subtitle.text_frame().text(), DEFAULT_SUBTITLE);
    }

    #[test]
    fn bullets_become_level_zero_paragraphs_in_order() {
        let prs = build_presentation(&request(
            vec![slide("Intro", &["A", "B", "C"]), slide("Next", &["D"])],
            None,
        ))
        .unwrap();

        assert_eq!(prs.slides().len(), 3);

        let intro = &prs.slides()[1];
        assert_eq!(intro.layout(), SlideLayout::TitleAndContent);
        assert_eq!(intro.title().unwrap().text_frame().text(), "Intro");

        let paragraphs = intro.placeholder(1).unwrap().text_frame().paragraphs();
        let texts: Vec<_> = paragraphs.iter().map(|p| p.text()).collect();
        assert_eq!(texts, ["A", "B", "C"]);
        assert!(paragraphs
            .iter()
            .all(|p| p.level() == 0 && p.font_size() == Some(BULLET_FONT_SIZE)));
    }

    #[test]
    fn slide_without_bullets_keeps_one_empty_paragraph() {
        let prs = build_presentation(&request(vec![slide("Empty", &[])], None)).unwrap();

        let paragraphs = prs.slides()[1].placeholder(1).unwrap().text_frame().paragraphs();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text(), "");
    }

    #[test]
    fn rendered_document_is_a_zip() {
        let bytes = render_presentation(&request(vec![slide("Intro", &["A"])], None)).unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
