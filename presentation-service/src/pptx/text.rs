//! Text frames and paragraphs inside slide shapes.

use super::PptxError;
use quick_xml::escape::escape;
use std::fmt::Write as _;

/// Deepest outline level DrawingML accepts on a paragraph.
pub const MAX_LEVEL: u8 = 8;

/// A font size in typographic points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Points(pub u16);

impl Points {
    /// DrawingML stores sizes in hundredths of a point.
    pub fn centipoints(self) -> u32 {
        u32::from(self.0) * 100
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    text: String,
    level: u8,
    font_size: Option<Points>,
}

impl Paragraph {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn set_level(&mut self, level: u8) -> Result<(), PptxError> {
        if level > MAX_LEVEL {
            return Err(PptxError::InvalidLevel(level));
        }
        self.level = level;
        Ok(())
    }

    pub fn font_size(&self) -> Option<Points> {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: Points) {
        self.font_size = Some(size);
    }

    /// Line breaks inside the text (`\n`, `\r\n` or a lone `\r`) become soft
    /// line breaks (`<a:br/>`), the way PowerPoint stores Shift+Enter.
    pub(crate) fn write_xml(&self, out: &mut String) {
        let size_attr = self
            .font_size
            .map(|size| format!(r#" sz="{}""#, size.centipoints()))
            .unwrap_or_default();
        let run_props = format!(r#"lang="en-US"{size_attr} dirty="0""#);

        out.push_str("<a:p>");
        if self.font_size.is_some() {
            let _ = write!(
                out,
                r#"<a:pPr lvl="{}"><a:defRPr{size_attr}/></a:pPr>"#,
                self.level
            );
        } else if self.level > 0 {
            let _ = write!(out, r#"<a:pPr lvl="{}"/>"#, self.level);
        }

        if !self.text.is_empty() {
            for (i, line) in lines(&self.text).enumerate() {
                if i > 0 {
                    let _ = write!(out, "<a:br><a:rPr {run_props}/></a:br>");
                }
                if !line.is_empty() {
                    let _ = write!(
                        out,
                        "<a:r><a:rPr {run_props}/><a:t>{}</a:t></a:r>",
                        escape(line)
                    );
                }
            }
        }

        let _ = write!(out, "<a:endParaRPr {run_props}/></a:p>");
    }
}

/// Split on every line terminator an XML reader would normalize to `\n`.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(['\r', '\n']))
}

/// The text body of a shape. Always holds at least one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            paragraphs: vec![Paragraph::default()],
        }
    }
}

impl TextFrame {
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Drop every paragraph but the first and empty that one.
    pub fn clear(&mut self) {
        self.paragraphs.truncate(1);
        self.paragraphs[0] = Paragraph::default();
    }

    pub fn first_paragraph_mut(&mut self) -> &mut Paragraph {
        &mut self.paragraphs[0]
    }

    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::default());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// Replace the whole frame content; each line becomes its own paragraph.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        let mut rest = lines(text);
        if let Some(first) = rest.next() {
            self.first_paragraph_mut().set_text(first);
        }
        for line in rest {
            self.add_paragraph().set_text(line);
        }
    }

    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn write_xml(&self, out: &mut String) {
        out.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
        for paragraph in &self.paragraphs {
            paragraph.write_xml(out);
        }
        out.push_str("</p:txBody>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_has_one_empty_paragraph() {
        let frame = TextFrame::default();
        assert_eq!(frame.paragraphs().len(), 1);
        assert_eq!(frame.text(), "");
    }

    #[test]
    fn clear_keeps_a_single_empty_paragraph() {
        let mut frame = TextFrame::default();
        frame.first_paragraph_mut().set_text("one");
        frame.add_paragraph().set_text("two");

        frame.clear();

        assert_eq!(frame.paragraphs().len(), 1);
        assert_eq!(frame.paragraphs()[0], Paragraph::default());
    }

    #[test]
    fn set_text_splits_lines_into_paragraphs() {
        let mut frame = TextFrame::default();
        frame.set_text("first\nsecond");

        let texts: Vec<_> = frame.paragraphs().iter().map(Paragraph::text).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn carriage_returns_become_line_breaks() {
        let mut paragraph = Paragraph::default();
        paragraph.set_text("a\r\nb\rc\nd");

        let mut xml = String::new();
        paragraph.write_xml(&mut xml);

        assert!(!xml.contains('\r'));
        assert_eq!(xml.matches("<a:br>").count(), 3);
        for text in ["<a:t>a</a:t>", "<a:t>b</a:t>", "<a:t>c</a:t>", "<a:t>d</a:t>"] {
            assert!(xml.contains(text), "missing {text} in {xml}");
        }
    }

    #[test]
    fn set_text_treats_crlf_as_one_break() {
        let mut frame = TextFrame::default();
        frame.set_text("first\r\nsecond");

        let texts: Vec<_> = frame.paragraphs().iter().map(Paragraph::text).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn level_above_max_is_rejected() {
        let mut paragraph = Paragraph::default();
        assert!(matches!(
            paragraph.set_level(9),
            Err(PptxError::InvalidLevel(9))
        ));
        assert!(paragraph.set_level(MAX_LEVEL).is_ok());
    }

    #[test]
    fn paragraph_xml_carries_level_size_and_escaped_text() {
        let mut paragraph = Paragraph::default();
        paragraph.set_text("Yoga & <breath>");
        paragraph.set_level(0).unwrap();
        paragraph.set_font_size(Points(22));

        let mut xml = String::new();
        paragraph.write_xml(&mut xml);

        assert!(xml.contains(r#"<a:pPr lvl="0"><a:defRPr sz="2200"/></a:pPr>"#));
        assert!(xml.contains(r#"<a:rPr lang="en-US" sz="2200" dirty="0"/>"#));
        assert!(xml.contains("<a:t>Yoga &amp; &lt;breath&gt;</a:t>"));
    }

    #[test]
    fn empty_paragraph_has_no_runs() {
        let mut xml = String::new();
        Paragraph::default().write_xml(&mut xml);

        assert_eq!(xml, r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
    }

    #[test]
    fn line_feeds_become_breaks() {
        let mut paragraph = Paragraph::default();
        paragraph.set_text("a\nb");

        let mut xml = String::new();
        paragraph.write_xml(&mut xml);

        assert_eq!(xml.matches("<a:r>").count(), 2);
        assert_eq!(xml.matches("<a:br>").count(), 1);
    }
}
