//! The slide layouts shipped with every generated presentation.
//!
//! Geometry follows the stock 4:3 Office template so the output looks like a
//! presentation created from PowerPoint's blank default.

use quick_xml::escape::escape;
use std::fmt::Write as _;

/// Placeholder role as understood by PowerPoint (`<p:ph type=...>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    CenteredTitle,
    Title,
    Subtitle,
    Body,
}

impl PlaceholderKind {
    pub fn is_title(self) -> bool {
        matches!(self, PlaceholderKind::CenteredTitle | PlaceholderKind::Title)
    }

    /// The `<p:ph/>` element identifying this placeholder on slides and layouts.
    pub(crate) fn ph_element(self, idx: u32) -> String {
        match self {
            PlaceholderKind::CenteredTitle => r#"<p:ph type="ctrTitle"/>"#.to_string(),
            PlaceholderKind::Title => r#"<p:ph type="title"/>"#.to_string(),
            PlaceholderKind::Subtitle => format!(r#"<p:ph type="subTitle" idx="{idx}"/>"#),
            // An untyped placeholder is an "object" placeholder accepting body text.
            PlaceholderKind::Body => format!(r#"<p:ph idx="{idx}"/>"#),
        }
    }
}

/// A placeholder region declared by a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderSpec {
    pub kind: PlaceholderKind,
    /// Title placeholders use index 0.
    pub idx: u32,
    pub name: &'static str,
    /// Offset and extent in EMU.
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
    pub prompt: &'static str,
}

const CENTERED_TITLE: PlaceholderSpec = PlaceholderSpec {
    kind: PlaceholderKind::CenteredTitle,
    idx: 0,
    name: "Title",
    x: 685_800,
    y: 2_130_425,
    cx: 7_772_400,
    cy: 1_470_025,
    prompt: "Click to edit Master title style",
};

const SUBTITLE: PlaceholderSpec = PlaceholderSpec {
    kind: PlaceholderKind::Subtitle,
    idx: 1,
    name: "Subtitle",
    x: 1_371_600,
    y: 3_886_200,
    cx: 6_400_800,
    cy: 1_752_600,
    prompt: "Click to edit Master subtitle style",
};

pub(crate) const TITLE: PlaceholderSpec = PlaceholderSpec {
    kind: PlaceholderKind::Title,
    idx: 0,
    name: "Title",
    x: 457_200,
    y: 274_638,
    cx: 8_229_600,
    cy: 1_143_000,
    prompt: "Click to edit Master title style",
};

pub(crate) const BODY: PlaceholderSpec = PlaceholderSpec {
    kind: PlaceholderKind::Body,
    idx: 1,
    name: "Content Placeholder",
    x: 457_200,
    y: 1_600_200,
    cx: 8_229_600,
    cy: 4_525_963,
    prompt: "Click to edit Master text styles",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideLayout {
    /// Centered title with a subtitle underneath.
    Title,
    /// Title bar above a bulleted body.
    TitleAndContent,
}

impl SlideLayout {
    /// Layouts in the order the slide master lists them.
    pub const ALL: [SlideLayout; 2] = [SlideLayout::Title, SlideLayout::TitleAndContent];

    pub fn name(self) -> &'static str {
        match self {
            SlideLayout::Title => "Title Slide",
            SlideLayout::TitleAndContent => "Title and Content",
        }
    }

    /// One-based position, used for the layout part name.
    pub fn number(self) -> usize {
        match self {
            SlideLayout::Title => 1,
            SlideLayout::TitleAndContent => 2,
        }
    }

    pub fn placeholders(self) -> &'static [PlaceholderSpec] {
        match self {
            SlideLayout::Title => &[CENTERED_TITLE, SUBTITLE],
            SlideLayout::TitleAndContent => &[TITLE, BODY],
        }
    }

    pub(crate) fn part_name(self) -> String {
        format!("ppt/slideLayouts/slideLayout{}.xml", self.number())
    }

    fn layout_type(self) -> &'static str {
        match self {
            SlideLayout::Title => "title",
            SlideLayout::TitleAndContent => "obj",
        }
    }

    pub(crate) fn to_xml(self) -> String {
        let mut shapes = String::new();
        for (i, spec) in self.placeholders().iter().enumerate() {
            write_placeholder_prototype(&mut shapes, spec, i as u32 + 2);
        }

        format!(
            r#"{header}<p:sldLayout {ns} type="{ty}" preserve="1"><p:cSld name="{name}"><p:spTree>{group}{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
            header = super::parts::XML_HEADER,
            ns = super::parts::PML_NAMESPACES,
            ty = self.layout_type(),
            name = escape(self.name()),
            group = super::parts::GROUP_SHAPE_PROPS,
        )
    }
}

/// Writes a placeholder with explicit geometry and prompt text, as used on
/// the slide master and on layouts.
pub(crate) fn write_placeholder_prototype(
    out: &mut String,
    spec: &PlaceholderSpec,
    id: u32,
) {
    let list_style = match spec.kind {
        PlaceholderKind::Subtitle => concat!(
            r#"<a:lstStyle><a:lvl1pPr marL="0" indent="0" algn="ctr"><a:buNone/>"#,
            r#"<a:defRPr><a:solidFill><a:schemeClr val="tx1"><a:tint val="75000"/></a:schemeClr></a:solidFill></a:defRPr>"#,
            "</a:lvl1pPr></a:lstStyle>"
        ),
        _ => "<a:lstStyle/>",
    };

    let _ = write!(
        out,
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name} {n}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{ph}</p:nvPr></p:nvSpPr>"#,
            r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm></p:spPr>"#,
            r#"<p:txBody><a:bodyPr/>{list_style}<a:p><a:r><a:rPr lang="en-US"/><a:t>{prompt}</a:t></a:r><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#,
        ),
        id = id,
        name = spec.name,
        n = id - 1,
        ph = spec.kind.ph_element(spec.idx),
        x = spec.x,
        y = spec.y,
        cx = spec.cx,
        cy = spec.cy,
        list_style = list_style,
        prompt = spec.prompt,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_layout_declares_title_and_subtitle() {
        let kinds: Vec<_> = SlideLayout::Title
            .placeholders()
            .iter()
            .map(|p| (p.kind, p.idx))
            .collect();

        assert_eq!(
            kinds,
            [
                (PlaceholderKind::CenteredTitle, 0),
                (PlaceholderKind::Subtitle, 1)
            ]
        );
    }

    #[test]
    fn content_layout_body_is_placeholder_one() {
        let body = SlideLayout::TitleAndContent
            .placeholders()
            .iter()
            .find(|p| p.kind == PlaceholderKind::Body)
            .unwrap();

        assert_eq!(body.idx, 1);
    }

    #[test]
    fn layout_part_names_follow_master_order() {
        let names: Vec<_> = SlideLayout::ALL.iter().map(|l| l.part_name()).collect();
        assert_eq!(
            names,
            [
                "ppt/slideLayouts/slideLayout1.xml",
                "ppt/slideLayouts/slideLayout2.xml"
            ]
        );
    }

    #[test]
    fn layout_xml_names_the_layout() {
        let xml = SlideLayout::TitleAndContent.to_xml();
        assert!(xml.contains(r#"<p:cSld name="Title and Content">"#));
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
    }
}
