//! XML for the package parts that do not depend on slide content, plus the
//! small pieces every part shares.

use super::layout;
use super::presentation::CoreProperties;
use quick_xml::escape::escape;
use std::fmt::Write as _;

pub(crate) const XML_HEADER: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n";

pub(crate) const PML_NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);

/// Non-visual and visual properties of a slide's root shape tree.
pub(crate) const GROUP_SHAPE_PROPS: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

/// 10in x 7.5in, the classic on-screen 4:3 format.
pub(crate) const SLIDE_WIDTH: i64 = 9_144_000;
pub(crate) const SLIDE_HEIGHT: i64 = 6_858_000;

/// Slide ids start at 256; master and layout ids share a space above 2^31.
pub(crate) const FIRST_SLIDE_ID: u32 = 256;
const SLIDE_MASTER_ID: u32 = 2_147_483_648;

pub(crate) fn presentation_xml(master_rel: &str, slide_rels: &[String]) -> String {
    let mut slide_ids = String::new();
    for (rel, id) in slide_rels.iter().zip(FIRST_SLIDE_ID..) {
        let _ = write!(slide_ids, r#"<p:sldId id="{id}" r:id="{rel}"/>"#);
    }

    format!(
        concat!(
            r#"{header}<p:presentation {ns} saveSubsetFonts="1">"#,
            r#"<p:sldMasterIdLst><p:sldMasterId id="{master_id}" r:id="{master_rel}"/></p:sldMasterIdLst>"#,
            r#"<p:sldIdLst>{slide_ids}</p:sldIdLst>"#,
            r#"<p:sldSz cx="{cx}" cy="{cy}" type="screen4x3"/><p:notesSz cx="{cy}" cy="{cx}"/>"#,
            r#"</p:presentation>"#,
        ),
        header = XML_HEADER,
        ns = PML_NAMESPACES,
        master_id = SLIDE_MASTER_ID,
        master_rel = master_rel,
        slide_ids = slide_ids,
        cx = SLIDE_WIDTH,
        cy = SLIDE_HEIGHT,
    )
}

pub(crate) fn slide_master_xml(layout_rels: &[String]) -> String {
    let mut shapes = String::new();
    layout::write_placeholder_prototype(&mut shapes, &layout::TITLE, 2);
    layout::write_placeholder_prototype(&mut shapes, &layout::BODY, 3);

    let mut layout_ids = String::new();
    for (rel, id) in layout_rels.iter().zip(SLIDE_MASTER_ID + 1..) {
        let _ = write!(layout_ids, r#"<p:sldLayoutId id="{id}" r:id="{rel}"/>"#);
    }

    format!(
        concat!(
            r#"{header}<p:sldMaster {ns}><p:cSld>"#,
            r#"<p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#,
            r#"<p:spTree>{group}{shapes}</p:spTree></p:cSld>"#,
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst>{layout_ids}</p:sldLayoutIdLst>"#,
            "{text_styles}</p:sldMaster>",
        ),
        header = XML_HEADER,
        ns = PML_NAMESPACES,
        group = GROUP_SHAPE_PROPS,
        shapes = shapes,
        layout_ids = layout_ids,
        text_styles = MASTER_TEXT_STYLES,
    )
}

const MASTER_TEXT_STYLES: &str = concat!(
    "<p:txStyles>",
    r#"<p:titleStyle><a:lvl1pPr algn="ctr" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/>"#,
    r#"<a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr>"#,
    "</a:lvl1pPr></p:titleStyle>",
    "<p:bodyStyle>",
    r#"<a:lvl1pPr marL="342900" indent="-342900" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#,
    r#"<a:defRPr sz="3200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr>"#,
    r#"<a:lvl2pPr marL="742950" indent="-285750" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8211;"/>"#,
    r#"<a:defRPr sz="2800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl2pPr>"#,
    r#"<a:lvl3pPr marL="1143000" indent="-228600" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#,
    r#"<a:defRPr sz="2400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl3pPr>"#,
    "</p:bodyStyle>",
    r#"<p:otherStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#,
    r#"<a:lvl1pPr marL="0" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr>"#,
    "</p:otherStyle>",
    "</p:txStyles>",
);

pub(crate) fn theme_xml() -> String {
    let fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let fills = fill.repeat(3);
    let lines: String = [9525, 25400, 38100]
        .iter()
        .map(|w| format!(r#"<a:ln w="{w}" cap="flat" cmpd="sng" algn="ctr">{fill}<a:prstDash val="solid"/></a:ln>"#))
        .collect();
    let effects = "<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3);

    format!(
        concat!(
            r#"{header}<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements>"#,
            r#"<a:clrScheme name="Office">"#,
            r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
            r#"<a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2>"#,
            r#"<a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2>"#,
            r#"<a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4>"#,
            r#"<a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6>"#,
            r#"<a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink>"#,
            "</a:clrScheme>",
            r#"<a:fontScheme name="Office">"#,
            r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>",
            r#"<a:fmtScheme name="Office">"#,
            "<a:fillStyleLst>{fills}</a:fillStyleLst>",
            "<a:lnStyleLst>{lines}</a:lnStyleLst>",
            "<a:effectStyleLst>{effects}</a:effectStyleLst>",
            "<a:bgFillStyleLst>{fills}</a:bgFillStyleLst>",
            "</a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>",
        ),
        header = XML_HEADER,
        fills = fills,
        lines = lines,
        effects = effects,
    )
}

pub(crate) fn pres_props_xml() -> String {
    format!("{XML_HEADER}<p:presentationPr {PML_NAMESPACES}/>")
}

pub(crate) fn view_props_xml() -> String {
    format!(
        concat!(
            "{header}<p:viewPr {ns}>",
            r#"<p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr>"#,
            r#"<p:gridSpacing cx="76200" cy="76200"/></p:viewPr>"#,
        ),
        header = XML_HEADER,
        ns = PML_NAMESPACES,
    )
}

pub(crate) fn table_styles_xml() -> String {
    format!(
        r#"{XML_HEADER}<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

pub(crate) fn core_props_xml(core: &CoreProperties) -> String {
    let timestamp = core.created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let creator = core
        .author
        .as_deref()
        .map(|author| format!("<dc:creator>{}</dc:creator>", escape(author)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"{header}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{title}</dc:title>{creator}",
            "<cp:lastModifiedBy>{generator}</cp:lastModifiedBy><cp:revision>1</cp:revision>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{ts}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{ts}</dcterms:modified>"#,
            "</cp:coreProperties>",
        ),
        header = XML_HEADER,
        title = escape(&core.title),
        creator = creator,
        generator = escape(&core.generator),
        ts = timestamp,
    )
}

pub(crate) fn app_props_xml(generator: &str, slide_count: usize) -> String {
    format!(
        concat!(
            r#"{header}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<TotalTime>0</TotalTime><Words>0</Words><Application>{generator}</Application>",
            "<PresentationFormat>On-screen Show (4:3)</PresentationFormat><Paragraphs>0</Paragraphs>",
            "<Slides>{slides}</Slides><Notes>0</Notes><HiddenSlides>0</HiddenSlides><MMClips>0</MMClips>",
            "<ScaleCrop>false</ScaleCrop><LinksUpToDate>false</LinksUpToDate><SharedDoc>false</SharedDoc>",
            "<HyperlinksChanged>false</HyperlinksChanged><AppVersion>16.0000</AppVersion></Properties>",
        ),
        header = XML_HEADER,
        generator = escape(generator),
        slides = slide_count,
    )
}

