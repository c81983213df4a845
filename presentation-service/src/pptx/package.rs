//! Writes a [`Presentation`] as an OPC package (the zip container behind
//! `.pptx`).

use super::layout::SlideLayout;
use super::parts::{self, XML_HEADER};
use super::presentation::Presentation;
use super::PptxError;
use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_VIEW_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP_PROPS: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";
const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";

const RT_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const RT_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const RT_APP_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const RT_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const RT_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const RT_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const RT_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const RT_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
const RT_VIEW_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
const RT_TABLE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";

const SLIDE_MASTER_PART: &str = "ppt/slideMasters/slideMaster1.xml";
const THEME_PART: &str = "ppt/theme/theme1.xml";

/// A part name paired with its serialized XML.
struct Part {
    name: String,
    content_type: &'static str,
    xml: String,
}

impl Part {
    fn new(name: impl Into<String>, content_type: &'static str, xml: String) -> Self {
        Self {
            name: name.into(),
            content_type,
            xml,
        }
    }
}

/// The relationships of one source part, numbered `rId1..` in insertion order.
#[derive(Default)]
struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push((id.clone(), rel_type, target.into()));
        id
    }

    fn to_xml(&self) -> String {
        let mut xml = format!(
            r#"{XML_HEADER}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#
        );
        for (id, rel_type, target) in &self.entries {
            let _ = write!(
                xml,
                r#"<Relationship Id="{id}" Type="{rel_type}" Target="{}"/>"#,
                escape(target)
            );
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn into_part(self, source: &str) -> Part {
        Part::new(rels_part_name(source), CT_RELATIONSHIPS, self.to_xml())
    }
}

/// `ppt/slides/slide1.xml` -> `ppt/slides/_rels/slide1.xml.rels`
fn rels_part_name(source: &str) -> String {
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None if source.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{source}.rels"),
    }
}

fn slide_part_name(number: usize) -> String {
    format!("ppt/slides/slide{number}.xml")
}

/// Lay out every part of the package in writing order.
fn collect_parts(presentation: &Presentation) -> Vec<Part> {
    let core = presentation.core_properties();
    let slides = presentation.slides();
    let mut parts = Vec::new();

    let mut package_rels = Relationships::default();
    package_rels.add(RT_OFFICE_DOCUMENT, "ppt/presentation.xml");
    package_rels.add(RT_CORE_PROPS, "docProps/core.xml");
    package_rels.add(RT_APP_PROPS, "docProps/app.xml");
    parts.push(package_rels.into_part(""));

    parts.push(Part::new(
        "docProps/core.xml",
        CT_CORE_PROPS,
        parts::core_props_xml(core),
    ));
    parts.push(Part::new(
        "docProps/app.xml",
        CT_APP_PROPS,
        parts::app_props_xml(&core.generator, slides.len()),
    ));

    let mut presentation_rels = Relationships::default();
    let master_rel = presentation_rels.add(RT_SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    presentation_rels.add(RT_PRES_PROPS, "presProps.xml");
    presentation_rels.add(RT_VIEW_PROPS, "viewProps.xml");
    presentation_rels.add(RT_THEME, "theme/theme1.xml");
    presentation_rels.add(RT_TABLE_STYLES, "tableStyles.xml");
    let slide_rels: Vec<String> = (1..=slides.len())
        .map(|n| presentation_rels.add(RT_SLIDE, format!("slides/slide{n}.xml")))
        .collect();

    parts.push(Part::new(
        "ppt/presentation.xml",
        CT_PRESENTATION,
        parts::presentation_xml(&master_rel, &slide_rels),
    ));
    parts.push(presentation_rels.into_part("ppt/presentation.xml"));
    parts.push(Part::new(
        "ppt/presProps.xml",
        CT_PRES_PROPS,
        parts::pres_props_xml(),
    ));
    parts.push(Part::new(
        "ppt/viewProps.xml",
        CT_VIEW_PROPS,
        parts::view_props_xml(),
    ));
    parts.push(Part::new(
        "ppt/tableStyles.xml",
        CT_TABLE_STYLES,
        parts::table_styles_xml(),
    ));
    parts.push(Part::new(THEME_PART, CT_THEME, parts::theme_xml()));

    let mut master_rels = Relationships::default();
    let layout_rels: Vec<String> = SlideLayout::ALL
        .iter()
        .map(|layout| {
            master_rels.add(
                RT_SLIDE_LAYOUT,
                format!("../slideLayouts/slideLayout{}.xml", layout.number()),
            )
        })
        .collect();
    master_rels.add(RT_THEME, "../theme/theme1.xml");
    parts.push(Part::new(
        SLIDE_MASTER_PART,
        CT_SLIDE_MASTER,
        parts::slide_master_xml(&layout_rels),
    ));
    parts.push(master_rels.into_part(SLIDE_MASTER_PART));

    for layout in SlideLayout::ALL {
        let name = layout.part_name();
        let mut rels = Relationships::default();
        rels.add(RT_SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
        parts.push(rels.into_part(&name));
        parts.push(Part::new(name, CT_SLIDE_LAYOUT, layout.to_xml()));
    }

    for (i, slide) in slides.iter().enumerate() {
        let name = slide_part_name(i + 1);
        let mut rels = Relationships::default();
        rels.add(
            RT_SLIDE_LAYOUT,
            format!("../slideLayouts/slideLayout{}.xml", slide.layout().number()),
        );
        parts.push(rels.into_part(&name));
        parts.push(Part::new(name, CT_SLIDE, slide.to_xml()));
    }

    parts
}

fn content_types_xml(parts: &[Part]) -> String {
    let mut xml = format!(
        concat!(
            r#"{}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="{}"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        ),
        XML_HEADER, CT_RELATIONSHIPS
    );
    for part in parts.iter().filter(|p| p.content_type != CT_RELATIONSHIPS) {
        let _ = write!(
            xml,
            r#"<Override PartName="/{}" ContentType="{}"/>"#,
            part.name, part.content_type
        );
    }
    xml.push_str("</Types>");
    xml
}

pub(crate) fn write_package<W: Write + Seek>(
    presentation: &Presentation,
    writer: W,
) -> Result<W, PptxError> {
    let parts = collect_parts(presentation);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut zip = ZipWriter::new(writer);

    // Readers expect the content-types stream first.
    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml(&parts).as_bytes())?;

    for part in &parts {
        zip.start_file(part.name.as_str(), options)?;
        zip.write_all(part.xml.as_bytes())?;
    }

    tracing::debug!(
        parts = parts.len() + 1,
        slides = presentation.slides().len(),
        "Presentation package written"
    );

    Ok(zip.finish()?)
}
