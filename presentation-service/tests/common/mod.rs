#![allow(dead_code)]

use presentation_service::config::PresentationConfig;
use presentation_service::services::DatabaseCollaborator;
use presentation_service::startup::Application;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_database(DatabaseCollaborator::NotFound).await
    }

    pub async fn spawn_with_database(database: DatabaseCollaborator) -> Self {
        let mut config = PresentationConfig::default();
        config.common.port = 0; // Random port for testing

        let app = Application::build_with_database(config, database)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn generate(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/generate_pptx", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// An unpacked `.pptx` document.
pub struct Package {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl Package {
    pub fn open(bytes: Vec<u8>) -> Self {
        let archive = ZipArchive::new(Cursor::new(bytes)).expect("Response is not a zip archive");
        Self { archive }
    }

    pub fn part_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    pub fn part(&mut self, name: &str) -> String {
        let mut file = self
            .archive
            .by_name(name)
            .unwrap_or_else(|_| panic!("Missing part {}", name));
        let mut xml = String::new();
        file.read_to_string(&mut xml).expect("Part is not UTF-8");
        xml
    }

    pub fn slide_count(&self) -> usize {
        self.part_names()
            .iter()
            .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
            .count()
    }

    /// Paragraph texts of every shape on slide `number` (1-based), in
    /// document order.
    pub fn slide_shapes(&mut self, number: usize) -> Vec<Vec<String>> {
        let xml = self.part(&format!("ppt/slides/slide{}.xml", number));
        shape_paragraphs(&xml)
    }
}

/// Groups `a:t` text by `a:p` and `a:p` by `p:sp`.
pub fn shape_paragraphs(xml: &str) -> Vec<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut shapes: Vec<Vec<String>> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event().expect("Malformed slide XML") {
            Event::Start(e) => match e.name().as_ref() {
                b"p:sp" => shapes.push(Vec::new()),
                b"a:p" => {
                    if let Some(shape) = shapes.last_mut() {
                        shape.push(String::new());
                    }
                }
                b"a:t" => in_text = true,
                b"a:br" => {
                    if let Some(paragraph) = shapes.last_mut().and_then(|s| s.last_mut()) {
                        paragraph.push('\n');
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t.unescape().expect("Bad escape in slide text");
                if let Some(paragraph) = shapes.last_mut().and_then(|s| s.last_mut()) {
                    paragraph.push_str(&text);
                }
            }
            Event::End(e) if e.name().as_ref() == b"a:t" => in_text = false,
            Event::Eof => break,
            _ => {}
        }
    }

    shapes
}

/// `(lvl, defRPr sz)` of every `a:pPr` that declares a level, in document
/// order.
pub fn paragraph_properties(xml: &str) -> Vec<(String, String)> {
    let mut reader = Reader::from_str(xml);
    let mut properties = Vec::new();
    let mut level: Option<String> = None;

    loop {
        match reader.read_event().expect("Malformed slide XML") {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"a:pPr" => {
                    level = attribute(&e, b"lvl");
                }
                b"a:defRPr" => {
                    if let Some(lvl) = level.take() {
                        let size = attribute(&e, b"sz").unwrap_or_default();
                        properties.push((lvl, size));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    properties
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .try_get_attribute(key)
        .expect("Malformed attribute")
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// Fails on the first malformed event.
pub fn assert_well_formed(name: &str, xml: &str) {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("{} is not well-formed: {}", name, e),
        }
    }
}
