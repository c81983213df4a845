use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

pub const DEFAULT_TOPIC: &str = "Yoga: History & Advantages";

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SlideContent {
    #[validate(custom(function = "xml_text"))]
    pub title: String,
    /// Display order is submission order.
    #[serde(default)]
    #[validate(custom(function = "xml_text_list"))]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PresentationRequest {
    /// Also names the downloaded file, so it must be usable in a header.
    #[serde(default = "default_topic")]
    #[validate(custom(function = "header_text"))]
    pub topic: String,
    #[validate(nested)]
    pub slides: Vec<SlideContent>,
    #[validate(custom(function = "xml_text"))]
    pub author: Option<String>,
}

/// Characters allowed by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn xml_text(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(is_xml_char) {
        Ok(())
    } else {
        Err(invalid(
            "xml_char",
            "contains characters that cannot be stored in a presentation",
        ))
    }
}

fn xml_text_list(values: &[String]) -> Result<(), ValidationError> {
    values.iter().try_for_each(|value| xml_text(value))
}

fn header_text(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(invalid(
            "control_char",
            "must not contain control characters",
        ));
    }
    xml_text(value)
}
