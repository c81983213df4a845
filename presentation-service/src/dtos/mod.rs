pub mod presentation;
pub mod probe;

pub use presentation::{PresentationRequest, SlideContent, DEFAULT_TOPIC};
pub use probe::ProbeResponse;
