pub mod database;
pub mod metrics;
pub mod presentation;

pub use database::{
    DatabaseCollaborator, DatabaseHandle, DatabaseProbe, DatabaseStatus, MongoDb,
};
pub use metrics::{get_metrics, init_metrics, record_presentation};
pub use presentation::{
    attachment_filename, build_presentation, content_disposition, render_presentation,
};
