pub mod health;
pub mod metrics;
pub mod presentation;
pub mod probe;
pub mod root;

pub use health::health_check;
pub use metrics::metrics_endpoint;
pub use presentation::generate_pptx;
pub use probe::test_database;
pub use root::{hello, read_root};
