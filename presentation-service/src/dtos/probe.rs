use crate::config::DatabaseConfig;
use crate::services::DatabaseProbe;
use serde::{Deserialize, Serialize};

const SET: &str = "✅ Set";
const NOT_SET: &str = "❌ Not Set";

/// Body of `GET /test`. Field values are human-readable status strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl ProbeResponse {
    /// Combine the collaborator probe with presence checks of the database
    /// settings. Setting values are never echoed.
    pub fn new(probe: DatabaseProbe, database: &DatabaseConfig) -> Self {
        let presence = |set: bool| if set { SET } else { NOT_SET }.to_string();

        Self {
            backend: "✅ Running".to_string(),
            database: probe.status.to_string(),
            database_url: presence(database.url_is_set()),
            database_name: presence(database.name_is_set()),
            connection_status: if probe.connected {
                "Connected"
            } else {
                "Not Connected"
            }
            .to_string(),
            collections: probe.collections,
        }
    }
}
