use crate::schema::FeedbackType;
use config::{Config, ConfigError, Environment, File, Map};
use feedback_store::airtable::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DEMO_TABLE: &str = "Demo Feedback";
pub const DEFAULT_TUITION_TABLE: &str = "Tuition Feedback";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

/// Store settings, read from `AIRTABLE_*` environment variables
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AirtableConfig {
    pub api_key: Option<String>,
    pub base_id: Option<String>,
    /// Single table used for both feedback types when set
    pub feedback_table: Option<String>,
    pub demo_table: String,
    pub tuition_table: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub airtable: AirtableConfig,
}

#[derive(Debug, Deserialize)]
struct ServiceSettings {
    server: ServerConfig,
    logging: LoggingConfig,
}

/// Table names per feedback type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub demo: String,
    pub tuition: String,
}

impl TableNames {
    pub fn for_type(&self, feedback_type: FeedbackType) -> &str {
        match feedback_type {
            FeedbackType::Demo => &self.demo,
            FeedbackType::Tuition => &self.tuition,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AirtableConfig {
    /// Load from the process environment, or from `source` in tests
    pub fn from_env(source: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("demo_table", DEFAULT_DEMO_TABLE)?
            .set_default("tuition_table", DEFAULT_TUITION_TABLE)?
            .set_default("api_url", DEFAULT_API_URL)?
            .add_source(Environment::with_prefix("AIRTABLE").source(source))
            .build()?
            .try_deserialize()
    }

    /// API key and base id, if both are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.api_key)?, non_empty(&self.base_id)?))
    }

    pub fn table_names(&self) -> TableNames {
        match non_empty(&self.feedback_table) {
            Some(table) => TableNames {
                demo: table.to_string(),
                tuition: table.to_string(),
            },
            None => TableNames {
                demo: self.demo_table.clone(),
                tuition: self.tuition_table.clone(),
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None, None)
    }

    /// Server and logging settings come from defaults, an optional
    /// `feedback.toml` in the working directory, then `FEEDBACK_*` variables.
    pub fn load_from(
        service_env: Option<Map<String, String>>,
        airtable_env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings: ServiceSettings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .add_source(File::with_name("feedback").required(false))
            .add_source(
                Environment::with_prefix("FEEDBACK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(service_env),
            )
            .build()?
            .try_deserialize()?;

        Ok(Self {
            server: settings.server,
            logging: settings.logging,
            airtable: AirtableConfig::from_env(airtable_env)?,
        })
    }
}
