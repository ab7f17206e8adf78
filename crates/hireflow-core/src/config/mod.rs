use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use chrono_tz::Tz;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, FileFormat};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::types::RecordKind;


const ENV_PREFIX: &str = "HIREFLOW";
const CONFIG_FILE: &str = "hireflow.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub display: DisplayConfig,
    pub fields: FieldsConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// IANA zone used for wall-clock timestamps and range truncation.
    pub timezone: String,
    /// `strftime` pattern for the display timestamp column.
    pub format: String,
}

impl DisplayConfig {
    /// ## Summary
    /// Resolves the configured IANA time zone.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the zone name is unknown.
    pub fn tz(&self) -> CoreResult<Tz> {
        Tz::from_str(self.timezone.trim())
            .map_err(|e| CoreError::ConfigError(format!("display.timezone: {e}")))
    }
}

/// Names of the timestamp fields the date range filter looks at.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldsConfig {
    pub created_at: String,
    pub updated_at: String,
}

/// Optional per-kind overrides of the searchable field allow-lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    pub candidate: Option<Vec<String>>,
    pub lineup: Option<Vec<String>>,
    pub walkin: Option<Vec<String>>,
    pub joining: Option<Vec<String>>,
}

impl SearchConfig {
    #[must_use]
    pub fn fields_for(&self, kind: RecordKind) -> Option<&[String]> {
        match kind {
            RecordKind::Candidate => self.candidate.as_deref(),
            RecordKind::Lineup => self.lineup.as_deref(),
            RecordKind::WalkIn => self.walkin.as_deref(),
            RecordKind::Joining => self.joining.as_deref(),
        }
    }
}

impl Settings {
    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("display.timezone", "UTC")?
            .set_default("display.format", "%d/%m/%Y %I:%M %p")?
            .set_default("fields.created_at", "createdAt")?
            .set_default("fields.updated_at", "updatedAt")?)
    }

    fn environment() -> config::Environment {
        let mut env = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .ignore_empty(true)
            .try_parsing(true)
            .list_separator(",");
        for kind in RecordKind::ALL {
            env = env.with_list_parse_key(&format!("search.{kind}"));
        }
        env
    }

    /// ## Summary
    /// Loads settings from defaults, then `hireflow.toml` (or `path` when
    /// given), then `HIREFLOW_*` environment variables.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the
    /// configuration fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE).required(false),
        };

        let settings = Self::builder()?
            .add_source(file)
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<Settings>()?;
        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Builds settings from defaults overlaid with an inline TOML document.
    ///
    /// ## Errors
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;
        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks values the deserializer cannot check on its own.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` for an unknown time zone, an empty
    /// timestamp field name, or an empty allow-list override.
    pub fn validate(&self) -> CoreResult<()> {
        self.display.tz()?;

        if self.fields.created_at.trim().is_empty() || self.fields.updated_at.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "fields.created_at and fields.updated_at must not be empty".to_string(),
            ));
        }

        for kind in RecordKind::ALL {
            if let Some(fields) = self.search.fields_for(kind)
                && fields.iter().all(|f| f.trim().is_empty())
            {
                return Err(CoreError::ConfigError(format!(
                    "search.{kind} must list at least one field"
                )));
            }
        }

        Ok(())
    }
}

/// ## Summary
/// Loads `.env` into the process environment, then the settings.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(path: Option<&Path>) -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load(path)?;
    tracing::debug!(
        timezone = %settings.display.timezone,
        level = %settings.logging.level,
        "Settings loaded"
    );
    Ok(settings)
}
