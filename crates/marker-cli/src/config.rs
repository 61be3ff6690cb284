//! Configuration loading and validation.
//!
//! The config file is JSON, or YAML when the extension is `.yaml`/`.yml`.
//! Every document is checked for the required keys and then validated
//! against `schema/config.schema.json` before it is deserialized.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

use marker_core::VoteCounting;

/// Embedded config schema (loaded at compile time).
const CONFIG_SCHEMA_JSON: &str = include_str!("../schema/config.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Keys every config must define, in reporting order.
pub const REQUIRED_KEYS: [&str; 5] = [
    "base_url",
    "api_key",
    "model",
    "question_answers_output",
    "evaluation_output",
];

/// Errors that can occur when loading the config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing key in config: {0}")]
    MissingField(String),

    #[error("Config validation failed: {0}")]
    ValidationError(String),

    #[error("Failed to load schema: {0}")]
    SchemaError(String),
}

/// Settings for a grading run.
#[derive(Clone, Deserialize)]
pub struct MarkerConfig {
    /// Root URL of the chat completion API
    pub base_url: String,

    /// Model identifier sent with every judge request
    pub model: String,

    /// Path of the full result log
    pub question_answers_output: PathBuf,

    /// Path of the index + evaluation summary log
    pub evaluation_output: PathBuf,

    /// Registered provider type
    #[serde(default = "default_provider")]
    pub provider: String,

    /// How judge votes are counted
    #[serde(default)]
    pub vote_counting: VoteCounting,

    /// The validated document, handed to the provider factory. Holds the
    /// API key, so it stays out of Debug output.
    #[serde(skip)]
    document: JsonValue,
}

fn default_provider() -> String {
    "openai".to_string()
}

impl fmt::Debug for MarkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("question_answers_output", &self.question_answers_output)
            .field("evaluation_output", &self.evaluation_output)
            .field("provider", &self.provider)
            .field("vote_counting", &self.vote_counting)
            .finish()
    }
}

impl MarkerConfig {
    /// Load a config file, choosing the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            _ => Self::from_json(&contents),
        }
    }

    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let document: JsonValue = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Parse a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let document: JsonValue = serde_yaml::from_str(yaml)?;
        Self::from_document(document)
    }

    /// Validate and deserialize a parsed document.
    pub fn from_document(document: JsonValue) -> Result<Self, ConfigError> {
        if !document.is_object() {
            return Err(ConfigError::ValidationError(
                "config must be a mapping of keys to values".to_string(),
            ));
        }

        for key in REQUIRED_KEYS {
            if document.get(key).map_or(true, JsonValue::is_null) {
                return Err(ConfigError::MissingField(key.to_string()));
            }
        }

        validate_config_schema(&document).map_err(|errors| {
            ConfigError::ValidationError(errors.join("; "))
        })?;

        let mut config: MarkerConfig = serde_json::from_value(document.clone())?;
        config.document = document;
        Ok(config)
    }

    /// The raw validated document.
    pub fn document(&self) -> &JsonValue {
        &self.document
    }
}

/// Get or initialize the compiled schema validator.
fn get_validator() -> Result<&'static jsonschema::Validator, ConfigError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: JsonValue = match serde_json::from_str(CONFIG_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        jsonschema::options()
            .build(&schema_value)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    result
        .as_ref()
        .map_err(|e| ConfigError::SchemaError(e.clone()))
}

/// Validate a config document against the schema.
///
/// Returns the list of validation error messages on failure.
pub fn validate_config_schema(document: &JsonValue) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
