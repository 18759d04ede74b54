use crate::model::ConfigError;
use crate::normalizer::FieldSynonyms;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory scanned for `*price*.csv` files.
    pub price_dir: PathBuf,
    /// Destination of the HTML export.
    pub output_file: PathBuf,
    pub exit_keyword: String,
    pub synonyms: FieldSynonyms,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            price_dir: PathBuf::from("."),
            output_file: PathBuf::from("output.html"),
            exit_keyword: "exit".to_string(),
            synonyms: FieldSynonyms::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
