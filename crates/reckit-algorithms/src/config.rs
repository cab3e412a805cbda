use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Column layout of a rating or pair table on disk.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub user_column: String,
    pub item_column: String,
    /// Rating or weight column; rows are implicit feedback when absent.
    pub rating_column: Option<String>,
    pub timestamp_column: Option<String>,
    pub delimiter: char,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            user_column: "user".to_string(),
            item_column: "item".to_string(),
            rating_column: Some("rating".to_string()),
            timestamp_column: None,
            delimiter: ',',
        }
    }
}

impl TableConfig {
    /// Default columns, tab separated.
    pub fn tsv() -> Self {
        Self {
            delimiter: '\t',
            ..Self::default()
        }
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii())
            .with_context(|| format!("Delimiter must be a single ASCII character, got {:?}", self.delimiter))
    }
}

/// Load a `TableConfig` from a JSON file. Missing keys take their defaults.
pub fn load_table_config<P: AsRef<Path>>(path: P) -> Result<TableConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: TableConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
