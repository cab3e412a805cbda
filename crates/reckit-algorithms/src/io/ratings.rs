//! CSV/TSV reader and writer for rating tables, pair lists and predictions.
use std::path::Path;

use anyhow::{anyhow, ensure, Context, Result};
use csv::StringRecord;

use crate::config::TableConfig;
use crate::data::{ItemId, Predictions, Rating, RatingTable, UserId};

/// Read a rating table laid out as described by `config`.
pub fn read_ratings<P: AsRef<Path>>(path: P, config: &TableConfig) -> Result<RatingTable> {
    let mut reader = open_reader(path.as_ref(), config)?;
    let headers = reader
        .headers()
        .context("Failed to read header row")?
        .clone();

    let user_idx = require_column(&headers, &config.user_column)?;
    let item_idx = require_column(&headers, &config.item_column)?;
    let rating_idx = config
        .rating_column
        .as_deref()
        .and_then(|name| find_column(&headers, name));
    let timestamp_idx = config
        .timestamp_column
        .as_deref()
        .and_then(|name| find_column(&headers, name));

    if rating_idx.is_none() {
        log::debug!(
            "{}: no rating column, reading implicit feedback",
            path.as_ref().display()
        );
    }

    let mut table = RatingTable::default();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        let user = parse_field::<UserId>(&record, user_idx, row_idx, &config.user_column)?;
        let item = parse_field::<ItemId>(&record, item_idx, row_idx, &config.item_column)?;
        let rating = match rating_idx {
            Some(idx) => parse_optional::<f64>(&record, idx, row_idx)?,
            None => None,
        };
        let timestamp = match timestamp_idx {
            Some(idx) => parse_optional::<i64>(&record, idx, row_idx)?,
            None => None,
        };
        table.push(Rating {
            user,
            item,
            rating,
            timestamp,
        });
    }

    log::debug!(
        "read {} ratings from {}",
        table.len(),
        path.as_ref().display()
    );
    Ok(table)
}

/// Read `(user, item)` pairs, ignoring every other column.
pub fn read_pairs<P: AsRef<Path>>(path: P, config: &TableConfig) -> Result<Vec<(UserId, ItemId)>> {
    let pair_config = TableConfig {
        rating_column: None,
        timestamp_column: None,
        ..config.clone()
    };
    Ok(read_ratings(path, &pair_config)?.pairs())
}

/// Write `user`, `item` and prediction columns, one row per pair.
///
/// Unscored rows get an empty prediction cell.
pub fn write_predictions<P: AsRef<Path>>(
    path: P,
    pairs: &[(UserId, ItemId)],
    predictions: &Predictions,
    config: &TableConfig,
) -> Result<()> {
    ensure!(
        pairs.len() == predictions.len(),
        "Pairs and predictions must have equal length ({} vs {})",
        pairs.len(),
        predictions.len()
    );

    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .from_path(&path)
        .with_context(|| format!("Failed to create output file: {}", path.as_ref().display()))?;

    writer.write_record([
        config.user_column.as_str(),
        config.item_column.as_str(),
        predictions.name.as_str(),
    ])?;
    for (&(user, item), score) in pairs.iter().zip(predictions.iter()) {
        let score = score.map(|s| s.to_string()).unwrap_or_default();
        writer.write_record([user.to_string(), item.to_string(), score])?;
    }
    writer.flush()?;
    Ok(())
}

fn open_reader(path: &Path, config: &TableConfig) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open table: {}", path.display()))
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn require_column(headers: &StringRecord, name: &str) -> Result<usize> {
    find_column(headers, name).ok_or_else(|| anyhow!("Missing column '{}'", name))
}

fn parse_field<T>(record: &StringRecord, idx: usize, row_idx: usize, column: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    record
        .get(idx)
        .ok_or_else(|| anyhow!("Missing {} value at row {}", column, row_idx + 1))?
        .parse::<T>()
        .with_context(|| format!("Invalid {} at row {}", column, row_idx + 1))
}

fn parse_optional<T>(record: &StringRecord, idx: usize, row_idx: usize) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match record.get(idx) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Invalid value '{}' at row {}", value, row_idx + 1)),
    }
}
