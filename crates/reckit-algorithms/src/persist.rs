//! Saving and restoring fitted algorithm state.
//!
//! Algorithms persist an explicit `AlgorithmState`: the algorithm's name plus
//! the fields it declares as its fitted and parameter state, encoded with
//! `bincode`. The encoding keeps every `f64` bit-for-bit, NaN and infinities
//! included. It is not self-describing, so state types must not rely on
//! `#[serde(untagged)]` or other `deserialize_any` formats.
//! Restoring checks the name before any field is replaced.
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AlgorithmError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmState {
    pub algorithm: String,
    pub state: Vec<u8>,
}

impl AlgorithmState {
    /// Snapshot a serializable value as the state of `algorithm`.
    pub fn capture<T: Serialize + ?Sized>(algorithm: &str, value: &T) -> Result<Self> {
        Ok(AlgorithmState {
            algorithm: algorithm.to_string(),
            state: bincode::serialize(value)?,
        })
    }

    /// Fail unless this state was captured from an algorithm named `expected`.
    pub fn ensure_algorithm(&self, expected: &str) -> Result<()> {
        if self.algorithm != expected {
            return Err(AlgorithmError::StateMismatch {
                expected: expected.to_string(),
                found: self.algorithm.clone(),
            });
        }
        Ok(())
    }

    /// Decode the state into `T` after checking it belongs to `expected`.
    pub fn decode<T: DeserializeOwned>(self, expected: &str) -> Result<T> {
        self.ensure_algorithm(expected)?;
        bincode::deserialize(&self.state)
            .map_err(|e| AlgorithmError::Serialization(format!("{} state: {}", expected, e)))
    }
}

/// Write `state` to `path`, replacing any existing file.
pub fn save_state(state: &AlgorithmState, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, state)?;
    writer.flush()?;
    log::debug!("saved {} state to {}", state.algorithm, path.display());
    Ok(())
}

/// Read a state previously written by `save_state`.
pub fn load_state(path: &Path) -> Result<AlgorithmState> {
    let file = File::open(path)?;
    let state: AlgorithmState = bincode::deserialize_from(BufReader::new(file))?;
    log::debug!("loaded {} state from {}", state.algorithm, path.display());
    Ok(state)
}
