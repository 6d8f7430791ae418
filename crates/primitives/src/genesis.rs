//! Genesis roster input used to bootstrap epoch 0.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::epoch::EpochInfo;
use crate::errors::{GenesisError, ValSetError};
use crate::valset::{RawValidator, ValidatorSet};

/// The externally supplied, unordered validator roster the monitor starts
/// from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenesisInfo {
    validators: Vec<RawValidator>,
}

impl GenesisInfo {
    pub fn new(validators: Vec<RawValidator>) -> Self {
        Self { validators }
    }

    /// Loads genesis data from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, GenesisError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn validators(&self) -> &[RawValidator] {
        &self.validators
    }

    /// Builds the epoch-0 verification context by canonicalizing the
    /// roster. Fails on malformed addresses, which aborts startup.
    pub fn into_epoch_info(self) -> Result<EpochInfo, ValSetError> {
        let valset = ValidatorSet::canonicalize(self.validators)?;
        Ok(EpochInfo::new(0, valset))
    }
}
