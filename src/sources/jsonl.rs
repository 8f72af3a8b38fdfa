//! JSONL-file-backed input sources.

use std::collections::HashMap;

use crate::models::{CountryScore, ExtraBet, Standing};
use crate::storage::{InputKind, JsonlReader, StorageConfig};

use super::{points_by_user, CountryPointsSource, ExtraBetSource, SourceError, StandingsSource};

/// Reads all three inputs from JSONL files under the configured data
/// directory. A missing file is an empty input, not an error.
#[derive(Debug, Clone)]
pub struct JsonlSources {
    storage: StorageConfig,
}

impl JsonlSources {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }
}

impl StandingsSource for JsonlSources {
    fn standings(&self) -> Result<Vec<Standing>, SourceError> {
        let reader = JsonlReader::<Standing>::for_input(&self.storage, InputKind::Standing);
        Ok(reader.read_all()?)
    }
}

impl CountryPointsSource for JsonlSources {
    fn points_for_country(&self, country: &str) -> Result<HashMap<String, i32>, SourceError> {
        let reader =
            JsonlReader::<CountryScore>::for_input(&self.storage, InputKind::CountryScore);
        let scores = reader.read_all()?;
        Ok(points_by_user(&scores, country))
    }
}

impl ExtraBetSource for JsonlSources {
    fn extra_bets(&self) -> Result<Vec<ExtraBet>, SourceError> {
        let reader = JsonlReader::<ExtraBet>::for_input(&self.storage, InputKind::ExtraBet);
        Ok(reader.read_all()?)
    }
}
