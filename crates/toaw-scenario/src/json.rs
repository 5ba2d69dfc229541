//! JSON documents holding a decoded scenario.
//!
//! A document caches a decoded model so it can be rendered again without
//! the scenario file. Byte spans are stored as base64 strings and every
//! field round-trips exactly.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Result, Scenario};

/// Value of [`ScenarioDocument::game_name`].
pub const GAME_NAME: &str = "TOAW";

/// Value of [`ScenarioDocument::file_format`].
pub const FILE_FORMAT: &str = "TOAW map scenario";

/// Top-level JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDocument {
    pub game_name: String,
    pub file_format: String,
    pub scenario: Scenario,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    game_name: &'static str,
    file_format: &'static str,
    scenario: &'a Scenario,
}

impl<'a> DocumentRef<'a> {
    fn new(scenario: &'a Scenario) -> Self {
        Self {
            game_name: GAME_NAME,
            file_format: FILE_FORMAT,
            scenario,
        }
    }
}

impl ScenarioDocument {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            game_name: GAME_NAME.to_string(),
            file_format: FILE_FORMAT.to_string(),
            scenario,
        }
    }

    fn into_scenario(self) -> Scenario {
        if self.game_name != GAME_NAME || self.file_format != FILE_FORMAT {
            warn!(
                game_name = %self.game_name,
                file_format = %self.file_format,
                "unexpected document identity"
            );
        }
        self.scenario
    }
}

/// Serialize a scenario as an indented JSON document.
pub fn to_json_string(scenario: &Scenario) -> Result<String> {
    Ok(serde_json::to_string_pretty(&DocumentRef::new(scenario))?)
}

/// Parse a JSON document back into a scenario.
pub fn from_json_str(json: &str) -> Result<Scenario> {
    let document: ScenarioDocument = serde_json::from_str(json)?;
    Ok(document.into_scenario())
}

/// Write a scenario document to `path`.
pub fn export_json(scenario: &Scenario, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &DocumentRef::new(scenario))?;
    writer.flush()?;
    debug!(path = %path.display(), "exported scenario document");
    Ok(())
}

/// Read a scenario document from `path`.
pub fn import_json(path: impl AsRef<Path>) -> Result<Scenario> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let document: ScenarioDocument = serde_json::from_reader(reader)?;
    debug!(path = %path.display(), "imported scenario document");
    Ok(document.into_scenario())
}
