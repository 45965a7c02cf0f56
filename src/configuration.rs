use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::math::interval::doubleinterval::DoubleInterval;

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    search_ranges: Vec<serde_json::Value>
}

#[derive(Deserialize)]
struct SearchRangeJsonProp {
    range: DoubleInterval
}

fn search_range_from_json(json_value: serde_json::Value) -> Result<DoubleInterval, ManagerError> {
    let prop: SearchRangeJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
    Ok(prop.range)
}

/// Named search ranges, loaded from a document of the form
/// `{"search_ranges": [{"name": "x", "range": [0.0, 1.0]}]}`.
pub struct Configuration {
    search_range_manager: Manager<DoubleInterval>
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            search_range_manager: Manager::new(search_range_from_json)
        }
    }

    pub fn search_range_manager(&self) -> &Manager<DoubleInterval> {
        &self.search_range_manager
    }

    pub fn search_range(&self, name: &str) -> Result<DoubleInterval, ManagerError> {
        self.search_range_manager.get(name)
    }

    pub fn from_reader<P: AsRef<Path>>(&mut self, file_path: P) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        self.load(json_prop)
    }

    pub fn from_json_str(&mut self, json: &str) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        self.load(json_prop)
    }

    fn load(&mut self, json_prop: ConfigurationJsonProp) -> Result<(), ManagerError> {
        self.search_range_manager.insert_obj_from_json_vec(&json_prop.search_ranges)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}
