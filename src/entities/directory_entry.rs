use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NO_DESCRIPTION: &str = "No further information";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageCoordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A page returned by a nearby geosearch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub pageid: i64,
    pub title: String,
    #[serde(default)]
    pub terms: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub coordinates: Option<Vec<PageCoordinates>>,
}

impl DirectoryEntry {
    /// First "description" term, or [`NO_DESCRIPTION`].
    pub fn description(&self) -> &str {
        self.terms
            .as_ref()
            .and_then(|terms| terms.get("description"))
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or(NO_DESCRIPTION)
    }
}
