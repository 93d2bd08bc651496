use serde::{Deserialize, Serialize};

use crate::entities::DirectoryEntry;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadingState {
    Loading,
    Loaded { entries: Vec<DirectoryEntry> },
    Failed,
}

impl LoadingState {
    pub fn name(&self) -> &'static str {
        match self {
            LoadingState::Loading => "loading",
            LoadingState::Loaded { .. } => "loaded",
            LoadingState::Failed => "failed",
        }
    }

    pub fn entries(&self) -> Option<&[DirectoryEntry]> {
        match self {
            LoadingState::Loaded { entries } => Some(entries),
            _ => None,
        }
    }
}

#[test]
fn loading_state_is_tagged() {
    let value = serde_json::to_value(LoadingState::Loaded { entries: vec![] }).unwrap();
    assert_eq!(value, serde_json::json!({ "state": "loaded", "entries": [] }));

    let value = serde_json::to_value(LoadingState::Failed).unwrap();
    assert_eq!(value, serde_json::json!({ "state": "failed" }));
}
