use serde::{Deserialize, Serialize};

/// Whether the user's places may be shown.
///
/// `Failed` carries no reason.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    #[default]
    Locked,
    Unlocked,
    Failed,
}

impl AccessState {
    pub fn name(&self) -> &'static str {
        match self {
            AccessState::Locked => "locked",
            AccessState::Unlocked => "unlocked",
            AccessState::Failed => "failed",
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, AccessState::Unlocked)
    }
}
