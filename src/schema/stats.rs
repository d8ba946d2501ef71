use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stat adjustments parsed out of narrative text, keyed by stat name.
///
/// Magnitudes only — the directive parser strips sign characters before
/// parsing, so a written `-5` records as `5`.
pub type StatDelta = HashMap<String, u32>;

/// The player's four primary stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub dominance: u32,
    pub control: u32,
    pub awareness: u32,
    pub vitality: u32,
}

impl PlayerStats {
    /// Apply a parsed stat delta. Unknown stat names are ignored.
    pub fn apply_delta(&mut self, delta: &StatDelta) {
        for (stat, amount) in delta {
            match stat.as_str() {
                "dominance" => self.dominance += amount,
                "control" => self.control += amount,
                "awareness" => self.awareness += amount,
                "vitality" => self.vitality += amount,
                _ => {}
            }
        }
    }
}

/// Fixed-shape stat gains awarded by a fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChanges {
    pub control: u32,
    pub awareness: u32,
    pub dominance: u32,
}
