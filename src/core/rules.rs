/// Data-driven fusion rule tables — synergy pairs, mutation records, and
/// the generic-name word banks, with compiled-in defaults and RON loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::aspect::AspectType;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A type-pair synergy rule. Rules are checked in table order against the
/// set of types present in a fusion; the first rule whose pair is fully
/// present names the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynergyRule {
    pub first: AspectType,
    pub second: AspectType,
    pub fusion_type: String,
    pub fusion_name: String,
    pub description: String,
}

/// A named mutation and its gameplay effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationRecord {
    pub name: String,
    pub effect: String,
}

/// Word banks for naming fusions that match no synergy rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameBanks {
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
}

impl Default for NameBanks {
    fn default() -> Self {
        Self {
            prefixes: to_strings(&["Arcane", "Mystic", "Ethereal", "Primal", "Cosmic"]),
            suffixes: to_strings(&["Force", "Burst", "Wave", "Storm", "Nova"]),
        }
    }
}

/// The full rule table set consumed by the fusion calculator.
///
/// `RuleSet::default()` carries the built-in game balance; games can
/// override any table from RON data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub synergies: Vec<SynergyRule>,
    pub mutations: Vec<MutationRecord>,
    pub names: NameBanks,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            synergies: default_synergies(),
            mutations: default_mutations(),
            names: NameBanks::default(),
        }
    }
}

impl RuleSet {
    /// Parse a rule set from a RON string. Omitted tables fall back to the
    /// built-in defaults.
    pub fn parse_ron(input: &str) -> Result<RuleSet, RulesError> {
        Ok(ron::from_str(input)?)
    }

    /// Load a rule set from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<RuleSet, RulesError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Merge another rule set into this one. Each table in `other` replaces
    /// the corresponding table here wholesale when it is non-empty, so a
    /// data file can override one table without restating the rest.
    pub fn merge(&mut self, other: RuleSet) {
        if !other.synergies.is_empty() {
            self.synergies = other.synergies;
        }
        if !other.mutations.is_empty() {
            self.mutations = other.mutations;
        }
        if !other.names.prefixes.is_empty() {
            self.names.prefixes = other.names.prefixes;
        }
        if !other.names.suffixes.is_empty() {
            self.names.suffixes = other.names.suffixes;
        }
    }
}

fn default_synergies() -> Vec<SynergyRule> {
    vec![
        SynergyRule {
            first: AspectType::Fire,
            second: AspectType::Lightning,
            fusion_type: "Plasma Storm".to_string(),
            fusion_name: "Thunder Inferno".to_string(),
            description: "Devastating plasma attacks combining fire and lightning.".to_string(),
        },
        SynergyRule {
            first: AspectType::Ice,
            second: AspectType::Shadow,
            fusion_type: "Void Frost".to_string(),
            fusion_name: "Phantom Chill".to_string(),
            description: "Freezes targets in absolute darkness.".to_string(),
        },
        SynergyRule {
            first: AspectType::Fire,
            second: AspectType::Ice,
            fusion_type: "Steam Miasma".to_string(),
            fusion_name: "Scalding Mist".to_string(),
            description: "Creates burning steam that obscures vision.".to_string(),
        },
        SynergyRule {
            first: AspectType::Shadow,
            second: AspectType::Poison,
            fusion_type: "Death Veil".to_string(),
            fusion_name: "Venomous Shadow".to_string(),
            description: "Shadow attacks infused with deadly toxins.".to_string(),
        },
    ]
}

fn default_mutations() -> Vec<MutationRecord> {
    [
        ("Overload", "+20% power, 10% chance of self-damage"),
        ("Efficiency", "-30% resource cost, -10% power"),
        ("Unstable", "+50% power, causes random side effects"),
        ("Resonance", "Can be cast multiple times in one turn"),
        ("Echo", "Creates a delayed secondary effect"),
        ("Feedback", "Deals damage to caster on use"),
        ("Amplified", "All stats +5, but costs 2x essence"),
        ("Volatile", "+100% power, 30% chance to fail"),
    ]
    .into_iter()
    .map(|(name, effect)| MutationRecord {
        name: name.to_string(),
        effect: effect.to_string(),
    })
    .collect()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
