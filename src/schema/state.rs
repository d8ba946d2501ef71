/// Explicit game-state object passed between the host and the engine.
use serde::{Deserialize, Serialize};

use super::aspect::{Aspect, AspectType};
use super::character::Character;
use super::core::Core;
use super::stats::{PlayerStats, StatChanges, StatDelta};

/// Everything the engine's operations read or update: the character sheet,
/// stats, owned cores, and the available aspect pool. The engine itself
/// holds no game state; hosts own a `GameState` and feed its pieces into
/// each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub character: Character,
    pub stats: PlayerStats,
    pub cores: Vec<Core>,
    pub aspects: Vec<Aspect>,
}

impl GameState {
    /// The starting state for a fresh playthrough: one Void Core and five
    /// unfused aspects.
    pub fn new_game() -> GameState {
        GameState {
            character: Character {
                name: "Abyss Walker".to_string(),
                level: 1,
            },
            stats: PlayerStats {
                dominance: 10,
                control: 10,
                awareness: 10,
                vitality: 100,
            },
            cores: vec![Core {
                name: "Void Core".to_string(),
                essence: 50,
                tier: 1,
                mutations: vec![],
                abilities: vec!["Shadow Touch".to_string()],
            }],
            aspects: starting_aspects(),
        }
    }

    /// Total mutation count across all cores — the fusion path feeds this
    /// back in as the prior-mutation count for the escalation curve.
    pub fn total_mutations(&self) -> u32 {
        self.cores.iter().map(|c| c.mutations.len() as u32).sum()
    }

    /// Absorb a fusion: replace the cores with their updated versions,
    /// remove the consumed aspects from the pool, and award the stat gains.
    pub fn apply_fusion(
        &mut self,
        fused_ids: &[String],
        updated_cores: Vec<Core>,
        changes: &StatChanges,
    ) {
        self.cores = updated_cores;
        self.aspects.retain(|a| !fused_ids.contains(&a.id));
        self.stats.control += changes.control;
        self.stats.awareness += changes.awareness;
        self.stats.dominance += changes.dominance;
    }

    /// Absorb a story beat: apply any parsed stat delta and level up if the
    /// narration said so.
    pub fn apply_story(&mut self, delta: Option<&StatDelta>, leveled_up: bool) {
        if let Some(delta) = delta {
            self.stats.apply_delta(delta);
        }
        if leveled_up {
            self.character.level += 1;
        }
    }
}

fn starting_aspects() -> Vec<Aspect> {
    [
        ("1", "Burning Blade", 15, AspectType::Fire, "Inflicts burning damage"),
        ("2", "Shadow Cloak", 12, AspectType::Shadow, "Grants temporary invisibility"),
        ("3", "Lightning Strike", 18, AspectType::Lightning, "Fast electric attack"),
        ("4", "Frost Shield", 14, AspectType::Ice, "Blocks incoming damage"),
        ("5", "Venom Fang", 11, AspectType::Poison, "Poisons target"),
    ]
    .into_iter()
    .map(|(id, name, power, aspect_type, description)| Aspect {
        id: id.to_string(),
        name: name.to_string(),
        power,
        aspect_type,
        description: description.to_string(),
    })
    .collect()
}
