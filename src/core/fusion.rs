/// Fusion outcome calculation — power/essence arithmetic, synergy lookup,
/// and mutation rolls.

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::rules::RuleSet;
use crate::schema::aspect::Aspect;
use crate::schema::core::Core;
use crate::schema::stats::StatChanges;

/// Fraction of the combined aspect power retained by the fused ability.
const POWER_RETENTION: f64 = 0.8;
/// Essence awarded per point of combined aspect power.
const ESSENCE_YIELD: f64 = 1.5;
/// Mutation odds with no prior mutations.
const BASE_MUTATION_CHANCE: f64 = 0.15;
/// Additional mutation odds per prior mutation.
const MUTATION_CHANCE_STEP: f64 = 0.05;
/// Cores stop absorbing fusions once they carry this many mutations,
/// unless they are the Void Core.
const CORE_MUTATION_CAP: usize = 10;

/// Three-tier classification of fusion quality derived from type diversity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynergyLevel {
    Basic,
    Good,
    Perfect,
}

/// The outcome of fusing a set of aspects. Created once per fusion
/// invocation and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionResult {
    pub result_power: u32,
    pub essence_gain: u32,
    pub fusion_name: String,
    pub fusion_type: String,
    pub fusion_description: String,
    pub mutation: Option<String>,
    pub mutation_effect: String,
    pub did_mutate: bool,
    pub synergy_level: SynergyLevel,
}

impl FusionResult {
    /// A weaker result recomputed from the raw aspect list alone: generic
    /// name, no synergy lookup, no mutation roll. Hosts that must never
    /// fail a user-visible fusion request substitute this at their outer
    /// boundary.
    pub fn degraded(aspects: &[Aspect]) -> FusionResult {
        let total_power = total_power(aspects);
        FusionResult {
            result_power: scale(total_power, POWER_RETENTION),
            essence_gain: scale(total_power, ESSENCE_YIELD),
            fusion_name: "Arcane Fusion".to_string(),
            fusion_type: "Composite".to_string(),
            fusion_description: "A mysterious fusion of powers.".to_string(),
            mutation: None,
            mutation_effect: String::new(),
            did_mutate: false,
            synergy_level: SynergyLevel::Basic,
        }
    }
}

/// Mutation odds for a given prior-mutation count.
///
/// Deliberately uncapped: past 17 prior mutations the chance exceeds 1.0
/// and the roll always succeeds. This is the escalation curve the game
/// balance depends on, not an oversight.
pub fn mutation_chance(prior_mutation_count: u32) -> f64 {
    BASE_MUTATION_CHANCE + MUTATION_CHANCE_STEP * f64::from(prior_mutation_count)
}

/// Fuse a set of aspects into a new ability.
///
/// Callers enforce the gameplay minimums (at least 3 aspects, at least
/// 1 core) before invoking; the calculator itself is total over any
/// aspect list. Draw order: mutation occurrence, then generic-name flavor
/// words (only when no synergy rule matches), then mutation selection.
pub fn fuse<R: Rng>(
    aspects: &[Aspect],
    prior_mutation_count: u32,
    rules: &RuleSet,
    rng: &mut R,
) -> FusionResult {
    let total_power = total_power(aspects);
    let result_power = scale(total_power, POWER_RETENTION);
    let essence_gain = scale(total_power, ESSENCE_YIELD);

    let did_mutate = rng.gen::<f64>() < mutation_chance(prior_mutation_count);

    // Synergy tier counts the raw type list, not distinct types: three
    // same-typed aspects still rate Perfect. Intentional, matches the
    // shipped balance.
    let synergy_level = match aspects.len() {
        n if n >= 3 => SynergyLevel::Perfect,
        2 => SynergyLevel::Good,
        _ => SynergyLevel::Basic,
    };

    let present: FxHashSet<_> = aspects.iter().map(|a| &a.aspect_type).collect();
    let matched = rules
        .synergies
        .iter()
        .find(|rule| present.contains(&rule.first) && present.contains(&rule.second));

    let (fusion_type, fusion_name, fusion_description) = match matched {
        Some(rule) => (
            rule.fusion_type.clone(),
            rule.fusion_name.clone(),
            rule.description.clone(),
        ),
        None => (
            "Composite".to_string(),
            generic_name(rules, rng),
            format!("A fusion of {}.", joined_names(aspects)),
        ),
    };

    let (mutation, mutation_effect) = if did_mutate && !rules.mutations.is_empty() {
        let record = &rules.mutations[rng.gen_range(0..rules.mutations.len())];
        (Some(record.name.clone()), record.effect.clone())
    } else {
        (None, String::new())
    };

    FusionResult {
        result_power,
        essence_gain,
        fusion_name,
        fusion_type,
        fusion_description,
        mutation,
        mutation_effect,
        did_mutate,
        synergy_level,
    }
}

/// Apply a fusion result to a core list.
///
/// A core absorbs the result — essence gain, learned ability, and any
/// mutation — when it is named "Void Core" or still carries fewer than
/// `CORE_MUTATION_CAP` mutations. The Void Core always absorbs, no matter
/// how mutated. Non-matching cores pass through unchanged.
pub fn apply_to_cores(cores: &[Core], result: &FusionResult) -> Vec<Core> {
    cores
        .iter()
        .map(|core| {
            if core.name == "Void Core" || core.mutations.len() < CORE_MUTATION_CAP {
                let mut updated = core.clone();
                updated.essence += result.essence_gain;
                updated.abilities.push(result.fusion_name.clone());
                if let Some(mutation) = &result.mutation {
                    updated.mutations.push(mutation.clone());
                }
                updated
            } else {
                core.clone()
            }
        })
        .collect()
}

/// Stat gains awarded for a fusion: control scales with mutation, dominance
/// with a Perfect synergy.
pub fn stat_changes(result: &FusionResult) -> StatChanges {
    StatChanges {
        control: if result.mutation.is_some() { 3 } else { 2 },
        awareness: 1,
        dominance: if result.synergy_level == SynergyLevel::Perfect {
            3
        } else {
            1
        },
    }
}

fn total_power(aspects: &[Aspect]) -> u32 {
    aspects.iter().map(|a| a.power).sum()
}

fn scale(total_power: u32, factor: f64) -> u32 {
    (f64::from(total_power) * factor).floor() as u32
}

fn generic_name<R: Rng>(rules: &RuleSet, rng: &mut R) -> String {
    let banks = &rules.names;
    if banks.prefixes.is_empty() || banks.suffixes.is_empty() {
        return "Fused Ability".to_string();
    }
    let prefix = &banks.prefixes[rng.gen_range(0..banks.prefixes.len())];
    let suffix = &banks.suffixes[rng.gen_range(0..banks.suffixes.len())];
    format!("{prefix} {suffix}")
}

fn joined_names(aspects: &[Aspect]) -> String {
    aspects
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
