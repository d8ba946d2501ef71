/// Fusion calculator integration tests — the documented balance numbers,
/// exercised through the public API.

use litrpg_engine::core::fusion::{self, FusionResult, SynergyLevel};
use litrpg_engine::core::rules::RuleSet;
use litrpg_engine::schema::aspect::{Aspect, AspectType};
use litrpg_engine::schema::core::Core;
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn aspect(id: &str, name: &str, power: u32, ty: AspectType) -> Aspect {
    Aspect {
        id: id.to_string(),
        name: name.to_string(),
        power,
        aspect_type: ty,
        description: String::new(),
    }
}

#[test]
fn documented_end_to_end_scenario() {
    // Three aspects, types Fire/Lightning/Poison, powers 10/10/10, no prior
    // mutations: the canonical balance check.
    let aspects = vec![
        aspect("1", "Flame", 10, AspectType::Fire),
        aspect("2", "Spark", 10, AspectType::Lightning),
        aspect("3", "Venom", 10, AspectType::Poison),
    ];
    let mut rng = StdRng::seed_from_u64(0);
    let result = fusion::fuse(&aspects, 0, &RuleSet::default(), &mut rng);

    assert_eq!(result.result_power, 24);
    assert_eq!(result.essence_gain, 45);
    assert_eq!(result.fusion_type, "Plasma Storm");
    assert_eq!(result.fusion_name, "Thunder Inferno");
    assert_eq!(result.synergy_level, SynergyLevel::Perfect);
}

#[test]
fn fire_lightning_beats_fire_ice_priority() {
    // Fire+Lightning+Ice satisfies two pair rules; the first in table
    // order must win.
    let aspects = vec![
        aspect("1", "Flame", 5, AspectType::Fire),
        aspect("2", "Spark", 5, AspectType::Lightning),
        aspect("3", "Frost", 5, AspectType::Ice),
    ];
    let mut rng = StepRng::new(u64::MAX, 0);
    let result = fusion::fuse(&aspects, 0, &RuleSet::default(), &mut rng);
    assert_eq!(result.fusion_type, "Plasma Storm");
}

#[test]
fn three_same_type_aspects_rate_perfect() {
    // One distinct type, but the tier counts the raw type list: length 3
    // means Perfect.
    let aspects = vec![
        aspect("1", "Ember", 8, AspectType::Fire),
        aspect("2", "Cinder", 8, AspectType::Fire),
        aspect("3", "Ash", 8, AspectType::Fire),
    ];
    let mut rng = StepRng::new(u64::MAX, 0);
    let result = fusion::fuse(&aspects, 0, &RuleSet::default(), &mut rng);
    assert_eq!(result.synergy_level, SynergyLevel::Perfect);
    // No pair rule matches a single type; the name is generic.
    assert_eq!(result.fusion_type, "Composite");
}

#[test]
fn forced_mutation_selects_from_table() {
    let aspects = vec![
        aspect("1", "Ember", 8, AspectType::Fire),
        aspect("2", "Spark", 8, AspectType::Lightning),
        aspect("3", "Frost", 8, AspectType::Ice),
    ];
    let rules = RuleSet::default();
    let mut rng = StepRng::new(0, 0);
    let result = fusion::fuse(&aspects, 0, &rules, &mut rng);
    assert!(result.did_mutate);
    let mutation = result.mutation.as_deref().unwrap();
    assert!(rules.mutations.iter().any(|m| m.name == mutation));
    assert!(rules
        .mutations
        .iter()
        .any(|m| m.effect == result.mutation_effect));
}

#[test]
fn escalated_mutation_count_always_mutates() {
    let aspects = vec![
        aspect("1", "Ember", 8, AspectType::Fire),
        aspect("2", "Spark", 8, AspectType::Lightning),
        aspect("3", "Frost", 8, AspectType::Ice),
    ];
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = fusion::fuse(&aspects, 18, &RuleSet::default(), &mut rng);
        assert!(result.did_mutate, "seed {} failed to mutate", seed);
    }
}

#[test]
fn void_core_updates_past_mutation_cap() {
    let result = FusionResult {
        result_power: 10,
        essence_gain: 20,
        fusion_name: "Phantom Chill".to_string(),
        fusion_type: "Void Frost".to_string(),
        fusion_description: String::new(),
        mutation: Some("Resonance".to_string()),
        mutation_effect: "Can be cast multiple times in one turn".to_string(),
        did_mutate: true,
        synergy_level: SynergyLevel::Good,
    };

    let cores = vec![
        Core {
            name: "Void Core".to_string(),
            essence: 0,
            tier: 1,
            mutations: vec!["m".to_string(); 12],
            abilities: vec![],
        },
        Core {
            name: "Other Core".to_string(),
            essence: 0,
            tier: 1,
            mutations: vec!["m".to_string(); 10],
            abilities: vec![],
        },
    ];

    let updated = fusion::apply_to_cores(&cores, &result);
    assert_eq!(updated[0].essence, 20);
    assert_eq!(updated[0].mutations.len(), 13);
    assert_eq!(updated[1].essence, 0);
    assert_eq!(updated[1].mutations.len(), 10);
}

#[test]
fn zero_power_aspects_fuse_to_zero() {
    let aspects = vec![
        aspect("1", "Husk", 0, AspectType::Shadow),
        aspect("2", "Wisp", 0, AspectType::Shadow),
        aspect("3", "Echo", 0, AspectType::Shadow),
    ];
    let mut rng = StepRng::new(u64::MAX, 0);
    let result = fusion::fuse(&aspects, 0, &RuleSet::default(), &mut rng);
    assert_eq!(result.result_power, 0);
    assert_eq!(result.essence_gain, 0);
}
