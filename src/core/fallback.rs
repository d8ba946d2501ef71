/// Template narration used when the external generator is unavailable.
///
/// Pure string interpolation over small word banks: no I/O, no failure
/// modes. The story template embeds a stat directive and six numbered
/// choice lines so the annotation parser always finds structure in it.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt::Write;

use crate::core::fusion::FusionResult;
use crate::schema::aspect::Aspect;
use crate::schema::character::Character;
use crate::schema::stats::PlayerStats;

const ACTION_OPENERS: [&str; 4] = [
    "The shadows lengthen around you as you",
    "A mysterious energy pulses through your veins as you",
    "The Void Core hums with ancient power as you",
    "The air crackles with magical energy as you",
];

const ENVIRONMENTS: [&str; 4] = [
    "in this forgotten realm of the Voidverse.",
    "amidst the crumbling ruins of an ancient civilization.",
    "under the watchful gaze of unseen entities.",
    "in a realm where reality bends to will alone.",
];

const OUTCOMES: [&str; 4] = [
    "You sense your connection to the Void growing stronger.",
    "The system acknowledges your progress with a chime.",
    "Your abilities resonate with newfound power.",
    "A notification flickers in your vision, indicating growth.",
];

const CANDIDATE_PATHS: [&str; 8] = [
    "Investigate the glowing artifact nearby",
    "Meditate and absorb the ambient energy",
    "Push deeper into the unknown territory",
    "Commune with the whispering void",
    "Trace the source of the distant chime",
    "Test your newest ability on the crumbling wall",
    "Follow the trail of fading essence",
    "Fortify your mind against the watching presence",
];

/// How many numbered paths the story fallback offers.
const CHOICE_COUNT: usize = 6;

/// Fusion-chamber narration for a computed fusion result.
///
/// Fully deterministic: every slot comes from the aspects and the result.
/// Carries no stat directive — the fusion path awards stats through the
/// calculator's stat-change rule, not through parsing.
pub fn fusion_text(aspects: &[Aspect], result: &FusionResult) -> String {
    let names = join(aspects.iter().map(|a| a.name.as_str()));
    let types = join(aspects.iter().map(|a| a.aspect_type.name()));
    let total_power: u32 = aspects.iter().map(|a| a.power).sum();

    let mut text = format!(
        "The fusion chamber hums with ancient power as {names} begin to merge together. \
         Brilliant streams of {types} energy intertwine, creating a mesmerizing display \
         of magical convergence.\n\n\
         [System Notification]\n\
         ⚡ FUSION INITIATED ⚡\n\
         Aspects: {names}\n\
         Total Power: {total_power}\n\n\
         A blinding light fills the void, and you feel a surge of new energy coursing \
         through your veins. The system interface flickers with arcane symbols as the \
         fusion completes successfully.\n\n\
         [System Notification]\n\
         ✨ FUSION COMPLETE! ✨\n\
         New Ability: {name} ({ty})\n\
         Power: {power}\n\
         Essence Gained: {essence}\n",
        names = names,
        types = types,
        total_power = total_power,
        name = result.fusion_name,
        ty = result.fusion_type,
        power = result.result_power,
        essence = result.essence_gain,
    );

    if let Some(mutation) = &result.mutation {
        let _ = writeln!(text, "⚠️ MUTATION: {} - {}", mutation, result.mutation_effect);
    }

    text.push_str(
        "\nYou can feel the new ability settling into your Void Core, ready to be called \
         upon when needed. Your understanding of the fusion arts deepens with every \
         successful combination.",
    );
    text
}

/// Story narration for a player action, with randomized phrasing.
///
/// Embeds the literal directive `[STATS: awareness:+2,control:+1]` and six
/// numbered choice lines; parsing the output always yields a non-empty stat
/// delta and six choices.
pub fn story_text<R: Rng>(
    action: &str,
    character: &Character,
    stats: &PlayerStats,
    rng: &mut R,
) -> String {
    let opener = pick(&ACTION_OPENERS, rng);
    let environment = pick(&ENVIRONMENTS, rng);
    let outcome = pick(&OUTCOMES, rng);

    let mut text = format!(
        "{opener} {action} {environment}\n\n\
         [System Notification]\n\
         Action Completed!\n\
         {name} - Level {level}\n\
         Stats: Dominance {dominance}, Control {control}, Awareness {awareness}\n\n\
         {outcome} The essence flows through you, reinforcing your connection to this \
         strange new world.\n\n\
         [STATS: awareness:+2,control:+1]\n\n\
         Your enhanced senses pick up several paths forward:\n",
        name = character.name,
        level = character.level,
        dominance = stats.dominance,
        control = stats.control,
        awareness = stats.awareness,
    );

    for (i, path) in CANDIDATE_PATHS
        .choose_multiple(rng, CHOICE_COUNT)
        .enumerate()
    {
        let _ = writeln!(text, "{}. {}", i + 1, path);
    }
    text
}

fn pick<'a, R: Rng>(bank: &[&'a str], rng: &mut R) -> &'a str {
    bank[rng.gen_range(0..bank.len())]
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
