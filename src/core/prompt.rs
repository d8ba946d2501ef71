/// Prompt construction for the external narrative generator.

use std::fmt::Write;

use crate::core::backend::ChatMessage;
use crate::core::fusion::FusionResult;
use crate::schema::aspect::Aspect;
use crate::schema::character::Character;
use crate::schema::core::Core;
use crate::schema::stats::PlayerStats;

const FUSION_SYSTEM_PROMPT: &str = "You are a LitRPG fusion narrator. Write vivid, exciting \
descriptions of ability fusion events with system notifications, visual effects, and \
emotional impact.";

const STORY_SYSTEM_PROMPT: &str = "You are a LitRPG story generator. Write engaging, \
progression-focused fantasy stories with game-like elements, stat systems, and meaningful \
choices. Use vivid imagery and second-person perspective.";

/// Image prompts are keyed off the first characters of the player action.
const IMAGE_PROMPT_ACTION_LIMIT: usize = 50;

/// Conversation for narrating a computed fusion.
pub fn fusion_messages(aspects: &[Aspect], result: &FusionResult) -> Vec<ChatMessage> {
    let names = join(aspects.iter().map(|a| a.name.as_str()));
    let types = join(aspects.iter().map(|a| a.aspect_type.name()));
    let total_power: u32 = aspects.iter().map(|a| a.power).sum();

    let mut prompt = format!(
        "Generate a 2-3 paragraph LitRPG fusion narrative:\n\n\
         Aspects being fused: {names}\n\
         Types: {types}\n\
         Total Power: {total_power}\n\n\
         Fusion Result: {name} ({ty})\n\
         Power: {power}\n",
        name = result.fusion_name,
        ty = result.fusion_type,
        power = result.result_power,
    );
    if let Some(mutation) = &result.mutation {
        let _ = writeln!(prompt, "Mutation: {} ({})", mutation, result.mutation_effect);
    }
    prompt.push_str(
        "\nWrite an immersive second-person narrative describing:\n\
         1. The fusion process with visual and sensory details\n\
         2. The system notification and interface reaction\n\
         3. The feeling of the new ability\n\
         4. Any side effects or warnings from the system\n\n\
         Format as LitRPG with system messages, stat displays, and vivid descriptions.",
    );

    vec![ChatMessage::system(FUSION_SYSTEM_PROMPT), ChatMessage::user(prompt)]
}

/// Image prompt for a fusion scene.
pub fn fusion_image_prompt(aspects: &[Aspect]) -> String {
    format!(
        "LitRPG fantasy fusion scene, pixel art style. Glowing magical energy combining \
         three abilities: {}. Dark fantasy aesthetic, 8-bit inspired, retro gaming style. \
         Magical particle effects, glowing core, mystical transformation.",
        join(aspects.iter().map(|a| a.name.as_str()))
    )
}

/// Conversation for advancing the story from a player action, with the
/// current character sheet as context and the stat-directive footer the
/// annotation parser expects.
pub fn story_messages(
    action: &str,
    character: &Character,
    stats: &PlayerStats,
    cores: &[Core],
) -> Vec<ChatMessage> {
    let context = format!(
        "Character: {name}\n\
         Level: {level}\n\
         Stats: Dominance {dominance}, Control {control}, Awareness {awareness}, Vitality {vitality}\n\
         Cores: {cores}\n\n\
         Write a LitRPG-style story segment (2-3 paragraphs) based on the player's action: \"{action}\"\n\n\
         Requirements:\n\
         - Include vivid descriptions of the environment and characters\n\
         - Show the LitRPG system interface (stats, skills, notifications)\n\
         - Create tension and meaningful choices\n\
         - End with 2-3 specific choices the player can make\n\
         - Include stat gains/losses as appropriate\n\
         - Format as immersive second-person narrative\n\n\
         End with: [STATS: dominance:+X,control:+Y,awareness:+Z] if stats change",
        name = character.name,
        level = character.level,
        dominance = stats.dominance,
        control = stats.control,
        awareness = stats.awareness,
        vitality = stats.vitality,
        cores = join(cores.iter().map(|c| c.name.as_str())),
    );

    vec![ChatMessage::system(STORY_SYSTEM_PROMPT), ChatMessage::user(context)]
}

/// Image prompt for a story scene.
pub fn story_image_prompt(action: &str) -> String {
    let excerpt: String = action.chars().take(IMAGE_PROMPT_ACTION_LIMIT).collect();
    format!(
        "LitRPG fantasy scene, pixel art style, {excerpt}. Dark fantasy aesthetic with \
         magical elements. 8-bit inspired, retro gaming style."
    )
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
