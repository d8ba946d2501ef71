/// Request orchestration: precondition checks, two-path narration
/// (external backend with template fallback), core updates, and stat
/// awards.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::backend::{BackendError, NarrativeBackend};
use crate::core::fusion::{self, FusionResult};
use crate::core::rules::{RuleSet, RulesError};
use crate::core::{annotation, fallback, prompt};
use crate::schema::aspect::Aspect;
use crate::schema::character::Character;
use crate::schema::core::Core;
use crate::schema::stats::{PlayerStats, StatChanges, StatDelta};

/// Fusions below this many aspects are rejected before any calculation.
pub const MIN_FUSION_ASPECTS: usize = 3;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("At least 3 aspects required for fusion")]
    TooFewAspects,
    #[error("At least 1 core required for fusion")]
    NoCores,
    #[error("Prompt is required")]
    EmptyPrompt,
    #[error("rules error: {0}")]
    Rules(#[from] RulesError),
}

/// A fusion request: the aspects to consume, the cores that absorb the
/// result, and the prior mutation count feeding the escalation curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionRequest {
    pub aspects: Vec<Aspect>,
    pub cores: Vec<Core>,
    #[serde(default)]
    pub mutation_count: Option<u32>,
}

/// Everything a host needs to present a completed fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionOutcome {
    pub fusion_result: FusionResult,
    pub updated_cores: Vec<Core>,
    pub stat_changes: StatChanges,
    pub fusion_story: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_image: Option<String>,
}

/// A story request: the player's action plus the game state the narration
/// should reflect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryRequest {
    pub prompt: String,
    pub character: Character,
    pub stats: PlayerStats,
    pub cores: Vec<Core>,
}

/// A story beat: directive-stripped narration plus the structure parsed
/// out of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryOutcome {
    pub story: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_image: Option<String>,
    pub choices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat_changes: Option<StatDelta>,
    pub level_change: bool,
}

/// The top-level engine. Built via `GameEngine::builder()`; owns the rule
/// tables, the optional external backend, and the RNG bookkeeping. Each
/// operation derives a fresh seeded RNG from `seed + generation_count`,
/// so a given engine replays identically from the same seed.
pub struct GameEngine {
    rules: RuleSet,
    backend: Option<Box<dyn NarrativeBackend>>,
    seed: u64,
    generation_count: u64,
}

/// Builder for constructing a `GameEngine`.
pub struct GameEngineBuilder {
    rules: Option<RuleSet>,
    rules_path: Option<String>,
    backend: Option<Box<dyn NarrativeBackend>>,
    seed: u64,
}

impl GameEngine {
    pub fn builder() -> GameEngineBuilder {
        GameEngineBuilder {
            rules: None,
            rules_path: None,
            backend: None,
            seed: 0,
        }
    }

    /// Fuse aspects into a new ability and narrate the event.
    ///
    /// Backend failure is recoverable: the operation still succeeds with
    /// template narration and no scene image. Precondition violations are
    /// the only error path.
    pub fn fuse(&mut self, request: &FusionRequest) -> Result<FusionOutcome, PipelineError> {
        if request.aspects.len() < MIN_FUSION_ASPECTS {
            return Err(PipelineError::TooFewAspects);
        }
        if request.cores.is_empty() {
            return Err(PipelineError::NoCores);
        }

        let mut rng = self.next_rng();
        let result = fusion::fuse(
            &request.aspects,
            request.mutation_count.unwrap_or(0),
            &self.rules,
            &mut rng,
        );
        debug!(
            fusion_name = %result.fusion_name,
            did_mutate = result.did_mutate,
            "fusion computed"
        );

        let (fusion_story, scene_image) = self.fusion_narration(&request.aspects, &result);
        let updated_cores = fusion::apply_to_cores(&request.cores, &result);
        let stat_changes = fusion::stat_changes(&result);
        self.generation_count += 1;

        Ok(FusionOutcome {
            fusion_result: result,
            updated_cores,
            stat_changes,
            fusion_story,
            scene_image,
        })
    }

    /// Advance the story from a player action and parse the narration for
    /// embedded directives.
    pub fn advance_story(&mut self, request: &StoryRequest) -> Result<StoryOutcome, PipelineError> {
        if request.prompt.is_empty() {
            return Err(PipelineError::EmptyPrompt);
        }

        let mut rng = self.next_rng();
        let (text, scene_image) = self.story_narration(request, &mut rng);
        let annotation = annotation::parse(&text);
        self.generation_count += 1;

        Ok(StoryOutcome {
            story: annotation.cleaned_text,
            scene_image,
            choices: annotation.choices,
            stat_changes: if annotation.stat_delta.is_empty() {
                None
            } else {
                Some(annotation.stat_delta)
            },
            level_change: annotation.leveled_up,
        })
    }

    fn fusion_narration(
        &self,
        aspects: &[Aspect],
        result: &FusionResult,
    ) -> (String, Option<String>) {
        if let Some(backend) = &self.backend {
            match backend_fusion(backend.as_ref(), aspects, result) {
                Ok(pair) => return pair,
                Err(err) => warn!(error = %err, "narrative backend failed, using fallback"),
            }
        }
        (fallback::fusion_text(aspects, result), None)
    }

    fn story_narration(
        &self,
        request: &StoryRequest,
        rng: &mut StdRng,
    ) -> (String, Option<String>) {
        if let Some(backend) = &self.backend {
            match backend_story(backend.as_ref(), request) {
                Ok(pair) => return pair,
                Err(err) => warn!(error = %err, "narrative backend failed, using fallback"),
            }
        }
        (
            fallback::story_text(&request.prompt, &request.character, &request.stats, rng),
            None,
        )
    }

    fn next_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed.wrapping_add(self.generation_count))
    }
}

/// One attempt against the backend: text first, then the scene image. A
/// failure of either discards both — the caller falls back to template
/// narration with no image.
fn backend_fusion(
    backend: &dyn NarrativeBackend,
    aspects: &[Aspect],
    result: &FusionResult,
) -> Result<(String, Option<String>), BackendError> {
    let text = backend.generate_text(&prompt::fusion_messages(aspects, result))?;
    let image = backend.generate_image(&prompt::fusion_image_prompt(aspects))?;
    Ok((text, Some(image)))
}

fn backend_story(
    backend: &dyn NarrativeBackend,
    request: &StoryRequest,
) -> Result<(String, Option<String>), BackendError> {
    let messages = prompt::story_messages(
        &request.prompt,
        &request.character,
        &request.stats,
        &request.cores,
    );
    let text = backend.generate_text(&messages)?;
    let image = backend.generate_image(&prompt::story_image_prompt(&request.prompt))?;
    Ok((text, Some(image)))
}

impl GameEngineBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Provide rule tables directly (for testing without files).
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Merge rule tables from a RON file on top of the defaults. A missing
    /// file is skipped silently.
    pub fn rules_path(mut self, path: &str) -> Self {
        self.rules_path = Some(path.to_string());
        self
    }

    pub fn backend(mut self, backend: Box<dyn NarrativeBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn build(self) -> Result<GameEngine, PipelineError> {
        let mut rules = self.rules.unwrap_or_default();
        if let Some(ref path) = self.rules_path {
            if Path::new(path).exists() {
                rules.merge(RuleSet::load_from_ron(Path::new(path))?);
            }
        }
        Ok(GameEngine {
            rules,
            backend: self.backend,
            seed: self.seed,
            generation_count: 0,
        })
    }
}
