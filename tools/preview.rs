/// Preview — interactive shell for exercising the engine without a backend.
///
/// Usage: preview [--rules <path>] [--seed <n>]
///
/// Commands:
///   story <action...>     — advance the story from a player action
///   fuse <id,id,id>       — fuse aspects from the pool by id
///   state                 — print the current game state
///   seed <n>              — rebuild the engine with a new seed
///   help                  — list commands
///   quit                  — exit

use std::io::{self, BufRead, Write};

use litrpg_engine::core::pipeline::{FusionRequest, GameEngine, StoryRequest};
use litrpg_engine::schema::state::GameState;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut rules_path: Option<String> = None;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rules" if i + 1 < args.len() => {
                i += 1;
                rules_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut engine = match build_engine(rules_path.as_deref(), seed) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Failed to build engine: {}", e);
            std::process::exit(1);
        }
    };

    let mut state = GameState::new_game();

    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "state" => {
                print_state(&state);
            }
            "seed" => {
                if parts.len() < 2 {
                    println!("Usage: seed <n>");
                    continue;
                }
                let new_seed = parts[1].parse().unwrap_or(42);
                match build_engine(rules_path.as_deref(), new_seed) {
                    Ok(rebuilt) => {
                        engine = rebuilt;
                        println!("Seed set to {}", new_seed);
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "story" => {
                if parts.len() < 2 {
                    println!("Usage: story <action...>");
                    continue;
                }
                let action = parts[1..].join(" ");
                let request = StoryRequest {
                    prompt: action,
                    character: state.character.clone(),
                    stats: state.stats,
                    cores: state.cores.clone(),
                };
                match engine.advance_story(&request) {
                    Ok(outcome) => {
                        println!("\n--- Story ---");
                        println!("{}", outcome.story.trim());
                        println!("--- End ---\n");
                        state.apply_story(outcome.stat_changes.as_ref(), outcome.level_change);
                        if outcome.level_change {
                            println!("LEVEL UP! Now level {}", state.character.level);
                        }
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "fuse" => {
                if parts.len() < 2 {
                    println!("Usage: fuse <id,id,id>");
                    print_aspects(&state);
                    continue;
                }
                let ids: Vec<String> = parts[1].split(',').map(|s| s.trim().to_string()).collect();
                let selected: Vec<_> = state
                    .aspects
                    .iter()
                    .filter(|a| ids.contains(&a.id))
                    .cloned()
                    .collect();
                if selected.len() < ids.len() {
                    println!("Unknown aspect id in: {}", parts[1]);
                    print_aspects(&state);
                    continue;
                }
                let request = FusionRequest {
                    aspects: selected,
                    cores: state.cores.clone(),
                    mutation_count: Some(state.total_mutations()),
                };
                match engine.fuse(&request) {
                    Ok(outcome) => {
                        println!("\n--- Fusion ---");
                        println!("{}", outcome.fusion_story.trim());
                        println!("--- End ---\n");
                        let result = &outcome.fusion_result;
                        println!(
                            "{} ({}) — power {}, essence +{}, synergy {:?}",
                            result.fusion_name,
                            result.fusion_type,
                            result.result_power,
                            result.essence_gain,
                            result.synergy_level
                        );
                        if let Some(mutation) = &result.mutation {
                            println!("Mutation: {} — {}", mutation, result.mutation_effect);
                        }
                        state.apply_fusion(&ids, outcome.updated_cores, &outcome.stat_changes);
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            _ => {
                println!("Unknown command: {}. Type 'help' for commands.", cmd);
            }
        }
    }
}

fn build_engine(rules_path: Option<&str>, seed: u64) -> Result<GameEngine, Box<dyn std::error::Error>> {
    let mut builder = GameEngine::builder().seed(seed);
    if let Some(path) = rules_path {
        builder = builder.rules_path(path);
    }
    Ok(builder.build()?)
}

fn print_state(state: &GameState) {
    println!(
        "{} — Level {}",
        state.character.name, state.character.level
    );
    println!(
        "Stats: Dominance {}, Control {}, Awareness {}, Vitality {}",
        state.stats.dominance, state.stats.control, state.stats.awareness, state.stats.vitality
    );
    for core in &state.cores {
        println!(
            "Core: {} (tier {}) — essence {}, {} abilities, {} mutations",
            core.name,
            core.tier,
            core.essence,
            core.abilities.len(),
            core.mutations.len()
        );
    }
    print_aspects(state);
}

fn print_aspects(state: &GameState) {
    if state.aspects.is_empty() {
        println!("No aspects available.");
        return;
    }
    println!("Aspects:");
    for aspect in &state.aspects {
        println!(
            "  [{}] {} ({}, power {})",
            aspect.id, aspect.name, aspect.aspect_type, aspect.power
        );
    }
}

fn print_usage() {
    println!("Usage: preview [--rules <path>] [--seed <n>]");
}

fn print_help() {
    println!("Commands:");
    println!("  story <action...>     — advance the story from a player action");
    println!("  fuse <id,id,id>       — fuse aspects from the pool by id");
    println!("  state                 — print the current game state");
    println!("  seed <n>              — rebuild the engine with a new seed");
    println!("  help                  — list commands");
    println!("  quit                  — exit");
}
