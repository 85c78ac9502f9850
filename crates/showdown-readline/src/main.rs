use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tokio::sync::mpsc;

use showdown_core::ShowdownError;
use showdown_core::game::{Move, MoveSuggestion, Outcome};
use showdown_core::mood::{mood_for, taunt_for};
use showdown_core::oracle::{MoveOracle, MoveSuggester};
use showdown_core::session::{
    ChannelEventSink, GameEvent, GameMode, RoundController, ScorePoint,
};
use showdown_interaction::{OpenRouterApiAgent, load_file_config};

const COMMANDS: [&str; 4] = ["/mode", "/reset", "/score", "/chart"];
const MOVE_WORDS: [&str; 3] = ["stone", "paper", "scissor"];

/// Candidates from `pool` that extend what was typed so far. An empty
/// prefix matches nothing: bare-move completion should only kick in once
/// the player starts typing.
fn completions_for(pool: &[&str], prefix: &str) -> Vec<String> {
    if prefix.is_empty() {
        return Vec::new();
    }
    pool.iter()
        .filter(|word| word.starts_with(prefix))
        .map(|word| word.to_string())
        .collect()
}

/// The rest of the unique word the prefix could become, if any.
fn hint_for(pool: &[&str], prefix: &str) -> Option<String> {
    if prefix.is_empty() || prefix.contains(' ') {
        return None;
    }
    pool.iter()
        .find(|word| word.starts_with(prefix) && word.len() > prefix.len())
        .map(|word| word[prefix.len()..].to_string())
}

/// CLI helper for rustyline: completes and hints both slash commands and
/// move words, and highlights commands cyan and playable moves green.
#[derive(Clone)]
struct CliHelper;

impl CliHelper {
    fn pool_for(line: &str) -> &'static [&'static str] {
        if line.starts_with('/') {
            &COMMANDS
        } else {
            &MOVE_WORDS
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let candidates = completions_for(Self::pool_for(line), line)
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else if MOVE_WORDS.contains(&line.trim().to_ascii_lowercase().as_str()) {
            Owned(line.green().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        hint_for(CliHelper::pool_for(line), line)
    }
}

impl Validator for CliHelper {}

/// Stand-in suggester when no API key is configured: every call reports
/// the remote as unavailable, so the oracle plays the heuristic.
struct UnconfiguredSuggester;

#[async_trait]
impl MoveSuggester for UnconfiguredSuggester {
    async fn suggest_move(
        &self,
        _last_player_move: Move,
    ) -> showdown_core::error::Result<MoveSuggestion> {
        Err(ShowdownError::remote_unavailable("no API key configured"))
    }
}

fn move_emoji(mv: Move) -> &'static str {
    match mv {
        Move::Stone => "\u{1FAA8}",   // 🪨
        Move::Paper => "\u{1F4C4}",   // 📄
        Move::Scissor => "\u{2702}\u{FE0F}", // ✂️
    }
}

fn confidence_bar(confidence: u8) -> String {
    let filled = (confidence as usize) / 10;
    format!(
        "[{}{}] {}%",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(10usize.saturating_sub(filled)),
        confidence
    )
}

fn print_chart(series: &[ScorePoint]) {
    if series.is_empty() {
        println!("{}", "No rounds played yet.".bright_black());
        return;
    }
    println!("{}", "Score history".bright_yellow());
    for point in series {
        let you = "\u{2588}".repeat(point.player as usize);
        let ai = "\u{2588}".repeat(point.ai as usize);
        println!(
            "  #{:<3} you {} {}",
            point.round,
            format!("{} {}", you, point.player).green(),
            format!("| ai {} {}", ai, point.ai).red()
        );
    }
}

/// The main entry point for the Showdown readline REPL application.
///
/// This async function sets up a rustyline-based REPL that:
/// 1. Initializes the move oracle (remote agent + fallback) and controller
/// 2. Sets up an mpsc channel carrying presentation events to a print task
/// 3. Provides command completion for the slash commands
/// 4. Plays rounds in background tasks so the prompt never blocks
/// 5. Displays colored output for player, AI, and system messages
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // ===== Backend Initialization =====
    let file_config = load_file_config()?;

    let suggester: Arc<dyn MoveSuggester> = match OpenRouterApiAgent::try_from_env() {
        Ok(agent) => {
            let agent = match &file_config.model {
                Some(model) => agent.with_model(model.clone()),
                None => agent,
            };
            let agent = match &file_config.base_url {
                Some(base_url) => agent.with_base_url(base_url.clone()),
                None => agent,
            };
            Arc::new(agent)
        }
        Err(err) => {
            println!(
                "{}",
                format!("{err} - the AI will use the simple heuristic.").bright_black()
            );
            Arc::new(UnconfiguredSuggester)
        }
    };

    let mut oracle = MoveOracle::new(suggester);
    if let Some(secs) = file_config.request_timeout_secs {
        oracle = oracle.with_timeout(Duration::from_secs(secs));
    }

    // Create a channel carrying presentation events to the print task
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GameEvent>();
    let controller = Arc::new(RoundController::new(
        oracle,
        Arc::new(ChannelEventSink::new(event_tx)),
    ));
    if let Some(mode) = file_config.default_mode {
        controller.set_mode(mode).await;
    }

    // Spawn the event printer task
    let printer_controller = Arc::clone(&controller);
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                GameEvent::RoundResolved {
                    player_move,
                    ai_move,
                    outcome,
                    confidence,
                } => {
                    let result = match outcome {
                        Outcome::Player => format!(
                            "You Win! {} beats {}",
                            move_emoji(player_move),
                            move_emoji(ai_move)
                        )
                        .green(),
                        Outcome::Ai => format!(
                            "AI Wins! {} beats {}",
                            move_emoji(ai_move),
                            move_emoji(player_move)
                        )
                        .red(),
                        Outcome::Draw => {
                            format!("Draw! Both played {}", move_emoji(player_move)).yellow()
                        }
                    };
                    println!("{}", result);
                    println!(
                        "{}",
                        format!("AI confidence {}", confidence_bar(confidence)).bright_blue()
                    );

                    let state = printer_controller.snapshot().await;
                    let mood = mood_for(state.ai_score, state.player_score);
                    println!(
                        "{}  {}",
                        format!("You {} : {} AI", state.player_score, state.ai_score).bold(),
                        format!("[{mood}] {}", taunt_for(mood)).yellow().italic()
                    );
                }
                GameEvent::SessionReset => {
                    println!("{}", "Session reset. Scores cleared.".bright_green());
                }
            }
        }
    });

    // ===== REPL Setup =====
    let helper = CliHelper;
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Showdown ===".bright_magenta().bold());
    println!(
        "{}",
        "Play 'stone', 'paper', or 'scissor'. Commands: /mode <smart|easy>, /reset, /score, /chart, quit."
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if let Some(rest) = trimmed.strip_prefix("/mode") {
                    match rest.trim().parse::<GameMode>() {
                        Ok(mode) => {
                            controller.set_mode(mode).await;
                            println!("{}", format!("Mode set to {mode}.").bright_green());
                        }
                        Err(err) => println!("{}", err.to_string().red()),
                    }
                    continue;
                }

                if trimmed == "/reset" {
                    controller.reset().await;
                    continue;
                }

                if trimmed == "/score" {
                    let state = controller.snapshot().await;
                    let mood = mood_for(state.ai_score, state.player_score);
                    println!(
                        "{}",
                        format!(
                            "You {} : {} AI ({} draws, {} rounds, mode {}, AI mood {})",
                            state.player_score,
                            state.ai_score,
                            state.draw_count(),
                            state.rounds.len(),
                            state.mode,
                            mood
                        )
                        .bold()
                    );
                    continue;
                }

                if trimmed == "/chart" {
                    let state = controller.snapshot().await;
                    print_chart(&state.score_series());
                    continue;
                }

                match trimmed.parse::<Move>() {
                    Ok(player_move) => {
                        println!(
                            "{}",
                            format!("> You play {} {}", player_move, move_emoji(player_move))
                                .green()
                        );

                        // Spawn so the prompt stays responsive; the
                        // controller enforces one round at a time.
                        let controller = Arc::clone(&controller);
                        tokio::spawn(async move {
                            match controller.play_round(player_move).await {
                                Ok(_) => {} // the event printer reports the result
                                Err(ShowdownError::RoundInProgress) => println!(
                                    "{}",
                                    "Hold on - the AI is still thinking about the last round."
                                        .bright_black()
                                ),
                                Err(ShowdownError::SessionReset) => println!(
                                    "{}",
                                    "Round discarded: the session was reset.".bright_black()
                                ),
                                Err(err) => {
                                    eprintln!("{}", format!("Round failed: {err}").red())
                                }
                            }
                        });
                    }
                    Err(_) => {
                        println!("{}", "Unknown command".bright_black());
                    }
                }
            }
            Err(_) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_commands_and_moves_separately() {
        assert_eq!(completions_for(&COMMANDS, "/m"), vec!["/mode"]);
        assert_eq!(completions_for(&MOVE_WORDS, "s"), vec!["stone", "scissor"]);
        assert_eq!(completions_for(&MOVE_WORDS, "pa"), vec!["paper"]);
        assert!(completions_for(&MOVE_WORDS, "").is_empty());
        assert!(completions_for(&COMMANDS, "/quit").is_empty());
    }

    #[test]
    fn hints_finish_the_word() {
        assert_eq!(hint_for(&COMMANDS, "/re").as_deref(), Some("set"));
        assert_eq!(hint_for(&MOVE_WORDS, "pap").as_deref(), Some("er"));
        assert_eq!(hint_for(&MOVE_WORDS, "paper"), None); // already complete
        assert_eq!(hint_for(&COMMANDS, "/mode e"), None);
        assert_eq!(hint_for(&MOVE_WORDS, ""), None);
    }

    #[test]
    fn confidence_bar_never_underflows() {
        assert_eq!(confidence_bar(0), "[\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}] 0%");
        assert!(confidence_bar(55).contains("55%"));
        assert!(confidence_bar(100).contains("100%"));
        // Out-of-contract input must degrade, not panic.
        assert!(confidence_bar(255).contains("255%"));
    }
}
