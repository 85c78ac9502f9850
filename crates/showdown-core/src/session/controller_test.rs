use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{Result, ShowdownError};
use crate::game::{FALLBACK_CONFIDENCE, Move, MoveSuggestion, Outcome, choose_fallback};
use crate::oracle::{MoveOracle, MoveSuggester};
use crate::session::{
    EventSink, GameEvent, GameMode, NullEventSink, RoundController, RoundPhase,
};

// Mock suggesters for driving the controller without a network.

struct FixedSuggester(MoveSuggestion);

#[async_trait]
impl MoveSuggester for FixedSuggester {
    async fn suggest_move(&self, _last: Move) -> Result<MoveSuggestion> {
        Ok(self.0)
    }
}

struct FailingSuggester;

#[async_trait]
impl MoveSuggester for FailingSuggester {
    async fn suggest_move(&self, _last: Move) -> Result<MoveSuggestion> {
        Err(ShowdownError::remote_unavailable("no route to host"))
    }
}

/// Suspends until the test opens the gate, so a round can be held in the
/// AwaitingAiMove phase deliberately.
struct GatedSuggester {
    gate: Arc<Notify>,
}

#[async_trait]
impl MoveSuggester for GatedSuggester {
    async fn suggest_move(&self, _last: Move) -> Result<MoveSuggestion> {
        self.gate.notified().await;
        Ok(MoveSuggestion {
            mv: Move::Stone,
            confidence: 70,
        })
    }
}

// Mock sink recording every published event.

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<GameEvent>>,
}

impl EventSink for RecordingSink {
    fn publish(&self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn controller_with(
    suggester: Arc<dyn MoveSuggester>,
    sink: Arc<dyn EventSink>,
) -> RoundController {
    RoundController::new(MoveOracle::new(suggester), sink)
}

async fn wait_for_pending(controller: &RoundController) {
    while controller.snapshot().await.phase != RoundPhase::AwaitingAiMove {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn plays_one_round_and_records_it() {
    let sink = Arc::new(RecordingSink::default());
    let controller = controller_with(
        Arc::new(FixedSuggester(MoveSuggestion {
            mv: Move::Scissor,
            confidence: 82,
        })),
        Arc::clone(&sink) as Arc<dyn EventSink>,
    );

    let round = controller.play_round(Move::Stone).await.unwrap();
    assert_eq!(round.player_move, Move::Stone);
    assert_eq!(round.ai_move, Move::Scissor);
    assert_eq!(round.outcome, Outcome::Player);
    assert_eq!(round.confidence, 82);

    let state = controller.snapshot().await;
    assert_eq!(state.player_score, 1);
    assert_eq!(state.ai_score, 0);
    assert_eq!(state.rounds.len(), 1);
    assert_eq!(state.phase, RoundPhase::Idle);

    let events = sink.events.lock().unwrap();
    assert_eq!(
        events.as_slice(),
        [GameEvent::RoundResolved {
            player_move: Move::Stone,
            ai_move: Move::Scissor,
            outcome: Outcome::Player,
            confidence: 82,
        }]
    );
}

#[tokio::test]
async fn oracle_failure_is_absorbed_into_a_fallback_round() {
    let controller = controller_with(Arc::new(FailingSuggester), Arc::new(NullEventSink));

    // Stone, Stone, Paper against a forced-fallback opponent.
    for mv in [Move::Stone, Move::Stone, Move::Paper] {
        let round = controller.play_round(mv).await.unwrap();
        assert_eq!(round.confidence, FALLBACK_CONFIDENCE);
    }

    let state = controller.snapshot().await;
    assert_eq!(state.rounds.len(), 3);
    assert_eq!(state.move_counts.count(Move::Stone), 2);
    assert_eq!(state.move_counts.count(Move::Paper), 1);
    assert_eq!(state.move_counts.count(Move::Scissor), 0);
    assert_eq!(state.move_counts.most_played(), Some(Move::Stone));

    // The heuristic's next suggestion counters the favorite move.
    assert_eq!(choose_fallback(&state.move_counts).mv, Move::Paper);
}

#[tokio::test]
async fn invariants_hold_over_a_mixed_sequence() {
    let controller = controller_with(
        Arc::new(FixedSuggester(MoveSuggestion {
            mv: Move::Paper,
            confidence: 60,
        })),
        Arc::new(NullEventSink),
    );

    for mv in [Move::Stone, Move::Paper, Move::Scissor, Move::Paper] {
        controller.play_round(mv).await.unwrap();
    }

    let state = controller.snapshot().await;
    assert_eq!(state.move_counts.total() as usize, state.rounds.len());
    assert_eq!(
        state.player_score as usize + state.ai_score as usize + state.draw_count(),
        state.rounds.len()
    );
}

#[tokio::test]
async fn second_submission_is_rejected_while_a_round_is_pending() {
    let gate = Arc::new(Notify::new());
    let controller = Arc::new(controller_with(
        Arc::new(GatedSuggester {
            gate: Arc::clone(&gate),
        }),
        Arc::new(NullEventSink),
    ));

    let pending = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.play_round(Move::Paper).await })
    };
    wait_for_pending(&controller).await;

    let rejected = controller.play_round(Move::Scissor).await;
    assert!(matches!(rejected, Err(ShowdownError::RoundInProgress)));

    gate.notify_one();
    let round = pending.await.unwrap().unwrap();
    assert_eq!(round.player_move, Move::Paper);

    // Only the first round made it into the history.
    let state = controller.snapshot().await;
    assert_eq!(state.rounds.len(), 1);
    assert_eq!(state.phase, RoundPhase::Idle);
}

#[tokio::test]
async fn reset_discards_an_in_flight_round() {
    let gate = Arc::new(Notify::new());
    let sink = Arc::new(RecordingSink::default());
    let controller = Arc::new(controller_with(
        Arc::new(GatedSuggester {
            gate: Arc::clone(&gate),
        }),
        Arc::clone(&sink) as Arc<dyn EventSink>,
    ));

    let pending = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.play_round(Move::Stone).await })
    };
    wait_for_pending(&controller).await;

    controller.reset().await;
    gate.notify_one();

    let stale = pending.await.unwrap();
    assert!(matches!(stale, Err(ShowdownError::SessionReset)));

    // The stale completion must not have mutated the freshly-reset state.
    let state = controller.snapshot().await;
    assert_eq!(state.player_score, 0);
    assert_eq!(state.ai_score, 0);
    assert!(state.rounds.is_empty());
    assert_eq!(state.phase, RoundPhase::Idle);

    let events = sink.events.lock().unwrap();
    assert_eq!(events.as_slice(), [GameEvent::SessionReset]);
}

#[tokio::test]
async fn reset_clears_state_regardless_of_history() {
    let controller = controller_with(
        Arc::new(FixedSuggester(MoveSuggestion {
            mv: Move::Stone,
            confidence: 64,
        })),
        Arc::new(NullEventSink),
    );
    controller.set_mode(GameMode::Easy).await;
    for _ in 0..3 {
        controller.play_round(Move::Paper).await.unwrap();
    }

    controller.reset().await;

    let state = controller.snapshot().await;
    assert_eq!(state.player_score, 0);
    assert_eq!(state.ai_score, 0);
    assert!(state.rounds.is_empty());
    assert_eq!(state.move_counts.total(), 0);
    assert_eq!(state.mode, GameMode::Easy);
}
