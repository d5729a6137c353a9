//! State-machine invariants under arbitrary drive sequences.
//!
//! Whatever order submissions, garbage input, digit mashing, and time
//! advances arrive in, the counters stay within bounds, the terminal state
//! freezes them, and a match produces at most one win.

use proptest::prelude::*;

use math_tug::{GameMode, MatchEngine, MatchEvent, Side};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_for_arbitrary_drives(
        seed in any::<u64>(),
        ai_enabled in any::<bool>(),
        actions in prop::collection::vec(0u8..=6, 1..80),
    ) {
        let mut engine = MatchEngine::new(seed);
        engine.set_ai_enabled(ai_enabled);
        engine.start_game(GameMode::Blitz, 1, 10).unwrap();

        let mut frozen: Option<(u32, u32)> = None;

        for action in actions {
            match action {
                0 => {
                    // Honest answer from whoever holds the turn.
                    let side = engine.current_turn();
                    if let Some(q) = engine.question(side) {
                        let answer = q.answer.to_string();
                        engine.submit_answer(side, &answer);
                    }
                }
                1 => engine.submit_answer(Side::Left, "999"),
                2 => engine.submit_answer(Side::Right, "garbage"),
                3 => engine.advance(777),
                4 => engine.advance(3_000),
                5 => engine.push_digit(Side::Left, '5'),
                _ => engine.clear_input(Side::Right),
            }

            let steps = (engine.steps(Side::Left), engine.steps(Side::Right));
            prop_assert!(steps.0 <= engine.total_steps());
            prop_assert!(steps.1 <= engine.total_steps());

            // Terminal state is terminal: once over, nothing moves.
            if let Some(f) = frozen {
                prop_assert_eq!(steps, f);
            }
            if engine.is_game_over() && frozen.is_none() {
                frozen = Some(steps);
            }
        }

        let wins = engine
            .history()
            .iter()
            .filter(|e| matches!(e, MatchEvent::Win { .. }))
            .count();
        prop_assert!(wins <= 1, "a match must produce at most one win");
        prop_assert_eq!(wins == 1, engine.is_game_over());
    }
}
