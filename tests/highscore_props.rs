use math_quest::highscores::MAX_HIGH_SCORES;
use math_quest::platform::MemoryStore;
use math_quest::{GameMode, HighScores, Operation};
use proptest::prelude::*;

fn mode() -> impl Strategy<Value = GameMode> {
    prop_oneof![Just(GameMode::Classic), Just(GameMode::Challenge)]
}

fn operation() -> impl Strategy<Value = Operation> {
    proptest::sample::select(Operation::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Lists never exceed five entries and stay sorted best-first
    #[test]
    fn lists_stay_capped_and_sorted(
        entries in prop::collection::vec((mode(), operation(), 0u32..500), 0..80)
    ) {
        let mut hs = HighScores::new();
        for (mode, op, score) in entries {
            hs.record(mode, op, score);
            let scores = hs.scores(mode, op);
            prop_assert!(scores.len() <= MAX_HIGH_SCORES);
            prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
            prop_assert!(!scores.contains(&0));
        }
    }

    /// Each list holds exactly the best scores recorded for its pair
    #[test]
    fn lists_hold_best_scores(scores in prop::collection::vec(1u32..1000, 0..30)) {
        let mut hs = HighScores::new();
        for &s in &scores {
            hs.record(GameMode::Classic, Operation::Multiply, s);
        }
        let mut expected = scores.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        expected.truncate(MAX_HIGH_SCORES);
        prop_assert_eq!(hs.scores(GameMode::Classic, Operation::Multiply), expected.as_slice());
    }

    /// A zero score never changes the table
    #[test]
    fn zero_never_recorded(mode in mode(), op in operation(), prior in prop::collection::vec(1u32..100, 0..8)) {
        let mut hs = HighScores::new();
        for s in prior {
            hs.record(mode, op, s);
        }
        let before = hs.clone();
        prop_assert_eq!(hs.record(mode, op, 0), None);
        prop_assert_eq!(hs, before);
    }

    /// Saving and loading reproduces the table
    #[test]
    fn persisted_table_reloads(entries in prop::collection::vec((mode(), operation(), 1u32..500), 0..40)) {
        let mut hs = HighScores::new();
        for (mode, op, score) in entries {
            hs.record(mode, op, score);
        }
        let mut store = MemoryStore::new();
        hs.save(&mut store);
        prop_assert_eq!(HighScores::load(&store), hs);
    }
}
