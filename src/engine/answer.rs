use crate::engine::stats::{StatsSnapshot, WordStat};

/// Result of merging one quiz answer into the stats, returned to the caller
/// before any durable write is issued (the optimistic local update).
#[derive(Clone, Debug)]
pub struct AnswerOutcome {
    pub stats: StatsSnapshot,
    pub stat: WordStat,
    pub correct: bool,
    pub score_delta: u32,
}

/// Pure local merge of a submitted answer. Works on a copy of the snapshot;
/// the caller's snapshot is never mutated in place.
///
/// A correct answer resets the failure count to zero: mastery recovery is
/// immediate, not gradual.
pub fn process_answer(stats: &StatsSnapshot, word: &str, submitted: &str) -> AnswerOutcome {
    let correct = submitted == word;

    let prev = stats.get(word);
    let mut successes = prev.successes;
    let mut failures = prev.failures();

    if correct {
        successes += 1;
        failures = 0;
    } else {
        failures += 1;
    }

    let stat = WordStat {
        successes,
        attempts: successes + failures,
    };

    let mut updated = stats.clone();
    updated.set(word, stat);

    AnswerOutcome {
        stats: updated,
        stat,
        correct,
        score_delta: u32::from(correct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_correct_answer() {
        let stats = StatsSnapshot::default();
        let outcome = process_answer(&stats, "犬", "犬");
        assert!(outcome.correct);
        assert_eq!(outcome.score_delta, 1);
        assert_eq!(
            outcome.stat,
            WordStat {
                successes: 1,
                attempts: 1
            }
        );
    }

    #[test]
    fn test_first_incorrect_answer() {
        let stats = StatsSnapshot::default();
        let outcome = process_answer(&stats, "犬", "猫");
        assert!(!outcome.correct);
        assert_eq!(outcome.score_delta, 0);
        assert_eq!(
            outcome.stat,
            WordStat {
                successes: 0,
                attempts: 1
            }
        );
    }

    #[test]
    fn test_correct_after_failure_resets_failures() {
        // One prior failure: {successes: 0, attempts: 1}.
        let mut stats = StatsSnapshot::default();
        stats.set(
            "犬",
            WordStat {
                successes: 0,
                attempts: 1,
            },
        );
        let outcome = process_answer(&stats, "犬", "犬");
        assert_eq!(
            outcome.stat,
            WordStat {
                successes: 1,
                attempts: 1
            }
        );
        assert_eq!(outcome.stat.failures(), 0);
    }

    #[test]
    fn test_attempts_equals_successes_plus_failures_always() {
        let mut stats = StatsSnapshot::default();
        for submitted in ["犬", "猫", "猫", "犬", "犬", "鳥"] {
            let outcome = process_answer(&stats, "犬", submitted);
            let stat = outcome.stat;
            assert_eq!(stat.attempts, stat.successes + stat.failures());
            stats = outcome.stats;
        }
    }

    #[test]
    fn test_repeated_correct_never_decreases_successes() {
        let mut stats = StatsSnapshot::default();
        let mut last = 0;
        for _ in 0..5 {
            let outcome = process_answer(&stats, "犬", "犬");
            assert!(outcome.stat.successes > last);
            assert_eq!(outcome.stat.failures(), 0);
            last = outcome.stat.successes;
            stats = outcome.stats;
        }
    }

    #[test]
    fn test_caller_snapshot_not_mutated() {
        let mut stats = StatsSnapshot::default();
        stats.set(
            "犬",
            WordStat {
                successes: 2,
                attempts: 3,
            },
        );
        let before = stats.get("犬");
        let _ = process_answer(&stats, "犬", "犬");
        assert_eq!(stats.get("犬"), before);
    }
}
