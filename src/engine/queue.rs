use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::engine::stats::StatsSnapshot;
use crate::vocab::WordRecord;

/// One recorded failure outweighs several recorded successes, so recently
/// wrong words are remediated before well-known ones are reinforced.
pub const FAILURE_WEIGHT: i64 = 5;

/// Score for a word that has never been answered. Sits above words with only
/// successes (negative scores) and below words with any recorded failure.
pub const NEW_WORD_SCORE: i64 = 2;

pub fn priority_score(stats: &StatsSnapshot, word: &str) -> i64 {
    match stats.entry(word) {
        None => NEW_WORD_SCORE,
        Some(stat) => stat.failures() as i64 * FAILURE_WEIGHT - stat.successes as i64,
    }
}

/// Build a bounded, prioritized, shuffled practice queue.
///
/// Mastered words (`successes >= mastery_threshold`) are excluded, the rest
/// are ranked by priority score descending, the top `session_size` are taken,
/// and the selection is shuffled so presentation order does not reveal rank.
/// Total over its inputs: an empty candidate pool yields an empty queue.
pub fn build_queue(
    all_words: &[WordRecord],
    stats: &StatsSnapshot,
    session_size: usize,
    mastery_threshold: u32,
    rng: &mut SmallRng,
) -> Vec<WordRecord> {
    let mut scored: Vec<(i64, &WordRecord)> = all_words
        .iter()
        .filter(|record| {
            stats
                .entry(&record.word)
                .is_none_or(|s| s.successes < mastery_threshold)
        })
        .map(|record| (priority_score(stats, &record.word), record))
        .collect();

    scored.sort_unstable_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(session_size);

    let mut queue: Vec<WordRecord> = scored.into_iter().map(|(_, r)| r.clone()).collect();
    queue.shuffle(rng);
    queue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stats::WordStat;
    use rand::SeedableRng;

    fn record(word: &str) -> WordRecord {
        WordRecord {
            word: word.to_string(),
            meaning: format!("meaning of {word}"),
            ..WordRecord::default()
        }
    }

    fn stat(successes: u32, failures: u32) -> WordStat {
        WordStat {
            successes,
            attempts: successes + failures,
        }
    }

    #[test]
    fn test_mastered_word_excluded_regardless_of_failures() {
        let words = vec![record("犬"), record("猫")];
        let mut stats = StatsSnapshot::default();
        stats.set("犬", stat(7, 10));
        let mut rng = SmallRng::seed_from_u64(1);
        let queue = build_queue(&words, &stats, 20, 7, &mut rng);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].word, "猫");
    }

    #[test]
    fn test_failures_outrank_successes() {
        // A: 2 failures, 0 successes -> 10. B: 0 failures, 3 successes -> -3.
        let mut stats = StatsSnapshot::default();
        stats.set("A", stat(0, 2));
        stats.set("B", stat(3, 0));
        assert_eq!(priority_score(&stats, "A"), 10);
        assert_eq!(priority_score(&stats, "B"), -3);

        let words = vec![record("A"), record("B")];
        let mut rng = SmallRng::seed_from_u64(2);
        let queue = build_queue(&words, &stats, 1, 7, &mut rng);
        assert_eq!(queue[0].word, "A");
    }

    #[test]
    fn test_new_word_ranks_between_failed_and_known() {
        let mut stats = StatsSnapshot::default();
        stats.set("failed", stat(0, 1)); // score 5
        stats.set("known", stat(1, 0)); // score -1
        assert!(priority_score(&stats, "failed") > priority_score(&stats, "new"));
        assert!(priority_score(&stats, "new") > priority_score(&stats, "known"));
        assert_eq!(priority_score(&stats, "new"), NEW_WORD_SCORE);
    }

    #[test]
    fn test_queue_is_bounded_by_session_size_and_pool() {
        let words: Vec<WordRecord> = (0..30).map(|i| record(&format!("w{i}"))).collect();
        let stats = StatsSnapshot::default();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(build_queue(&words, &stats, 20, 7, &mut rng).len(), 20);
        assert_eq!(build_queue(&words[..5], &stats, 20, 7, &mut rng).len(), 5);
    }

    #[test]
    fn test_all_mastered_yields_empty_queue() {
        let words = vec![record("犬"), record("猫")];
        let mut stats = StatsSnapshot::default();
        stats.set("犬", stat(8, 0));
        stats.set("猫", stat(9, 1));
        let mut rng = SmallRng::seed_from_u64(4);
        assert!(build_queue(&words, &stats, 20, 7, &mut rng).is_empty());
    }

    #[test]
    fn test_tied_new_words_selected_without_duplicates() {
        let words = vec![record("A"), record("B"), record("C"), record("D")];
        let stats = StatsSnapshot::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let queue = build_queue(&words, &stats, 2, 7, &mut rng);
        assert_eq!(queue.len(), 2);
        assert_ne!(queue[0].word, queue[1].word);
        for entry in &queue {
            assert!(words.iter().any(|w| w.word == entry.word));
        }
    }

    #[test]
    fn test_highest_priority_words_survive_truncation() {
        // Ten known words plus two with failures; a session of 2 must pick
        // the two failed ones no matter how the shuffle lands.
        let mut words: Vec<WordRecord> = (0..10).map(|i| record(&format!("k{i}"))).collect();
        words.push(record("f1"));
        words.push(record("f2"));
        let mut stats = StatsSnapshot::default();
        for i in 0..10 {
            stats.set(&format!("k{i}"), stat(2, 0));
        }
        stats.set("f1", stat(0, 3));
        stats.set("f2", stat(1, 2));
        let mut rng = SmallRng::seed_from_u64(6);
        let queue = build_queue(&words, &stats, 2, 7, &mut rng);
        let mut picked: Vec<&str> = queue.iter().map(|r| r.word.as_str()).collect();
        picked.sort_unstable();
        assert_eq!(picked, vec!["f1", "f2"]);
    }
}
