use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::vocab::WordRecord;

pub const OPTION_COUNT: usize = 4;

/// Pick 3 distractors from all *other* loaded words (not just the session
/// queue), mix in the target, and shuffle the 4-item set for display.
/// Returns None when fewer than 4 distinct words are loaded; callers guard
/// for that before offering a session.
pub fn build_options(
    all_words: &[WordRecord],
    target: &WordRecord,
    rng: &mut SmallRng,
) -> Option<Vec<WordRecord>> {
    let mut others: Vec<&WordRecord> = all_words
        .iter()
        .filter(|record| record.word != target.word)
        .collect();
    if others.len() < OPTION_COUNT - 1 {
        return None;
    }

    others.shuffle(rng);
    let mut options: Vec<WordRecord> = others
        .into_iter()
        .take(OPTION_COUNT - 1)
        .cloned()
        .collect();
    options.push(target.clone());
    options.shuffle(rng);
    Some(options)
}
