use std::time::Instant;

use crate::vocab::WordRecord;

/// How long a revealed answer stays on screen before the session advances.
pub const REVEAL_MILLIS: u64 = 1500;

/// State of one quiz session. The queue is built once at session start,
/// consumed by index, and never mutated. Only one answer is in flight at a
/// time: while `selected` is set, further input is ignored until the reveal
/// delay elapses and the session advances.
pub struct QuizState {
    pub queue: Vec<WordRecord>,
    pub index: usize,
    pub options: Vec<WordRecord>,
    pub score: u32,
    pub selected: Option<usize>,
    pub answer_correct: Option<bool>,
    pub reveal_deadline: Option<Instant>,
}

impl QuizState {
    pub fn new(queue: Vec<WordRecord>) -> Self {
        Self {
            queue,
            index: 0,
            options: Vec::new(),
            score: 0,
            selected: None,
            answer_correct: None,
            reveal_deadline: None,
        }
    }

    pub fn current(&self) -> Option<&WordRecord> {
        self.queue.get(self.index)
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.queue.len()
    }

    pub fn awaiting_answer(&self) -> bool {
        self.selected.is_none() && !self.is_complete()
    }

    pub fn progress(&self) -> f64 {
        if self.queue.is_empty() {
            return 0.0;
        }
        self.index as f64 / self.queue.len() as f64
    }

    /// Record a revealed answer; the app advances after the deadline.
    pub fn reveal(&mut self, option_index: usize, correct: bool) {
        self.selected = Some(option_index);
        self.answer_correct = Some(correct);
        self.score += u32::from(correct);
        self.reveal_deadline =
            Some(Instant::now() + std::time::Duration::from_millis(REVEAL_MILLIS));
    }

    /// Collapse the remaining reveal delay so the next tick advances.
    pub fn skip_reveal(&mut self) {
        if self.selected.is_some() {
            self.reveal_deadline = Some(Instant::now());
        }
    }

    pub fn reveal_elapsed(&self) -> bool {
        self.reveal_deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    pub fn advance(&mut self) {
        self.index += 1;
        self.selected = None;
        self.answer_correct = None;
        self.reveal_deadline = None;
        self.options.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(word: &str) -> WordRecord {
        WordRecord {
            word: word.to_string(),
            meaning: format!("meaning of {word}"),
            ..WordRecord::default()
        }
    }

    #[test]
    fn test_new_session() {
        let quiz = QuizState::new(vec![record("犬"), record("猫")]);
        assert_eq!(quiz.current().unwrap().word, "犬");
        assert!(quiz.awaiting_answer());
        assert!(!quiz.is_complete());
        assert_eq!(quiz.progress(), 0.0);
    }

    #[test]
    fn test_reveal_blocks_further_answers() {
        let mut quiz = QuizState::new(vec![record("犬"), record("猫")]);
        quiz.reveal(0, true);
        assert!(!quiz.awaiting_answer());
        assert_eq!(quiz.score, 1);
    }

    #[test]
    fn test_advance_through_queue() {
        let mut quiz = QuizState::new(vec![record("犬"), record("猫")]);
        quiz.reveal(0, true);
        quiz.advance();
        assert_eq!(quiz.current().unwrap().word, "猫");
        assert!(quiz.awaiting_answer());
        quiz.reveal(1, false);
        quiz.advance();
        assert!(quiz.is_complete());
        assert_eq!(quiz.score, 1);
    }

    #[test]
    fn test_skip_reveal_elapses_immediately() {
        let mut quiz = QuizState::new(vec![record("犬")]);
        quiz.reveal(0, true);
        assert!(!quiz.reveal_elapsed());
        quiz.skip_reveal();
        assert!(quiz.reveal_elapsed());
    }

    #[test]
    fn test_skip_reveal_without_answer_is_noop() {
        let mut quiz = QuizState::new(vec![record("犬")]);
        quiz.skip_reveal();
        assert!(!quiz.reveal_elapsed());
    }

    #[test]
    fn test_empty_queue_is_complete() {
        let quiz = QuizState::new(Vec::new());
        assert!(quiz.is_complete());
        assert!(!quiz.awaiting_answer());
        assert!(quiz.current().is_none());
    }
}
