use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::quiz::QuizState;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: u32,
    pub total: usize,
    pub accuracy: f64,
    pub timestamp: DateTime<Utc>,
}

impl SessionResult {
    pub fn from_quiz(quiz: &QuizState) -> Self {
        let total = quiz.queue.len();
        let accuracy = if total == 0 {
            0.0
        } else {
            quiz.score as f64 / total as f64 * 100.0
        };
        Self {
            score: quiz.score,
            total,
            accuracy,
            timestamp: Utc::now(),
        }
    }
}
