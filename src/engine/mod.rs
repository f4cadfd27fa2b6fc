pub mod answer;
pub mod distractor;
pub mod queue;
pub mod stats;
