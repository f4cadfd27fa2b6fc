use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub mod csv;
pub mod fetch;

/// One vocabulary entry. `word` is the identity key; `word` and `meaning`
/// are required, everything else defaults to the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub kana: String,
    pub romaji: String,
    pub tone: String,
    pub meaning: String,
    pub category: String,
}

/// Drop repeated `word` keys, keeping the first record. The engine's
/// bookkeeping assumes unique words, so this runs before any list reaches it.
pub fn dedupe_words(words: Vec<WordRecord>) -> Vec<WordRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    words
        .into_iter()
        .filter(|record| seen.insert(record.word.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_keeps_first_record() {
        let words = vec![
            WordRecord {
                word: "犬".to_string(),
                meaning: "dog".to_string(),
                ..WordRecord::default()
            },
            WordRecord {
                word: "犬".to_string(),
                meaning: "hound".to_string(),
                ..WordRecord::default()
            },
            WordRecord {
                word: "猫".to_string(),
                meaning: "cat".to_string(),
                ..WordRecord::default()
            },
        ];
        let deduped = dedupe_words(words);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].meaning, "dog");
    }
}
