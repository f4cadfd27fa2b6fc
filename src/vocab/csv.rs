use crate::vocab::WordRecord;

/// Parse a vocabulary CSV export into word records.
///
/// The first line is a header and is skipped. Fields may be double-quoted to
/// protect embedded commas. Expected column order:
/// word, kana, romaji, tone, meaning, category. Missing trailing columns
/// default to empty, extra columns are ignored. Rows without both `word` and
/// `meaning` are dropped silently.
pub fn parse_csv(text: &str) -> Vec<WordRecord> {
    let mut records = Vec::new();

    for line in text.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_line(line);
        let field = |i: usize| fields.get(i).cloned().unwrap_or_default();

        let record = WordRecord {
            word: field(0),
            kana: field(1),
            romaji: field(2),
            tone: field(3),
            meaning: field(4),
            category: field(5),
        };

        if !record.word.is_empty() && !record.meaning.is_empty() {
            records.push(record);
        }
    }

    records
}

fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quote = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quote = !in_quote,
            ',' if !in_quote => {
                fields.push(std::mem::take(&mut field).trim().to_string());
            }
            _ => field.push(ch),
        }
    }
    fields.push(field.trim().to_string());

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_skipped() {
        let csv = "word,kana,romaji,tone,meaning,category\n犬,いぬ,inu,,dog,animals\n";
        let records = parse_csv(csv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word, "犬");
        assert_eq!(records[0].meaning, "dog");
        assert_eq!(records[0].category, "animals");
    }

    #[test]
    fn test_quoted_field_with_comma() {
        let csv = "word,kana,romaji,tone,meaning,category\n先生,せんせい,sensei,,\"teacher, master\",people\n";
        let records = parse_csv(csv);
        assert_eq!(records[0].meaning, "teacher, master");
        assert_eq!(records[0].category, "people");
    }

    #[test]
    fn test_rows_missing_word_or_meaning_dropped() {
        let csv = "word,kana,romaji,tone,meaning,category\n\
                   ,いぬ,inu,,dog,animals\n\
                   猫,ねこ,neko,,,animals\n\
                   鳥,とり,tori,,bird,animals\n";
        let records = parse_csv(csv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word, "鳥");
    }

    #[test]
    fn test_missing_trailing_columns_default_empty() {
        let csv = "word,kana,romaji,tone,meaning\n犬,いぬ,inu,,dog\n";
        let records = parse_csv(csv);
        assert_eq!(records[0].category, "");
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let csv = "word,kana,romaji,tone,meaning,category\r\n犬,いぬ,inu,,dog,animals\r\n\r\n猫,ねこ,neko,,cat,animals\r\n";
        let records = parse_csv(csv);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("word,kana,romaji,tone,meaning,category\n").is_empty());
    }
}
