//! Key-phrase collection
//!
//! Derives display phrases from the spans the extractors already matched
//! (symptom surfaces, breed, age, weight). Purely derivative; an empty
//! result is valid.

use vetnlp_core::KeyPhrase;

/// Merge extractor spans into a deduplicated, position-ordered phrase list
pub fn collect(
    demographic_spans: Vec<KeyPhrase>,
    symptom_spans: Vec<KeyPhrase>,
    cap: usize,
) -> Vec<KeyPhrase> {
    let mut phrases: Vec<KeyPhrase> = demographic_spans
        .into_iter()
        .chain(symptom_spans)
        .collect();
    phrases.sort_by_key(|p| (p.start, p.end));

    let mut seen: Vec<String> = Vec::new();
    let mut result = Vec::new();
    for phrase in phrases {
        let lower = phrase.text.to_lowercase();
        if seen.contains(&lower) {
            continue;
        }
        seen.push(lower);
        result.push(phrase);
        if result.len() == cap {
            break;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(text: &str, start: usize) -> KeyPhrase {
        KeyPhrase {
            text: text.to_string(),
            start,
            end: start + text.len(),
        }
    }

    #[test]
    fn test_position_order_and_dedup() {
        let result = collect(
            vec![phrase("golden retriever", 20)],
            vec![phrase("vomiting", 45), phrase("Vomiting", 80), phrase("diarrhea", 60)],
            10,
        );
        let texts: Vec<&str> = result.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["golden retriever", "vomiting", "diarrhea"]);
    }

    #[test]
    fn test_cap_applied() {
        let spans: Vec<KeyPhrase> = (0..20).map(|i| phrase(&format!("p{i}"), i * 5)).collect();
        let result = collect(spans, vec![], 10);
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn test_empty_is_valid() {
        assert!(collect(vec![], vec![], 10).is_empty());
    }
}
