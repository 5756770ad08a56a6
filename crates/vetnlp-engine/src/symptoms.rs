//! Symptom extraction
//!
//! Every surface-pattern hit produces a candidate; candidates are resolved
//! to at most one `SymptomExtraction` per canonical key. The entry keeps the
//! context window of its most informative match, and later matches may fill
//! modifiers the first match left empty, but a key is never emitted twice.
//! Output keeps first-detected-position order.

use std::collections::HashMap;

use vetnlp_core::{ExtractionConfig, KeyPhrase, SymptomExtraction};
use vetnlp_lexicon::Lexicon;

/// Words that end a negation scope when scanning backwards
const CONTRAST_WORDS: [&str; 4] = ["but", "however", "though", "although"];

/// Resolved symptoms plus the spans of their chosen matches
#[derive(Debug, Clone)]
pub struct SymptomScan {
    pub symptoms: Vec<SymptomExtraction>,
    pub spans: Vec<KeyPhrase>,
}

#[derive(Debug)]
struct Candidate {
    entry_index: usize,
    start: usize,
    end: usize,
}

/// Extract and deduplicate all symptom mentions in the text
pub fn scan(text: &str, lexicon: &Lexicon, config: &ExtractionConfig) -> SymptomScan {
    let mut candidates = Vec::new();

    for (entry_index, entry) in lexicon.symptoms().iter().enumerate() {
        for pattern in &entry.patterns {
            for m in pattern.regex.find_iter(text) {
                candidates.push(Candidate {
                    entry_index,
                    start: m.start(),
                    end: m.end(),
                });
            }
        }
    }

    // Detection order: position in text, then lexicon order for equal starts
    candidates.sort_by_key(|c| (c.start, c.entry_index));

    let mut symptoms: Vec<SymptomExtraction> = Vec::new();
    let mut spans: Vec<KeyPhrase> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut best_evidence: Vec<usize> = Vec::new();

    for candidate in candidates {
        if is_negated(text, candidate.start, lexicon, config.negation_window) {
            continue;
        }

        let key = &lexicon.symptoms()[candidate.entry_index].key;
        let (ws, we) = window_bounds(text, candidate.start, candidate.end, config.context_window);
        let window = text[ws..we].trim().to_string();

        let duration = lexicon.duration_in(&window);
        let severity = lexicon.severity_in(&window);
        let frequency = lexicon.frequency_in(&window);
        let evidence = duration.is_some() as usize
            + severity.is_known() as usize
            + frequency.is_known() as usize;

        let span = KeyPhrase {
            text: text[candidate.start..candidate.end].to_string(),
            start: candidate.start,
            end: candidate.end,
        };

        match index_of.get(key) {
            None => {
                index_of.insert(key.clone(), symptoms.len());
                symptoms.push(SymptomExtraction {
                    symptom: key.clone(),
                    duration,
                    severity,
                    frequency,
                    context: window,
                });
                spans.push(span);
                best_evidence.push(evidence);
            }
            Some(&i) => {
                let existing = &mut symptoms[i];
                if existing.duration.is_none() {
                    existing.duration = duration;
                }
                if !existing.severity.is_known() {
                    existing.severity = severity;
                }
                if !existing.frequency.is_known() {
                    existing.frequency = frequency;
                }
                if evidence > best_evidence[i] {
                    existing.context = window;
                    spans[i] = span;
                    best_evidence[i] = evidence;
                }
            }
        }
    }

    SymptomScan { symptoms, spans }
}

/// Scan up to `window` words before the match for a negation cue. A
/// contrast word or sentence boundary between cue and match ends the scope.
fn is_negated(text: &str, match_start: usize, lexicon: &Lexicon, window: usize) -> bool {
    let preceding: Vec<&str> = text[..match_start].split_whitespace().collect();

    for word in preceding.iter().rev().take(window) {
        if word.contains(|c| matches!(c, '.' | ';' | '!' | '?')) {
            return false;
        }

        let normalized: String = word
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '\'')
            .collect::<String>()
            .to_lowercase();

        if CONTRAST_WORDS.contains(&normalized.as_str()) {
            return false;
        }
        if lexicon.negation_cues().iter().any(|c| c == &normalized) {
            return true;
        }
    }

    false
}

/// Clamp a padded window to the text, adjusted to char boundaries
fn window_bounds(text: &str, start: usize, end: usize, pad: usize) -> (usize, usize) {
    let mut ws = start.saturating_sub(pad);
    while ws > 0 && !text.is_char_boundary(ws) {
        ws -= 1;
    }
    let mut we = end.saturating_add(pad).min(text.len());
    while we < text.len() && !text.is_char_boundary(we) {
        we += 1;
    }
    (ws, we)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vetnlp_core::{Frequency, Severity};

    fn run(text: &str) -> SymptomScan {
        let lexicon = Lexicon::with_defaults().unwrap();
        scan(text, &lexicon, &ExtractionConfig::default())
    }

    fn keys(scan: &SymptomScan) -> Vec<&str> {
        scan.symptoms.iter().map(|s| s.symptom.as_str()).collect()
    }

    #[test]
    fn test_two_surface_forms_one_entry() {
        // "vomit" and "threw up" both map to the canonical key
        let scan = run("he started to vomit this morning and threw up again tonight");
        assert_eq!(keys(&scan), vec!["vomiting"]);
    }

    #[test]
    fn test_detection_order_is_position_order() {
        let scan = run("lethargic since Monday, now vomiting and itchy");
        assert_eq!(keys(&scan), vec!["lethargy", "vomiting", "itching"]);
    }

    #[test]
    fn test_modifiers_from_context_window() {
        let scan = run("severe vomiting for 3 days, happening twice a day");
        let vomiting = &scan.symptoms[0];
        assert_eq!(vomiting.severity, Severity::Severe);
        assert_eq!(vomiting.frequency, Frequency::Daily);
        assert_eq!(vomiting.duration.as_ref().unwrap().normalized(), "3 days");
    }

    #[test]
    fn test_later_match_fills_missing_modifiers() {
        // The two mentions sit far enough apart that their windows do not
        // overlap; the second supplies the duration the first lacked.
        let filler = "the rest of the visit notes were unremarkable and nothing else was observed over the weekend at home. ";
        let text = format!("mild itching was noted. {filler}scratching for 2 weeks now.");
        let scan = run(&text);
        let itching = scan
            .symptoms
            .iter()
            .find(|s| s.symptom == "itching")
            .unwrap();
        assert_eq!(itching.severity, Severity::Mild);
        assert_eq!(itching.duration.as_ref().unwrap().normalized(), "2 weeks");
    }

    #[test]
    fn test_negated_symptom_excluded() {
        let scan = run("no vomiting, but has diarrhea");
        assert_eq!(keys(&scan), vec!["diarrhea"]);
    }

    #[test]
    fn test_contrast_word_ends_negation_scope() {
        let scan = run("no fever but coughing a lot");
        assert!(keys(&scan).contains(&"cough"));
        assert!(!keys(&scan).contains(&"fever"));
    }

    #[test]
    fn test_negation_spans_conjunction() {
        let scan = run("there was no vomiting or diarrhea today");
        assert!(scan.symptoms.is_empty());
    }

    #[test]
    fn test_intrinsically_negative_phrase_is_positive_evidence() {
        let scan = run("he won't eat since yesterday");
        assert_eq!(keys(&scan), vec!["loss_of_appetite"]);
    }

    #[test]
    fn test_overlap_across_keys_allowed() {
        // "eye swelling" evidences both the ocular key and generic swelling
        let scan = run("noticeable eye swelling on the left side");
        assert!(keys(&scan).contains(&"eye_swelling"));
        assert!(keys(&scan).contains(&"swelling"));
    }

    #[test]
    fn test_no_symptoms_is_valid() {
        let scan = run("The weather is nice today.");
        assert!(scan.symptoms.is_empty());
        assert!(scan.spans.is_empty());
    }

    #[test]
    fn test_window_bounds_respect_char_boundaries() {
        let text = "éééé vomiting éééé";
        let m = text.find("vomiting").unwrap();
        let (ws, we) = window_bounds(text, m, m + "vomiting".len(), 3);
        // Slicing must not panic
        let _ = &text[ws..we];
    }
}
