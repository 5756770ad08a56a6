//! Demographic extraction
//!
//! For each field the lexicon's patterns are tried in priority order and the
//! first successful match wins; later, lower-priority matches never
//! overwrite a field. Absence is a valid result, not an error.

use vetnlp_core::{Age, KeyPhrase, PatientInfo, TimeUnit, Weight};
use vetnlp_lexicon::Lexicon;

const LB_TO_KG: f64 = 0.453_592;

/// Demographics plus the spans that evidenced them (for key phrases)
#[derive(Debug, Clone)]
pub struct DemographicScan {
    pub info: PatientInfo,
    pub spans: Vec<KeyPhrase>,
}

/// Extract all demographic fields from the text
pub fn scan(text: &str, lexicon: &Lexicon) -> DemographicScan {
    let mut spans = Vec::new();

    let breed = extract_breed(text, lexicon, &mut spans);
    let animal_type = extract_animal_type(text, lexicon, breed.as_deref());
    let age = extract_age(text, lexicon, &mut spans);
    let gender = extract_gender(text, lexicon);
    let weight = extract_weight(text, lexicon, &mut spans);

    DemographicScan {
        info: PatientInfo {
            animal_type,
            age,
            breed,
            gender,
            weight,
        },
        spans,
    }
}

/// Direct species cues win; a matched breed implies its species otherwise
fn extract_animal_type(text: &str, lexicon: &Lexicon, breed: Option<&str>) -> Option<String> {
    for (species, cues) in lexicon.species_cues() {
        if cues.iter().any(|p| p.regex.is_match(text)) {
            return Some(species.clone());
        }
    }

    breed.and_then(|name| {
        lexicon
            .breeds()
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.species.clone())
    })
}

fn extract_breed(text: &str, lexicon: &Lexicon, spans: &mut Vec<KeyPhrase>) -> Option<String> {
    for breed in lexicon.breeds() {
        if let Some(m) = breed.regex.find(text) {
            spans.push(KeyPhrase {
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            });
            return Some(breed.name.clone());
        }
    }
    None
}

fn extract_age(text: &str, lexicon: &Lexicon, spans: &mut Vec<KeyPhrase>) -> Option<Age> {
    for pattern in lexicon.age_patterns() {
        for caps in pattern.captures_iter(text) {
            let full = caps.get(0)?;
            let value: u32 = match caps.get(1).and_then(|m| m.as_str().parse().ok()) {
                Some(v) => v,
                None => continue,
            };
            let unit = match caps.get(2).and_then(|m| TimeUnit::parse(m.as_str())) {
                Some(u) => u,
                None => continue,
            };

            spans.push(KeyPhrase {
                text: full.as_str().to_string(),
                start: full.start(),
                end: full.end(),
            });
            return Some(Age {
                raw: full.as_str().to_string(),
                value,
                unit,
            });
        }
    }
    None
}

fn extract_gender(text: &str, lexicon: &Lexicon) -> Option<String> {
    for (gender, pattern) in lexicon.gender_patterns() {
        if pattern.is_match(text) {
            return Some(gender.clone());
        }
    }
    None
}

fn extract_weight(text: &str, lexicon: &Lexicon, spans: &mut Vec<KeyPhrase>) -> Option<Weight> {
    for pattern in lexicon.weight_patterns() {
        for caps in pattern.captures_iter(text) {
            let full = caps.get(0)?;
            let value: f64 = match caps.get(1).and_then(|m| m.as_str().parse().ok()) {
                Some(v) => v,
                None => continue,
            };
            let unit = caps.get(2)?.as_str().to_lowercase();

            let kilograms = if unit.starts_with('k') {
                value
            } else {
                value * LB_TO_KG
            };

            spans.push(KeyPhrase {
                text: full.as_str().to_string(),
                start: full.start(),
                end: full.end(),
            });
            return Some(Weight {
                raw: full.as_str().to_string(),
                kilograms: (kilograms * 100.0).round() / 100.0,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::with_defaults().unwrap()
    }

    #[test]
    fn test_direct_species_cue() {
        let scan = scan("my dog is unwell", &lexicon());
        assert_eq!(scan.info.animal_type.as_deref(), Some("dog"));
        assert!(scan.info.breed.is_none());
    }

    #[test]
    fn test_breed_implies_species() {
        let scan = scan("my golden retriever is unwell", &lexicon());
        assert_eq!(scan.info.breed.as_deref(), Some("golden retriever"));
        assert_eq!(scan.info.animal_type.as_deref(), Some("dog"));
    }

    #[test]
    fn test_direct_cue_beats_breed_inference() {
        // "siamese" implies cat, but the direct "dog" cue has priority
        let scan = scan("a dog that lives with a siamese", &lexicon());
        assert_eq!(scan.info.animal_type.as_deref(), Some("dog"));
    }

    #[test]
    fn test_age_normalization() {
        let scan = scan("a 5 year old tabby", &lexicon());
        let age = scan.info.age.unwrap();
        assert_eq!(age.raw, "5 year old");
        assert_eq!(age.normalized(), "5 years");
    }

    #[test]
    fn test_hyphenated_age() {
        let scan = scan("an 8-month-old puppy", &lexicon());
        let age = scan.info.age.unwrap();
        assert_eq!(age.value, 8);
        assert_eq!(age.normalized(), "8 months");
    }

    #[test]
    fn test_gender_male_from_female_text_not_matched() {
        let scan = scan("she is a female persian", &lexicon());
        assert_eq!(scan.info.gender.as_deref(), Some("female"));
    }

    #[test]
    fn test_weight_pounds_to_kilograms() {
        let scan = scan("weighing about 65 lbs", &lexicon());
        let weight = scan.info.weight.unwrap();
        assert_eq!(weight.raw, "65 lbs");
        assert!((weight.kilograms - 29.48).abs() < 0.01);
    }

    #[test]
    fn test_weight_kilograms_kept() {
        let scan = scan("a 5.5 kg cat", &lexicon());
        let weight = scan.info.weight.unwrap();
        assert!((weight.kilograms - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let scan = scan("something is wrong", &lexicon());
        assert!(scan.info.is_empty());
        assert!(scan.spans.is_empty());
    }
}
