//! Default veterinary vocabulary
//!
//! Surface forms owners actually write, grouped under canonical symptom
//! keys. Table order is match priority order and must stay deterministic.

use vetnlp_core::{Frequency, Severity};

use crate::LexiconTables;

/// Build the default table set
pub fn default_tables() -> LexiconTables {
    LexiconTables {
        symptoms: symptom_table(),
        severity_keywords: vec![
            (
                Severity::Mild,
                words(&["slight", "mild", "minor", "little", "somewhat"]),
            ),
            (
                Severity::Moderate,
                words(&["significant", "moderate", "considerable", "notable"]),
            ),
            (
                Severity::Severe,
                words(&["severe", "extreme", "critical", "very", "extremely"]),
            ),
        ],
        frequency_keywords: vec![
            (
                Frequency::Daily,
                words(&["daily", "every day", "each day", "once a day", "twice a day"]),
            ),
            (
                Frequency::Intermittent,
                words(&[
                    "intermittent",
                    "occasionally",
                    "on and off",
                    "off and on",
                    "sometimes",
                    "comes and goes",
                ]),
            ),
            (
                Frequency::Constant,
                words(&[
                    "constant",
                    "constantly",
                    "all the time",
                    "continuous",
                    "nonstop",
                    "won't stop",
                    "frequently",
                    "often",
                ]),
            ),
        ],
        species_cues: vec![
            ("dog".to_string(), words(&["dog", "canine", "puppy", "pup"])),
            ("cat".to_string(), words(&["cat", "feline", "kitten"])),
            (
                "bird".to_string(),
                words(&["bird", "parrot", "cockatiel", "budgie", "canary"]),
            ),
            ("rabbit".to_string(), words(&["rabbit", "bunny"])),
            ("horse".to_string(), words(&["horse", "pony", "equine", "colt"])),
            ("cow".to_string(), words(&["cow", "cattle", "bovine", "calf"])),
        ],
        breeds: vec![
            breed("labrador", "dog"),
            breed("golden retriever", "dog"),
            breed("german shepherd", "dog"),
            breed("bulldog", "dog"),
            breed("poodle", "dog"),
            breed("beagle", "dog"),
            breed("dachshund", "dog"),
            breed("boxer", "dog"),
            breed("husky", "dog"),
            breed("chihuahua", "dog"),
            breed("persian", "cat"),
            breed("siamese", "cat"),
            breed("maine coon", "cat"),
            breed("ragdoll", "cat"),
            breed("british shorthair", "cat"),
        ],
        gender_patterns: vec![
            ("male".to_string(), r"(?i)\b(male|tom|buck)\b".to_string()),
            ("female".to_string(), r"(?i)\b(female|queen|doe)\b".to_string()),
        ],
        age_patterns: vec![
            r"(?i)\b(\d+)[\s-]*(year|yr|month|mon|week|wk|day)s?[\s-]*old\b".to_string(),
            r"(?i)\b(\d+)\s*(year|yr|month|mon|week|wk|day)s?\s+of\s+age\b".to_string(),
        ],
        weight_patterns: vec![
            r"(?i)\b(\d+(?:\.\d+)?)\s*(kg|kgs|kilograms?|lbs?|pounds?)\b".to_string(),
        ],
        duration_pattern:
            r"(?i)(?:\b(for|past|over|since)\s+)?\b(\d+)\s*(minute|min|hour|hr|day|week|wk|month|mon|year|yr)s?\b"
                .to_string(),
        negation_cues: words(&[
            "no", "not", "never", "without", "denies", "isn't", "hasn't", "doesn't",
        ]),
    }
}

fn symptom_table() -> Vec<(String, Vec<String>)> {
    vec![
        // Gastrointestinal
        entry("vomiting", &["vomit", "vomiting", "threw up", "throwing up", "regurgitation"]),
        entry(
            "diarrhea",
            &["diarrhea", "diarrhoea", "loose stool", "loose stools", "soft stool"],
        ),
        entry("constipation", &["constipated", "constipation", "hard stool", "straining"]),
        entry(
            "loss_of_appetite",
            &[
                "loss of appetite",
                "anorexia",
                "not eating",
                "won't eat",
                "wont eat",
                "refusing food",
                "inappetence",
            ],
        ),
        entry(
            "abdominal_pain",
            &[
                "abdominal pain",
                "belly pain",
                "stomach pain",
                "tender abdomen",
                "painful stomach",
            ],
        ),
        // Respiratory
        entry("cough", &["cough", "coughing", "coughs"]),
        entry("sneezing", &["sneeze", "sneezing"]),
        entry("nasal_discharge", &["nasal discharge", "runny nose", "nasal mucus"]),
        entry(
            "labored_breathing",
            &[
                "labored breathing",
                "difficulty breathing",
                "short of breath",
                "shortness of breath",
            ],
        ),
        entry("wheezing", &["wheeze", "wheezing"]),
        // Dermatological
        entry("itching", &["itch", "itching", "itchy", "scratching", "pruritus"]),
        entry("hair_loss", &["hair loss", "alopecia", "losing fur", "bald patches"]),
        entry("skin_lesion", &["skin lesion", "sore", "wound", "scab"]),
        entry("rash", &["rash", "hives", "eruption"]),
        entry("red_skin", &["red skin", "redness", "erythema"]),
        // Ear
        entry("ear_discharge", &["ear discharge", "smelly ears", "waxy ears"]),
        entry("head_shaking", &["head shaking", "shaking his head", "shaking her head"]),
        // Neurological
        entry("seizure", &["seizure", "seizures", "convulsion", "fit"]),
        entry(
            "lethargy",
            &["lethargy", "lethargic", "sluggish", "listless", "no energy", "not active"],
        ),
        entry(
            "incoordination",
            &["incoordination", "lack of coordination", "wobbly", "unsteady"],
        ),
        entry("tremor", &["tremor", "trembling", "shaking"]),
        // Ocular
        entry("eye_discharge", &["eye discharge", "eye drainage", "watery eyes"]),
        entry("eye_redness", &["red eyes", "eye redness", "conjunctivitis"]),
        entry("eye_swelling", &["eye swelling", "swollen eyes"]),
        // General
        entry("fever", &["fever", "fevered", "high temperature"]),
        entry("dehydration", &["dehydration", "dehydrated"]),
        entry("weight_loss", &["weight loss", "losing weight"]),
        entry("swelling", &["swelling", "swollen", "edema", "enlarged"]),
    ]
}

fn entry(key: &str, phrases: &[&str]) -> (String, Vec<String>) {
    (key.to_string(), words(phrases))
}

fn breed(name: &str, species: &str) -> (String, String) {
    (name.to_string(), species.to_string())
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_keys_unique() {
        let table = symptom_table();
        let mut keys: Vec<&str> = table.iter().map(|(k, _)| k.as_str()).collect();
        let len = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), len);
    }

    #[test]
    fn test_wont_eat_maps_to_loss_of_appetite() {
        let table = symptom_table();
        let (_, phrases) = table
            .iter()
            .find(|(k, _)| k == "loss_of_appetite")
            .expect("loss_of_appetite present");
        assert!(phrases.iter().any(|p| p == "won't eat"));
    }

    #[test]
    fn test_breeds_carry_species() {
        let tables = default_tables();
        let golden = tables
            .breeds
            .iter()
            .find(|(name, _)| name == "golden retriever")
            .unwrap();
        assert_eq!(golden.1, "dog");
    }
}
