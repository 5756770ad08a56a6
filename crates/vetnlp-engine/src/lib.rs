//! vetnlp Engine - clinical text extraction and disease matching
//!
//! Turns a free-text patient description into an [`AnalysisResult`]:
//! demographics, deduplicated symptom extractions with modifiers, ranked
//! disease candidates and key phrases. The pipeline is synchronous and
//! allocation-local; one analyzer can serve concurrent callers.

use std::sync::Arc;

use tracing::debug;

use vetnlp_core::{AnalysisResult, AnalyzerConfig, DiseaseCatalog, Result, VetError};
use vetnlp_lexicon::Lexicon;

pub mod catalog;
pub mod demographics;
pub mod keyphrase;
pub mod matcher;
pub mod symptoms;

pub use catalog::{FallbackCatalog, StaticCatalog};
pub use matcher::DiseaseMatcher;

/// The analysis entry point. Construct once with a lexicon, catalogue and
/// configuration; every `analyze` call produces an independent result.
pub struct PatientAnalyzer {
    lexicon: Lexicon,
    matcher: DiseaseMatcher,
    config: AnalyzerConfig,
}

impl PatientAnalyzer {
    pub fn new(
        lexicon: Lexicon,
        catalog: Arc<dyn DiseaseCatalog>,
        config: AnalyzerConfig,
    ) -> Self {
        let matcher = DiseaseMatcher::new(catalog, config.matcher.clone());
        Self {
            lexicon,
            matcher,
            config,
        }
    }

    /// Default lexicon, static catalogue and default configuration
    pub fn with_defaults() -> Result<Self> {
        let lexicon = Lexicon::with_defaults()?;
        Ok(Self::new(
            lexicon,
            Arc::new(StaticCatalog::with_defaults()),
            AnalyzerConfig::default(),
        ))
    }

    /// Analyze a patient description.
    ///
    /// Fails only on empty or non-textual input; absence of any extractable
    /// field is a valid result. Idempotent: the same text always yields the
    /// same result, fields and order included.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(VetError::InvalidInput(
                "empty patient description".to_string(),
            ));
        }
        if !trimmed.chars().any(|c| c.is_alphabetic()) {
            return Err(VetError::InvalidInput(
                "patient description contains no text".to_string(),
            ));
        }

        let demographic = demographics::scan(text, &self.lexicon);
        let symptom = symptoms::scan(text, &self.lexicon, &self.config.extraction);
        debug!(
            symptoms = symptom.symptoms.len(),
            has_species = demographic.info.animal_type.is_some(),
            "extraction complete"
        );

        let symptom_keys: Vec<String> = symptom
            .symptoms
            .iter()
            .map(|s| s.symptom.clone())
            .collect();
        let suspected_diseases = self.matcher.rank(&symptom_keys)?;

        let key_phrases = keyphrase::collect(
            demographic.spans,
            symptom.spans,
            self.config.extraction.key_phrase_cap,
        );

        Ok(AnalysisResult {
            patient_info: demographic.info,
            symptoms: symptom.symptoms,
            suspected_diseases,
            key_phrases,
            raw_text: text.to_string(),
        })
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn analyze_is_idempotent(text in "[a-zA-Z0-9 .,]{1,200}") {
            let analyzer = PatientAnalyzer::with_defaults().unwrap();
            let first = analyzer.analyze(&text);
            let second = analyzer.analyze(&text);
            match (first, second) {
                (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
                (Err(_), Err(_)) => {}
                _ => prop_assert!(false, "analyze not deterministic"),
            }
        }

        #[test]
        fn confidences_stay_in_unit_interval(text in "[a-z ]{1,200}") {
            let analyzer = PatientAnalyzer::with_defaults().unwrap();
            if let Ok(result) = analyzer.analyze(&text) {
                for disease in &result.suspected_diseases {
                    prop_assert!((0.0..=1.0).contains(&disease.confidence));
                }
            }
        }
    }
}
