//! Disease matching
//!
//! Scores catalogue diseases against the extracted symptom set:
//! `confidence = base_confidence + matched_count * increment`, clamped to
//! [0, 1]. Diseases with no matched symptom are excluded. The catalogue is
//! treated purely as a symptom-set oracle and never mutated.

use std::sync::Arc;

use tracing::debug;

use vetnlp_core::{DiseaseCatalog, DiseaseExtraction, MatcherConfig, Result};

pub struct DiseaseMatcher {
    catalog: Arc<dyn DiseaseCatalog>,
    config: MatcherConfig,
}

impl DiseaseMatcher {
    pub fn new(catalog: Arc<dyn DiseaseCatalog>, config: MatcherConfig) -> Self {
        Self { catalog, config }
    }

    /// Rank catalogue diseases against the extracted symptom keys.
    /// Descending confidence; ties broken by name ascending.
    pub fn rank(&self, symptoms: &[String]) -> Result<Vec<DiseaseExtraction>> {
        if symptoms.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.catalog.find_by_symptoms(symptoms)?;
        debug!(
            catalog = self.catalog.name(),
            candidates = candidates.len(),
            "scoring disease candidates"
        );

        let mut extractions: Vec<DiseaseExtraction> = candidates
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(definition, count)| {
                let related: Vec<String> = definition
                    .common_symptoms
                    .iter()
                    .filter(|s| symptoms.contains(s))
                    .cloned()
                    .collect();
                let confidence =
                    definition.base_confidence + count as f32 * self.config.symptom_increment;
                DiseaseExtraction::new(definition.name, confidence, related)
            })
            .collect();

        extractions.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.disease_name.cmp(&b.disease_name))
        });

        Ok(extractions)
    }
}
