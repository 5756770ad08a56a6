//! Disease catalogues
//!
//! `StaticCatalog` is the in-process disease dictionary; `FallbackCatalog`
//! wraps an external catalogue and degrades to a fallback when the primary
//! reports unavailability. Both are read-only oracles behind the
//! `DiseaseCatalog` trait.

use std::sync::Arc;

use tracing::warn;

use vetnlp_core::{DiseaseCatalog, DiseaseDefinition, Result, Severity, VetError};

// ============================================================================
// Static catalogue
// ============================================================================

/// In-process disease dictionary. Never unavailable.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    diseases: Vec<DiseaseDefinition>,
}

impl StaticCatalog {
    /// Build from an explicit disease list
    pub fn new(diseases: Vec<DiseaseDefinition>) -> Self {
        Self { diseases }
    }

    /// Build with the default veterinary disease set
    pub fn with_defaults() -> Self {
        Self::new(default_diseases())
    }

    pub fn all(&self) -> &[DiseaseDefinition] {
        &self.diseases
    }
}

impl DiseaseCatalog for StaticCatalog {
    fn find_by_symptoms(&self, symptoms: &[String]) -> Result<Vec<(DiseaseDefinition, usize)>> {
        let mut matches: Vec<(DiseaseDefinition, usize)> = self
            .diseases
            .iter()
            .filter_map(|disease| {
                let count = disease
                    .common_symptoms
                    .iter()
                    .filter(|s| symptoms.contains(s))
                    .count();
                (count > 0).then(|| (disease.clone(), count))
            })
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(&b.0.name)));
        Ok(matches)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<DiseaseDefinition>> {
        Ok(self
            .diseases
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn find_by_keyword(&self, text: &str) -> Result<Vec<DiseaseDefinition>> {
        let needle = text.to_lowercase();
        Ok(self
            .diseases
            .iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&needle)
                    || d.description.to_lowercase().contains(&needle)
                    || d.keywords.iter().any(|k| k.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "static"
    }
}

// ============================================================================
// Fallback combinator
// ============================================================================

/// Serves queries from `primary`, falling back to `fallback` when the
/// primary reports `CatalogUnavailable`. Other errors still propagate.
pub struct FallbackCatalog {
    primary: Arc<dyn DiseaseCatalog>,
    fallback: Arc<dyn DiseaseCatalog>,
}

impl FallbackCatalog {
    pub fn new(primary: Arc<dyn DiseaseCatalog>, fallback: Arc<dyn DiseaseCatalog>) -> Self {
        Self { primary, fallback }
    }

    fn recover<T>(&self, result: Result<T>, query: impl Fn(&dyn DiseaseCatalog) -> Result<T>) -> Result<T> {
        match result {
            Err(VetError::CatalogUnavailable(reason)) => {
                warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    %reason,
                    "disease catalogue unavailable, using fallback"
                );
                query(self.fallback.as_ref())
            }
            other => other,
        }
    }
}

impl DiseaseCatalog for FallbackCatalog {
    fn find_by_symptoms(&self, symptoms: &[String]) -> Result<Vec<(DiseaseDefinition, usize)>> {
        self.recover(self.primary.find_by_symptoms(symptoms), |c| {
            c.find_by_symptoms(symptoms)
        })
    }

    fn find_by_name(&self, name: &str) -> Result<Option<DiseaseDefinition>> {
        self.recover(self.primary.find_by_name(name), |c| c.find_by_name(name))
    }

    fn find_by_keyword(&self, text: &str) -> Result<Vec<DiseaseDefinition>> {
        self.recover(self.primary.find_by_keyword(text), |c| c.find_by_keyword(text))
    }

    fn name(&self) -> &str {
        "fallback"
    }
}

// ============================================================================
// Default disease data
// ============================================================================

/// Base confidence offset by severity tag. Severe conditions surface a
/// little earlier for the same symptom overlap.
fn base_confidence(severity: Severity) -> f32 {
    match severity {
        Severity::Severe => 0.25,
        Severity::Moderate => 0.2,
        Severity::Mild | Severity::Unknown => 0.15,
    }
}

fn disease(
    name: &str,
    description: &str,
    keywords: &[&str],
    common_symptoms: &[&str],
    causes: &[&str],
    treatment: &str,
    severity: Severity,
    affected_species: &[&str],
) -> DiseaseDefinition {
    DiseaseDefinition {
        name: name.to_string(),
        description: description.to_string(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        common_symptoms: common_symptoms.iter().map(|s| s.to_string()).collect(),
        causes: causes.iter().map(|s| s.to_string()).collect(),
        treatment: treatment.to_string(),
        severity,
        affected_species: affected_species.iter().map(|s| s.to_string()).collect(),
        base_confidence: base_confidence(severity),
    }
}

fn default_diseases() -> Vec<DiseaseDefinition> {
    vec![
        disease(
            "gastroenteritis",
            "Inflammation of the stomach and intestines, commonly caused by dietary changes, infections, or ingestion of foreign objects.",
            &["gastroenteritis", "gastro", "gi upset"],
            &["vomiting", "diarrhea", "abdominal_pain", "loss_of_appetite"],
            &["dietary indiscretion", "bacterial infection", "viral infection", "parasites"],
            "Dietary management, antibiotics if bacterial, supportive care with fluids",
            Severity::Moderate,
            &["dog", "cat", "rabbit"],
        ),
        disease(
            "parvovirus",
            "Highly contagious viral infection affecting the gastrointestinal tract, bone marrow, and sometimes the heart.",
            &["parvovirus", "parvo", "cpv"],
            &["vomiting", "diarrhea", "lethargy", "loss_of_appetite", "fever"],
            &["viral infection", "contact with infected animals"],
            "Supportive care, IV fluids, anti-emetics, antibiotics for secondary infections",
            Severity::Severe,
            &["dog"],
        ),
        disease(
            "pancreatitis",
            "Inflammation of the pancreas, often triggered by a fatty meal.",
            &["pancreatitis", "pancreatic"],
            &["vomiting", "abdominal_pain", "lethargy", "loss_of_appetite"],
            &["fatty foods", "obesity", "dietary indiscretion"],
            "Fasting with fluid support, anti-nausea medication, low-fat diet",
            Severity::Moderate,
            &["dog", "cat"],
        ),
        disease(
            "otitis",
            "Infection or inflammation of the ear canal, commonly caused by bacteria, yeast, or mites.",
            &["otitis", "ear infection", "ear mites"],
            &["itching", "ear_discharge", "head_shaking"],
            &["ear mites", "bacterial infection", "yeast infection", "allergies"],
            "Ear cleaning, topical antibiotics or antifungals, anti-inflammatory drops",
            Severity::Mild,
            &["dog", "cat", "rabbit"],
        ),
        disease(
            "dermatitis",
            "Skin inflammation caused by allergic reactions to food, environment, or parasites.",
            &["dermatitis", "allergies", "allergy"],
            &["itching", "rash", "hair_loss", "red_skin"],
            &["food allergies", "environmental allergens", "parasites", "contact irritants"],
            "Antihistamines, corticosteroids, topical treatments, allergen avoidance",
            Severity::Mild,
            &["dog", "cat"],
        ),
        disease(
            "pneumonia",
            "Infection of the lungs causing inflammation and fluid accumulation in the alveoli.",
            &["pneumonia", "respiratory infection"],
            &["cough", "labored_breathing", "fever", "lethargy"],
            &["bacterial infection", "viral infection", "aspiration"],
            "Antibiotics, supportive care, oxygen therapy if needed, rest",
            Severity::Severe,
            &["dog", "cat", "bird"],
        ),
        disease(
            "conjunctivitis",
            "Inflammation of the conjunctiva from infection or irritation.",
            &["conjunctivitis", "pink eye", "eye infection"],
            &["eye_discharge", "eye_redness", "eye_swelling"],
            &["bacterial infection", "viral infection", "allergies", "foreign objects"],
            "Topical antibiotics, saline drops, anti-inflammatory drops",
            Severity::Mild,
            &["dog", "cat", "bird"],
        ),
        disease(
            "diabetes_mellitus",
            "Endocrine disorder characterized by insufficient insulin production or insulin resistance.",
            &["diabetes", "diabetes mellitus"],
            &["loss_of_appetite", "weight_loss", "lethargy", "dehydration"],
            &["obesity", "genetics", "pancreatitis"],
            "Insulin therapy, dietary management, weight control, monitoring",
            Severity::Moderate,
            &["dog", "cat"],
        ),
        disease(
            "epilepsy",
            "Neurological disorder causing recurrent seizures without identifiable structural brain disease.",
            &["epilepsy", "seizure disorder"],
            &["seizure", "tremor", "incoordination"],
            &["genetic predisposition"],
            "Anti-seizure medication, trigger avoidance, regular monitoring",
            Severity::Moderate,
            &["dog", "cat"],
        ),
    ]
}
