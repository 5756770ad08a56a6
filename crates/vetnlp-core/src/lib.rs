//! vetnlp Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the vetnlp
//! pipeline:
//! - Clinical value types (patient info, symptom/disease extractions)
//! - Follow-up question types
//! - The disease catalogue collaborator trait
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{AnalyzerConfig, ConfigError, ExtractionConfig, MatcherConfig, QuestionConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for vetnlp operations
#[derive(Error, Debug)]
pub enum VetError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("disease catalogue unavailable: {0}")]
    CatalogUnavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VetError>;

// ============================================================================
// Modifier Vocabularies
// ============================================================================

/// Severity classification for symptoms and diseases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    #[default]
    Unknown,
}

impl Severity {
    /// Contribution to question priority scoring
    pub fn weight(&self) -> i32 {
        match self {
            Self::Severe => 2,
            Self::Moderate => 1,
            Self::Mild | Self::Unknown => 0,
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Self::Unknown
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mild => write!(f, "mild"),
            Self::Moderate => write!(f, "moderate"),
            Self::Severe => write!(f, "severe"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// How often a symptom occurs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Intermittent,
    Constant,
    #[default]
    Unknown,
}

impl Frequency {
    pub fn is_known(&self) -> bool {
        *self != Self::Unknown
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Intermittent => write!(f, "intermittent"),
            Self::Constant => write!(f, "constant"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Time units accepted in age and duration phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// Parse a unit word, tolerating common abbreviations
    pub fn parse(word: &str) -> Option<Self> {
        match word.to_lowercase().trim_end_matches('s') {
            "minute" | "min" => Some(Self::Minutes),
            "hour" | "hr" => Some(Self::Hours),
            "day" => Some(Self::Days),
            "week" | "wk" => Some(Self::Weeks),
            "month" | "mon" | "mo" => Some(Self::Months),
            "year" | "yr" => Some(Self::Years),
            _ => None,
        }
    }

    /// Singular unit word
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minutes => "minute",
            Self::Hours => "hour",
            Self::Days => "day",
            Self::Weeks => "week",
            Self::Months => "month",
            Self::Years => "year",
        }
    }

    /// Unit word pluralized for a value
    pub fn display(&self, value: u32) -> String {
        if value == 1 {
            self.as_str().to_string()
        } else {
            format!("{}s", self.as_str())
        }
    }
}

// ============================================================================
// Patient Demographics
// ============================================================================

/// An age mention, raw text plus normalized value and unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Age {
    /// Text as matched in the input ("5 year old")
    pub raw: String,
    pub value: u32,
    pub unit: TimeUnit,
}

impl Age {
    /// Normalized form, e.g. "5 years"
    pub fn normalized(&self) -> String {
        format!("{} {}", self.value, self.unit.display(self.value))
    }
}

/// A weight mention, raw text plus canonical kilograms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    /// Text as matched in the input ("65 lbs")
    pub raw: String,
    pub kilograms: f64,
}

/// Extracted patient demographics. Every field is optional; absence is a
/// valid result and feeds the question prioritizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub animal_type: Option<String>,
    pub age: Option<Age>,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub weight: Option<Weight>,
}

impl PatientInfo {
    pub fn is_empty(&self) -> bool {
        self.animal_type.is_none()
            && self.age.is_none()
            && self.breed.is_none()
            && self.gender.is_none()
            && self.weight.is_none()
    }

    /// Display name used to fill question templates
    pub fn animal_display(&self) -> &str {
        self.animal_type.as_deref().unwrap_or("pet")
    }
}

// ============================================================================
// Symptoms
// ============================================================================

/// A duration mention attached to a symptom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    /// Text as matched in the context window ("for 3 days")
    pub raw: String,
    pub value: u32,
    pub unit: TimeUnit,
}

impl Duration {
    /// Normalized form, e.g. "3 days"
    pub fn normalized(&self) -> String {
        format!("{} {}", self.value, self.unit.display(self.value))
    }
}

/// One extracted symptom, keyed by its canonical symptom identifier.
/// The analysis result holds at most one entry per canonical key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomExtraction {
    /// Canonical symptom key ("loss_of_appetite")
    pub symptom: String,
    pub duration: Option<Duration>,
    pub severity: Severity,
    pub frequency: Frequency,
    /// Bounded text window around the chosen match
    pub context: String,
}

impl SymptomExtraction {
    /// How many of the three modifiers carry information
    pub fn evidence_count(&self) -> usize {
        self.duration.is_some() as usize
            + self.severity.is_known() as usize
            + self.frequency.is_known() as usize
    }

    /// Human-readable symptom name ("loss of appetite")
    pub fn display_name(&self) -> String {
        self.symptom.replace('_', " ")
    }
}

// ============================================================================
// Diseases
// ============================================================================

/// A scored disease candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseExtraction {
    pub disease_name: String,
    /// Heuristic match strength in [0, 1]; not a calibrated probability
    pub confidence: f32,
    /// Extracted symptom keys that matched this disease's definition
    pub related_symptoms: Vec<String>,
}

impl DiseaseExtraction {
    /// Construct with confidence clamped into [0, 1]
    pub fn new(
        disease_name: impl Into<String>,
        confidence: f32,
        related_symptoms: Vec<String>,
    ) -> Self {
        Self {
            disease_name: disease_name.into(),
            confidence: confidence.clamp(0.0, 1.0),
            related_symptoms,
        }
    }
}

/// Catalogue entry for a disease. Read-only once the catalogue is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseDefinition {
    pub name: String,
    pub description: String,
    /// Surface keywords naming the disease itself
    pub keywords: Vec<String>,
    /// Canonical symptom keys commonly seen with this disease
    pub common_symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub treatment: String,
    pub severity: Severity,
    pub affected_species: Vec<String>,
    /// Confidence offset applied before symptom-count scoring
    pub base_confidence: f32,
}

// ============================================================================
// Key Phrases
// ============================================================================

/// A salient clinical phrase with its originating span (byte offsets into
/// the analyzed text)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPhrase {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

// ============================================================================
// Analysis Result
// ============================================================================

/// Complete output of one analysis call. Symptoms keep first-detected
/// order; diseases are sorted confidence-descending. Immutable after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub patient_info: PatientInfo,
    pub symptoms: Vec<SymptomExtraction>,
    pub suspected_diseases: Vec<DiseaseExtraction>,
    pub key_phrases: Vec<KeyPhrase>,
    pub raw_text: String,
}

impl AnalysisResult {
    /// Canonical keys of all extracted symptoms, in detection order
    pub fn symptom_keys(&self) -> Vec<String> {
        self.symptoms.iter().map(|s| s.symptom.clone()).collect()
    }
}

// ============================================================================
// Follow-up Questions
// ============================================================================

/// Fixed question taxonomy. Declaration order is the tie-break order used
/// when two questions share a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    SymptomDetails,
    DiseaseConfirmation,
    MedicalHistory,
    Lifestyle,
    TreatmentHistory,
    AdditionalSymptoms,
    SymptomSeverity,
}

impl QuestionCategory {
    /// All categories in declaration order
    pub const ALL: [Self; 7] = [
        Self::SymptomDetails,
        Self::DiseaseConfirmation,
        Self::MedicalHistory,
        Self::Lifestyle,
        Self::TreatmentHistory,
        Self::AdditionalSymptoms,
        Self::SymptomSeverity,
    ];

    /// Position in the declaration order, used as a sort key
    pub fn order(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(Self::ALL.len())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SymptomDetails => "symptom_details",
            Self::DiseaseConfirmation => "disease_confirmation",
            Self::MedicalHistory => "medical_history",
            Self::Lifestyle => "lifestyle",
            Self::TreatmentHistory => "treatment_history",
            Self::AdditionalSymptoms => "additional_symptoms",
            Self::SymptomSeverity => "symptom_severity",
        }
    }
}

impl std::fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prioritized follow-up question. Generated fresh per analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpQuestion {
    pub category: QuestionCategory,
    pub question: String,
    /// Higher = more urgent
    pub priority: i32,
    /// Short justification for asking
    pub reason: String,
}

// ============================================================================
// Traits
// ============================================================================

/// Disease catalogue collaborator. Implementations are read-only oracles:
/// the matcher and question generator never mutate the catalogue.
///
/// An unreachable backing store reports `VetError::CatalogUnavailable`;
/// callers recover by falling back to the static in-process catalogue.
pub trait DiseaseCatalog: Send + Sync {
    /// Diseases sharing at least one of the given symptom keys, paired with
    /// the count of matching symptoms, ordered by count descending then
    /// name ascending
    fn find_by_symptoms(&self, symptoms: &[String]) -> Result<Vec<(DiseaseDefinition, usize)>>;

    /// Exact (case-insensitive) lookup by disease name
    fn find_by_name(&self, name: &str) -> Result<Option<DiseaseDefinition>>;

    /// Substring search over disease names, keywords and descriptions
    fn find_by_keyword(&self, text: &str) -> Result<Vec<DiseaseDefinition>>;

    /// Catalogue name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_weight() {
        assert_eq!(Severity::Severe.weight(), 2);
        assert_eq!(Severity::Moderate.weight(), 1);
        assert_eq!(Severity::Mild.weight(), 0);
        assert_eq!(Severity::Unknown.weight(), 0);
    }

    #[test]
    fn test_time_unit_parse() {
        assert_eq!(TimeUnit::parse("days"), Some(TimeUnit::Days));
        assert_eq!(TimeUnit::parse("Year"), Some(TimeUnit::Years));
        assert_eq!(TimeUnit::parse("wks"), Some(TimeUnit::Weeks));
        assert_eq!(TimeUnit::parse("fortnight"), None);
    }

    #[test]
    fn test_age_normalized() {
        let age = Age {
            raw: "5 year old".to_string(),
            value: 5,
            unit: TimeUnit::Years,
        };
        assert_eq!(age.normalized(), "5 years");

        let age = Age {
            raw: "1 year old".to_string(),
            value: 1,
            unit: TimeUnit::Years,
        };
        assert_eq!(age.normalized(), "1 year");
    }

    #[test]
    fn test_confidence_clamped() {
        let d = DiseaseExtraction::new("parvovirus", 1.7, vec![]);
        assert_eq!(d.confidence, 1.0);
        let d = DiseaseExtraction::new("parvovirus", -0.2, vec![]);
        assert_eq!(d.confidence, 0.0);
    }

    #[test]
    fn test_evidence_count() {
        let mut s = SymptomExtraction {
            symptom: "vomiting".to_string(),
            duration: None,
            severity: Severity::Unknown,
            frequency: Frequency::Unknown,
            context: String::new(),
        };
        assert_eq!(s.evidence_count(), 0);

        s.duration = Some(Duration {
            raw: "for 3 days".to_string(),
            value: 3,
            unit: TimeUnit::Days,
        });
        s.severity = Severity::Moderate;
        assert_eq!(s.evidence_count(), 2);
    }

    #[test]
    fn test_category_order_matches_declaration() {
        assert_eq!(QuestionCategory::SymptomDetails.order(), 0);
        assert_eq!(QuestionCategory::SymptomSeverity.order(), 6);
    }

    #[test]
    fn test_enum_serialization_vocabulary() {
        assert_eq!(serde_json::to_string(&Severity::Mild).unwrap(), "\"mild\"");
        assert_eq!(
            serde_json::to_string(&Frequency::Intermittent).unwrap(),
            "\"intermittent\""
        );
        assert_eq!(
            serde_json::to_string(&QuestionCategory::MedicalHistory).unwrap(),
            "\"medical_history\""
        );
    }

    #[test]
    fn test_symptom_display_name() {
        let s = SymptomExtraction {
            symptom: "loss_of_appetite".to_string(),
            duration: None,
            severity: Severity::Unknown,
            frequency: Frequency::Unknown,
            context: String::new(),
        };
        assert_eq!(s.display_name(), "loss of appetite");
    }
}
