//! Pipeline Integration Tests
//!
//! End-to-end scenarios over the full analyze -> match -> question chain,
//! plus the JSON schema contract the export boundary relies on.

use std::sync::Arc;

use serde_json::Value;

use vetnlp_cli::{Pipeline, PipelineOutput};
use vetnlp_core::{
    AnalyzerConfig, DiseaseCatalog, DiseaseDefinition, QuestionCategory, Result, VetError,
};
use vetnlp_engine::{FallbackCatalog, StaticCatalog};

const SCENARIO_A: &str = "My 5 year old male golden retriever has been vomiting \
                          and has diarrhea for 3 days. He seems lethargic and won't eat.";

fn pipeline() -> Pipeline {
    Pipeline::new(AnalyzerConfig::default()).unwrap()
}

fn run(text: &str) -> PipelineOutput {
    pipeline().run(text, true).unwrap()
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_scenario_full_record() {
    let output = run(SCENARIO_A);

    let info = &output.analysis.patient_info;
    assert_eq!(info.animal_type.as_deref(), Some("dog"));
    assert_eq!(info.age.as_ref().unwrap().normalized(), "5 years");
    assert_eq!(info.breed.as_deref(), Some("golden retriever"));
    assert_eq!(info.gender.as_deref(), Some("male"));

    let keys = output.analysis.symptom_keys();
    for expected in ["vomiting", "diarrhea", "lethargy", "loss_of_appetite"] {
        assert!(keys.contains(&expected.to_string()), "missing {expected}");
    }

    let names: Vec<&str> = output
        .analysis
        .suspected_diseases
        .iter()
        .map(|d| d.disease_name.as_str())
        .collect();
    assert!(names.contains(&"gastroenteritis"));
    assert!(names.contains(&"parvovirus"));
    assert!(output
        .analysis
        .suspected_diseases
        .iter()
        .all(|d| d.confidence > 0.0));

    assert!(!output.follow_up_questions.is_empty());
    assert!(output.follow_up_questions.len() <= 8);
}

#[test]
fn test_empty_input_is_invalid() {
    let err = pipeline().run("", true).unwrap_err();
    assert!(matches!(err, VetError::InvalidInput(_)));
}

#[test]
fn test_no_clinical_vocabulary_still_yields_questions() {
    let output = run("The weather is nice today.");

    assert!(output.analysis.symptoms.is_empty());
    assert!(output.analysis.suspected_diseases.is_empty());
    assert!(!output.follow_up_questions.is_empty());
    for question in &output.follow_up_questions {
        assert!(matches!(
            question.category,
            QuestionCategory::MedicalHistory
                | QuestionCategory::Lifestyle
                | QuestionCategory::TreatmentHistory
                | QuestionCategory::AdditionalSymptoms
        ));
    }
}

// =============================================================================
// Determinism and Invariants
// =============================================================================

#[test]
fn test_analysis_idempotent_end_to_end() {
    let first = run(SCENARIO_A);
    let second = run(SCENARIO_A);
    assert_eq!(first.analysis, second.analysis);
    assert_eq!(first.follow_up_questions, second.follow_up_questions);
}

#[test]
fn test_disease_ranking_sorted() {
    let output = run(SCENARIO_A);
    let diseases = &output.analysis.suspected_diseases;
    for window in diseases.windows(2) {
        assert!(window[0].confidence >= window[1].confidence);
        if window[0].confidence == window[1].confidence {
            assert!(window[0].disease_name <= window[1].disease_name);
        }
    }
}

#[test]
fn test_question_cap_under_symptom_flood() {
    let output = run(
        "my dog is vomiting with diarrhea, coughing, sneezing, itching, trembling, \
         wheezing, lethargic, has a fever, seems dehydrated, with hair loss and a rash",
    );
    assert!(output.follow_up_questions.len() <= 8);
}

// =============================================================================
// Catalogue Fallback
// =============================================================================

/// Test double standing in for an unreachable external store
struct DownCatalog;

impl DiseaseCatalog for DownCatalog {
    fn find_by_symptoms(&self, _: &[String]) -> Result<Vec<(DiseaseDefinition, usize)>> {
        Err(VetError::CatalogUnavailable("connection refused".to_string()))
    }
    fn find_by_name(&self, _: &str) -> Result<Option<DiseaseDefinition>> {
        Err(VetError::CatalogUnavailable("connection refused".to_string()))
    }
    fn find_by_keyword(&self, _: &str) -> Result<Vec<DiseaseDefinition>> {
        Err(VetError::CatalogUnavailable("connection refused".to_string()))
    }
    fn name(&self) -> &str {
        "down"
    }
}

#[test]
fn test_unavailable_catalog_degrades_to_static() {
    let catalog = Arc::new(FallbackCatalog::new(
        Arc::new(DownCatalog),
        Arc::new(StaticCatalog::with_defaults()),
    ));
    let pipeline = Pipeline::with_catalog(AnalyzerConfig::default(), catalog).unwrap();

    let output = pipeline.run(SCENARIO_A, true).unwrap();
    assert!(!output.analysis.suspected_diseases.is_empty());
}

// =============================================================================
// JSON Schema Contract
// =============================================================================

#[test]
fn test_json_field_names_and_vocabularies() {
    let output = run(SCENARIO_A);
    let json: Value = serde_json::to_value(&output).unwrap();

    assert!(json["patient_info"]["animal_type"].is_string());
    assert!(json["patient_info"]["breed"].is_string());
    assert!(json["symptoms"].is_array());
    assert!(json["suspected_diseases"].is_array());
    assert!(json["key_phrases"].is_array());
    assert!(json["follow_up_questions"].is_array());

    let symptom = &json["symptoms"][0];
    assert!(symptom["symptom"].is_string());
    let severity = symptom["severity"].as_str().unwrap();
    assert!(["mild", "moderate", "severe", "unknown"].contains(&severity));
    let frequency = symptom["frequency"].as_str().unwrap();
    assert!(["daily", "intermittent", "constant", "unknown"].contains(&frequency));

    let disease = &json["suspected_diseases"][0];
    assert!(disease["disease_name"].is_string());
    assert!(disease["confidence"].is_number());
    assert!(disease["related_symptoms"].is_array());

    let question = &json["follow_up_questions"][0];
    assert!(question["category"].is_string());
    assert!(question["question"].is_string());
    assert!(question["priority"].is_number());
    assert!(question["reason"].is_string());
}
