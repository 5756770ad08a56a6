//! vetnlp Questions - follow-up question prioritization
//!
//! Builds a gap list from the analysis result (absent demographics, symptoms
//! missing modifiers, diseases needing confirmation, always-eligible general
//! categories), maps each gap to a templated question and ranks by a
//! weighted priority. Output is capped and deterministic: the same inputs
//! always yield the same ordered list.

use std::sync::Arc;

use tracing::debug;

use vetnlp_core::{
    AnalysisResult, DiseaseCatalog, DiseaseExtraction, FollowUpQuestion, QuestionCategory,
    QuestionConfig, Severity, SymptomExtraction,
};

mod templates;

use templates::{fill, ADDITIONAL_SYMPTOM_GROUPS, GENERAL_TEMPLATES};

/// Generates prioritized follow-up questions for one analysis
pub struct QuestionGenerator {
    config: QuestionConfig,
    catalog: Option<Arc<dyn DiseaseCatalog>>,
}

impl QuestionGenerator {
    pub fn new(config: QuestionConfig) -> Self {
        Self {
            config,
            catalog: None,
        }
    }

    /// Attach a catalogue for disease-specific confirmation questions.
    /// Catalogue failures degrade to the generic questions, never an error.
    pub fn with_catalog(mut self, catalog: Arc<dyn DiseaseCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Generate the ordered question list, capped at the configured size
    pub fn generate(
        &self,
        result: &AnalysisResult,
        matches: &[DiseaseExtraction],
    ) -> Vec<FollowUpQuestion> {
        let animal = result.patient_info.animal_display();
        let mut questions = Vec::new();

        self.demographic_gaps(result, animal, &mut questions);
        for symptom in &result.symptoms {
            self.symptom_gaps(symptom, animal, &mut questions);
        }
        if let Some(first) = result.symptoms.first() {
            self.severity_impact(first, animal, &mut questions);
        }
        self.disease_confirmation(result, matches, animal, &mut questions);
        self.general_questions(animal, &mut questions);
        self.additional_symptom_questions(result, animal, &mut questions);

        let deduped = dedupe(questions);
        let selected = select(deduped, self.config.max_questions);
        debug!(count = selected.len(), "follow-up questions generated");
        selected
    }

    fn priority(&self, criticality: i32, disease: Severity, symptom: Severity) -> i32 {
        criticality * self.config.criticality_weight
            + disease.weight() * self.config.disease_severity_weight
            + symptom.weight() * self.config.symptom_severity_weight
    }

    fn push(
        &self,
        questions: &mut Vec<FollowUpQuestion>,
        category: QuestionCategory,
        criticality: i32,
        disease: Severity,
        symptom: Severity,
        question: String,
        reason: String,
    ) {
        questions.push(FollowUpQuestion {
            category,
            question,
            priority: self.priority(criticality, disease, symptom),
            reason,
        });
    }

    /// (a) PatientInfo fields left absent
    fn demographic_gaps(
        &self,
        result: &AnalysisResult,
        animal: &str,
        questions: &mut Vec<FollowUpQuestion>,
    ) {
        let info = &result.patient_info;
        let none = Severity::Unknown;

        if info.animal_type.is_none() {
            self.push(
                questions,
                QuestionCategory::MedicalHistory,
                5,
                none,
                none,
                "What species is your pet, and what breed?".to_string(),
                "Species determines which conditions are possible".to_string(),
            );
        } else if info.breed.is_none() {
            self.push(
                questions,
                QuestionCategory::MedicalHistory,
                2,
                none,
                none,
                fill("What breed is your {animal}?", animal, None),
                "Some conditions are breed-specific".to_string(),
            );
        }
        if info.age.is_none() {
            self.push(
                questions,
                QuestionCategory::MedicalHistory,
                4,
                none,
                none,
                fill("How old is your {animal}?", animal, None),
                "Age narrows the likely conditions".to_string(),
            );
        }
        if info.gender.is_none() {
            self.push(
                questions,
                QuestionCategory::MedicalHistory,
                2,
                none,
                none,
                fill("Is your {animal} male or female?", animal, None),
                "Some conditions are sex-specific".to_string(),
            );
        }
        if info.weight.is_none() {
            self.push(
                questions,
                QuestionCategory::MedicalHistory,
                2,
                none,
                none,
                fill("How much does your {animal} weigh?", animal, None),
                "Weight guides urgency and dosing".to_string(),
            );
        }
    }

    /// (b) SymptomExtraction entries missing duration/severity/frequency
    fn symptom_gaps(
        &self,
        symptom: &SymptomExtraction,
        animal: &str,
        questions: &mut Vec<FollowUpQuestion>,
    ) {
        let name = symptom.display_name();
        let none = Severity::Unknown;

        if symptom.duration.is_none() {
            self.push(
                questions,
                QuestionCategory::SymptomDetails,
                5,
                none,
                symptom.severity,
                fill("How long has your {animal} had {symptom}?", animal, Some(&name)),
                format!("Duration of {name} is important for diagnosis"),
            );
        }
        if !symptom.severity.is_known() {
            self.push(
                questions,
                QuestionCategory::SymptomDetails,
                4,
                none,
                symptom.severity,
                fill(
                    "How severe is the {symptom} (mild, moderate, or severe)?",
                    animal,
                    Some(&name),
                ),
                "Severity helps assess urgency and disease progression".to_string(),
            );
        }
        if !symptom.frequency.is_known() {
            self.push(
                questions,
                QuestionCategory::SymptomDetails,
                3,
                none,
                symptom.severity,
                fill(
                    "How often is your {animal} experiencing {symptom} (daily, intermittent, constant)?",
                    animal,
                    Some(&name),
                ),
                "Frequency patterns can indicate the disease type".to_string(),
            );
        }

        self.push(
            questions,
            QuestionCategory::SymptomDetails,
            3,
            none,
            symptom.severity,
            fill(
                "Is the {symptom} getting worse, staying the same, or improving?",
                animal,
                Some(&name),
            ),
            "Progression indicates the disease trajectory".to_string(),
        );
    }

    /// Impact questions for the first-detected symptom
    fn severity_impact(
        &self,
        symptom: &SymptomExtraction,
        animal: &str,
        questions: &mut Vec<FollowUpQuestion>,
    ) {
        let name = symptom.display_name();
        let none = Severity::Unknown;

        self.push(
            questions,
            QuestionCategory::SymptomSeverity,
            4,
            none,
            symptom.severity,
            fill(
                "Is your {animal} able to eat and drink normally despite the {symptom}?",
                animal,
                Some(&name),
            ),
            "Eating and drinking capacity gauges systemic impact".to_string(),
        );
        self.push(
            questions,
            QuestionCategory::SymptomSeverity,
            3,
            none,
            symptom.severity,
            fill(
                "Has this condition affected your {animal}'s daily activities or sleep?",
                animal,
                None,
            ),
            "Functional impact reflects how advanced the condition is".to_string(),
        );
    }

    /// (c) Confirmation questions for visible disease matches
    fn disease_confirmation(
        &self,
        result: &AnalysisResult,
        matches: &[DiseaseExtraction],
        animal: &str,
        questions: &mut Vec<FollowUpQuestion>,
    ) {
        let extracted = result.symptom_keys();
        let visible = matches
            .iter()
            .filter(|d| d.confidence >= self.config.visibility_threshold)
            .take(self.config.max_diseases);

        for candidate in visible {
            let display = candidate.disease_name.replace('_', " ");
            let definition = self
                .catalog
                .as_ref()
                .and_then(|c| c.find_by_name(&candidate.disease_name).ok().flatten());
            let disease_severity = definition
                .as_ref()
                .map(|d| d.severity)
                .unwrap_or(Severity::Unknown);

            if let Some(definition) = &definition {
                let missing: Vec<String> = definition
                    .common_symptoms
                    .iter()
                    .filter(|s| !extracted.contains(s))
                    .map(|s| s.replace('_', " "))
                    .collect();
                if !missing.is_empty() {
                    self.push(
                        questions,
                        QuestionCategory::DiseaseConfirmation,
                        4,
                        disease_severity,
                        Severity::Unknown,
                        fill(
                            &format!("Has your {{animal}} shown any {}?", missing.join(" or ")),
                            animal,
                            None,
                        ),
                        format!("These symptoms are commonly associated with {display}"),
                    );
                }
                if !definition.causes.is_empty() {
                    let causes = definition.causes[..definition.causes.len().min(2)].join(" or ");
                    self.push(
                        questions,
                        QuestionCategory::DiseaseConfirmation,
                        3,
                        disease_severity,
                        Severity::Unknown,
                        fill(
                            &format!("Has your {{animal}} been exposed to {causes}?"),
                            animal,
                            None,
                        ),
                        format!("These are common causes of {display}"),
                    );
                }
            }

            self.push(
                questions,
                QuestionCategory::DiseaseConfirmation,
                4,
                disease_severity,
                Severity::Unknown,
                fill("Is your {animal} up to date on vaccinations?", animal, None),
                format!("Vaccination status is crucial for infectious diseases like {display}"),
            );
            self.push(
                questions,
                QuestionCategory::MedicalHistory,
                2,
                disease_severity,
                Severity::Unknown,
                fill(
                    &format!("Has your {{animal}} been diagnosed with {display} before?"),
                    animal,
                    None,
                ),
                "Previous occurrences help confirm recurrent conditions".to_string(),
            );
        }
    }

    /// (d) Always-eligible general categories
    fn general_questions(&self, animal: &str, questions: &mut Vec<FollowUpQuestion>) {
        for template in GENERAL_TEMPLATES {
            self.push(
                questions,
                template.category,
                template.criticality,
                Severity::Unknown,
                Severity::Unknown,
                fill(template.question, animal, None),
                template.reason.to_string(),
            );
        }
    }

    /// Probe for important symptom groups the owner did not mention
    fn additional_symptom_questions(
        &self,
        result: &AnalysisResult,
        animal: &str,
        questions: &mut Vec<FollowUpQuestion>,
    ) {
        let extracted = result.symptom_keys();
        for group in ADDITIONAL_SYMPTOM_GROUPS {
            if group.keys.iter().any(|k| extracted.iter().any(|e| e == k)) {
                continue;
            }
            self.push(
                questions,
                QuestionCategory::AdditionalSymptoms,
                group.criticality,
                Severity::Unknown,
                Severity::Unknown,
                fill(group.question, animal, None),
                group.reason.to_string(),
            );
        }
    }
}

/// Remove duplicate question text (case-insensitive), keeping the higher
/// priority occurrence
fn dedupe(questions: Vec<FollowUpQuestion>) -> Vec<FollowUpQuestion> {
    let mut result: Vec<FollowUpQuestion> = Vec::with_capacity(questions.len());
    for question in questions {
        let normalized = question.question.to_lowercase();
        match result
            .iter_mut()
            .find(|q| q.question.to_lowercase() == normalized)
        {
            Some(existing) => {
                if question.priority > existing.priority {
                    *existing = question;
                }
            }
            None => result.push(question),
        }
    }
    result
}

/// Cap the list while guaranteeing each represented category one slot
/// before over-represented categories consume the rest
fn select(mut questions: Vec<FollowUpQuestion>, cap: usize) -> Vec<FollowUpQuestion> {
    questions.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.category.order().cmp(&b.category.order()))
    });

    let mut picked: Vec<usize> = Vec::with_capacity(cap);
    for category in QuestionCategory::ALL {
        if picked.len() == cap {
            break;
        }
        if let Some(index) = questions.iter().position(|q| q.category == category) {
            picked.push(index);
        }
    }
    for index in 0..questions.len() {
        if picked.len() == cap {
            break;
        }
        if !picked.contains(&index) {
            picked.push(index);
        }
    }

    picked.sort_unstable();
    let mut selected: Vec<FollowUpQuestion> = picked
        .into_iter()
        .map(|i| questions[i].clone())
        .collect();
    selected.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.category.order().cmp(&b.category.order()))
    });
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use vetnlp_core::{AnalysisResult, Frequency, PatientInfo};

    fn empty_result() -> AnalysisResult {
        AnalysisResult {
            patient_info: PatientInfo::default(),
            symptoms: vec![],
            suspected_diseases: vec![],
            key_phrases: vec![],
            raw_text: "The weather is nice today.".to_string(),
        }
    }

    fn symptom(key: &str) -> SymptomExtraction {
        SymptomExtraction {
            symptom: key.to_string(),
            duration: None,
            severity: Severity::Unknown,
            frequency: Frequency::Unknown,
            context: String::new(),
        }
    }

    fn generator() -> QuestionGenerator {
        QuestionGenerator::new(QuestionConfig::default())
    }

    #[test]
    fn test_empty_analysis_still_yields_general_questions() {
        let questions = generator().generate(&empty_result(), &[]);
        assert!(!questions.is_empty());
        assert!(questions.len() <= 8);
        for question in &questions {
            assert!(matches!(
                question.category,
                QuestionCategory::MedicalHistory
                    | QuestionCategory::Lifestyle
                    | QuestionCategory::TreatmentHistory
                    | QuestionCategory::AdditionalSymptoms
            ));
        }
    }

    #[test]
    fn test_cap_is_respected_under_flood() {
        let mut result = empty_result();
        result.symptoms = vec![
            symptom("vomiting"),
            symptom("diarrhea"),
            symptom("lethargy"),
            symptom("fever"),
            symptom("itching"),
            symptom("cough"),
        ];
        let questions = generator().generate(&result, &[]);
        assert!(questions.len() <= 8);
    }

    #[test]
    fn test_each_represented_category_survives_truncation() {
        let mut result = empty_result();
        result.symptoms = vec![
            symptom("vomiting"),
            symptom("diarrhea"),
            symptom("lethargy"),
            symptom("fever"),
        ];
        let questions = generator().generate(&result, &[]);

        // Symptom-detail questions alone would fill the cap; the general
        // categories must still be represented
        let categories: Vec<QuestionCategory> = questions.iter().map(|q| q.category).collect();
        assert!(categories.contains(&QuestionCategory::SymptomDetails));
        assert!(categories.contains(&QuestionCategory::MedicalHistory));
        assert!(categories.contains(&QuestionCategory::Lifestyle));
        assert!(categories.contains(&QuestionCategory::TreatmentHistory));
        assert!(categories.contains(&QuestionCategory::SymptomSeverity));
    }

    #[test]
    fn test_missing_duration_asks_duration_question() {
        let mut result = empty_result();
        result.patient_info.animal_type = Some("dog".to_string());
        result.symptoms = vec![symptom("vomiting")];
        let questions = generator().generate(&result, &[]);
        assert!(questions
            .iter()
            .any(|q| q.question == "How long has your dog had vomiting?"));
    }

    #[test]
    fn test_filled_modifiers_suppress_their_questions() {
        let mut result = empty_result();
        result.patient_info.animal_type = Some("dog".to_string());
        let mut vomiting = symptom("vomiting");
        vomiting.duration = Some(vetnlp_core::Duration {
            raw: "for 3 days".to_string(),
            value: 3,
            unit: vetnlp_core::TimeUnit::Days,
        });
        result.symptoms = vec![vomiting];
        let questions = generator().generate(&result, &[]);
        assert!(!questions
            .iter()
            .any(|q| q.question.starts_with("How long has your dog had")));
    }

    #[test]
    fn test_priority_ordering_deterministic() {
        let mut result = empty_result();
        result.symptoms = vec![symptom("vomiting"), symptom("diarrhea")];
        let matches = vec![DiseaseExtraction::new(
            "gastroenteritis",
            0.5,
            vec!["vomiting".to_string(), "diarrhea".to_string()],
        )];

        let first = generator().generate(&result, &matches);
        let second = generator().generate(&result, &matches);
        assert_eq!(first, second);

        for window in first.windows(2) {
            assert!(window[0].priority >= window[1].priority);
            if window[0].priority == window[1].priority {
                assert!(window[0].category.order() <= window[1].category.order());
            }
        }
    }

    #[test]
    fn test_low_confidence_disease_gets_no_confirmation() {
        let mut result = empty_result();
        result.symptoms = vec![symptom("itching")];
        let matches = vec![DiseaseExtraction::new("dermatitis", 0.25, vec![])];
        let questions = generator().generate(&result, &matches);
        assert!(!questions
            .iter()
            .any(|q| q.category == QuestionCategory::DiseaseConfirmation));
    }

    #[test]
    fn test_vaccination_question_not_duplicated_across_diseases() {
        let mut result = empty_result();
        result.symptoms = vec![symptom("vomiting"), symptom("diarrhea")];
        let matches = vec![
            DiseaseExtraction::new("parvovirus", 0.65, vec![]),
            DiseaseExtraction::new("gastroenteritis", 0.5, vec![]),
        ];
        let questions = generator().generate(&result, &matches);
        let vaccination_count = questions
            .iter()
            .filter(|q| q.question.contains("vaccinations"))
            .count();
        assert!(vaccination_count <= 1);
    }
}
