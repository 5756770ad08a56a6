//! Question templates
//!
//! Template text with `{animal}` and `{symptom}` slots, each carrying the
//! criticality of the gap it targets. Kept as data so the generator logic
//! stays free of wording.

use vetnlp_core::QuestionCategory;

/// A fixed question template
pub(crate) struct Template {
    pub category: QuestionCategory,
    pub criticality: i32,
    pub question: &'static str,
    pub reason: &'static str,
}

/// Questions probing for symptoms the owner has not mentioned. A group is
/// only asked when none of its keys was extracted.
pub(crate) struct SymptomGroup {
    pub keys: &'static [&'static str],
    pub criticality: i32,
    pub question: &'static str,
    pub reason: &'static str,
}

pub(crate) const GENERAL_TEMPLATES: &[Template] = &[
    Template {
        category: QuestionCategory::MedicalHistory,
        criticality: 4,
        question: "Is your {animal} on any current medications or supplements?",
        reason: "Medications can interact with treatments and mask symptoms",
    },
    Template {
        category: QuestionCategory::MedicalHistory,
        criticality: 4,
        question: "Does your {animal} have any known allergies or sensitivities?",
        reason: "Allergies can cause or complicate symptoms",
    },
    Template {
        category: QuestionCategory::Lifestyle,
        criticality: 3,
        question: "What type of food and diet is your {animal} on?",
        reason: "Diet directly impacts gastrointestinal and systemic health",
    },
    Template {
        category: QuestionCategory::Lifestyle,
        criticality: 3,
        question: "Has there been any recent change in diet, environment, or routine?",
        reason: "Changes often trigger acute illness or symptom onset",
    },
    Template {
        category: QuestionCategory::TreatmentHistory,
        criticality: 3,
        question: "Has your {animal} been treated for this issue before? If yes, what was the treatment?",
        reason: "Prior response to treatment narrows the likely cause",
    },
    Template {
        category: QuestionCategory::TreatmentHistory,
        criticality: 3,
        question: "Are you currently giving any home remedies or over-the-counter treatments?",
        reason: "Home treatments can mask or worsen the condition",
    },
];

pub(crate) const ADDITIONAL_SYMPTOM_GROUPS: &[SymptomGroup] = &[
    SymptomGroup {
        keys: &["loss_of_appetite", "dehydration"],
        criticality: 4,
        question: "Have you noticed any changes in your {animal}'s appetite or drinking habits?",
        reason: "Appetite and hydration changes indicate systemic illness",
    },
    SymptomGroup {
        keys: &["vomiting", "diarrhea"],
        criticality: 4,
        question: "Is your {animal} experiencing any vomiting or diarrhea?",
        reason: "Gastrointestinal signs are common and diagnostically important",
    },
    SymptomGroup {
        keys: &["fever", "lethargy"],
        criticality: 4,
        question: "Have you noticed any fever, unusual energy levels, or lethargy?",
        reason: "These indicate systemic or infectious disease",
    },
    SymptomGroup {
        keys: &["itching", "skin_lesion", "ear_discharge"],
        criticality: 3,
        question: "Is your {animal} scratching, licking, or showing any skin or ear issues?",
        reason: "Dermatological issues are common and often missed",
    },
];

/// Fill the `{animal}` and `{symptom}` slots of a template
pub(crate) fn fill(template: &str, animal: &str, symptom: Option<&str>) -> String {
    let mut text = template.replace("{animal}", animal);
    if let Some(symptom) = symptom {
        text = text.replace("{symptom}", symptom);
    }
    text
}
