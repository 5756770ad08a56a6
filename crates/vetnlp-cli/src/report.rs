//! Human-readable report rendering
//!
//! Consumes the core output only; field meanings and ordering come from the
//! analysis, never recomputed here.

use chrono::Utc;

use vetnlp_core::{AnalysisResult, FollowUpQuestion, QuestionCategory};

const RULE: &str = "============================================================";

/// Render the full analysis report with the question list appended
pub fn render(analysis: &AnalysisResult, questions: &[FollowUpQuestion]) -> String {
    let mut lines = Vec::new();

    lines.push(RULE.to_string());
    lines.push("PATIENT ANALYSIS REPORT".to_string());
    lines.push(format!("Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")));
    lines.push(RULE.to_string());

    lines.push(String::new());
    lines.push("[PATIENT INFORMATION]".to_string());
    let info = &analysis.patient_info;
    if info.is_empty() {
        lines.push("  No demographics extracted".to_string());
    }
    if let Some(animal) = &info.animal_type {
        lines.push(format!("  Animal Type: {animal}"));
    }
    if let Some(age) = &info.age {
        lines.push(format!("  Age: {} ({})", age.normalized(), age.raw));
    }
    if let Some(breed) = &info.breed {
        lines.push(format!("  Breed: {breed}"));
    }
    if let Some(gender) = &info.gender {
        lines.push(format!("  Gender: {gender}"));
    }
    if let Some(weight) = &info.weight {
        lines.push(format!("  Weight: {} kg ({})", weight.kilograms, weight.raw));
    }

    lines.push(String::new());
    lines.push("[EXTRACTED SYMPTOMS]".to_string());
    if analysis.symptoms.is_empty() {
        lines.push("  No symptoms extracted".to_string());
    }
    for symptom in &analysis.symptoms {
        let mut parts = vec![symptom.display_name()];
        if symptom.severity.is_known() {
            parts.push(format!("({})", symptom.severity));
        }
        if let Some(duration) = &symptom.duration {
            parts.push(format!("for {}", duration.normalized()));
        }
        if symptom.frequency.is_known() {
            parts.push(format!("- {}", symptom.frequency));
        }
        lines.push(format!("  * {}", parts.join(" ")));
    }

    lines.push(String::new());
    lines.push("[SUSPECTED CONDITIONS]".to_string());
    if analysis.suspected_diseases.is_empty() {
        lines.push("  No conditions suspected".to_string());
    }
    for disease in &analysis.suspected_diseases {
        lines.push(format!(
            "  * {} ({:.1}% confidence)",
            disease.disease_name.replace('_', " "),
            disease.confidence * 100.0
        ));
        if !disease.related_symptoms.is_empty() {
            let related: Vec<String> = disease
                .related_symptoms
                .iter()
                .map(|s| s.replace('_', " "))
                .collect();
            lines.push(format!("    Related symptoms: {}", related.join(", ")));
        }
    }

    if !analysis.key_phrases.is_empty() {
        lines.push(String::new());
        lines.push("[KEY PHRASES]".to_string());
        for phrase in &analysis.key_phrases {
            lines.push(format!("  * {}", phrase.text));
        }
    }

    if !questions.is_empty() {
        lines.push(String::new());
        lines.push("[RECOMMENDED FOLLOW-UP QUESTIONS]".to_string());
        let mut current: Option<QuestionCategory> = None;
        for (number, question) in questions.iter().enumerate() {
            if current != Some(question.category) {
                current = Some(question.category);
                lines.push(format!("  [{}]", title_case(question.category.as_str())));
            }
            lines.push(format!("  {}. {}", number + 1, question.question));
            lines.push(format!(
                "     priority {} | {}",
                question.priority, question.reason
            ));
        }
    }

    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.join("\n")
}

fn title_case(snake: &str) -> String {
    snake
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
