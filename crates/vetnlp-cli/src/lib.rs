//! vetnlp CLI library - pipeline orchestration and reporting
//!
//! Wires the extraction engine and the question generator together over the
//! shared static catalogue, and renders the results for humans or machines.
//! All decisions live in the core crates; this is glue.

use std::sync::Arc;

use serde::Serialize;

use vetnlp_core::{
    AnalysisResult, AnalyzerConfig, DiseaseCatalog, FollowUpQuestion, Result,
};
use vetnlp_engine::{PatientAnalyzer, StaticCatalog};
use vetnlp_lexicon::Lexicon;
use vetnlp_questions::QuestionGenerator;

pub mod report;

/// Analysis plus the generated question list, as exported over the JSON
/// boundary. Field names are the stable schema contract.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub follow_up_questions: Vec<FollowUpQuestion>,
}

/// One-stop pipeline: analyze text, then generate follow-up questions
pub struct Pipeline {
    analyzer: PatientAnalyzer,
    questions: QuestionGenerator,
}

impl Pipeline {
    /// Build with the default lexicon and static catalogue
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let catalog: Arc<dyn DiseaseCatalog> = Arc::new(StaticCatalog::with_defaults());
        Self::with_catalog(config, catalog)
    }

    /// Build over a caller-supplied catalogue (e.g. a fallback-wrapped
    /// external store)
    pub fn with_catalog(
        config: AnalyzerConfig,
        catalog: Arc<dyn DiseaseCatalog>,
    ) -> Result<Self> {
        let lexicon = Lexicon::with_defaults()?;
        let analyzer = PatientAnalyzer::new(lexicon, Arc::clone(&catalog), config.clone());
        let questions = QuestionGenerator::new(config.questions).with_catalog(catalog);
        Ok(Self {
            analyzer,
            questions,
        })
    }

    /// Run one analysis end-to-end
    pub fn run(&self, text: &str, generate_questions: bool) -> Result<PipelineOutput> {
        let analysis = self.analyzer.analyze(text)?;
        let follow_up_questions = if generate_questions {
            self.questions
                .generate(&analysis, &analysis.suspected_diseases)
        } else {
            Vec::new()
        };

        Ok(PipelineOutput {
            analysis,
            follow_up_questions,
        })
    }
}
