use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::llm_client::LLMClient;
use super::parser::ResponseParser;
use super::prompt::{PromptBuilder, PromptTemplate};
use super::stages::{build_search_query, ConflictClassifier, KeywordExtractor};
use crate::domain::{Report, StageOutcome, TabularContent};
use crate::resources::load_spreadsheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    ReadingFile,
    ExtractingKeywords,
    ClassifyingRows,
    BuildingReport,
}

impl AnalysisStage {
    pub fn label(self) -> &'static str {
        match self {
            AnalysisStage::ReadingFile => "Lecture du classeur...",
            AnalysisStage::ExtractingKeywords => "Extraction des mots-clés...",
            AnalysisStage::ClassifyingRows => "Évaluation des conflits...",
            AnalysisStage::BuildingReport => "Assemblage du rapport...",
        }
    }
}

pub struct AnalysisPipeline<C: LLMClient> {
    keywords: KeywordExtractor<C>,
    classifier: ConflictClassifier<C>,
}

impl<C: LLMClient> AnalysisPipeline<C> {
    pub fn new(llm: Arc<C>, template: PromptTemplate) -> Self {
        let prompts = PromptBuilder::new(template);
        Self {
            keywords: KeywordExtractor::new(llm.clone(), prompts.clone()),
            classifier: ConflictClassifier::new(llm, prompts),
        }
    }

    pub fn analyze_file(&self, file: impl AsRef<Path>) -> Result<Report> {
        self.analyze_file_with(file, |_| {})
    }

    pub fn analyze_file_with(
        &self,
        file: impl AsRef<Path>,
        on_stage: impl Fn(AnalysisStage),
    ) -> Result<Report> {
        let file_path = file.as_ref();
        on_stage(AnalysisStage::ReadingFile);
        let table = load_spreadsheet(file_path)?;
        info!(
            rows = table.row_count(),
            "fichier" = %file_path.display(),
            "message" = "classeur chargé"
        );

        let source = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());
        Ok(self.analyze_table_with(&source, &table, on_stage))
    }

    pub fn analyze_table(&self, source: &str, table: &TabularContent) -> Report {
        self.analyze_table_with(source, table, |_| {})
    }

    /// Les échecs d'étage sont absorbés en amont : cette fonction
    /// produit toujours un rapport complet.
    pub fn analyze_table_with(
        &self,
        source: &str,
        table: &TabularContent,
        on_stage: impl Fn(AnalysisStage),
    ) -> Report {
        let table_text = table.render_text();

        on_stage(AnalysisStage::ExtractingKeywords);
        let keywords = self.keywords.run(&table_text);

        on_stage(AnalysisStage::ClassifyingRows);
        let classification = self.classifier.run(&table_text);

        on_stage(AnalysisStage::BuildingReport);
        // Le texte d'un étage en échec est analysé tel quel : sans
        // chiffre exploitable il retombe sur la séquence de repli.
        let judgements = ResponseParser::extract(classification.display_text());
        let search_query = match &keywords {
            StageOutcome::Completed(reply) => build_search_query(reply),
            StageOutcome::Failed(_) => None,
        };

        info!(
            judgements = judgements.len(),
            conflicts = judgements.conflicts(),
            "source" = %source,
            "message" = "analyse terminée"
        );

        Report::new(source, keywords, classification, search_query, judgements)
    }
}
