use std::sync::Arc;
use tracing::warn;

use super::llm_client::{GenerationRequest, LLMClient};
use super::prompt::PromptBuilder;
use crate::domain::StageOutcome;

/// Demande au modèle des mots-clés de recherche. Toute erreur de
/// transport est absorbée : le message tient lieu de résultat.
pub struct KeywordExtractor<C: LLMClient> {
    llm: Arc<C>,
    prompts: PromptBuilder,
}

impl<C: LLMClient> KeywordExtractor<C> {
    pub fn new(llm: Arc<C>, prompts: PromptBuilder) -> Self {
        Self { llm, prompts }
    }

    pub fn run(&self, table_text: &str) -> StageOutcome {
        let request = GenerationRequest {
            prompt: self.prompts.build_keywords(table_text),
        };
        match self.llm.generate(&request) {
            Ok(reply) => StageOutcome::Completed(reply),
            Err(err) => {
                warn!("erreur" = %err, "message" = "échec de l'extraction des mots-clés");
                StageOutcome::Failed(format!("Erreur lors de l'extraction des mots-clés : {err:#}"))
            }
        }
    }
}

/// Demande au modèle un verdict 0/1 par ligne, même politique
/// d'absorption des erreurs.
pub struct ConflictClassifier<C: LLMClient> {
    llm: Arc<C>,
    prompts: PromptBuilder,
}

impl<C: LLMClient> ConflictClassifier<C> {
    pub fn new(llm: Arc<C>, prompts: PromptBuilder) -> Self {
        Self { llm, prompts }
    }

    pub fn run(&self, table_text: &str) -> StageOutcome {
        let request = GenerationRequest {
            prompt: self.prompts.build_classification(table_text),
        };
        match self.llm.generate(&request) {
            Ok(reply) => StageOutcome::Completed(reply),
            Err(err) => {
                warn!("erreur" = %err, "message" = "échec de l'analyse des conflits");
                StageOutcome::Failed(format!("Erreur lors de l'analyse des conflits : {err:#}"))
            }
        }
    }
}

/// Termes séparés par des virgules, joints par ` OR `.
pub fn build_search_query(keywords_reply: &str) -> Option<String> {
    let terms: Vec<&str> = keywords_reply
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::llm_client::MockLLMClient;
    use crate::analysis::prompt::PromptTemplate;

    fn extractor(mock: &MockLLMClient) -> KeywordExtractor<MockLLMClient> {
        KeywordExtractor::new(
            Arc::new(mock.clone()),
            PromptBuilder::new(PromptTemplate::default()),
        )
    }

    #[test]
    fn extractor_returns_the_reply_verbatim() {
        let mock = MockLLMClient::default();
        mock.push_reply("capteur, valve, brevet");
        let outcome = extractor(&mock).run("titre\ncapteur");
        assert_eq!(
            outcome,
            StageOutcome::Completed("capteur, valve, brevet".to_string())
        );
    }

    #[test]
    fn extractor_swallows_transport_errors() {
        let mock = MockLLMClient::default();
        let outcome = extractor(&mock).run("titre\ncapteur");
        assert!(outcome.is_failed());
        assert!(outcome.display_text().contains("mots-clés"));
    }

    #[test]
    fn classifier_swallows_transport_errors() {
        let mock = MockLLMClient::default();
        let classifier = ConflictClassifier::new(
            Arc::new(mock),
            PromptBuilder::new(PromptTemplate::default()),
        );
        let outcome = classifier.run("titre\nvalve");
        assert!(outcome.is_failed());
        assert!(outcome.display_text().contains("conflits"));
    }

    #[test]
    fn search_query_joins_terms_with_or() {
        assert_eq!(
            build_search_query("capteur optique, valve,  brevet "),
            Some("capteur optique OR valve OR brevet".to_string())
        );
        assert_eq!(build_search_query("  ,  , "), None);
        assert_eq!(build_search_query(""), None);
    }
}
