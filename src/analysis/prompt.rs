use serde::{Deserialize, Serialize};

const ROWS_PLACEHOLDER: &str = "{rows}";

/// Les deux consignes fixes envoyées au modèle. Le texte du tableau
/// remplace `{rows}` au moment de la construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub keywords: String,
    pub classification: String,
}

impl PromptTemplate {
    pub fn default() -> Self {
        let keywords = concat!(
            "Return keywords for a database search to find patents like {rows}. ",
            "No explanation, nothing else, just give us some keywords back.",
        )
        .to_string();

        let classification = concat!(
            "Rate these patterns and judge about the quality {rows}. ",
            "Return a list where 1 indicates a potential conflict and 0 indicates no conflict. ",
            "Just print the final answer as a list, other integers than 0,1 are not valid.",
        )
        .to_string();

        Self {
            keywords,
            classification,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: PromptTemplate,
}

impl PromptBuilder {
    pub fn new(template: PromptTemplate) -> Self {
        Self { template }
    }

    pub fn build_keywords(&self, table_text: &str) -> String {
        self.template.keywords.replace(ROWS_PLACEHOLDER, table_text)
    }

    pub fn build_classification(&self, table_text: &str) -> String {
        self.template
            .classification
            .replace(ROWS_PLACEHOLDER, table_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_the_table_text() {
        let builder = PromptBuilder::new(PromptTemplate::default());
        let keywords = builder.build_keywords("titre\ncapteur optique");
        assert!(keywords.contains("capteur optique"));
        assert!(!keywords.contains(ROWS_PLACEHOLDER));

        let classification = builder.build_classification("titre\nvalve");
        assert!(classification.contains("valve"));
        assert!(classification.contains("0 indicates no conflict"));
    }
}
