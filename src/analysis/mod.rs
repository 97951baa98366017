mod llm_client;
mod parser;
mod pipeline;
mod prompt;
mod stages;

pub use llm_client::{GenerationRequest, LLMClient, MockLLMClient, OllamaClient};
pub use parser::{ResponseParser, FALLBACK_DIGITS};
pub use pipeline::{AnalysisPipeline, AnalysisStage};
pub use prompt::{PromptBuilder, PromptTemplate};
pub use stages::{build_search_query, ConflictClassifier, KeywordExtractor};
