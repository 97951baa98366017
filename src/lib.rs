pub mod analysis;
pub mod domain;
pub mod reporting;
pub mod resources;
pub mod session;

pub use analysis::{AnalysisPipeline, AnalysisStage, LLMClient, OllamaClient, PromptTemplate, ResponseParser};
pub use domain::{Judgement, JudgementList, Report, ReportStats, StageOutcome, TabularContent};
pub use reporting::{PieChart, ReportBuilder, ReportWriter};
pub use session::{AnalysisEvent, AnalysisSession};
