mod worker;

pub use worker::{AnalysisEvent, AnalysisSession};
