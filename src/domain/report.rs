use chrono::{DateTime, Utc};
use serde::Serialize;

use super::judgement::JudgementList;

/// Résultat étiqueté d'un étage : un échec transporte un texte lisible
/// qui tient lieu de section de résultat à l'affichage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "text")]
pub enum StageOutcome {
    Completed(String),
    Failed(String),
}

impl StageOutcome {
    pub fn display_text(&self) -> &str {
        match self {
            StageOutcome::Completed(text) | StageOutcome::Failed(text) => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StageOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportStats {
    pub total: usize,
    pub conflicts: usize,
    pub no_conflicts: usize,
    pub conflict_rate: Option<f64>,
}

impl ReportStats {
    pub fn from_judgements(judgements: &JudgementList) -> Self {
        let total = judgements.len();
        let conflicts = judgements.conflicts();
        let conflict_rate = if total == 0 {
            None
        } else {
            Some(conflicts as f64 / total as f64 * 100.0)
        };
        Self {
            total,
            conflicts,
            no_conflicts: total - conflicts,
            conflict_rate,
        }
    }

    /// Taux de conflit à une décimale, `n/a` pour une liste vide.
    pub fn rate_label(&self) -> String {
        match self.conflict_rate {
            Some(rate) => format!("{:.1}%", rate),
            None => "n/a".to_string(),
        }
    }
}

/// Artefact immuable d'une passe d'analyse : construit une fois,
/// affiché ou écarté, jamais modifié.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source_file: String,
    pub generated_at: DateTime<Utc>,
    pub keywords: StageOutcome,
    pub classification: StageOutcome,
    pub search_query: Option<String>,
    pub judgements: JudgementList,
    pub stats: ReportStats,
}

impl Report {
    pub fn new(
        source_file: impl Into<String>,
        keywords: StageOutcome,
        classification: StageOutcome,
        search_query: Option<String>,
        judgements: JudgementList,
    ) -> Self {
        let stats = ReportStats::from_judgements(&judgements);
        Self {
            source_file: source_file.into(),
            generated_at: Utc::now(),
            keywords,
            classification,
            search_query,
            judgements,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_from_sample_list() {
        let judgements = JudgementList::from_digits([1, 0, 1, 1, 0]);
        let stats = ReportStats::from_judgements(&judgements);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.conflicts, 3);
        assert_eq!(stats.no_conflicts, 2);
        assert_eq!(stats.rate_label(), "60.0%");
    }

    #[test]
    fn empty_list_has_no_rate() {
        let stats = ReportStats::from_judgements(&JudgementList::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.conflict_rate, None);
        assert_eq!(stats.rate_label(), "n/a");
    }

    #[test]
    fn failed_outcome_text_stands_in_for_result() {
        let outcome = StageOutcome::Failed("le serveur ne répond pas".to_string());
        assert!(outcome.is_failed());
        assert_eq!(outcome.display_text(), "le serveur ne répond pas");
    }

    #[test]
    fn report_computes_stats_once() {
        let report = Report::new(
            "brevets.xlsx",
            StageOutcome::Completed("capteur, valve".to_string()),
            StageOutcome::Completed("[1, 0]".to_string()),
            Some("capteur OR valve".to_string()),
            JudgementList::from_digits([1, 0]),
        );
        assert_eq!(report.stats.total, 2);
        assert_eq!(report.stats.rate_label(), "50.0%");
    }
}
