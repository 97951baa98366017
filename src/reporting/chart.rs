use colored::Colorize;
use serde::Serialize;

use crate::domain::ReportStats;

pub const NO_CONFLICT_COLOR: &str = "#10b981";
pub const CONFLICT_COLOR: &str = "#ef4444";

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub share_label: String,
    pub color: &'static str,
}

/// Camembert conflit / sans conflit. Valeur pure, rendue ensuite par
/// la couche de présentation.
#[derive(Debug, Clone, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn from_stats(stats: &ReportStats) -> Self {
        let title = "Répartition des conflits".to_string();
        if stats.total == 0 {
            return Self {
                title,
                slices: Vec::new(),
            };
        }

        let share = |count: usize| format!("{:.1}%", count as f64 / stats.total as f64 * 100.0);
        Self {
            title,
            slices: vec![
                PieSlice {
                    label: "Sans conflit".to_string(),
                    count: stats.no_conflicts,
                    share_label: share(stats.no_conflicts),
                    color: NO_CONFLICT_COLOR,
                },
                PieSlice {
                    label: "Conflit".to_string(),
                    count: stats.conflicts,
                    share_label: share(stats.conflicts),
                    color: CONFLICT_COLOR,
                },
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

pub fn render_terminal(chart: &PieChart) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", chart.title));

    if chart.is_empty() {
        out.push_str("Aucune donnée disponible\n");
        return out;
    }

    let total: usize = chart.slices.iter().map(|slice| slice.count).sum();
    let label_width = chart
        .slices
        .iter()
        .map(|slice| slice.label.chars().count())
        .max()
        .unwrap_or(0);

    for slice in &chart.slices {
        let filled = if total == 0 {
            0
        } else {
            (slice.count * BAR_WIDTH + total / 2) / total
        };
        let bar: String = "█".repeat(filled);
        let bar = match slice.color {
            CONFLICT_COLOR => bar.red().to_string(),
            NO_CONFLICT_COLOR => bar.green().to_string(),
            _ => bar,
        };
        out.push_str(&format!(
            "{:<width$}  {}{}  {} ({})\n",
            slice.label,
            bar,
            " ".repeat(BAR_WIDTH - filled),
            slice.share_label,
            slice.count,
            width = label_width
        ));
    }

    out
}
