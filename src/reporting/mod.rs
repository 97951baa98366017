mod builder;
mod chart;
mod persistence;

pub use builder::ReportBuilder;
pub use chart::{render_terminal, PieChart, PieSlice, CONFLICT_COLOR, NO_CONFLICT_COLOR};
pub use persistence::{ReportWriter, DEFAULT_REPORT_FILE};
