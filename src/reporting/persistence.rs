use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::builder::ReportBuilder;
use crate::domain::Report;

/// Nom de fichier historique du rapport, écrasé à chaque passe.
pub const DEFAULT_REPORT_FILE: &str = "extracted_keywords.txt";

pub struct ReportWriter;

impl ReportWriter {
    pub fn save_to_path(path: impl AsRef<Path>, report: &Report) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("impossible de créer le dossier {}", parent.display())
                })?;
            }
        }
        let rendered = ReportBuilder::render(report);
        fs::write(path, rendered)
            .with_context(|| format!("impossible d'écrire le rapport dans {}", path.display()))?;
        Ok(())
    }
}
