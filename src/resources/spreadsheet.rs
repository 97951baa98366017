use anyhow::{anyhow, bail, Context, Result};
use calamine::{open_workbook_auto, DataType, Reader};
use std::path::Path;

use crate::domain::TabularContent;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}

/// Charge la première feuille du classeur : la première ligne fournit
/// les en-têtes, les lignes entièrement vides sont ignorées, les
/// lignes irrégulières sont alignées sur le nombre de colonnes.
pub fn load_spreadsheet(path: impl AsRef<Path>) -> Result<TabularContent> {
    let path = path.as_ref();
    if !is_supported(path) {
        bail!(
            "format non pris en charge pour {} (extensions acceptées : .xlsx, .xls)",
            path.display()
        );
    }

    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("impossible d'ouvrir le classeur {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("le classeur {} ne contient aucune feuille", path.display()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| anyhow!("feuille '{}' introuvable", sheet_name))?
        .with_context(|| format!("impossible de lire la feuille '{}'", sheet_name))?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter
        .next()
        .ok_or_else(|| anyhow!("la feuille '{}' est vide", sheet_name))?;

    let mut columns: Vec<String> = header_row.iter().map(cell_to_string).collect();
    let mut rows = Vec::new();
    for row in rows_iter {
        let values: Vec<String> = row.iter().map(cell_to_string).collect();
        if values.iter().all(|value| value.is_empty()) {
            continue;
        }
        rows.push(values);
    }

    align_row_lengths(&mut columns, &mut rows);
    Ok(TabularContent::new(columns, rows))
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        _ => cell.to_string().trim().to_string(),
    }
}

fn align_row_lengths(columns: &mut Vec<String>, rows: &mut Vec<Vec<String>>) {
    let mut column_count = columns.len();
    for row in rows.iter() {
        if row.len() > column_count {
            column_count = row.len();
        }
    }

    if columns.len() < column_count {
        columns.resize(column_count, String::new());
    }

    for row in rows.iter_mut() {
        if row.len() < column_count {
            row.resize(column_count, String::new());
        } else if row.len() > column_count {
            row.truncate(column_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_supported(Path::new("brevets.xlsx")));
        assert!(is_supported(Path::new("brevets.XLS")));
        assert!(!is_supported(Path::new("brevets.csv")));
        assert!(!is_supported(Path::new("brevets")));
    }

    #[test]
    fn unsupported_extension_is_rejected_before_any_read() {
        let err = load_spreadsheet("donnees.txt").unwrap_err();
        assert!(err.to_string().contains("format non pris en charge"));
    }

    #[test]
    fn cell_rendering_trims_and_skips_empty() {
        assert_eq!(cell_to_string(&DataType::Empty), "");
        assert_eq!(cell_to_string(&DataType::String("  valve ".to_string())), "valve");
        assert_eq!(cell_to_string(&DataType::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&DataType::Bool(true)), "true");
    }

    #[test]
    fn ragged_rows_are_aligned_on_the_widest() {
        let mut columns = vec!["a".to_string()];
        let mut rows = vec![
            vec!["1".to_string(), "2".to_string(), "3".to_string()],
            vec!["4".to_string()],
        ];
        align_row_lengths(&mut columns, &mut rows);
        assert_eq!(columns.len(), 3);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1], vec!["4", "", ""]);
    }
}
