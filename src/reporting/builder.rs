use crate::domain::Report;

const RULE: &str =
    "──────────────────────────────────────────────────────────────────────";

/// Rendu textuel à gabarit fixe. Fonction pure : le même rapport
/// produit le même texte.
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn render(report: &Report) -> String {
        let mut out = String::new();

        out.push_str("╔════════════════════════════════════════════════════════════════════╗\n");
        out.push_str("║                   RAPPORT D'ANALYSE DE BREVETS                     ║\n");
        out.push_str("╚════════════════════════════════════════════════════════════════════╝\n\n");

        out.push_str(&format!("Fichier : {}\n", report.source_file));
        out.push_str(&format!(
            "Date    : {}\n\n",
            report.generated_at.format("%d.%m.%Y %H:%M:%S")
        ));

        out.push_str(RULE);
        out.push_str("\n\nEXTRACTION DES MOTS-CLÉS :\n");
        out.push_str(report.keywords.display_text());
        out.push_str("\n\nREQUÊTE DE RECHERCHE :\n");
        out.push_str(report.search_query.as_deref().unwrap_or("aucune"));
        out.push_str("\n\n");

        out.push_str(RULE);
        out.push_str("\n\nANALYSE DES CONFLITS :\n");
        out.push_str(report.classification.display_text());
        out.push_str("\n\nLISTE BINAIRE EXTRAITE :\n");
        out.push_str(&report.judgements.to_string());
        out.push_str("\n\n");

        out.push_str(RULE);
        out.push_str("\n\nSTATISTIQUES :\n");
        out.push_str(&format!("• Lignes évaluées   : {}\n", report.stats.total));
        out.push_str(&format!("• Conflits détectés : {}\n", report.stats.conflicts));
        out.push_str(&format!("• Sans conflit      : {}\n", report.stats.no_conflicts));
        out.push_str(&format!("• Taux de conflit   : {}\n", report.stats.rate_label()));

        out.push_str("\n");
        out.push_str(RULE);
        out.push_str("\n\nRÉSUMÉ :\n");
        out.push_str(&summary_line(
            !report.keywords.is_failed(),
            "Mots-clés extraits",
            "Extraction des mots-clés en échec",
        ));
        out.push_str(&summary_line(
            !report.classification.is_failed(),
            "Analyse des conflits terminée",
            "Analyse des conflits en échec",
        ));
        out.push_str("• Statistiques calculées\n");

        out
    }
}

fn summary_line(ok: bool, done: &str, failed: &str) -> String {
    if ok {
        format!("• {done}\n")
    } else {
        format!("• {failed}\n")
    }
}
