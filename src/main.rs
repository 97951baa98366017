use anyhow::anyhow;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use patscan::analysis::{
    ConflictClassifier, KeywordExtractor, PromptBuilder, ResponseParser,
};
use patscan::domain::{ReportStats, StageOutcome};
use patscan::reporting::{render_terminal, PieChart, ReportBuilder, ReportWriter, DEFAULT_REPORT_FILE};
use patscan::resources::load_spreadsheet;
use patscan::session::{AnalysisEvent, AnalysisSession};
use patscan::{AnalysisPipeline, OllamaClient, PromptTemplate};

#[derive(Parser)]
#[command(name = "patscan", version, about = "Patent Scanner CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Passe complète : mots-clés, conflits, rapport et graphique
    Analyze {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "http://127.0.0.1:11434/api/generate")]
        llm_endpoint: String,
        #[arg(long, default_value = "llama3")]
        llm_model: String,
        #[arg(long, default_value = DEFAULT_REPORT_FILE)]
        output: PathBuf,
    },
    /// Extraction des mots-clés seule
    Keywords {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "http://127.0.0.1:11434/api/generate")]
        llm_endpoint: String,
        #[arg(long, default_value = "llama3")]
        llm_model: String,
    },
    /// Classification des conflits seule, verdicts en JSON
    Classify {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "http://127.0.0.1:11434/api/generate")]
        llm_endpoint: String,
        #[arg(long, default_value = "llama3")]
        llm_model: String,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Analyze {
            file,
            llm_endpoint,
            llm_model,
            output,
        } => {
            let llm = OllamaClient::new(llm_endpoint, llm_model)?;
            let pipeline = AnalysisPipeline::new(Arc::new(llm), PromptTemplate::default());
            let report = run_session(pipeline, file)?;

            println!("{}", ReportBuilder::render(&report));
            println!("{}", render_terminal(&PieChart::from_stats(&report.stats)));

            ReportWriter::save_to_path(&output, &report)?;
            info!("rapport" = %output.display(), "message" = "rapport écrit");
        }
        Commands::Keywords {
            file,
            llm_endpoint,
            llm_model,
        } => {
            let llm = OllamaClient::new(llm_endpoint, llm_model)?;
            let table = load_spreadsheet(&file)?;
            let prompts = PromptBuilder::new(PromptTemplate::default());
            let extractor = KeywordExtractor::new(Arc::new(llm), prompts);

            let outcome = extractor.run(&table.render_text());
            if outcome.is_failed() {
                warn!("message" = "extraction en échec, le texte d'erreur tient lieu de résultat");
            }
            println!("{}", outcome.display_text());
            if let StageOutcome::Completed(reply) = &outcome {
                if let Some(query) = patscan::analysis::build_search_query(reply) {
                    println!("\nRequête de recherche :\n{query}");
                }
            }
        }
        Commands::Classify {
            file,
            llm_endpoint,
            llm_model,
        } => {
            let llm = OllamaClient::new(llm_endpoint, llm_model)?;
            let table = load_spreadsheet(&file)?;
            let prompts = PromptBuilder::new(PromptTemplate::default());
            let classifier = ConflictClassifier::new(Arc::new(llm), prompts);

            let outcome = classifier.run(&table.render_text());
            let judgements = ResponseParser::extract(outcome.display_text());
            let stats = ReportStats::from_judgements(&judgements);
            let payload = serde_json::json!({
                "judgements": judgements.digits(),
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

/// Lance la passe sur son worker et draine le canal d'événements à
/// cadence fixe, en tenant l'indicateur d'avancement à jour.
fn run_session<C>(pipeline: AnalysisPipeline<C>, file: PathBuf) -> anyhow::Result<patscan::Report>
where
    C: patscan::LLMClient + 'static,
{
    let session = AnalysisSession::spawn(pipeline, file);

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("Analyse en cours...");

    let outcome = loop {
        match session.events().recv_timeout(Duration::from_millis(100)) {
            Ok(AnalysisEvent::Stage(stage)) => spinner.set_message(stage.label()),
            Ok(AnalysisEvent::Completed(report)) => break Ok(*report),
            Ok(AnalysisEvent::Failed(message)) => break Err(anyhow!(message)),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                break Err(anyhow!("le worker d'analyse s'est arrêté sans résultat"))
            }
        }
    };

    session.join();
    spinner.finish_and_clear();
    outcome
}
