use std::path::PathBuf;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use crate::analysis::{AnalysisPipeline, AnalysisStage, LLMClient};
use crate::domain::Report;

/// Des transitions d'étape, puis exactement un message terminal.
#[derive(Debug)]
pub enum AnalysisEvent {
    Stage(AnalysisStage),
    Completed(Box<Report>),
    Failed(String),
}

const EVENT_CAPACITY: usize = 16;

/// Une passe d'analyse sur son propre fil : les appels bloquants au
/// modèle s'exécutent côté worker, les événements traversent un canal
/// borné que l'appelant draine à sa cadence. Pas de pool, pas
/// d'annulation, pas de reprise.
pub struct AnalysisSession {
    events: Receiver<AnalysisEvent>,
    handle: JoinHandle<()>,
}

impl AnalysisSession {
    pub fn spawn<C>(pipeline: AnalysisPipeline<C>, file: PathBuf) -> Self
    where
        C: LLMClient + 'static,
    {
        let (sender, events) = sync_channel(EVENT_CAPACITY);
        let handle = thread::spawn(move || run_analysis(pipeline, file, sender));
        Self { events, handle }
    }

    pub fn events(&self) -> &Receiver<AnalysisEvent> {
        &self.events
    }

    /// Attend la fin du worker une fois le message terminal reçu.
    pub fn join(self) {
        let _ = self.handle.join();
    }
}

fn run_analysis<C>(pipeline: AnalysisPipeline<C>, file: PathBuf, sender: SyncSender<AnalysisEvent>)
where
    C: LLMClient + 'static,
{
    let progress = sender.clone();
    let result = pipeline.analyze_file_with(&file, move |stage| {
        // un récepteur disparu rend l'envoi sans objet
        let _ = progress.send(AnalysisEvent::Stage(stage));
    });

    let terminal = match result {
        Ok(report) => AnalysisEvent::Completed(Box::new(report)),
        Err(err) => AnalysisEvent::Failed(format!("{err:#}")),
    };
    let _ = sender.send(terminal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{MockLLMClient, PromptTemplate};
    use std::sync::Arc;
    use std::time::Duration;

    fn drain(session: &AnalysisSession) -> Vec<AnalysisEvent> {
        let mut events = Vec::new();
        loop {
            match session.events().recv_timeout(Duration::from_secs(5)) {
                Ok(event) => {
                    let terminal = matches!(
                        event,
                        AnalysisEvent::Completed(_) | AnalysisEvent::Failed(_)
                    );
                    events.push(event);
                    if terminal {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        events
    }

    #[test]
    fn unsupported_file_yields_stage_then_failure() {
        let pipeline =
            AnalysisPipeline::new(Arc::new(MockLLMClient::default()), PromptTemplate::default());
        let session = AnalysisSession::spawn(pipeline, PathBuf::from("donnees.txt"));

        let events = drain(&session);
        session.join();

        assert!(matches!(
            events.first(),
            Some(AnalysisEvent::Stage(AnalysisStage::ReadingFile))
        ));
        match events.last() {
            Some(AnalysisEvent::Failed(message)) => {
                assert!(message.contains("format non pris en charge"));
            }
            other => panic!("attendu un échec terminal, reçu {other:?}"),
        }
    }
}
