use anyhow::{Context, Result};
use parking_lot::Mutex;
use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

pub trait LLMClient: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
}

pub struct OllamaClient {
    endpoint: String,
    model: String,
    http: HttpClient,
}

impl OllamaClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        // Pas de délai d'expiration : un serveur muet bloque le worker,
        // jamais l'appelant.
        let http = HttpClient::builder()
            .timeout(None)
            .build()
            .context("impossible d'initialiser le client HTTP pour Ollama")?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            http,
        })
    }
}

impl LLMClient for OllamaClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let payload = OllamaGenerateRequest {
            model: &self.model,
            prompt: &request.prompt,
            stream: false,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .context("appel HTTP au serveur Ollama impossible")?
            .error_for_status()
            .context("le serveur Ollama a renvoyé un statut d'erreur")?;

        let raw: OllamaGenerateResponse = response
            .json()
            .context("réponse du serveur Ollama illisible")?;

        Ok(raw.response)
    }
}

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[derive(Clone, Default)]
pub struct MockLLMClient {
    replies: Arc<Mutex<VecDeque<String>>>,
}

impl MockLLMClient {
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().push_back(reply.into());
    }
}

impl LLMClient for MockLLMClient {
    fn generate(&self, _: &GenerationRequest) -> Result<String> {
        self.replies
            .lock()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("aucune réponse mock disponible"))
    }
}
