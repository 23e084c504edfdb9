use crate::domain::ports::{BackendError, PasswordBackend};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Handle;

#[derive(Debug, Serialize)]
struct CheckPasswordRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

// Thin reqwest client for the team's text-generation proxy.
//
// Dialogs run synchronously inside a tick, so each call parks the calling
// blocking worker on the runtime handle. Never call it from an async task.
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    team_token: String,
    runtime: Handle,
}

impl LlmClient {
    pub fn new(
        base_url: impl Into<String>,
        team_token: impl Into<String>,
        timeout: Duration,
        runtime: Handle,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            team_token: team_token.into(),
            runtime,
        })
    }

    async fn post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, BackendError> {
        self.http
            .post(format!("{}{path}", self.base_url))
            .header("X-Team", &self.team_token)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(path, error = %e, "llm proxy unreachable");
                BackendError(format!("service unavailable: {e}"))
            })
    }
}

impl PasswordBackend for LlmClient {
    fn check_password(&self, attempt: &str) -> Result<bool, BackendError> {
        self.runtime.block_on(async {
            let response = self
                .post("/api/check_password", &CheckPasswordRequest { password: attempt })
                .await?;
            Ok(response.status() == StatusCode::OK)
        })
    }

    fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        self.runtime.block_on(async {
            let response = self.post("/api/generate", &GenerateRequest { prompt }).await?;
            if !response.status().is_success() {
                return Err(BackendError(format!("generator returned {}", response.status())));
            }
            let body = response
                .json::<GenerateResponse>()
                .await
                .map_err(|e| BackendError(format!("bad generator reply: {e}")))?;
            Ok(body.response)
        })
    }
}
