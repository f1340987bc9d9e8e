use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::files::FileCollections;
use crate::settings::Settings;

pub const DEFAULT_EXPORT_TIMEOUT: Duration = Duration::from_secs(20 * 60);

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx answer. `message` comes from the body when the backend sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    fn from_send(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout)
        } else {
            ApiError::Transport(err)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

/// Body of `POST /admin/workspace/bots/{botId}/git/export`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub commit_message: String,
    pub author: CommitAuthor,
    pub security_token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Authenticated client for the admin backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
    workspace_id: Option<String>,
    export_timeout: Duration,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("workspace_id", &self.workspace_id)
            .field("has_auth_token", &self.auth_token.is_some())
            .field("export_timeout", &self.export_timeout)
            .finish()
    }
}

// reqwest::Client has no PartialEq; two clients pointing at the same backend
// with the same credentials are interchangeable as component props.
impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && self.auth_token == other.auth_token
            && self.workspace_id == other.workspace_id
            && self.export_timeout == other.export_timeout
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
            workspace_id: None,
            export_timeout: DEFAULT_EXPORT_TIMEOUT,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut client = Self::new(settings.api_base_url.clone())
            .with_export_timeout(Duration::from_secs(settings.export_timeout_secs));
        client.auth_token = settings.auth_token.clone();
        client.workspace_id = settings.workspace_id.clone();
        client
    }

    #[cfg(test)]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    #[cfg(test)]
    pub fn with_workspace(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    pub fn with_export_timeout(mut self, timeout: Duration) -> Self {
        self.export_timeout = timeout;
        self
    }

    pub fn export_url(&self, bot_id: &str) -> String {
        format!("{}/admin/workspace/bots/{}/git/export", self.base_url, bot_id)
    }

    pub fn files_url(&self, bot_id: &str) -> String {
        format!("{}/bots/{}/mod/code-editor/files", self.base_url, bot_id)
    }

    fn secured(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        match &self.workspace_id {
            Some(workspace) => builder.header("X-BP-Workspace", workspace),
            None => builder,
        }
    }

    /// Pushes the bot's configuration to its git remote as one commit.
    pub async fn export_to_git(&self, bot_id: &str, request: &ExportRequest) -> Result<(), ApiError> {
        info!("Exporting bot {} to git", bot_id);

        let response = self
            .secured(self.client.post(self.export_url(bot_id)))
            .timeout(self.export_timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::from_send(e, self.export_timeout))?;

        check_status(response).await?;
        info!("Bot {} exported", bot_id);
        Ok(())
    }

    pub async fn fetch_files(&self, bot_id: &str) -> Result<FileCollections, ApiError> {
        debug!("Fetching action files for bot {}", bot_id);

        let response = self
            .secured(self.client.get(self.files_url(bot_id)))
            .send()
            .await?;

        let files: FileCollections = check_status(response).await?.json().await?;
        Ok(files)
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

    warn!("Backend answered {}: {}", status, message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
