//! HTTP implementation of the backend contract.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{RecordApi, TagOptions, TokenSource};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    CreatedResponse, Question, QuestionPayload, QuestionnaireFull, QuestionnairePayload,
    QuestionnaireShort,
};

/// List endpoints answer either a bare array or `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Wrapped { data } => data,
        }
    }
}

/// Typed client for the question bank backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenSource,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("quizbank-frontend/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Cannot build HTTP client: {}", e)))?;

        let tokens = TokenSource::new(Some(config.token_path.clone()), config.api_token.clone());
        Ok(Self::with_client(http, config.api_url.clone(), tokens))
    }

    /// Create a client around an existing HTTP client.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>, tokens: TokenSource) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenSource {
        &self.tokens
    }

    /// Base URL plus percent-encoded path segments.
    fn url(&self, segments: &[&str]) -> Result<Url, AppError> {
        let invalid = || AppError::Internal(format!("Invalid API URL {:?}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Attach the bearer token. Fails before anything is sent when no token
    /// is available.
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, AppError> {
        let token = self.tokens.resolve()?;
        Ok(request.bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.header(ACCEPT, "application/json").send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Backend request failed");
        Err(AppError::from_status(status.as_u16(), &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, AppError> {
        let request = self.authorized(self.http.get(self.url(segments)?))?;
        Ok(self.send(request).await?.json().await?)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        authenticated: bool,
    ) -> Result<Vec<T>, AppError> {
        let mut request = self.http.get(self.url(segments)?);
        if authenticated {
            request = self.authorized(request)?;
        }
        let body: ListBody<T> = self.send(request).await?.json().await?;
        Ok(body.into_vec())
    }

    async fn put_json<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<String, AppError> {
        let request = self.authorized(self.http.put(self.url(segments)?).json(body))?;
        let created: CreatedResponse = self.send(request).await?.json().await?;
        Ok(created.id)
    }

    async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.authorized(self.http.patch(self.url(segments)?).json(body))?;
        Ok(self.send(request).await?.json().await?)
    }

    /// GET /questions
    pub async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        self.get_list(&["questions"], true).await
    }

    /// GET /questionnaires
    pub async fn list_questionnaires(&self) -> Result<Vec<QuestionnaireShort>, AppError> {
        self.get_list(&["questionnaires"], true).await
    }

    /// GET /questionnaire/{id}/full
    pub async fn fetch_questionnaire_full(&self, id: &str) -> Result<QuestionnaireFull, AppError> {
        self.get_json(&["questionnaire", id, "full"]).await
    }

    /// GET /questions/subjects (unauthenticated)
    pub async fn list_subjects(&self) -> Result<Vec<String>, AppError> {
        self.get_list(&["questions", "subjects"], false).await
    }

    /// GET /questions/uses (unauthenticated)
    pub async fn list_uses(&self) -> Result<Vec<String>, AppError> {
        self.get_list(&["questions", "uses"], false).await
    }
}

#[async_trait]
impl RecordApi for ApiClient {
    async fn fetch_question(&self, id: &str) -> Result<Question, AppError> {
        self.get_json(&["question", id]).await
    }

    async fn create_question(&self, payload: &QuestionPayload) -> Result<String, AppError> {
        let id = self.put_json(&["question"], payload).await?;
        tracing::info!("Question {} created", id);
        Ok(id)
    }

    async fn update_question(
        &self,
        id: &str,
        payload: &QuestionPayload,
    ) -> Result<Question, AppError> {
        self.patch_json(&["question", id], payload).await
    }

    async fn fetch_questionnaire(&self, id: &str) -> Result<QuestionnaireShort, AppError> {
        self.get_json(&["questionnaire", id, "short"]).await
    }

    async fn create_questionnaire(
        &self,
        payload: &QuestionnairePayload,
    ) -> Result<String, AppError> {
        let id = self.put_json(&["questionnaire"], payload).await?;
        tracing::info!("Questionnaire {} created", id);
        Ok(id)
    }

    async fn update_questionnaire(
        &self,
        id: &str,
        payload: &QuestionnairePayload,
    ) -> Result<QuestionnaireShort, AppError> {
        self.patch_json(&["questionnaire", id], payload).await
    }

    async fn load_tag_options(&self) -> TagOptions {
        let (subjects, uses) = tokio::join!(self.list_subjects(), self.list_uses());
        match (subjects, uses) {
            (Ok(subjects), Ok(uses)) => TagOptions { subjects, uses },
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Cannot load subjects/uses: {}", e);
                TagOptions::default()
            }
        }
    }
}
