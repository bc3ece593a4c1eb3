//! HTTP client for the remote journal backend.
//!
//! Every piece of business logic lives server-side, this client only
//! shapes requests, attaches the bearer token and maps failures onto
//! [`ApiError`]. A 401 from any endpoint wipes the persisted session and
//! surfaces [`ApiError::SessionExpired`] so callers can prompt for a
//! fresh login instead of hanging.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ApiError;
use crate::models::{
    Dashboard, DeleteAck, JournalDraft, JournalEntry, JournalPage, LoginPayload, LoginResponse,
    PairCatalog, PairQuery, User,
};
use crate::query::JournalQuery;
use crate::session::{Session, SessionStore};

const TOKEN_ENDPOINT: &str = "auth/v1/token";
const LIST_JOURNAL_ENDPOINT: &str = "functions/v1/get-journal";
const ADD_JOURNAL_ENDPOINT: &str = "functions/v1/add-journal";
const UPDATE_JOURNAL_ENDPOINT: &str = "functions/v1/update-journal";
const DELETE_JOURNAL_ENDPOINT: &str = "functions/v1/delete-journal";
const PAIRS_ENDPOINT: &str = "functions/v1/pairs";
const DASHBOARD_ENDPOINT: &str = "functions/v1/dashboard";

/// Optional screenshot files to send with a create or update.
///
/// An omitted file on update keeps whatever image the entry already has,
/// the backend treats a missing part as "no change".
#[derive(Debug, Clone, Default)]
pub struct Attachments {
    pub before: Option<PathBuf>,
    pub after: Option<PathBuf>,
}

/// Operations the journal backend exposes. Trait seam so commands and
/// tests can run against a double instead of the network.
#[async_trait]
pub trait JournalApi: Send + Sync {
    async fn list_journal(&self, query: &JournalQuery) -> Result<JournalPage, ApiError>;
    async fn create_journal(
        &self,
        draft: &JournalDraft,
        files: &Attachments,
    ) -> Result<JournalEntry, ApiError>;
    async fn update_journal(
        &self,
        id: &str,
        draft: &JournalDraft,
        files: &Attachments,
    ) -> Result<JournalEntry, ApiError>;
    async fn delete_journal(&self, id: &str) -> Result<DeleteAck, ApiError>;
    async fn list_pairs(&self, query: &PairQuery) -> Result<PairCatalog, ApiError>;
    async fn dashboard(&self) -> Result<Dashboard, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    status: bool,
    status_code: u16,
    message: String,
    #[serde(default)]
    data: Vec<JournalEntry>,
    #[serde(default)]
    page: u32,
    #[serde(default)]
    limit: u32,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    status: bool,
    status_code: u16,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct PairsEnvelope {
    status: bool,
    status_code: u16,
    message: String,
    #[serde(default)]
    data: Vec<String>,
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    store: SessionStore,
    session: Option<Session>,
}

impl BackendClient {
    /// Build a client against `base_url`, hydrating any persisted session.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        store: SessionStore,
    ) -> Result<Self, ApiError> {
        let session = store.load()?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            store,
            session,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn session(&self) -> Result<&Session, ApiError> {
        self.session.as_ref().ok_or(ApiError::SessionExpired)
    }

    /// Exchange credentials for a token and persist the session.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, ApiError> {
        let url = self.endpoint(TOKEN_ENDPOINT);
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&LoginPayload {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let response = self.guard(response).await?;
        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        let session = Session {
            token: login.access_token,
            user: login.user.clone(),
        };
        self.store.save(&session)?;
        self.session = Some(session);
        log::info!("Logged in as {}", login.user.email);
        Ok(login.user)
    }

    /// Drop the persisted session.
    pub fn logout(&mut self) -> Result<(), ApiError> {
        self.store.clear()?;
        self.session = None;
        Ok(())
    }

    /// Map non-2xx responses onto the error taxonomy. A 401 additionally
    /// clears the persisted session.
    async fn guard(&self, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.store.clear()?;
            return Err(ApiError::SessionExpired);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(Self::error_message(response).await));
        }
        if !status.is_success() {
            return Err(ApiError::ServerRejected {
                status_code: status.as_u16(),
                message: Self::error_message(response).await,
            });
        }
        Ok(response)
    }

    async fn error_message(response: reqwest::Response) -> String {
        match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body),
            Err(_) => String::new(),
        }
    }

    fn draft_form(draft: &JournalDraft) -> Form {
        fn opt_text(value: Option<f64>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        Form::new()
            .text("modal", draft.modal.to_string())
            .text("modal_type", draft.modal_type.as_str())
            .text("tanggal", draft.tanggal.format("%Y-%m-%d").to_string())
            .text("pair", draft.pair.clone())
            .text("side", draft.side.as_str())
            .text("lot", draft.lot.to_string())
            .text("harga_entry", opt_text(draft.harga_entry))
            .text("harga_take_profit", opt_text(draft.harga_take_profit))
            .text("harga_stop_loss", opt_text(draft.harga_stop_loss))
            .text("reason", draft.reason.clone())
            .text("win_lose", draft.win_lose.as_str())
            .text("profit", draft.profit.to_string())
    }

    async fn attach(form: Form, field: &'static str, path: &Path) -> Result<Form, ApiError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("screenshot.png")
            .to_string();
        Ok(form.part(field, Part::bytes(bytes).file_name(file_name)))
    }

    async fn with_attachments(draft: &JournalDraft, files: &Attachments) -> Result<Form, ApiError> {
        let mut form = Self::draft_form(draft);
        if let Some(path) = &files.before {
            form = Self::attach(form, "analisaBefore", path).await?;
        }
        if let Some(path) = &files.after {
            form = Self::attach(form, "analisaAfter", path).await?;
        }
        Ok(form)
    }
}

#[async_trait]
impl JournalApi for BackendClient {
    async fn list_journal(&self, query: &JournalQuery) -> Result<JournalPage, ApiError> {
        let url = self.endpoint(LIST_JOURNAL_ENDPOINT);
        log::debug!("GET {} page={} sort={}", url, query.page, query.sort_by);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.session()?.token)
            .query(&query.to_params())
            .send()
            .await?;

        let response = self.guard(response).await?;
        let envelope: ListEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if !envelope.status {
            return Err(ApiError::ServerRejected {
                status_code: envelope.status_code,
                message: envelope.message,
            });
        }

        Ok(JournalPage {
            data: envelope.data,
            page: envelope.page,
            limit: envelope.limit,
            total: envelope.total,
            total_pages: envelope.total_pages,
        })
    }

    async fn create_journal(
        &self,
        draft: &JournalDraft,
        files: &Attachments,
    ) -> Result<JournalEntry, ApiError> {
        let url = self.endpoint(ADD_JOURNAL_ENDPOINT);
        log::debug!("POST {} pair={}", url, draft.pair);

        let form = Self::with_attachments(draft, files).await?;
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.session()?.token)
            .multipart(form)
            .send()
            .await?;

        let response = self.guard(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn update_journal(
        &self,
        id: &str,
        draft: &JournalDraft,
        files: &Attachments,
    ) -> Result<JournalEntry, ApiError> {
        let url = self.endpoint(UPDATE_JOURNAL_ENDPOINT);
        log::debug!("PUT {} id={}", url, id);

        // Full replace. Omitted file parts keep the existing screenshots.
        let form = Self::with_attachments(draft, files)
            .await?
            .text("id", id.to_string())
            .text("userId", self.session()?.user.id.clone());

        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.session()?.token)
            .multipart(form)
            .send()
            .await?;

        let response = self.guard(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn delete_journal(&self, id: &str) -> Result<DeleteAck, ApiError> {
        let url = self.endpoint(DELETE_JOURNAL_ENDPOINT);
        log::debug!("POST {} id={}", url, id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.session()?.token)
            .json(&serde_json::json!({ "id": id }))
            .send()
            .await?;

        let response = self.guard(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn list_pairs(&self, query: &PairQuery) -> Result<PairCatalog, ApiError> {
        let url = self.endpoint(PAIRS_ENDPOINT);
        log::debug!("GET {}", url);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(t) = query.pair_type {
            params.push(("type", t.as_str().to_string()));
        }
        if let Some(search) = &query.search {
            params.push(("search", search.clone()));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.session()?.token)
            .query(&params)
            .send()
            .await?;

        let response = self.guard(response).await?;
        let envelope: PairsEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if !envelope.status {
            return Err(ApiError::ServerRejected {
                status_code: envelope.status_code,
                message: envelope.message,
            });
        }

        Ok(PairCatalog {
            pairs: envelope.data,
            total: envelope.total,
        })
    }

    async fn dashboard(&self) -> Result<Dashboard, ApiError> {
        let url = self.endpoint(DASHBOARD_ENDPOINT);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.session()?.token)
            .send()
            .await?;

        let response = self.guard(response).await?;
        let envelope: DataEnvelope<Dashboard> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if !envelope.status {
            return Err(ApiError::ServerRejected {
                status_code: envelope.status_code,
                message: envelope.message,
            });
        }

        envelope
            .data
            .ok_or_else(|| ApiError::Parse("response data is empty".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModalType, Side, WinLose};
    use chrono::NaiveDate;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_with_session(dir: &tempfile::TempDir) -> SessionStore {
        let store = SessionStore::with_path(dir.path().join("session.json"));
        store
            .save(&Session {
                token: "tok-123".to_string(),
                user: User {
                    id: "u1".to_string(),
                    email: "trader@example.com".to_string(),
                    role: "authenticated".to_string(),
                    extra: Default::default(),
                },
            })
            .unwrap();
        store
    }

    fn entry_json() -> serde_json::Value {
        serde_json::json!({
            "id": "j1",
            "user_id": "u1",
            "modal": 1000.0,
            "modal_type": "usd",
            "tanggal": "2024-03-01",
            "pair": "EURUSD",
            "side": "buy",
            "lot": 0.5,
            "harga_entry": 1.08,
            "harga_take_profit": 1.09,
            "harga_stop_loss": 1.07,
            "analisa_before": "https://x/before.png",
            "analisa_after": "https://x/undefined",
            "reason": "breakout",
            "win_lose": "win",
            "profit": 120.0,
            "created_at": "2024-03-01T10:00:00Z"
        })
    }

    fn draft() -> JournalDraft {
        JournalDraft {
            modal: 1000.0,
            modal_type: ModalType::Usd,
            tanggal: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            pair: "EURUSD".to_string(),
            side: Side::Buy,
            lot: 0.5,
            harga_entry: Some(1.08),
            harga_take_profit: None,
            harga_stop_loss: None,
            reason: "breakout".to_string(),
            win_lose: WinLose::Win,
            profit: 120.0,
        }
    }

    #[tokio::test]
    async fn test_list_journal_parses_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/functions/v1/get-journal"))
            .and(query_param("page", "1"))
            .and(query_param("sort_by", "tanggal"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": true,
                "status_code": 200,
                "message": "ok",
                "data": [entry_json()],
                "page": 1,
                "limit": 10,
                "total": 1,
                "total_pages": 1
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client =
            BackendClient::new(server.uri(), "anon-key", store_with_session(&dir)).unwrap();
        let page = client.list_journal(&JournalQuery::default()).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].pair, "EURUSD");
        assert_eq!(page.data[0].win_lose, WinLose::Win);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_expires() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/functions/v1/dashboard"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = store_with_session(&dir);
        let client = BackendClient::new(server.uri(), "anon-key", store.clone()).unwrap();

        let err = client.dashboard().await.unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired));
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_calls_without_session_expire_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("session.json"));
        let client = BackendClient::new("http://localhost:9", "anon-key", store).unwrap();

        let err = client.dashboard().await.unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired));
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh-token",
                "user": { "id": "u1", "email": "trader@example.com" }
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("session.json"));
        let mut client = BackendClient::new(server.uri(), "anon-key", store.clone()).unwrap();

        let user = client.login("trader@example.com", "hunter2").await.unwrap();
        assert_eq!(user.id, "u1");
        assert!(client.is_authenticated());
        assert_eq!(store.load().unwrap().unwrap().token, "fresh-token");
    }

    #[tokio::test]
    async fn test_create_journal_returns_entry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/add-journal"))
            .respond_with(ResponseTemplate::new(200).set_body_json(entry_json()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client =
            BackendClient::new(server.uri(), "anon-key", store_with_session(&dir)).unwrap();
        let entry = client
            .create_journal(&draft(), &Attachments::default())
            .await
            .unwrap();
        assert_eq!(entry.id, "j1");
    }

    #[tokio::test]
    async fn test_delete_journal_acks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/delete-journal"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": true,
                "status_code": 200,
                "message": "journal deleted"
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client =
            BackendClient::new(server.uri(), "anon-key", store_with_session(&dir)).unwrap();
        let ack = client.delete_journal("j1").await.unwrap();
        assert!(ack.status);
        assert_eq!(ack.message, "journal deleted");
    }

    #[tokio::test]
    async fn test_server_error_maps_to_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/functions/v1/get-journal"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "message": "database unavailable"
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client =
            BackendClient::new(server.uri(), "anon-key", store_with_session(&dir)).unwrap();
        let err = client.list_journal(&JournalQuery::default()).await.unwrap_err();
        match err {
            ApiError::ServerRejected { status_code, message } => {
                assert_eq!(status_code, 500);
                assert_eq!(message, "database unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
