//! HTTP client for the COROPOTI REST backend.
//!
//! Thin wrapper over `reqwest`: injects the bearer token on every request,
//! sends JSON by default, and switches to multipart where the server
//! accepts file uploads (event creation, post-event documents, profile
//! pictures); multipart requests set no explicit content type so reqwest
//! picks the boundary. Non-2xx responses decode the server's `{ "error" }`
//! envelope and surface its message verbatim.

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::multipart;
use reqwest::{RequestBuilder, Response};
use tracing::debug;

use coropoti_core::conflict::ConflictRow;
use coropoti_core::event::Event;
use coropoti_core::protocol::{
    CancelRequest, CheckConflictRequest, CheckConflictResponse, ErrorResponse, EventListQuery,
    EventUpdateRequest, Invitation, LoginRequest, LoginResponse, RegisterRequest, RsvpRequest,
};
use coropoti_core::user::{LegendCluster, LegendOffice, Profile, User};

const CONNECT_HINT: &str = "Cannot reach the COROPOTI server";

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send, then decode the body or bail with the server's error message.
    async fn handle<T: serde::de::DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T> {
        let resp: Response = self.authed(builder).send().await.context(CONNECT_HINT)?;
        let status = resp.status();
        debug!(%status, "response");
        if !status.is_success() {
            let message = match resp.json::<ErrorResponse>().await {
                Ok(err) => err.error,
                Err(_) => status.to_string(),
            };
            anyhow::bail!("{}", message);
        }
        Ok(resp.json().await?)
    }

    /// Like `handle` but discards the response body.
    async fn handle_empty(&self, builder: RequestBuilder) -> Result<()> {
        let resp: Response = self.authed(builder).send().await.context(CONNECT_HINT)?;
        let status = resp.status();
        debug!(%status, "response");
        if !status.is_success() {
            let message = match resp.json::<ErrorResponse>().await {
                Ok(err) => err.error,
                Err(_) => status.to_string(),
            };
            anyhow::bail!("{}", message);
        }
        Ok(())
    }

    // --- Auth ---

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse> {
        self.handle(self.http.post(self.url("/auth/login")).json(req))
            .await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<LoginResponse> {
        self.handle(self.http.post(self.url("/auth/register")).json(req))
            .await
    }

    pub async fn me(&self) -> Result<User> {
        self.handle(self.http.get(self.url("/auth/me"))).await
    }

    // --- Events ---

    pub async fn list_events(&self, query: &EventListQuery) -> Result<Vec<Event>> {
        self.handle(self.http.get(self.url("/events")).query(query))
            .await
    }

    pub async fn get_event(&self, id: i64) -> Result<Event> {
        self.handle(self.http.get(self.url(&format!("/events/{id}"))))
            .await
    }

    /// Create an event. Always multipart because an attachment may
    /// accompany creation.
    pub async fn create_event(
        &self,
        fields: Vec<(String, String)>,
        attachment: Option<&Path>,
    ) -> Result<Event> {
        let mut form = multipart::Form::new();
        for (key, value) in fields {
            form = form.text(key, value);
        }
        if let Some(path) = attachment {
            form = form.part("attachment", file_part(path).await?);
        }
        self.handle(self.http.post(self.url("/events")).multipart(form))
            .await
    }

    pub async fn update_event(&self, id: i64, req: &EventUpdateRequest) -> Result<Event> {
        self.handle(
            self.http
                .put(self.url(&format!("/events/{id}")))
                .json(req),
        )
        .await
    }

    pub async fn delete_event(&self, id: i64) -> Result<()> {
        self.handle_empty(self.http.delete(self.url(&format!("/events/{id}"))))
            .await
    }

    pub async fn rsvp(&self, id: i64, req: &RsvpRequest) -> Result<()> {
        self.handle_empty(
            self.http
                .post(self.url(&format!("/events/{id}/rsvp")))
                .json(req),
        )
        .await
    }

    pub async fn cancel_event(&self, id: i64, req: &CancelRequest) -> Result<()> {
        self.handle_empty(
            self.http
                .post(self.url(&format!("/events/{id}/cancel")))
                .json(req),
        )
        .await
    }

    /// Upload a completion-proof document (appended, never replacing).
    pub async fn upload_post_document(&self, id: i64, file: &Path) -> Result<Event> {
        let form = multipart::Form::new().part("document", file_part(file).await?);
        self.handle(
            self.http
                .post(self.url(&format!("/events/{id}/post-document")))
                .multipart(form),
        )
        .await
    }

    // --- Conflicts ---

    /// Conflicts touching the current account's events.
    pub async fn conflicts_mine(&self) -> Result<Vec<ConflictRow>> {
        self.handle(self.http.get(self.url("/events/conflicts")))
            .await
    }

    /// Every conflict pair the server knows about.
    pub async fn conflicts_list(&self) -> Result<Vec<ConflictRow>> {
        self.handle(self.http.get(self.url("/events/conflicts/list")))
            .await
    }

    pub async fn check_conflict(
        &self,
        req: &CheckConflictRequest,
    ) -> Result<CheckConflictResponse> {
        self.handle(
            self.http
                .post(self.url("/events/check-conflict"))
                .json(req),
        )
        .await
    }

    // --- Invitations / users ---

    pub async fn invitations(&self) -> Result<Vec<Invitation>> {
        self.handle(self.http.get(self.url("/invitations"))).await
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.handle(self.http.get(self.url("/users"))).await
    }

    /// Flat office legend, for servers with no cluster grouping.
    pub async fn legend_offices(&self) -> Result<Vec<LegendOffice>> {
        self.handle(self.http.get(self.url("/users/legend"))).await
    }

    pub async fn legend_clusters(&self) -> Result<Vec<LegendCluster>> {
        self.handle(self.http.get(self.url("/users/legend/clusters")))
            .await
    }

    // --- Profile ---

    pub async fn profile_me(&self) -> Result<Profile> {
        self.handle(self.http.get(self.url("/profile/me"))).await
    }

    pub async fn profile_of(&self, user_id: i64) -> Result<Profile> {
        self.handle(self.http.get(self.url(&format!("/profile/{user_id}"))))
            .await
    }

    pub async fn profile_save(
        &self,
        fields: Vec<(String, String)>,
        picture: Option<&Path>,
    ) -> Result<Profile> {
        let mut form = multipart::Form::new();
        for (key, value) in fields {
            form = form.text(key, value);
        }
        if let Some(path) = picture {
            form = form.part("picture", file_part(path).await?);
        }
        self.handle(self.http.post(self.url("/profile/save")).multipart(form))
            .await
    }

    pub async fn profile_remove(&self) -> Result<()> {
        self.handle_empty(self.http.delete(self.url("/profile/remove")))
            .await
    }
}

/// Read a file into a multipart part keeping its original name.
async fn file_part(path: &Path) -> Result<multipart::Part> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment")
        .to_string();
    Ok(multipart::Part::bytes(bytes).file_name(name))
}
