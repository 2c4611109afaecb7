//! Remote complaints client
//!
//! Keeps a local copy of the complaint list. Every successful mutation is
//! followed by a full refetch that replaces the copy; nothing is merged
//! locally. A failed request leaves the copy as it was.
//!
//! Once a write is committed the call returns its record. The refetch needs
//! the admin token, so without one it is skipped; a failed refetch only
//! leaves the copy stale.

use reqwest::multipart::{Form, Part};
use shared::client::{HealthResponse, LoginRequest, LoginResponse};
use shared::models::{AdminComplaintCreate, Complaint, ComplaintDraft, ComplaintStats, FieldUpdate};
use shared::query::{ListQuery, PaginatedResponse};

use crate::{ClientConfig, ClientError, ClientResult, HttpClient};

/// A file picked on the intake form
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    fn into_part(self) -> ClientResult<Part> {
        let media_type = mime_guess::from_path(&self.filename).first_or_octet_stream();
        Part::bytes(self.bytes)
            .file_name(self.filename)
            .mime_str(media_type.essence_str())
            .map_err(ClientError::from)
    }
}

#[derive(Debug, Clone)]
pub struct RemoteComplaints {
    http: HttpClient,
    complaints: Vec<Complaint>,
}

impl RemoteComplaints {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            complaints: Vec::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.build_http_client()?))
    }

    /// Last fetched list (empty until the first successful fetch)
    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.http.get("/health").await
    }

    /// Log in as admin; the returned token is used for later calls
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.http.post("/api/auth/login", &request).await?;
        self.http.set_token(Some(response.token.clone()));
        Ok(response)
    }

    pub fn logout(&mut self) {
        self.http.set_token(None);
    }

    async fn refresh_after_write(&mut self) {
        if self.http.token().is_none() {
            return;
        }
        if let Err(e) = self.list().await {
            tracing::warn!(error = %e, "Refetch after write failed, keeping cached list");
        }
    }

    /// Fetch the full list and replace the local copy
    pub async fn list(&mut self) -> ClientResult<&[Complaint]> {
        self.complaints = self.http.get("/api/complaints").await?;
        tracing::debug!(count = self.complaints.len(), "Complaints refreshed");
        Ok(&self.complaints)
    }

    /// Submit a new complaint, then refetch
    pub async fn create(&mut self, draft: &ComplaintDraft) -> ClientResult<Complaint> {
        let created: Complaint = self.http.post("/api/complaints", draft).await?;
        self.refresh_after_write().await;
        Ok(created)
    }

    /// Submit through the multipart form route with real files
    ///
    /// `draft.attachments` is ignored; the server measures the files.
    pub async fn create_with_files(
        &mut self,
        draft: &ComplaintDraft,
        files: Vec<UploadFile>,
    ) -> ClientResult<Complaint> {
        let mut form = Form::new()
            .text("name", draft.name.clone())
            .text("email", draft.email.clone())
            .text("type", draft.complaint_type.as_str())
            .text("location", draft.location.clone())
            .text("description", draft.description.clone())
            .text("urgency", draft.urgency.as_str());
        for file in files {
            form = form.part("attachments", file.into_part()?);
        }

        let created: Complaint = self
            .http
            .post_multipart("/api/complaints/form", form)
            .await?;
        self.refresh_after_write().await;
        Ok(created)
    }

    /// Replace the citizen fields of `id`, then refetch
    pub async fn update(&mut self, id: i64, draft: &ComplaintDraft) -> ClientResult<Complaint> {
        let updated: Complaint = self
            .http
            .put(&format!("/api/complaints/{id}"), draft)
            .await?;
        self.refresh_after_write().await;
        Ok(updated)
    }

    // ========== Admin API ==========

    pub async fn page(&self, query: &ListQuery) -> ClientResult<PaginatedResponse<Complaint>> {
        self.http.get_query("/api/admin/complaints", query).await
    }

    pub async fn stats(&self) -> ClientResult<ComplaintStats> {
        self.http.get("/api/admin/complaints/stats").await
    }

    pub async fn admin_create(&mut self, create: &AdminComplaintCreate) -> ClientResult<Complaint> {
        let created: Complaint = self.http.post("/api/admin/complaints", create).await?;
        self.refresh_after_write().await;
        Ok(created)
    }

    pub async fn update_field(&mut self, id: i64, update: &FieldUpdate) -> ClientResult<Complaint> {
        let updated: Complaint = self
            .http
            .patch(&format!("/api/admin/complaints/{id}"), update)
            .await?;
        self.refresh_after_write().await;
        Ok(updated)
    }

    pub async fn resolve(&mut self, id: i64) -> ClientResult<Complaint> {
        let resolved: Complaint = self
            .http
            .post_empty(&format!("/api/admin/complaints/{id}/resolve"))
            .await?;
        self.refresh_after_write().await;
        Ok(resolved)
    }

    pub async fn delete(&mut self, id: i64) -> ClientResult<()> {
        let _: bool = self
            .http
            .delete(&format!("/api/admin/complaints/{id}"))
            .await?;
        self.refresh_after_write().await;
        Ok(())
    }
}
