//! REST boundary for the property-manager backend.
//!
//! [`ConfigApi`] is the async seam used by app orchestration code.
//! Production uses [`HttpConfigApi`], while tests inject `MockConfigApi` to
//! exercise fetch/mutation flows without a backend. All validation lives
//! server-side and surfaces here only as an HTTP failure; nothing is
//! retried.

use std::future::Future;
use std::pin::Pin;

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::domain::entity::{
    Branch, NewBranch, NewProject, NewProperty, Project, Property, ResponseMessage,
};
use crate::infra::session::{AuthResponse, Credentials, SessionHandle, SignUpRequest};

/// Failure taxonomy for backend calls.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or its response could not be read.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status code.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Boxed async result used by [`ConfigApi`] trait methods.
pub type ApiFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

/// CRUD boundary for the three entity kinds plus the auth endpoints.
///
/// `update_*` calls require a complete entity snapshot, parent references
/// included; partial updates are not supported by the backend.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigApi: Send + Sync {
    fn fetch_projects(&self) -> ApiFuture<Vec<Project>>;
    fn fetch_branches(&self) -> ApiFuture<Vec<Branch>>;
    fn fetch_properties(&self) -> ApiFuture<Vec<Property>>;

    fn create_project(&self, payload: NewProject) -> ApiFuture<ResponseMessage>;
    fn update_project(&self, project: Project) -> ApiFuture<ResponseMessage>;
    fn delete_project(&self, project_id: i64) -> ApiFuture<ResponseMessage>;

    fn create_branch(&self, payload: NewBranch) -> ApiFuture<ResponseMessage>;
    fn update_branch(&self, branch: Branch) -> ApiFuture<ResponseMessage>;
    fn delete_branch(&self, branch_id: i64) -> ApiFuture<ResponseMessage>;

    fn create_property(&self, payload: NewProperty) -> ApiFuture<ResponseMessage>;
    fn update_property(&self, property: Property) -> ApiFuture<ResponseMessage>;
    fn delete_property(&self, property_id: i64) -> ApiFuture<ResponseMessage>;

    fn sign_in(&self, credentials: Credentials) -> ApiFuture<AuthResponse>;
    fn sign_up(&self, request: SignUpRequest) -> ApiFuture<AuthResponse>;
}

/// [`ConfigApi`] implementation over HTTP with bearer authentication.
pub struct HttpConfigApi {
    base_url: Url,
    client: reqwest::Client,
    session: SessionHandle,
}

impl HttpConfigApi {
    /// Creates a client against `base_url`, attaching the session's bearer
    /// token to every request once one is established.
    pub fn new(mut base_url: Url, session: SessionHandle) -> Self {
        // Url::join treats a base without a trailing slash as a file path.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Self {
            base_url,
            client: reqwest::Client::new(),
            session,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|error| ApiError::Network(error.to_string()))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn get_json<T>(&self, path: &str) -> ApiFuture<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self
            .endpoint(path)
            .map(|url| self.authorize(self.client.get(url)));

        Box::pin(async move { send(request?).await })
    }

    fn post_json<B, T>(&self, path: &str, body: &B) -> ApiFuture<T>
    where
        B: Serialize,
        T: DeserializeOwned + Send + 'static,
    {
        let request = self
            .endpoint(path)
            .map(|url| self.authorize(self.client.post(url)).json(body));

        Box::pin(async move { send(request?).await })
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|error| ApiError::Network(error.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        return Err(ApiError::Server {
            status: status.as_u16(),
            message: server_message(&body, status),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|error| ApiError::Network(error.to_string()))
}

/// Prefers the backend's `{ message }` body over the raw text or the
/// canonical status reason.
fn server_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(message) = serde_json::from_str::<ResponseMessage>(body) {
        return message.message;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

impl ConfigApi for HttpConfigApi {
    fn fetch_projects(&self) -> ApiFuture<Vec<Project>> {
        self.get_json("api/project/findAll")
    }

    fn fetch_branches(&self) -> ApiFuture<Vec<Branch>> {
        self.get_json("api/branch/findAll")
    }

    fn fetch_properties(&self) -> ApiFuture<Vec<Property>> {
        self.get_json("api/property/findAll")
    }

    fn create_project(&self, payload: NewProject) -> ApiFuture<ResponseMessage> {
        self.post_json("api/project/save", &payload)
    }

    fn update_project(&self, project: Project) -> ApiFuture<ResponseMessage> {
        self.post_json("api/project/update", &project)
    }

    fn delete_project(&self, project_id: i64) -> ApiFuture<ResponseMessage> {
        // The delete endpoints take the bare id as the JSON body.
        self.post_json("api/project/delete", &project_id)
    }

    fn create_branch(&self, payload: NewBranch) -> ApiFuture<ResponseMessage> {
        self.post_json("api/branch/save", &payload)
    }

    fn update_branch(&self, branch: Branch) -> ApiFuture<ResponseMessage> {
        self.post_json("api/branch/update", &branch)
    }

    fn delete_branch(&self, branch_id: i64) -> ApiFuture<ResponseMessage> {
        self.post_json("api/branch/delete", &branch_id)
    }

    fn create_property(&self, payload: NewProperty) -> ApiFuture<ResponseMessage> {
        self.post_json("api/property/save", &payload)
    }

    fn update_property(&self, property: Property) -> ApiFuture<ResponseMessage> {
        self.post_json("api/property/update", &property)
    }

    fn delete_property(&self, property_id: i64) -> ApiFuture<ResponseMessage> {
        self.post_json("api/property/delete", &property_id)
    }

    fn sign_in(&self, credentials: Credentials) -> ApiFuture<AuthResponse> {
        self.post_json("api/auth/signin", &credentials)
    }

    fn sign_up(&self, request: SignUpRequest) -> ApiFuture<AuthResponse> {
        self.post_json("api/auth/signup", &request)
    }
}
