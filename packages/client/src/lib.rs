//! # Typed HTTP client for the StackNotes API
//!
//! One method per endpoint, returning the same typed records the server
//! serializes. Call [`ApiClient::login`] or [`ApiClient::register`] once;
//! the client then attaches the bearer token to every request until
//! [`ApiClient::logout`].

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use api::{DocumentPatch, UserInfo};
use store::Document;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with an error status; `message` is the body's
    /// `message` field.
    #[error("{message} ({status})")]
    Api { status: StatusCode, message: String },
    #[error("not logged in")]
    NoSession,
}

/// A bearer token plus the profile it was granted to.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub user: UserInfo,
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct AuthBody {
    #[serde(flatten)]
    user: UserInfo,
    token: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// `base_url` without a trailing slash, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Resume a previously issued session without logging in again.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let session = self.session.as_ref().ok_or(ClientError::NoSession)?;
        Ok(self.request(method, path).bearer_auth(&session.token))
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());
        Err(ClientError::Api { status, message })
    }

    // ---- users ----

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<&Session, ClientError> {
        let response = self
            .request(Method::POST, "/api/users/register")
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        let auth: AuthBody = Self::parse(response).await?;
        Ok(&*self.session.insert(Session {
            user: auth.user,
            token: auth.token,
        }))
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session, ClientError> {
        let response = self
            .request(Method::POST, "/api/users/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let auth: AuthBody = Self::parse(response).await?;
        Ok(&*self.session.insert(Session {
            user: auth.user,
            token: auth.token,
        }))
    }

    pub async fn me(&self) -> Result<UserInfo, ClientError> {
        let response = self.authed(Method::GET, "/api/users/me")?.send().await?;
        Self::parse(response).await
    }

    /// Revokes the token server-side and drops the local session.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let response = self.authed(Method::POST, "/api/users/logout")?.send().await?;
        Self::parse::<serde_json::Value>(response).await?;
        self.session = None;
        Ok(())
    }

    // ---- documents ----

    pub async fn list_documents(&self) -> Result<Vec<Document>, ClientError> {
        let response = self.authed(Method::GET, "/api/documents")?.send().await?;
        Self::parse(response).await
    }

    pub async fn list_archived(&self) -> Result<Vec<Document>, ClientError> {
        let response = self
            .authed(Method::GET, "/api/documents/archived")?
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn create_document(
        &self,
        title: Option<&str>,
        parent: Option<&str>,
    ) -> Result<Document, ClientError> {
        let response = self
            .authed(Method::POST, "/api/documents")?
            .json(&json!({ "title": title, "parentDocument": parent }))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn get_document(&self, id: &str) -> Result<Document, ClientError> {
        let response = self
            .authed(Method::GET, &format!("/api/documents/{id}"))?
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn update_document(
        &self,
        id: &str,
        patch: &DocumentPatch,
    ) -> Result<Document, ClientError> {
        let response = self
            .authed(Method::PUT, &format!("/api/documents/{id}"))?
            .json(patch)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn archive_document(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .authed(Method::PATCH, &format!("/api/documents/{id}/archive"))?
            .send()
            .await?;
        Self::parse::<serde_json::Value>(response).await?;
        Ok(())
    }

    pub async fn restore_document(&self, id: &str) -> Result<Document, ClientError> {
        let response = self
            .authed(Method::PATCH, &format!("/api/documents/{id}/restore"))?
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn delete_document(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .authed(Method::DELETE, &format!("/api/documents/{id}"))?
            .send()
            .await?;
        Self::parse::<serde_json::Value>(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_without_a_session_fail_locally() {
        let client = ApiClient::new("http://localhost:5000");
        assert!(matches!(
            client.authed(Method::GET, "/api/documents"),
            Err(ClientError::NoSession)
        ));
    }

    #[test]
    fn test_auth_body_flattens_the_profile() {
        let auth: AuthBody = serde_json::from_str(
            r#"{
                "id": "8f14e45f-ea3e-4cfb-9d05-83a1b0b8f4a1",
                "name": "Ada",
                "email": "ada@example.com",
                "createdAt": "2026-01-01T00:00:00Z",
                "token": "deadbeef"
            }"#,
        )
        .unwrap();
        assert_eq!(auth.user.name, "Ada");
        assert_eq!(auth.token, "deadbeef");
    }
}
