// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP implementation of the booking backend.
//!
//! Talks to the reservation service's JSON API:
//! `GET/POST /api/meetings`, `PUT/DELETE /api/meetings/{id}`,
//! `GET /api/meetings/search`, and `POST /api/login` for the identity
//! collaborator. The bearer token obtained at login is attached to
//! every subsequent call.

use crate::backend::BookingBackend;
use crate::error::RemoteError;
use crate::record::{PersistedReservation, ReservationPayload, SearchQuery};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::debug;

/// The authenticated identity returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
    /// The stable subject identifier, comparable against a
    /// reservation's owning identity.
    #[serde(rename = "empId")]
    pub emp_id: String,
    /// The display name.
    pub name: String,
    /// The email address, when the directory provides one.
    #[serde(default)]
    pub email: String,
    /// The department, when the directory provides one.
    #[serde(default)]
    pub dept: String,
    /// The user principal name, when the directory provides one.
    #[serde(default)]
    pub upn: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: SessionProfile,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "empId")]
    emp_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: i64,
}

/// A booking backend speaking the reservation service's HTTP API.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    /// Creates a backend for the given base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    /// Authenticates against the identity collaborator and stores the
    /// bearer token for subsequent calls.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Auth` for rejected credentials and
    /// `RemoteError::Transport` when the service is unreachable.
    pub async fn login(
        &self,
        emp_id: &str,
        password: &str,
    ) -> Result<SessionProfile, RemoteError> {
        let response: Response = self
            .client
            .post(format!("{}/api/login", self.base_url))
            .json(&LoginRequest { emp_id, password })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|err| RemoteError::Transport {
                message: format!("Malformed login response: {err}"),
            })?;

        debug!(subject = %login.user.emp_id, "authenticated against booking backend");
        self.store_token(Some(login.token));
        Ok(login.user)
    }

    /// Discards the stored bearer token.
    pub fn logout(&self) {
        self.store_token(None);
    }

    fn store_token(&self, token: Option<String>) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = token;
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let guard = self
            .token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match guard.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn meetings_url(&self) -> String {
        format!("{}/api/meetings", self.base_url)
    }
}

fn transport(err: reqwest::Error) -> RemoteError {
    RemoteError::Transport {
        message: err.to_string(),
    }
}

async fn error_from_response(response: Response) -> RemoteError {
    let status: StatusCode = response.status();
    let message: String = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::BAD_REQUEST => RemoteError::Validation { message },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Auth { message },
        StatusCode::NOT_FOUND => RemoteError::NotFound { message },
        _ => RemoteError::Transport { message },
    }
}

#[async_trait]
impl BookingBackend for HttpBackend {
    async fn list(&self) -> Result<Vec<PersistedReservation>, RemoteError> {
        let response: Response = self
            .authorized(self.client.get(self.meetings_url()))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        response.json().await.map_err(|err| RemoteError::Transport {
            message: format!("Malformed list response: {err}"),
        })
    }

    async fn create(&self, payload: &ReservationPayload) -> Result<i64, RemoteError> {
        let response: Response = self
            .authorized(self.client.post(self.meetings_url()))
            .json(payload)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let created: CreatedBody =
            response.json().await.map_err(|err| RemoteError::Transport {
                message: format!("Malformed create response: {err}"),
            })?;
        Ok(created.id)
    }

    async fn update(&self, id: i64, payload: &ReservationPayload) -> Result<(), RemoteError> {
        let response: Response = self
            .authorized(self.client.put(format!("{}/{id}", self.meetings_url())))
            .json(payload)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RemoteError> {
        let response: Response = self
            .authorized(self.client.delete(format!("{}/{id}", self.meetings_url())))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<PersistedReservation>, RemoteError> {
        let mut params: Vec<(&str, &str)> = vec![("from", query.from.as_str()), ("to", query.to.as_str())];
        if let Some(place) = query.place.as_deref() {
            params.push(("place", place));
        }
        if let Some(keyword) = query.keyword.as_deref() {
            params.push(("q", keyword));
        }

        let response: Response = self
            .authorized(
                self.client
                    .get(format!("{}/search", self.meetings_url()))
                    .query(&params),
            )
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        response.json().await.map_err(|err| RemoteError::Transport {
            message: format!("Malformed search response: {err}"),
        })
    }
}
