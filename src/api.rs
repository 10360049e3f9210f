//! Client for the hotel REST API.
//!
//! Every call is a single request; failures surface as [`ApiError`] and are
//! never retried.

use crate::models::{
    ActionResponse, CurrentUser, LoginRequest, LoginResponse, PasswordChange, RegisterRequest,
    Reservation, ReservationDraft, ReservationUpdate, Room, RoomDraft, RoomUpdate, Settings,
    SettingsUpdate,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default timeout for hotel API requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Body text of the hotel API's auth guard.
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not logged in")]
    Unauthenticated,

    #[error("hotel API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("hotel API rejected the request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Unauthenticated => true,
            Self::Rejected { status, .. } => *status == StatusCode::UNAUTHORIZED,
            Self::Transport(_) => false,
        }
    }

    /// Text suitable for showing to the operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct HotelApi {
    client: Client,
    base_url: String,
}

impl HotelApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authed(&self, builder: RequestBuilder, token: &str) -> Result<RequestBuilder, ApiError> {
        if token.is_empty() {
            return Err(ApiError::Unauthenticated);
        }
        Ok(builder.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(%status, url = %response.url(), "hotel API response");

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected {
            status,
            message: error_message(status, &body),
        })
    }

    /// For mutations the API also reports failure in-band with `success: false`.
    async fn send_action(&self, builder: RequestBuilder) -> Result<ActionResponse, ApiError> {
        let response: ActionResponse = self.send(builder).await?;
        if !response.success {
            return Err(ApiError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: response
                    .message
                    .unwrap_or_else(|| "request was not accepted".to_string()),
            });
        }
        Ok(response)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .send(self.client.post(self.url("/api/login")).json(&request))
            .await?;
        if !response.success || response.token.as_deref().is_none_or(str::is_empty) {
            return Err(ApiError::Rejected {
                status: StatusCode::UNAUTHORIZED,
                message: response
                    .message
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
            });
        }
        Ok(response)
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<ActionResponse, ApiError> {
        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        };
        self.send_action(self.client.post(self.url("/api/register")).json(&request))
            .await
    }

    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let builder = self.authed(self.client.post(self.url("/api/logout")), token)?;
        let _: serde_json::Value = self.send(builder).await?;
        Ok(())
    }

    pub async fn current_user(&self, token: &str) -> Result<CurrentUser, ApiError> {
        let builder = self.authed(self.client.get(self.url("/api/current-user")), token)?;
        self.send(builder).await
    }

    /// The API answers a wrong current password with 401 too; only its auth
    /// guard replies `Unauthorized`, so anything else stays a plain rejection
    /// and does not end the session.
    pub async fn change_password(
        &self,
        token: &str,
        change: &PasswordChange,
    ) -> Result<ActionResponse, ApiError> {
        let builder = self.authed(self.client.post(self.url("/api/change-password")), token)?;
        match self.send_action(builder.json(change)).await {
            Err(ApiError::Rejected { status, message })
                if status == StatusCode::UNAUTHORIZED && message != UNAUTHORIZED_MESSAGE =>
            {
                Err(ApiError::Rejected {
                    status: StatusCode::FORBIDDEN,
                    message,
                })
            }
            other => other,
        }
    }

    pub async fn get_rooms(&self, token: &str) -> Result<Vec<Room>, ApiError> {
        let builder = self.authed(self.client.get(self.url("/api/rooms")), token)?;
        self.send(builder).await
    }

    pub async fn create_room(&self, token: &str, draft: &RoomDraft) -> Result<ActionResponse, ApiError> {
        let builder = self.authed(self.client.post(self.url("/api/rooms")), token)?;
        self.send_action(builder.json(draft)).await
    }

    pub async fn update_room(
        &self,
        token: &str,
        id: i64,
        update: &RoomUpdate,
    ) -> Result<ActionResponse, ApiError> {
        let url = self.url(&format!("/api/rooms/{id}"));
        let builder = self.authed(self.client.put(url), token)?;
        self.send_action(builder.json(update)).await
    }

    pub async fn delete_room(&self, token: &str, id: i64) -> Result<ActionResponse, ApiError> {
        let url = self.url(&format!("/api/rooms/{id}"));
        let builder = self.authed(self.client.delete(url), token)?;
        self.send_action(builder).await
    }

    pub async fn get_reservations(&self, token: &str) -> Result<Vec<Reservation>, ApiError> {
        let builder = self.authed(self.client.get(self.url("/api/reservations")), token)?;
        self.send(builder).await
    }

    pub async fn create_reservation(
        &self,
        token: &str,
        draft: &ReservationDraft,
    ) -> Result<ActionResponse, ApiError> {
        let builder = self.authed(self.client.post(self.url("/api/reservations")), token)?;
        self.send_action(builder.json(draft)).await
    }

    pub async fn update_reservation(
        &self,
        token: &str,
        id: i64,
        update: &ReservationUpdate,
    ) -> Result<ActionResponse, ApiError> {
        let url = self.url(&format!("/api/reservations/{id}"));
        let builder = self.authed(self.client.put(url), token)?;
        self.send_action(builder.json(update)).await
    }

    pub async fn delete_reservation(&self, token: &str, id: i64) -> Result<ActionResponse, ApiError> {
        let url = self.url(&format!("/api/reservations/{id}"));
        let builder = self.authed(self.client.delete(url), token)?;
        self.send_action(builder).await
    }

    pub async fn check_in(&self, token: &str, id: i64) -> Result<ActionResponse, ApiError> {
        let url = self.url(&format!("/api/reservations/{id}/checkin"));
        let builder = self.authed(self.client.post(url), token)?;
        self.send_action(builder).await
    }

    pub async fn check_out(&self, token: &str, id: i64) -> Result<ActionResponse, ApiError> {
        let url = self.url(&format!("/api/reservations/{id}/checkout"));
        let builder = self.authed(self.client.post(url), token)?;
        self.send_action(builder).await
    }

    pub async fn get_settings(&self, token: &str) -> Result<Settings, ApiError> {
        let builder = self.authed(self.client.get(self.url("/api/settings")), token)?;
        self.send(builder).await
    }

    pub async fn update_settings(
        &self,
        token: &str,
        update: &SettingsUpdate,
    ) -> Result<ActionResponse, ApiError> {
        let builder = self.authed(self.client.put(self.url("/api/settings")), token)?;
        self.send_action(builder.json(update)).await
    }
}

/// Picks the operator-facing reason out of an error body. The hotel API uses
/// `{"message": …}` for validation failures and `{"error": …}` for auth.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"success":false,"message":"Room is already booked for these dates"}"#),
            "Room is already booked for these dates"
        );
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, r#"{"error":"Unauthorized"}"#),
            "Unauthorized"
        );
    }

    #[test]
    fn error_message_falls_back_to_body_then_reason() {
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, " upstream down "), "upstream down");
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }

    #[test]
    fn unauthorized_detection() {
        assert!(ApiError::Unauthenticated.is_unauthorized());
        let rejected = ApiError::Rejected {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".into(),
        };
        assert!(rejected.is_unauthorized());
        assert_eq!(rejected.user_message(), "Unauthorized");
        let conflict = ApiError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: "Room not found".into(),
        };
        assert!(!conflict.is_unauthorized());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HotelApi::with_client(Client::new(), "http://hotel.local/");
        assert_eq!(api.url("/api/rooms"), "http://hotel.local/api/rooms");
    }
}
