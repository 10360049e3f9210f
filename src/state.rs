use crate::api::{ApiError, HotelApi};
use crate::errors::AppError;
use crate::models::{Reservation, Room, Settings};
use crate::session::Session;
use crate::storage::{clear_session, persist_session};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Last successful snapshot of the hotel API, kept so a failed refresh can
/// still render the previous state.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub rooms: Vec<Room>,
    pub reservations: Vec<Reservation>,
    pub settings: Settings,
    /// One-shot message for the next dashboard render.
    pub notice: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub api: HotelApi,
    pub session_path: PathBuf,
    pub session: Arc<Mutex<Session>>,
    pub data: Arc<Mutex<DashboardData>>,
}

impl AppState {
    pub fn new(api: HotelApi, session_path: PathBuf, session: Session) -> Self {
        Self {
            api,
            session_path,
            session: Arc::new(Mutex::new(session)),
            data: Arc::new(Mutex::new(DashboardData::default())),
        }
    }

    pub async fn token(&self) -> Result<String, ApiError> {
        let session = self.session.lock().await;
        session
            .token()
            .map(str::to_string)
            .ok_or(ApiError::Unauthenticated)
    }

    pub async fn username(&self) -> String {
        self.session.lock().await.username().to_string()
    }

    /// Replaces the session; data cached for a previous operator is dropped.
    pub async fn start_session(&self, session: Session) -> Result<(), AppError> {
        let mut current = self.session.lock().await;
        persist_session(&self.session_path, &session).await?;
        info!("session started for {}", session.username());
        *current = session;
        *self.data.lock().await = DashboardData::default();
        Ok(())
    }

    /// Drops the session and the cached hotel data that belonged to it.
    pub async fn end_session(&self) {
        let mut session = self.session.lock().await;
        if session.is_authenticated() {
            info!("session ended for {}", session.username());
        }
        clear_session(&self.session_path, &mut session).await;
        *self.data.lock().await = DashboardData::default();
    }

    /// Checks a session restored from disk against the hotel API and drops it
    /// when the token is no longer accepted.
    pub async fn verify_session(&self) {
        let Ok(token) = self.token().await else {
            return;
        };
        match self.api.current_user(&token).await {
            Ok(user) => info!("restored session for {}", user.username),
            Err(err) if err.is_unauthorized() => {
                warn!("restored session was rejected: {err}");
                self.end_session().await;
            }
            Err(err) => warn!("could not verify restored session: {err}"),
        }
    }

    /// Fetches rooms, reservations and settings one after another and replaces
    /// the cache only when all three succeed.
    pub async fn refresh(&self, token: &str) -> Result<(), ApiError> {
        let rooms = self.api.get_rooms(token).await?;
        let reservations = self.api.get_reservations(token).await?;
        let settings = self.api.get_settings(token).await?;

        let mut data = self.data.lock().await;
        data.rooms = rooms;
        data.reservations = reservations;
        data.settings = settings;
        Ok(())
    }

    pub async fn set_notice(&self, message: impl Into<String>) {
        self.data.lock().await.notice = Some(message.into());
    }
}
