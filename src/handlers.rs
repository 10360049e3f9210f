use crate::api::ApiError;
use crate::calendar::{self, MonthGrid, YearMonth};
use crate::errors::AppError;
use crate::forms::{
    LoginForm, PasswordForm, RegisterForm, ReservationEditForm, ReservationForm, RoomEditForm,
    RoomForm, SettingsForm,
};
use crate::models::{
    ActionResponse, HealthResponse, PasswordChange, ReservationDraft, ReservationUpdate, RoomDraft,
    RoomUpdate, SettingsUpdate,
};
use crate::session::Session;
use crate::state::AppState;
use crate::stats::{build_summary, DashboardSummary};
use crate::ui::{render_dashboard, render_login};
use crate::view::build_view;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl MonthQuery {
    /// Missing parts default to the month containing `today`.
    pub fn resolve(&self, today: NaiveDate) -> Result<YearMonth, AppError> {
        let current = YearMonth::containing(today);
        let year = self.year.unwrap_or(current.year());
        let month = self.month.unwrap_or(current.month());
        Ok(YearMonth::new(year, month)?)
    }
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, AppError> {
    let today = today();
    let month = query.resolve(today)?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let stale = match refresh_or_stale(&state, &token).await {
        Ok(stale) => stale,
        Err(_) => return Ok(to_login()),
    };

    let username = state.username().await;
    let mut data = state.data.lock().await;
    let view = build_view(&data, &username, month, today, stale)?;
    data.notice = None;

    Ok(Html(render_dashboard(&view)).into_response())
}

pub async fn login_page(State(state): State<AppState>) -> Response {
    if state.session.lock().await.is_authenticated() {
        return Redirect::to("/").into_response();
    }
    Html(render_login(None)).into_response()
}

pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Response, AppError> {
    let (username, password) = match form.credentials() {
        Ok(credentials) => credentials,
        Err(err) => return Ok(login_failed(StatusCode::BAD_REQUEST, &err.to_string())),
    };

    match state.api.login(username, password).await {
        Ok(response) => {
            let token = response.token.unwrap_or_default();
            let name = response.username.unwrap_or_else(|| username.to_string());
            state.start_session(Session::new(token, name)).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => {
            warn!("login failed for {username}: {err}");
            let status = match &err {
                ApiError::Rejected { status, .. } if status.is_client_error() => *status,
                _ if err.is_unauthorized() => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_GATEWAY,
            };
            Ok(login_failed(status, &err.user_message()))
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    match state
        .api
        .register(form.username.trim(), form.password.trim(), form.email.trim())
        .await
    {
        Ok(response) => {
            info!("registered account {}", form.username.trim());
            let message = response
                .message
                .unwrap_or_else(|| "Account created successfully".to_string());
            Html(render_login(Some(&format!("{message}. Sign in to continue.")))).into_response()
        }
        Err(err) => {
            warn!("registration failed: {err}");
            login_failed(StatusCode::BAD_REQUEST, &err.user_message())
        }
    }
}

pub async fn logout(State(state): State<AppState>) -> Redirect {
    if let Ok(token) = state.token().await {
        if let Err(err) = state.api.logout(&token).await {
            warn!("hotel API logout failed: {err}");
        }
    }
    state.end_session().await;
    Redirect::to("/login")
}

pub async fn create_reservation(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
    Form(form): Form<ReservationForm>,
) -> Result<Response, AppError> {
    let month = query.resolve(today())?;
    let draft = ReservationDraft::try_from(form)?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let outcome = state.api.create_reservation(&token, &draft).await;
    Ok(finish_action(&state, month, outcome, "Reservation created").await)
}

pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MonthQuery>,
    Form(form): Form<ReservationEditForm>,
) -> Result<Response, AppError> {
    let month = query.resolve(today())?;
    let update = ReservationUpdate::try_from(form)?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let outcome = state.api.update_reservation(&token, id, &update).await;
    Ok(finish_action(&state, month, outcome, "Reservation updated").await)
}

pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, AppError> {
    let month = query.resolve(today())?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let outcome = state.api.delete_reservation(&token, id).await;
    Ok(finish_action(&state, month, outcome, "Reservation deleted").await)
}

pub async fn check_in(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, AppError> {
    let month = query.resolve(today())?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let outcome = state.api.check_in(&token, id).await;
    Ok(finish_action(&state, month, outcome, "Guest checked in").await)
}

pub async fn check_out(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, AppError> {
    let month = query.resolve(today())?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let outcome = state.api.check_out(&token, id).await;
    Ok(finish_action(&state, month, outcome, "Guest checked out").await)
}

pub async fn update_settings(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
    Form(form): Form<SettingsForm>,
) -> Result<Response, AppError> {
    let month = query.resolve(today())?;
    let update = SettingsUpdate::try_from(form)?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let outcome = state.api.update_settings(&token, &update).await;
    Ok(finish_action(&state, month, outcome, "Settings saved").await)
}

pub async fn create_room(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
    Form(form): Form<RoomForm>,
) -> Result<Response, AppError> {
    let month = query.resolve(today())?;
    let draft = RoomDraft::try_from(form)?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let outcome = state.api.create_room(&token, &draft).await;
    Ok(finish_action(&state, month, outcome, "Room added").await)
}

pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MonthQuery>,
    Form(form): Form<RoomEditForm>,
) -> Result<Response, AppError> {
    let month = query.resolve(today())?;
    let update = RoomUpdate::try_from(form)?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let outcome = state.api.update_room(&token, id, &update).await;
    Ok(finish_action(&state, month, outcome, "Room updated").await)
}

pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, AppError> {
    let month = query.resolve(today())?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let outcome = state.api.delete_room(&token, id).await;
    Ok(finish_action(&state, month, outcome, "Room deleted").await)
}

pub async fn change_password(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
    Form(form): Form<PasswordForm>,
) -> Result<Response, AppError> {
    let month = query.resolve(today())?;
    let change = PasswordChange::try_from(form)?;
    let Ok(token) = state.token().await else {
        return Ok(to_login());
    };

    let outcome = state.api.change_password(&token, &change).await;
    Ok(finish_action(&state, month, outcome, "Password changed").await)
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthGrid>, AppError> {
    let today = today();
    let month = query.resolve(today)?;
    let token = state.token().await?;
    refresh_or_stale(&state, &token).await?;

    let data = state.data.lock().await;
    let grid = calendar::build(month.year(), month.month(), &data.reservations, today)?;
    Ok(Json(grid))
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, AppError> {
    let token = state.token().await?;
    refresh_or_stale(&state, &token).await?;

    let data = state.data.lock().await;
    Ok(Json(build_summary(&data.rooms, &data.reservations)))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Local::now().to_rfc3339(),
    })
}

/// Refreshes the cache; `Ok(true)` means the refresh failed and cached data
/// is stale. Only an authorization failure is returned as an error, after
/// the session has been dropped.
async fn refresh_or_stale(state: &AppState, token: &str) -> Result<bool, ApiError> {
    match state.refresh(token).await {
        Ok(()) => Ok(false),
        Err(err) if err.is_unauthorized() => {
            warn!("hotel API refused the session: {err}");
            state.end_session().await;
            Err(ApiError::Unauthenticated)
        }
        Err(err) => {
            error!("failed to refresh hotel data: {err}");
            Ok(true)
        }
    }
}

async fn finish_action(
    state: &AppState,
    month: YearMonth,
    outcome: Result<ActionResponse, ApiError>,
    success: &str,
) -> Response {
    match outcome {
        Ok(_) => {
            info!("{success}");
            state.set_notice(success).await;
        }
        Err(err) if err.is_unauthorized() => {
            warn!("hotel API refused the session: {err}");
            state.end_session().await;
            return to_login();
        }
        Err(err) => {
            warn!("hotel API action failed: {err}");
            state.set_notice(err.user_message()).await;
        }
    }
    Redirect::to(&dashboard_url(month)).into_response()
}

fn login_failed(status: StatusCode, message: &str) -> Response {
    (status, Html(render_login(Some(message)))).into_response()
}

fn to_login() -> Response {
    Redirect::to("/login").into_response()
}

pub fn dashboard_url(month: YearMonth) -> String {
    format!("/?year={}&month={}", month.year(), month.month())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn month_query_defaults_to_today() {
        let query = MonthQuery::default();
        assert_eq!(query.resolve(date(2024, 3, 11)).unwrap(), YearMonth::new(2024, 3).unwrap());

        let query = MonthQuery {
            year: None,
            month: Some(12),
        };
        assert_eq!(query.resolve(date(2024, 3, 11)).unwrap(), YearMonth::new(2024, 12).unwrap());
    }

    #[test]
    fn month_query_rejects_bad_month() {
        let query = MonthQuery {
            year: Some(2024),
            month: Some(13),
        };
        let err = query.resolve(date(2024, 3, 11)).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn dashboard_url_round_trips_month() {
        assert_eq!(dashboard_url(YearMonth::new(2025, 1).unwrap()), "/?year=2025&month=1");
    }
}
