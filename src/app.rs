use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/logout", post(handlers::logout))
        .route("/reservations", post(handlers::create_reservation))
        .route("/reservations/:id/update", post(handlers::update_reservation))
        .route("/reservations/:id/delete", post(handlers::delete_reservation))
        .route("/reservations/:id/checkin", post(handlers::check_in))
        .route("/reservations/:id/checkout", post(handlers::check_out))
        .route("/rooms", post(handlers::create_room))
        .route("/rooms/:id/update", post(handlers::update_room))
        .route("/rooms/:id/delete", post(handlers::delete_room))
        .route("/settings", post(handlers::update_settings))
        .route("/password", post(handlers::change_password))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/summary", get(handlers::get_summary))
        .route("/health", get(handlers::health))
        .with_state(state)
}
