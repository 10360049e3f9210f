pub mod api;
pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod view;

pub use app::router;
pub use calendar::{build, CalendarError, DayCell, MonthGrid, YearMonth};
pub use config::Config;
pub use state::AppState;
pub use storage::{load_session, resolve_session_path};
