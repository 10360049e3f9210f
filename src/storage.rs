use crate::errors::AppError;
use crate::session::Session;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub fn resolve_session_path() -> PathBuf {
    if let Ok(path) = env::var("APP_SESSION_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/session.json")
}

pub async fn load_session(path: &Path) -> Session {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(session) => session,
            Err(err) => {
                error!("failed to parse session file: {err}");
                Session::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Session::default(),
        Err(err) => {
            error!("failed to read session file: {err}");
            Session::default()
        }
    }
}

pub async fn persist_session(path: &Path, session: &Session) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(session).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

pub async fn clear_session(path: &Path, session: &mut Session) {
    session.clear();
    if let Err(err) = persist_session(path, session).await {
        warn!("failed to rewrite session file: {}", err.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("hotel_dashboard_{}_{name}", std::process::id()));
        path.push("session.json");
        path
    }

    #[tokio::test]
    async fn missing_file_loads_empty_session() {
        let session = load_session(&temp_path("missing")).await;
        assert_eq!(session, Session::default());
    }

    #[tokio::test]
    async fn persisted_session_loads_back_and_clears() {
        let path = temp_path("persist");
        let session = Session::new("token-1", "frontdesk");
        persist_session(&path, &session).await.unwrap();
        assert_eq!(load_session(&path).await, session);

        let mut session = session;
        clear_session(&path, &mut session).await;
        assert!(!load_session(&path).await.is_authenticated());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty_session() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, b"{not json").await.unwrap();
        assert_eq!(load_session(&path).await, Session::default());
    }
}
