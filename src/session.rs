use serde::{Deserialize, Serialize};

/// Operator session issued by the hotel API login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.username = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_not_a_session() {
        let session = Session::new("", "frontdesk");
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn clear_drops_credentials() {
        let mut session = Session::new("abc", "frontdesk");
        assert!(session.is_authenticated());
        session.clear();
        assert_eq!(session, Session::default());
    }
}
