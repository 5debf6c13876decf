use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Auth token and profile, handed to whatever needs them instead of being
/// read from a global.
pub trait SessionStore {
    fn token(&self) -> Option<&str>;
    fn set_token(&mut self, token: Option<String>);
    fn user(&self) -> Option<&User>;
    fn set_user(&mut self, user: Option<User>);

    fn clear_token(&mut self) {
        self.set_token(None);
    }

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Value for an `Authorization` header.
    fn bearer(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {token}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemorySession {
    token: Option<String>,
    user: Option<User>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySession {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        // An empty token is the same as none.
        let token = token.filter(|token| !token.is_empty());
        debug!(authenticated = token.is_some(), "session token updated");
        self.token = token;
    }

    fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(session: &mut dyn SessionStore) {
        session.set_token(Some("abc123".to_string()));
        session.set_user(Some(User {
            id: "u-1".to_string(),
            name: "Asha".to_string(),
            email: None,
        }));
    }

    #[test]
    fn token_drives_authentication() {
        let mut session = InMemorySession::new();
        assert!(!session.is_authenticated());
        login(&mut session);
        assert!(session.is_authenticated());
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc123"));
        assert_eq!(session.user().map(|user| user.name.as_str()), Some("Asha"));

        session.clear_token();
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer(), None);
    }

    #[test]
    fn empty_token_is_not_authenticated() {
        let mut session = InMemorySession::new();
        session.set_token(Some(String::new()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn user_deserializes_without_email() {
        let user: User = serde_json::from_str(r#"{"id":"u-2","name":"Ravi"}"#).expect("user");
        assert_eq!(user.email, None);
        assert_eq!(serde_json::to_string(&user).expect("json"), r#"{"id":"u-2","name":"Ravi"}"#);
    }
}
