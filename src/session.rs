use crate::domain::{Permission, User};
use tracing::info;

/// Name used when the username field is left blank
const DEFAULT_USER_NAME: &str = "User";

/// The logged-in user. Any credentials are accepted, so this is not a
/// security boundary.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `user` as the current user, replacing any previous one
    pub fn login(&mut self, user: User) {
        info!(user_id = user.id, name = %user.name, "logged in");
        self.user = Some(user);
    }

    /// Accept any username/password and log in the fabricated user
    pub fn login_with_credentials(&mut self, username: &str, _password: &str) {
        self.login(mock_user(username));
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = user.id, "logged out");
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Build the user the login screen hands out
pub fn mock_user(username: &str) -> User {
    let name = username.trim();
    User {
        id: 1,
        name: if name.is_empty() {
            DEFAULT_USER_NAME.to_string()
        } else {
            name.to_string()
        },
        email: "user@company.com".to_string(),
        role: "Project Manager".to_string(),
        avatar: String::new(),
        permissions: vec![Permission::Read, Permission::Write, Permission::Admin],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_logged_out() {
        let session = Session::new();
        assert!(!session.is_logged_in());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_login_accepts_any_credentials() {
        let mut session = Session::new();
        session.login_with_credentials("  somchai  ", "");
        let user = session.current_user().unwrap();
        assert_eq!(user.name, "somchai");
        assert_eq!(user.id, 1);
        assert!(user.permissions.contains(&Permission::Admin));
        assert!(session.is_logged_in());
    }

    #[test]
    fn test_blank_username_gets_default_name() {
        let mut session = Session::new();
        session.login_with_credentials("", "anything");
        assert_eq!(session.current_user().unwrap().name, "User");
    }

    #[test]
    fn test_logout_clears_user() {
        let mut session = Session::new();
        session.login(mock_user("ann"));
        session.logout();
        assert!(session.current_user().is_none());

        // Logging out twice is harmless
        session.logout();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_login_replaces_previous_user() {
        let mut session = Session::new();
        session.login(mock_user("ann"));
        session.login(mock_user("bo"));
        assert_eq!(session.current_user().map(|u| u.name.as_str()), Some("bo"));
    }
}
