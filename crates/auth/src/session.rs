use crate::User;

/// The signed-in actor as seen by this client.
///
/// Holds the single error message surfaced under the login form. Owned by
/// the application state and passed explicitly to whoever mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    error_message: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            error_message: None,
        }
    }

    pub fn is_auth(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Authenticated and claiming the admin role.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn sign_in(&mut self, user: User) {
        tracing::info!(user_id = %user.id, "signed in");
        self.user = Some(user);
        self.error_message = None;
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.error_message = None;
    }

    /// Record a failed authentication attempt.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesspanel_core::UserId;

    fn user(role: &str) -> User {
        User {
            id: UserId::new(1),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            role: role.into(),
            password: "engine".into(),
            image: None,
        }
    }

    #[test]
    fn anonymous_is_not_admin() {
        let session = Session::anonymous();
        assert!(!session.is_auth());
        assert!(!session.is_admin());
    }

    #[test]
    fn admin_claim_requires_authentication() {
        assert!(Session::signed_in(user("admin")).is_admin());
        assert!(!Session::signed_in(user("user")).is_admin());
    }

    #[test]
    fn sign_in_clears_previous_error() {
        let mut session = Session::anonymous();
        session.fail("wrong password");
        assert_eq!(session.error_message(), Some("wrong password"));

        session.sign_in(user("user"));
        assert_eq!(session.error_message(), None);
        assert!(session.is_auth());
    }
}
