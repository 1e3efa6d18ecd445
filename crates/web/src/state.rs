//! Explicit application state.
//!
//! One value owns everything the pages share. The browser build keeps it in
//! a signal provided through context; tests construct it directly.

use accesspanel_auth::Session;
use accesspanel_infra::ClientConfig;

use crate::users::UserDirectory;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub users: UserDirectory,
    pub config: ClientConfig,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            session: Session::anonymous(),
            users: UserDirectory::new(),
            config,
        }
    }

    /// Whether the role selector should be offered on the registration form.
    pub fn can_choose_role(&self) -> bool {
        self.session.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesspanel_auth::User;
    use accesspanel_core::UserId;

    fn account(role: &str) -> User {
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
    fn only_signed_in_admins_choose_a_role() {
        let mut state = AppState::new(ClientConfig::default());
        assert!(!state.can_choose_role());

        state.session.sign_in(account("user"));
        assert!(!state.can_choose_role());

        state.session.sign_in(account("admin"));
        assert!(state.can_choose_role());
    }
}
