//! Login and registration submission.
//!
//! Each flow is split into a synchronous `prepare_*` step (validation), the
//! gateway call, and a synchronous `apply_*` step that updates the session
//! and decides where to go. The browser pages run the gateway call from
//! `spawn_local` between the two; the `submit_*` helpers run all three.

use accesspanel_auth::{Credentials, FieldErrors, LoginForm, Registration, RegisterForm, Session, User};
use accesspanel_infra::{GatewayError, UserGateway};

use crate::routes::Route;

/// What the page should do after a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the gateway was not called.
    Invalid(FieldErrors),
    /// The gateway refused; the message is also on the session.
    Failed(String),
    Navigate(Route),
}

// ─────────────────────────────────────────────────────────────────────────────
// Login
// ─────────────────────────────────────────────────────────────────────────────

pub fn prepare_login(form: &LoginForm) -> Result<Credentials, FieldErrors> {
    form.credentials()
}

/// Sign in on success and go home; otherwise surface the error under the form.
pub fn apply_login(session: &mut Session, result: Result<User, GatewayError>) -> SubmitOutcome {
    match result {
        Ok(user) => {
            session.sign_in(user);
            SubmitOutcome::Navigate(Route::Home)
        }
        Err(err) => {
            tracing::warn!(error = %err, "login rejected");
            let message = err.user_message();
            session.fail(message.clone());
            SubmitOutcome::Failed(message)
        }
    }
}

pub async fn submit_login<G>(session: &mut Session, form: &LoginForm, gateway: &G) -> SubmitOutcome
where
    G: UserGateway + ?Sized,
{
    let credentials = match prepare_login(form) {
        Ok(credentials) => credentials,
        Err(errors) => return SubmitOutcome::Invalid(errors),
    };
    let result = gateway.login(&credentials).await;
    apply_login(session, result)
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────────────────────────

/// Validate and build the request. The role is forced to `user` unless the
/// session belongs to an authenticated admin.
pub fn prepare_register(form: &RegisterForm, session: &Session) -> Result<Registration, FieldErrors> {
    form.registration(session)
}

/// On success go home. A visitor registering themselves is signed in as the
/// new account; an admin creating a user keeps their own session.
pub fn apply_register(session: &mut Session, result: Result<User, GatewayError>) -> SubmitOutcome {
    match result {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "account registered");
            if !session.is_auth() {
                session.sign_in(user);
            }
            SubmitOutcome::Navigate(Route::Home)
        }
        Err(err) => {
            tracing::warn!(error = %err, "registration rejected");
            let message = err.user_message();
            session.fail(message.clone());
            SubmitOutcome::Failed(message)
        }
    }
}

pub async fn submit_register<G>(session: &mut Session, form: &RegisterForm, gateway: &G) -> SubmitOutcome
where
    G: UserGateway + ?Sized,
{
    let registration = match prepare_register(form, session) {
        Ok(registration) => registration,
        Err(errors) => return SubmitOutcome::Invalid(errors),
    };
    let result = gateway.register(&registration).await;
    apply_register(session, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesspanel_auth::validation::{INVALID_EMAIL, PASSWORDS_DIFFER};
    use accesspanel_auth::Field;
    use accesspanel_core::UserId;
    use accesspanel_infra::InMemoryUserGateway;
    use accesspanel_infra::gateway::in_memory::{EMAIL_TAKEN, INVALID_CREDENTIALS};

    fn account(id: u64, email: &str, role: &str) -> User {
        User {
            id: UserId::new(id),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: email.into(),
            role: role.into(),
            password: "cobol60".into(),
            image: None,
        }
    }

    fn register_form(email: &str, role: &str) -> RegisterForm {
        RegisterForm {
            first_name: "New".into(),
            last_name: "Person".into(),
            email: email.into(),
            password: "abc123".into(),
            confirm_password: "abc123".into(),
            image: String::new(),
            role: role.into(),
        }
    }

    #[tokio::test]
    async fn malformed_email_never_reaches_the_gateway() {
        let gateway = InMemoryUserGateway::new();
        let mut session = Session::anonymous();

        let outcome = submit_login(&mut session, &LoginForm::new("not-an-email", "secret1"), &gateway).await;

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected validation errors, got {outcome:?}");
        };
        assert_eq!(errors.get(Field::Email), Some(INVALID_EMAIL));
        assert_eq!(gateway.login_calls(), 0);
    }

    #[tokio::test]
    async fn successful_login_navigates_home() {
        let gateway = InMemoryUserGateway::with_users(vec![account(1, "grace@navy.mil", "admin")]);
        let mut session = Session::anonymous();

        let outcome = submit_login(&mut session, &LoginForm::new("grace@navy.mil", "cobol60"), &gateway).await;

        assert_eq!(outcome, SubmitOutcome::Navigate(Route::Home));
        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn rejected_login_sets_session_error_and_stays() {
        let gateway = InMemoryUserGateway::with_users(vec![account(1, "grace@navy.mil", "user")]);
        let mut session = Session::anonymous();

        let outcome = submit_login(&mut session, &LoginForm::new("grace@navy.mil", "wrong-pass"), &gateway).await;

        assert_eq!(outcome, SubmitOutcome::Failed(INVALID_CREDENTIALS.to_string()));
        assert_eq!(session.error_message(), Some(INVALID_CREDENTIALS));
        assert!(!session.is_auth());
    }

    #[tokio::test]
    async fn password_mismatch_blocks_registration() {
        let gateway = InMemoryUserGateway::new();
        let mut session = Session::anonymous();
        let form = RegisterForm {
            confirm_password: "abc124".into(),
            ..register_form("new@example.com", "user")
        };

        let outcome = submit_register(&mut session, &form, &gateway).await;

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected validation errors, got {outcome:?}");
        };
        assert_eq!(errors.get(Field::ConfirmPassword), Some(PASSWORDS_DIFFER));
        assert_eq!(gateway.register_calls(), 0);
    }

    #[tokio::test]
    async fn visitor_cannot_register_as_admin() {
        let gateway = InMemoryUserGateway::new();
        let mut session = Session::anonymous();

        let outcome = submit_register(&mut session, &register_form("new@example.com", "admin"), &gateway).await;

        assert_eq!(outcome, SubmitOutcome::Navigate(Route::Home));
        assert_eq!(gateway.snapshot()[0].role, "user");
        assert_eq!(session.user().map(|u| u.email.as_str()), Some("new@example.com"));
    }

    #[tokio::test]
    async fn admin_creates_admin_and_keeps_own_session() {
        let gateway = InMemoryUserGateway::with_users(vec![account(1, "root@example.com", "admin")]);
        let mut session = Session::signed_in(account(1, "root@example.com", "admin"));

        let outcome = submit_register(&mut session, &register_form("ops@example.com", "admin"), &gateway).await;

        assert_eq!(outcome, SubmitOutcome::Navigate(Route::Home));
        assert_eq!(gateway.snapshot()[1].role, "admin");
        assert_eq!(session.user().map(|u| u.id), Some(UserId::new(1)));
    }

    #[tokio::test]
    async fn rejected_registration_is_reported_not_navigated() {
        let gateway = InMemoryUserGateway::with_users(vec![account(1, "taken@example.com", "user")]);
        let mut session = Session::anonymous();

        let outcome = submit_register(&mut session, &register_form("taken@example.com", "user"), &gateway).await;

        assert_eq!(outcome, SubmitOutcome::Failed(EMAIL_TAKEN.to_string()));
        assert_eq!(session.error_message(), Some(EMAIL_TAKEN));
    }
}
