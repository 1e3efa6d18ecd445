//! Typed login and registration forms with their rule tables.

use crate::validation::{
    self, Field, FieldErrors, Rule, INVALID_EMAIL, INVALID_ROLE, INVALID_URL, MAX_NAME_LEN,
    MIN_PASSWORD_LEN, NAME_TOO_LONG, PASSWORDS_DIFFER, PASSWORD_TOO_SHORT, REQUIRED,
};
use crate::{AccountRole, Credentials, Registration, Session};

// ─────────────────────────────────────────────────────────────────────────────
// Login
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

const LOGIN_RULES: &[Rule<LoginForm>] = &[
    Rule::new(Field::Email, REQUIRED, |f: &LoginForm| validation::is_present(&f.email)),
    Rule::new(Field::Email, INVALID_EMAIL, |f: &LoginForm| validation::is_email(&f.email)),
    Rule::new(Field::Password, PASSWORD_TOO_SHORT, |f: &LoginForm| {
        validation::min_chars(&f.password, MIN_PASSWORD_LEN)
    }),
];

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        validation::validate(self, LOGIN_RULES)
    }

    /// Request body for a valid form.
    pub fn credentials(&self) -> Result<Credentials, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────────────────────────

/// Registration form.
///
/// `role` holds the raw selector value so an out-of-range value can be
/// reported inline instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub image: String,
    pub role: String,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            image: String::new(),
            role: AccountRole::User.as_str().to_string(),
        }
    }
}

const REGISTER_RULES: &[Rule<RegisterForm>] = &[
    Rule::new(Field::FirstName, NAME_TOO_LONG, |f: &RegisterForm| {
        validation::max_chars(&f.first_name, MAX_NAME_LEN)
    }),
    Rule::new(Field::LastName, NAME_TOO_LONG, |f: &RegisterForm| {
        validation::max_chars(&f.last_name, MAX_NAME_LEN)
    }),
    Rule::new(Field::Email, REQUIRED, |f: &RegisterForm| validation::is_present(&f.email)),
    Rule::new(Field::Email, INVALID_EMAIL, |f: &RegisterForm| validation::is_email(&f.email)),
    Rule::new(Field::Password, PASSWORD_TOO_SHORT, |f: &RegisterForm| {
        validation::min_chars(&f.password, MIN_PASSWORD_LEN)
    }),
    Rule::new(Field::ConfirmPassword, PASSWORDS_DIFFER, |f: &RegisterForm| {
        f.confirm_password == f.password
    }),
    Rule::new(Field::Image, INVALID_URL, |f: &RegisterForm| validation::is_url(&f.image)),
    Rule::new(Field::Role, INVALID_ROLE, |f: &RegisterForm| f.role.parse::<AccountRole>().is_ok()),
];

impl RegisterForm {
    pub fn validate(&self) -> FieldErrors {
        validation::validate(self, REGISTER_RULES)
    }

    /// Request body for a valid form, submitted on behalf of `actor`.
    ///
    /// Only an authenticated admin may pick the role; everyone else
    /// registers as `user` whatever the form says.
    pub fn registration(&self, actor: &Session) -> Result<Registration, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let role = if actor.is_admin() {
            self.role.parse().unwrap_or_default()
        } else {
            AccountRole::User
        };

        let image = Some(self.image.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(Registration {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            image,
            role,
        })
    }
}
