//! Named client-side routes.

use accesspanel_core::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Users,
    Roles,
    /// Create-user form (the registration form, admin variant).
    UserCreate,
    UserEdit(UserId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Users => "/admin/users".to_string(),
            Route::Roles => "/admin/roles".to_string(),
            Route::UserCreate => "/user".to_string(),
            Route::UserEdit(id) => format!("/user/{id}"),
        }
    }

    /// Map a path back to its route; trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let route = match trimmed {
            "" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/admin/users" => Route::Users,
            "/admin/roles" => Route::Roles,
            "/user" => Route::UserCreate,
            other => {
                let id = other.strip_prefix("/user/")?.parse().ok()?;
                Route::UserEdit(id)
            }
        };
        Some(route)
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::Users,
            Route::Roles,
            Route::UserCreate,
            Route::UserEdit(UserId::new(12)),
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn unknown_paths_do_not_parse() {
        assert_eq!(Route::parse("/user/abc"), None);
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::parse("/login/"), Some(Route::Login));
    }
}
