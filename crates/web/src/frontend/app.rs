//! Leptos application with routing.

use leptos::*;
use leptos_router::*;

use accesspanel_infra::{ClientConfig, HttpUserGateway};

use crate::frontend::auth::{LoginPage, RegisterPage};
use crate::frontend::roles::RoleListPage;
use crate::frontend::users::{UserDetailPage, UsersListPage};
use crate::routes::Route as AppRoute;
use crate::state::AppState;

/// Main application component.
///
/// Owns the application state and the gateway and hands both to the pages
/// through context.
#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::default();
    let gateway = HttpUserGateway::new(config.api_url.clone());
    let state = create_rw_signal(AppState::new(config));

    provide_context(state);
    provide_context(gateway);

    view! {
        <Router>
            <NavBar/>
            <main>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/register" view=RegisterPage/>
                    <Route path="/admin/users" view=UsersListPage/>
                    <Route path="/admin/roles" view=RoleListPage/>
                    <Route path="/user" view=RegisterPage/>
                    <Route path="/user/:id" view=UserDetailPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn NavBar() -> impl IntoView {
    let state = expect_context::<RwSignal<AppState>>();
    let is_auth = move || state.with(|s| s.session.is_auth());
    let is_admin = move || state.with(|s| s.session.is_admin());

    view! {
        <header>
            <nav>
                <A href=AppRoute::Home.path()>"Home"</A>
                <Show when=is_admin>
                    <A href=AppRoute::Users.path()>"Users"</A>
                    <A href=AppRoute::Roles.path()>"Roles"</A>
                </Show>
                <Show
                    when=is_auth
                    fallback=|| view! {
                        <A href=AppRoute::Login.path()>"Sign in"</A>
                        <A href=AppRoute::Register.path()>"Sign up"</A>
                    }
                >
                    <button on:click=move |_| state.update(|s| s.session.sign_out())>
                        "Sign out"
                    </button>
                </Show>
            </nav>
        </header>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    let state = expect_context::<RwSignal<AppState>>();
    let greeting = move || {
        state.with(|s| match s.session.user() {
            Some(user) if !user.first_name.is_empty() => format!("Welcome, {}!", user.first_name),
            Some(user) => format!("Welcome, {}!", user.email),
            None => "Welcome! Sign in to continue.".to_string(),
        })
    };

    view! {
        <div class="home">
            <h1>{greeting}</h1>
        </div>
    }
}
