//! Login and registration pages.

use std::collections::HashSet;

use leptos::*;
use leptos_router::*;

use accesspanel_auth::{AccountRole, Field, LoginForm, RegisterForm};
use accesspanel_infra::{HttpUserGateway, UserGateway};

use crate::frontend::components::{FieldError, TextField, visible_error};
use crate::routes::Route as AppRoute;
use crate::state::AppState;
use crate::submit::{SubmitOutcome, apply_login, apply_register, prepare_login, prepare_register};

/// Two-way binding between one string field of a form signal and a
/// [`TextField`].
fn bind<F: 'static>(
    form: RwSignal<F>,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> (Signal<String>, Callback<String>) {
    let value = Signal::derive(move || form.with(get));
    let on_input = Callback::new(move |text: String| form.update(|f| set(f, text)));
    (value, on_input)
}

fn touch(touched: RwSignal<HashSet<Field>>, field: Field) -> Callback<()> {
    Callback::new(move |_| {
        touched.update(|t| {
            t.insert(field);
        })
    })
}

fn session_error(state: RwSignal<AppState>) -> Signal<Option<String>> {
    Signal::derive(move || state.with(|s| s.session.error_message().map(str::to_string)))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<RwSignal<AppState>>();
    let gateway = expect_context::<HttpUserGateway>();
    let navigate = use_navigate();

    state.update(|s| s.session.clear_error());

    let form = create_rw_signal(LoginForm::default());
    let touched = create_rw_signal(HashSet::<Field>::new());
    let errors = create_memo(move |_| form.with(|f| f.validate()));

    let (email, on_email) = bind(form, |f| f.email.clone(), |f, v| f.email = v);
    let (password, on_password) = bind(form, |f| f.password.clone(), |f, v| f.password = v);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        touched.update(|t| t.extend([Field::Email, Field::Password]));

        let Ok(credentials) = form.with(prepare_login) else {
            return;
        };
        let gateway = gateway.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = gateway.login(&credentials).await;
            if let Some(SubmitOutcome::Navigate(route)) = state.try_update(|s| apply_login(&mut s.session, result)) {
                navigate(&route.path(), Default::default());
            }
        });
    };

    view! {
        <div class="auth">
            <h1>"Sign in"</h1>
            <form on:submit=on_submit novalidate=true>
                <TextField
                    label="Email"
                    field=Field::Email
                    input_type="email"
                    placeholder="you@example.com"
                    value=email
                    on_input=on_email
                    on_blur=touch(touched, Field::Email)
                    error=visible_error(errors, touched, Field::Email)
                />
                <TextField
                    label="Password"
                    field=Field::Password
                    input_type="password"
                    value=password
                    on_input=on_password
                    on_blur=touch(touched, Field::Password)
                    error=visible_error(errors, touched, Field::Password)
                />
                <button type="submit">"Sign in"</button>
            </form>
            <FieldError text=session_error(state)/>
            <p>
                "No account yet? "
                <A href=AppRoute::Register.path()>"Sign up"</A>
            </p>
        </div>
    }
}

/// Registration form. Also serves the admin "create user" route, where the
/// role selector is shown.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let state = expect_context::<RwSignal<AppState>>();
    let gateway = expect_context::<HttpUserGateway>();
    let navigate = use_navigate();

    state.update(|s| s.session.clear_error());

    let form = create_rw_signal(RegisterForm::default());
    let touched = create_rw_signal(HashSet::<Field>::new());
    let errors = create_memo(move |_| form.with(|f| f.validate()));
    let can_choose_role = move || state.with(|s| s.can_choose_role());

    let (first_name, on_first_name) = bind(form, |f| f.first_name.clone(), |f, v| f.first_name = v);
    let (last_name, on_last_name) = bind(form, |f| f.last_name.clone(), |f, v| f.last_name = v);
    let (email, on_email) = bind(form, |f| f.email.clone(), |f, v| f.email = v);
    let (password, on_password) = bind(form, |f| f.password.clone(), |f, v| f.password = v);
    let (confirm, on_confirm) =
        bind(form, |f| f.confirm_password.clone(), |f, v| f.confirm_password = v);
    let (image, on_image) = bind(form, |f| f.image.clone(), |f, v| f.image = v);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        touched.update(|t| {
            t.extend([
                Field::FirstName,
                Field::LastName,
                Field::Email,
                Field::Password,
                Field::ConfirmPassword,
                Field::Image,
                Field::Role,
            ])
        });

        let prepared = state.with_untracked(|s| form.with(|f| prepare_register(f, &s.session)));
        let Ok(registration) = prepared else {
            return;
        };
        let gateway = gateway.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = gateway.register(&registration).await;
            if let Some(SubmitOutcome::Navigate(route)) =
                state.try_update(|s| apply_register(&mut s.session, result))
            {
                navigate(&route.path(), Default::default());
            }
        });
    };

    view! {
        <div class="auth">
            <h1>{move || if can_choose_role() { "Create user" } else { "Sign up" }}</h1>
            <form on:submit=on_submit novalidate=true>
                <TextField
                    label="First name"
                    field=Field::FirstName
                    value=first_name
                    on_input=on_first_name
                    on_blur=touch(touched, Field::FirstName)
                    error=visible_error(errors, touched, Field::FirstName)
                />
                <TextField
                    label="Last name"
                    field=Field::LastName
                    value=last_name
                    on_input=on_last_name
                    on_blur=touch(touched, Field::LastName)
                    error=visible_error(errors, touched, Field::LastName)
                />
                <TextField
                    label="Email"
                    field=Field::Email
                    input_type="email"
                    placeholder="you@example.com"
                    value=email
                    on_input=on_email
                    on_blur=touch(touched, Field::Email)
                    error=visible_error(errors, touched, Field::Email)
                />
                <TextField
                    label="Password"
                    field=Field::Password
                    input_type="password"
                    value=password
                    on_input=on_password
                    on_blur=touch(touched, Field::Password)
                    error=visible_error(errors, touched, Field::Password)
                />
                <TextField
                    label="Confirm password"
                    field=Field::ConfirmPassword
                    input_type="password"
                    value=confirm
                    on_input=on_confirm
                    on_blur=touch(touched, Field::ConfirmPassword)
                    error=visible_error(errors, touched, Field::ConfirmPassword)
                />
                <TextField
                    label="Image URL"
                    field=Field::Image
                    input_type="url"
                    placeholder="https://"
                    value=image
                    on_input=on_image
                    on_blur=touch(touched, Field::Image)
                    error=visible_error(errors, touched, Field::Image)
                />
                <Show when=can_choose_role>
                    <div class="form-group">
                        <label for=Field::Role.name()>"Role"</label>
                        <select
                            id=Field::Role.name()
                            name=Field::Role.name()
                            prop:value=move || form.with(|f| f.role.clone())
                            on:change=move |ev| form.update(|f| f.role = event_target_value(&ev))
                        >
                            {AccountRole::ALL
                                .iter()
                                .map(|role| view! { <option value=role.as_str()>{role.label()}</option> })
                                .collect_view()}
                        </select>
                        <FieldError text=Signal::derive(move || {
                            visible_error(errors, touched, Field::Role).get().map(str::to_string)
                        })/>
                    </div>
                </Show>
                <button type="submit">"Submit"</button>
            </form>
            <FieldError text=session_error(state)/>
            <Show when=move || !can_choose_role()>
                <p>
                    "Already registered? "
                    <A href=AppRoute::Login.path()>"Sign in"</A>
                </p>
            </Show>
        </div>
    }
}
