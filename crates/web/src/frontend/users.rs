//! User list and user detail pages.

use leptos::*;
use leptos_router::*;

use accesspanel_core::UserId;
use accesspanel_infra::{HttpUserGateway, UserGateway};

use crate::frontend::components::FieldError;
use crate::routes::Route as AppRoute;
use crate::state::AppState;
use crate::users::avatar_for;

/// Start the one-time user load if nobody has yet.
fn ensure_users_loaded(state: RwSignal<AppState>, gateway: HttpUserGateway) {
    if !state.try_update(|s| s.users.begin_load()).unwrap_or(false) {
        return;
    }
    spawn_local(async move {
        let result = gateway.load_users().await;
        state.update(|s| s.users.finish_load(result));
    });
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    let state = expect_context::<RwSignal<AppState>>();
    let gateway = expect_context::<HttpUserGateway>();
    let delete_error = create_rw_signal(None::<String>);

    ensure_users_loaded(state, gateway.clone());

    let delete_user = move |id: UserId| {
        let gateway = gateway.clone();
        spawn_local(async move {
            let result = gateway.delete_user(id).await;
            let outcome = state.try_update(|s| s.users.finish_delete(id, result));
            delete_error.set(match outcome {
                Some(Err(err)) => Some(format!("Could not delete user {id}: {}", err.user_message())),
                _ => None,
            });
        });
    };

    view! {
        <div class="users">
            <table>
                <thead>
                    <tr>
                        <th>"Id"</th>
                        <th>"Image"</th>
                        <th>"First name"</th>
                        <th>"Last name"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th>"Password"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        state.with(|s| {
                            s.users
                                .users()
                                .iter()
                                .map(|user| {
                                    let id = user.id;
                                    let delete_user = delete_user.clone();
                                    view! {
                                        <tr>
                                            <td>{id.to_string()}</td>
                                            <td>
                                                <img
                                                    class="avatar"
                                                    alt=user.email.clone()
                                                    src=avatar_for(user, &s.config).to_string()
                                                />
                                            </td>
                                            <td>{user.first_name.clone()}</td>
                                            <td>{user.last_name.clone()}</td>
                                            <td>{user.email.clone()}</td>
                                            <td>{user.role.clone()}</td>
                                            <td>{user.password.clone()}</td>
                                            <td>
                                                <A href=AppRoute::UserEdit(id).path()>
                                                    <button class="icon edit" title="Edit">"✎"</button>
                                                </A>
                                                <button
                                                    class="icon delete"
                                                    title="Delete"
                                                    on:click=move |_| delete_user(id)
                                                >
                                                    "🗑"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </tbody>
            </table>

            <FieldError text=Signal::derive(move || state.with(|s| s.users.load_error().map(str::to_string)))/>
            <FieldError text=delete_error/>

            <div class="actions">
                <A href=AppRoute::UserCreate.path()>
                    <button>"Create user"</button>
                </A>
            </div>
        </div>
    }
}

#[component]
pub fn UserDetailPage() -> impl IntoView {
    let state = expect_context::<RwSignal<AppState>>();
    let gateway = expect_context::<HttpUserGateway>();
    let params = use_params_map();

    ensure_users_loaded(state, gateway);

    let user_id = move || params.with(|p| p.get("id").and_then(|id| id.parse::<UserId>().ok()));

    view! {
        <div class="user-detail">
            {move || {
                let found = user_id().and_then(|id| state.with(|s| s.users.get(id).cloned()));
                match found {
                    Some(user) => {
                        let avatar = state.with(|s| avatar_for(&user, &s.config).to_string());
                        view! {
                            <h1>{format!("{} {}", user.first_name, user.last_name)}</h1>
                            <img class="avatar" alt=user.email.clone() src=avatar/>
                            <dl>
                                <dt>"Id"</dt>
                                <dd>{user.id.to_string()}</dd>
                                <dt>"Email"</dt>
                                <dd>{user.email.clone()}</dd>
                                <dt>"Role"</dt>
                                <dd>{user.role.clone()}</dd>
                            </dl>
                        }
                        .into_view()
                    }
                    None => view! { <p>"User not found."</p> }.into_view(),
                }
            }}
            <A href=AppRoute::Users.path()>"Back to users"</A>
        </div>
    }
}
