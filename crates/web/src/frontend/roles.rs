//! Role management page.

use leptos::*;

use accesspanel_core::StoreError;

use crate::frontend::components::FieldError;
use crate::roles::{Mutation, RoleEditor};
use crate::storage::LocalStorage;

type Editor = RoleEditor<LocalStorage>;

/// Run an editor operation and surface a failed write under the table.
fn apply(
    editor: RwSignal<Editor>,
    error: RwSignal<Option<String>>,
    op: impl FnOnce(&mut Editor) -> Result<Mutation, StoreError>,
) {
    match editor.try_update(op) {
        Some(Err(err)) => error.set(Some(format!("Could not save roles: {err}"))),
        _ => error.set(None),
    }
}

#[component]
pub fn RoleListPage() -> impl IntoView {
    let editor = create_rw_signal(RoleEditor::load(LocalStorage));
    let store_error = create_rw_signal(None::<String>);

    // Rows only re-render when the list or the edited row changes, not on
    // every keystroke in an input.
    let rows = create_memo(move |_| editor.with(|e| (e.roles().to_vec(), e.editing())));

    view! {
        <div class="roles">
            <h1>"Manage Roles"</h1>

            <div class="add-role">
                <label for="new-role">"New Role"</label>
                <input
                    id="new-role"
                    prop:value=move || editor.with(|e| e.draft().to_string())
                    on:input=move |ev| editor.update(|e| e.set_draft(event_target_value(&ev)))
                />
                <button on:click=move |_| apply(editor, store_error, |e| e.submit_draft())>
                    "Add Role"
                </button>
            </div>

            <table>
                <thead>
                    <tr>
                        <th>"Role ID"</th>
                        <th>"Role Name"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let (roles, editing) = rows.get();
                        roles
                            .into_iter()
                            .map(|role| {
                                let id = role.id;
                                if editing == Some(id) {
                                    view! {
                                        <tr>
                                            <td>{id.to_string()}</td>
                                            <td>
                                                <input
                                                    prop:value=move || {
                                                        editor.with(|e| e.edit_buffer().unwrap_or_default().to_string())
                                                    }
                                                    on:input=move |ev| {
                                                        editor.update(|e| e.set_edit_buffer(event_target_value(&ev)))
                                                    }
                                                />
                                            </td>
                                            <td>
                                                <button on:click=move |_| apply(editor, store_error, |e| e.commit_edit())>
                                                    "Save"
                                                </button>
                                                <button on:click=move |_| editor.update(|e| e.cancel_edit())>
                                                    "Cancel"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                    .into_view()
                                } else {
                                    view! {
                                        <tr>
                                            <td>{id.to_string()}</td>
                                            <td>{role.name}</td>
                                            <td>
                                                <button
                                                    class="icon edit"
                                                    title="Edit"
                                                    on:click=move |_| {
                                                        editor.update(|e| {
                                                            e.begin_edit(id);
                                                        })
                                                    }
                                                >
                                                    "✎"
                                                </button>
                                                <button
                                                    class="icon delete"
                                                    title="Delete"
                                                    on:click=move |_| apply(editor, store_error, move |e| e.remove(id))
                                                >
                                                    "🗑"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                    .into_view()
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>

            <FieldError text=store_error/>
        </div>
    }
}
