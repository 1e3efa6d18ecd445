//! Small shared form widgets.

use leptos::*;

use accesspanel_auth::{Field, FieldErrors};

/// Inline error text under an input. Renders nothing for an empty message.
#[component]
pub fn FieldError(#[prop(into)] text: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || text.with(|t| t.as_deref().is_some_and(|t| !t.is_empty()))>
            <p class="field-error">{move || text.get().unwrap_or_default()}</p>
        </Show>
    }
}

/// Labelled text input with its inline error.
#[component]
pub fn TextField(
    label: &'static str,
    field: Field,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "")] placeholder: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    on_blur: Callback<()>,
    #[prop(into)] error: Signal<Option<&'static str>>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=field.name()>{label}</label>
            <input
                type=input_type
                id=field.name()
                name=field.name()
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
                on:blur=move |_| on_blur.call(())
            />
            <FieldError text=Signal::derive(move || error.get().map(str::to_string))/>
        </div>
    }
}

/// Error for `field`, but only once the user has left that input (or
/// tried to submit).
pub fn visible_error(
    errors: Memo<FieldErrors>,
    touched: RwSignal<std::collections::HashSet<Field>>,
    field: Field,
) -> Signal<Option<&'static str>> {
    Signal::derive(move || {
        if touched.with(|t| t.contains(&field)) {
            errors.with(|e| e.get(field))
        } else {
            None
        }
    })
}
