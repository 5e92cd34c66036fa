//! Brief Page
//!
//! Intake form for a chosen package; a valid submission continues to payment.

use citeks_core::intake::{BriefField, IntakeForm};
use citeks_core::{Package, SiteError, ValidationErrors, pricing};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, HttpClient};
use crate::app::RouteContext;
use crate::components::{RushToggle, TextField};

#[component]
pub fn BriefPage(package: &'static Package) -> impl IntoView {
    let ctx = expect_context::<RouteContext>();
    let form = RwSignal::new(IntakeForm::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let banner = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let total = Memo::new(move |_| form.with(|f| pricing::display_total(package, f.rush)));

    let on_files = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(list) = input.files() else {
            return;
        };
        spawn_local(async move {
            match api::read_attachments(&list).await {
                Ok(files) => form.update(|f| f.attach(files)),
                Err(msg) => banner.set(Some(msg)),
            }
        });
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let draft = form.get_untracked();
        submitting.set(true);
        banner.set(None);
        spawn_local(async move {
            let client = HttpClient::from_window();
            match draft.submit(package, &client).await {
                Ok(next) => {
                    errors.set(ValidationErrors::new());
                    ctx.navigate(&next);
                }
                Err(SiteError::Validation(found)) => {
                    errors.set(found);
                }
                Err(e) => banner.set(Some(e.user_message())),
            }
            // The page may already be gone after navigating
            submitting.try_set(false);
        });
    };

    let fields = BriefField::ALL
        .into_iter()
        .map(|field| {
            let input_type = if field == BriefField::Email { "email" } else { "text" };
            view! {
                <TextField
                    label=field.label()
                    input_type=input_type
                    multiline=field.is_multiline()
                    value=Signal::derive(move || form.with(|f| f.get(field).to_string()))
                    on_input=Callback::new(move |v: String| form.update(|f| f.set(field, v)))
                    error=Signal::derive(move || errors.with(|e| e.get(field.as_str())))
                />
            }
        })
        .collect_view();

    view! {
        <section class="brief">
            <div class="container">
                <h1>{format!("Project brief: {}", package.name)}</h1>
                <p class="muted">{package.timeline_note()}</p>
                <form class="card" on:submit=submit novalidate=true>
                    <div class="form-grid">{fields}</div>
                    <div class="field">
                        <label>"Asset files"</label>
                        <input type="file" multiple=true on:change=on_files />
                        <div class="muted">
                            {move || form.with(|f| format!("{} file(s) attached", f.files.len()))}
                        </div>
                    </div>
                    <div class="row">
                        <RushToggle
                            package=package
                            checked=Signal::derive(move || form.with(|f| f.rush))
                            on_toggle=Callback::new(move |rush: bool| form.update(|f| f.rush = rush))
                        />
                        <div class="total">
                            {move || format!("Total: {}", total.get())}
                        </div>
                    </div>
                    {move || banner.get().map(|msg| view! { <div class="error">{msg}</div> })}
                    <button type="submit" class="btn-accent" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Submitting…" } else { "Continue to payment" }}
                    </button>
                </form>
            </div>
        </section>
    }
}
