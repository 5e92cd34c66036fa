//! UI Components

use citeks_core::contact::{BUDGETS, ContactField, ContactForm, TITLES};
use citeks_core::{Package, Route, ScrollTarget, SiteError, ValidationErrors};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpClient;
use crate::app::RouteContext;

/// Sticky site header
#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<RouteContext>();
    let scroll = move |target: ScrollTarget| {
        move |ev: leptos::ev::MouseEvent| {
            ev.prevent_default();
            ctx.scroll_to(target);
        }
    };

    view! {
        <header class="site-header">
            <div class="container">
                <nav>
                    <a href="#/" class="brand">"CITEKS"</a>
                    <a href="#/why-us">"Why us"</a>
                    <a href="#/projects">"Projects"</a>
                    <a href="#/" on:click=scroll(ScrollTarget::Packages)>"Packages"</a>
                    <a href="#/" class="btn-accent" on:click=scroll(ScrollTarget::Contact)>
                        "Contact"
                    </a>
                </nav>
            </div>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let email = citeks_core::config::DEFAULT_CONTACT_EMAIL;
    view! {
        <footer class="site-footer">
            <div class="container row">
                <span class="muted">"© CITEKS"</span>
                <a href=format!("mailto:{email}")>{email}</a>
                <a href=Route::Privacy.to_hash()>"Privacy"</a>
                <a href=Route::TechTerms.to_hash()>"Tech terms"</a>
            </div>
        </footer>
    }
}

/// Labelled input with an inline error slot
#[component]
pub fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<&'static str>>,
    #[prop(optional)] multiline: bool,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    let class = move || {
        if error.get().is_some() {
            "invalid"
        } else {
            ""
        }
    };

    let control = if multiline {
        view! {
            <textarea
                rows=4
                class=class
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                type=input_type
                class=class
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <div class="field">
            <label>{label}</label>
            {control}
            {move || error.get().map(|msg| view! { <div class="field-error">{msg}</div> })}
        </div>
    }
}

/// Labelled select over a fixed option list
#[component]
pub fn SelectField(
    label: &'static str,
    options: &'static [&'static str],
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] error: Signal<Option<&'static str>>,
    /// Offer an empty "Select…" choice first
    #[prop(optional)]
    placeholder: bool,
) -> impl IntoView {
    view! {
        <div class="field">
            <label>{label}</label>
            <select
                class=move || if error.get().is_some() { "invalid" } else { "" }
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {placeholder.then(|| view! { <option value="">"Select…"</option> })}
                {options
                    .iter()
                    .map(|opt| view! { <option value=*opt>{*opt}</option> })
                    .collect_view()}
            </select>
            {move || error.get().map(|msg| view! { <div class="field-error">{msg}</div> })}
        </div>
    }
}

/// Rush upgrade checkbox
#[component]
pub fn RushToggle(
    package: &'static Package,
    #[prop(into)] checked: Signal<bool>,
    #[prop(into)] on_toggle: Callback<bool>,
) -> impl IntoView {
    view! {
        <label class="rush-toggle">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_toggle.run(event_target_checked(&ev))
            />
            {package.rush_label()}
        </label>
    }
}

/// Catalog card linking to the package's brief
#[component]
pub fn PackageCard(package: &'static Package) -> impl IntoView {
    let class = if package.highlight {
        "card package highlight"
    } else {
        "card package"
    };
    let brief = Route::Brief {
        package: package.id.into(),
    }
    .to_hash();

    view! {
        <div class=class>
            {package.highlight.then(|| view! { <span class="badge">"Most popular"</span> })}
            <h3>{package.name}</h3>
            <div class="price">{package.display_price()}</div>
            <p>{package.blurb}</p>
            <p class="muted">"Perfect for: " {package.perfect_for}</p>
            <ul>
                {package.features.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}
            </ul>
            <p class="muted">{package.timeline_note()}</p>
            <a href=brief class="btn-accent">{package.cta}</a>
        </div>
    }
}

/// Home page contact form
#[component]
pub fn ContactSection() -> impl IntoView {
    let form = RwSignal::new(ContactForm::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let banner = RwSignal::new(None::<String>);
    let sending = RwSignal::new(false);

    let value = move |field: ContactField| Signal::derive(move || form.with(|f| f.get(field).to_string()));
    let error = move |field: ContactField| Signal::derive(move || errors.with(|e| e.get(field.as_str())));
    let setter = move |field: ContactField| Callback::new(move |v: String| form.update(|f| f.set(field, v)));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }
        let mut draft = form.get_untracked();
        sending.set(true);
        spawn_local(async move {
            let client = HttpClient::from_window();
            match draft.submit(&client).await {
                Ok(()) => {
                    errors.set(ValidationErrors::new());
                    banner.set(None);
                    form.set(draft);
                }
                Err(SiteError::Validation(found)) => errors.set(found),
                Err(e) => {
                    errors.set(ValidationErrors::new());
                    banner.set(Some(e.user_message()));
                }
            }
            sending.try_set(false);
        });
    };

    view! {
        <section id=ScrollTarget::Contact.element_id() class="contact">
            <div class="container">
                <h2>"Tell us about your project"</h2>
                <Show
                    when=move || !form.with(ContactForm::is_sent)
                    fallback=|| view! {
                        <div class="success">"Thanks! We’ll reply within one business day."</div>
                    }
                >
                    <form class="card" on:submit=submit novalidate=true>
                        <div class="form-grid">
                            <SelectField
                                label=ContactField::Title.label()
                                options=&TITLES
                                value=value(ContactField::Title)
                                on_change=setter(ContactField::Title)
                                error=error(ContactField::Title)
                            />
                            <TextField
                                label=ContactField::First.label()
                                value=value(ContactField::First)
                                on_input=setter(ContactField::First)
                                error=error(ContactField::First)
                            />
                            <TextField
                                label=ContactField::Last.label()
                                value=value(ContactField::Last)
                                on_input=setter(ContactField::Last)
                                error=error(ContactField::Last)
                            />
                            <TextField
                                label=ContactField::Email.label()
                                input_type="email"
                                value=value(ContactField::Email)
                                on_input=setter(ContactField::Email)
                                error=error(ContactField::Email)
                            />
                            <TextField
                                label=ContactField::Project.label()
                                value=value(ContactField::Project)
                                on_input=setter(ContactField::Project)
                                error=error(ContactField::Project)
                            />
                            <SelectField
                                label=ContactField::Budget.label()
                                options=&BUDGETS
                                placeholder=true
                                value=value(ContactField::Budget)
                                on_change=setter(ContactField::Budget)
                                error=error(ContactField::Budget)
                            />
                        </div>
                        <TextField
                            label=ContactField::Message.label()
                            multiline=true
                            value=value(ContactField::Message)
                            on_input=setter(ContactField::Message)
                            error=error(ContactField::Message)
                        />
                        {move || banner.get().map(|msg| view! { <div class="error">{msg}</div> })}
                        <button type="submit" class="btn-accent" disabled=move || sending.get()>
                            {move || if sending.get() { "Sending…" } else { "Send" }}
                        </button>
                    </form>
                </Show>
            </div>
        </section>
    }
}
