//! Home Page

use citeks_core::{ScrollTarget, catalog};
use leptos::prelude::*;

use crate::app::RouteContext;
use crate::components::{ContactSection, PackageCard};

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = expect_context::<RouteContext>();

    view! {
        <section class="hero">
            <div class="container">
                <h1>"Websites that launch in days, not months"</h1>
                <p class="muted">
                    "Custom design, fast builds and clear fixed prices for small businesses."
                </p>
                <button class="btn-accent" on:click=move |_| ctx.scroll_to(ScrollTarget::Packages)>
                    "See packages"
                </button>
            </div>
        </section>

        <section id=ScrollTarget::Packages.element_id()>
            <div class="container">
                <h2>"Packages"</h2>
                <div class="packages">
                    {catalog::all()
                        .iter()
                        .map(|package| view! { <PackageCard package=package /> })
                        .collect_view()}
                </div>
            </div>
        </section>

        <ContactSection />
    }
}
