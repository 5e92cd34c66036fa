//! Static Pages
//!
//! Content-only pages: why us, projects, legal and the not-found fallback.

use citeks_core::ScrollTarget;
use leptos::prelude::*;

use crate::app::RouteContext;

const PRINCIPLES: [(&str, &str); 4] = [
    (
        "Clarity beats clever",
        "Decisions are faster when choices are fewer, labels plain, and the next step obvious.",
    ),
    (
        "Trust quickly",
        "Proof, guarantees, and transparent pricing lower perceived risk and boost confidence.",
    ),
    (
        "Friction kills conversions",
        "We trim steps, optimize forms, and keep load times tight. The easiest path wins.",
    ),
    (
        "Motion with restraint",
        "Micro-interactions give feedback without stealing attention from the goal.",
    ),
];

/// (title, blurb, screenshot)
const PROJECTS: [(&str, &str, &str); 5] = [
    (
        "Harbor & Sage Law (Scale)",
        "A full Scale build for a business law firm. Editorial layout, sharp typography, transparent pricing, and SEO-ready practice pages.",
        "/showcase/harbor-sage-law.png",
    ),
    (
        "Vigor Lab (Growth)",
        "Bold, energetic, action-led. A high-energy hero and a clear programs matrix drive quick sign-ups.",
        "/showcase/vigor-lab-hero.png",
    ),
    (
        "Urban Barber (Starter)",
        "A personal, editorial take with warm tones and craft details. Clean structure and a clear booking flow.",
        "/showcase/urban-barber.png",
    ),
    (
        "SentienceWorks AI Services (Growth)",
        "Electric motion with clear copy. Futuristic yet grounded for comprehension.",
        "/showcase/sentienceworks-ai.png",
    ),
    (
        "Meridian Museum (Concept)",
        "Editorial concept blending natural textures with clean layouts. Designed to evoke mood and presence.",
        "/showcase/meridian-museum.png",
    ),
];

const PRIVACY: [(&str, &str); 8] = [
    ("What we collect.", "Contact form and brief submissions (including uploads). No cookies."),
    (
        "Use of data.",
        "Replies, proposals, service delivery, payments (Stripe), accounting/legal compliance.",
    ),
    ("Sharing.", "Only with providers we use to operate (hosting, Stripe). No selling of personal data."),
    ("Retention.", "Kept as needed for services and legal obligations, then deleted/anonymized."),
    ("Security.", "Reputable providers and reasonable measures. No method is 100% secure."),
    ("Your rights.", "Request access/correction/deletion via contact@citeks.net."),
    ("International.", "Processing in the EEA and other locations via our providers’ safeguards."),
    ("Changes.", "We’ll post any changes here."),
];

const TECH_TERMS: [(&str, &str); 10] = [
    ("CTA (Call to Action)", "The primary action you want a visitor to take (e.g., call, book, buy)."),
    ("Conversion rate (CVR)", "Percentage of visitors who complete the desired action."),
    ("IA (Information Architecture)", "How content is structured and labeled for easy navigation."),
    ("Responsive", "Layouts that adapt to different screen sizes."),
    ("SEO", "Optimizing content/structure to rank in search."),
    ("Schema", "Structured data that helps search engines understand your content."),
    ("CRM", "Lead/customer tracking and integrations."),
    ("Analytics", "Tracking behavior and performance (e.g., conversions)."),
    ("Accessibility", "Designing so people of all abilities can use the site."),
    ("Performance", "How quickly a page loads and responds."),
];

#[component]
pub fn WhyUsPage() -> impl IntoView {
    let ctx = expect_context::<RouteContext>();

    view! {
        <section class="why-us">
            <div class="container">
                <h1>"Why choose CITEKS"</h1>
                <p class="muted">
                    "Calm visuals with sharp structure. We center every page on one clear action, \
                     surface proof early, and remove friction so more people say yes."
                </p>
                <div class="packages">
                    {PRINCIPLES
                        .iter()
                        .map(|(title, text)| view! {
                            <div class="card">
                                <h3>{*title}</h3>
                                <p class="muted">{*text}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
                <a
                    href="#/"
                    class="btn-accent"
                    on:click=move |ev| {
                        ev.prevent_default();
                        ctx.scroll_to(ScrollTarget::Packages);
                    }
                >
                    "See packages"
                </a>
            </div>
        </section>
    }
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    view! {
        <section class="projects">
            <div class="container">
                <h1>"Projects"</h1>
                <div class="packages">
                    {PROJECTS
                        .iter()
                        .map(|(title, blurb, src)| view! {
                            <div class="card">
                                <img src=*src alt=*title loading="lazy" />
                                <h3>{*title}</h3>
                                <p class="muted">{*blurb}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn TermList(title: &'static str, rows: &'static [(&'static str, &'static str)]) -> impl IntoView {
    view! {
        <section class="legal">
            <div class="container">
                <h1>{title}</h1>
                <div class="card">
                    <ul>
                        {rows
                            .iter()
                            .map(|(term, text)| view! { <li><b>{*term}</b>" "{*text}</li> })
                            .collect_view()}
                    </ul>
                </div>
                <a href="#/" class="btn-accent">"Back to home"</a>
            </div>
        </section>
    }
}

#[component]
pub fn PrivacyPage() -> impl IntoView {
    view! { <TermList title="Privacy Policy" rows=&PRIVACY /> }
}

#[component]
pub fn TechTermsPage() -> impl IntoView {
    view! { <TermList title="Technical terms" rows=&TECH_TERMS /> }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="not-found">
            <div class="container">
                <h1>"Page not found"</h1>
                <a href="#/" class="btn-accent">"Back to home"</a>
            </div>
        </section>
    }
}
