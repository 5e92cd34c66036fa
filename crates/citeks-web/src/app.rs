//! Main App Component
//!
//! Hash router: the current route is derived from `location.hash` and
//! re-read on every `hashchange`.

use citeks_core::checkout::CheckoutParams;
use citeks_core::{Navigator, Route, ScrollTarget, catalog, route::ScrollAction};
use leptos::prelude::*;

use crate::components::{Footer, Header};
use crate::pages::{
    BriefPage, HomePage, NotFoundPage, PayPage, PrivacyPage, ProjectsPage, TechTermsPage,
    ThankYouPage, WhyUsPage,
};

/// Routing handle shared with every page
#[derive(Clone, Copy)]
pub struct RouteContext {
    pub route: Memo<Route>,
    navigator: RwSignal<Navigator>,
}

impl RouteContext {
    /// Move to `route` by rewriting the hash
    pub fn navigate(&self, route: &Route) {
        if let Err(e) = window().location().set_hash(&route.to_hash()) {
            tracing::warn!(error = ?e, "Could not change route");
        }
    }

    /// Scroll to a home-page section, going home first when elsewhere
    pub fn scroll_to(&self, target: ScrollTarget) {
        let current = self.route.get_untracked();
        match self
            .navigator
            .try_update(|n| n.request_scroll(target, &current))
        {
            Some(ScrollAction::ScrollNow(target)) => scroll_into_view(target),
            Some(ScrollAction::NavigateHome) => self.navigate(&Route::Home),
            None => {}
        }
    }
}

fn current_route() -> Route {
    Route::parse(&window().location().hash().unwrap_or_default())
}

fn scroll_into_view(target: ScrollTarget) {
    if let Some(element) = document().get_element_by_id(target.element_id()) {
        element.scroll_into_view();
    }
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let (hash_route, set_hash_route) = signal(current_route());
    // Root listener lives as long as the page
    let _ = window_event_listener(leptos::ev::hashchange, move |_| {
        set_hash_route.set(current_route());
    });

    let route = Memo::new(move |_| hash_route.get());
    let navigator = RwSignal::new(Navigator::new());
    provide_context(RouteContext { route, navigator });

    // Deliver a scroll requested from another page once home is rendered
    Effect::new(move |_| {
        let current = route.get();
        if let Some(target) = navigator.try_update(|n| n.take_pending(&current)).flatten() {
            request_animation_frame(move || scroll_into_view(target));
        } else if !current.is_home() {
            window().scroll_to_with_x_and_y(0.0, 0.0);
        }
    });

    view! {
        <div class="site">
            <Header />
            <main>{move || render(route.get())}</main>
            <Footer />
        </div>
    }
}

fn render(route: Route) -> AnyView {
    match route {
        Route::Home => view! { <HomePage /> }.into_any(),
        Route::WhyUs => view! { <WhyUsPage /> }.into_any(),
        Route::Projects => view! { <ProjectsPage /> }.into_any(),
        Route::Brief { package } => match catalog::find(&package) {
            Some(package) => view! { <BriefPage package=package /> }.into_any(),
            None => view! { <NotFoundPage /> }.into_any(),
        },
        Route::Pay { package, rush } => match CheckoutParams::resolve(&package, rush) {
            Some(params) => view! { <PayPage params=params /> }.into_any(),
            None => view! { <NotFoundPage /> }.into_any(),
        },
        Route::ThankYou { session_id } => {
            view! { <ThankYouPage session_id=session_id /> }.into_any()
        }
        Route::Privacy => view! { <PrivacyPage /> }.into_any(),
        Route::TechTerms => view! { <TechTermsPage /> }.into_any(),
        Route::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}
