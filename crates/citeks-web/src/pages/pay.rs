//! Pay Page
//!
//! Embedded checkout for one package. Every change of the rush flag starts a
//! fresh session; the controller drops stale responses and never attaches a
//! widget prepared for a superseded session.

use std::rc::Rc;

use citeks_core::{CheckoutController, CheckoutParams, CheckoutState, pricing};
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::Element;

use crate::api::{self, HttpClient};
use crate::components::RushToggle;
use crate::widget::{CHECKOUT_CONTAINER_ID, StripeWidgetHost};

type Controller = CheckoutController<HttpClient, StripeWidgetHost>;

/// Start the mount once the container is attached, checking again each frame
/// until it is or the page has gone.
fn mount_when_connected(container: NodeRef<Div>, controller: StoredValue<Rc<Controller>, LocalStorage>) {
    let Some(element) = container.try_get_untracked().flatten() else {
        return;
    };
    let Some(ctrl) = controller.try_get_value() else {
        return;
    };
    if element.is_connected() {
        spawn_local(async move { ctrl.try_mount().await });
    } else {
        request_animation_frame(move || mount_when_connected(container, controller));
    }
}

#[component]
pub fn PayPage(params: CheckoutParams) -> impl IntoView {
    let package = params.package;
    let rush = RwSignal::new(params.rush);
    let state = RwSignal::new(CheckoutState::Idle);
    let container = NodeRef::<Div>::new();

    let total = Memo::new(move |_| pricing::display_total(package, rush.get()));

    let config = api::site_config();
    let controller: Rc<Controller> = Rc::new(
        CheckoutController::new(
            HttpClient::new(config.clone()),
            StripeWidgetHost::new(config.publishable_key, move || {
                container
                    .try_get_untracked()
                    .flatten()
                    .map(Element::from)
                    .filter(|element| element.is_connected())
            }),
            api::page_origin(),
        )
        .with_observer(move |s| {
            state.try_set(s.clone());
        }),
    );
    let controller = StoredValue::new_local(controller);

    // New session whenever the selection changes
    Effect::new(move |_| {
        let selection = params.with_rush(rush.get());
        let ctrl = controller.get_value();
        spawn_local(async move { ctrl.select(selection).await });
    });

    // Mount once a secret is ready and the container is in the document
    Effect::new(move |_| {
        let ready = matches!(state.get(), CheckoutState::Ready { .. });
        if ready && container.get().is_some() {
            mount_when_connected(container, controller);
        }
    });

    on_cleanup(move || {
        if let Some(ctrl) = controller.try_get_value() {
            ctrl.teardown();
        }
    });

    view! {
        <section class="pay">
            <div class="container">
                <h1>"Payment"</h1>
                <div class="card">
                    <h2>{package.name}</h2>
                    <p class="muted">
                        {format!(
                            "Base price {}. Typical timeline {} days.",
                            package.display_price(),
                            package.standard_days,
                        )}
                    </p>
                    <div class="row">
                        <RushToggle
                            package=package
                            checked=rush
                            on_toggle=Callback::new(move |value: bool| rush.set(value))
                        />
                        <div class="total">{move || format!("Total: {}", total.get())}</div>
                    </div>
                    {move || {
                        state
                            .with(|s| s.error_message().map(String::from))
                            .map(|msg| view! { <div class="error">{msg}</div> })
                    }}
                    <Show when=move || state.with(CheckoutState::is_loading)>
                        <div class="muted">"Loading secure checkout…"</div>
                    </Show>
                    <div node_ref=container id=CHECKOUT_CONTAINER_ID class="checkout-frame"></div>
                    <p class="muted">"Payments are processed securely by Stripe."</p>
                </div>
            </div>
        </section>
    }
}
