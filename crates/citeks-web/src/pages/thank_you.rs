//! Thank-You Page

use citeks_core::pricing;
use citeks_core::receipt::{self, ReceiptSummary, ReceiptView};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpClient;

#[component]
pub fn ThankYouPage(session_id: Option<String>) -> impl IntoView {
    let initial = if session_id.as_deref().is_some_and(|id| !id.is_empty()) {
        ReceiptView::Loading
    } else {
        ReceiptView::Generic
    };
    let receipt = RwSignal::new(initial);

    spawn_local(async move {
        let client = HttpClient::from_window();
        let loaded = receipt::fetch_receipt(&client, session_id.as_deref()).await;
        receipt.try_set(loaded);
    });

    view! {
        <section class="thank-you">
            <div class="container">
                <h1>"Thank you!"</h1>
                <p>"We’ll be in touch shortly to kick off your project."</p>
                {move || match receipt.get() {
                    ReceiptView::Generic => ().into_any(),
                    ReceiptView::Loading => {
                        view! { <p class="muted">"Loading your purchase summary…"</p> }.into_any()
                    }
                    ReceiptView::Summary(summary) => view! { <Summary summary=summary /> }.into_any(),
                    ReceiptView::Apology(msg) => view! { <p class="error">{msg}</p> }.into_any(),
                }}
                <a href="#/" class="btn-accent">"Back to home"</a>
            </div>
        </section>
    }
}

#[component]
fn Summary(summary: ReceiptSummary) -> impl IntoView {
    view! {
        <div class="card receipt">
            <dl>
                <dt>"Status"</dt>
                <dd>{summary.status.clone()}</dd>
                <dt>"Transaction"</dt>
                <dd>{summary.transaction_display().to_string()}</dd>
                <dt>"Package"</dt>
                <dd>{summary.package_display().to_string()}</dd>
                <dt>"Rush"</dt>
                <dd>{pricing::rush_flag(summary.rush)}</dd>
                <dt>"Total"</dt>
                <dd>{summary.total_display().to_string()}</dd>
            </dl>
        </div>
    }
}
