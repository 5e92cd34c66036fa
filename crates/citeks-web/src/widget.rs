//! Embedded Checkout Widget
//!
//! Loads Stripe.js on demand, prepares embedded checkout for a session and
//! attaches it to the page's checkout container.

use std::cell::RefCell;

use async_trait::async_trait;
use citeks_core::api::{ClientSecret, MountedWidget, WidgetHost};
use citeks_core::{Result, SiteError};
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlScriptElement};

/// Element id of the checkout container
pub const CHECKOUT_CONTAINER_ID: &str = "checkout";

const STRIPE_JS_URL: &str = "https://js.stripe.com/v3/";

const WIDGET_UNAVAILABLE: &str = "Stripe not available.";

type JsResult<T> = std::result::Result<T, JsValue>;

thread_local! {
    /// Pending or settled Stripe.js load shared by every mount
    static STRIPE_JS: RefCell<Option<Promise>> = const { RefCell::new(None) };
}

/// An embedded checkout instance
pub struct StripeWidget {
    checkout: JsValue,
}

impl MountedWidget for StripeWidget {
    fn destroy(self) {
        if let Err(e) = call_method(&self.checkout, "destroy", &Array::new()) {
            tracing::warn!(error = ?e, "Embedded checkout destroy failed");
        }
    }
}

/// Mounts embedded checkout with the site's publishable key.
///
/// `container` yields the attachment point only while it is in the document.
pub struct StripeWidgetHost {
    publishable_key: Option<String>,
    container: Box<dyn Fn() -> Option<Element>>,
}

impl StripeWidgetHost {
    pub fn new(
        publishable_key: Option<String>,
        container: impl Fn() -> Option<Element> + 'static,
    ) -> Self {
        Self {
            publishable_key,
            container: Box::new(container),
        }
    }
}

#[async_trait(?Send)]
impl WidgetHost for StripeWidgetHost {
    type Widget = StripeWidget;

    async fn prepare(&self, secret: &ClientSecret) -> Result<Option<StripeWidget>> {
        if (self.container)().is_none() {
            return Ok(None);
        }
        let Some(key) = self.publishable_key.as_deref() else {
            tracing::warn!("No publishable key configured");
            return Err(SiteError::WidgetMount(WIDGET_UNAVAILABLE.into()));
        };

        load_stripe_js().await.map_err(unavailable)?;
        let checkout = init_embedded_checkout(key, secret).await.map_err(unavailable)?;
        Ok(Some(StripeWidget { checkout }))
    }

    fn attach(&self, widget: &StripeWidget) -> Result<()> {
        let Some(element) = (self.container)() else {
            tracing::warn!("Checkout container left the page before attach");
            return Err(SiteError::WidgetMount(WIDGET_UNAVAILABLE.into()));
        };
        call_method(&widget.checkout, "mount", &Array::of1(&element)).map_err(unavailable)?;
        tracing::info!("Embedded checkout mounted");
        Ok(())
    }
}

fn unavailable(e: JsValue) -> SiteError {
    tracing::error!(error = ?e, "Embedded checkout failed");
    SiteError::WidgetMount(WIDGET_UNAVAILABLE.into())
}

fn call_method(target: &JsValue, name: &str, args: &Array) -> JsResult<JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    Reflect::apply(&method, target, args)
}

/// Wait for Stripe.js, injecting the script on first use. A failed load is
/// forgotten so the next mount tries again.
async fn load_stripe_js() -> JsResult<()> {
    let cached = STRIPE_JS.with(|cell| cell.borrow().clone());
    let pending = match cached {
        Some(pending) => pending,
        None => {
            let pending = inject_stripe_js()?;
            STRIPE_JS.with(|cell| *cell.borrow_mut() = Some(pending.clone()));
            pending
        }
    };

    if let Err(e) = JsFuture::from(pending).await {
        STRIPE_JS.with(|cell| cell.borrow_mut().take());
        return Err(e);
    }
    Ok(())
}

fn inject_stripe_js() -> JsResult<Promise> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    if Reflect::has(&window, &JsValue::from_str("Stripe"))? {
        return Ok(Promise::resolve(&JsValue::UNDEFINED));
    }
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let head = document.head().ok_or_else(|| JsValue::from_str("no head"))?;

    let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
    script.set_src(STRIPE_JS_URL);
    script.set_async(true);
    let loaded = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });
    head.append_child(&script)?;
    Ok(loaded)
}

async fn init_embedded_checkout(publishable_key: &str, secret: &ClientSecret) -> JsResult<JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let stripe_ctor: Function = Reflect::get(&window, &JsValue::from_str("Stripe"))?.dyn_into()?;
    let stripe = stripe_ctor.call1(&JsValue::NULL, &JsValue::from_str(publishable_key))?;

    let options = Object::new();
    Reflect::set(
        &options,
        &JsValue::from_str("clientSecret"),
        &JsValue::from_str(secret.as_str()),
    )?;
    let pending: Promise = call_method(&stripe, "initEmbeddedCheckout", &Array::of1(&options))?
        .dyn_into()?;
    JsFuture::from(pending).await
}
