//! Embedded Checkout
//!
//! ```text
//!            begin(params)
//!   Idle ───────────────────▶ Requesting ──err──▶ Error
//!     ▲                           │ ok
//!     │ teardown                  ▼
//!     │                         Ready ◀───────────────┐
//!     │                           │ claim_mount       │ no attachment point
//!     │                           ▼                   │
//!     └──────────────────────  Mounting ──────────────┘
//!                                 │ widget
//!                                 ▼
//!                              Mounted
//! ```
//!
//! Every `begin` bumps a generation number. Session responses and widget
//! mounts carry the [`Ticket`] they were started with; anything arriving for
//! an older generation is discarded. A widget prepared for an older
//! generation is destroyed without ever being attached.
//! The single widget slot is emptied before a new request starts, so at most
//! one widget is ever live.

use std::cell::RefCell;

use crate::api::{CheckoutApi, CheckoutSessionRequest, ClientSecret, MountedWidget, WidgetHost};
use crate::catalog::{self, Package};
use crate::error::Result;
use crate::pricing;

/// The inputs a checkout session is scoped to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckoutParams {
    pub package: &'static Package,
    pub rush: bool,
}

impl CheckoutParams {
    pub const fn new(package: &'static Package, rush: bool) -> Self {
        Self { package, rush }
    }

    /// Resolve from a route parameter; `None` for unknown packages
    pub fn resolve(package_id: &str, rush: bool) -> Option<Self> {
        catalog::find(package_id).map(|package| Self::new(package, rush))
    }

    /// Total shown next to the widget
    pub fn total(&self) -> u32 {
        pricing::total(self.package, self.rush)
    }

    #[must_use]
    pub const fn with_rush(self, rush: bool) -> Self {
        Self { rush, ..self }
    }

    pub fn request(&self, origin: &str) -> CheckoutSessionRequest {
        CheckoutSessionRequest {
            slug: self.package.id.to_string(),
            rush: self.rush,
            origin: origin.to_string(),
        }
    }
}

/// Identifies one `begin` call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    pub params: CheckoutParams,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    Requesting(Ticket),
    Ready { ticket: Ticket, secret: ClientSecret },
    Mounting { ticket: Ticket, secret: ClientSecret },
    Mounted { ticket: Ticket },
    Error { ticket: Ticket, message: String },
}

impl CheckoutState {
    pub const fn ticket(&self) -> Option<&Ticket> {
        match self {
            Self::Idle => None,
            Self::Requesting(ticket)
            | Self::Ready { ticket, .. }
            | Self::Mounting { ticket, .. }
            | Self::Mounted { ticket }
            | Self::Error { ticket, .. } => Some(ticket),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Requesting(_) | Self::Ready { .. } | Self::Mounting { .. })
    }
}

/// Owner of the only live widget. Dropping the slot releases it.
struct WidgetSlot<W: MountedWidget> {
    widget: Option<W>,
}

impl<W: MountedWidget> WidgetSlot<W> {
    const fn empty() -> Self {
        Self { widget: None }
    }

    fn install(&mut self, widget: W) {
        self.release();
        self.widget = Some(widget);
    }

    fn release(&mut self) {
        if let Some(widget) = self.widget.take() {
            widget.destroy();
            tracing::debug!("Released checkout widget");
        }
    }

    const fn is_occupied(&self) -> bool {
        self.widget.is_some()
    }
}

impl<W: MountedWidget> Drop for WidgetSlot<W> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Synchronous checkout state machine
pub struct CheckoutOrchestrator<W: MountedWidget> {
    generation: u64,
    state: CheckoutState,
    slot: WidgetSlot<W>,
}

impl<W: MountedWidget> Default for CheckoutOrchestrator<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: MountedWidget> CheckoutOrchestrator<W> {
    pub const fn new() -> Self {
        Self {
            generation: 0,
            state: CheckoutState::Idle,
            slot: WidgetSlot::empty(),
        }
    }

    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub const fn has_live_widget(&self) -> bool {
        self.slot.is_occupied()
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Start a new session for `params`, releasing any mounted widget first.
    pub fn begin(&mut self, params: CheckoutParams) -> Ticket {
        self.slot.release();
        self.generation += 1;
        let ticket = Ticket {
            generation: self.generation,
            params,
        };
        self.state = CheckoutState::Requesting(ticket);
        tracing::debug!(
            package = params.package.id,
            rush = params.rush,
            generation = self.generation,
            "Requesting checkout session"
        );
        ticket
    }

    /// Apply a session response. Returns `true` when a mount should follow.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<ClientSecret>) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale checkout session"
            );
            return false;
        }
        match result {
            Ok(secret) => {
                self.state = CheckoutState::Ready { ticket, secret };
                true
            }
            Err(e) => {
                tracing::warn!(package = ticket.params.package.id, error = %e, "Checkout session failed");
                self.state = CheckoutState::Error {
                    ticket,
                    message: e.user_message(),
                };
                false
            }
        }
    }

    /// Move `Ready` to `Mounting`, handing out what the mount needs.
    /// `None` unless a session is ready and no mount is underway.
    pub fn claim_mount(&mut self) -> Option<(Ticket, ClientSecret)> {
        match &self.state {
            CheckoutState::Ready { ticket, secret } => {
                let claim = (*ticket, secret.clone());
                self.state = CheckoutState::Mounting {
                    ticket: claim.0,
                    secret: claim.1.clone(),
                };
                Some(claim)
            }
            _ => None,
        }
    }

    /// Apply the outcome of preparing a widget.
    ///
    /// `attach` runs only when `ticket` is still the current mount, so a
    /// widget prepared for a superseded session is destroyed without ever
    /// reaching the page.
    pub fn mount_completed<F>(&mut self, ticket: Ticket, outcome: Result<Option<W>>, attach: F)
    where
        F: FnOnce(&W) -> Result<()>,
    {
        let current = self.is_current(&ticket)
            && matches!(&self.state, CheckoutState::Mounting { ticket: t, .. } if *t == ticket);

        if !current {
            if let Ok(Some(widget)) = outcome {
                tracing::debug!(generation = ticket.generation, "Discarding stale checkout widget");
                widget.destroy();
            }
            return;
        }

        let outcome = match outcome {
            Ok(Some(widget)) => match attach(&widget) {
                Ok(()) => Ok(Some(widget)),
                Err(e) => {
                    widget.destroy();
                    Err(e)
                }
            },
            other => other,
        };

        match outcome {
            Ok(Some(widget)) => {
                self.slot.install(widget);
                self.state = CheckoutState::Mounted { ticket };
                tracing::info!(
                    package = ticket.params.package.id,
                    rush = ticket.params.rush,
                    "Checkout widget mounted"
                );
            }
            Ok(None) => {
                // Attachment point not rendered yet; keep the session for a retry
                let secret = match &self.state {
                    CheckoutState::Mounting { secret, .. } => secret.clone(),
                    _ => return,
                };
                self.state = CheckoutState::Ready { ticket, secret };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Checkout widget failed to mount");
                self.state = CheckoutState::Error {
                    ticket,
                    message: e.user_message(),
                };
            }
        }
    }

    /// Release the widget and invalidate anything in flight
    pub fn teardown(&mut self) {
        self.slot.release();
        self.generation += 1;
        self.state = CheckoutState::Idle;
    }
}

/// Async driver tying the state machine to the payment API and widget host.
///
/// Borrows of the inner state never span an await.
pub struct CheckoutController<A, H>
where
    A: CheckoutApi,
    H: WidgetHost,
{
    api: A,
    host: H,
    origin: String,
    inner: RefCell<CheckoutOrchestrator<H::Widget>>,
    observer: Option<Box<dyn Fn(&CheckoutState)>>,
}

impl<A, H> CheckoutController<A, H>
where
    A: CheckoutApi,
    H: WidgetHost,
{
    pub fn new(api: A, host: H, origin: impl Into<String>) -> Self {
        Self {
            api,
            host,
            origin: origin.into(),
            inner: RefCell::new(CheckoutOrchestrator::new()),
            observer: None,
        }
    }

    /// Called with the new state after every transition
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&CheckoutState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> CheckoutState {
        self.inner.borrow().state().clone()
    }

    pub fn has_live_widget(&self) -> bool {
        self.inner.borrow().has_live_widget()
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            let state = self.state();
            observer(&state);
        }
    }

    /// Enter (or re-enter) checkout for `params`: new session, then mount.
    pub async fn select(&self, params: CheckoutParams) {
        let ticket = self.inner.borrow_mut().begin(params);
        self.notify();

        let request = params.request(&self.origin);
        let result = self.api.create_session(&request).await;

        let mount = self.inner.borrow_mut().resolve(ticket, result);
        self.notify();
        if mount {
            self.try_mount().await;
        }
    }

    /// Flip rush for the current package and start over
    pub async fn toggle_rush(&self) {
        let current = self.inner.borrow().state().ticket().map(|t| t.params);
        if let Some(params) = current {
            self.select(params.with_rush(!params.rush)).await;
        }
    }

    /// Mount if a session is ready. Safe to call on every render.
    pub async fn try_mount(&self) {
        let claim = self.inner.borrow_mut().claim_mount();
        let Some((ticket, secret)) = claim else {
            return;
        };
        self.notify();

        let outcome = self.host.prepare(&secret).await;
        self.inner
            .borrow_mut()
            .mount_completed(ticket, outcome, |widget| self.host.attach(widget));
        self.notify();
    }

    /// Release the widget, e.g. when the page goes away
    pub fn teardown(&self) {
        self.inner.borrow_mut().teardown();
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::api::SessionStatus;
    use crate::error::SiteError;
    use crate::intake::{BriefField, IntakeForm};
    use crate::route::Route;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Event {
        Mounted(String),
        Destroyed(String),
        /// Destroyed before it was ever attached
        Discarded(String),
    }

    /// Counts attached widgets and records the peak
    #[derive(Default)]
    struct Tracker {
        log: RefCell<Vec<Event>>,
        live: Cell<usize>,
        peak: Cell<usize>,
    }

    struct FakeWidget {
        secret: String,
        attached: Cell<bool>,
        tracker: Rc<Tracker>,
    }

    impl MountedWidget for FakeWidget {
        fn destroy(self) {
            let event = if self.attached.get() {
                self.tracker.live.set(self.tracker.live.get() - 1);
                Event::Destroyed(self.secret)
            } else {
                Event::Discarded(self.secret)
            };
            self.tracker.log.borrow_mut().push(event);
        }
    }

    struct FakeHost {
        tracker: Rc<Tracker>,
        /// Whether the attachment point is in the page
        container: Rc<Cell<bool>>,
        fail_attach: Rc<Cell<bool>>,
        fail: bool,
        /// Preparing these secrets waits for the gate
        gates: HashMap<String, Rc<Notify>>,
    }

    #[async_trait(?Send)]
    impl WidgetHost for FakeHost {
        type Widget = FakeWidget;

        async fn prepare(&self, secret: &ClientSecret) -> Result<Option<FakeWidget>> {
            if let Some(gate) = self.gates.get(secret.as_str()) {
                gate.notified().await;
            }
            if self.fail {
                return Err(SiteError::WidgetMount("Stripe not available.".into()));
            }
            if !self.container.get() {
                return Ok(None);
            }
            Ok(Some(FakeWidget {
                secret: secret.as_str().to_string(),
                attached: Cell::new(false),
                tracker: self.tracker.clone(),
            }))
        }

        fn attach(&self, widget: &FakeWidget) -> Result<()> {
            if self.fail_attach.get() {
                return Err(SiteError::WidgetMount("Stripe not available.".into()));
            }
            widget.attached.set(true);
            let live = self.tracker.live.get() + 1;
            self.tracker.live.set(live);
            self.tracker.peak.set(self.tracker.peak.get().max(live));
            self.tracker
                .log
                .borrow_mut()
                .push(Event::Mounted(widget.secret.clone()));
            Ok(())
        }
    }

    /// Answers `secret-<slug>-<rush>`; requests for gated rush values wait
    #[derive(Default)]
    struct FakeApi {
        requests: Rc<RefCell<Vec<serde_json::Value>>>,
        gates: HashMap<bool, Rc<Notify>>,
        error_body: Option<&'static str>,
    }

    #[async_trait(?Send)]
    impl CheckoutApi for FakeApi {
        async fn create_session(&self, request: &CheckoutSessionRequest) -> Result<ClientSecret> {
            self.requests
                .borrow_mut()
                .push(serde_json::to_value(request).unwrap());
            if let Some(gate) = self.gates.get(&request.rush) {
                gate.notified().await;
            }
            if let Some(body) = self.error_body {
                return Err(SiteError::SessionCreation(
                    crate::api::extract_error_message(body),
                ));
            }
            Ok(ClientSecret::new(format!(
                "secret-{}-{}",
                request.slug, request.rush
            )))
        }

        async fn session_status(&self, _session_id: &str) -> Result<SessionStatus> {
            unreachable!("not used by checkout")
        }
    }

    struct Harness {
        tracker: Rc<Tracker>,
        container: Rc<Cell<bool>>,
        fail_attach: Rc<Cell<bool>>,
        requests: Rc<RefCell<Vec<serde_json::Value>>>,
    }

    fn controller(api: FakeApi, fail_mount: bool) -> (CheckoutController<FakeApi, FakeHost>, Harness) {
        gated_controller(api, fail_mount, HashMap::new())
    }

    fn gated_controller(
        api: FakeApi,
        fail_mount: bool,
        gates: HashMap<String, Rc<Notify>>,
    ) -> (CheckoutController<FakeApi, FakeHost>, Harness) {
        let tracker = Rc::new(Tracker::default());
        let container = Rc::new(Cell::new(true));
        let fail_attach = Rc::new(Cell::new(false));
        let requests = api.requests.clone();
        let host = FakeHost {
            tracker: tracker.clone(),
            container: container.clone(),
            fail_attach: fail_attach.clone(),
            fail: fail_mount,
            gates,
        };
        let harness = Harness {
            tracker,
            container,
            fail_attach,
            requests,
        };
        (
            CheckoutController::new(api, host, "https://citeks.net"),
            harness,
        )
    }

    fn growth(rush: bool) -> CheckoutParams {
        CheckoutParams::resolve("growth", rush).unwrap()
    }

    fn mounted_secret(state: &CheckoutState, h: &Harness) -> Option<String> {
        match state {
            CheckoutState::Mounted { .. } => h.tracker.log.borrow().iter().rev().find_map(|e| match e {
                Event::Mounted(s) => Some(s.clone()),
                Event::Destroyed(_) | Event::Discarded(_) => None,
            }),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_select_mounts_one_widget() {
        let (ctrl, h) = controller(FakeApi::default(), false);
        ctrl.select(growth(false)).await;

        assert!(matches!(ctrl.state(), CheckoutState::Mounted { .. }));
        assert_eq!(mounted_secret(&ctrl.state(), &h).as_deref(), Some("secret-growth-false"));
        assert_eq!(h.tracker.live.get(), 1);
    }

    #[tokio::test]
    async fn test_toggle_tears_down_before_mounting() {
        let (ctrl, h) = controller(FakeApi::default(), false);
        ctrl.select(growth(false)).await;
        ctrl.toggle_rush().await;
        ctrl.toggle_rush().await;

        assert_eq!(
            *h.tracker.log.borrow(),
            vec![
                Event::Mounted("secret-growth-false".into()),
                Event::Destroyed("secret-growth-false".into()),
                Event::Mounted("secret-growth-true".into()),
                Event::Destroyed("secret-growth-true".into()),
                Event::Mounted("secret-growth-false".into()),
            ]
        );
        assert_eq!(h.tracker.peak.get(), 1);
        assert_eq!(h.tracker.live.get(), 1);
    }

    #[tokio::test]
    async fn test_rapid_toggle_discards_stale_session() {
        let slow = Rc::new(Notify::new());
        let api = FakeApi {
            gates: HashMap::from([(false, slow.clone())]),
            ..Default::default()
        };
        let (ctrl, h) = controller(api, false);

        // rush=false is still in flight when rush=true starts and finishes
        futures::join!(ctrl.select(growth(false)), async {
            ctrl.select(growth(true)).await;
            slow.notify_one();
        });

        let state = ctrl.state();
        assert_eq!(state.ticket().map(|t| t.params.rush), Some(true));
        assert_eq!(mounted_secret(&state, &h).as_deref(), Some("secret-growth-true"));
        assert_eq!(h.tracker.peak.get(), 1);
        assert_eq!(h.tracker.live.get(), 1);
        assert_eq!(h.requests.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_error_body_is_shown_verbatim() {
        let api = FakeApi {
            error_body: Some(r#"{"error":"Card networks down"}"#),
            ..Default::default()
        };
        let (ctrl, h) = controller(api, false);
        ctrl.select(growth(false)).await;

        assert_eq!(ctrl.state().error_message(), Some("Card networks down"));
        assert_eq!(h.tracker.live.get(), 0);
    }

    #[tokio::test]
    async fn test_mount_retries_when_attachment_appears() {
        let (ctrl, h) = controller(FakeApi::default(), false);
        h.container.set(false);
        ctrl.select(growth(true)).await;
        assert!(matches!(ctrl.state(), CheckoutState::Ready { .. }));
        assert_eq!(h.tracker.live.get(), 0);

        h.container.set(true);
        ctrl.try_mount().await;
        assert!(matches!(ctrl.state(), CheckoutState::Mounted { .. }));
        assert_eq!(h.tracker.live.get(), 1);

        // Further render passes are no-ops
        ctrl.try_mount().await;
        assert_eq!(h.tracker.live.get(), 1);
    }

    #[tokio::test]
    async fn test_mount_failure_becomes_error() {
        let (ctrl, _h) = controller(FakeApi::default(), true);
        ctrl.select(growth(false)).await;
        assert_eq!(ctrl.state().error_message(), Some("Stripe not available."));
    }

    #[tokio::test]
    async fn test_teardown_releases_widget() {
        let (ctrl, h) = controller(FakeApi::default(), false);
        ctrl.select(growth(false)).await;
        ctrl.teardown();
        assert_eq!(ctrl.state(), CheckoutState::Idle);
        assert_eq!(h.tracker.live.get(), 0);
    }

    #[tokio::test]
    async fn test_drop_releases_widget() {
        let (ctrl, h) = controller(FakeApi::default(), false);
        ctrl.select(growth(false)).await;
        drop(ctrl);
        assert_eq!(h.tracker.live.get(), 0);
    }

    #[test]
    fn test_late_widget_is_destroyed_unattached() {
        let tracker = Rc::new(Tracker::default());
        let mut orch: CheckoutOrchestrator<FakeWidget> = CheckoutOrchestrator::new();

        let first = orch.begin(growth(false));
        assert!(orch.resolve(first, Ok(ClientSecret::new("a"))));
        let (ticket, _) = orch.claim_mount().unwrap();
        let _second = orch.begin(growth(true));

        orch.mount_completed(
            ticket,
            Ok(Some(FakeWidget {
                secret: "a".into(),
                attached: Cell::new(false),
                tracker: tracker.clone(),
            })),
            |_| panic!("superseded widget must not be attached"),
        );
        assert_eq!(*tracker.log.borrow(), vec![Event::Discarded("a".into())]);
        assert_eq!(tracker.live.get(), 0);
        assert!(!orch.has_live_widget());
        assert!(matches!(orch.state(), CheckoutState::Requesting(_)));
    }

    #[tokio::test]
    async fn test_slow_stale_prepare_never_overlaps_live_widget() {
        let slow = Rc::new(Notify::new());
        let gates = HashMap::from([("secret-growth-false".to_string(), slow.clone())]);
        let (ctrl, h) = gated_controller(FakeApi::default(), false, gates);

        // rush=false has its session but is still preparing when rush=true mounts
        futures::join!(ctrl.select(growth(false)), async {
            ctrl.select(growth(true)).await;
            slow.notify_one();
        });

        assert_eq!(
            *h.tracker.log.borrow(),
            vec![
                Event::Mounted("secret-growth-true".into()),
                Event::Discarded("secret-growth-false".into()),
            ]
        );
        assert_eq!(h.tracker.peak.get(), 1);
        assert_eq!(h.tracker.live.get(), 1);
        assert_eq!(mounted_secret(&ctrl.state(), &h).as_deref(), Some("secret-growth-true"));
    }

    #[tokio::test]
    async fn test_attach_failure_becomes_error() {
        let (ctrl, h) = controller(FakeApi::default(), false);
        h.fail_attach.set(true);
        ctrl.select(growth(false)).await;

        assert_eq!(ctrl.state().error_message(), Some("Stripe not available."));
        assert_eq!(
            *h.tracker.log.borrow(),
            vec![Event::Discarded("secret-growth-false".into())]
        );
        assert_eq!(h.tracker.live.get(), 0);
        assert!(!ctrl.has_live_widget());
    }

    #[test]
    fn test_claim_is_exclusive() {
        let mut orch: CheckoutOrchestrator<FakeWidget> = CheckoutOrchestrator::new();
        let ticket = orch.begin(growth(false));
        orch.resolve(ticket, Ok(ClientSecret::new("a")));
        assert!(orch.claim_mount().is_some());
        assert!(orch.claim_mount().is_none());
    }

    #[test]
    fn test_both_stages_price_identically() {
        for package in catalog::all() {
            for rush in [false, true] {
                let mut form = IntakeForm::default();
                form.rush = rush;
                let brief_total = form.total(package);
                let pay_total = CheckoutParams::resolve(package.id, rush).unwrap().total();
                assert_eq!(brief_total, pay_total, "{} rush={rush}", package.id);
            }
        }
    }

    #[tokio::test]
    async fn test_growth_rush_end_to_end() {
        struct AcceptAll;

        #[async_trait(?Send)]
        impl crate::api::FormBackend for AcceptAll {
            async fn submit(&self, submission: &crate::api::FormSubmission) -> Result<()> {
                assert_eq!(submission.field("total"), Some("$2700"));
                Ok(())
            }
        }

        let package = catalog::find("growth").unwrap();
        let mut form = IntakeForm::new()
            .with(BriefField::Company, "Northside Dental")
            .with(BriefField::Contact, "Priya N.")
            .with(BriefField::Email, "priya@northside.dental")
            .with(BriefField::Phone, "555-0199")
            .with(BriefField::Pages, "7")
            .with(BriefField::Goal, "Online booking")
            .with(BriefField::AssetsNote, "Brand guide attached later");
        form.rush = true;
        assert_eq!(form.total(package), 2700);

        let next = form.submit(package, &AcceptAll).await.unwrap();
        let Route::Pay { package: id, rush } = Route::parse(&next.to_hash()) else {
            panic!("brief should lead to payment");
        };
        let params = CheckoutParams::resolve(&id, rush).unwrap();
        assert_eq!(params.total(), 2700);

        let (ctrl, h) = controller(FakeApi::default(), false);
        ctrl.select(params).await;
        let requests = h.requests.borrow();
        assert_eq!(requests[0]["slug"], "growth");
        assert_eq!(requests[0]["rush"], true);
        assert_eq!(requests[0]["origin"], "https://citeks.net");
    }

    #[test]
    fn test_observer_sees_transitions() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let (ctrl, _h) = controller(FakeApi::default(), false);
        let ctrl = ctrl.with_observer(move |s| sink.borrow_mut().push(s.clone()));

        ctrl.teardown();
        assert_eq!(*seen.borrow(), vec![CheckoutState::Idle]);
    }
}
