//! # citeks-core
//!
//! Domain logic for the CITEKS agency site: the package catalog, the single
//! pricing calculator, brief and contact form state, hash route decoding,
//! the embedded checkout state machine and the post-payment receipt.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────┐    ┌──────────────┐    ┌────────────────────┐    ┌──────────┐
//! │ Catalog  │───▶│ Intake Brief │───▶│ Checkout (embedded)│───▶│ Receipt  │
//! │ (static) │    │ total + POST │    │ session + widget   │    │ status   │
//! └──────────┘    └──────────────┘    └────────────────────┘    └──────────┘
//!                        │  #/pay/<id>?rush=1|0   │  return_url ?session_id=
//! ```
//!
//! Network and DOM access stay behind the traits in [`api`] so every state
//! transition here can be driven from plain async tests.

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod error;
pub mod intake;
pub mod pricing;
pub mod receipt;
pub mod route;

pub use api::{CheckoutApi, FormBackend, MountedWidget, WidgetHost};
pub use catalog::Package;
pub use checkout::{CheckoutController, CheckoutOrchestrator, CheckoutParams, CheckoutState};
pub use config::SiteConfig;
pub use error::{Result, SiteError, ValidationErrors};
pub use route::{Navigator, Route, ScrollTarget};
