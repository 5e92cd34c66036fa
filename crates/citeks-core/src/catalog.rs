//! Package Catalog
//!
//! The fixed service tiers. Prices are whole US dollars.

use serde::Serialize;

use crate::pricing;

/// A fixed service offering
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Route identifier (`/brief/:id`, `/pay/:id`)
    pub id: &'static str,

    pub name: &'static str,

    /// Base price in whole dollars
    pub base_price: u32,

    /// Additional cost of the rush upgrade in whole dollars
    pub rush_fee: u32,

    pub standard_days: u32,

    pub rush_days: u32,

    pub blurb: &'static str,

    pub perfect_for: &'static str,

    pub cta: &'static str,

    /// Marked as the recommended tier
    pub highlight: bool,

    pub features: &'static [&'static str],
}

impl Package {
    /// Base price with thousands separators, e.g. `$2,300`
    pub fn display_price(&self) -> String {
        pricing::format_dollars(self.base_price)
    }

    pub fn timeline_note(&self) -> String {
        format!(
            "Typical timeline: {} days (rush {} days for an additional ${}).",
            self.standard_days, self.rush_days, self.rush_fee
        )
    }

    /// Label for the rush checkbox
    pub fn rush_label(&self) -> String {
        format!(
            "Rush delivery: finish in {} days (+${})",
            self.rush_days, self.rush_fee
        )
    }
}

static PACKAGES: [Package; 3] = [
    Package {
        id: "starter",
        name: "Starter",
        base_price: 900,
        rush_fee: 200,
        standard_days: 4,
        rush_days: 2,
        blurb: "2–3 pages, custom design. Mobile + desktop. Modern animations.",
        perfect_for: "Cafés, barbers, freelancers",
        cta: "Start Starter",
        highlight: false,
        features: &[
            "2–3 custom pages",
            "Responsive + performance pass",
            "Simple lead/contact form",
            "Launch in days, not weeks",
        ],
    },
    Package {
        id: "growth",
        name: "Growth",
        base_price: 2300,
        rush_fee: 400,
        standard_days: 8,
        rush_days: 6,
        blurb: "5–7 pages, custom design + SEO. Contact/booking, Maps, integrations, content guidance.",
        perfect_for: "Dentists, gyms, restaurants, small firms",
        cta: "Grow with Growth",
        highlight: true,
        features: &[
            "5–7 custom pages",
            "On-page SEO + schema",
            "Contact / booking form + Maps",
            "3rd-party integrations",
            "Content guidance (no full copy)",
        ],
    },
    Package {
        id: "scale",
        name: "Scale",
        base_price: 7000,
        rush_fee: 800,
        standard_days: 14,
        rush_days: 10,
        blurb: "10+ pages, full custom design. Strategy, advanced SEO + analytics, booking/e-com/CRM, copy support.",
        perfect_for: "Law firms, real estate, healthcare, e-commerce brands",
        cta: "Scale with Scale",
        highlight: false,
        features: &[
            "10+ pages, full custom",
            "Strategy session + funnel mapping",
            "Advanced SEO + analytics",
            "Booking systems / e-commerce",
            "CRM integrations",
            "Copywriting support",
        ],
    },
];

/// All packages in display order
pub fn all() -> &'static [Package] {
    &PACKAGES
}

/// Look up a package by route identifier. Unknown ids are expected (bad links).
pub fn find(id: &str) -> Option<&'static Package> {
    PACKAGES.iter().find(|p| p.id == id)
}
