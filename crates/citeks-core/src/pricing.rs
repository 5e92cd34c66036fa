//! Pricing Calculator
//!
//! `total` is the only place a package price is combined with the rush fee.
//! The brief page, the payment page and the server's line item all go
//! through it.

use crate::catalog::Package;

/// Total in whole dollars: base price plus the rush fee when selected
pub fn total(package: &Package, rush: bool) -> u32 {
    package.base_price + if rush { package.rush_fee } else { 0 }
}

/// Total in cents, for the payment processor
pub fn total_cents(package: &Package, rush: bool) -> i64 {
    i64::from(total(package, rush)) * 100
}

/// Display form used in the brief payload and the "Total:" lines, e.g. `$2700`
pub fn display_total(package: &Package, rush: bool) -> String {
    format!("${}", total(package, rush))
}

/// `Yes` / `No` as the form backend records it
pub const fn rush_flag(rush: bool) -> &'static str {
    if rush { "Yes" } else { "No" }
}

/// Whole dollars with thousands separators, e.g. `$2,300`
pub fn format_dollars(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${out}")
}
