//! Page Components

mod brief;
mod home;
mod info;
mod pay;
mod thank_you;

pub use brief::BriefPage;
pub use home::HomePage;
pub use info::{NotFoundPage, PrivacyPage, ProjectsPage, TechTermsPage, WhyUsPage};
pub use pay::PayPage;
pub use thank_you::ThankYouPage;
