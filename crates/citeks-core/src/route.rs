//! Hash Routing
//!
//! Decodes `#/...` locations into a closed [`Route`] set and keeps the one
//! piece of cross-page state: a pending scroll target for home page anchors.

use std::fmt;

/// Every page the site can show
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    WhyUs,
    Projects,
    /// Intake brief; the id may not name a real package
    Brief { package: String },
    /// Embedded checkout, `?rush=1` preselects the upgrade
    Pay { package: String, rush: bool },
    /// Return target of the payment processor
    ThankYou { session_id: Option<String> },
    Privacy,
    TechTerms,
    NotFound,
}

impl Route {
    /// Decode a location hash such as `#/pay/growth?rush=1`.
    ///
    /// The leading `#` and `/` are optional; an empty hash is home.
    pub fn parse(hash: &str) -> Self {
        let clean = hash.trim_start_matches('#').trim_start_matches('/');
        let (path, query) = clean.split_once('?').unwrap_or((clean, ""));
        let query_param = |name: &str| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
        };

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let head = segments.next().unwrap_or("");
        let id = segments.next();

        match (head, id) {
            ("", _) => Self::Home,
            ("why-us", _) => Self::WhyUs,
            ("projects", _) => Self::Projects,
            ("brief", Some(id)) => Self::Brief {
                package: id.to_string(),
            },
            ("pay", Some(id)) => Self::Pay {
                package: id.to_string(),
                rush: query_param("rush").as_deref() == Some("1"),
            },
            ("thank-you", _) => Self::ThankYou {
                session_id: query_param("session_id").filter(|s| !s.is_empty()),
            },
            ("privacy", _) => Self::Privacy,
            ("tech-terms", _) => Self::TechTerms,
            _ => Self::NotFound,
        }
    }

    /// Location hash that decodes back to this route
    pub fn to_hash(&self) -> String {
        match self {
            Self::Home => "#/".into(),
            Self::WhyUs => "#/why-us".into(),
            Self::Projects => "#/projects".into(),
            Self::Brief { package } => format!("#/brief/{package}"),
            Self::Pay { package, rush } => {
                format!("#/pay/{package}?rush={}", if *rush { "1" } else { "0" })
            }
            Self::ThankYou { session_id: None } => "#/thank-you".into(),
            Self::ThankYou {
                session_id: Some(id),
            } => {
                let query: String = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("session_id", id)
                    .finish();
                format!("#/thank-you?{query}")
            }
            Self::Privacy => "#/privacy".into(),
            Self::TechTerms => "#/tech-terms".into(),
            Self::NotFound => "#/not-found".into(),
        }
    }

    pub const fn is_home(&self) -> bool {
        matches!(self, Self::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hash())
    }
}

/// Anchors on the home page other pages link to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollTarget {
    Packages,
    Contact,
}

impl ScrollTarget {
    /// DOM id of the anchor
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Packages => "packages",
            Self::Contact => "contact",
        }
    }
}

/// What the caller should do for a scroll request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    /// Anchor is on the current page
    ScrollNow(ScrollTarget),
    /// Go home first; the target is kept pending
    NavigateHome,
}

/// Explicit navigation state carried by the app shell
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigator {
    pending_scroll: Option<ScrollTarget>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_scroll(&mut self, target: ScrollTarget, current: &Route) -> ScrollAction {
        if current.is_home() {
            self.pending_scroll = None;
            ScrollAction::ScrollNow(target)
        } else {
            self.pending_scroll = Some(target);
            ScrollAction::NavigateHome
        }
    }

    /// Consume the pending target once home is showing
    pub fn take_pending(&mut self, current: &Route) -> Option<ScrollTarget> {
        if current.is_home() {
            self.pending_scroll.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_variants() {
        for hash in ["", "#", "#/", "/", "#//"] {
            assert_eq!(Route::parse(hash), Route::Home, "{hash:?}");
        }
    }

    #[test]
    fn test_static_pages() {
        assert_eq!(Route::parse("#/why-us"), Route::WhyUs);
        assert_eq!(Route::parse("#/projects"), Route::Projects);
        assert_eq!(Route::parse("#/privacy"), Route::Privacy);
        assert_eq!(Route::parse("#/tech-terms"), Route::TechTerms);
        assert_eq!(Route::parse("#/nope"), Route::NotFound);
    }

    #[test]
    fn test_brief_and_pay_need_an_id() {
        assert_eq!(Route::parse("#/brief"), Route::NotFound);
        assert_eq!(Route::parse("#/pay/"), Route::NotFound);
        assert_eq!(
            Route::parse("#/brief/unknown"),
            Route::Brief {
                package: "unknown".into()
            }
        );
    }

    #[test]
    fn test_pay_rush_flag() {
        let rush = |hash| match Route::parse(hash) {
            Route::Pay { rush, .. } => rush,
            other => panic!("unexpected {other:?}"),
        };
        assert!(rush("#/pay/growth?rush=1"));
        assert!(!rush("#/pay/growth?rush=0"));
        assert!(!rush("#/pay/growth?rush=true"));
        assert!(!rush("#/pay/growth"));
    }

    #[test]
    fn test_thank_you_session() {
        assert_eq!(
            Route::parse("#/thank-you?session_id=cs_test_123"),
            Route::ThankYou {
                session_id: Some("cs_test_123".into())
            }
        );
        assert_eq!(
            Route::parse("#/thank-you?session_id="),
            Route::ThankYou { session_id: None }
        );
    }

    #[test]
    fn test_hash_inverts_parse() {
        let routes = [
            Route::Home,
            Route::WhyUs,
            Route::Brief {
                package: "starter".into(),
            },
            Route::Pay {
                package: "scale".into(),
                rush: true,
            },
            Route::Pay {
                package: "scale".into(),
                rush: false,
            },
            Route::ThankYou {
                session_id: Some("cs_live_a&b".into()),
            },
            Route::TechTerms,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_hash()), route);
        }
    }

    #[test]
    fn test_pending_scroll_is_one_shot() {
        let mut nav = Navigator::new();
        let brief = Route::Brief {
            package: "growth".into(),
        };

        assert_eq!(
            nav.request_scroll(ScrollTarget::Contact, &brief),
            ScrollAction::NavigateHome
        );
        assert_eq!(nav.take_pending(&brief), None);
        assert_eq!(nav.take_pending(&Route::Home), Some(ScrollTarget::Contact));
        assert_eq!(nav.take_pending(&Route::Home), None);
    }

    #[test]
    fn test_scroll_on_home_is_immediate() {
        let mut nav = Navigator::new();
        assert_eq!(
            nav.request_scroll(ScrollTarget::Packages, &Route::Home),
            ScrollAction::ScrollNow(ScrollTarget::Packages)
        );
        assert_eq!(nav.take_pending(&Route::Home), None);
    }
}
