//! Intake Brief
//!
//! Project details collected before payment. A valid brief is posted to the
//! form backend as multipart data and the visitor moves on to `#/pay/<id>`
//! with the same rush choice.

use std::sync::LazyLock;

use regex::Regex;

use crate::api::{Attachment, FormBackend, FormEncoding, FormSubmission};
use crate::catalog::Package;
use crate::error::{Result, ValidationErrors};
use crate::pricing;
use crate::route::Route;

pub(crate) static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles")
});

pub(crate) const REQUIRED: &str = "Required";
pub(crate) const INVALID_EMAIL: &str = "Enter a valid email";
const MISSING_ASSETS: &str = "Provide a note or upload at least one asset file";

/// Multipart part name for uploaded assets
pub const ASSET_FILES_FIELD: &str = "assetsFiles";

/// Brief fields in form order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BriefField {
    Company,
    Contact,
    Email,
    Phone,
    Pages,
    Goal,
    AssetsNote,
    Seo,
    Integrations,
    Ecommerce,
    Crm,
    References,
    Competitors,
    Notes,
}

impl BriefField {
    pub const ALL: [Self; 14] = [
        Self::Company,
        Self::Contact,
        Self::Email,
        Self::Phone,
        Self::Pages,
        Self::Goal,
        Self::AssetsNote,
        Self::Seo,
        Self::Integrations,
        Self::Ecommerce,
        Self::Crm,
        Self::References,
        Self::Competitors,
        Self::Notes,
    ];

    /// Wire name used in the payload and as the error key
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Contact => "contact",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Pages => "pages",
            Self::Goal => "goal",
            Self::AssetsNote => "assetsNote",
            Self::Seo => "seo",
            Self::Integrations => "integrations",
            Self::Ecommerce => "ecommerce",
            Self::Crm => "crm",
            Self::References => "references",
            Self::Competitors => "competitors",
            Self::Notes => "notes",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Company => "Company / brand",
            Self::Contact => "Contact name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Pages => "Estimated pages",
            Self::Goal => "Goal of the site",
            Self::AssetsNote => "Available assets (notes)",
            Self::Seo => "SEO targets (keywords/locations)",
            Self::Integrations => "Integrations (maps, booking, payments)",
            Self::Ecommerce => "E-commerce (if needed)",
            Self::Crm => "CRM (if needed)",
            Self::References => "Reference sites (what you like)",
            Self::Competitors => "Competitors",
            Self::Notes => "Notes / constraints",
        }
    }

    /// Rendered as a textarea
    pub const fn is_multiline(self) -> bool {
        matches!(
            self,
            Self::Goal | Self::AssetsNote | Self::Seo | Self::References | Self::Notes
        )
    }

    const fn is_required(self) -> bool {
        matches!(
            self,
            Self::Company | Self::Contact | Self::Email | Self::Phone | Self::Pages | Self::Goal
        )
    }
}

/// Brief form state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntakeForm {
    values: [String; 14],
    pub files: Vec<Attachment>,
    pub rush: bool,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: BriefField) -> &str {
        &self.values[field as usize]
    }

    pub fn set(&mut self, field: BriefField, value: impl Into<String>) {
        self.values[field as usize] = value.into();
    }

    /// Builder form of [`set`](Self::set), handy in tests
    #[must_use]
    pub fn with(mut self, field: BriefField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Replace the attached files
    pub fn attach(&mut self, files: Vec<Attachment>) {
        self.files = files;
    }

    /// Total as both stages compute it
    pub fn total(&self, package: &Package) -> u32 {
        pricing::total(package, self.rush)
    }

    /// Check required fields, the email shape, and that assets are
    /// described by a note, a file, or both.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for field in BriefField::ALL.into_iter().filter(|f| f.is_required()) {
            if field == BriefField::Email {
                if !EMAIL_RE.is_match(self.get(field)) {
                    errors.insert(field.as_str(), INVALID_EMAIL);
                }
            } else if self.get(field).is_empty() {
                errors.insert(field.as_str(), REQUIRED);
            }
        }

        if self.get(BriefField::AssetsNote).is_empty() && self.files.is_empty() {
            errors.insert(BriefField::AssetsNote.as_str(), MISSING_ASSETS);
        }

        errors
    }

    /// Multipart payload for `package`
    pub fn build_submission(&self, package: &Package) -> FormSubmission {
        let mut submission =
            FormSubmission::new(format!("brief-{}", package.id), FormEncoding::Multipart);
        submission.push("package", package.name);
        submission.push("rush", pricing::rush_flag(self.rush));
        submission.push("total", pricing::display_total(package, self.rush));
        for field in BriefField::ALL {
            submission.push(field.as_str(), self.get(field));
        }
        submission.file_field = ASSET_FILES_FIELD;
        submission.files.clone_from(&self.files);
        submission
    }

    /// Validate, post the brief, and return where to go next.
    ///
    /// Validation failures never reach the backend. Transport failures are
    /// returned as-is and the caller stays on the brief.
    pub async fn submit<B>(&self, package: &Package, backend: &B) -> Result<Route>
    where
        B: FormBackend + ?Sized,
    {
        self.validate().into_result()?;

        let submission = self.build_submission(package);
        backend.submit(&submission).await.inspect_err(|e| {
            tracing::warn!(package = package.id, error = %e, "Brief submission failed");
        })?;

        tracing::info!(
            package = package.id,
            rush = self.rush,
            files = self.files.len(),
            "Brief submitted"
        );

        Ok(Route::Pay {
            package: package.id.to_string(),
            rush: self.rush,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;

    use super::*;
    use crate::catalog;
    use crate::error::SiteError;

    #[derive(Default)]
    struct RecordingBackend {
        submissions: RefCell<Vec<FormSubmission>>,
        fail: bool,
    }

    #[async_trait(?Send)]
    impl FormBackend for RecordingBackend {
        async fn submit(&self, submission: &FormSubmission) -> Result<()> {
            self.submissions.borrow_mut().push(submission.clone());
            if self.fail {
                Err(SiteError::Transport("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    fn complete_form() -> IntakeForm {
        IntakeForm::new()
            .with(BriefField::Company, "Vigor Lab")
            .with(BriefField::Contact, "Sam Reyes")
            .with(BriefField::Email, "sam@vigorlab.io")
            .with(BriefField::Phone, "+1 555 0100")
            .with(BriefField::Pages, "6")
            .with(BriefField::Goal, "More trial bookings")
            .with(BriefField::AssetsNote, "Logo in SVG, photos next week")
    }

    fn attachment() -> Attachment {
        Attachment {
            file_name: "logo.svg".into(),
            content_type: Some("image/svg+xml".into()),
            bytes: b"<svg/>".to_vec(),
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert!(complete_form().validate().is_empty());
    }

    #[test]
    fn test_each_required_field_blocks() {
        for field in BriefField::ALL.into_iter().filter(|f| f.is_required()) {
            let form = complete_form().with(field, "");
            let errors = form.validate();
            assert!(errors.contains(field.as_str()), "{field:?} should be required");
        }
    }

    #[test]
    fn test_email_shape() {
        let form = complete_form().with(BriefField::Email, "sam@localhost");
        assert_eq!(form.validate().get("email"), Some(INVALID_EMAIL));

        let form = complete_form().with(BriefField::Email, "sam @x.io");
        assert_eq!(form.validate().get("email"), Some(INVALID_EMAIL));
    }

    #[test]
    fn test_assets_note_or_file() {
        let mut form = complete_form().with(BriefField::AssetsNote, "");
        assert_eq!(form.validate().get("assetsNote"), Some(MISSING_ASSETS));

        form.attach(vec![attachment()]);
        assert!(!form.validate().contains("assetsNote"));

        let form = complete_form();
        assert!(form.files.is_empty());
        assert!(!form.validate().contains("assetsNote"));
    }

    #[test]
    fn test_optional_fields_never_error() {
        let errors = IntakeForm::new().validate();
        for field in [BriefField::Seo, BriefField::Crm, BriefField::Notes] {
            assert!(!errors.contains(field.as_str()));
        }
    }

    #[test]
    fn test_submission_payload() {
        let growth = catalog::find("growth").unwrap();
        let mut form = complete_form();
        form.rush = true;
        form.attach(vec![attachment(), attachment()]);

        let submission = form.build_submission(growth);
        assert_eq!(submission.encoding, FormEncoding::Multipart);
        assert_eq!(submission.field("form-name"), Some("brief-growth"));
        assert_eq!(submission.field("package"), Some("Growth"));
        assert_eq!(submission.field("rush"), Some("Yes"));
        assert_eq!(submission.field("total"), Some("$2700"));
        assert_eq!(submission.field("competitors"), Some(""));
        assert_eq!(submission.file_field, ASSET_FILES_FIELD);
        assert_eq!(submission.files.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_call() {
        let backend = RecordingBackend::default();
        let starter = catalog::find("starter").unwrap();

        let result = complete_form()
            .with(BriefField::Phone, "")
            .submit(starter, &backend)
            .await;

        match result {
            Err(SiteError::Validation(errors)) => assert!(errors.contains("phone")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(backend.submissions.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_success_routes_to_payment_with_rush() {
        let backend = RecordingBackend::default();
        let scale = catalog::find("scale").unwrap();
        let mut form = complete_form();
        form.rush = true;

        let route = form.submit(scale, &backend).await.unwrap();
        assert_eq!(
            route,
            Route::Pay {
                package: "scale".into(),
                rush: true
            }
        );
        assert_eq!(route.to_hash(), "#/pay/scale?rush=1");
        assert_eq!(backend.submissions.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_does_not_navigate() {
        let backend = RecordingBackend {
            fail: true,
            ..Default::default()
        };
        let starter = catalog::find("starter").unwrap();

        let err = complete_form().submit(starter, &backend).await.unwrap_err();
        assert!(matches!(err, SiteError::Transport(_)));
        assert!(err.user_message().contains("contact@citeks.net"));
    }
}
