//! Contact Form
//!
//! The short lead form on the home page. Posted url-encoded.

use crate::api::{FormBackend, FormEncoding, FormSubmission};
use crate::error::{Result, ValidationErrors};
use crate::intake::{EMAIL_RE, INVALID_EMAIL, REQUIRED};

pub const TITLES: [&str; 6] = ["Mr", "Ms", "Mx", "Dr", "Prof", "Other"];

pub const BUDGETS: [&str; 4] = [
    "Up to $1,000",
    "$1,000 – $2,500",
    "$2,500 – $7,000",
    "$7,000+",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactField {
    Title,
    First,
    Last,
    Email,
    Project,
    Budget,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 7] = [
        Self::Title,
        Self::First,
        Self::Last,
        Self::Email,
        Self::Project,
        Self::Budget,
        Self::Message,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::First => "first",
            Self::Last => "last",
            Self::Email => "email",
            Self::Project => "project",
            Self::Budget => "budget",
            Self::Message => "message",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::First => "First name",
            Self::Last => "Surname",
            Self::Email => "Email",
            Self::Project => "Project type",
            Self::Budget => "Budget",
            Self::Message => "Message",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactForm {
    values: [String; 7],
    sent: bool,
}

impl Default for ContactForm {
    fn default() -> Self {
        let mut form = Self {
            values: Default::default(),
            sent: false,
        };
        form.set(ContactField::Title, TITLES[0]);
        form
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ContactField) -> &str {
        &self.values[field as usize]
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        self.values[field as usize] = value.into();
    }

    #[must_use]
    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Whether the last submission went through
    pub const fn is_sent(&self) -> bool {
        self.sent
    }

    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in [
            ContactField::First,
            ContactField::Last,
            ContactField::Project,
            ContactField::Budget,
        ] {
            if self.get(field).is_empty() {
                errors.insert(field.as_str(), REQUIRED);
            }
        }
        if !EMAIL_RE.is_match(self.get(ContactField::Email)) {
            errors.insert(ContactField::Email.as_str(), INVALID_EMAIL);
        }
        errors
    }

    pub fn build_submission(&self) -> FormSubmission {
        let mut submission = FormSubmission::new("contact", FormEncoding::UrlEncoded);
        for field in ContactField::ALL {
            submission.push(field.as_str(), self.get(field));
        }
        submission
    }

    /// Validate and post. Marks the form sent on success.
    pub async fn submit<B>(&mut self, backend: &B) -> Result<()>
    where
        B: FormBackend + ?Sized,
    {
        self.validate().into_result()?;
        backend.submit(&self.build_submission()).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Contact submission failed");
        })?;
        tracing::info!(budget = self.get(ContactField::Budget), "Contact form sent");
        self.sent = true;
        Ok(())
    }
}
