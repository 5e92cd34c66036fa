//! API Client
//!
//! Browser adapters for the form backend and the payment endpoints.

use async_trait::async_trait;
use citeks_core::api::{
    Attachment, CheckoutApi, CheckoutSessionRequest, CheckoutSessionResponse, ClientSecret,
    FormBackend, FormEncoding, FormSubmission, SessionStatus, extract_error_message,
};
use citeks_core::{Result, SiteConfig, SiteError};
use reqwest::multipart::{Form, Part};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

const LOCAL_ORIGIN: &str = "http://localhost:3000";

/// Global the hosting page may set instead of a build-time key
const PUBLISHABLE_KEY_GLOBAL: &str = "STRIPE_PUBLISHABLE_KEY";

/// Origin of the current page
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| LOCAL_ORIGIN.into())
}

/// Site configuration with the publishable key from the build or the page
pub fn site_config() -> SiteConfig {
    let from_page = web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str(PUBLISHABLE_KEY_GLOBAL)).ok())
        .and_then(|v| v.as_string());
    let key = option_env!("STRIPE_PUBLISHABLE_KEY")
        .map(String::from)
        .or(from_page);
    SiteConfig::default().with_publishable_key(key.as_deref())
}

/// HTTP client for the site's backends
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: SiteConfig,
    origin: String,
}

impl HttpClient {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            origin: page_origin(),
        }
    }

    pub fn from_window() -> Self {
        Self::new(site_config())
    }

    fn url(&self, path: &str) -> String {
        self.config.absolute(&self.origin, path)
    }

    fn multipart(submission: &FormSubmission) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in &submission.fields {
            form = form.text(name.clone(), value.clone());
        }
        for file in &submission.files {
            let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
            if let Some(content_type) = &file.content_type {
                part = part
                    .mime_str(content_type)
                    .map_err(|e| SiteError::Transport(e.to_string()))?;
            }
            form = form.part(submission.file_field, part);
        }
        Ok(form)
    }
}

#[async_trait(?Send)]
impl FormBackend for HttpClient {
    async fn submit(&self, submission: &FormSubmission) -> Result<()> {
        let request = self.client.post(self.url(&self.config.form_endpoint));
        let request = match submission.encoding {
            FormEncoding::UrlEncoded => request.form(&submission.fields),
            FormEncoding::Multipart => request.multipart(Self::multipart(submission)?),
        };

        let response = request
            .send()
            .await
            .map_err(|e| SiteError::Transport(e.to_string()))?;

        if response.status().is_success() {
            tracing::info!(form = %submission.form_name, "Form submitted");
            Ok(())
        } else {
            Err(SiteError::Transport(format!(
                "Form backend returned {}",
                response.status()
            )))
        }
    }
}

#[async_trait(?Send)]
impl CheckoutApi for HttpClient {
    async fn create_session(&self, request: &CheckoutSessionRequest) -> Result<ClientSecret> {
        let response = self
            .client
            .post(self.url(&self.config.checkout_endpoint))
            .json(request)
            .send()
            .await
            .map_err(|e| SiteError::SessionCreation(extract_error_message(&e.to_string())))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiteError::SessionCreation(extract_error_message(&body)));
        }

        let data: CheckoutSessionResponse = response
            .json()
            .await
            .map_err(|e| SiteError::SessionCreation(extract_error_message(&e.to_string())))?;

        Ok(ClientSecret::new(data.client_secret))
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus> {
        let response = self
            .client
            .get(self.url(&self.config.status_endpoint))
            .query(&[("session_id", session_id)])
            .send()
            .await
            .map_err(|e| SiteError::ReceiptFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SiteError::ReceiptFetch(format!(
                "Status endpoint returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SiteError::ReceiptFetch(e.to_string()))
    }
}

/// Read every picked file into memory
pub async fn read_attachments(list: &web_sys::FileList) -> std::result::Result<Vec<Attachment>, String> {
    let mut files = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        let Some(file) = list.get(index) else {
            continue;
        };
        let buffer = JsFuture::from(file.array_buffer())
            .await
            .map_err(|_| format!("Could not read {}", file.name()))?;
        let content_type = Some(file.type_()).filter(|t| !t.is_empty());
        files.push(Attachment {
            file_name: file.name(),
            content_type,
            bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
        });
    }
    Ok(files)
}
