use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ContactError;

/// Form body sent to `POST /api/contact`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::Invalid("Please tell me your name"));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ContactError::Invalid("Please enter a valid email address"));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::Invalid("Please write a message"));
        }
        Ok(())
    }

    fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }
}

/// Something before an `@` and a dot somewhere after it
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Message,
            ContactField::Message => ContactField::Name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Sent(String),
    Failed(String),
}

/// Contact page state: the form, which field has the cursor, and the
/// outcome of the last submission
#[derive(Debug, Clone, Default)]
pub struct ContactPage {
    pub form: ContactForm,
    focus: Option<ContactField>,
    status: SubmitStatus,
}

impl ContactPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Option<ContactField> {
        self.focus
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_editing(&self) -> bool {
        self.focus.is_some()
    }

    /// Move the cursor to the next field, entering the form if needed
    pub fn focus_next(&mut self) {
        self.focus = Some(self.focus.map_or(ContactField::Name, |f| f.next()));
    }

    pub fn unfocus(&mut self) {
        self.focus = None;
    }

    pub fn input(&mut self, ch: char) {
        if let Some(field) = self.focus {
            self.form.field_mut(field).push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focus {
            self.form.field_mut(field).pop();
        }
    }

    /// Validate and mark the form as sending.
    ///
    /// Returns the form to post, or `None` if it is invalid or already in
    /// flight. Validation problems land in `status`.
    pub fn begin_submit(&mut self) -> Option<ContactForm> {
        if self.status == SubmitStatus::Sending {
            return None;
        }
        match self.form.validate() {
            Ok(()) => {
                self.status = SubmitStatus::Sending;
                Some(self.form.clone())
            }
            Err(e) => {
                self.status = SubmitStatus::Failed(e.to_string());
                None
            }
        }
    }

    pub fn finish_submit(&mut self, result: Result<String, ContactError>) {
        self.status = match result {
            Ok(message) => {
                self.form = ContactForm::default();
                self.focus = None;
                SubmitStatus::Sent(message)
            }
            Err(e) => SubmitStatus::Failed(e.to_string()),
        };
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Posts contact forms to the site's endpoint
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Send the form once. No retries; the caller shows whatever comes back.
    pub async fn submit(&self, form: &ContactForm) -> Result<String, ContactError> {
        let url = format!("{}/api/contact", self.endpoint.trim_end_matches('/'));
        tracing::info!(%url, "submitting contact form");

        let response = self.http.post(&url).json(form).send().await?;
        let status = response.status();

        if status == StatusCode::OK {
            let body = response.json::<serde_json::Value>().await.ok();
            let message = body
                .as_ref()
                .and_then(|b| b.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("Message sent! I'll get back to you soon.");
            return Ok(message.to_string());
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("Request failed ({})", status),
        };
        tracing::warn!(status = status.as_u16(), %message, "contact form rejected");
        Err(ContactError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
