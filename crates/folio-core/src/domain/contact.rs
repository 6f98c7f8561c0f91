use serde::{Deserialize, Serialize};
use validator::Validate;

/// Message submitted through the contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactMessage {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    pub subject: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl ContactMessage {
    /// Subject line used when relaying the message.
    pub fn subject_line(&self) -> String {
        match self.subject.as_deref().map(str::trim) {
            Some(subject) if !subject.is_empty() => format!("Portfolio contact: {subject}"),
            _ => format!("Portfolio contact from {}", self.name),
        }
    }

    /// Plain-text body used when relaying the message.
    pub fn text_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nSubject: {}\n\n{}",
            self.name,
            self.email,
            self.subject.as_deref().unwrap_or("(none)"),
            self.message
        )
    }
}
