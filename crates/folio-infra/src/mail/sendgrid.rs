//! SendGrid v3 mail relay.

use async_trait::async_trait;
use serde::Serialize;

use folio_core::domain::ContactMessage;
use folio_core::ports::{MailError, Mailer};

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: String,
    /// Owner inbox receiving contact messages.
    pub to_email: String,
    /// Verified sender address.
    pub from_email: String,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Content {
    #[serde(rename = "type")]
    kind: &'static str,
    value: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    reply_to: Address<'a>,
    subject: String,
    content: [Content; 1],
}

/// Relays contact messages through the SendGrid HTTP API.
pub struct SendGridMailer {
    client: reqwest::Client,
    config: SendGridConfig,
}

impl SendGridMailer {
    pub fn new(config: SendGridConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn request<'a>(&'a self, message: &'a ContactMessage) -> SendRequest<'a> {
        SendRequest {
            personalizations: [Personalization {
                to: [Address {
                    email: &self.config.to_email,
                    name: None,
                }],
            }],
            from: Address {
                email: &self.config.from_email,
                name: None,
            },
            reply_to: Address {
                email: &message.email,
                name: Some(&message.name),
            },
            subject: message.subject_line(),
            content: [Content {
                kind: "text/plain",
                value: message.text_body(),
            }],
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send_contact(&self, message: &ContactMessage) -> Result<(), MailError> {
        let response = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.config.api_key)
            .json(&self.request(message))
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected(format!("{status}: {body}")));
        }

        tracing::info!(subject = %message.subject_line(), "Contact message relayed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload() {
        let mailer = SendGridMailer::new(SendGridConfig {
            api_key: "key".to_string(),
            to_email: "owner@example.com".to_string(),
            from_email: "site@example.com".to_string(),
        });
        let message = ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: Some("Hello".to_string()),
            message: "Let's talk".to_string(),
        };

        let body = serde_json::to_value(mailer.request(&message)).unwrap();

        assert_eq!(
            body["personalizations"][0]["to"][0]["email"],
            "owner@example.com"
        );
        assert_eq!(body["from"]["email"], "site@example.com");
        assert!(body["from"].get("name").is_none());
        assert_eq!(body["reply_to"]["name"], "Ada");
        assert_eq!(body["subject"], "Portfolio contact: Hello");
        assert_eq!(body["content"][0]["type"], "text/plain");
        assert!(
            body["content"][0]["value"]
                .as_str()
                .unwrap()
                .contains("Let's talk")
        );
    }
}
