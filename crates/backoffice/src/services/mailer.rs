//! Transactional email provider client.
//!
//! Thin JSON client over the provider's `smtp/email` endpoint. One request
//! sends one email; batching and pacing live in [`super::dispatch`].

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MailerConfig;

/// Provider API base URL.
const BASE_URL: &str = "https://api.brevo.com/v3";

/// Errors that can occur when talking to the email provider.
#[derive(Debug, Error)]
pub enum MailerError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client or parse a response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// An email party (sender, recipient, reply-to).
#[derive(Debug, Clone, Serialize)]
pub struct Party {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One outbound email.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: Vec<Party>,
    pub cc: Vec<Party>,
    pub subject: String,
    pub html_content: String,
    pub tags: Vec<String>,
}

/// Provider acknowledgement.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    pub message_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(rename = "messageId")]
    message_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    sender: &'a Party,
    to: &'a [Party],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    cc: &'a [Party],
    #[serde(rename = "replyTo", skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a Party>,
    subject: &'a str,
    #[serde(rename = "htmlContent")]
    html_content: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tags: &'a [String],
}

/// Email provider client.
#[derive(Clone)]
pub struct MailerClient {
    client: reqwest::Client,
    sender: Party,
    reply_to: Option<Party>,
}

impl MailerClient {
    /// Create a new provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &MailerConfig) -> Result<Self, MailerError> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "api-key",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(|e| MailerError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let sender = Party {
            email: config.sender_email.as_str().to_string(),
            name: Some(config.sender_name.clone()),
        };
        let reply_to = config.reply_to_email.as_ref().map(|email| Party {
            email: email.as_str().to_string(),
            name: config.reply_to_name.clone(),
        });

        Ok(Self {
            client,
            sender,
            reply_to,
        })
    }

    /// Send one transactional email.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the provider rejects it.
    pub async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, MailerError> {
        let url = format!("{BASE_URL}/smtp/email");
        let body = SendRequest {
            sender: &self.sender,
            to: &email.to,
            cc: &email.cc,
            reply_to: self.reply_to.as_ref(),
            subject: &email.subject,
            html_content: &email.html_content,
            tags: &email.tags,
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SendResponse = response
            .json()
            .await
            .map_err(|e| MailerError::Parse(e.to_string()))?;

        Ok(SendReceipt {
            message_id: parsed.message_id,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_omits_empty_fields() {
        let sender = Party {
            email: "hello@packdesk.io".to_string(),
            name: Some("Packdesk".to_string()),
        };
        let to = [Party {
            email: "buyer@acme.com".to_string(),
            name: None,
        }];
        let request = SendRequest {
            sender: &sender,
            to: &to,
            cc: &[],
            reply_to: None,
            subject: "Hi",
            html_content: "<p>hi</p>",
            tags: &[],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("cc").is_none());
        assert!(json.get("replyTo").is_none());
        assert!(json.get("tags").is_none());
        assert_eq!(json["htmlContent"], "<p>hi</p>");
        // A recipient without a display name serializes email-only
        assert!(json["to"][0].get("name").is_none());
    }
}
