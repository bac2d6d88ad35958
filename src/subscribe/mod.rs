//! Newsletter signup forwarding
//!
//! Signups are relayed to a mailing-list provider through the [`MailingList`]
//! trait. [`MailchimpClient`] talks to the Mailchimp marketing API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;
use ureq::Agent;

use crate::config::MailchimpConfig;

/// Error from forwarding a signup
#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    /// One of the list credentials is missing
    #[error(
        "mailchimp is not configured: set {}, {} and {}",
        MailchimpConfig::DATA_CENTER_VAR,
        MailchimpConfig::API_KEY_VAR,
        MailchimpConfig::LIST_ID_VAR
    )]
    NotConfigured,

    /// The provider answered with an error status
    #[error("mailchimp responded with status code: {0}")]
    Status(u16),

    /// The request never got an answer
    #[error("mailchimp request failed: {0}")]
    Transport(String),
}

impl From<ureq::Error> for SubscribeError {
    fn from(e: ureq::Error) -> Self {
        SubscribeError::Transport(e.to_string())
    }
}

/// A mailing list that accepts new subscribers
pub trait MailingList: Send + Sync {
    /// Add `email` to the list
    fn subscribe(&self, email: &str) -> Result<(), SubscribeError>;
}

/// Mailchimp marketing API client
///
/// Blocking; call it off the async executor.
pub struct MailchimpClient {
    agent: Agent,
    config: MailchimpConfig,
}

impl MailchimpClient {
    pub fn new(config: MailchimpConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.credentials().is_some()
    }
}

impl MailingList for MailchimpClient {
    fn subscribe(&self, email: &str) -> Result<(), SubscribeError> {
        let Some((data_center, api_key, list_id)) = self.config.credentials() else {
            tracing::error!("Mailchimp credentials are not set");
            return Err(SubscribeError::NotConfigured);
        };

        let url = members_url(data_center, list_id);
        let payload = json!({
            "email_address": email,
            "status": "subscribed",
        });

        tracing::info!("Subscribing {} to list {}", email, list_id);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &basic_auth("", api_key))
            .send_json(&payload)?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response
                .into_body()
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_string());
            tracing::warn!("Mailchimp rejected {}: {} {}", email, status, body);
            return Err(SubscribeError::Status(status));
        }

        Ok(())
    }
}

/// Members endpoint of a list
fn members_url(data_center: &str, list_id: &str) -> String {
    format!(
        "https://{}.api.mailchimp.com/3.0/lists/{}/members",
        data_center, list_id
    )
}

/// HTTP basic `Authorization` header value
fn basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", STANDARD.encode(credentials))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_url() {
        assert_eq!(
            members_url("us21", "a1b2c3"),
            "https://us21.api.mailchimp.com/3.0/lists/a1b2c3/members"
        );
    }

    #[test]
    fn test_basic_auth() {
        // base64(":key-us21")
        assert_eq!(basic_auth("", "key-us21"), "Basic OmtleS11czIx");
        assert_eq!(basic_auth("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_unconfigured_client_fails_before_request() {
        let client = MailchimpClient::new(MailchimpConfig {
            data_center: Some("us21".to_string()),
            api_key: Some("key".to_string()),
            list_id: None,
        });

        assert!(!client.is_configured());
        let err = client.subscribe("a@b.com").unwrap_err();
        assert!(matches!(err, SubscribeError::NotConfigured));
        assert!(err.to_string().contains("MAILCHIMP_LIST_ID"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SubscribeError::Status(400).to_string(),
            "mailchimp responded with status code: 400"
        );
    }
}
