// src/notify/sms.rs
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::SmsChannel;

/// SMS transport speaking a plain JSON gateway API (Twilio-style relay).
/// Disabled when SMS_GATEWAY_URL is unset: sends become a logged no-op so the
/// engine can run email-only.
#[derive(Clone)]
pub struct SmsGatewayChannel {
    gateway_url: Option<String>,
    from_number: String,
    auth_token: Option<String>,
    client: Client,
    timeout: Duration,
    max_retries: u8,
}

impl SmsGatewayChannel {
    pub fn from_env() -> Self {
        Self {
            gateway_url: std::env::var("SMS_GATEWAY_URL").ok(),
            from_number: std::env::var("SMS_FROM_NUMBER").unwrap_or_default(),
            auth_token: std::env::var("SMS_AUTH_TOKEN").ok(),
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
        }
    }

    /// Builder for tests/tools.
    pub fn new(gateway_url: String, from_number: String) -> Self {
        Self {
            gateway_url: Some(gateway_url),
            from_number,
            auth_token: None,
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }
}

#[derive(Serialize)]
struct SmsPayload<'a> {
    from: &'a str,
    to: &'a str,
    body: &'a str,
}

#[async_trait::async_trait]
impl SmsChannel for SmsGatewayChannel {
    async fn send(&self, to: &str, body: &str) -> Result<()> {
        let Some(url) = &self.gateway_url else {
            tracing::debug!("SMS disabled (no SMS_GATEWAY_URL)");
            return Ok(());
        };

        let payload = SmsPayload {
            from: &self.from_number,
            to,
            body,
        };

        let mut attempt: u8 = 0;
        loop {
            attempt += 1;
            let mut req = self.client.post(url).timeout(self.timeout).json(&payload);
            if let Some(token) = &self.auth_token {
                req = req.bearer_auth(token);
            }

            match req.send().await {
                Ok(rsp) => {
                    if let Err(e) = rsp.error_for_status_ref() {
                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1)))
                                .await;
                            continue;
                        }
                        return Err(anyhow!("SMS gateway HTTP error: {e}"));
                    }
                    return Ok(());
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1))).await;
                        continue;
                    }
                    return Err(anyhow!("SMS gateway request failed: {e}"));
                }
            }
        }
    }
}
